//! Logging abstraction layer.
//!
//! The overlay logs through a small set of macros that forward to either the
//! [`log`](https://docs.rs/log) or [`tracing`](https://docs.rs/tracing) crate,
//! selected by feature flag. The two features are **mutually exclusive**.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! # Levels used by this crate
//!
//! | Macro        | Used for |
//! |--------------|----------|
//! | `trace_log!` | ignored commands, stale animation completions |
//! | `debug_log!` | history mutations, popover state transitions |
//! | `info_log!`  | overlay opened / closed |
//! | `warn_log!`  | rejected configuration |
//! | `error_log!` | geometry that cannot be placed |
//!
//! All macros accept `format!`-style arguments:
//!
//! ```ignore
//! use gpui_browser_overlay::{debug_log, trace_log};
//!
//! debug_log!("Recorded navigation '{}' -> '{}'", from, to);
//! trace_log!("go_back ignored: back stack empty");
//! ```
//!
//! With neither feature enabled every macro expands to nothing.

#[cfg(all(feature = "log", feature = "tracing"))]
compile_error!("features `log` and `tracing` are mutually exclusive; enable at most one");

/// Forward a message to whichever logging backend is enabled.
///
/// Implementation detail of the level macros below; not part of the public API.
#[doc(hidden)]
#[macro_export]
macro_rules! __overlay_log {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
    }};
}

/// Emit a **trace**-level log message.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__overlay_log!(trace, $($arg)*)
    };
}

/// Emit a **debug**-level log message.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__overlay_log!(debug, $($arg)*)
    };
}

/// Emit an **info**-level log message.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__overlay_log!(info, $($arg)*)
    };
}

/// Emit a **warn**-level log message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__overlay_log!(warn, $($arg)*)
    };
}

/// Emit an **error**-level log message.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__overlay_log!(error, $($arg)*)
    };
}
