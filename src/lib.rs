//! In-app browser overlay for [GPUI](https://gpui.rs).
//!
//! A modal browser chrome around a host-provided web view: a header with
//! close, back and forward buttons, the page title and URL, a loading
//! progress bar, and an overflow menu that opens as a popover.
//!
//! The crate renders no web content itself. The host feeds location changes,
//! titles and load progress into the overlay and supplies the content view.
//!
//! # Quick start
//!
//! ```ignore
//! use gpui::*;
//! use gpui_browser_overlay::*;
//!
//! let overlay = BrowserOverlay::new(
//!     OverlayConfig::new("https://example.com")
//!         .extra_menu_item(ExtraMenuItem::new("Share")),
//!     OverlayCallbacks::new().on_go_back(|| web_view_go_back()),
//!     Size::new(390.0, 844.0),
//! )?;
//!
//! let view = cx.new(|_| BrowserOverlayView::new(overlay).content(web_view));
//! view.update(cx, |view, cx| {
//!     view.open(cx);
//!     view.record_navigation("https://example.com/docs", cx);
//! });
//! ```
//!
//! # Building blocks
//!
//! The state machines are plain structs with no GPUI dependency beyond
//! geometry conversions, and can be driven directly:
//!
//! - [`NavigationHistory`]: back/forward stacks fed by location changes.
//! - [`compute_placement`] and [`Popover`]: keep a popover on screen and
//!   sequence its grow/fade animation.
//! - [`LoadProgress`]: the progress bar's grow/fill/collapse sequence.
//! - [`BrowserOverlay`]: everything above, composed.
//!
//! Time is always passed in as an [`Instant`](std::time::Instant), so
//! animation sequencing is deterministic in tests.
//!
//! # Features
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `log`      | yes     | Log through the `log` crate |
//! | `tracing`  | no      | Log through the `tracing` crate (exclusive with `log`) |
//! | `menu`     | yes     | Overflow menu popover |
//! | `progress` | yes     | Loading progress bar |

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
pub mod logging;

pub mod animation;
pub mod error;
pub mod geometry;
pub mod history;
pub mod listener;
#[cfg(feature = "menu")]
pub mod menu;
pub mod overlay;
pub mod popover;
#[cfg(feature = "progress")]
pub mod progress;
pub mod widgets;

pub use animation::{AnimatedValue, AnimationHandle, Easing, PresentationAnimation, Tween};
pub use error::{OverlayError, OverlayResult};
pub use geometry::{LayoutDirection, Point, Rect, Size};
pub use history::{
    ForwardPolicy, HistoryChange, HistoryCommand, HistoryDirection, NavigationHistory,
};
pub use listener::{listener_fn, FnListener, HistoryListener};
#[cfg(feature = "menu")]
pub use menu::{
    ExtraMenuItem, MenuAction, MenuItem, MenuItemHandler, MenuItemKind, MenuSelection,
    OverflowMenu,
};
pub use overlay::{
    BrowserOverlay, HeaderModel, HeaderTheme, OverlayCallback, OverlayCallbacks, OverlayConfig,
    ScheduledReset,
};
pub use popover::{
    compute_placement, Placement, Popover, PopoverCommand, PopoverConfig, PopoverFrame,
    ScheduledAnimation, Visibility, DEFAULT_ANIMATION_DURATION, SCREEN_MARGIN,
};
#[cfg(feature = "progress")]
pub use progress::{
    LoadProgress, ProgressBarStyle, ProgressConfig, ProgressFrame, ScheduledStep,
    RESTART_THRESHOLD,
};
pub use widgets::BrowserOverlayView;
