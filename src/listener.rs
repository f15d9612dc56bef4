//! History listeners.
//!
//! A listener is told about every change the
//! [`NavigationHistory`](crate::history::NavigationHistory) actually makes.
//! Ignored commands (a back press with nothing to go back to, a duplicate
//! navigation) never reach it. Hosts use this for analytics and for their
//! own "went back" / "went forward" callbacks.
//!
//! All methods are **synchronous**; GPUI runs UI state on a single thread.
//!
//! # Creating listeners
//!
//! | Approach | When to use |
//! |----------|-------------|
//! | Implement [`HistoryListener`] | Named listener with state of its own |
//! | [`listener_fn`] | Quick one-off from a closure |
//!
//! # Example
//!
//! ```
//! use gpui_browser_overlay::{listener_fn, HistoryDirection, NavigationHistory};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let backs = Rc::new(Cell::new(0));
//! let counter = backs.clone();
//!
//! let mut history = NavigationHistory::new("https://a.example");
//! history.add_listener(listener_fn(move |change| {
//!     if change.direction == HistoryDirection::Back {
//!         counter.set(counter.get() + 1);
//!     }
//! }));
//!
//! history.record_navigation("https://b.example");
//! history.go_back();
//! assert_eq!(backs.get(), 1);
//! ```

use crate::history::HistoryChange;

// ============================================================================
// HistoryListener trait
// ============================================================================

/// Receives every effective history change.
pub trait HistoryListener: 'static {
    /// Called after the history has been updated.
    fn on_change(&self, change: &HistoryChange);

    /// Listener name for debugging.
    fn name(&self) -> &'static str {
        "HistoryListener"
    }
}

// ============================================================================
// listener_fn helper
// ============================================================================

/// Create a listener from a closure.
pub const fn listener_fn<F>(f: F) -> FnListener<F>
where
    F: Fn(&HistoryChange) + 'static,
{
    FnListener { f }
}

/// Listener created from a closure via [`listener_fn`].
pub struct FnListener<F> {
    f: F,
}

impl<F> HistoryListener for FnListener<F>
where
    F: Fn(&HistoryChange) + 'static,
{
    fn on_change(&self, change: &HistoryChange) {
        (self.f)(change);
    }

    fn name(&self) -> &'static str {
        "FnListener"
    }
}
