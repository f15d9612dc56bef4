//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use gpui_browser_overlay::*;
use std::time::{Duration, Instant};

pub const VIEWPORT: Size = Size::new(320.0, 640.0);

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// History with `pages` recorded after `start`, in order.
pub fn history_with(start: &str, pages: &[&str]) -> NavigationHistory {
    let mut history = NavigationHistory::new(start);
    for page in pages {
        history.record_navigation(*page);
    }
    history
}

/// Snapshot of every observable part of a history.
pub fn snapshot(history: &NavigationHistory) -> (String, Vec<String>, Vec<String>) {
    (
        history.current().to_string(),
        history.back_stack().to_vec(),
        history.forward_stack().to_vec(),
    )
}

/// Popover shown from `trigger` and measured at `content`, enter animation pending.
pub fn measured_popover(
    trigger: Rect,
    content: Size,
    now: Instant,
) -> (Popover, ScheduledAnimation) {
    let mut popover = Popover::new(PopoverConfig::default(), VIEWPORT);
    assert!(popover.show(trigger));
    let enter = popover
        .content_measured(content, now)
        .expect("first measurement starts the enter animation");
    (popover, enter)
}
