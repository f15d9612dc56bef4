//! The browser overlay as a whole.
//!
//! [`BrowserOverlay`] composes the pieces a modal in-app browser needs
//! around an externally rendered web view:
//!
//! - a [`NavigationHistory`] fed by the web view's location changes,
//! - the page title shown in the header,
//! - a [`LoadProgress`] bar (feature `progress`),
//! - the [`OverflowMenu`] popover (feature `menu`).
//!
//! It is plain state. The GPUI view in [`widgets`](crate::widgets) renders it
//! and feeds it input and timer completions.
//!
//! # Closing
//!
//! Closing the overlay tells the host right away, but the history is reset
//! only after [`OverlayConfig::close_reset_delay`] so the dismissal animation
//! still shows the last page. The delayed reset is identified by an
//! [`AnimationHandle`]; reopening before it fires cancels it.

use crate::animation::{AnimationHandle, HandleSequence, PresentationAnimation};
use crate::error::{OverlayError, OverlayResult};
use crate::geometry::Size;
use crate::history::{ForwardPolicy, HistoryChange, HistoryDirection, NavigationHistory};
use crate::listener::listener_fn;
#[cfg(feature = "menu")]
use crate::menu::{ExtraMenuItem, OverflowMenu};
use crate::popover::PopoverConfig;
#[cfg(feature = "menu")]
use crate::popover::ScheduledAnimation;
#[cfg(feature = "progress")]
use crate::progress::{LoadProgress, ProgressConfig, ScheduledStep};
use crate::{debug_log, info_log, trace_log, warn_log};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Colour scheme of the header content (icons and title).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderTheme {
    /// Dark content on a light header
    #[default]
    Dark,
    /// Light content on a dark header
    Light,
}

/// Overlay configuration.
#[derive(Clone)]
pub struct OverlayConfig {
    pub url: String,
    /// Window background as `0xRRGGBB`
    pub background_color: u32,
    pub header_theme: HeaderTheme,
    pub header_background: u32,
    pub loading_text: String,
    pub copy_link_title: String,
    pub open_browser_title: String,
    pub presentation: PresentationAnimation,
    pub navigation_visible: bool,
    pub forward_policy: ForwardPolicy,
    pub close_reset_delay: Duration,
    pub popover: PopoverConfig,
    #[cfg(feature = "progress")]
    pub progress: ProgressConfig,
    #[cfg(feature = "menu")]
    pub extra_menu_items: Vec<ExtraMenuItem>,
}

impl OverlayConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            background_color: 0xffffff,
            header_theme: HeaderTheme::Dark,
            header_background: 0xffffff,
            loading_text: "Loading...".to_string(),
            copy_link_title: "Copy Link".to_string(),
            open_browser_title: "Open on Browser".to_string(),
            presentation: PresentationAnimation::Slide,
            navigation_visible: true,
            forward_policy: ForwardPolicy::Retain,
            close_reset_delay: Duration::from_millis(200),
            popover: PopoverConfig::default(),
            #[cfg(feature = "progress")]
            progress: ProgressConfig::default(),
            #[cfg(feature = "menu")]
            extra_menu_items: Vec::new(),
        }
    }

    pub fn background_color(mut self, color: u32) -> Self {
        self.background_color = color;
        self
    }

    pub fn header_theme(mut self, theme: HeaderTheme) -> Self {
        self.header_theme = theme;
        self
    }

    pub fn header_background(mut self, color: u32) -> Self {
        self.header_background = color;
        self
    }

    pub fn loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = text.into();
        self
    }

    pub fn copy_link_title(mut self, title: impl Into<String>) -> Self {
        self.copy_link_title = title.into();
        self
    }

    pub fn open_browser_title(mut self, title: impl Into<String>) -> Self {
        self.open_browser_title = title.into();
        self
    }

    pub fn presentation(mut self, presentation: PresentationAnimation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn navigation_visible(mut self, visible: bool) -> Self {
        self.navigation_visible = visible;
        self
    }

    pub fn forward_policy(mut self, policy: ForwardPolicy) -> Self {
        self.forward_policy = policy;
        self
    }

    pub fn close_reset_delay(mut self, delay: Duration) -> Self {
        self.close_reset_delay = delay;
        self
    }

    pub fn popover(mut self, popover: PopoverConfig) -> Self {
        self.popover = popover;
        self
    }

    #[cfg(feature = "progress")]
    pub fn progress(mut self, progress: ProgressConfig) -> Self {
        self.progress = progress;
        self
    }

    #[cfg(feature = "menu")]
    pub fn extra_menu_item(mut self, item: ExtraMenuItem) -> Self {
        self.extra_menu_items.push(item);
        self
    }

    /// Check every nested configuration.
    pub fn validate(&self) -> OverlayResult<()> {
        if self.url.trim().is_empty() {
            return Err(OverlayError::EmptyUrl);
        }
        self.popover.validate()?;
        #[cfg(feature = "progress")]
        self.progress.validate()?;
        #[cfg(feature = "menu")]
        OverflowMenu::validate_extras(&self.extra_menu_items)?;
        Ok(())
    }
}

impl fmt::Debug for OverlayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayConfig")
            .field("url", &self.url)
            .field("header_theme", &self.header_theme)
            .field("presentation", &self.presentation)
            .field("navigation_visible", &self.navigation_visible)
            .field("forward_policy", &self.forward_policy)
            .finish_non_exhaustive()
    }
}

/// Callback type used for overlay notifications.
pub type OverlayCallback = Rc<dyn Fn()>;

/// Host notifications.
#[derive(Clone, Default)]
pub struct OverlayCallbacks {
    pub on_close: Option<OverlayCallback>,
    /// Back pressed
    pub on_go_back: Option<OverlayCallback>,
    /// Forward pressed, or the content navigated somewhere new
    pub on_go_forward: Option<OverlayCallback>,
}

impl OverlayCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_close(mut self, f: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(f));
        self
    }

    pub fn on_go_back(mut self, f: impl Fn() + 'static) -> Self {
        self.on_go_back = Some(Rc::new(f));
        self
    }

    pub fn on_go_forward(mut self, f: impl Fn() + 'static) -> Self {
        self.on_go_forward = Some(Rc::new(f));
        self
    }
}

/// Everything the header row displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderModel {
    pub title: String,
    /// Current URL, shown under the title
    pub subtitle: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub navigation_visible: bool,
    pub theme: HeaderTheme,
}

/// Delayed history reset queued by [`BrowserOverlay::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReset {
    pub handle: AnimationHandle,
    pub delay: Duration,
    /// Exit animation of a menu that was up when the overlay closed. Report
    /// it through [`Popover::animation_finished`](crate::Popover::animation_finished).
    #[cfg(feature = "menu")]
    pub menu_exit: Option<ScheduledAnimation>,
}

/// In-app browser overlay state.
pub struct BrowserOverlay {
    config: OverlayConfig,
    history: NavigationHistory,
    title: String,
    open: bool,
    on_close: Option<OverlayCallback>,
    resets: HandleSequence,
    #[cfg(feature = "progress")]
    progress: LoadProgress,
    #[cfg(feature = "menu")]
    menu: OverflowMenu,
}

impl BrowserOverlay {
    /// Build an overlay; fails if `config` does not validate.
    pub fn new(
        config: OverlayConfig,
        callbacks: OverlayCallbacks,
        viewport: Size,
    ) -> OverlayResult<Self> {
        if let Err(err) = config.validate() {
            warn_log!("Rejected overlay config: {}", err);
            return Err(err);
        }

        let mut history =
            NavigationHistory::new(config.url.clone()).with_policy(config.forward_policy);
        let OverlayCallbacks {
            on_close,
            on_go_back,
            on_go_forward,
        } = callbacks;
        history.add_listener(listener_fn(move |change: &HistoryChange| {
            let callback = match change.direction {
                HistoryDirection::Back => &on_go_back,
                HistoryDirection::Forward | HistoryDirection::Navigate => &on_go_forward,
            };
            if let Some(callback) = callback {
                callback();
            }
        }));

        #[cfg(not(feature = "menu"))]
        let _ = viewport;

        Ok(Self {
            title: config.loading_text.clone(),
            history,
            open: false,
            on_close,
            resets: HandleSequence::default(),
            #[cfg(feature = "progress")]
            progress: LoadProgress::new(config.progress.clone()),
            #[cfg(feature = "menu")]
            menu: OverflowMenu::new(
                config.url.clone(),
                config.open_browser_title.clone(),
                config.copy_link_title.clone(),
                config.extra_menu_items.clone(),
                config.popover.clone(),
                viewport,
            ),
            config,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn current_url(&self) -> &str {
        self.history.current()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    #[cfg(feature = "progress")]
    pub fn progress(&self) -> &LoadProgress {
        &self.progress
    }

    #[cfg(feature = "progress")]
    pub fn progress_mut(&mut self) -> &mut LoadProgress {
        &mut self.progress
    }

    #[cfg(feature = "menu")]
    pub fn menu(&self) -> &OverflowMenu {
        &self.menu
    }

    #[cfg(feature = "menu")]
    pub fn menu_mut(&mut self) -> &mut OverflowMenu {
        &mut self.menu
    }

    pub fn header(&self) -> HeaderModel {
        HeaderModel {
            title: self.title.clone(),
            subtitle: self.history.current().to_string(),
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
            navigation_visible: self.config.navigation_visible,
            theme: self.config.header_theme,
        }
    }

    // ========================================================================
    // Open / close
    // ========================================================================

    /// Present the overlay, cancelling a reset still pending from the last close.
    pub fn open(&mut self) {
        if self.resets.current().is_some() {
            debug_log!("Reopen cancels pending history reset");
            self.resets.cancel();
        }
        self.open = true;
        info_log!("Browser overlay opened at '{}'", self.history.current());
    }

    /// Dismiss the overlay. Returns the delayed reset to run, or `None` if
    /// the overlay was not open.
    pub fn close(&mut self, now: Instant) -> Option<ScheduledReset> {
        if !self.open {
            trace_log!("close ignored: overlay not open");
            return None;
        }
        self.open = false;
        #[cfg(feature = "menu")]
        let menu_exit = self.menu.close(now);
        #[cfg(not(feature = "menu"))]
        let _ = now;

        info_log!("Browser overlay closed");
        if let Some(on_close) = &self.on_close {
            on_close();
        }
        Some(ScheduledReset {
            handle: self.resets.issue(),
            delay: self.config.close_reset_delay,
            #[cfg(feature = "menu")]
            menu_exit,
        })
    }

    /// Run the delayed reset queued by [`close`](Self::close). Stale handles
    /// (superseded by a reopen) are ignored.
    pub fn flush_close(&mut self, handle: AnimationHandle) -> bool {
        if !self.resets.take_if_current(handle) {
            trace_log!("Ignoring stale close reset {:?}", handle);
            return false;
        }
        let initial = self.config.url.clone();
        self.history.reset(initial.clone());
        self.title = self.config.loading_text.clone();
        #[cfg(feature = "menu")]
        self.menu.set_url(initial);
        debug_log!("Overlay state reset after close");
        true
    }

    // ========================================================================
    // Content events
    // ========================================================================

    /// The web view's location changed.
    pub fn record_navigation(&mut self, url: impl Into<String>) -> Option<HistoryChange> {
        let change = self.history.record_navigation(url)?;
        self.sync_url();
        Some(change)
    }

    pub fn go_back(&mut self) -> Option<HistoryChange> {
        let change = self.history.go_back()?;
        self.sync_url();
        Some(change)
    }

    pub fn go_forward(&mut self) -> Option<HistoryChange> {
        let change = self.history.go_forward()?;
        self.sync_url();
        Some(change)
    }

    /// The page reported its document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The web view reported load progress.
    #[cfg(feature = "progress")]
    pub fn load_progress(&mut self, value: f32, now: Instant) -> OverlayResult<Option<ScheduledStep>> {
        self.progress.update(value, now)
    }

    fn sync_url(&mut self) {
        #[cfg(feature = "menu")]
        self.menu.set_url(self.history.current().to_string());
    }
}

impl fmt::Debug for BrowserOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserOverlay")
            .field("open", &self.open)
            .field("title", &self.title)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const VIEWPORT: Size = Size::new(390.0, 844.0);

    fn overlay(callbacks: OverlayCallbacks) -> BrowserOverlay {
        BrowserOverlay::new(OverlayConfig::new("https://start.example"), callbacks, VIEWPORT)
            .unwrap()
    }

    #[test]
    fn test_rejects_empty_url() {
        let result = BrowserOverlay::new(
            OverlayConfig::new("  "),
            OverlayCallbacks::new(),
            VIEWPORT,
        );
        assert_eq!(result.err(), Some(OverlayError::EmptyUrl));
    }

    #[test]
    fn test_header_tracks_history() {
        let mut overlay = overlay(OverlayCallbacks::new());
        assert_eq!(overlay.header().title, "Loading...");
        assert!(!overlay.header().can_go_back);

        overlay.record_navigation("https://start.example/a");
        overlay.set_title("Page A");
        let header = overlay.header();
        assert_eq!(header.title, "Page A");
        assert_eq!(header.subtitle, "https://start.example/a");
        assert!(header.can_go_back);
        assert!(!header.can_go_forward);

        overlay.go_back();
        assert!(overlay.header().can_go_forward);
        assert_eq!(overlay.current_url(), "https://start.example");
    }

    #[test]
    fn test_callbacks_follow_direction() {
        let backs = Rc::new(Cell::new(0));
        let forwards = Rc::new(Cell::new(0));
        let (b, f) = (backs.clone(), forwards.clone());
        let mut overlay = overlay(
            OverlayCallbacks::new()
                .on_go_back(move || b.set(b.get() + 1))
                .on_go_forward(move || f.set(f.get() + 1)),
        );

        overlay.record_navigation("https://start.example/a");
        overlay.go_back();
        overlay.go_forward();
        overlay.go_forward(); // nothing ahead

        assert_eq!(backs.get(), 1);
        assert_eq!(forwards.get(), 2);
    }

    #[test]
    fn test_close_resets_after_delay() {
        let closes = Rc::new(Cell::new(0));
        let c = closes.clone();
        let mut overlay = overlay(OverlayCallbacks::new().on_close(move || c.set(c.get() + 1)));
        let now = Instant::now();

        assert!(overlay.close(now).is_none());
        overlay.open();
        overlay.record_navigation("https://start.example/a");
        overlay.set_title("A");

        let reset = overlay.close(now).unwrap();
        assert_eq!(closes.get(), 1);
        assert_eq!(reset.delay, Duration::from_millis(200));
        // Last page stays visible until the reset runs
        assert_eq!(overlay.current_url(), "https://start.example/a");

        assert!(overlay.flush_close(reset.handle));
        assert_eq!(overlay.current_url(), "https://start.example");
        assert_eq!(overlay.title(), "Loading...");
        assert!(!overlay.history().can_go_back());
    }

    #[test]
    fn test_reopen_cancels_pending_reset() {
        let mut overlay = overlay(OverlayCallbacks::new());
        overlay.open();
        overlay.record_navigation("https://start.example/a");
        let reset = overlay.close(Instant::now()).unwrap();

        overlay.open();
        assert!(!overlay.flush_close(reset.handle));
        assert_eq!(overlay.current_url(), "https://start.example/a");
    }

    #[cfg(feature = "menu")]
    #[test]
    fn test_menu_follows_current_url() {
        let mut overlay = overlay(OverlayCallbacks::new());
        overlay.record_navigation("https://start.example/b");
        assert_eq!(overlay.menu().url(), "https://start.example/b");
        overlay.go_back();
        assert_eq!(overlay.menu().url(), "https://start.example");
    }

    #[cfg(feature = "progress")]
    #[test]
    fn test_load_progress_validation() {
        let mut overlay = overlay(OverlayCallbacks::new());
        assert!(overlay.load_progress(0.4, Instant::now()).is_ok());
        assert!(overlay.load_progress(2.0, Instant::now()).is_err());
    }
}
