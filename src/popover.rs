//! Popover placement and visibility.
//!
//! A popover opens next to the element that triggered it, grows from zero
//! size to its measured content size while fading in, and fades out again on
//! dismissal. Two concerns live here:
//!
//! - [`compute_placement`]: pure geometry, where to anchor the popover and
//!   whether to flip it on either axis so it stays inside the viewport.
//! - [`Popover`]: the show/measure/hide state machine that owns the
//!   animated size and opacity and emits a [`PopoverFrame`] for rendering.
//!
//! # Lifecycle
//!
//! ```text
//!            show(trigger)           content_measured(size)
//!   Hidden ───────────────► Opening ─────────────────────────┐
//!     ▲                        │        (enter animation)    │
//!     │                        │ hide                        ▼
//!     │   exit animation done  ▼          animation_finished
//!     └──────────────────── exiting ◄────────── Shown
//!                                     hide
//! ```
//!
//! Animation completion is reported back by the host with the
//! [`AnimationHandle`] returned when the animation started. A newer
//! animation supersedes older handles, so a late completion from a cancelled
//! cycle is ignored.

use crate::animation::{AnimatedValue, AnimationHandle, Easing, HandleSequence};
use crate::error::{ensure_non_negative, ensure_positive_duration, OverlayResult};
use crate::geometry::{LayoutDirection, Point, Rect, Size};
use crate::{debug_log, error_log, trace_log};
use std::fmt;
use std::time::{Duration, Instant};

/// Default distance kept between the popover and the viewport edges.
pub const SCREEN_MARGIN: f32 = 8.0;

/// Default duration of the enter and exit animations.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

// ============================================================================
// Configuration
// ============================================================================

/// Popover configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PopoverConfig {
    pub animation_duration: Duration,
    pub screen_margin: f32,
    pub easing: Easing,
    pub direction: LayoutDirection,
    /// Height reserved at the top of the viewport (status bar), subtracted
    /// from the viewport height before placement
    pub top_inset: f32,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            animation_duration: DEFAULT_ANIMATION_DURATION,
            screen_margin: SCREEN_MARGIN,
            easing: Easing::STANDARD,
            direction: LayoutDirection::LeftToRight,
            top_inset: 0.0,
        }
    }
}

impl PopoverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn screen_margin(mut self, margin: f32) -> Self {
        self.screen_margin = margin;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn top_inset(mut self, inset: f32) -> Self {
        self.top_inset = inset;
        self
    }

    pub fn validate(&self) -> OverlayResult<()> {
        ensure_positive_duration("animation_duration", self.animation_duration)?;
        ensure_non_negative("screen_margin", self.screen_margin)?;
        ensure_non_negative("top_inset", self.top_inset)
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Where the popover is anchored and on which axes it is flipped.
///
/// Coordinates are physical viewport coordinates in both layout directions.
/// When `flip_x` is set, `anchor.x` is the popover's right edge and the
/// content extends to the left of it; when `flip_y` is set, `anchor.y` is
/// its bottom edge and the content extends upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub anchor: Point,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Compute the anchor and flips for a popover of `content` size opened from
/// `trigger` inside `viewport`, keeping `margin` pixels from the edges.
///
/// Horizontal: flip when the preferred side overflows. Right-to-left layouts
/// prefer opening leftward, so they flip whenever the content fits to the
/// left of the trigger's right edge. Vertical: flip when the content would
/// cross the bottom margin.
pub fn compute_placement(
    trigger: Rect,
    content: Size,
    viewport: Size,
    direction: LayoutDirection,
    margin: f32,
) -> Placement {
    let flip_x = match direction {
        LayoutDirection::RightToLeft => trigger.right() - content.width > margin,
        LayoutDirection::LeftToRight => trigger.left() + content.width > viewport.width - margin,
    };
    let x = if flip_x {
        (viewport.width - margin).min(trigger.right())
    } else if trigger.left() < margin {
        margin
    } else {
        trigger.left()
    };

    let flip_y = trigger.top() > viewport.height - content.height - margin;
    let y = if flip_y {
        (viewport.height - margin).min(trigger.bottom())
    } else if trigger.top() < margin {
        margin
    } else {
        trigger.top()
    };

    Placement {
        anchor: Point::new(x, y),
        flip_x,
        flip_y,
    }
}

// ============================================================================
// Visibility, commands, frames
// ============================================================================

/// Popover visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    /// Mounted and growing in; not yet interactive
    Opening,
    /// Fully visible and interactive
    Shown,
}

/// Popover input messages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopoverCommand {
    Show(Rect),
    ContentMeasured(Size),
    ViewportChanged(Size),
    AnimationFinished(AnimationHandle),
    Hide,
    PointerDown(Point),
}

/// An animation the host must report back on via
/// [`Popover::animation_finished`] once `duration` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAnimation {
    pub handle: AnimationHandle,
    pub duration: Duration,
}

/// Renderable popover state at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverFrame {
    pub opacity: f32,
    pub left: f32,
    pub top: f32,
    /// Explicit size while growing in; `None` means natural content size
    pub size: Option<Size>,
    /// Horizontal offset applied on a horizontal flip
    pub translate_x: Option<f32>,
    /// Vertical offset applied on a vertical flip
    pub translate_y: Option<f32>,
}

// ============================================================================
// Popover
// ============================================================================

/// Popover state machine.
pub struct Popover {
    config: PopoverConfig,
    visibility: Visibility,
    exiting: bool,
    trigger: Option<Rect>,
    /// Measured content size for the current cycle
    content: Option<Size>,
    viewport: Size,
    placement: Option<Placement>,
    width: AnimatedValue,
    height: AnimatedValue,
    opacity: AnimatedValue,
    handles: HandleSequence,
    on_hidden: Option<Box<dyn Fn()>>,
}

impl Popover {
    pub fn new(config: PopoverConfig, viewport: Size) -> Self {
        Self {
            config,
            visibility: Visibility::Hidden,
            exiting: false,
            trigger: None,
            content: None,
            viewport,
            placement: None,
            width: AnimatedValue::default(),
            height: AnimatedValue::default(),
            opacity: AnimatedValue::default(),
            handles: HandleSequence::default(),
            on_hidden: None,
        }
    }

    /// Register a callback invoked each time an exit animation completes.
    pub fn on_hidden(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_hidden = Some(Box::new(callback));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the popover is mounted (opening, shown, or fading out).
    pub fn is_visible(&self) -> bool {
        self.visibility != Visibility::Hidden
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn trigger(&self) -> Option<Rect> {
        self.trigger
    }

    pub fn content_size(&self) -> Option<Size> {
        self.content
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn config(&self) -> &PopoverConfig {
        &self.config
    }

    /// Handle of the animation currently awaiting completion.
    pub fn pending_animation(&self) -> Option<AnimationHandle> {
        self.handles.current()
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Apply a [`PopoverCommand`].
    pub fn apply(&mut self, command: PopoverCommand, now: Instant) -> Option<ScheduledAnimation> {
        match command {
            PopoverCommand::Show(trigger) => {
                self.show(trigger);
                None
            }
            PopoverCommand::ContentMeasured(size) => self.content_measured(size, now),
            PopoverCommand::ViewportChanged(size) => {
                self.viewport_changed(size);
                None
            }
            PopoverCommand::AnimationFinished(handle) => {
                self.animation_finished(handle);
                None
            }
            PopoverCommand::Hide => self.hide(now),
            PopoverCommand::PointerDown(p) => self.pointer_down(p, now),
        }
    }

    /// Start a show cycle from `trigger`.
    ///
    /// Ignored while a cycle is already opening or shown. A show during the
    /// exit animation cancels the exit and starts a fresh cycle. Returns
    /// whether a cycle started.
    pub fn show(&mut self, trigger: Rect) -> bool {
        if self.is_visible() && !self.exiting {
            trace_log!("Popover show ignored: already {:?}", self.visibility);
            return false;
        }
        if let Err(err) = trigger.validate() {
            error_log!("Popover show ignored: {}", err);
            return false;
        }

        if self.exiting {
            debug_log!("Popover show cancels pending exit");
        }
        self.handles.cancel();
        self.reset_values();
        self.exiting = false;
        self.trigger = Some(trigger);
        self.visibility = Visibility::Opening;
        debug_log!("Popover Hidden -> Opening from {:?}", trigger);
        true
    }

    /// Record the content size from the first layout pass of this cycle,
    /// place the popover, and start the enter animation.
    pub fn content_measured(&mut self, size: Size, now: Instant) -> Option<ScheduledAnimation> {
        if self.visibility != Visibility::Opening || self.exiting {
            trace_log!("Content measurement ignored in {:?}", self.visibility);
            return None;
        }
        if self.content.is_some() {
            trace_log!("Content already measured this cycle");
            return None;
        }
        if let Err(err) = size.validate() {
            error_log!("Content measurement ignored: {}", err);
            return None;
        }

        self.content = Some(size);
        self.recompute_placement();

        let duration = self.config.animation_duration;
        let easing = self.config.easing;
        self.width.animate_to(size.width, now, duration, easing);
        self.height.animate_to(size.height, now, duration, easing);
        self.opacity.animate_to(1.0, now, duration, easing);

        let handle = self.handles.issue();
        debug_log!(
            "Popover measured {}x{}, enter animation {:?}",
            size.width,
            size.height,
            handle
        );
        Some(ScheduledAnimation { handle, duration })
    }

    /// Report that the animation identified by `handle` has run its course.
    ///
    /// Returns `false` for stale handles.
    pub fn animation_finished(&mut self, handle: AnimationHandle) -> bool {
        if !self.handles.take_if_current(handle) {
            trace_log!("Ignoring stale animation completion {:?}", handle);
            return false;
        }

        if self.exiting {
            self.finish_exit();
        } else if self.visibility == Visibility::Opening {
            if let Some(size) = self.content {
                self.width.set(size.width);
                self.height.set(size.height);
            }
            self.opacity.set(1.0);
            self.visibility = Visibility::Shown;
            debug_log!("Popover Opening -> Shown");
        }
        true
    }

    /// Complete the pending animation if its duration has elapsed at `now`.
    ///
    /// Lets a render loop drive the state machine without a timer.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(handle) = self.handles.current() else {
            return false;
        };
        let running = self.opacity.is_animating(now)
            || self.width.is_animating(now)
            || self.height.is_animating(now);
        !running && self.animation_finished(handle)
    }

    /// Start the exit animation. No-op when hidden or already exiting.
    pub fn hide(&mut self, now: Instant) -> Option<ScheduledAnimation> {
        if !self.is_visible() {
            trace_log!("Popover hide ignored: already hidden");
            return None;
        }
        if self.exiting {
            trace_log!("Popover hide ignored: exit already running");
            return None;
        }

        self.exiting = true;
        self.width.freeze(now);
        self.height.freeze(now);
        let duration = self.config.animation_duration;
        self.opacity
            .animate_to(0.0, now, duration, self.config.easing);

        let handle = self.handles.issue();
        debug_log!("Popover {:?} -> exiting ({:?})", self.visibility, handle);
        Some(ScheduledAnimation { handle, duration })
    }

    /// Update the viewport size; re-places a visible popover without
    /// restarting its animation.
    pub fn viewport_changed(&mut self, viewport: Size) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        if self.is_visible() && self.content.is_some() {
            self.recompute_placement();
            debug_log!(
                "Viewport {}x{}: re-placed popover {:?}",
                viewport.width,
                viewport.height,
                self.placement
            );
        }
    }

    /// Dismiss on a pointer press outside the popover.
    pub fn pointer_down(&mut self, p: Point, now: Instant) -> Option<ScheduledAnimation> {
        if !self.is_visible() || self.exiting {
            return None;
        }
        if self.bounds(now).is_some_and(|b| b.contains(p)) {
            return None;
        }
        trace_log!("Pointer down outside popover at ({}, {})", p.x, p.y);
        self.hide(now)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Renderable state at `now`; `None` while hidden.
    pub fn frame(&self, now: Instant) -> Option<PopoverFrame> {
        if !self.is_visible() {
            return None;
        }
        let trigger = self.trigger?;
        let width = self.width.value_at(now);
        let height = self.height.value_at(now);

        let (anchor, flip_x, flip_y) = match self.placement {
            Some(p) => (p.anchor, p.flip_x, p.flip_y),
            // First layout pass: rendered transparent at the trigger for measuring
            None => (trigger.origin, false, false),
        };

        // Explicit size only while opening; an interrupted enter keeps its frozen size
        let growing = self.visibility == Visibility::Opening;
        Some(PopoverFrame {
            opacity: self.opacity.value_at(now),
            left: anchor.x,
            top: anchor.y,
            size: (growing && self.content.is_some()).then(|| Size::new(width, height)),
            translate_x: flip_x.then_some(-width),
            translate_y: flip_y.then_some(-height),
        })
    }

    /// On-screen rectangle at `now`, once the content has been measured.
    pub fn bounds(&self, now: Instant) -> Option<Rect> {
        let frame = self.frame(now)?;
        let content = self.content?;
        let size = frame.size.unwrap_or(content);
        Some(Rect::new(
            frame.left + frame.translate_x.unwrap_or(0.0),
            frame.top + frame.translate_y.unwrap_or(0.0),
            size.width,
            size.height,
        ))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Effective viewport for placement, minus the top inset.
    fn placement_viewport(&self) -> Size {
        Size::new(
            self.viewport.width,
            (self.viewport.height - self.config.top_inset).max(0.0),
        )
    }

    fn recompute_placement(&mut self) {
        let (Some(trigger), Some(content)) = (self.trigger, self.content) else {
            return;
        };
        self.placement = Some(compute_placement(
            trigger,
            content,
            self.placement_viewport(),
            self.config.direction,
            self.config.screen_margin,
        ));
    }

    fn reset_values(&mut self) {
        self.width.set(0.0);
        self.height.set(0.0);
        self.opacity.set(0.0);
        self.content = None;
        self.placement = None;
    }

    fn finish_exit(&mut self) {
        self.reset_values();
        self.trigger = None;
        self.exiting = false;
        self.visibility = Visibility::Hidden;
        debug_log!("Popover -> Hidden");
        if let Some(callback) = &self.on_hidden {
            callback();
        }
    }
}

impl fmt::Debug for Popover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Popover")
            .field("visibility", &self.visibility)
            .field("exiting", &self.exiting)
            .field("trigger", &self.trigger)
            .field("content", &self.content)
            .field("viewport", &self.viewport)
            .field("placement", &self.placement)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const VIEWPORT: Size = Size::new(320.0, 640.0);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_placement_without_flip() {
        let p = compute_placement(
            Rect::new(100.0, 100.0, 30.0, 30.0),
            Size::new(100.0, 50.0),
            VIEWPORT,
            LayoutDirection::LeftToRight,
            SCREEN_MARGIN,
        );
        assert_eq!(p.anchor, Point::new(100.0, 100.0));
        assert!(!p.flip_x);
        assert!(!p.flip_y);
    }

    #[test]
    fn test_placement_clamps_to_margin() {
        let p = compute_placement(
            Rect::new(2.0, 3.0, 30.0, 30.0),
            Size::new(100.0, 50.0),
            VIEWPORT,
            LayoutDirection::LeftToRight,
            SCREEN_MARGIN,
        );
        assert_eq!(p.anchor, Point::new(8.0, 8.0));
    }

    #[test]
    fn test_horizontal_flip_anchor_is_clamped() {
        // Trigger hangs past the right margin: anchor stops at 320 - 8
        let p = compute_placement(
            Rect::new(300.0, 100.0, 30.0, 30.0),
            Size::new(100.0, 50.0),
            VIEWPORT,
            LayoutDirection::LeftToRight,
            SCREEN_MARGIN,
        );
        assert!(p.flip_x);
        assert_eq!(p.anchor.x, 312.0);
    }

    #[test]
    fn test_rtl_prefers_leftward() {
        let trigger = Rect::new(200.0, 100.0, 30.0, 30.0);
        let p = compute_placement(
            trigger,
            Size::new(100.0, 50.0),
            VIEWPORT,
            LayoutDirection::RightToLeft,
            SCREEN_MARGIN,
        );
        assert!(p.flip_x);
        assert_eq!(p.anchor.x, 230.0);

        // No room on the left: open rightward from the trigger
        let p = compute_placement(
            Rect::new(20.0, 100.0, 30.0, 30.0),
            Size::new(100.0, 50.0),
            VIEWPORT,
            LayoutDirection::RightToLeft,
            SCREEN_MARGIN,
        );
        assert!(!p.flip_x);
        assert_eq!(p.anchor.x, 20.0);
    }

    #[test]
    fn test_full_cycle() {
        let hidden_calls = Rc::new(Cell::new(0));
        let calls = hidden_calls.clone();
        let mut popover = Popover::new(PopoverConfig::default(), VIEWPORT)
            .on_hidden(move || calls.set(calls.get() + 1));
        let t0 = Instant::now();

        assert!(popover.show(Rect::new(280.0, 100.0, 30.0, 30.0)));
        assert_eq!(popover.visibility(), Visibility::Opening);

        // Measurement pass renders transparent at the trigger
        let frame = popover.frame(t0).unwrap();
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.size, None);

        let enter = popover
            .content_measured(Size::new(100.0, 50.0), t0)
            .unwrap();
        assert_eq!(enter.duration, DEFAULT_ANIMATION_DURATION);

        let mid = popover.frame(t0 + ms(150)).unwrap();
        let grown = mid.size.unwrap();
        assert!(grown.width > 0.0 && grown.width < 100.0);
        assert_eq!(mid.translate_x, Some(-grown.width));
        assert_eq!(mid.translate_y, None);

        assert!(popover.animation_finished(enter.handle));
        assert_eq!(popover.visibility(), Visibility::Shown);
        let shown = popover.frame(t0 + ms(300)).unwrap();
        assert_eq!(shown.opacity, 1.0);
        assert_eq!(shown.size, None);
        assert_eq!(shown.translate_x, Some(-100.0));

        let exit = popover.hide(t0 + ms(400)).unwrap();
        assert!(popover.is_exiting());
        assert_eq!(hidden_calls.get(), 0);
        assert!(popover.animation_finished(exit.handle));
        assert_eq!(popover.visibility(), Visibility::Hidden);
        assert_eq!(hidden_calls.get(), 1);
        assert!(popover.frame(t0 + ms(800)).is_none());
    }

    #[test]
    fn test_second_show_while_opening_is_ignored() {
        let mut popover = Popover::new(PopoverConfig::default(), VIEWPORT);
        assert!(popover.show(Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!popover.show(Rect::new(200.0, 200.0, 20.0, 20.0)));
        assert_eq!(popover.trigger(), Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn test_hide_during_enter_cancels_enter_completion() {
        let mut popover = Popover::new(PopoverConfig::default(), VIEWPORT);
        let t0 = Instant::now();
        popover.show(Rect::new(10.0, 10.0, 20.0, 20.0));
        let enter = popover
            .content_measured(Size::new(100.0, 50.0), t0)
            .unwrap();
        let exit = popover.hide(t0 + ms(100)).unwrap();

        // Size stops growing where it was
        let frozen = popover.bounds(t0 + ms(100)).unwrap().size;
        assert!(frozen.width > 0.0 && frozen.width < 100.0);
        assert_eq!(popover.bounds(t0 + ms(250)).unwrap().size, frozen);

        assert!(!popover.animation_finished(enter.handle));
        assert_ne!(popover.visibility(), Visibility::Shown);
        assert!(popover.animation_finished(exit.handle));
        assert_eq!(popover.visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_show_during_exit_starts_fresh_cycle() {
        let mut popover = Popover::new(PopoverConfig::default(), VIEWPORT);
        let t0 = Instant::now();
        popover.show(Rect::new(10.0, 10.0, 20.0, 20.0));
        let enter = popover
            .content_measured(Size::new(100.0, 50.0), t0)
            .unwrap();
        popover.animation_finished(enter.handle);
        let exit = popover.hide(t0 + ms(400)).unwrap();

        assert!(popover.show(Rect::new(40.0, 40.0, 20.0, 20.0)));
        assert!(!popover.animation_finished(exit.handle));
        assert_eq!(popover.visibility(), Visibility::Opening);
        assert_eq!(popover.content_size(), None);
    }

    #[test]
    fn test_viewport_change_replaces_without_restart() {
        let mut popover = Popover::new(PopoverConfig::default(), Size::new(640.0, 320.0));
        let t0 = Instant::now();
        popover.show(Rect::new(280.0, 100.0, 30.0, 30.0));
        let enter = popover
            .content_measured(Size::new(100.0, 50.0), t0)
            .unwrap();
        assert!(!popover.placement().unwrap().flip_x);

        popover.viewport_changed(VIEWPORT);
        assert!(popover.placement().unwrap().flip_x);
        assert_eq!(popover.pending_animation(), Some(enter.handle));
        assert!(popover.animation_finished(enter.handle));
    }

    #[test]
    fn test_pointer_down_inside_and_outside() {
        let mut popover = Popover::new(PopoverConfig::default(), VIEWPORT);
        let t0 = Instant::now();
        popover.show(Rect::new(20.0, 20.0, 30.0, 30.0));
        let enter = popover
            .content_measured(Size::new(100.0, 50.0), t0)
            .unwrap();
        popover.animation_finished(enter.handle);

        assert!(popover.pointer_down(Point::new(60.0, 40.0), t0).is_none());
        assert!(!popover.is_exiting());
        assert!(popover.pointer_down(Point::new(300.0, 600.0), t0).is_some());
        assert!(popover.is_exiting());
    }

    #[test]
    fn test_poll_completes_elapsed_animation() {
        let mut popover = Popover::new(PopoverConfig::default(), VIEWPORT);
        let t0 = Instant::now();
        popover.show(Rect::new(20.0, 20.0, 30.0, 30.0));
        popover.content_measured(Size::new(100.0, 50.0), t0);

        assert!(!popover.poll(t0 + ms(100)));
        assert!(popover.poll(t0 + ms(300)));
        assert_eq!(popover.visibility(), Visibility::Shown);
        assert!(!popover.poll(t0 + ms(400)));
    }

    #[test]
    fn test_top_inset_shrinks_viewport() {
        let config = PopoverConfig::default().top_inset(40.0);
        let mut popover = Popover::new(config, VIEWPORT);
        popover.show(Rect::new(20.0, 560.0, 30.0, 30.0));
        popover.content_measured(Size::new(100.0, 50.0), Instant::now());
        // 560 > (640 - 40) - 50 - 8
        assert!(popover.placement().unwrap().flip_y);
    }

    #[test]
    fn test_invalid_trigger_leaves_hidden() {
        let mut popover = Popover::new(PopoverConfig::default(), VIEWPORT);
        assert!(!popover.show(Rect::new(f32::NAN, 0.0, 10.0, 10.0)));
        assert_eq!(popover.visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_config_validate() {
        assert!(PopoverConfig::new().validate().is_ok());
        assert!(PopoverConfig::new()
            .animation_duration(Duration::ZERO)
            .validate()
            .is_err());
        assert!(PopoverConfig::new().screen_margin(-1.0).validate().is_err());
    }
}
