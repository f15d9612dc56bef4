//! Loading progress indicator.
//!
//! The web engine reports load progress as a fraction. [`LoadProgress`]
//! turns those reports into an animated bar:
//!
//! 1. A report at or below [`RESTART_THRESHOLD`] is the start of a new load:
//!    the bar grows back to full height.
//! 2. Every report animates the fill toward the reported value.
//! 3. A report of `1.0` schedules the bar to collapse once the fill
//!    animation is done, and the fill to reset to zero after that.
//!
//! Steps 3's delayed work is identified by [`AnimationHandle`]s. A new load
//! starting before the delayed steps run cancels them.
//!
//! The `Background` style tints the whole header instead of drawing a thin
//! bar, so it never changes height and only resets its fill.

use crate::animation::{AnimatedValue, AnimationHandle, Easing, HandleSequence};
use crate::error::{ensure_non_negative, ensure_positive_duration, OverlayError, OverlayResult};
use crate::{debug_log, trace_log};
use std::time::{Duration, Instant};

/// Reports at or below this value restart the bar.
pub const RESTART_THRESHOLD: f32 = 0.12;

const GROW_DURATION: Duration = Duration::from_millis(50);
const COLLAPSE_DURATION: Duration = Duration::from_millis(100);
const RESET_DELAY: Duration = Duration::from_millis(120);

/// How progress is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressBarStyle {
    /// Thin bar below the header
    #[default]
    Normal,
    /// Translucent fill behind the header content
    Background,
}

/// Progress indicator configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressConfig {
    pub height: f32,
    /// Bar colour as `0xRRGGBB`
    pub color: u32,
    pub style: ProgressBarStyle,
    /// Duration of each fill animation step
    pub step_duration: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            height: 4.0,
            color: 0x2196f3,
            style: ProgressBarStyle::Normal,
            step_duration: Duration::from_millis(100),
        }
    }
}

impl ProgressConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn style(mut self, style: ProgressBarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn step_duration(mut self, duration: Duration) -> Self {
        self.step_duration = duration;
        self
    }

    pub fn validate(&self) -> OverlayResult<()> {
        ensure_non_negative("progress_height", self.height)?;
        ensure_positive_duration("progress_step_duration", self.step_duration)
    }
}

/// Delayed work queued after a load completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingStep {
    Collapse,
    ResetFill,
}

/// Delayed step the host must report back via [`LoadProgress::step_elapsed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    pub handle: AnimationHandle,
    pub delay: Duration,
}

/// Renderable progress state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressFrame {
    /// Filled fraction, `0..=1`
    pub fill: f32,
    pub height: f32,
}

/// Progress bar state machine.
#[derive(Debug, Clone)]
pub struct LoadProgress {
    config: ProgressConfig,
    fill: AnimatedValue,
    height: AnimatedValue,
    steps: HandleSequence,
    pending: Option<(PendingStep, Instant)>,
}

impl LoadProgress {
    pub fn new(config: ProgressConfig) -> Self {
        let height = AnimatedValue::new(config.height);
        Self {
            config,
            fill: AnimatedValue::default(),
            height,
            steps: HandleSequence::default(),
            pending: None,
        }
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Apply a progress report from the web engine.
    pub fn update(&mut self, value: f32, now: Instant) -> OverlayResult<Option<ScheduledStep>> {
        if !(0.0..=1.0).contains(&value) {
            return Err(OverlayError::InvalidProgress { value });
        }

        if value <= RESTART_THRESHOLD {
            if self.pending.take().is_some() {
                trace_log!("New load cancels pending progress reset");
            }
            self.steps.cancel();
            if self.config.style == ProgressBarStyle::Normal {
                self.height
                    .animate_to(self.config.height, now, GROW_DURATION, Easing::Linear);
            }
        }

        let step = self.config.step_duration;
        self.fill.animate_to(value, now, step, Easing::Linear);
        trace_log!("Progress -> {}", value);

        if value < 1.0 {
            return Ok(None);
        }

        let next = match self.config.style {
            ProgressBarStyle::Normal => PendingStep::Collapse,
            ProgressBarStyle::Background => PendingStep::ResetFill,
        };
        debug_log!("Load complete, scheduling {:?}", next);
        Ok(Some(self.schedule(next, step, now)))
    }

    /// Run the delayed step identified by `handle`. Returns the follow-up
    /// step, if any. Stale handles are ignored.
    pub fn step_elapsed(&mut self, handle: AnimationHandle, now: Instant) -> Option<ScheduledStep> {
        if !self.steps.take_if_current(handle) {
            trace_log!("Ignoring stale progress step {:?}", handle);
            return None;
        }
        let (step, _) = self.pending.take()?;
        match step {
            PendingStep::Collapse => {
                self.height
                    .animate_to(0.0, now, COLLAPSE_DURATION, Easing::Linear);
                Some(self.schedule(PendingStep::ResetFill, RESET_DELAY, now))
            }
            PendingStep::ResetFill => {
                self.fill.set(0.0);
                None
            }
        }
    }

    /// Run any delayed step that is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = matches!(self.pending, Some((_, at)) if at <= now);
        match self.steps.current() {
            Some(handle) if due => {
                self.step_elapsed(handle, now);
                true
            }
            _ => false,
        }
    }

    /// Whether anything is still moving or queued at `now`.
    pub fn is_active(&self, now: Instant) -> bool {
        self.pending.is_some() || self.fill.is_animating(now) || self.height.is_animating(now)
    }

    pub fn frame(&self, now: Instant) -> ProgressFrame {
        ProgressFrame {
            fill: self.fill.value_at(now).clamp(0.0, 1.0),
            height: self.height.value_at(now).max(0.0),
        }
    }

    fn schedule(&mut self, step: PendingStep, delay: Duration, now: Instant) -> ScheduledStep {
        self.pending = Some((step, now + delay));
        ScheduledStep {
            handle: self.steps.issue(),
            delay,
        }
    }
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self::new(ProgressConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fill_animates_toward_report() {
        let mut progress = LoadProgress::default();
        let t0 = Instant::now();
        assert_eq!(progress.update(0.5, t0), Ok(None));
        assert!(progress.frame(t0 + ms(50)).fill > 0.0);
        assert_eq!(progress.frame(t0 + ms(100)).fill, 0.5);
        assert_eq!(progress.frame(t0).height, 4.0);
    }

    #[test]
    fn test_completion_collapses_then_resets() {
        let mut progress = LoadProgress::default();
        let t0 = Instant::now();
        progress.update(0.1, t0).unwrap();
        let collapse = progress.update(1.0, t0 + ms(10)).unwrap().unwrap();
        assert_eq!(collapse.delay, ms(100));

        let t1 = t0 + ms(110);
        let reset = progress.step_elapsed(collapse.handle, t1).unwrap();
        assert_eq!(reset.delay, ms(120));
        assert_eq!(progress.frame(t1 + ms(100)).height, 0.0);
        assert_eq!(progress.frame(t1 + ms(100)).fill, 1.0);

        assert!(progress.step_elapsed(reset.handle, t1 + ms(120)).is_none());
        assert_eq!(progress.frame(t1 + ms(120)).fill, 0.0);
        assert!(!progress.is_active(t1 + ms(200)));
    }

    #[test]
    fn test_new_load_cancels_pending_reset() {
        let mut progress = LoadProgress::default();
        let t0 = Instant::now();
        let collapse = progress.update(1.0, t0).unwrap().unwrap();
        progress.update(0.05, t0 + ms(20)).unwrap();

        assert!(progress.step_elapsed(collapse.handle, t0 + ms(100)).is_none());
        assert_eq!(progress.frame(t0 + ms(200)).height, 4.0);
    }

    #[test]
    fn test_background_style_only_resets_fill() {
        let mut progress =
            LoadProgress::new(ProgressConfig::new().style(ProgressBarStyle::Background));
        let t0 = Instant::now();
        let reset = progress.update(1.0, t0).unwrap().unwrap();
        assert!(progress.step_elapsed(reset.handle, t0 + ms(100)).is_none());
        assert_eq!(progress.frame(t0 + ms(100)).fill, 0.0);
        assert_eq!(progress.frame(t0 + ms(100)).height, 4.0);
    }

    #[test]
    fn test_poll_runs_due_steps() {
        let mut progress = LoadProgress::default();
        let t0 = Instant::now();
        progress.update(1.0, t0).unwrap();
        assert!(!progress.poll(t0 + ms(50)));
        assert!(progress.poll(t0 + ms(100)));
        assert!(!progress.poll(t0 + ms(150)));
        assert!(progress.poll(t0 + ms(220)));
        assert_eq!(progress.frame(t0 + ms(220)).fill, 0.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut progress = LoadProgress::default();
        assert_eq!(
            progress.update(1.5, Instant::now()),
            Err(OverlayError::InvalidProgress { value: 1.5 })
        );
        assert_eq!(
            progress.update(-0.1, Instant::now()),
            Err(OverlayError::InvalidProgress { value: -0.1 })
        );
    }
}
