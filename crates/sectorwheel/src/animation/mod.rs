use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::PI;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

pub mod startup;

pub use startup::{StartupAnimationListener, StartupSettle, WheelStartupAnimationStatus};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Interpolator {
    #[strum(serialize = "linear")]
    Linear,
    #[default]
    #[strum(serialize = "accelerate_decelerate", serialize = "ease")]
    AccelerateDecelerate,
}

impl Interpolator {
    pub fn interpolate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

pub trait AnimatorListener {
    fn on_start(&mut self) {}

    fn on_update(&mut self, value: f64);

    fn on_end(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running,
    Ended,
    Cancelled,
}

/// Host-clocked animation of a single `f64`.
///
/// The animator never schedules itself: the owner calls [`ValueAnimator::tick`] once per frame
/// with the time elapsed since the previous frame.
#[derive(Debug, Clone)]
pub struct ValueAnimator {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    interpolator: Interpolator,
    state: AnimatorState,
}

impl ValueAnimator {
    pub fn of_f64(from: f64, to: f64) -> Self {
        Self {
            from,
            to,
            duration: DEFAULT_DURATION,
            elapsed: Duration::ZERO,
            interpolator: Interpolator::default(),
            state: AnimatorState::Idle,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn animated_value(&self) -> f64 {
        match self.fraction() {
            f if f >= 1.0 => self.to,
            f => self.from + (self.to - self.from) * self.interpolator.interpolate(f),
        }
    }

    fn fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.elapsed.as_secs_f64() / self.duration.as_secs_f64()
    }

    /// Starts an idle animator. Calling it again, or after a cancel, does nothing.
    pub fn start(&mut self, listener: &mut impl AnimatorListener) {
        if self.state != AnimatorState::Idle {
            return;
        }
        self.state = AnimatorState::Running;
        listener.on_start();
    }

    /// Advances by `dt` and reports one update; the frame that reaches the duration reports the
    /// exact target value and then ends the animation.
    pub fn tick(&mut self, dt: Duration, listener: &mut impl AnimatorListener) -> AnimatorState {
        if self.state != AnimatorState::Running {
            return self.state;
        }

        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        listener.on_update(self.animated_value());

        if self.fraction() >= 1.0 {
            self.state = AnimatorState::Ended;
            listener.on_end();
        }
        self.state
    }

    /// Skips to the target value: one final update, then the end.
    pub fn end(&mut self, listener: &mut impl AnimatorListener) {
        if self.state != AnimatorState::Running {
            return;
        }
        self.elapsed = self.duration;
        listener.on_update(self.to);
        self.state = AnimatorState::Ended;
        listener.on_end();
    }

    pub fn cancel(&mut self) {
        if matches!(self.state, AnimatorState::Idle | AnimatorState::Running) {
            self.state = AnimatorState::Cancelled;
        }
    }
}
