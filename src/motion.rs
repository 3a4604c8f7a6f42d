use std::time::{Duration, Instant};

use crate::style::{LabelEndpoint, LabelPhase};

/// Fixed duration of every label transition.
pub const LABEL_TRANSITION_MS: u64 = 200;

/// Label curve: slow at both ends, clamped to `[0, 1]`.
pub fn ease(delta: f32) -> f32 {
    gpui::ease_in_out(delta.clamp(0.0, 1.0))
}

/// One interpolated property. Re-targeting starts from the value sampled at that
/// instant, so an interrupted transition never snaps back to its old origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedValue {
    from: f32,
    to: f32,
    start: Option<Instant>,
    duration: Duration,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start: None,
            duration: Duration::ZERO,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Returns false when `to` is already the target, leaving any flight untouched.
    pub fn animate_to(&mut self, to: f32, duration: Duration, now: Instant) -> bool {
        if self.to == to {
            return false;
        }
        self.from = self.sample(now);
        self.to = to;
        self.start = Some(now);
        self.duration = duration;
        true
    }

    pub fn progress(&self, now: Instant) -> f32 {
        let Some(start) = self.start else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn sample(&self, now: Instant) -> f32 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease(progress)
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }

    pub fn stop(&mut self, now: Instant) {
        let value = self.sample(now);
        *self = Self::new(value);
    }
}

/// Drives the label's font size and vertical offset between the two endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelAnimator {
    size: AnimatedValue,
    offset: AnimatedValue,
}

impl LabelAnimator {
    pub fn settled(phase: LabelPhase) -> Self {
        let endpoint = phase.endpoint();
        Self {
            size: AnimatedValue::new(endpoint.font_size),
            offset: AnimatedValue::new(endpoint.top),
        }
    }

    /// Both properties start together and share duration and curve.
    pub fn animate_to(&mut self, phase: LabelPhase, now: Instant) -> bool {
        let endpoint = phase.endpoint();
        let duration = Duration::from_millis(LABEL_TRANSITION_MS);
        let size = self.size.animate_to(endpoint.font_size, duration, now);
        let offset = self.offset.animate_to(endpoint.top, duration, now);
        size || offset
    }

    pub fn target(&self) -> LabelEndpoint {
        LabelEndpoint {
            font_size: self.size.target(),
            top: self.offset.target(),
        }
    }

    pub fn sample(&self, now: Instant) -> LabelEndpoint {
        LabelEndpoint {
            font_size: self.size.sample(now),
            top: self.offset.sample(now),
        }
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.size.is_running(now) || self.offset.is_running(now)
    }

    pub fn stop(&mut self, now: Instant) {
        self.size.stop(now);
        self.offset.stop(now);
    }
}
