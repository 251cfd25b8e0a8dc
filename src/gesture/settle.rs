//! Settle animation
//!
//! Ease-out tween from the release offset to an anchor offset. Only the
//! rendered offset depends on it; the target anchor is fixed at release.

use std::time::Duration;

/// A running tween between two offsets
#[derive(Debug, Clone, PartialEq)]
pub struct SettleAnimation {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
}

impl SettleAnimation {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance by `dt`; returns true once the animation has reached its end
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Fraction of the duration elapsed, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Offset at the current point of the animation
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(self.progress())
    }

    pub fn target_offset(&self) -> f32 {
        self.to
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
