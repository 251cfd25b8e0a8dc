//! Swipe tuning
//!
//! Offsets and velocities share one unit (density-independent pixels in the
//! host UI). Velocity is measured per second.

use std::time::Duration;

use thiserror::Error;

/// Fraction of the distance to the other anchor that commits a slow drag
pub const DEFAULT_POSITIONAL_THRESHOLD: f32 = 0.5;

/// Release speed that commits a fling regardless of position
pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 100.0;

pub const DEFAULT_SETTLE_DURATION: Duration = Duration::from_millis(300);

/// Rejected swipe configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwipeConfigError {
    #[error("Action width must be a positive number, got {0}")]
    InvalidActionWidth(f32),

    #[error("Positional threshold must be in (0, 1], got {0}")]
    InvalidPositionalThreshold(f32),

    #[error("Velocity threshold must be a positive number, got {0}")]
    InvalidVelocityThreshold(f32),
}

/// Geometry and thresholds for one swipeable row
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeConfig {
    pub action_width: f32,
    pub positional_threshold: f32,
    pub velocity_threshold: f32,
    pub settle_duration: Duration,
}

impl SwipeConfig {
    /// Config with default thresholds for an action of the given width
    pub fn new(action_width: f32) -> Self {
        Self {
            action_width,
            positional_threshold: DEFAULT_POSITIONAL_THRESHOLD,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            settle_duration: DEFAULT_SETTLE_DURATION,
        }
    }

    pub fn with_positional_threshold(mut self, fraction: f32) -> Self {
        self.positional_threshold = fraction;
        self
    }

    pub fn with_velocity_threshold(mut self, velocity: f32) -> Self {
        self.velocity_threshold = velocity;
        self
    }

    pub fn with_settle_duration(mut self, duration: Duration) -> Self {
        self.settle_duration = duration;
        self
    }

    pub fn validate(&self) -> Result<(), SwipeConfigError> {
        if !(self.action_width.is_finite() && self.action_width > 0.0) {
            return Err(SwipeConfigError::InvalidActionWidth(self.action_width));
        }
        if !(self.positional_threshold > 0.0 && self.positional_threshold <= 1.0) {
            return Err(SwipeConfigError::InvalidPositionalThreshold(self.positional_threshold));
        }
        if !(self.velocity_threshold.is_finite() && self.velocity_threshold > 0.0) {
            return Err(SwipeConfigError::InvalidVelocityThreshold(self.velocity_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SwipeConfig::new(80.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.positional_threshold, DEFAULT_POSITIONAL_THRESHOLD);
        assert_eq!(config.settle_duration, DEFAULT_SETTLE_DURATION);
    }

    #[test]
    fn test_rejects_bad_action_width() {
        for width in [0.0, -80.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                SwipeConfig::new(width).validate(),
                Err(SwipeConfigError::InvalidActionWidth(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        for fraction in [0.0, -0.1, 1.5, f32::NAN] {
            assert!(matches!(
                SwipeConfig::new(80.0).with_positional_threshold(fraction).validate(),
                Err(SwipeConfigError::InvalidPositionalThreshold(_))
            ));
        }
        assert!(SwipeConfig::new(80.0).with_positional_threshold(1.0).validate().is_ok());

        for velocity in [0.0, -5.0, f32::NAN] {
            assert!(matches!(
                SwipeConfig::new(80.0).with_velocity_threshold(velocity).validate(),
                Err(SwipeConfigError::InvalidVelocityThreshold(_))
            ));
        }
    }
}
