//! Swipe-to-reveal gesture
//!
//! Per-row state machine for dragging a row sideways to expose a fixed-width
//! action. Dragging only moves the row; the exposed action does the work.

pub mod config;
pub mod settle;
pub mod swipe;

pub use config::{
    SwipeConfig, SwipeConfigError, DEFAULT_POSITIONAL_THRESHOLD, DEFAULT_SETTLE_DURATION,
    DEFAULT_VELOCITY_THRESHOLD,
};
pub use settle::SettleAnimation;
pub use swipe::{settle_target, DragAnchor, SwipeRevealController, SwipeState};
