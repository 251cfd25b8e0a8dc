//! Swipe reveal controller
//!
//! A row rests at one of two anchors: `Center` (offset 0, action hidden) or
//! `Start` (offset `-action_width`, action revealed). Between rests it is
//! either being dragged or settling toward the anchor chosen at release.
//!
//! Positive velocity points toward `Center`, negative toward `Start`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::{SwipeConfig, SwipeConfigError};
use super::settle::SettleAnimation;

/// Rest position of a swipeable row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragAnchor {
    /// Action hidden
    Center,
    /// Action fully revealed
    Start,
}

impl DragAnchor {
    /// Row offset at this anchor
    pub fn offset(&self, action_width: f32) -> f32 {
        match self {
            DragAnchor::Center => 0.0,
            DragAnchor::Start => -action_width,
        }
    }

    pub fn opposite(&self) -> DragAnchor {
        match self {
            DragAnchor::Center => DragAnchor::Start,
            DragAnchor::Start => DragAnchor::Center,
        }
    }
}

/// Where the row is in its gesture lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SwipeState {
    Settled(DragAnchor),
    /// Pointer down; `origin` is the anchor thresholds are measured from
    Dragging { origin: DragAnchor, offset: f32 },
    Settling { target: DragAnchor, animation: SettleAnimation },
}

/// Pick the anchor a released drag settles to
///
/// A release at or beyond the velocity threshold goes in the direction of
/// travel. Otherwise the row moves to the other anchor only if it covered at
/// least the positional fraction of the distance from `origin`.
pub fn settle_target(origin: DragAnchor, offset: f32, velocity: f32, config: &SwipeConfig) -> DragAnchor {
    if velocity >= config.velocity_threshold {
        return DragAnchor::Center;
    }
    if velocity <= -config.velocity_threshold {
        return DragAnchor::Start;
    }

    let travelled = (offset - origin.offset(config.action_width)).abs() / config.action_width;
    if travelled >= config.positional_threshold {
        origin.opposite()
    } else {
        origin
    }
}

/// Drag state machine for one list row
#[derive(Debug, Clone)]
pub struct SwipeRevealController {
    config: SwipeConfig,
    state: SwipeState,
    /// Last anchor reached at rest
    anchor: DragAnchor,
}

impl SwipeRevealController {
    /// Create a controller resting at `Center`
    pub fn new(config: SwipeConfig) -> Result<Self, SwipeConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SwipeState::Settled(DragAnchor::Center),
            anchor: DragAnchor::Center,
        })
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn state(&self) -> &SwipeState {
        &self.state
    }

    /// Live offset for rendering, in `[-action_width, 0]`
    pub fn offset(&self) -> f32 {
        match &self.state {
            SwipeState::Settled(anchor) => anchor.offset(self.config.action_width),
            SwipeState::Dragging { offset, .. } => *offset,
            SwipeState::Settling { animation, .. } => animation.value(),
        }
    }

    /// Last anchor the row came to rest at
    ///
    /// Only authoritative while [`is_settled`](Self::is_settled) holds.
    pub fn current_anchor(&self) -> DragAnchor {
        self.anchor
    }

    /// The rest anchor, or `None` while dragging or settling
    pub fn settled_anchor(&self) -> Option<DragAnchor> {
        match self.state {
            SwipeState::Settled(anchor) => Some(anchor),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.state, SwipeState::Settled(_))
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SwipeState::Dragging { .. })
    }

    /// Whether the delete action is fully exposed and at rest
    pub fn is_revealed(&self) -> bool {
        self.settled_anchor() == Some(DragAnchor::Start)
    }

    /// Pointer down. Interrupts any settle in flight at its current offset.
    pub fn start_drag(&mut self) {
        let (origin, offset) = match &self.state {
            SwipeState::Dragging { .. } => return,
            SwipeState::Settled(anchor) => (*anchor, anchor.offset(self.config.action_width)),
            SwipeState::Settling { animation, .. } => {
                let offset = animation.value();
                (self.nearest_anchor(offset), offset)
            }
        };
        if !matches!(self.state, SwipeState::Settled(_)) {
            tracing::trace!(offset, "settle interrupted by new drag");
        }
        self.state = SwipeState::Dragging { origin, offset };
    }

    /// Pointer moved by `delta`; returns the clamped offset
    pub fn drag_by(&mut self, delta: f32) -> f32 {
        if !self.is_dragging() {
            self.start_drag();
        }
        let min = -self.config.action_width;
        if let SwipeState::Dragging { offset, .. } = &mut self.state {
            *offset = (*offset + delta).clamp(min, 0.0);
        }
        self.offset()
    }

    /// Pointer up with the given velocity; returns the anchor being settled to
    ///
    /// Outside a drag this is a no-op that reports the current destination.
    pub fn release(&mut self, velocity: f32) -> DragAnchor {
        let (origin, offset) = match &self.state {
            SwipeState::Dragging { origin, offset } => (*origin, *offset),
            SwipeState::Settled(anchor) => return *anchor,
            SwipeState::Settling { target, .. } => return *target,
        };

        let target = settle_target(origin, offset, velocity, &self.config);
        self.animate_to(target, offset);
        target
    }

    /// End a drag without a fling; the usual position rule decides the anchor
    pub fn cancel_drag(&mut self) -> DragAnchor {
        self.release(0.0)
    }

    /// Animate back to `Center`, e.g. after the row's action was used
    pub fn hide(&mut self) {
        let offset = self.offset();
        self.animate_to(DragAnchor::Center, offset);
    }

    /// Advance any settle animation; returns the new offset
    pub fn tick(&mut self, dt: Duration) -> f32 {
        if let SwipeState::Settling { target, animation } = &mut self.state {
            if animation.advance(dt) {
                let target = *target;
                self.settle(target);
            }
        }
        self.offset()
    }

    /// Jump to the end of any settle animation
    pub fn finish_settle(&mut self) {
        if let SwipeState::Settling { target, .. } = self.state {
            self.settle(target);
        }
    }

    fn animate_to(&mut self, target: DragAnchor, from: f32) {
        let to = target.offset(self.config.action_width);
        let animation = SettleAnimation::new(from, to, self.config.settle_duration);
        if from == to || animation.is_finished() {
            self.settle(target);
        } else {
            self.state = SwipeState::Settling { target, animation };
        }
    }

    fn settle(&mut self, anchor: DragAnchor) {
        self.state = SwipeState::Settled(anchor);
        self.anchor = anchor;
    }

    fn nearest_anchor(&self, offset: f32) -> DragAnchor {
        if offset <= -self.config.action_width / 2.0 {
            DragAnchor::Start
        } else {
            DragAnchor::Center
        }
    }
}
