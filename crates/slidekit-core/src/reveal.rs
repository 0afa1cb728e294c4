//! Scroll-edge affordances: pull to reveal and a collapsing header.
//!
//! Both are driven by the same inputs as the pager (a scroll offset and a
//! drag translation) but resolve to a single scalar instead of a frame.

use slidekit_animation::{AnimationType, Easing, TweenSpec};

use crate::error::{positive_extent, ConfigError};

/// Pull distance at which the hidden control is fully revealed.
pub const DEFAULT_REVEAL_DISTANCE: f32 = 100.0;

/// Upward release velocity (points per frame) that expands any partial pull.
pub const REVEAL_FLICK_VELOCITY: f32 = 1.5;

/// Drag travel ignored before a collapsing header starts to move.
pub const HEADER_DEAD_ZONE: f32 = 50.0;

/// Tracks how far content has been pulled past its leading edge.
#[derive(Debug, Clone)]
pub struct PullToReveal {
    distance: f32,
    pull: f32,
    expanded: bool,
}

impl PullToReveal {
    pub fn new(distance: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            distance: positive_extent("reveal distance", distance)?,
            pull: 0.0,
            expanded: false,
        })
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Pull distance past the edge; positive while over-scrolled.
    pub fn pull(&self) -> f32 {
        self.pull
    }

    pub fn set_pull(&mut self, pull: f32) {
        self.pull = if pull.is_finite() { pull } else { 0.0 };
    }

    /// Reveal progress in `[0, 1]`. Fully revealed while expanded.
    pub fn progress(&self) -> f32 {
        if self.expanded {
            return 1.0;
        }
        (self.pull / self.distance).clamp(0.0, 1.0)
    }

    /// Called when the finger lifts. `velocity_y` is positive downward.
    ///
    /// Returns the animation to run when the control expands.
    pub fn on_release(&mut self, velocity_y: f32) -> Option<AnimationType> {
        if self.expanded {
            return None;
        }
        let flicked = -velocity_y > REVEAL_FLICK_VELOCITY && self.pull > 0.0;
        if self.pull > self.distance || flicked {
            log::debug!("reveal expanded at pull {:.1}", self.pull);
            self.expanded = true;
            return Some(AnimationType::smooth(0.3));
        }
        None
    }

    pub fn collapse(&mut self) {
        self.expanded = false;
    }
}

impl Default for PullToReveal {
    fn default() -> Self {
        Self {
            distance: DEFAULT_REVEAL_DISTANCE,
            pull: 0.0,
            expanded: false,
        }
    }
}

/// A header that slides away as content scrolls up and returns on a pull down.
///
/// `header_offset` runs from 0 (fully shown) to `header_extent` (hidden).
#[derive(Debug, Clone)]
pub struct CollapsingHeader {
    header_extent: f32,
    header_offset: f32,
    scroll_offset: f32,
    last_drag: f32,
}

impl CollapsingHeader {
    pub fn new(header_extent: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            header_extent: positive_extent("header extent", header_extent)?,
            header_offset: 0.0,
            scroll_offset: 0.0,
            last_drag: 0.0,
        })
    }

    pub fn header_extent(&self) -> f32 {
        self.header_extent
    }

    pub fn header_offset(&self) -> f32 {
        self.header_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.scroll_offset = offset;
        }
    }

    /// Feeds the drag translation since the gesture began (negative = up).
    pub fn on_drag(&mut self, translation: f32) -> f32 {
        let excess = (translation.abs() - HEADER_DEAD_ZONE).max(0.0);
        let drag = if translation < 0.0 { excess } else { -excess };
        let delta = (drag - self.last_drag).round();
        self.last_drag = drag;
        self.header_offset = (self.header_offset + delta).clamp(0.0, self.header_extent);
        self.header_offset
    }

    /// Snaps fully hidden or fully shown; returns the target and animation.
    pub fn on_release(&mut self) -> (f32, AnimationType) {
        self.last_drag = 0.0;
        let hide = self.header_offset > self.header_extent * 0.5
            && self.scroll_offset > self.header_extent;
        self.header_offset = if hide { self.header_extent } else { 0.0 };
        (
            self.header_offset,
            AnimationType::Tween(TweenSpec::new(250, Easing::EaseOut)),
        )
    }
}
