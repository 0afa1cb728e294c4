//! Scroll-transition tilt: the centred card lifts, neighbours lean away.

use slidekit_geometry::{Anchor, Axis};

use crate::visual::{Rotation, VisualState};

#[derive(Debug, Clone, PartialEq)]
pub struct TiltTransform {
    /// Cross-axis lift of the centred card, in points.
    pub lift: f32,
    /// Rotation at one item of distance.
    pub degrees: f32,
    pub axis: Axis,
}

impl Default for TiltTransform {
    fn default() -> Self {
        Self {
            lift: 10.0,
            degrees: 5.0,
            axis: Axis::Horizontal,
        }
    }
}

impl TiltTransform {
    pub(crate) fn map_distance(&self, distance: f32) -> VisualState {
        let phase = distance.clamp(-1.0, 1.0);
        let lift = -self.lift * (1.0 - phase.abs());
        VisualState::IDENTITY
            .with_anchor(Anchor::Bottom)
            .with_rotation(Rotation::z(phase * self.degrees))
            .with_translation(self.axis.cross_axis().along(lift))
    }
}
