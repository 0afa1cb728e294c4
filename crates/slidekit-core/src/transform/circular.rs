//! Vertical wheel: items stay pinned to the centre slot and swing around a
//! pivot off to the trailing side.

use slidekit_geometry::{Anchor, Axis};

use crate::error::{positive_extent, ConfigError};
use crate::visual::{Rotation, VisualState};

#[derive(Debug, Clone, PartialEq)]
pub struct CircularTransform {
    pub degrees_per_item: f32,
    /// Rotation stops growing past this many items of distance.
    pub max_distance: f32,
    /// Main-axis stride; every item is translated back by `distance * stride`.
    pub stride: f32,
    /// Cross-axis offset that moves the item away from its pivot.
    pub pivot_offset: f32,
    pub axis: Axis,
}

impl Default for CircularTransform {
    fn default() -> Self {
        Self {
            degrees_per_item: -50.0,
            max_distance: 3.0,
            stride: 150.0,
            pivot_offset: -150.0,
            axis: Axis::Vertical,
        }
    }
}

impl CircularTransform {
    pub fn new(stride: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            stride: positive_extent("wheel stride", stride)?,
            ..Self::default()
        })
    }

    pub fn with_degrees_per_item(mut self, degrees: f32) -> Self {
        self.degrees_per_item = degrees;
        self
    }

    pub(crate) fn map_distance(&self, distance: f32) -> VisualState {
        let capped = distance.clamp(-self.max_distance, self.max_distance);
        let pinned = self.axis.along(-distance * self.stride);
        let pivot = self.axis.cross_axis().along(self.pivot_offset);
        let mut state = VisualState::IDENTITY
            .with_anchor(Anchor::Trailing)
            .with_rotation(Rotation::z(capped * self.degrees_per_item))
            .with_translation(pinned + pivot);
        state.z_index = -distance.abs();
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_item_is_upright() {
        let state = CircularTransform::default().map_distance(0.0);
        assert_eq!(state.rotation.degrees, 0.0);
        assert_eq!(state.translation.x, -150.0);
        assert_eq!(state.translation.y, 0.0);
    }

    #[test]
    fn rotation_caps_at_three_items() {
        let wheel = CircularTransform::default();
        assert_eq!(wheel.map_distance(1.0).rotation.degrees, -50.0);
        assert_eq!(wheel.map_distance(-2.0).rotation.degrees, 100.0);
        assert_eq!(wheel.map_distance(9.0).rotation.degrees, -150.0);
        assert_eq!(wheel.map_distance(-9.0).rotation.degrees, 150.0);
    }

    #[test]
    fn items_are_pinned_to_the_centre_slot() {
        let state = CircularTransform::default().map_distance(2.0);
        assert_eq!(state.translation.y, -300.0);
        assert_eq!(state.anchor, Anchor::Trailing);
    }
}
