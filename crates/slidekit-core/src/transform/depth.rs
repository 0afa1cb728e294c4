//! Distance-based decay for stacked cards.

use slidekit_geometry::{Anchor, Axis};

use crate::error::{channel, positive_extent, ConfigError};
use crate::visual::VisualState;

/// Cards ahead of the head recede by a fixed step per unit of distance,
/// up to `max_depth`; cards already passed return to identity.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthTransform {
    pub offset_per_item: f32,
    pub scale_per_item: f32,
    pub opacity_per_item: f32,
    pub max_depth: usize,
    pub anchor: Anchor,
    pub axis: Axis,
    /// Stride to pin every card back onto the head; `None` keeps cards in
    /// their own slot.
    pub collapse_stride: Option<f32>,
}

impl Default for DepthTransform {
    fn default() -> Self {
        Self {
            offset_per_item: 20.0,
            scale_per_item: 0.07,
            opacity_per_item: 0.0,
            max_depth: 2,
            anchor: Anchor::Trailing,
            axis: Axis::Horizontal,
            collapse_stride: None,
        }
    }
}

impl DepthTransform {
    pub fn new(
        offset_per_item: f32,
        scale_per_item: f32,
        max_depth: usize,
    ) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::ZeroVisibleDepth);
        }
        let depth = max_depth as f32;
        channel("depth scale step", scale_per_item * depth, 0.0, 1.0)?;
        Ok(Self {
            offset_per_item,
            scale_per_item,
            max_depth,
            ..Self::default()
        })
    }

    /// Notification-style stack: cards scrolled toward the head collapse onto
    /// it, bottom-anchored, along the vertical axis.
    pub fn stacked_scroll(stride: f32, max_depth: usize) -> Result<Self, ConfigError> {
        let mut transform = Self::new(10.0, 0.1, max_depth)?;
        transform.anchor = Anchor::Bottom;
        transform.axis = Axis::Vertical;
        transform.collapse_stride = Some(positive_extent("stack stride", stride)?);
        Ok(transform)
    }

    pub fn with_opacity_step(mut self, opacity_per_item: f32) -> Result<Self, ConfigError> {
        channel(
            "depth opacity step",
            opacity_per_item * self.max_depth as f32,
            0.0,
            1.0,
        )?;
        self.opacity_per_item = opacity_per_item;
        Ok(self)
    }

    /// Changes how many cards recede, re-checking both per-card steps.
    pub fn with_max_depth(mut self, max_depth: usize) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::ZeroVisibleDepth);
        }
        let depth = max_depth as f32;
        channel("depth scale step", self.scale_per_item * depth, 0.0, 1.0)?;
        channel("depth opacity step", self.opacity_per_item * depth, 0.0, 1.0)?;
        self.max_depth = max_depth;
        Ok(self)
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// `distance` is `index - progress`: positive for cards still ahead.
    pub(crate) fn map_distance(&self, index: i64, distance: f32) -> VisualState {
        let mut state = VisualState::IDENTITY.with_anchor(self.anchor);
        state.z_index = -(index as f32);
        if distance < 0.0 {
            return state;
        }

        let depth = distance.min(self.max_depth as f32);
        let mut shift = depth * self.offset_per_item;
        if let Some(stride) = self.collapse_stride {
            shift -= distance * stride;
        }
        state.translation = self.axis.along(shift);
        state.scale = 1.0 - depth * self.scale_per_item;
        state.opacity = 1.0 - depth * self.opacity_per_item;
        state.sanitized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_back_per_card_then_holds() {
        let depth = DepthTransform::default();
        let head = depth.map_distance(0, 0.0);
        assert_eq!(head.scale, 1.0);
        assert_eq!(head.translation.x, 0.0);

        let second = depth.map_distance(1, 1.0);
        assert_eq!(second.translation.x, 20.0);
        assert!((second.scale - 0.93).abs() < 1e-6);

        let far = depth.map_distance(5, 5.0);
        assert_eq!(far.translation.x, 40.0);
        assert!((far.scale - 0.86).abs() < 1e-6);
    }

    #[test]
    fn passed_cards_return_to_identity() {
        let state = DepthTransform::default().map_distance(0, -0.4);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.opacity, 1.0);
    }

    #[test]
    fn earlier_cards_draw_on_top() {
        let depth = DepthTransform::default();
        assert!(depth.map_distance(0, 0.0).z_index > depth.map_distance(1, 1.0).z_index);
    }

    #[test]
    fn collapsed_stack_pins_to_the_head() {
        let depth = DepthTransform::stacked_scroll(50.0, 3).unwrap();
        let state = depth.map_distance(2, 2.0);
        assert_eq!(state.translation.y, -100.0 + 20.0);
        assert_eq!(state.anchor, Anchor::Bottom);
    }

    #[test]
    fn deeper_stack_rechecks_the_steps() {
        let depth = DepthTransform::default().with_max_depth(4).unwrap();
        assert_eq!(depth.map_distance(4, 4.0).translation.x, 80.0);
        assert!(DepthTransform::default().with_max_depth(15).is_err());
        assert_eq!(
            DepthTransform::default().with_max_depth(0),
            Err(ConfigError::ZeroVisibleDepth)
        );
    }

    #[test]
    fn rejects_zero_depth_and_over_shrinking() {
        assert_eq!(DepthTransform::new(20.0, 0.07, 0), Err(ConfigError::ZeroVisibleDepth));
        assert!(DepthTransform::new(20.0, 0.6, 2).is_err());
    }
}
