//! Coverflow: cards narrow, fade and shrink away from the centre while
//! staying packed toward it.

use slidekit_geometry::Axis;

use crate::error::{channel, positive_extent, ConfigError};
use crate::visual::VisualState;

#[derive(Debug, Clone, PartialEq)]
pub struct CoverflowTransform {
    pub card_extent: f32,
    pub min_card_extent: f32,
    /// Opacity lost per unit of distance; 0 disables fading.
    pub opacity_falloff: f32,
    /// Scale lost per unit of distance; 0 disables shrinking.
    pub scale_falloff: f32,
    pub max_depth: usize,
    pub axis: Axis,
}

impl Default for CoverflowTransform {
    fn default() -> Self {
        Self {
            card_extent: 200.0,
            min_card_extent: 40.0,
            opacity_falloff: 0.5,
            scale_falloff: 0.2,
            max_depth: 2,
            axis: Axis::Horizontal,
        }
    }
}

impl CoverflowTransform {
    pub fn new(card_extent: f32, min_card_extent: f32) -> Result<Self, ConfigError> {
        let card_extent = positive_extent("card extent", card_extent)?;
        let min_card_extent = channel("min card extent", min_card_extent, 0.0, card_extent)?;
        Ok(Self {
            card_extent,
            min_card_extent,
            ..Self::default()
        })
    }

    pub fn with_falloff(mut self, opacity: f32, scale: f32) -> Result<Self, ConfigError> {
        let depth = self.max_depth as f32;
        channel("opacity falloff", opacity * depth, 0.0, 1.0)?;
        channel("scale falloff", scale * depth, 0.0, 1.0)?;
        self.opacity_falloff = opacity;
        self.scale_falloff = scale;
        Ok(self)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Result<Self, ConfigError> {
        if max_depth == 0 {
            return Err(ConfigError::ZeroVisibleDepth);
        }
        self.max_depth = max_depth;
        let (opacity, scale) = (self.opacity_falloff, self.scale_falloff);
        self.with_falloff(opacity, scale)
    }

    pub(crate) fn map_distance(&self, distance: f32) -> VisualState {
        let limit = self.max_depth as f32;
        let d = distance.clamp(-limit, limit);
        let width_diff = self.card_extent - self.min_card_extent;

        let reduce = d * width_diff;
        let capped = reduce.abs().min(width_diff);
        // Shift toward the centre by the lost width, then push neighbours back
        // out by at most one card's worth so they never overlap the centre.
        let shift = -reduce + d.min(1.0) * width_diff + (-d).max(0.0) * width_diff;

        let mut state = VisualState::IDENTITY
            .with_extent(self.card_extent - capped)
            .with_opacity(1.0 - self.opacity_falloff * d.abs())
            .with_scale(1.0 - self.scale_falloff * d.abs())
            .with_translation(self.axis.along(shift));
        state.z_index = -d.abs();
        state.sanitized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_card_is_untouched() {
        let state = CoverflowTransform::default().map_distance(0.0);
        assert_eq!(state.extent, Some(200.0));
        assert_eq!(state.opacity, 1.0);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.translation.x, 0.0);
    }

    #[test]
    fn neighbour_shrinks_to_minimum_width() {
        let transform = CoverflowTransform::default();
        let right = transform.map_distance(1.0);
        assert_eq!(right.extent, Some(40.0));
        assert_eq!(right.opacity, 0.5);
        assert!((right.scale - 0.8).abs() < 1e-6);
        assert_eq!(right.translation.x, 0.0);

        let left = transform.map_distance(-1.0);
        assert_eq!(left.extent, Some(40.0));
        assert_eq!(left.translation.x, 160.0);
    }

    #[test]
    fn half_way_card_moves_toward_centre() {
        let state = CoverflowTransform::default().map_distance(0.5);
        assert_eq!(state.extent, Some(120.0));
        assert_eq!(state.translation.x, 0.0);
        let state = CoverflowTransform::default().map_distance(-0.5);
        assert_eq!(state.translation.x, 80.0);
    }

    #[test]
    fn far_cards_stay_within_channel_bounds() {
        let transform = CoverflowTransform::default();
        for distance in [-1e6, -7.0, 7.0, 1e6] {
            let state = transform.map_distance(distance);
            assert!((0.0..=1.0).contains(&state.opacity));
            assert!(state.scale >= 0.0);
            assert_eq!(state.extent, Some(40.0));
        }
    }

    #[test]
    fn min_extent_cannot_exceed_card() {
        assert!(CoverflowTransform::new(100.0, 150.0).is_err());
        assert!(CoverflowTransform::default().with_falloff(0.8, 0.2).is_err());
    }

    #[test]
    fn deeper_stack_rechecks_falloff() {
        let shallow = CoverflowTransform::default().with_max_depth(1).unwrap();
        assert_eq!(shallow.max_depth, 1);
        assert_eq!(shallow.opacity_falloff, 0.5);

        // 0.5 opacity per card runs out before a third card.
        assert!(matches!(
            CoverflowTransform::default().with_max_depth(3),
            Err(ConfigError::ChannelOutOfRange { name: "opacity falloff", .. })
        ));
        assert!(CoverflowTransform::default()
            .with_falloff(0.25, 0.2)
            .and_then(|transform| transform.with_max_depth(3))
            .is_ok());
        assert_eq!(
            CoverflowTransform::default().with_max_depth(0),
            Err(ConfigError::ZeroVisibleDepth)
        );
    }
}
