//! Parallax card: the inner content lags behind the card as it scrolls.

use slidekit_geometry::Axis;

use crate::error::{channel, positive_extent, ConfigError};
use crate::visual::VisualState;

#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxTransform {
    pub card_extent: f32,
    pub stride: f32,
    /// How much faster than the card the content moves (and is scaled by).
    pub factor: f32,
    /// Scale of a card one or more items away from the centre.
    pub idle_scale: f32,
    pub axis: Axis,
}

impl ParallaxTransform {
    pub fn new(card_extent: f32, spacing: f32) -> Result<Self, ConfigError> {
        let card_extent = positive_extent("card extent", card_extent)?;
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(ConfigError::NegativeSpacing { value: spacing });
        }
        Ok(Self {
            card_extent,
            stride: card_extent + spacing,
            factor: 1.4,
            idle_scale: 0.95,
            axis: Axis::Horizontal,
        })
    }

    pub fn with_factor(mut self, factor: f32) -> Result<Self, ConfigError> {
        self.factor = positive_extent("parallax factor", factor)?;
        Ok(self)
    }

    pub fn with_idle_scale(mut self, idle_scale: f32) -> Result<Self, ConfigError> {
        self.idle_scale = channel("idle scale", idle_scale, 0.0, 1.0)?;
        Ok(self)
    }

    /// Scale the inner content needs so the offset never reveals an edge.
    pub fn content_scale(&self) -> f32 {
        self.factor
    }

    pub(crate) fn map_distance(&self, distance: f32) -> VisualState {
        let limit = self.card_extent * self.factor;
        let shift = (distance * self.stride * self.factor).clamp(-limit, limit);
        let nearness = distance.abs().min(1.0);
        let scale = 1.0 - (1.0 - self.idle_scale) * nearness;
        let mut state = VisualState::IDENTITY.with_scale(scale);
        state.content_offset = self.axis.along(-shift);
        state
    }
}
