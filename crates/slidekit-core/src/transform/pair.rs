//! Two-item crossfade used by paging indicators.

use crate::error::{channel, positive_extent, ConfigError};
use crate::index::ActivePair;
use crate::visual::VisualState;

/// Value a channel takes on the active item and on an idle item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelPair {
    pub active: f32,
    pub idle: f32,
}

impl ChannelPair {
    pub const fn new(active: f32, idle: f32) -> Self {
        Self { active, idle }
    }

    /// Constant channel: nothing changes as progress moves.
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Value on the item being left behind.
    pub fn leaving(&self, fraction: f32) -> f32 {
        self.active + (self.idle - self.active) * fraction
    }

    /// Value on the item being approached.
    pub fn arriving(&self, fraction: f32) -> f32 {
        self.idle + (self.active - self.idle) * fraction
    }
}

/// Interpolates between exactly two items; every other item shows `rest`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairTransform {
    pub opacity: ChannelPair,
    pub scale: ChannelPair,
    pub extent: Option<ChannelPair>,
    /// When false, opacity is not interpolated and every item shows
    /// `rest.opacity`.
    pub opacity_effect: bool,
    pub rest: VisualState,
    /// Rest opacity follows `opacity_effect`: idle items are hidden while it
    /// is on and fully shown while it is off.
    pub rest_follows_effect: bool,
}

pub const INDICATOR_DOT_EXTENT: f32 = 8.0;
pub const INDICATOR_SPACING: f32 = 10.0;

impl PairTransform {
    pub fn new(opacity: ChannelPair) -> Result<Self, ConfigError> {
        channel("active opacity", opacity.active, 0.0, 1.0)?;
        channel("idle opacity", opacity.idle, 0.0, 1.0)?;
        Ok(Self {
            opacity,
            scale: ChannelPair::fixed(1.0),
            extent: None,
            opacity_effect: true,
            rest: VisualState::IDENTITY.with_opacity(opacity.idle),
            rest_follows_effect: false,
        })
    }

    /// Capsule paging indicator: the active dot stretches by one spacing and
    /// the next dot grows as the active one shrinks.
    pub fn indicator(
        dot_extent: f32,
        spacing: f32,
        opacity_effect: bool,
    ) -> Result<Self, ConfigError> {
        let dot_extent = positive_extent("indicator dot extent", dot_extent)?;
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(ConfigError::NegativeSpacing { value: spacing });
        }
        let indicator = Self {
            opacity: ChannelPair::new(1.0, 0.0),
            scale: ChannelPair::fixed(1.0),
            extent: Some(ChannelPair::new(dot_extent + spacing, dot_extent)),
            opacity_effect,
            rest: VisualState::IDENTITY.with_extent(dot_extent),
            rest_follows_effect: true,
        };
        Ok(indicator.with_opacity_effect(opacity_effect))
    }

    pub fn with_scale(mut self, scale: ChannelPair) -> Result<Self, ConfigError> {
        channel("active scale", scale.active, 0.0, f32::MAX)?;
        channel("idle scale", scale.idle, 0.0, f32::MAX)?;
        self.scale = scale;
        Ok(self)
    }

    pub fn with_rest(mut self, rest: VisualState) -> Result<Self, ConfigError> {
        channel("rest opacity", rest.opacity, 0.0, 1.0)?;
        self.rest = rest;
        Ok(self)
    }

    pub fn with_opacity_effect(mut self, enabled: bool) -> Self {
        self.opacity_effect = enabled;
        if self.rest_follows_effect {
            self.rest.opacity = if enabled { 0.0 } else { 1.0 };
        }
        self
    }

    pub(crate) fn map_item(&self, index: i64, pair: &ActivePair) -> VisualState {
        let fraction = pair.fraction.clamp(0.0, 1.0);
        let pick = |channel: &ChannelPair| {
            if index == pair.active_index {
                Some(channel.leaving(fraction))
            } else if index == pair.next_index {
                Some(channel.arriving(fraction))
            } else {
                None
            }
        };

        let Some(scale) = pick(&self.scale) else {
            return self.rest;
        };
        let mut state = self.rest.with_scale(scale);
        if self.opacity_effect {
            state.opacity = pick(&self.opacity).unwrap_or(self.rest.opacity);
        }
        if let Some(extent) = self.extent.as_ref().and_then(pick) {
            state.extent = Some(extent);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::resolve;

    #[test]
    fn crossfade_between_active_and_next() {
        let transform = PairTransform::new(ChannelPair::new(1.0, 0.0))
            .unwrap()
            .with_rest(VisualState::IDENTITY)
            .unwrap();
        let pair = resolve(1.5);
        assert_eq!(transform.map_item(1, &pair).opacity, 0.5);
        assert_eq!(transform.map_item(2, &pair).opacity, 0.5);
        assert_eq!(transform.map_item(0, &pair).opacity, 1.0);
    }

    #[test]
    fn quarter_way_favours_active() {
        let transform = PairTransform::new(ChannelPair::new(1.0, 0.0)).unwrap();
        let pair = resolve(0.25);
        assert_eq!(transform.map_item(0, &pair).opacity, 0.75);
        assert_eq!(transform.map_item(1, &pair).opacity, 0.25);
        assert_eq!(transform.map_item(4, &pair).opacity, 0.0);
    }

    #[test]
    fn settled_item_is_fully_active() {
        let transform = PairTransform::new(ChannelPair::new(1.0, 0.2)).unwrap();
        let pair = resolve(3.0);
        assert_eq!(transform.map_item(3, &pair).opacity, 1.0);
        assert_eq!(transform.map_item(4, &pair).opacity, 0.2);
    }

    #[test]
    fn indicator_widths_trade_one_spacing() {
        let transform = PairTransform::indicator(8.0, 10.0, true).unwrap();
        let pair = resolve(0.5);
        assert_eq!(transform.map_item(0, &pair).extent, Some(13.0));
        assert_eq!(transform.map_item(1, &pair).extent, Some(13.0));
        assert_eq!(transform.map_item(2, &pair).extent, Some(8.0));

        let settled = resolve(1.0);
        assert_eq!(transform.map_item(1, &settled).extent, Some(18.0));
    }

    #[test]
    fn without_opacity_effect_every_item_shows_rest_opacity() {
        let transform = PairTransform::indicator(8.0, 10.0, false).unwrap();
        let pair = resolve(0.3);
        for index in 0..4 {
            assert_eq!(transform.map_item(index, &pair).opacity, 1.0);
        }
    }

    #[test]
    fn toggling_the_effect_keeps_indicator_dots_visible() {
        let transform = PairTransform::indicator(8.0, 10.0, true)
            .unwrap()
            .with_opacity_effect(false);
        assert_eq!(transform.rest.opacity, 1.0);
        assert_eq!(transform.map_item(3, &resolve(0.5)).opacity, 1.0);

        let transform = transform.with_opacity_effect(true);
        assert_eq!(transform.map_item(3, &resolve(0.5)).opacity, 0.0);

        // Plain crossfades keep the rest opacity they were built with.
        let plain = PairTransform::new(ChannelPair::new(1.0, 0.2))
            .unwrap()
            .with_opacity_effect(false);
        assert_eq!(plain.rest.opacity, 0.2);
    }

    #[test]
    fn rejects_opacity_outside_unit_range() {
        assert!(matches!(
            PairTransform::new(ChannelPair::new(1.5, 0.0)),
            Err(ConfigError::ChannelOutOfRange { .. })
        ));
        assert!(PairTransform::indicator(0.0, 10.0, true).is_err());
    }
}
