//! Per-instance configuration of a pager.

use slidekit_animation::AnimationType;
use slidekit_foundation::gesture_constants::{
    DEFAULT_COMMIT_THRESHOLD, SETTLE_DURATION_SECS, VELOCITY_DAMPEN_FACTOR,
};
use slidekit_geometry::Axis;

use crate::commit::{AllowedDirection, CommitPolicy, VelocityDampening};
use crate::error::{positive_extent, ConfigError};
use crate::metrics::LayoutMetrics;
use crate::stagger::StaggerConfig;

/// What happens at the ends of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBounds {
    /// Targets stop at the first and last item.
    #[default]
    Clamped,
    /// The sequence repeats; offsets are rebased by whole content lengths.
    Looping,
    /// No limits at all (rubber-banding hosts clamp for themselves).
    Unbounded,
}

/// Construction-time parameters. Not runtime state.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerConfig {
    pub item_extent: f32,
    pub spacing: f32,
    pub visible_cards_count: usize,
    pub threshold_fraction: f32,
    /// Clamp progress to the item range instead of letting it overscroll.
    pub clip_edges: bool,
    pub opacity_effect: bool,
    pub disappear_in_same_direction: bool,
    pub dampen_factor: f32,
    pub bounds: IndexBounds,
    pub allowed_direction: AllowedDirection,
    pub settle_animation: AnimationType,
    pub axis: Axis,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            item_extent: 300.0,
            spacing: 0.0,
            visible_cards_count: 2,
            threshold_fraction: DEFAULT_COMMIT_THRESHOLD,
            clip_edges: true,
            opacity_effect: false,
            disappear_in_same_direction: false,
            dampen_factor: VELOCITY_DAMPEN_FACTOR,
            bounds: IndexBounds::Clamped,
            allowed_direction: AllowedDirection::Both,
            settle_animation: AnimationType::smooth(SETTLE_DURATION_SECS),
            axis: Axis::Horizontal,
        }
    }
}

impl PagerConfig {
    pub fn new(item_extent: f32) -> Self {
        Self {
            item_extent,
            ..Self::default()
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_visible_cards(mut self, count: usize) -> Self {
        self.visible_cards_count = count;
        self
    }

    pub fn with_threshold(mut self, threshold_fraction: f32) -> Self {
        self.threshold_fraction = threshold_fraction;
        self
    }

    pub fn with_clip_edges(mut self, clip_edges: bool) -> Self {
        self.clip_edges = clip_edges;
        self
    }

    pub fn with_opacity_effect(mut self, opacity_effect: bool) -> Self {
        self.opacity_effect = opacity_effect;
        self
    }

    pub fn with_disappear_in_same_direction(mut self, same_direction: bool) -> Self {
        self.disappear_in_same_direction = same_direction;
        self
    }

    pub fn with_dampen_factor(mut self, dampen_factor: f32) -> Self {
        self.dampen_factor = dampen_factor;
        self
    }

    pub fn with_bounds(mut self, bounds: IndexBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_allowed_direction(mut self, allowed_direction: AllowedDirection) -> Self {
        self.allowed_direction = allowed_direction;
        self
    }

    pub fn with_settle_animation(mut self, animation: AnimationType) -> Self {
        self.settle_animation = animation;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Checks every field; nothing is validated lazily later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive_extent("item extent", self.item_extent)?;
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ConfigError::NegativeSpacing {
                value: self.spacing,
            });
        }
        if self.visible_cards_count == 0 {
            return Err(ConfigError::ZeroVisibleDepth);
        }
        self.commit_policy().map(|_| ())
    }

    pub fn commit_policy(&self) -> Result<CommitPolicy, ConfigError> {
        Ok(CommitPolicy::new(self.threshold_fraction)?
            .with_dampening(VelocityDampening::Divide(self.dampen_factor))?
            .with_allowed_direction(self.allowed_direction))
    }

    pub fn metrics(
        &self,
        item_count: usize,
        viewport_extent: f32,
    ) -> Result<LayoutMetrics, ConfigError> {
        LayoutMetrics::new(self.item_extent, self.spacing, item_count, viewport_extent)
    }

    /// Rejects metrics laid out with a different item extent or spacing.
    pub fn check_metrics(&self, metrics: &LayoutMetrics) -> Result<(), ConfigError> {
        let pairs = [
            ("item extent", self.item_extent, metrics.item_extent()),
            ("spacing", self.spacing, metrics.spacing()),
        ];
        for (name, config, measured) in pairs {
            if (config - measured).abs() > f32::EPSILON * config.abs().max(1.0) {
                return Err(ConfigError::MetricsMismatch {
                    name,
                    config,
                    metrics: measured,
                });
            }
        }
        Ok(())
    }

    /// Insertion/removal transitions for the same pager: items travel along
    /// its axis and animate like its settles.
    pub fn stagger_config(&self) -> StaggerConfig {
        let defaults = StaggerConfig::default();
        StaggerConfig {
            offset: self.axis.along(defaults.offset.x),
            animation: self.settle_animation,
            disappear_in_same_direction: self.disappear_in_same_direction,
            ..defaults
        }
    }
}
