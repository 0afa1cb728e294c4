//! Discrete appear/disappear transitions: staggered lists and card flips.

use slidekit_animation::AnimationType;
use slidekit_geometry::{Anchor, Point};
use web_time::Duration;

use crate::error::{channel, ConfigError};
use crate::visual::{Rotation, VisualState};

/// Lifecycle phase of an item being inserted or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    WillAppear,
    Identity,
    DidDisappear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaggerConfig {
    pub delay_secs: f32,
    pub max_delay_secs: f32,
    pub blur: f32,
    pub offset: Point,
    pub scale: f32,
    pub anchor: Anchor,
    pub animation: AnimationType,
    /// Leave toward the side items entered from instead of the opposite one.
    pub disappear_in_same_direction: bool,
    /// Fade out in place.
    pub no_disappear_animation: bool,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            delay_secs: 0.05,
            max_delay_secs: 0.8,
            blur: 8.0,
            offset: Point::new(420.0, 0.0),
            scale: 0.95,
            anchor: Anchor::Center,
            animation: AnimationType::smooth(0.3),
            disappear_in_same_direction: false,
            no_disappear_animation: false,
        }
    }
}

impl StaggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        channel("stagger delay", self.delay_secs, 0.0, f32::MAX)?;
        channel("max stagger delay", self.max_delay_secs, 0.0, f32::MAX)?;
        channel("stagger blur", self.blur, 0.0, f32::MAX)?;
        channel("stagger scale", self.scale, 0.0, f32::MAX)?;
        Ok(())
    }
}

/// Per-index staggered insertion/removal.
#[derive(Debug, Clone)]
pub struct StaggeredTransition {
    config: StaggerConfig,
}

impl StaggeredTransition {
    pub fn new(config: StaggerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StaggerConfig {
        &self.config
    }

    /// Start delay for the item at `index`, capped so long lists finish.
    pub fn delay_secs(&self, index: usize) -> f32 {
        (index as f32 * self.config.delay_secs).min(self.config.max_delay_secs)
    }

    /// Delay before item `index` starts, and the animation it then runs.
    pub fn schedule(&self, index: usize) -> (Duration, AnimationType) {
        (
            Duration::from_secs_f32(self.delay_secs(index)),
            self.config.animation,
        )
    }

    fn exit_offset(&self) -> Point {
        if self.config.no_disappear_animation {
            Point::ZERO
        } else if self.config.disappear_in_same_direction {
            self.config.offset
        } else {
            -self.config.offset
        }
    }

    pub fn state(&self, phase: TransitionPhase) -> VisualState {
        if phase == TransitionPhase::Identity {
            return VisualState::IDENTITY.with_anchor(self.config.anchor);
        }
        let offset = match phase {
            TransitionPhase::DidDisappear => self.exit_offset(),
            _ => self.config.offset,
        };
        let mut state = VisualState::IDENTITY
            .with_opacity(0.0)
            .with_scale(self.config.scale)
            .with_anchor(self.config.anchor)
            .with_translation(offset);
        state.blur = self.config.blur;
        state
    }
}

/// Card flip between two faces, driven by `progress` in `[-1, 1]`.
///
/// Positive progress flips into the screen, negative out of it; the face is
/// hidden once it has turned past edge-on.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipTransition;

impl FlipTransition {
    pub fn state(&self, progress: f32) -> VisualState {
        let progress = if progress.is_finite() {
            progress.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let opacity = if progress.abs() < 0.5 { 1.0 } else { 0.0 };
        VisualState::IDENTITY
            .with_opacity(opacity)
            .with_rotation(Rotation::y(progress * 180.0))
    }

    /// Progress of the face coming in, given the outgoing face's progress.
    pub fn incoming(&self, outgoing: f32) -> f32 {
        outgoing - outgoing.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staggered(config: StaggerConfig) -> StaggeredTransition {
        StaggeredTransition::new(config).unwrap()
    }

    #[test]
    fn delays_grow_per_index_and_cap() {
        let transition = staggered(StaggerConfig::default());
        assert_eq!(transition.delay_secs(0), 0.0);
        assert!((transition.delay_secs(4) - 0.2).abs() < 1e-6);
        assert_eq!(transition.delay_secs(100), 0.8);
    }

    #[test]
    fn appearing_items_slide_in_blurred() {
        let state = staggered(StaggerConfig::default()).state(TransitionPhase::WillAppear);
        assert_eq!(state.opacity, 0.0);
        assert_eq!(state.blur, 8.0);
        assert_eq!(state.scale, 0.95);
        assert_eq!(state.translation, Point::new(420.0, 0.0));
    }

    #[test]
    fn identity_is_untouched() {
        let state = staggered(StaggerConfig::default()).state(TransitionPhase::Identity);
        assert_eq!(state, VisualState::IDENTITY);
    }

    #[test]
    fn disappearing_direction_follows_the_flags() {
        let opposite = staggered(StaggerConfig::default());
        assert_eq!(
            opposite.state(TransitionPhase::DidDisappear).translation,
            Point::new(-420.0, 0.0)
        );

        let same = staggered(StaggerConfig {
            disappear_in_same_direction: true,
            ..StaggerConfig::default()
        });
        assert_eq!(
            same.state(TransitionPhase::DidDisappear).translation,
            Point::new(420.0, 0.0)
        );

        let in_place = staggered(StaggerConfig {
            no_disappear_animation: true,
            ..StaggerConfig::default()
        });
        assert_eq!(in_place.state(TransitionPhase::DidDisappear).translation, Point::ZERO);
    }

    #[test]
    fn schedule_carries_the_index_delay() {
        let transition = staggered(StaggerConfig::default());
        let (delay, animation) = transition.schedule(3);
        assert_eq!(delay.as_millis(), 150);
        assert_eq!(animation, AnimationType::smooth(0.3));
        assert_eq!(transition.schedule(40).0.as_millis(), 800);
    }

    #[test]
    fn flip_hides_the_face_past_edge_on() {
        let flip = FlipTransition;
        assert_eq!(flip.state(0.0).opacity, 1.0);
        assert_eq!(flip.state(0.49).opacity, 1.0);
        assert_eq!(flip.state(-0.5).opacity, 0.0);
        assert_eq!(flip.state(1.0).rotation, Rotation::y(180.0));
        assert_eq!(flip.state(-3.0).rotation, Rotation::y(-180.0));
        assert_eq!(flip.incoming(0.25), -0.75);
    }
}
