//! Commit-or-revert at the end of a drag.
//!
//! Release velocity is turned into an equivalent displacement and added to
//! the finger's actual displacement; the sum decides whether the gesture
//! travelled far enough to move one item.

use slidekit_animation::{DecaySpec, SplineDecay};
use slidekit_foundation::gesture_constants::{DEFAULT_COMMIT_THRESHOLD, VELOCITY_DAMPEN_FACTOR};

use crate::error::ConfigError;

/// Direction of travel through the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward higher indices. The finger moves toward the leading edge.
    Forward,
    Backward,
}

impl Direction {
    pub fn step(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    /// Direction implied by a finger displacement (negative = forward).
    pub fn of_displacement(displacement: f32) -> Option<Self> {
        if displacement < 0.0 {
            Some(Direction::Forward)
        } else if displacement > 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }
}

/// Which way a drag may move items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowedDirection {
    #[default]
    Both,
    ForwardOnly,
    BackwardOnly,
}

impl AllowedDirection {
    /// Zeroes a finger-space amount that points the forbidden way.
    pub fn constrain(self, amount: f32) -> f32 {
        match self {
            AllowedDirection::Both => amount,
            AllowedDirection::ForwardOnly => amount.min(0.0),
            AllowedDirection::BackwardOnly => amount.max(0.0),
        }
    }
}

/// How release velocity becomes displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VelocityDampening {
    /// `velocity / factor`.
    Divide(f32),
    /// Distance a fling at that velocity would coast.
    Decay(SplineDecay),
    /// Velocity is ignored.
    None,
}

impl VelocityDampening {
    pub fn apply(&self, velocity: f32) -> f32 {
        if !velocity.is_finite() {
            return 0.0;
        }
        match self {
            VelocityDampening::Divide(factor) => velocity / factor,
            VelocityDampening::Decay(decay) => decay.projected_distance(velocity),
            VelocityDampening::None => 0.0,
        }
    }
}

impl Default for VelocityDampening {
    fn default() -> Self {
        VelocityDampening::Divide(VELOCITY_DAMPEN_FACTOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Commit(Direction),
    Revert,
}

/// What the gesture resolved to. Consumed immediately by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureCommitDecision {
    pub target_index: i64,
    pub should_animate: bool,
    pub outcome: CommitOutcome,
    /// Displacement plus dampened velocity, after the direction constraint.
    pub effective_displacement: f32,
}

impl GestureCommitDecision {
    pub fn committed(&self) -> bool {
        matches!(self.outcome, CommitOutcome::Commit(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitPolicy {
    threshold_fraction: f32,
    dampening: VelocityDampening,
    allowed_direction: AllowedDirection,
}

impl Default for CommitPolicy {
    fn default() -> Self {
        Self {
            threshold_fraction: DEFAULT_COMMIT_THRESHOLD,
            dampening: VelocityDampening::default(),
            allowed_direction: AllowedDirection::Both,
        }
    }
}

impl CommitPolicy {
    /// `threshold_fraction` of the item extent must be covered to commit.
    pub fn new(threshold_fraction: f32) -> Result<Self, ConfigError> {
        if !(threshold_fraction > 0.0 && threshold_fraction <= 1.0) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: threshold_fraction,
            });
        }
        Ok(Self {
            threshold_fraction,
            ..Self::default()
        })
    }

    pub fn with_dampening(mut self, dampening: VelocityDampening) -> Result<Self, ConfigError> {
        if let VelocityDampening::Divide(factor) = dampening {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError::NonPositiveDampenFactor { value: factor });
            }
        }
        self.dampening = dampening;
        Ok(self)
    }

    pub fn with_allowed_direction(mut self, allowed_direction: AllowedDirection) -> Self {
        self.allowed_direction = allowed_direction;
        self
    }

    pub fn threshold_fraction(&self) -> f32 {
        self.threshold_fraction
    }

    pub fn dampening(&self) -> VelocityDampening {
        self.dampening
    }

    pub fn allowed_direction(&self) -> AllowedDirection {
        self.allowed_direction
    }

    /// Displacement plus dampened velocity, both constrained to the allowed
    /// direction.
    pub fn effective_displacement(&self, displacement: f32, velocity: f32) -> f32 {
        let displacement = if displacement.is_finite() {
            displacement
        } else {
            0.0
        };
        let displacement = self.allowed_direction.constrain(displacement);
        let momentum = self.allowed_direction.constrain(self.dampening.apply(velocity));
        displacement + momentum
    }

    /// Decides where a released drag lands.
    ///
    /// `displacement` and `velocity` are in finger space: negative values
    /// move forward. The target is always `current_index` or one step away.
    pub fn on_gesture_end(
        &self,
        current_index: i64,
        displacement: f32,
        velocity: f32,
        item_extent: f32,
    ) -> GestureCommitDecision {
        let effective = self.effective_displacement(displacement, velocity);
        let moved = self.allowed_direction.constrain(displacement);
        let moved = if moved.is_finite() { moved } else { 0.0 };

        let threshold = self.threshold_fraction * item_extent;
        let passes = threshold.is_finite() && item_extent > 0.0 && effective.abs() > threshold;
        let outcome = match Direction::of_displacement(effective) {
            Some(direction) if passes => CommitOutcome::Commit(direction),
            _ => CommitOutcome::Revert,
        };

        let target_index = match outcome {
            CommitOutcome::Commit(direction) => current_index + direction.step(),
            CommitOutcome::Revert => current_index,
        };
        let should_animate = outcome != CommitOutcome::Revert || moved != 0.0 || effective != 0.0;
        log::debug!(
            "gesture end: displacement {displacement}, velocity {velocity}, effective {effective}, \
             threshold {threshold} -> {outcome:?}"
        );

        GestureCommitDecision {
            target_index,
            should_animate,
            outcome,
            effective_displacement: effective,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_forward_flick_commits() {
        let policy = CommitPolicy::new(0.65).unwrap();
        let decision = policy.on_gesture_end(0, -250.0, -40.0, 300.0);
        assert_eq!(decision.effective_displacement, -258.0);
        assert_eq!(decision.outcome, CommitOutcome::Commit(Direction::Forward));
        assert_eq!(decision.target_index, 1);
        assert!(decision.should_animate);
    }

    #[test]
    fn short_drag_reverts_with_animation() {
        let decision = CommitPolicy::default().on_gesture_end(3, 120.0, 0.0, 300.0);
        assert_eq!(decision.outcome, CommitOutcome::Revert);
        assert_eq!(decision.target_index, 3);
        assert!(decision.should_animate);
    }

    #[test]
    fn backward_drag_commits_to_previous_item() {
        let decision = CommitPolicy::default().on_gesture_end(3, 150.0, 400.0, 300.0);
        assert_eq!(decision.effective_displacement, 230.0);
        assert_eq!(decision.target_index, 2);
    }

    #[test]
    fn threshold_is_strict() {
        let policy = CommitPolicy::new(0.5).unwrap();
        assert!(!policy.on_gesture_end(0, -100.0, 0.0, 200.0).committed());
        assert!(policy.on_gesture_end(0, -100.5, 0.0, 200.0).committed());
    }

    #[test]
    fn commits_are_monotonic_in_effective_displacement() {
        let policy = CommitPolicy::default();
        let mut committed = false;
        for step in 0..400 {
            let decision = policy.on_gesture_end(0, -(step as f32), 0.0, 300.0);
            assert!(!committed || decision.committed(), "lost commit at {step}");
            committed = decision.committed();
        }
        assert!(committed);
    }

    #[test]
    fn forbidden_direction_is_clamped_away() {
        let policy = CommitPolicy::default().with_allowed_direction(AllowedDirection::ForwardOnly);
        let decision = policy.on_gesture_end(0, 280.0, 2_000.0, 300.0);
        assert_eq!(decision.effective_displacement, 0.0);
        assert_eq!(decision.outcome, CommitOutcome::Revert);
        assert!(!decision.should_animate);

        // A backward flick cannot cancel out a forward drag either.
        let decision = policy.on_gesture_end(0, -200.0, 3_000.0, 300.0);
        assert_eq!(decision.effective_displacement, -200.0);
        assert!(decision.committed());
    }

    #[test]
    fn motionless_release_does_not_animate() {
        let decision = CommitPolicy::default().on_gesture_end(2, 0.0, 0.0, 300.0);
        assert_eq!(decision.target_index, 2);
        assert!(!decision.should_animate);
    }

    #[test]
    fn non_finite_input_reverts() {
        let decision = CommitPolicy::default().on_gesture_end(1, f32::NAN, f32::INFINITY, 300.0);
        assert_eq!(decision.outcome, CommitOutcome::Revert);
        assert_eq!(decision.target_index, 1);
    }

    #[test]
    fn decay_projection_turns_a_flick_into_distance() {
        let policy = CommitPolicy::default()
            .with_dampening(VelocityDampening::Decay(SplineDecay::new(2.0)))
            .unwrap();
        let decision = policy.on_gesture_end(0, -10.0, -3_000.0, 300.0);
        assert!(decision.committed());
    }

    #[test]
    fn rejects_bad_policies() {
        assert!(CommitPolicy::new(0.0).is_err());
        assert!(CommitPolicy::new(1.5).is_err());
        assert_eq!(
            CommitPolicy::default().with_dampening(VelocityDampening::Divide(0.0)),
            Err(ConfigError::NonPositiveDampenFactor { value: 0.0 })
        );
    }
}
