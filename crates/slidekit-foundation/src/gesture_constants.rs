//! Tuning constants shared by the gesture side of the carousels.
//!
//! Values are in logical points. They describe feel, not correctness, and are
//! the defaults every `PagerConfig` starts from.

/// Fraction of an item's extent a release has to cover to commit.
pub const DEFAULT_COMMIT_THRESHOLD: f32 = 0.65;

/// Release velocity is divided by this before joining the displacement, so a
/// quick flick and a slow deliberate drag share a single threshold test.
pub const VELOCITY_DAMPEN_FACTOR: f32 = 5.0;

/// Maximum fling velocity in points per second.
///
/// Tracked velocities are clamped to this before they reach the commit
/// resolver; a 1ms jitter spike otherwise looks like a flick of ~10k pt/s.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Duration of the settle animation after a commit or revert.
pub const SETTLE_DURATION_SECS: f32 = 0.3;

/// Duration of the "push to back" animation of a stacked deck.
pub const DECK_PUSH_DURATION_SECS: f32 = 0.25;
