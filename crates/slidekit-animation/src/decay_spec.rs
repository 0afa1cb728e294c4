//! Fling decay: how far a flick travels before friction stops it.
//!
//! Spline-based deceleration curve with a physical friction model. The gesture
//! commit logic uses [`DecaySpec::projected_distance`] to turn release velocity
//! into an equivalent displacement.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const SAMPLE_COUNT: usize = 100;

/// Distance fraction travelled at evenly spaced time fractions.
static SPLINE_POSITIONS: LazyLock<[f32; SAMPLE_COUNT + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; SAMPLE_COUNT + 1];
    let mut x_min = 0.0f32;

    for (i, slot) in positions.iter_mut().enumerate().take(SAMPLE_COUNT) {
        let alpha = i as f32 / SAMPLE_COUNT as f32;
        let mut x_max = 1.0f32;
        // Bisect for the x whose tension curve reaches alpha.
        let (x, coef) = loop {
            let x_mid = x_min + (x_max - x_min) / 2.0;
            let coef = 3.0 * x_mid * (1.0 - x_mid);
            let tx = coef * ((1.0 - x_mid) * P1 + x_mid * P2) + x_mid * x_mid * x_mid;
            if (tx - alpha).abs() < 1e-5 {
                break (x_mid, coef);
            }
            if tx > alpha {
                x_max = x_mid;
            } else {
                x_min = x_mid;
            }
        };
        *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
    }

    positions[SAMPLE_COUNT] = 1.0;
    positions
});

/// Distance and velocity coefficients at one point of the fling spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    /// Fraction of the total distance covered, 0..=1.
    pub distance: f32,
    /// Instantaneous slope of the distance curve.
    pub velocity: f32,
}

/// Samples the spline at a time fraction in `[0, 1]`.
pub fn fling_spline(time_fraction: f32) -> SplineSample {
    let t = time_fraction.clamp(0.0, 1.0);
    let index = (SAMPLE_COUNT as f32 * t) as usize;
    if index >= SAMPLE_COUNT {
        return SplineSample {
            distance: 1.0,
            velocity: 0.0,
        };
    }
    let t_inf = index as f32 / SAMPLE_COUNT as f32;
    let t_sup = (index + 1) as f32 / SAMPLE_COUNT as f32;
    let d_inf = SPLINE_POSITIONS[index];
    let d_sup = SPLINE_POSITIONS[index + 1];
    let velocity = (d_sup - d_inf) / (t_sup - t_inf);
    SplineSample {
        distance: d_inf + (t - t_inf) * velocity,
        velocity,
    }
}

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// `|ln(0.78) / ln(0.9)|`
const DECELERATION_RATE: f64 = 2.358_201_6;

/// Friction-based fling distance and duration for a given density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// `density` is the logical-to-physical pixel ratio of the display.
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84,
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        let friction = (self.friction * self.physical_coefficient) as f64;
        (INFLECTION as f64 * velocity.abs() as f64 / friction).ln()
    }

    /// Fling duration in milliseconds; zero for a motionless release.
    pub fn duration_millis(&self, velocity: f32) -> i64 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0;
        }
        let l = self.spline_deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as i64
    }

    /// Unsigned distance the fling covers before stopping.
    pub fn distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 || !velocity.is_finite() {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        let scale = (self.friction * self.physical_coefficient) as f64;
        (scale * (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l).exp()) as f32
    }
}

/// A decay curve: starts at a velocity and slows to rest.
pub trait DecaySpec {
    /// Signed distance travelled from release to rest.
    fn projected_distance(&self, initial_velocity: f32) -> f32;

    /// Offset from the release point after `play_time_nanos`.
    fn offset_at(&self, play_time_nanos: i64, initial_velocity: f32) -> f32;

    fn duration_nanos(&self, initial_velocity: f32) -> i64;
}

/// Spline decay tuned to feel like a native platform fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineDecay {
    calculator: FlingCalculator,
}

impl SplineDecay {
    pub fn new(density: f32) -> Self {
        Self {
            calculator: FlingCalculator::with_density(density),
        }
    }

    pub fn with_calculator(calculator: FlingCalculator) -> Self {
        Self { calculator }
    }
}

impl DecaySpec for SplineDecay {
    fn projected_distance(&self, initial_velocity: f32) -> f32 {
        self.calculator.distance(initial_velocity) * initial_velocity.signum()
    }

    fn offset_at(&self, play_time_nanos: i64, initial_velocity: f32) -> f32 {
        let duration_ms = self.calculator.duration_millis(initial_velocity);
        if duration_ms <= 0 {
            return 0.0;
        }
        let time_fraction = (play_time_nanos / 1_000_000) as f32 / duration_ms as f32;
        self.projected_distance(initial_velocity) * fling_spline(time_fraction).distance
    }

    fn duration_nanos(&self, initial_velocity: f32) -> i64 {
        self.calculator.duration_millis(initial_velocity) * 1_000_000
    }
}
