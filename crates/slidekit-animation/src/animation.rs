//! Easing curves, animation specs and a frame-driven transition sampler.

use std::f32::consts::TAU;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// A cubic bezier timing curve anchored at (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Evaluates the curve's y for the given x fraction.
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        let (ax, bx, cx) = coefficients(self.x1, self.x2);
        let (ay, by, cy) = coefficients(self.y1, self.y2);
        let t = solve_parameter(ax, bx, cx, fraction);
        sample_curve(ay, by, cy, t)
    }
}

fn coefficients(p1: f32, p2: f32) -> (f32, f32, f32) {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (a, b, c)
}

fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
    ((a * t + b) * t + c) * t
}

fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
    (3.0 * a * t + 2.0 * b) * t + c
}

/// Finds the curve parameter whose x equals `x`: Newton-Raphson first,
/// bisection when the derivative flattens out.
fn solve_parameter(a: f32, b: f32, c: f32, x: f32) -> f32 {
    let mut t = x;
    for _ in 0..8 {
        let error = sample_curve(a, b, c, t) - x;
        if error.abs() < 1e-6 {
            return t;
        }
        let slope = sample_derivative(a, b, c, t);
        if slope.abs() < 1e-6 {
            break;
        }
        t = (t - error / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    t = x;
    for _ in 0..16 {
        let error = sample_curve(a, b, c, t) - x;
        if error.abs() < 1e-6 {
            break;
        }
        if error > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
        t = 0.5 * (lo + hi);
    }
    t
}

/// Named easing curves a settle request can ask for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material "standard" curve.
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
    Custom(CubicBezier),
}

impl Easing {
    const EASE_IN: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
    const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
    const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
    const FAST_OUT_SLOW_IN: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);
    const LINEAR_OUT_SLOW_IN: CubicBezier = CubicBezier::new(0.0, 0.0, 0.2, 1.0);
    const FAST_OUT_LINEAR_IN: CubicBezier = CubicBezier::new(0.4, 0.0, 1.0, 1.0);

    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => Self::EASE_IN.transform(fraction),
            Easing::EaseOut => Self::EASE_OUT.transform(fraction),
            Easing::EaseInOut => Self::EASE_IN_OUT.transform(fraction),
            Easing::FastOutSlowIn => Self::FAST_OUT_SLOW_IN.transform(fraction),
            Easing::LinearOutSlowIn => Self::LINEAR_OUT_SLOW_IN.transform(fraction),
            Easing::FastOutLinearIn => Self::FAST_OUT_LINEAR_IN.transform(fraction),
            Easing::Custom(curve) => curve.transform(fraction),
        }
    }
}

/// Time-based animation: duration, easing and an optional start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl TweenSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(300, Easing::FastOutSlowIn)
    }
}

/// Spring animation configuration.
///
/// Thresholds are expressed in progress units (0 = start, 1 = target), so the
/// same spec settles identically for a 10pt and a 1000pt move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 bounces, > 1.0 creeps.
    pub damping_ratio: f32,
    pub stiffness: f32,
    pub velocity_threshold: f32,
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Critically damped spring whose natural period equals `duration_secs`.
    ///
    /// This is the "smooth" curve the carousels request for snapping cards
    /// back into place: no overshoot, settles in roughly the given time.
    pub fn smooth(duration_secs: f32) -> Self {
        Self::with_response(duration_secs, 1.0)
    }

    /// Under-damped variant of [`SpringSpec::smooth`].
    pub fn bouncy(duration_secs: f32) -> Self {
        Self::with_response(duration_secs, 0.7)
    }

    pub fn stiff() -> Self {
        Self::new(1.0, 3000.0)
    }

    fn with_response(duration_secs: f32, damping_ratio: f32) -> Self {
        let response = duration_secs.max(f32::EPSILON);
        let angular = TAU / response;
        Self::new(damping_ratio, angular * angular)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(1.0, 1500.0)
    }
}

/// How a target change should be animated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(TweenSpec),
    Spring(SpringSpec),
    /// Jump straight to the target in the same frame.
    Snap,
}

impl AnimationType {
    pub fn smooth(duration_secs: f32) -> Self {
        AnimationType::Spring(SpringSpec::smooth(duration_secs))
    }

    pub fn is_snap(&self) -> bool {
        matches!(self, AnimationType::Snap)
    }
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(TweenSpec::default())
    }
}

/// Output of one [`Transition::sample`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionFrame {
    pub value: f32,
    pub finished: bool,
}

/// Longest step the spring integrator takes; keeps it stable on slow frames.
const SPRING_STEP_SECS: f32 = 0.016;

/// Samples a scalar animation against externally supplied frame times.
///
/// The first sampled frame defines the start time. Hosts call [`sample`]
/// once per rendered frame and stop once `finished` is reported.
///
/// [`sample`]: Transition::sample
#[derive(Debug, Clone)]
pub struct Transition {
    from: f32,
    to: f32,
    animation: AnimationType,
    start_nanos: Option<u64>,
    last_nanos: Option<u64>,
    progress: f32,
    velocity: f32,
    finished: bool,
}

impl Transition {
    pub fn new(from: f32, to: f32, animation: AnimationType) -> Self {
        Self {
            from,
            to,
            animation,
            start_nanos: None,
            last_nanos: None,
            progress: 0.0,
            velocity: 0.0,
            finished: false,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn value(&self) -> f32 {
        if self.finished {
            self.to
        } else {
            self.from.lerp(&self.to, self.progress)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances the transition to `frame_time_nanos` and returns the value.
    pub fn sample(&mut self, frame_time_nanos: u64) -> TransitionFrame {
        if !self.finished {
            let start = *self.start_nanos.get_or_insert(frame_time_nanos);
            match self.animation {
                AnimationType::Snap => self.finish(),
                AnimationType::Tween(spec) => self.step_tween(spec, start, frame_time_nanos),
                AnimationType::Spring(spec) => self.step_spring(spec, frame_time_nanos),
            }
            self.last_nanos = Some(frame_time_nanos);
        }
        TransitionFrame {
            value: self.value(),
            finished: self.finished,
        }
    }

    fn step_tween(&mut self, spec: TweenSpec, start: u64, now: u64) {
        let elapsed = now.saturating_sub(start);
        let delay = spec.delay_millis * 1_000_000;
        if elapsed < delay {
            return;
        }
        let duration = (spec.duration_millis * 1_000_000).max(1);
        let linear = ((elapsed - delay) as f32 / duration as f32).clamp(0.0, 1.0);
        self.progress = spec.easing.transform(linear);
        if linear >= 1.0 {
            self.finish();
        }
    }

    fn step_spring(&mut self, spec: SpringSpec, now: u64) {
        let Some(last) = self.last_nanos else {
            return;
        };
        let dt = now.saturating_sub(last) as f32 / 1_000_000_000.0;
        if dt <= 0.0 {
            return;
        }

        // Semi-implicit Euler on the normalized displacement, target at 1.0.
        let damping = 2.0 * spec.damping_ratio * spec.stiffness.sqrt();
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(SPRING_STEP_SECS);
            let displacement = self.progress - 1.0;
            let force = -spec.stiffness * displacement - damping * self.velocity;
            self.velocity += force * step;
            self.progress = (self.progress + self.velocity * step).clamp(-1.0, 2.0);
            remaining -= step;
        }

        let at_rest = self.velocity.abs() < spec.velocity_threshold;
        let near_target = (self.progress - 1.0).abs() < spec.position_threshold;
        if at_rest && near_target {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.progress = 1.0;
        self.velocity = 0.0;
        self.finished = true;
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
