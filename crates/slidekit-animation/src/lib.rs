//! Animation requests for SlideKit
//!
//! The kernel never animates anything itself: it emits a target plus an
//! [`AnimationType`] and lets the rendering side interpolate. This crate holds
//! those request types, the easing curves they reference, a frame-sampled
//! [`Transition`] for hosts (and tests) that want a ready-made driver, and the
//! spline-based fling decay used to project flick velocity into distance.

mod animation;
mod decay_spec;

pub use animation::*;
pub use decay_spec::*;

pub mod prelude {
    pub use crate::animation::{AnimationType, Easing, Lerp, SpringSpec, Transition, TweenSpec};
    pub use crate::decay_spec::{DecaySpec, FlingCalculator, SplineDecay};
}
