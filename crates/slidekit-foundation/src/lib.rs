//! Input side of SlideKit: what the external gesture/scroll collaborator feeds
//! into the kernel.
//!
//! - [`PositionSample`]: one scroll/drag position reading.
//! - [`VelocityTracker`]: derives release velocity when the host doesn't.
//! - [`GestureMachine`]: the `Idle → Dragging → Settling` lifecycle.
//! - [`ScrollPhase`]: coarse scroll activity, used to detect "settled".

pub mod gesture;
pub mod gesture_constants;
mod sample;
mod velocity_tracker;

pub use gesture::{GestureEvent, GestureMachine, GesturePhase, PhaseTransition, ScrollPhase};
pub use sample::PositionSample;
pub use velocity_tracker::VelocityTracker;

pub mod prelude {
    pub use crate::gesture::{GestureEvent, GestureMachine, GesturePhase, ScrollPhase};
    pub use crate::gesture_constants::*;
    pub use crate::sample::PositionSample;
    pub use crate::velocity_tracker::VelocityTracker;
}
