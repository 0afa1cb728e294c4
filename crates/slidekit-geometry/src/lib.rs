//! Pure math for SlideKit
//!
//! Points, sizes, anchors and the scroll axis. Nothing here knows about
//! progress or gestures; the kernel crates build on these types.

mod axis;
mod geometry;

pub use axis::*;
pub use geometry::*;

pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::geometry::{Anchor, Point, Size};
}
