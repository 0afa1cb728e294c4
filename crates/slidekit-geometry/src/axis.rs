use crate::Point;

/// Scroll axis of a carousel or list.
///
/// Every transform is computed in "main axis" units and projected onto a
/// `Point` at the very end, so horizontal and vertical variants share the
/// same math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Leading to trailing.
    #[default]
    Horizontal,

    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Returns true if this is the horizontal axis.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    /// Returns true if this is the vertical axis.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    /// A point displaced by `amount` along this axis.
    #[inline]
    pub fn along(self, amount: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(amount, 0.0),
            Axis::Vertical => Point::new(0.0, amount),
        }
    }

    /// Component of `point` on this axis.
    #[inline]
    pub fn component(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }
}
