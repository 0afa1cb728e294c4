/// Coarse scroll activity as reported by the platform scroll view.
///
/// Distinct from [`GesturePhase`](super::GesturePhase): a scroll view can be
/// decelerating or animating long after the finger lifted. Only `Idle` counts
/// as "settled".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    #[default]
    Idle,
    Tracking,
    Interacting,
    Decelerating,
    Animating,
}

impl ScrollPhase {
    pub fn is_scrolling(self) -> bool {
        !matches!(self, ScrollPhase::Idle)
    }
}
