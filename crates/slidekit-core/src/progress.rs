//! Raw offset to item-unit progress.

use slidekit_foundation::PositionSample;

use crate::metrics::LayoutMetrics;

/// Position measured in items: `1.5` is halfway between item 1 and item 2.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(pub f32);

impl Progress {
    pub const ZERO: Progress = Progress(0.0);

    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<Progress> for f32 {
    fn from(progress: Progress) -> f32 {
        progress.0
    }
}

/// Converts `sample.offset` into progress.
///
/// With `clip` the result is kept in `[0, item_count - 1]` so edges never
/// overscroll visually; without it progress is free and may leave the range
/// (rubber-banding, wraparound). No items always means progress 0.
pub fn normalize(sample: &PositionSample, metrics: &LayoutMetrics, clip: bool) -> Progress {
    normalize_offset(sample.offset, metrics, clip)
}

pub fn normalize_offset(offset: f32, metrics: &LayoutMetrics, clip: bool) -> Progress {
    if metrics.item_count() == 0 {
        return Progress::ZERO;
    }
    if !offset.is_finite() {
        log::warn!("non-finite scroll offset {offset}; treating as progress 0");
        return Progress::ZERO;
    }
    let raw = offset / metrics.stride();
    if clip {
        Progress(raw.clamp(0.0, metrics.max_progress()))
    } else {
        Progress(raw)
    }
}
