//! Seamless infinite scrolling by rebasing the offset one content length at
//! a time.
//!
//! The sequence is laid out once plus a few duplicated items at each end.
//! Whenever the offset leaves `[0, content_extent]` it is shifted by whole
//! content lengths; because the duplicates look identical, nothing visibly
//! moves.

use crate::error::ConfigError;
use crate::metrics::LayoutMetrics;

/// Geometry of a wrapped sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapWindow {
    content_extent: f32,
    lead_duplicate_count: usize,
    trail_duplicate_count: usize,
}

impl WrapWindow {
    /// Rejects windows that could show a seam: content no larger than the
    /// viewport, or fewer duplicates than items fit on screen.
    pub fn new(
        content_extent: f32,
        lead_duplicate_count: usize,
        trail_duplicate_count: usize,
        metrics: &LayoutMetrics,
    ) -> Result<Self, ConfigError> {
        let viewport = metrics.viewport_extent();
        if !content_extent.is_finite() || content_extent <= viewport {
            return Err(ConfigError::WrapContentTooSmall {
                content: content_extent,
                viewport,
            });
        }
        let required = metrics.fully_visible_items();
        let duplicates = lead_duplicate_count.min(trail_duplicate_count);
        if duplicates < required {
            return Err(ConfigError::InsufficientDuplicates {
                duplicates,
                required,
            });
        }
        Ok(Self {
            content_extent,
            lead_duplicate_count,
            trail_duplicate_count,
        })
    }

    /// The whole item sequence, with just enough duplicates to fill the
    /// viewport at either end.
    pub fn for_metrics(metrics: &LayoutMetrics) -> Result<Self, ConfigError> {
        let duplicates = metrics.fully_visible_items();
        Self::new(metrics.content_extent(), duplicates, duplicates, metrics)
    }

    pub fn content_extent(&self) -> f32 {
        self.content_extent
    }

    pub fn lead_duplicate_count(&self) -> usize {
        self.lead_duplicate_count
    }

    pub fn trail_duplicate_count(&self) -> usize {
        self.trail_duplicate_count
    }

    /// Folds `offset` into `[0, content_extent]`; returns the new offset and
    /// the shift that was applied.
    pub fn fold(&self, offset: f32) -> (f32, f32) {
        let content = self.content_extent;
        let shift = if offset > content {
            -content * ((offset / content).ceil() - 1.0)
        } else if offset < 0.0 {
            content * (-offset / content).ceil()
        } else {
            0.0
        };
        (offset + shift, shift)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebaseState {
    #[default]
    Normal,
    /// Only observable from inside `process`.
    Rebasing,
}

/// Result of running one offset through the repositioner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapOutcome {
    pub offset: f32,
    /// Amount added to the incoming offset; the host applies the same shift to
    /// its scroll view so the next sample starts from the rebased position.
    pub shift: f32,
}

impl WrapOutcome {
    pub fn rebased(&self) -> bool {
        self.shift != 0.0
    }
}

#[derive(Debug, Clone)]
pub struct WrapAroundRepositioner {
    window: WrapWindow,
    state: RebaseState,
    rebase_count: u64,
}

impl WrapAroundRepositioner {
    pub fn new(window: WrapWindow) -> Self {
        Self {
            window,
            state: RebaseState::Normal,
            rebase_count: 0,
        }
    }

    pub fn window(&self) -> &WrapWindow {
        &self.window
    }

    pub fn state(&self) -> RebaseState {
        self.state
    }

    /// Rebases performed since construction.
    pub fn rebase_count(&self) -> u64 {
        self.rebase_count
    }

    /// Rebases `offset` if it left the content range. Must run before the
    /// offset is normalized, within the same sample.
    pub fn process(&mut self, offset: f32) -> WrapOutcome {
        if !offset.is_finite() {
            log::warn!("non-finite offset {offset} reached the wrap repositioner");
            return WrapOutcome { offset, shift: 0.0 };
        }
        let (folded, shift) = self.window.fold(offset);
        if shift == 0.0 {
            return WrapOutcome { offset, shift };
        }

        self.state = RebaseState::Rebasing;
        log::debug!(
            "rebasing offset {offset} -> {folded} (content {})",
            self.window.content_extent
        );
        self.rebase_count += 1;
        self.state = RebaseState::Normal;
        WrapOutcome {
            offset: folded,
            shift,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> LayoutMetrics {
        LayoutMetrics::new(100.0, 0.0, 10, 250.0).unwrap()
    }

    fn repositioner() -> WrapAroundRepositioner {
        WrapAroundRepositioner::new(WrapWindow::new(1000.0, 2, 2, &metrics()).unwrap())
    }

    #[test]
    fn crossing_the_end_rebases_to_the_start() {
        let mut wrap = repositioner();
        let outcome = wrap.process(1005.0);
        assert_eq!(outcome.offset, 5.0);
        assert_eq!(outcome.shift, -1000.0);
        assert_eq!(wrap.state(), RebaseState::Normal);
        assert_eq!(wrap.rebase_count(), 1);
    }

    #[test]
    fn crossing_the_start_rebases_to_the_end() {
        let mut wrap = repositioner();
        let outcome = wrap.process(-5.0);
        assert_eq!(outcome.offset, 995.0);
        assert!(outcome.rebased());
    }

    #[test]
    fn in_range_offsets_pass_through() {
        let mut wrap = repositioner();
        for offset in [0.0, 1.0, 500.0, 1000.0] {
            assert_eq!(wrap.process(offset), WrapOutcome { offset, shift: 0.0 });
        }
        assert_eq!(wrap.rebase_count(), 0);
    }

    #[test]
    fn large_jumps_land_in_range_and_stay_congruent() {
        let mut wrap = repositioner();
        for offset in [-12_345.0, -1000.0, 2000.0, 3_500.5, 98_765.0] {
            let outcome = wrap.process(offset);
            assert!((0.0..=1000.0).contains(&outcome.offset), "{offset} -> {outcome:?}");
            let laps = (outcome.offset - offset) / 1000.0;
            assert!((laps - laps.round()).abs() < 1e-3, "{offset} -> {outcome:?}");
        }
    }

    #[test]
    fn window_rejects_seams() {
        let metrics = metrics();
        assert_eq!(
            WrapWindow::new(200.0, 2, 2, &metrics),
            Err(ConfigError::WrapContentTooSmall {
                content: 200.0,
                viewport: 250.0
            })
        );
        assert_eq!(
            WrapWindow::new(1000.0, 2, 1, &metrics),
            Err(ConfigError::InsufficientDuplicates {
                duplicates: 1,
                required: 2
            })
        );
    }

    #[test]
    fn window_from_metrics_duplicates_a_viewport() {
        let window = WrapWindow::for_metrics(&metrics()).unwrap();
        assert_eq!(window.content_extent(), 1000.0);
        assert_eq!(window.lead_duplicate_count(), 2);
    }
}
