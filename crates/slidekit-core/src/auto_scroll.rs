//! Marquee-style auto scrolling on top of the wraparound repositioner.

use slidekit_foundation::ScrollPhase;
use web_time::{Duration, Instant};

use crate::error::ConfigError;
use crate::metrics::LayoutMetrics;
use crate::wrap::{WrapAroundRepositioner, WrapOutcome, WrapWindow};

pub const DEFAULT_STEP: f32 = 0.35;
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Advances a scroll offset by a fixed step per tick while the user is not
/// touching it. Wraps around so it can run forever.
#[derive(Debug, Clone)]
pub struct AutoScroller {
    metrics: LayoutMetrics,
    wrap: WrapAroundRepositioner,
    step: f32,
    interval: Duration,
    offset: f32,
    last_tick: Option<Instant>,
    phase: ScrollPhase,
}

impl AutoScroller {
    pub fn new(metrics: LayoutMetrics) -> Result<Self, ConfigError> {
        let wrap = WrapAroundRepositioner::new(WrapWindow::for_metrics(&metrics)?);
        Ok(Self {
            metrics,
            wrap,
            step: DEFAULT_STEP,
            interval: DEFAULT_TICK_INTERVAL,
            offset: 0.0,
            last_tick: None,
            phase: ScrollPhase::Idle,
        })
    }

    pub fn with_step(mut self, step: f32, interval: Duration) -> Self {
        self.step = step;
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Takes over the offset the user left behind, so scrolling resumes
    /// from there instead of jumping back.
    pub fn sync_offset(&mut self, offset: f32) -> WrapOutcome {
        let outcome = self.wrap.process(offset);
        if outcome.offset.is_finite() {
            self.offset = outcome.offset;
        }
        outcome
    }

    /// Pauses while the user interacts; the next tick after that starts a
    /// fresh interval.
    pub fn on_phase_change(&mut self, phase: ScrollPhase) {
        if matches!(phase, ScrollPhase::Interacting | ScrollPhase::Tracking) {
            self.last_tick = None;
        }
        self.phase = phase;
    }

    fn is_paused(&self) -> bool {
        matches!(self.phase, ScrollPhase::Interacting | ScrollPhase::Tracking)
    }

    /// Advances by one step for every whole interval elapsed since the last
    /// tick. Returns the (wrapped) offset to scroll to, or `None` when
    /// paused or no interval has elapsed yet.
    pub fn tick(&mut self, now: Instant) -> Option<WrapOutcome> {
        if self.is_paused() {
            return None;
        }
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return None;
        };
        let elapsed = now.saturating_duration_since(last);
        let steps = (elapsed.as_nanos() / self.interval.as_nanos()) as u32;
        if steps == 0 {
            return None;
        }
        self.last_tick = Some(last + self.interval * steps);
        Some(self.sync_offset(self.offset + self.step * steps as f32))
    }

    /// The item nearest the current offset.
    pub fn current_item(&self) -> usize {
        let count = self.metrics.item_count();
        if count == 0 {
            return 0;
        }
        let nearest = (self.offset / self.metrics.stride()).round() as i64;
        nearest.rem_euclid(count as i64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller() -> AutoScroller {
        let metrics = LayoutMetrics::new(210.0, 10.0, 5, 400.0).unwrap();
        AutoScroller::new(metrics).unwrap()
    }

    #[test]
    fn advances_one_step_per_interval() {
        let mut scroller = scroller();
        let start = Instant::now();
        assert_eq!(scroller.tick(start), None);
        assert_eq!(scroller.tick(start + Duration::from_millis(4)), None);

        let outcome = scroller.tick(start + Duration::from_millis(35)).unwrap();
        assert!((outcome.offset - 1.05).abs() < 1e-4);

        // The 5ms remainder carries over to the next tick.
        let outcome = scroller.tick(start + Duration::from_millis(40)).unwrap();
        assert!((outcome.offset - 1.4).abs() < 1e-4);
    }

    #[test]
    fn pauses_while_the_user_drags() {
        let mut scroller = scroller();
        let start = Instant::now();
        scroller.tick(start);
        scroller.on_phase_change(ScrollPhase::Interacting);
        assert_eq!(scroller.tick(start + Duration::from_millis(500)), None);

        scroller.sync_offset(400.0);
        scroller.on_phase_change(ScrollPhase::Idle);
        scroller.tick(start + Duration::from_millis(500));
        let outcome = scroller.tick(start + Duration::from_millis(510)).unwrap();
        assert!((outcome.offset - 400.35).abs() < 1e-3);
    }

    #[test]
    fn wraps_past_the_content_end() {
        let mut scroller = scroller();
        scroller.sync_offset(1099.9);
        let start = Instant::now();
        scroller.tick(start);
        let outcome = scroller.tick(start + Duration::from_millis(10)).unwrap();
        assert!(outcome.rebased());
        assert!(outcome.offset < 1.0);
        assert_eq!(scroller.current_item(), 0);
    }

    #[test]
    fn reports_the_nearest_item() {
        let mut scroller = scroller();
        scroller.sync_offset(330.0);
        assert_eq!(scroller.current_item(), 2);
        scroller.sync_offset(320.0);
        assert_eq!(scroller.current_item(), 1);
    }
}
