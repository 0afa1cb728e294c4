//! Paging-style infinite carousel with one sentinel copy at each end.
//!
//! Layout is `[last, 0, 1, .., count-1, first]`. The copies carry the logical
//! ids `-1` and `count`; once scrolling comes to rest on one of them the pager
//! jumps, without animation, to the real item it duplicates.

use slidekit_animation::AnimationType;
use slidekit_foundation::ScrollPhase;

/// A jump the host must apply to its scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retarget {
    pub from: i64,
    pub to: i64,
    pub animation: AnimationType,
}

#[derive(Debug, Clone)]
pub struct SentinelPager {
    count: usize,
    position: i64,
    phase: ScrollPhase,
}

impl SentinelPager {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            position: 0,
            phase: ScrollPhase::Idle,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Logical id of the page the host reports as current.
    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Logical ids in layout order, sentinels included.
    pub fn layout_ids(&self) -> impl Iterator<Item = i64> {
        let count = self.count as i64;
        if count == 0 {
            0..0
        } else {
            -1..count + 1
        }
    }

    pub fn is_sentinel(&self, id: i64) -> bool {
        self.count > 0 && (id == -1 || id == self.count as i64)
    }

    /// The real item whose content the page `id` shows.
    pub fn content_index(&self, id: i64) -> usize {
        if self.count == 0 {
            return 0;
        }
        id.rem_euclid(self.count as i64) as usize
    }

    /// Scroll offset of page `id` when every page is `page_extent` wide.
    pub fn offset_for(&self, id: i64, page_extent: f32) -> f32 {
        (id + 1) as f32 * page_extent
    }

    /// Nearest logical id to a scroll offset.
    pub fn id_at_offset(&self, offset: f32, page_extent: f32) -> i64 {
        if !(offset / page_extent).is_finite() {
            return self.position;
        }
        let max = self.count as i64;
        ((offset / page_extent).round() as i64 - 1).clamp(-1, max)
    }

    pub fn set_position(&mut self, id: i64) {
        self.position = id;
    }

    /// Reports a scroll phase change. Coming to rest on a sentinel yields the
    /// jump to the real item; every other change yields nothing.
    pub fn on_phase_change(&mut self, phase: ScrollPhase) -> Option<Retarget> {
        let was_scrolling = self.phase.is_scrolling();
        self.phase = phase;
        if phase != ScrollPhase::Idle || !was_scrolling || !self.is_sentinel(self.position) {
            return None;
        }

        let to = if self.position == -1 {
            self.count as i64 - 1
        } else {
            0
        };
        let retarget = Retarget {
            from: self.position,
            to,
            animation: AnimationType::Snap,
        };
        log::debug!("sentinel {} settled; jumping to {}", retarget.from, to);
        self.position = to;
        Some(retarget)
    }
}
