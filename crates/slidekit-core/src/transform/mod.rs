//! Progress to per-item render parameters.
//!
//! Every carousel variant is the same pipeline with a different
//! [`TransformKind`]: the kind decides what an item looks like at a given
//! distance from the active pair, and how many items around the pair need
//! explicit states. Everything else shares one rest state per side.

mod circular;
mod coverflow;
mod depth;
mod pair;
mod parallax;
mod tilt;

pub use circular::CircularTransform;
pub use coverflow::CoverflowTransform;
pub use depth::DepthTransform;
pub use pair::{ChannelPair, PairTransform, INDICATOR_DOT_EXTENT, INDICATOR_SPACING};
pub use parallax::ParallaxTransform;
pub use tilt::TiltTransform;

use smallvec::SmallVec;

use crate::config::PagerConfig;
use crate::error::ConfigError;
use crate::index::ActivePair;
use crate::visual::{Frame, ItemVisual, VisualState};

#[derive(Debug, Clone, PartialEq)]
pub enum TransformKind {
    /// Paging indicators: only the active and next item interpolate.
    Pair(PairTransform),
    /// Stacked deck or stacked scroll view.
    Depth(DepthTransform),
    Coverflow(CoverflowTransform),
    /// Vertical wheel.
    Circular(CircularTransform),
    Parallax(ParallaxTransform),
    Tilt(TiltTransform),
}

impl TransformKind {
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Pair(_) => "pair",
            TransformKind::Depth(_) => "depth",
            TransformKind::Coverflow(_) => "coverflow",
            TransformKind::Circular(_) => "circular",
            TransformKind::Parallax(_) => "parallax",
            TransformKind::Tilt(_) => "tilt",
        }
    }

    /// Overrides the settings a pager config also carries: scroll axis,
    /// opacity effect and the depth of stacked kinds.
    pub fn configured(self, config: &PagerConfig) -> Result<Self, ConfigError> {
        let axis = config.axis;
        let depth = config.visible_cards_count;
        Ok(match self {
            TransformKind::Pair(pair) => {
                TransformKind::Pair(pair.with_opacity_effect(config.opacity_effect))
            }
            TransformKind::Depth(stack) => {
                TransformKind::Depth(stack.with_max_depth(depth)?.with_axis(axis))
            }
            TransformKind::Coverflow(coverflow) => {
                let mut coverflow = coverflow.with_max_depth(depth)?;
                coverflow.axis = axis;
                TransformKind::Coverflow(coverflow)
            }
            TransformKind::Circular(mut circular) => {
                circular.axis = axis;
                TransformKind::Circular(circular)
            }
            TransformKind::Parallax(mut parallax) => {
                parallax.axis = axis;
                TransformKind::Parallax(parallax)
            }
            TransformKind::Tilt(mut tilt) => {
                tilt.axis = axis;
                TransformKind::Tilt(tilt)
            }
        })
    }

    /// Items listed explicitly behind `active_index` and beyond `next_index`.
    pub fn window(&self) -> (usize, usize) {
        match self {
            TransformKind::Pair(_) => (0, 0),
            TransformKind::Depth(depth) => (1, depth.max_depth + 1),
            TransformKind::Coverflow(coverflow) => (coverflow.max_depth, coverflow.max_depth),
            TransformKind::Circular(circular) => {
                let reach = circular.max_distance.ceil().max(0.0) as usize;
                (reach, reach)
            }
            TransformKind::Parallax(_) | TransformKind::Tilt(_) => (1, 1),
        }
    }

    /// State of every item below the window.
    pub fn rest_before(&self) -> VisualState {
        match self {
            TransformKind::Pair(pair) => pair.rest,
            TransformKind::Depth(depth) => depth.map_distance(0, -1.0),
            TransformKind::Coverflow(coverflow) => {
                coverflow.map_distance(-(coverflow.max_depth as f32))
            }
            TransformKind::Circular(circular) => {
                circular.map_distance(-circular.max_distance).with_opacity(0.0)
            }
            TransformKind::Parallax(parallax) => parallax.map_distance(-1.0),
            TransformKind::Tilt(tilt) => tilt.map_distance(-1.0),
        }
    }

    /// State of every item above the window.
    pub fn rest_after(&self) -> VisualState {
        match self {
            TransformKind::Pair(pair) => pair.rest,
            TransformKind::Depth(depth) => {
                let held = depth.map_distance(0, depth.max_depth as f32);
                // A collapsed stack hides everything past its depth under the
                // last visible card.
                if depth.collapse_stride.is_some() {
                    held.with_opacity(0.0)
                } else {
                    held
                }
            }
            TransformKind::Coverflow(coverflow) => {
                coverflow.map_distance(coverflow.max_depth as f32)
            }
            TransformKind::Circular(circular) => {
                circular.map_distance(circular.max_distance).with_opacity(0.0)
            }
            TransformKind::Parallax(parallax) => parallax.map_distance(1.0),
            TransformKind::Tilt(tilt) => tilt.map_distance(1.0),
        }
    }

    /// State of item `index` for the given pair.
    pub fn map_item(&self, index: i64, pair: &ActivePair) -> VisualState {
        let distance = index as f32 - pair.progress();
        let state = match self {
            TransformKind::Pair(transform) => transform.map_item(index, pair),
            TransformKind::Depth(depth) => depth.map_distance(index, distance),
            TransformKind::Coverflow(coverflow) => coverflow.map_distance(distance),
            TransformKind::Circular(circular) => circular.map_distance(distance),
            TransformKind::Parallax(parallax) => parallax.map_distance(distance),
            TransformKind::Tilt(tilt) => tilt.map_distance(distance),
        };
        state.sanitized()
    }
}

/// Maps resolved pairs to frames with one [`TransformKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransformMapper {
    kind: TransformKind,
}

impl TransformMapper {
    pub fn new(kind: TransformKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &TransformKind {
        &self.kind
    }

    pub fn map_item(&self, index: i64, pair: &ActivePair) -> VisualState {
        self.kind.map_item(index, pair)
    }

    /// Explicit states for the window around `pair`, clamped to
    /// `[0, item_count)`. The window never collapses to nothing while there
    /// are items, even when progress overscrolls far past either end.
    pub fn map_frame(&self, pair: &ActivePair, item_count: usize) -> Frame {
        if item_count == 0 {
            return Frame::empty();
        }
        let last = item_count as i64 - 1;
        let (behind, ahead) = self.kind.window();
        let low = (pair.active_index - behind as i64).clamp(0, last);
        let high = (pair.next_index + ahead as i64).clamp(0, last);

        let items: SmallVec<[ItemVisual; 8]> = (low..=high)
            .map(|index| ItemVisual {
                index,
                state: self.kind.map_item(index, pair),
            })
            .collect();
        Frame {
            items,
            before: self.kind.rest_before(),
            after: self.kind.rest_after(),
        }
    }

    /// Like [`map_frame`](Self::map_frame) for a looping sequence: window
    /// indices wrap modulo `item_count`, so the item after the last one is
    /// item 0. Items outside the window show the far rest state.
    pub fn map_frame_looping(&self, pair: &ActivePair, item_count: usize) -> Frame {
        if item_count == 0 {
            return Frame::empty();
        }
        let count = item_count as i64;
        let (behind, ahead) = self.kind.window();
        let progress = pair.progress();
        let mut candidates: SmallVec<[i64; 8]> =
            (pair.active_index - behind as i64..=pair.next_index + ahead as i64).collect();
        // A short sequence can't fill the window; the nearest copy of each item wins.
        candidates.sort_by(|a, b| {
            (*a as f32 - progress)
                .abs()
                .total_cmp(&(*b as f32 - progress).abs())
        });

        let mut items: SmallVec<[ItemVisual; 8]> = SmallVec::new();
        for virtual_index in candidates {
            let wrapped = virtual_index.rem_euclid(count);
            if items.iter().any(|item| item.index == wrapped) {
                continue;
            }
            // Shift the pair instead of the index so distances keep their sign.
            let shift = wrapped - virtual_index;
            let shifted = ActivePair {
                active_index: pair.active_index + shift,
                next_index: pair.next_index + shift,
                fraction: pair.fraction,
            };
            items.push(ItemVisual {
                index: wrapped,
                state: self.kind.map_item(wrapped, &shifted),
            });
        }
        items.sort_by_key(|item| item.index);

        let rest = self.kind.rest_after();
        Frame {
            items,
            before: rest,
            after: rest,
        }
    }
}

#[cfg(test)]
#[path = "../tests/transform_tests.rs"]
mod tests;
