//! Layout measurements the kernel divides by.

use crate::error::{positive_extent, ConfigError};

/// Item geometry along the scroll axis, validated once per layout pass.
///
/// `item_extent > 0` and `spacing >= 0`, so [`stride`](Self::stride) is never
/// zero and nothing downstream needs a division guard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    item_extent: f32,
    spacing: f32,
    item_count: usize,
    viewport_extent: f32,
}

impl LayoutMetrics {
    pub fn new(
        item_extent: f32,
        spacing: f32,
        item_count: usize,
        viewport_extent: f32,
    ) -> Result<Self, ConfigError> {
        let item_extent = positive_extent("item extent", item_extent)?;
        let viewport_extent = positive_extent("viewport extent", viewport_extent)?;
        if !spacing.is_finite() || spacing < 0.0 {
            return Err(ConfigError::NegativeSpacing { value: spacing });
        }
        Ok(Self {
            item_extent,
            spacing,
            item_count,
            viewport_extent,
        })
    }

    /// Metrics for a full-width pager: each item fills the viewport.
    pub fn paged(viewport_extent: f32, item_count: usize) -> Result<Self, ConfigError> {
        Self::new(viewport_extent, 0.0, item_count, viewport_extent)
    }

    pub fn item_extent(&self) -> f32 {
        self.item_extent
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn viewport_extent(&self) -> f32 {
        self.viewport_extent
    }

    pub fn with_item_count(self, item_count: usize) -> Self {
        Self { item_count, ..self }
    }

    /// Distance between the leading edges of two neighbouring items.
    pub fn stride(&self) -> f32 {
        self.item_extent + self.spacing
    }

    pub fn max_progress(&self) -> f32 {
        self.item_count.saturating_sub(1) as f32
    }

    pub fn content_extent(&self) -> f32 {
        self.item_count as f32 * self.stride()
    }

    pub fn fully_visible_items(&self) -> usize {
        (self.viewport_extent / self.stride()).floor() as usize
    }

    pub fn offset_for_index(&self, index: i64) -> f32 {
        index as f32 * self.stride()
    }
}

/// Number of whole pages a paged scroll view of `content_extent` holds.
///
/// Partial trailing pages do not count; a degenerate viewport yields 0.
pub fn page_count_for(content_extent: f32, viewport_extent: f32) -> usize {
    if viewport_extent.is_nan() || viewport_extent <= 0.0 {
        return 0;
    }
    if !content_extent.is_finite() || content_extent <= 0.0 {
        return 0;
    }
    (content_extent / viewport_extent).floor() as usize
}

/// Checks that a labelled indicator has exactly one label per page.
pub fn check_label_count(
    labels: usize,
    content_extent: f32,
    viewport_extent: f32,
) -> Result<usize, ConfigError> {
    let pages = page_count_for(content_extent, viewport_extent);
    if labels == pages {
        Ok(pages)
    } else {
        Err(ConfigError::LabelCountMismatch { labels, pages })
    }
}
