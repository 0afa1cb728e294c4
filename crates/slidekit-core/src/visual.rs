//! Render parameters: what the rendering collaborator applies to each item.

use slidekit_geometry::{Anchor, Point};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationAxis {
    /// 3D rotation around the vertical axis (card flips, deck tilt).
    Y,
    /// Plain 2D rotation in the screen plane.
    #[default]
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub degrees: f32,
    pub axis: RotationAxis,
}

impl Rotation {
    pub const NONE: Rotation = Rotation {
        degrees: 0.0,
        axis: RotationAxis::Z,
    };

    pub fn y(degrees: f32) -> Self {
        Self {
            degrees,
            axis: RotationAxis::Y,
        }
    }

    pub fn z(degrees: f32) -> Self {
        Self {
            degrees,
            axis: RotationAxis::Z,
        }
    }
}

/// Transform parameters for one item in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f32,
    pub scale: f32,
    pub translation: Point,
    pub rotation: Rotation,
    /// Pivot for `scale` and `rotation`.
    pub anchor: Anchor,
    /// Main-axis size override (indicator dot width, coverflow card width).
    pub extent: Option<f32>,
    /// Offset of the item's inner content relative to its frame (parallax).
    pub content_offset: Point,
    /// Gaussian blur radius in points.
    pub blur: f32,
    /// Stacking order; higher draws on top.
    pub z_index: f32,
}

impl VisualState {
    pub const IDENTITY: VisualState = VisualState {
        opacity: 1.0,
        scale: 1.0,
        translation: Point::ZERO,
        rotation: Rotation::NONE,
        anchor: Anchor::Center,
        extent: None,
        content_offset: Point::ZERO,
        blur: 0.0,
        z_index: 0.0,
    };

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_translation(mut self, translation: Point) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_extent(mut self, extent: f32) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.scale > 0.0
    }

    /// Clamps opacity into `[0, 1]` and scale to be non-negative.
    pub(crate) fn sanitized(mut self) -> Self {
        self.opacity = self.opacity.clamp(0.0, 1.0);
        self.scale = self.scale.max(0.0);
        self.blur = self.blur.max(0.0);
        self
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemVisual {
    pub index: i64,
    pub state: VisualState,
}

/// Visual states for one processed sample.
///
/// Only the items in the active window are listed explicitly; every index
/// below the window shows `before`, every index above it shows `after`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub items: SmallVec<[ItemVisual; 8]>,
    pub before: VisualState,
    pub after: VisualState,
}

impl Frame {
    pub fn empty() -> Self {
        Self {
            items: SmallVec::new(),
            before: VisualState::IDENTITY,
            after: VisualState::IDENTITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Resolved state of any item index, listed or not.
    pub fn state_of(&self, index: i64) -> VisualState {
        if let Some(item) = self.items.iter().find(|item| item.index == index) {
            return item.state;
        }
        match self.items.first() {
            Some(first) if index < first.index => self.before,
            _ => self.after,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::empty()
    }
}
