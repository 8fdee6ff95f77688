//! Geometry for editor placement.

/// A positioned box in host coordinates.
///
/// This is the position descriptor the host grid hands to editors: the
/// active cell's box, the grid's box, and the layout box of each container
/// a composite editor mounts into. Edges are stored redundantly with the
/// size so that editors can read whichever form they need.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellBox {
    /// Top edge.
    pub top: f32,
    /// Left edge.
    pub left: f32,
    /// Bottom edge (`top + height`).
    pub bottom: f32,
    /// Right edge (`left + width`).
    pub right: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Whether the box is currently within the visible viewport.
    pub visible: bool,
}

impl CellBox {
    /// Create a visible box from its offset and size.
    #[inline]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            bottom: top + height,
            right: left + width,
            width,
            height,
            visible: true,
        }
    }

    /// Create a box from two corners.
    #[inline]
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Returns the same box with the visibility flag replaced.
    #[inline]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns the box moved by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height).with_visible(self.visible)
    }

    /// Returns the box with the same origin and a new size.
    #[inline]
    pub fn resized(&self, width: f32, height: f32) -> Self {
        Self::new(self.left, self.top, width, height).with_visible(self.visible)
    }

    /// Check if a point lies inside the box (edges inclusive on the top-left).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Returns `true` if the box has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
