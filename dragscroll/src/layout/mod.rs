mod flex;
mod rect;

use std::collections::HashMap;

pub use flex::layout;
pub use rect::Rect;

/// Geometry of a clipping container, recorded during layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportLayout {
    /// Visible area inside the border.
    pub inner: Rect,
    pub content_width: u16,
    pub content_height: u16,
    /// Whole-cell scroll offset the children were placed with.
    pub scroll_x: u16,
    pub scroll_y: u16,
}

/// Rects of every laid-out element, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    rects: HashMap<String, Rect>,
    viewports: HashMap<String, ViewportLayout>,
}

impl LayoutResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Rect> {
        self.rects.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        self.rects.insert(id.into(), rect);
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Record the visible area and content extent of a clipping container.
    pub fn insert_viewport(&mut self, id: impl Into<String>, viewport: ViewportLayout) {
        self.viewports.insert(id.into(), viewport);
    }

    pub fn viewport(&self, id: &str) -> Option<&ViewportLayout> {
        self.viewports.get(id)
    }

    pub fn viewports(&self) -> impl Iterator<Item = (&String, &ViewportLayout)> {
        self.viewports.iter()
    }
}
