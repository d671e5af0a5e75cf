use std::collections::HashMap;

use crate::element::{find_element, Content, Element};
use crate::layout::LayoutResult;
use crate::types::Overflow;

/// Scroll offset of a viewport. Fractional like DOM scroll offsets; layout floors it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

impl ScrollOffset {
    pub const ZERO: ScrollOffset = ScrollOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What a viewport can scroll: its visible size, its content size, and which
/// axes are allowed to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub viewport_width: u16,
    pub viewport_height: u16,
    pub content_width: u16,
    pub content_height: u16,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
}

impl ScrollMetrics {
    /// Largest horizontal offset; zero on axes that can't scroll.
    pub fn max_x(&self) -> f32 {
        if self.overflow_x.is_scrollable() {
            self.content_width.saturating_sub(self.viewport_width) as f32
        } else {
            0.0
        }
    }

    /// Largest vertical offset; zero on axes that can't scroll.
    pub fn max_y(&self) -> f32 {
        if self.overflow_y.is_scrollable() {
            self.content_height.saturating_sub(self.viewport_height) as f32
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Viewport {
    offset: ScrollOffset,
    metrics: ScrollMetrics,
}

/// Tracks scroll offsets for clipping containers, keyed by element id.
///
/// A viewport only exists here once its metrics are known (after a layout
/// pass or an explicit [`ScrollState::register`]). Writes to unknown ids are
/// ignored.
#[derive(Debug, Default)]
pub struct ScrollState {
    viewports: HashMap<String, Viewport>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or update a viewport's metrics, clamping its offset into the new range.
    pub fn register(&mut self, id: &str, metrics: ScrollMetrics) {
        let viewport = self.viewports.entry(id.to_string()).or_default();
        viewport.metrics = metrics;
        viewport.offset = clamp(viewport.offset, &metrics);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.viewports.contains_key(id)
    }

    pub fn metrics(&self, id: &str) -> Option<ScrollMetrics> {
        self.viewports.get(id).map(|v| v.metrics)
    }

    /// Get the scroll offset for an element. Unknown ids are at the origin.
    pub fn get(&self, id: &str) -> ScrollOffset {
        self.viewports
            .get(id)
            .map(|v| v.offset)
            .unwrap_or_default()
    }

    /// Set the scroll offset, clamped to the viewport's range.
    /// Returns true if the offset changed.
    pub fn set(&mut self, id: &str, x: f32, y: f32) -> bool {
        let Some(viewport) = self.viewports.get_mut(id) else {
            return false;
        };

        let next = clamp(ScrollOffset::new(x, y), &viewport.metrics);
        if next == viewport.offset {
            return false;
        }
        viewport.offset = next;
        true
    }

    /// Scroll by a delta. Returns true if the offset changed.
    pub fn scroll_by(&mut self, id: &str, dx: f32, dy: f32) -> bool {
        let current = self.get(id);
        self.set(id, current.x + dx, current.y + dy)
    }

    /// Move both axes back to the origin, whichever axes are scrollable.
    pub fn reset(&mut self, id: &str) -> bool {
        self.set(id, 0.0, 0.0)
    }

    /// Refresh metrics for every clipping container in a fresh layout and
    /// drop viewports that are no longer in the tree.
    pub fn sync(&mut self, root: &Element, layout: &LayoutResult) {
        self.viewports
            .retain(|id, _| layout.viewport(id).is_some());

        for (id, viewport) in layout.viewports() {
            let Some(element) = find_element(root, id) else {
                continue;
            };
            self.register(
                id,
                ScrollMetrics {
                    viewport_width: viewport.inner.width,
                    viewport_height: viewport.inner.height,
                    content_width: viewport.content_width,
                    content_height: viewport.content_height,
                    overflow_x: element.overflow_x,
                    overflow_y: element.overflow_y,
                },
            );
        }
    }

    /// Apply a wheel notch to the innermost scrollable container under the pointer.
    /// Returns the id of the container that moved.
    pub fn wheel(
        &mut self,
        root: &Element,
        layout: &LayoutResult,
        x: i32,
        y: i32,
        delta_x: i16,
        delta_y: i16,
    ) -> Option<String> {
        let mut candidates = Vec::new();
        collect_scrollable_at(root, layout, x, y, &mut candidates);

        // Innermost first; fall through to ancestors that can still move.
        for id in candidates.into_iter().rev() {
            if self.scroll_by(&id, delta_x as f32, delta_y as f32) {
                log::trace!("wheel scrolled {id} by ({delta_x}, {delta_y})");
                return Some(id);
            }
        }
        None
    }
}

fn clamp(offset: ScrollOffset, metrics: &ScrollMetrics) -> ScrollOffset {
    ScrollOffset::new(
        offset.x.clamp(0.0, metrics.max_x()),
        offset.y.clamp(0.0, metrics.max_y()),
    )
}

/// Scrollable containers containing the point, outermost first.
fn collect_scrollable_at(
    element: &Element,
    layout: &LayoutResult,
    x: i32,
    y: i32,
    result: &mut Vec<String>,
) {
    let Some(rect) = layout.get(&element.id) else {
        return;
    };

    if !rect.contains(x, y) {
        return;
    }

    if element.overflow_x.is_scrollable() || element.overflow_y.is_scrollable() {
        result.push(element.id.clone());
    }

    if let Content::Children(children) = &element.content {
        for child in children.iter().rev() {
            if layout.get(&child.id).is_some_and(|r| r.contains(x, y)) {
                collect_scrollable_at(child, layout, x, y, result);
                break;
            }
        }
    }
}
