use super::DragScrollConfig;
use crate::scroll::ScrollOffset;

/// Where a drag started: the pointer relative to the viewport's top-left,
/// and the viewport's scroll offsets at that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub anchor_pointer: (f32, f32),
    pub anchor_scroll: ScrollOffset,
}

impl DragSession {
    pub fn new(anchor_pointer: (f32, f32), anchor_scroll: ScrollOffset) -> Self {
        Self {
            anchor_pointer,
            anchor_scroll,
        }
    }

    /// Offsets for the pointer at `pointer`. Disabled axes keep `current`.
    pub fn offset_for(
        &self,
        pointer: (f32, f32),
        config: &DragScrollConfig,
        current: ScrollOffset,
    ) -> ScrollOffset {
        let mut next = current;
        if config.horizontal {
            let displacement = (pointer.0 - self.anchor_pointer.0) * config.sensitivity;
            next.x = self.anchor_scroll.x - displacement;
        }
        if config.vertical {
            let displacement = (pointer.1 - self.anchor_pointer.1) * config.sensitivity;
            next.y = self.anchor_scroll.y - displacement;
        }
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }
}
