//! A container whose content pans when the pointer drags across it.
//!
//! ```ignore
//! let viewport = DragScroll::new("grid", DragScrollConfig::new().both())?
//!     .on_drag_end(|| log::info!("released"))
//!     .mount(&document);
//! let handle = viewport.handle();
//! document.set_root(viewport.element(table));
//! ```

mod config;
mod guard;
mod handle;
mod session;

use std::cell::Cell;
use std::rc::Rc;

pub use config::{DragScrollConfig, DEFAULT_SENSITIVITY};
pub use guard::originated_on_interactive;
pub use handle::{DragScrollHandle, Mounted};
pub use session::{DragSession, DragState};

use crate::document::EventContext;
use crate::element::Element;
use crate::error::ConfigError;
use crate::event::{Event, Modifiers, MouseButton};
use crate::layout::Rect;
use crate::listener::Listener;
use crate::types::{Cursor, Size, UserSelect};

type EventCallback = Box<dyn FnMut(&Event)>;

#[derive(Default)]
struct Callbacks {
    drag_start: Option<EventCallback>,
    drag: Option<EventCallback>,
    drag_end: Option<Box<dyn FnMut()>>,
    modifier_drag_change: Option<Box<dyn FnMut(bool)>>,
}

/// State visible through handles without borrowing the component.
#[derive(Debug)]
struct Shared {
    viewport: String,
    dragging: Cell<bool>,
    modifier_dragging: Cell<bool>,
    mounted: Cell<bool>,
}

/// Drag-to-pan container. Build it, [`mount`](DragScroll::mount) it on a
/// document, and render its [`element`](Mounted::element) every frame.
pub struct DragScroll {
    config: DragScrollConfig,
    state: DragState,
    originated_on_interactive: bool,
    shared: Rc<Shared>,
    callbacks: Callbacks,
}

impl DragScroll {
    /// Create a container whose viewport element will carry `viewport_id`.
    pub fn new(viewport_id: impl Into<String>, config: DragScrollConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: DragState::Idle,
            originated_on_interactive: false,
            shared: Rc::new(Shared {
                viewport: viewport_id.into(),
                dragging: Cell::new(false),
                modifier_dragging: Cell::new(false),
                mounted: Cell::new(false),
            }),
            callbacks: Callbacks::default(),
        })
    }

    pub fn on_drag_start(mut self, f: impl FnMut(&Event) + 'static) -> Self {
        self.callbacks.drag_start = Some(Box::new(f));
        self
    }

    pub fn on_drag(mut self, f: impl FnMut(&Event) + 'static) -> Self {
        self.callbacks.drag = Some(Box::new(f));
        self
    }

    pub fn on_drag_end(mut self, f: impl FnMut() + 'static) -> Self {
        self.callbacks.drag_end = Some(Box::new(f));
        self
    }

    /// Called on each flip of "a modifier-gated drag is active".
    pub fn on_modifier_drag_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.callbacks.modifier_drag_change = Some(Box::new(f));
        self
    }

    pub fn config(&self) -> &DragScrollConfig {
        &self.config
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn viewport_id(&self) -> &str {
        &self.shared.viewport
    }

    /// A handle that stays inert until the container is mounted.
    pub fn handle(&self) -> DragScrollHandle {
        DragScrollHandle::new(&self.shared)
    }

    /// Wrap `content` in the viewport element.
    pub fn element(&self, content: Element) -> Element {
        let cursor = if self.state.is_dragging() {
            Cursor::Grabbing
        } else {
            Cursor::Default
        };

        Element::box_()
            .id(self.shared.viewport.clone())
            .width(Size::Fill)
            .height(Size::Fill)
            .overflow_x(self.config.overflow_x())
            .overflow_y(self.config.overflow_y())
            .user_select(UserSelect::None)
            .cursor(cursor)
            .child(content)
    }

    fn viewport_rect(&self, cx: &EventContext<'_>) -> Option<Rect> {
        cx.layout().get(&self.shared.viewport).copied()
    }

    fn pointer_down(
        &mut self,
        event: &Event,
        position: (u16, u16),
        button: MouseButton,
        modifiers: Modifiers,
        cx: &mut EventContext<'_>,
    ) {
        self.originated_on_interactive = originated_on_interactive(cx.path(), &self.shared.viewport);
        if self.originated_on_interactive {
            log::trace!("{}: press on interactive element, not dragging", self.shared.viewport);
            return;
        }

        if button != self.config.button || !self.config.allows(modifiers) {
            return;
        }

        let Some(rect) = self.viewport_rect(cx) else {
            return;
        };

        let anchor = relative(rect, position);
        let anchor_scroll = cx.scroll().get(&self.shared.viewport);
        self.state = DragState::Dragging(DragSession::new(anchor, anchor_scroll));
        self.shared.dragging.set(true);
        cx.prevent_default();

        log::debug!(
            "{}: drag started at ({}, {}) from offset ({}, {})",
            self.shared.viewport,
            anchor.0,
            anchor.1,
            anchor_scroll.x,
            anchor_scroll.y
        );

        if self.config.require_modifier {
            self.set_modifier_dragging(true);
        }
        if let Some(f) = self.callbacks.drag_start.as_mut() {
            f(event);
        }
    }

    fn pointer_move(
        &mut self,
        event: &Event,
        position: (u16, u16),
        modifiers: Modifiers,
        cx: &mut EventContext<'_>,
    ) {
        let DragState::Dragging(session) = self.state else {
            return;
        };
        if self.originated_on_interactive {
            return;
        }
        let Some(rect) = self.viewport_rect(cx) else {
            return;
        };

        if self.config.allows(modifiers) {
            let id = &self.shared.viewport;
            let current = cx.scroll().get(id);
            let next = session.offset_for(relative(rect, position), &self.config, current);
            if cx.scroll_mut().set(id, next.x, next.y) {
                let applied = cx.scroll().get(id);
                log::trace!("{id}: offset now ({}, {})", applied.x, applied.y);
            }

            if let Some(f) = self.callbacks.drag.as_mut() {
                f(event);
            }
        }

        if self.config.require_modifier {
            self.set_modifier_dragging(self.config.modifier.is_held(modifiers));
        }
    }

    fn pointer_up(&mut self) {
        if self.state.is_dragging() {
            log::debug!("{}: drag ended", self.shared.viewport);
        }
        self.state = DragState::Idle;
        self.shared.dragging.set(false);
        self.originated_on_interactive = false;

        self.set_modifier_dragging(false);
        if let Some(f) = self.callbacks.drag_end.as_mut() {
            f();
        }
    }

    fn context_menu(&self, cx: &mut EventContext<'_>) {
        if self.state.is_dragging() {
            cx.prevent_default();
        }
    }

    // Fires only on edges.
    fn set_modifier_dragging(&mut self, active: bool) {
        if self.shared.modifier_dragging.replace(active) == active {
            return;
        }
        log::debug!("{}: modifier drag {}", self.shared.viewport, active);
        if let Some(f) = self.callbacks.modifier_drag_change.as_mut() {
            f(active);
        }
    }
}

impl Listener for DragScroll {
    fn handle(&mut self, event: &Event, cx: &mut EventContext<'_>) {
        match *event {
            Event::MouseDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(event, (x, y), button, modifiers, cx),
            Event::MouseMove { x, y, modifiers } => self.pointer_move(event, (x, y), modifiers, cx),
            Event::MouseUp { .. } => self.pointer_up(),
            Event::ContextMenu { .. } => self.context_menu(cx),
            _ => {}
        }
    }
}

impl std::fmt::Debug for DragScroll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragScroll")
            .field("viewport", &self.shared.viewport)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Pointer position relative to the viewport's top-left corner.
fn relative(rect: Rect, (x, y): (u16, u16)) -> (f32, f32) {
    ((x as i32 - rect.x) as f32, (y as i32 - rect.y) as f32)
}
