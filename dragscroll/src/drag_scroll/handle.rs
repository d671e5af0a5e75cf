use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{DragScroll, DragScrollConfig, DragState, Shared};
use crate::document::Document;
use crate::element::Element;
use crate::event::EventKind;
use crate::listener::{Registration, Scope, SharedListener};

impl DragScroll {
    /// Attach the viewport press listener and the document-wide move, release
    /// and context-menu listeners. They stay attached while the returned
    /// guard lives.
    pub fn mount(self, document: &Document) -> Mounted {
        let shared = Rc::clone(&self.shared);
        let viewport = shared.viewport.clone();
        let component = Rc::new(RefCell::new(self));
        let listener: SharedListener = component.clone();

        let listeners = document.listeners();
        let registrations = vec![
            listeners.add(Scope::Element(viewport.clone()), EventKind::MouseDown, &listener),
            listeners.add(Scope::Document, EventKind::MouseMove, &listener),
            listeners.add(Scope::Document, EventKind::MouseUp, &listener),
            listeners.add(Scope::Document, EventKind::ContextMenu, &listener),
        ];

        shared.mounted.set(true);
        log::debug!("{viewport}: mounted");

        Mounted {
            component,
            shared,
            registrations,
        }
    }
}

/// A mounted [`DragScroll`]. Dropping it detaches every listener and turns
/// outstanding handles into no-ops.
pub struct Mounted {
    component: Rc<RefCell<DragScroll>>,
    shared: Rc<Shared>,
    registrations: Vec<Registration>,
}

impl Mounted {
    pub fn handle(&self) -> DragScrollHandle {
        DragScrollHandle::new(&self.shared)
    }

    /// Wrap `content` in the viewport element. Call outside of event dispatch.
    pub fn element(&self, content: Element) -> Element {
        self.component.borrow().element(content)
    }

    pub fn viewport_id(&self) -> &str {
        &self.shared.viewport
    }

    pub fn config(&self) -> DragScrollConfig {
        *self.component.borrow().config()
    }

    pub fn state(&self) -> DragState {
        self.component.borrow().state()
    }

    pub fn is_dragging(&self) -> bool {
        self.shared.dragging.get()
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.registrations.clear();
        self.shared.mounted.set(false);
        self.shared.dragging.set(false);
        self.shared.modifier_dragging.set(false);
        log::debug!("{}: unmounted", self.shared.viewport);
    }
}

impl std::fmt::Debug for Mounted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mounted")
            .field("viewport", &self.shared.viewport)
            .field("listeners", &self.registrations.len())
            .finish()
    }
}

/// What an embedding page may do with a container it doesn't own.
///
/// Every operation is a no-op before mount, after unmount, and while the
/// viewport isn't laid out.
#[derive(Debug, Clone, Default)]
pub struct DragScrollHandle {
    shared: Weak<Shared>,
}

impl DragScrollHandle {
    pub(super) fn new(shared: &Rc<Shared>) -> Self {
        Self {
            shared: Rc::downgrade(shared),
        }
    }

    fn live(&self) -> Option<Rc<Shared>> {
        self.shared.upgrade().filter(|s| s.mounted.get())
    }

    pub fn is_mounted(&self) -> bool {
        self.live().is_some()
    }

    /// Scroll the viewport back to the origin on both axes.
    /// Returns true if anything moved.
    pub fn reset_position(&self, document: &mut Document) -> bool {
        let Some(shared) = self.live() else {
            return false;
        };
        let moved = document.scroll_mut().reset(&shared.viewport);
        if moved {
            log::debug!("{}: position reset", shared.viewport);
        }
        moved
    }

    /// Whether a modifier-gated drag is in progress with the key held.
    pub fn is_modifier_dragging(&self) -> bool {
        self.live().is_some_and(|s| s.modifier_dragging.get())
    }

    pub fn is_dragging(&self) -> bool {
        self.live().is_some_and(|s| s.dragging.get())
    }
}
