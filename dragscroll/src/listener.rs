use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::document::EventContext;
use crate::event::{Event, EventKind};

/// Something that reacts to events delivered by a [`crate::Document`].
pub trait Listener {
    fn handle(&mut self, event: &Event, cx: &mut EventContext<'_>);
}

pub type SharedListener = Rc<RefCell<dyn Listener>>;

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Receives every event of its kind, wherever the pointer is.
    Document,
    /// Receives events whose target is this element or one of its descendants.
    Element(String),
}

struct Entry {
    id: u64,
    scope: Scope,
    kind: EventKind,
    listener: Weak<RefCell<dyn Listener>>,
}

#[derive(Default)]
struct Table {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Listener registry of a document.
///
/// The registry only holds weak references; a listener stays attached for as
/// long as the [`Registration`] returned by [`Listeners::add`] is alive.
#[derive(Clone, Default)]
pub struct Listeners {
    table: Rc<RefCell<Table>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. Delivery order within a scope is registration order.
    pub fn add(&self, scope: Scope, kind: EventKind, listener: &SharedListener) -> Registration {
        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        log::trace!("attach listener {id} for {kind:?} on {scope:?}");
        table.entries.push(Entry {
            id,
            scope,
            kind,
            listener: Rc::downgrade(listener),
        });

        Registration {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Number of attached listeners whose target is still alive.
    pub fn len(&self) -> usize {
        self.table
            .borrow()
            .entries
            .iter()
            .filter(|e| e.listener.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live listeners attached to `scope` for `kind`.
    pub fn count(&self, scope: &Scope, kind: EventKind) -> usize {
        self.table
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind && &e.scope == scope && e.listener.strong_count() > 0)
            .count()
    }

    /// Live listeners on a single element, in registration order.
    pub(crate) fn on_element(&self, id: &str, kind: EventKind) -> Vec<SharedListener> {
        self.collect(kind, |scope| matches!(scope, Scope::Element(el) if el == id))
    }

    /// Live document-scoped listeners, in registration order.
    pub(crate) fn on_document(&self, kind: EventKind) -> Vec<SharedListener> {
        self.collect(kind, |scope| *scope == Scope::Document)
    }

    // Snapshot so listeners may attach or detach others during delivery.
    fn collect(&self, kind: EventKind, scope_matches: impl Fn(&Scope) -> bool) -> Vec<SharedListener> {
        self.table
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind && scope_matches(&e.scope))
            .filter_map(|e| e.listener.upgrade())
            .collect()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("attached", &self.len())
            .finish()
    }
}

/// Keeps a listener attached; detaches it on drop.
#[must_use = "dropping a Registration detaches the listener immediately"]
#[derive(Debug)]
pub struct Registration {
    id: u64,
    table: Weak<RefCell<Table>>,
}

impl Registration {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            table.borrow_mut().entries.retain(|e| e.id != self.id);
            log::trace!("detach listener {}", self.id);
        }
    }
}
