use crate::element::{Content, Element};
use crate::event::{Event, MouseButton};
use crate::hit::hit_path;
use crate::layout::{layout, LayoutResult, Rect};
use crate::listener::Listeners;
use crate::scroll::ScrollState;
use crate::types::{Cursor, UserSelect};

/// Text selection started by an unprevented press on selectable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub target: String,
    pub anchor: (u16, u16),
    pub focus: (u16, u16),
}

/// Outcome of delivering one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Deepest element under the pointer, for pointer events.
    pub target: Option<String>,
    /// A listener suppressed the default action.
    pub default_prevented: bool,
}

/// What a listener sees while handling an event.
pub struct EventContext<'a> {
    path: &'a [&'a Element],
    layout: &'a LayoutResult,
    scroll: &'a mut ScrollState,
    default_prevented: bool,
}

impl<'a> EventContext<'a> {
    pub fn new(path: &'a [&'a Element], layout: &'a LayoutResult, scroll: &'a mut ScrollState) -> Self {
        Self {
            path,
            layout,
            scroll,
            default_prevented: false,
        }
    }

    /// Deepest element under the pointer.
    pub fn target(&self) -> Option<&Element> {
        self.path.last().copied()
    }

    /// Elements from the root down to the target.
    pub fn path(&self) -> &[&Element] {
        self.path
    }

    pub fn layout(&self) -> &LayoutResult {
        self.layout
    }

    pub fn scroll(&self) -> &ScrollState {
        self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        self.scroll
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A retained element tree plus everything needed to route input through it.
#[derive(Debug)]
pub struct Document {
    root: Element,
    layout: LayoutResult,
    scroll: ScrollState,
    listeners: Listeners,
    selection: Option<Selection>,
    selecting: bool,
    /// Last position reported by a pointer event.
    pointer: Option<(u16, u16)>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            layout: LayoutResult::new(),
            scroll: ScrollState::new(),
            listeners: Listeners::new(),
            selection: None,
            selecting: false,
            pointer: None,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Replace the tree. Hit testing keeps using the previous layout until
    /// [`Document::update_layout`] runs.
    pub fn set_root(&mut self, root: Element) {
        self.root = root;
    }

    /// Lay out the tree with the current scroll offsets and refresh scroll metrics.
    pub fn update_layout(&mut self, area: Rect) -> &LayoutResult {
        self.layout = layout(&self.root, area, &self.scroll);
        self.scroll.sync(&self.root, &self.layout);
        &self.layout
    }

    /// Install a layout computed elsewhere. Scroll viewports missing from it are dropped.
    pub fn set_layout(&mut self, layout: LayoutResult) {
        self.layout = layout;
        self.scroll.sync(&self.root, &self.layout);
    }

    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Cursor shape under the last known pointer position: the nearest
    /// element from the target up that asks for one.
    pub fn cursor(&self) -> Cursor {
        let Some((x, y)) = self.pointer else {
            return Cursor::Default;
        };
        hit_path(&self.layout, &self.root, x as i32, y as i32)
            .iter()
            .rev()
            .map(|e| e.cursor)
            .find(|c| *c != Cursor::Default)
            .unwrap_or_default()
    }

    /// Deliver an event: element listeners from the target up to the root,
    /// then document listeners, then the default action unless prevented.
    pub fn dispatch(&mut self, event: &Event) -> Dispatch {
        let Self {
            root,
            layout,
            scroll,
            listeners,
            selection,
            selecting,
            pointer,
        } = self;

        let path = match event.position() {
            Some((x, y)) => {
                *pointer = Some((x, y));
                hit_path(layout, root, x as i32, y as i32)
            }
            None => Vec::new(),
        };
        let target = path.last().map(|e| e.id.clone());
        let kind = event.kind();

        let mut cx = EventContext::new(&path, layout, scroll);
        for element in path.iter().rev() {
            for listener in listeners.on_element(&element.id, kind) {
                listener.borrow_mut().handle(event, &mut cx);
            }
        }
        for listener in listeners.on_document(kind) {
            listener.borrow_mut().handle(event, &mut cx);
        }
        let default_prevented = cx.default_prevented();

        match *event {
            Event::MouseDown {
                x,
                y,
                button: MouseButton::Left,
                ..
            } => {
                *selection = None;
                *selecting = false;
                if !default_prevented && is_selectable(&path) {
                    if let Some(target) = &target {
                        log::trace!("selection started on {target}");
                        *selection = Some(Selection {
                            target: target.clone(),
                            anchor: (x, y),
                            focus: (x, y),
                        });
                        *selecting = true;
                    }
                }
            }
            Event::MouseMove { x, y, .. } if *selecting && !default_prevented => {
                if let Some(selection) = selection.as_mut() {
                    selection.focus = (x, y);
                }
            }
            Event::MouseUp { .. } => *selecting = false,
            Event::Wheel {
                x,
                y,
                delta_x,
                delta_y,
                ..
            } if !default_prevented => {
                scroll.wheel(root, layout, x as i32, y as i32, delta_x, delta_y);
            }
            _ => {}
        }

        Dispatch {
            target,
            default_prevented,
        }
    }
}

/// Text under the pointer is selectable unless the nearest ancestor that
/// decides says otherwise.
fn is_selectable(path: &[&Element]) -> bool {
    let Some(target) = path.last() else {
        return false;
    };
    if !matches!(target.content, Content::Text(_)) {
        return false;
    }

    let resolved = path
        .iter()
        .rev()
        .map(|e| e.user_select)
        .find(|s| *s != UserSelect::Auto)
        .unwrap_or(UserSelect::Text);
    resolved == UserSelect::Text
}
