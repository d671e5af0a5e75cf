use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::{Cursor, Direction, Overflow, Size, Style, UserSelect};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// What kind of node an element is. Native controls receive pointer input
/// themselves, so containers must not hijack presses that land on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    #[default]
    Box,
    Text,
    Button,
    Input,
    Select,
    TextArea,
    Link,
}

impl Tag {
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Tag::Button | Tag::Input | Tag::Select | Tag::TextArea | Tag::Link
        )
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: Tag,

    // Content
    pub content: Content,

    // Layout
    pub width: Size,
    pub height: Size,
    pub direction: Direction,
    pub gap: u16,

    // Overflow (separate X/Y for independent control)
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,

    // Visual
    pub style: Style,
    pub user_select: UserSelect,
    pub cursor: Cursor,

    // Interaction attributes
    /// Explicit interaction role ("button", "menuitem", ...).
    pub role: Option<String>,
    /// Explicit tab stop. Any value, including negative ones, marks the element focusable.
    pub tab_index: Option<i32>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: Tag::Box,
            content: Content::None,
            width: Size::Auto,
            height: Size::Auto,
            direction: Direction::Column,
            gap: 0,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            style: Style::default(),
            user_select: UserSelect::Auto,
            cursor: Cursor::Default,
            role: None,
            tab_index: None,
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            tag: Tag::Text,
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn col() -> Self {
        Self {
            id: generate_id("col"),
            direction: Direction::Column,
            ..Default::default()
        }
    }

    pub fn row() -> Self {
        Self {
            id: generate_id("row"),
            direction: Direction::Row,
            ..Default::default()
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("button"),
            tag: Tag::Button,
            content: Content::Text(label.into()),
            cursor: Cursor::Pointer,
            ..Default::default()
        }
    }

    pub fn input(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("input"),
            tag: Tag::Input,
            content: Content::Text(value.into()),
            ..Default::default()
        }
    }

    pub fn select(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("select"),
            tag: Tag::Select,
            content: Content::Text(value.into()),
            cursor: Cursor::Pointer,
            ..Default::default()
        }
    }

    pub fn textarea(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("textarea"),
            tag: Tag::TextArea,
            content: Content::Text(value.into()),
            ..Default::default()
        }
    }

    pub fn link(label: impl Into<String>) -> Self {
        Self {
            id: generate_id("link"),
            tag: Tag::Link,
            content: Content::Text(label.into()),
            cursor: Cursor::Pointer,
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    // Layout
    pub fn width(mut self, width: Size) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = height;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    // Overflow
    /// Set both horizontal and vertical overflow behavior.
    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow_x = overflow;
        self.overflow_y = overflow;
        self
    }

    pub fn overflow_x(mut self, overflow: Overflow) -> Self {
        self.overflow_x = overflow;
        self
    }

    pub fn overflow_y(mut self, overflow: Overflow) -> Self {
        self.overflow_y = overflow;
        self
    }

    // Visual
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn user_select(mut self, user_select: UserSelect) -> Self {
        self.user_select = user_select;
        self
    }

    pub fn cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    // Interaction attributes
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Whether pointer presses on this element belong to the element itself
    /// (native control, explicit role, or explicit tab stop).
    pub fn is_interactive(&self) -> bool {
        self.tag.is_interactive() || self.role.is_some() || self.tab_index.is_some()
    }

    /// Whether content is clipped on either axis.
    pub fn clips(&self) -> bool {
        self.overflow_x.clips() || self.overflow_y.clips()
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }
}
