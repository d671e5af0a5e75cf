pub mod buffer;
pub mod document;
pub mod drag_scroll;
pub mod element;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod listener;
pub mod render;
pub mod scroll;
pub mod terminal;
pub mod text;
pub mod types;

pub use buffer::Buffer;
pub use document::{Dispatch, Document, EventContext, Selection};
pub use drag_scroll::{
    DragScroll, DragScrollConfig, DragScrollHandle, DragSession, DragState, Mounted,
    DEFAULT_SENSITIVITY,
};
pub use element::{Element, Tag};
pub use error::ConfigError;
pub use event::{Event, EventKind, Key, ModifierKey, Modifiers, MouseButton};
pub use hit::{hit_path, hit_test};
pub use layout::{LayoutResult, Rect, ViewportLayout};
pub use listener::{Listener, Listeners, Registration, Scope};
pub use scroll::{ScrollMetrics, ScrollOffset, ScrollState};
pub use terminal::{write_pointer_shape, Terminal};
pub use types::*;
