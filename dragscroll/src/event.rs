use std::fmt;
use std::str::FromStr;

use crossterm::event::{
    Event as CrosstermEvent, KeyEventKind, MouseButton as CtButton, MouseEvent, MouseEventKind,
};

use crate::error::ConfigError;

/// Input events delivered through a [`crate::Document`].
///
/// Pointer coordinates are absolute screen cells (the "page" position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse button pressed
    MouseDown {
        x: u16,
        y: u16,
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// Pointer moved, with or without a button held
    MouseMove { x: u16, y: u16, modifiers: Modifiers },
    /// Mouse button released
    MouseUp {
        x: u16,
        y: u16,
        button: MouseButton,
        modifiers: Modifiers,
    },
    /// Request for a context menu (secondary press)
    ContextMenu { x: u16, y: u16, modifiers: Modifiers },
    /// Mouse wheel
    Wheel {
        x: u16,
        y: u16,
        delta_x: i16,
        delta_y: i16,
        modifiers: Modifiers,
    },
    /// Key press
    Key { key: Key, modifiers: Modifiers },
    /// Terminal resized
    Resize { width: u16, height: u16 },
}

/// Discriminant of [`Event`], used to register listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseDown,
    MouseMove,
    MouseUp,
    ContextMenu,
    Wheel,
    Key,
    Resize,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::MouseDown { .. } => EventKind::MouseDown,
            Event::MouseMove { .. } => EventKind::MouseMove,
            Event::MouseUp { .. } => EventKind::MouseUp,
            Event::ContextMenu { .. } => EventKind::ContextMenu,
            Event::Wheel { .. } => EventKind::Wheel,
            Event::Key { .. } => EventKind::Key,
            Event::Resize { .. } => EventKind::Resize,
        }
    }

    /// Pointer position for mouse events.
    pub fn position(&self) -> Option<(u16, u16)> {
        match *self {
            Event::MouseDown { x, y, .. }
            | Event::MouseMove { x, y, .. }
            | Event::MouseUp { x, y, .. }
            | Event::ContextMenu { x, y, .. }
            | Event::Wheel { x, y, .. } => Some((x, y)),
            Event::Key { .. } | Event::Resize { .. } => None,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match *self {
            Event::MouseDown { modifiers, .. }
            | Event::MouseMove { modifiers, .. }
            | Event::MouseUp { modifiers, .. }
            | Event::ContextMenu { modifiers, .. }
            | Event::Wheel { modifiers, .. }
            | Event::Key { modifiers, .. } => modifiers,
            Event::Resize { .. } => Modifiers::default(),
        }
    }

    /// Translate a raw terminal event. A secondary press yields both a
    /// `MouseDown` and a `ContextMenu`, the way browsers report it.
    pub fn translate(event: &CrosstermEvent) -> Vec<Event> {
        match event {
            CrosstermEvent::Mouse(mouse) => translate_mouse(mouse),
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                match Key::from_code(key.code) {
                    Some(k) => vec![Event::Key {
                        key: k,
                        modifiers: key.modifiers.into(),
                    }],
                    None => Vec::new(),
                }
            }
            CrosstermEvent::Resize(width, height) => vec![Event::Resize {
                width: *width,
                height: *height,
            }],
            _ => Vec::new(),
        }
    }
}

fn translate_mouse(mouse: &MouseEvent) -> Vec<Event> {
    let x = mouse.column;
    let y = mouse.row;
    let modifiers = Modifiers::from(mouse.modifiers);

    match mouse.kind {
        MouseEventKind::Down(button) => {
            let button = MouseButton::from(button);
            let mut events = vec![Event::MouseDown {
                x,
                y,
                button,
                modifiers,
            }];
            if button == MouseButton::Right {
                events.push(Event::ContextMenu { x, y, modifiers });
            }
            events
        }
        MouseEventKind::Up(button) => vec![Event::MouseUp {
            x,
            y,
            button: button.into(),
            modifiers,
        }],
        MouseEventKind::Drag(_) | MouseEventKind::Moved => {
            vec![Event::MouseMove { x, y, modifiers }]
        }
        MouseEventKind::ScrollDown => vec![wheel(x, y, 0, 1, modifiers)],
        MouseEventKind::ScrollUp => vec![wheel(x, y, 0, -1, modifiers)],
        MouseEventKind::ScrollRight => vec![wheel(x, y, 1, 0, modifiers)],
        MouseEventKind::ScrollLeft => vec![wheel(x, y, -1, 0, modifiers)],
    }
}

fn wheel(x: u16, y: u16, delta_x: i16, delta_y: i16, modifiers: Modifiers) -> Event {
    Event::Wheel {
        x,
        y,
        delta_x,
        delta_y,
        modifiers,
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    fn from_code(code: crossterm::event::KeyCode) -> Option<Self> {
        use crossterm::event::KeyCode;
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        };
        Some(key)
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }
}

/// The key that gates a modifier-only drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifierKey {
    #[default]
    Ctrl,
    Shift,
    Alt,
}

impl ModifierKey {
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            ModifierKey::Ctrl => modifiers.ctrl,
            ModifierKey::Shift => modifiers.shift,
            ModifierKey::Alt => modifiers.alt,
        }
    }
}

impl FromStr for ModifierKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Ok(ModifierKey::Ctrl),
            "shift" => Ok(ModifierKey::Shift),
            "alt" | "option" => Ok(ModifierKey::Alt),
            _ => Err(ConfigError::UnknownModifier(s.to_string())),
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModifierKey::Ctrl => "Ctrl",
            ModifierKey::Shift => "Shift",
            ModifierKey::Alt => "Alt",
        };
        f.write_str(name)
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<CtButton> for MouseButton {
    fn from(btn: CtButton) -> Self {
        match btn {
            CtButton::Left => MouseButton::Left,
            CtButton::Right => MouseButton::Right,
            CtButton::Middle => MouseButton::Middle,
        }
    }
}
