use crate::error::ConfigError;
use crate::event::{Modifiers, ModifierKey, MouseButton};
use crate::types::Overflow;

/// Pointer-to-content gain: dragging 10 cells moves the content 12.
pub const DEFAULT_SENSITIVITY: f32 = 1.2;

/// Behavior of one drag-scroll container, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragScrollConfig {
    /// Pan and show horizontal overflow.
    pub horizontal: bool,
    /// Pan and show vertical overflow.
    pub vertical: bool,
    /// Only start, and only move content, while `modifier` is held.
    pub require_modifier: bool,
    pub modifier: ModifierKey,
    pub sensitivity: f32,
    /// Button that starts a gesture.
    pub button: MouseButton,
}

impl Default for DragScrollConfig {
    fn default() -> Self {
        Self {
            horizontal: false,
            vertical: false,
            require_modifier: false,
            modifier: ModifierKey::Ctrl,
            sensitivity: DEFAULT_SENSITIVITY,
            button: MouseButton::Left,
        }
    }
}

impl DragScrollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizontal(mut self, enabled: bool) -> Self {
        self.horizontal = enabled;
        self
    }

    pub fn vertical(mut self, enabled: bool) -> Self {
        self.vertical = enabled;
        self
    }

    /// Enable both axes.
    pub fn both(self) -> Self {
        self.horizontal(true).vertical(true)
    }

    pub fn require_modifier(mut self, required: bool) -> Self {
        self.require_modifier = required;
        self
    }

    pub fn modifier(mut self, key: ModifierKey) -> Self {
        self.modifier = key;
        self
    }

    pub fn sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Reject settings that can't produce sane offsets. Inert combinations
    /// (modifier required with no axis enabled, say) are fine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        Ok(())
    }

    /// Whether the modifier policy lets a gesture start or move content.
    pub fn allows(&self, modifiers: Modifiers) -> bool {
        !self.require_modifier || self.modifier.is_held(modifiers)
    }

    pub fn overflow_x(&self) -> Overflow {
        axis_overflow(self.horizontal)
    }

    pub fn overflow_y(&self) -> Overflow {
        axis_overflow(self.vertical)
    }
}

fn axis_overflow(enabled: bool) -> Overflow {
    if enabled {
        Overflow::Auto
    } else {
        Overflow::Hidden
    }
}
