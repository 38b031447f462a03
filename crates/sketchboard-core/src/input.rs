//! Host input events and keyboard shortcut mapping.

use crate::tools::Tool;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` index.
    pub fn from_dom_button(button: i16) -> Option<Self> {
        match button {
            0 => Some(PointerButton::Left),
            1 => Some(PointerButton::Middle),
            2 => Some(PointerButton::Right),
            _ => None,
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: PointerButton,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: PointerButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

/// A key press as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    /// DOM-style key name (`"1"`, `"ArrowLeft"`, `"z"`, `"Escape"`).
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Focus is in a text input; shortcuts are suppressed.
    #[serde(default)]
    pub in_text_field: bool,
}

/// What a key press asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    SelectTool(Tool),
    Undo,
    Redo,
    Cancel,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            in_text_field: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }

    /// Resolve this key against the active tool.
    pub fn command(&self, current: Tool) -> Option<KeyCommand> {
        if self.in_text_field {
            return None;
        }

        if self.modifiers.command() {
            return match self.key.to_ascii_lowercase().as_str() {
                "z" if self.modifiers.shift => Some(KeyCommand::Redo),
                "z" => Some(KeyCommand::Undo),
                "y" => Some(KeyCommand::Redo),
                _ => None,
            };
        }

        match self.key.as_str() {
            "Escape" => Some(KeyCommand::Cancel),
            "ArrowRight" => Some(KeyCommand::SelectTool(current.next())),
            "ArrowLeft" => Some(KeyCommand::SelectTool(current.previous())),
            key => {
                let mut chars = key.chars();
                let digit = match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_digit(10)?,
                    _ => return None,
                };
                Tool::from_shortcut_digit(digit).map(KeyCommand::SelectTool)
            }
        }
    }
}

/// Any event a host can forward to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyInput),
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<KeyInput> for InputEvent {
    fn from(key: KeyInput) -> Self {
        InputEvent::Key(key)
    }
}
