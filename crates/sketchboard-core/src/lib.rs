//! Sketchboard Core Library
//!
//! Platform-agnostic interaction engine for a hand-drawn whiteboard: the
//! element model, hit-testing and resize geometry, the pointer state
//! machine, the viewport transform and undo/redo history.

pub mod config;
pub mod history;
pub mod input;
pub mod interaction;
pub mod selection;
pub mod shapes;
pub mod state;
pub mod tools;
pub mod viewport;

pub use config::{ConfigError, EngineConfig};
pub use hit_test::{contains, pick};
pub use history::History;
pub use input::{InputEvent, KeyCommand, KeyInput, Modifiers, PointerButton, PointerEvent};
pub use interaction::{GestureKind, InteractionController};
pub use selection::{CursorHint, Handle, HandleKind, ResizeBox};
pub use shapes::{Element, ElementId, ElementKind, ElementStyle, Rgba, ToolProperties, ToolProperty};
pub use state::ApplicationState;
pub use tools::{TOOLBAR_ORDER, Tool, ToolParseError};
pub use viewport::Viewport;
