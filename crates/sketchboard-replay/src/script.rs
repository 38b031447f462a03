//! Script format and replay loop.
//!
//! ```json
//! { "config": { "max_scale": 4.0 },
//!   "steps": [
//!     { "type": "tool", "tool": "rectangle" },
//!     { "type": "down", "x": 10, "y": 10 },
//!     { "type": "move", "x": 50, "y": 60 },
//!     { "type": "up", "x": 50, "y": 60 } ] }
//! ```

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use sketchboard_core::config::{ConfigError, EngineConfig};
use sketchboard_core::shapes::{PropertyError, PropertyValue};
use sketchboard_core::{
    Element, GestureKind, InteractionController, KeyInput, Modifiers, PointerButton, Tool,
};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Script error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("Step {index}: {source}")]
    Property { index: usize, source: PropertyError },
}

/// One scripted input. Pointer coordinates are in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        in_text_field: bool,
    },
    Tool {
        tool: Tool,
    },
    Property {
        key: String,
        value: PropertyValue,
    },
    Text {
        content: String,
    },
    Undo,
    Redo,
    Cancel,
    Clear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: EngineConfig,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let script: Self = serde_json::from_str(json)?;
        script.config.validate()?;
        Ok(script)
    }
}

/// Final board state after a replay.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tool: Tool,
    pub selection: Option<String>,
    pub gesture: GestureKind,
    pub history_depth: usize,
    pub history_cursor: usize,
    pub scale: f64,
    pub offset: Vec2,
    pub elements: Vec<Element>,
}

impl From<&InteractionController> for Report {
    fn from(ctl: &InteractionController) -> Self {
        Self {
            tool: ctl.state().tool(),
            selection: ctl.state().selection().map(str::to_string),
            gesture: ctl.gesture(),
            history_depth: ctl.history().depth(),
            history_cursor: ctl.history().cursor(),
            scale: ctl.viewport().scale(),
            offset: ctl.viewport().offset(),
            elements: ctl.elements().to_vec(),
        }
    }
}

/// Feed every step through a fresh controller.
pub fn replay(script: &Script) -> Result<Report, ReplayError> {
    let mut ctl = InteractionController::with_config(script.config.clone());
    for (index, step) in script.steps.iter().enumerate() {
        log::debug!("step {}: {:?}", index, step);
        apply(&mut ctl, step).map_err(|source| ReplayError::Property { index, source })?;
    }
    log::info!(
        "Replayed {} steps, {} elements",
        script.steps.len(),
        ctl.elements().len()
    );
    Ok(Report::from(&ctl))
}

fn apply(ctl: &mut InteractionController, step: &Step) -> Result<(), PropertyError> {
    match step {
        Step::Down { x, y, button } => {
            ctl.pointer_down(Point::new(*x, *y), *button);
        }
        Step::Move { x, y } => {
            ctl.pointer_move(Point::new(*x, *y));
        }
        Step::Up { x, y, button } => {
            ctl.pointer_up(Point::new(*x, *y), *button);
        }
        Step::Wheel { x, y, delta_y } => {
            ctl.wheel(Point::new(*x, *y), *delta_y);
        }
        Step::Key {
            key,
            modifiers,
            in_text_field,
        } => {
            let input = KeyInput {
                key: key.clone(),
                modifiers: *modifiers,
                in_text_field: *in_text_field,
            };
            ctl.key_down(&input);
        }
        Step::Tool { tool } => ctl.set_tool(*tool),
        Step::Property { key, value } => {
            ctl.set_tool_property(key, value.clone())?;
        }
        Step::Text { content } => {
            ctl.set_text(content);
        }
        Step::Undo => {
            ctl.undo();
        }
        Step::Redo => {
            ctl.redo();
        }
        Step::Cancel => {
            ctl.cancel();
        }
        Step::Clear => {
            ctl.clear();
        }
    }
    Ok(())
}
