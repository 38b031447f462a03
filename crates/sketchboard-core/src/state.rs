//! Application state owned by the interaction controller.

use crate::shapes::{ElementId, ToolProperties};
use crate::tools::Tool;
use serde::{Deserialize, Serialize};

/// Tool, selection and palette. Read-only outside the controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationState {
    pub(crate) tool: Tool,
    /// At most one selected element.
    pub(crate) selection: Option<ElementId>,
    pub(crate) tool_properties: ToolProperties,
}

impl ApplicationState {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn tool_properties(&self) -> &ToolProperties {
        &self.tool_properties
    }
}
