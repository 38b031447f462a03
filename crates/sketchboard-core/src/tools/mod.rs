//! Tool palette and toolbar ordering.

use crate::shapes::ElementKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Selection,
    Rectangle,
    Circle,
    Line,
    Arrow,
    Text,
    Pencil,
    Diamond,
    Database,
    Cloud,
}

/// Toolbar order used by digit shortcuts and arrow-key cycling.
pub const TOOLBAR_ORDER: [Tool; 7] = [
    Tool::Selection,
    Tool::Rectangle,
    Tool::Circle,
    Tool::Line,
    Tool::Arrow,
    Tool::Text,
    Tool::Pencil,
];

impl Tool {
    pub const ALL: [Tool; 10] = [
        Tool::Selection,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Line,
        Tool::Arrow,
        Tool::Text,
        Tool::Pencil,
        Tool::Diamond,
        Tool::Database,
        Tool::Cloud,
    ];

    /// The element kind this tool draws, or None for selection.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            Tool::Selection => None,
            Tool::Rectangle => Some(ElementKind::Rectangle),
            Tool::Circle => Some(ElementKind::Circle),
            Tool::Line => Some(ElementKind::Line),
            Tool::Arrow => Some(ElementKind::Arrow),
            Tool::Text => Some(ElementKind::Text),
            Tool::Pencil => Some(ElementKind::Pencil),
            Tool::Diamond => Some(ElementKind::Diamond),
            Tool::Database => Some(ElementKind::Database),
            Tool::Cloud => Some(ElementKind::Cloud),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Selection => "selection",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Line => "line",
            Tool::Arrow => "arrow",
            Tool::Text => "text",
            Tool::Pencil => "pencil",
            Tool::Diamond => "diamond",
            Tool::Database => "database",
            Tool::Cloud => "cloud",
        }
    }

    /// Tool bound to digit key `digit` (1-based), if the toolbar has one there.
    pub fn from_shortcut_digit(digit: u32) -> Option<Tool> {
        let index = usize::try_from(digit).ok()?.checked_sub(1)?;
        TOOLBAR_ORDER.get(index).copied()
    }

    fn toolbar_index(self) -> Option<usize> {
        TOOLBAR_ORDER.iter().position(|t| *t == self)
    }

    /// Next toolbar tool, wrapping to the first.
    /// Tools outside the toolbar move to the first entry.
    pub fn next(self) -> Tool {
        let index = self.toolbar_index().map_or(0, |i| (i + 1) % TOOLBAR_ORDER.len());
        TOOLBAR_ORDER[index]
    }

    /// Previous toolbar tool, wrapping to the last.
    /// Tools outside the toolbar move to the last entry.
    pub fn previous(self) -> Tool {
        let len = TOOLBAR_ORDER.len();
        let index = self.toolbar_index().map_or(len - 1, |i| (i + len - 1) % len);
        TOOLBAR_ORDER[index]
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool: {0}")]
pub struct ToolParseError(pub String);

impl FromStr for Tool {
    type Err = ToolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Tool::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| ToolParseError(s.to_string()))
    }
}
