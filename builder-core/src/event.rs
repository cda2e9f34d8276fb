//! Commands the builder UI sends to a session.

use serde::{Deserialize, Serialize};

use crate::editor::PropertyField;
use crate::element::{ElementId, ElementPatch};
use crate::{BuilderError, BuilderResult};

/// Every operation a host can drive a builder session with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuilderCommand {
    /// Place a widget, appending unless `at_index` is given.
    AddElement {
        /// Widget to place.
        widget_id: String,
        /// Insert position.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at_index: Option<usize>,
    },
    /// Remove an element.
    RemoveElement {
        /// Element to remove.
        id: ElementId,
    },
    /// Merge a partial update into an element.
    UpdateElement {
        /// Element to update.
        id: ElementId,
        /// Fields to merge.
        patch: ElementPatch,
    },
    /// Edit one property panel field of the selected element.
    EditProperty {
        /// Field to edit.
        field: PropertyField,
        /// New value.
        value: String,
    },
    /// Reorder an element.
    MoveElement {
        /// Current index.
        from: usize,
        /// Target index.
        to: usize,
    },
    /// Select an element.
    Select {
        /// Element to select.
        id: ElementId,
    },
    /// Clear the selection.
    Deselect,
    /// Remove the selected element.
    RemoveSelected,
    /// Close a coalesced text edit run.
    CommitTextEdit,
    /// Step back in history.
    Undo,
    /// Step forward in history.
    Redo,
    /// Hand the elements to the host for saving.
    Save,
    /// Ask the host to switch to the read-only preview.
    Preview,
}

impl BuilderCommand {
    /// Parse a command from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidCommand`] if the JSON is not a known command.
    pub fn from_json(json: &str) -> BuilderResult<Self> {
        serde_json::from_str(json).map_err(|e| BuilderError::InvalidCommand(e.to_string()))
    }

    /// Parse a JSON array of commands.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidCommand`] if any entry is not a known command.
    pub fn list_from_json(json: &str) -> BuilderResult<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| BuilderError::InvalidCommand(e.to_string()))
    }

    /// Whether the command can change the element sequence.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::AddElement { .. }
                | Self::RemoveElement { .. }
                | Self::UpdateElement { .. }
                | Self::EditProperty { .. }
                | Self::MoveElement { .. }
                | Self::RemoveSelected
                | Self::Undo
                | Self::Redo
        )
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key pressed.
    pub shift: bool,
    /// Control key pressed.
    pub ctrl: bool,
    /// Alt/Option key pressed.
    pub alt: bool,
    /// Meta/Command key pressed.
    pub meta: bool,
}

impl KeyModifiers {
    /// Control on Windows/Linux or Command on macOS.
    #[must_use]
    pub const fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Map a key press to a builder command.
///
/// | Keys                         | Command          |
/// |------------------------------|------------------|
/// | Ctrl/Cmd + Z                 | Undo             |
/// | Ctrl/Cmd + Shift + Z, Ctrl+Y | Redo             |
/// | Ctrl/Cmd + S                 | Save             |
/// | Delete, Backspace            | Remove selected  |
/// | Escape                       | Deselect         |
///
/// Delete and Backspace are ignored while a text field has focus.
#[must_use]
pub fn shortcut_for(key: &str, modifiers: KeyModifiers, editing_text: bool) -> Option<BuilderCommand> {
    let key = key.to_ascii_lowercase();
    if modifiers.command() {
        return match (key.as_str(), modifiers.shift) {
            ("z", false) => Some(BuilderCommand::Undo),
            ("z", true) | ("y", false) => Some(BuilderCommand::Redo),
            ("s", false) => Some(BuilderCommand::Save),
            _ => None,
        };
    }
    match key.as_str() {
        "delete" | "backspace" if !editing_text => Some(BuilderCommand::RemoveSelected),
        "escape" => Some(BuilderCommand::Deselect),
        _ => None,
    }
}
