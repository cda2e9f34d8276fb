//! Linear undo/redo over whole-canvas snapshots.
//!
//! The history is a list of snapshots `[S0, S1, ..., Sn]` and a cursor `c`.
//! The snapshot under the cursor always equals the live element sequence.
//!
//! ```text
//! record:  [S0 .. Sc] + [S_new]      (redo future discarded), c = last
//! undo:    c > 0  => c -= 1          else no-op
//! redo:    c < n  => c += 1          else no-op
//! ```
//!
//! Snapshots are owned copies, so editing live elements can never reach back
//! into a past snapshot.

use serde::{Deserialize, Serialize};

use crate::element::PageElement;

/// How mutations are turned into history entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPolicy {
    /// Fold consecutive content-only edits of one element into a single entry.
    ///
    /// Off by default: every edit, including each keystroke in the content
    /// field, becomes its own undo step.
    pub coalesce_text_edits: bool,
}

impl HistoryPolicy {
    /// One entry per text edit run instead of per keystroke.
    #[must_use]
    pub const fn coalescing() -> Self {
        Self {
            coalesce_text_edits: true,
        }
    }
}

/// Snapshot history with a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: Vec<Vec<PageElement>>,
    cursor: usize,
}

impl History {
    /// History whose only entry is the empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_initial(Vec::new())
    }

    /// History whose only entry is `initial`.
    #[must_use]
    pub fn with_initial(initial: Vec<PageElement>) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Drop any redo future and append a snapshot of `elements`.
    pub fn record(&mut self, elements: &[PageElement]) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(elements.to_vec());
        self.cursor = self.snapshots.len() - 1;
    }

    /// Replace the snapshot under the cursor with `elements`.
    ///
    /// Any redo future is dropped, as with [`History::record`].
    pub fn amend(&mut self, elements: &[PageElement]) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots[self.cursor] = elements.to_vec();
    }

    /// Step back. Returns the snapshot to restore, or `None` at the start.
    pub fn undo(&mut self) -> Option<&[PageElement]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the end.
    pub fn redo(&mut self) -> Option<&[PageElement]> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Whether [`History::undo`] would move the cursor.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`History::redo`] would move the cursor.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Current cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots, including the initial one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: the initial snapshot is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> &[PageElement] {
        &self.snapshots[self.cursor]
    }

    /// Snapshot at a given position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&[PageElement]> {
        self.snapshots.get(position).map(Vec::as_slice)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
