//! Canvas store: the ordered element sequence of one builder session.
//!
//! Every mutation that changes the sequence records a history snapshot.
//! Mutations that target a missing id or an invalid index are no-ops and
//! leave the history untouched.

use std::sync::Arc;

use crate::element::{ElementId, ElementPatch, PageElement};
use crate::history::{History, HistoryPolicy};
use crate::widget::WidgetCatalog;

/// Ordered page elements with selection and undo/redo history.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Top-level elements in page order.
    elements: Vec<PageElement>,
    /// Snapshot history; the entry under the cursor mirrors `elements`.
    history: History,
    /// Currently selected element.
    selected: Option<ElementId>,
    /// Widget definitions used to build new elements.
    catalog: Arc<WidgetCatalog>,
    /// Snapshot policy.
    policy: HistoryPolicy,
    /// Element whose content edits are being folded into the current entry.
    open_text_edit: Option<ElementId>,
}

impl Canvas {
    /// Create an empty canvas.
    #[must_use]
    pub fn new(catalog: Arc<WidgetCatalog>) -> Self {
        Self::with_policy(catalog, HistoryPolicy::default())
    }

    /// Create an empty canvas with a snapshot policy.
    #[must_use]
    pub fn with_policy(catalog: Arc<WidgetCatalog>, policy: HistoryPolicy) -> Self {
        Self {
            elements: Vec::new(),
            history: History::new(),
            selected: None,
            catalog,
            policy,
            open_text_edit: None,
        }
    }

    /// Create a canvas that starts from previously saved elements.
    ///
    /// The saved sequence becomes the first history entry, so undo stops there.
    #[must_use]
    pub fn from_saved(
        catalog: Arc<WidgetCatalog>,
        policy: HistoryPolicy,
        elements: Vec<PageElement>,
    ) -> Self {
        Self {
            history: History::with_initial(elements.clone()),
            elements,
            selected: None,
            catalog,
            policy,
            open_text_edit: None,
        }
    }

    /// Place a new element built from `widget_id`.
    ///
    /// Inserts at `at_index` when given (clamped to the end), otherwise appends.
    /// Widget ids missing from the catalog still produce an element of that type.
    pub fn add_element(&mut self, widget_id: &str, at_index: Option<usize>) -> ElementId {
        let element = match self.catalog.get(widget_id) {
            Some(widget) => PageElement::from_widget(widget),
            None => {
                tracing::debug!("Widget {widget_id} not in catalog, placing generic element");
                PageElement::unknown(widget_id)
            }
        };
        let id = element.id.clone();

        let index = at_index.map_or(self.elements.len(), |i| i.min(self.elements.len()));
        self.elements.insert(index, element);
        tracing::debug!("Added {widget_id} element {id} at {index}");

        self.snapshot();
        id
    }

    /// Remove an element by id.
    ///
    /// Clears the selection if it pointed at the removed element. Returns
    /// `None` without recording history when the id is absent.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<PageElement> {
        let Some(index) = self.index_of(id) else {
            tracing::debug!("Remove ignored, element {id} not found");
            return None;
        };
        let removed = self.elements.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.snapshot();
        Some(removed)
    }

    /// Merge `patch` into the element with `id`.
    ///
    /// Returns `false` without recording history when the id is absent.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| &e.id == id) else {
            tracing::debug!("Update ignored, element {id} not found");
            return false;
        };
        patch.apply(element);

        if self.policy.coalesce_text_edits && patch.is_content_only() {
            if self.open_text_edit.as_ref() == Some(id) {
                self.history.amend(&self.elements);
            } else {
                self.history.record(&self.elements);
                self.open_text_edit = Some(id.clone());
            }
        } else {
            self.snapshot();
        }
        true
    }

    /// Move the element at `from` so that it ends up at `to`.
    ///
    /// Returns `false` and logs a warning when either index is out of range.
    /// Moving an element onto its own position records nothing.
    pub fn move_element(&mut self, from: usize, to: usize) -> bool {
        let len = self.elements.len();
        if from >= len || to >= len {
            tracing::warn!("Rejected move {from} -> {to} on {len} elements");
            return false;
        }
        if from == to {
            return true;
        }
        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        self.snapshot();
        true
    }

    /// Close a coalesced text edit run (e.g. when the field loses focus).
    pub fn commit_text_edit(&mut self) {
        self.open_text_edit = None;
    }

    /// Step back one history entry. Returns `false` at the start.
    pub fn undo(&mut self) -> bool {
        self.open_text_edit = None;
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.elements = snapshot.to_vec();
        self.drop_stale_selection();
        true
    }

    /// Step forward one history entry. Returns `false` at the end.
    pub fn redo(&mut self) -> bool {
        self.open_text_edit = None;
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.elements = snapshot.to_vec();
        self.drop_stale_selection();
        true
    }

    /// Select an element. Returns `false` if the id is absent.
    pub fn select(&mut self, id: &ElementId) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        if self.selected.as_ref() != Some(id) {
            self.open_text_edit = None;
        }
        self.selected = Some(id.clone());
        true
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.open_text_edit = None;
        self.selected = None;
    }

    /// Currently selected id.
    #[must_use]
    pub fn selected(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    /// Currently selected element.
    #[must_use]
    pub fn selected_element(&self) -> Option<&PageElement> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    /// All elements in page order.
    #[must_use]
    pub fn elements(&self) -> &[PageElement] {
        &self.elements
    }

    /// Get an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&PageElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Position of an element in the sequence.
    #[must_use]
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the canvas has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The snapshot history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The widget catalog.
    #[must_use]
    pub fn catalog(&self) -> &WidgetCatalog {
        &self.catalog
    }

    /// The snapshot policy.
    #[must_use]
    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    fn snapshot(&mut self) {
        self.open_text_edit = None;
        self.history.record(&self.elements);
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.index_of(id).is_none() {
                self.selected = None;
            }
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Arc::new(WidgetCatalog::standard()))
    }
}
