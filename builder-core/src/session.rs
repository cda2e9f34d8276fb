//! Builder session: one open builder bound to a host.
//!
//! The session owns its canvas exclusively; nothing is shared between
//! sessions. Elements reach the host only through [`BuilderHost::on_save`],
//! so closing a session without saving discards the draft.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::editor::PropertyPanel;
use crate::element::PageElement;
use crate::event::BuilderCommand;
use crate::history::HistoryPolicy;
use crate::widget::WidgetCatalog;

/// Identifier of the page record being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub String);

impl PageId {
    /// Wrap a page identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Callbacks the surrounding application provides to a builder.
///
/// Saving is fire-and-forget: the builder does not wait for or react to the
/// outcome. Hosts report their own persistence failures.
pub trait BuilderHost {
    /// Persist the element sequence for `page`.
    fn on_save(&mut self, page: Option<&PageId>, elements: &[PageElement]);

    /// Switch to the read-only preview of `elements`.
    fn on_preview(&mut self, page: Option<&PageId>, elements: &[PageElement]);
}

/// An open builder for one page.
pub struct BuilderSession<H: BuilderHost> {
    canvas: Canvas,
    page: Option<PageId>,
    host: H,
    /// Elements as of the last save, `None` if never saved.
    saved: Option<Vec<PageElement>>,
}

impl<H: BuilderHost> BuilderSession<H> {
    /// Open a builder with an empty canvas.
    pub fn open(page: Option<PageId>, catalog: Arc<WidgetCatalog>, host: H) -> Self {
        Self::open_with_policy(page, catalog, HistoryPolicy::default(), host)
    }

    /// Open a builder with an empty canvas and a snapshot policy.
    pub fn open_with_policy(
        page: Option<PageId>,
        catalog: Arc<WidgetCatalog>,
        policy: HistoryPolicy,
        host: H,
    ) -> Self {
        tracing::info!(page = ?page, "Opening builder session");
        Self {
            canvas: Canvas::with_policy(catalog, policy),
            page,
            host,
            saved: None,
        }
    }

    /// Open a builder that resumes from previously saved elements.
    pub fn resume(
        page: Option<PageId>,
        catalog: Arc<WidgetCatalog>,
        policy: HistoryPolicy,
        elements: Vec<PageElement>,
        host: H,
    ) -> Self {
        tracing::info!(page = ?page, blocks = elements.len(), "Resuming builder session");
        Self {
            saved: Some(elements.clone()),
            canvas: Canvas::from_saved(catalog, policy, elements),
            page,
            host,
        }
    }

    /// Hand the current elements to the host.
    pub fn save(&mut self) {
        tracing::debug!(page = ?self.page, blocks = self.canvas.len(), "Saving page");
        self.host.on_save(self.page.as_ref(), self.canvas.elements());
        self.saved = Some(self.canvas.elements().to_vec());
    }

    /// Ask the host to show the read-only preview.
    pub fn preview(&mut self) {
        self.host.on_preview(self.page.as_ref(), self.canvas.elements());
    }

    /// Whether the canvas differs from what was last saved.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        match &self.saved {
            Some(saved) => saved.as_slice() != self.canvas.elements(),
            None => !self.canvas.is_empty(),
        }
    }

    /// Apply a command.
    ///
    /// Returns `true` if the command had an effect. No-ops (unknown ids,
    /// invalid indices, history boundaries) return `false`.
    pub fn dispatch(&mut self, command: BuilderCommand) -> bool {
        tracing::trace!(?command, "Dispatching builder command");
        match command {
            BuilderCommand::AddElement {
                widget_id,
                at_index,
            } => {
                self.canvas.add_element(&widget_id, at_index);
                true
            }
            BuilderCommand::RemoveElement { id } => self.canvas.remove_element(&id).is_some(),
            BuilderCommand::UpdateElement { id, patch } => self.canvas.update_element(&id, &patch),
            BuilderCommand::EditProperty { field, value } => {
                match PropertyPanel::for_selection(&self.canvas) {
                    Some(mut panel) => panel.edit(&mut self.canvas, field, &value),
                    None => false,
                }
            }
            BuilderCommand::MoveElement { from, to } => self.canvas.move_element(from, to),
            BuilderCommand::Select { id } => self.canvas.select(&id),
            BuilderCommand::Deselect => {
                self.canvas.deselect();
                true
            }
            BuilderCommand::RemoveSelected => match self.canvas.selected().cloned() {
                Some(id) => self.canvas.remove_element(&id).is_some(),
                None => false,
            },
            BuilderCommand::CommitTextEdit => {
                self.canvas.commit_text_edit();
                true
            }
            BuilderCommand::Undo => self.canvas.undo(),
            BuilderCommand::Redo => self.canvas.redo(),
            BuilderCommand::Save => {
                self.save();
                true
            }
            BuilderCommand::Preview => {
                self.preview();
                true
            }
        }
    }

    /// The canvas.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable access to the canvas, for direct manipulation.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Page being edited.
    #[must_use]
    pub fn page(&self) -> Option<&PageId> {
        self.page.as_ref()
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Close the session, returning the host. Unsaved changes are discarded.
    pub fn close(self) -> H {
        if self.has_unsaved_changes() {
            tracing::info!(page = ?self.page, "Closing builder with unsaved changes");
        }
        self.host
    }
}

impl<H: BuilderHost + std::fmt::Debug> std::fmt::Debug for BuilderSession<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuilderSession")
            .field("page", &self.page)
            .field("elements", &self.canvas.len())
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementPatch;

    #[derive(Debug, Default)]
    struct RecordingHost {
        saves: Vec<(Option<PageId>, Vec<PageElement>)>,
        previews: usize,
    }

    impl BuilderHost for RecordingHost {
        fn on_save(&mut self, page: Option<&PageId>, elements: &[PageElement]) {
            self.saves.push((page.cloned(), elements.to_vec()));
        }

        fn on_preview(&mut self, _page: Option<&PageId>, _elements: &[PageElement]) {
            self.previews += 1;
        }
    }

    fn session() -> BuilderSession<RecordingHost> {
        BuilderSession::open(
            Some(PageId::new("home")),
            Arc::new(WidgetCatalog::standard()),
            RecordingHost::default(),
        )
    }

    #[test]
    fn test_opens_empty() {
        let session = session();
        assert!(session.canvas().is_empty());
        assert_eq!(session.canvas().history().len(), 1);
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn test_save_hands_elements_to_host() {
        let mut session = session();
        session.dispatch(BuilderCommand::AddElement {
            widget_id: "heading".into(),
            at_index: None,
        });
        assert!(session.has_unsaved_changes());
        session.dispatch(BuilderCommand::Save);
        assert!(!session.has_unsaved_changes());

        let host = session.close();
        assert_eq!(host.saves.len(), 1);
        let (page, elements) = &host.saves[0];
        assert_eq!(page.as_ref().map(PageId::as_str), Some("home"));
        assert_eq!(elements[0].text(), "Novo Título");
    }

    #[test]
    fn test_undo_after_save_marks_dirty() {
        let mut session = session();
        session.dispatch(BuilderCommand::AddElement {
            widget_id: "text".into(),
            at_index: None,
        });
        session.save();
        session.dispatch(BuilderCommand::Undo);
        assert!(session.has_unsaved_changes());
        session.dispatch(BuilderCommand::Redo);
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn test_preview_calls_host() {
        let mut session = session();
        assert!(session.dispatch(BuilderCommand::Preview));
        assert_eq!(session.host().previews, 1);
    }

    #[test]
    fn test_edit_property_and_remove_selected() {
        let mut session = session();
        session.dispatch(BuilderCommand::AddElement {
            widget_id: "text".into(),
            at_index: None,
        });
        let id = session.canvas().elements()[0].id.clone();

        assert!(!session.dispatch(BuilderCommand::EditProperty {
            field: crate::PropertyField::Content,
            value: "sem seleção".into(),
        }));
        assert!(session.dispatch(BuilderCommand::Select { id: id.clone() }));
        assert!(session.dispatch(BuilderCommand::EditProperty {
            field: crate::PropertyField::Content,
            value: "Bem-vindo".into(),
        }));
        assert_eq!(session.canvas().get(&id).map(PageElement::text), Some("Bem-vindo"));

        assert!(session.dispatch(BuilderCommand::RemoveSelected));
        assert!(session.canvas().is_empty());
        assert!(!session.dispatch(BuilderCommand::RemoveSelected));
    }

    #[test]
    fn test_no_op_commands_report_false() {
        let mut session = session();
        assert!(!session.dispatch(BuilderCommand::Undo));
        assert!(!session.dispatch(BuilderCommand::Redo));
        assert!(!session.dispatch(BuilderCommand::MoveElement { from: 0, to: 1 }));
        assert!(!session.dispatch(BuilderCommand::UpdateElement {
            id: "missing".into(),
            patch: ElementPatch::content("x"),
        }));
    }

    #[test]
    fn test_resume_is_clean() {
        let saved = vec![PageElement::unknown("hero")];
        let session = BuilderSession::resume(
            Some(PageId::new("home")),
            Arc::new(WidgetCatalog::standard()),
            HistoryPolicy::default(),
            saved,
            RecordingHost::default(),
        );
        assert_eq!(session.canvas().len(), 1);
        assert!(!session.has_unsaved_changes());
    }
}
