//! Builder host backed by the page store.

use builder_core::{BuilderHost, PageContent, PageElement, PageId};
use builder_renderer::HtmlRenderer;

use crate::store::{PageStore, StoreError};

/// Saves into a [`PageStore`] and renders previews to HTML.
///
/// Save and preview are fire-and-forget from the builder's side, so
/// failures are logged and counted rather than returned.
#[derive(Debug, Clone)]
pub struct StoreHost {
    store: PageStore,
    renderer: HtmlRenderer,
    last_preview: Option<String>,
    saves: usize,
    failed_saves: usize,
}

impl StoreHost {
    /// Create a host over `store`.
    #[must_use]
    pub fn new(store: PageStore, renderer: HtmlRenderer) -> Self {
        Self {
            store,
            renderer,
            last_preview: None,
            saves: 0,
            failed_saves: 0,
        }
    }

    /// The elements last saved for `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or its content is invalid.
    pub fn saved_elements(&self, page: &PageId) -> Result<Vec<PageElement>, StoreError> {
        self.store
            .get(page.as_str())
            .ok_or_else(|| StoreError::PageNotFound(page.to_string()))?
            .elements()
    }

    /// The most recent preview document.
    #[must_use]
    pub fn last_preview(&self) -> Option<&str> {
        self.last_preview.as_deref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }

    /// Number of saves that could not be stored.
    #[must_use]
    pub fn failed_saves(&self) -> usize {
        self.failed_saves
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &PageStore {
        &self.store
    }

    fn store_content(&self, page: Option<&PageId>, elements: &[PageElement]) -> Result<(), String> {
        let page = page.ok_or("no page to save into")?;
        let json = PageContent::from(elements)
            .to_json()
            .map_err(|e| e.to_string())?;
        self.store
            .save_content(page.as_str(), json)
            .map_err(|e| e.to_string())
    }
}

impl BuilderHost for StoreHost {
    fn on_save(&mut self, page: Option<&PageId>, elements: &[PageElement]) {
        match self.store_content(page, elements) {
            Ok(()) => {
                self.saves += 1;
                tracing::info!(page = ?page, blocks = elements.len(), "Page saved");
            }
            Err(e) => {
                self.failed_saves += 1;
                tracing::warn!(page = ?page, "Save failed: {e}");
            }
        }
    }

    fn on_preview(&mut self, page: Option<&PageId>, elements: &[PageElement]) {
        tracing::debug!(page = ?page, blocks = elements.len(), "Rendering preview");
        self.last_preview = Some(self.renderer.render_document(elements));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use builder_core::{BuilderCommand, BuilderSession, WidgetCatalog};

    use crate::store::PageRecord;

    fn host_with_page(id: &str) -> StoreHost {
        let store = PageStore::new();
        store.create(PageRecord::new(id, id)).expect("create");
        StoreHost::new(store, HtmlRenderer::default())
    }

    #[test]
    fn test_save_writes_content() {
        let mut session = BuilderSession::open(
            Some(PageId::new("inicio")),
            Arc::new(WidgetCatalog::standard()),
            host_with_page("inicio"),
        );
        session.dispatch(BuilderCommand::AddElement {
            widget_id: "heading".into(),
            at_index: None,
        });
        session.dispatch(BuilderCommand::Save);

        let host = session.close();
        assert_eq!(host.saves(), 1);
        let elements = host
            .saved_elements(&PageId::new("inicio"))
            .expect("saved");
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].element_type, "heading");
    }

    #[test]
    fn test_save_without_page_fails_quietly() {
        let mut host = host_with_page("inicio");
        host.on_save(None, &[]);
        host.on_save(Some(&PageId::new("missing")), &[]);
        assert_eq!(host.saves(), 0);
        assert_eq!(host.failed_saves(), 2);
    }

    #[test]
    fn test_preview_renders_document() {
        let mut host = host_with_page("inicio");
        assert!(host.last_preview().is_none());
        host.on_preview(None, &[PageElement::unknown("mystery-widget")]);
        let html = host.last_preview().expect("preview");
        assert!(html.contains("Elemento: mystery-widget"));
        assert_eq!(host.saves(), 0);
    }
}
