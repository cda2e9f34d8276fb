//! WebAssembly bindings for builder-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! The dashboard registers `onSave`/`onPreview` callbacks and drives the
//! builder with JSON commands.

use std::sync::Arc;

use wasm_bindgen::prelude::*;

use crate::{
    structure_rows, BuilderCommand, BuilderHost, BuilderSession, DragItem, HistoryPolicy,
    HoverOutcome, PageContent, PageElement, PageId, PropertyPanel, RowBounds, WidgetCatalog,
};

/// Initialize the builder WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

/// Host that forwards save/preview to JavaScript callbacks.
#[derive(Default)]
struct JsHost {
    on_save: Option<js_sys::Function>,
    on_preview: Option<js_sys::Function>,
}

impl JsHost {
    fn call(callback: Option<&js_sys::Function>, page: Option<&PageId>, elements: &[PageElement]) {
        let Some(callback) = callback else {
            return;
        };
        let json = match serde_json::to_string(elements) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize elements for callback: {e}");
                return;
            }
        };
        let page = page.map_or(JsValue::NULL, |p| JsValue::from_str(p.as_str()));
        if let Err(e) = callback.call2(&JsValue::NULL, &page, &JsValue::from_str(&json)) {
            tracing::warn!("Builder callback threw: {e:?}");
        }
    }
}

impl BuilderHost for JsHost {
    fn on_save(&mut self, page: Option<&PageId>, elements: &[PageElement]) {
        Self::call(self.on_save.as_ref(), page, elements);
    }

    fn on_preview(&mut self, page: Option<&PageId>, elements: &[PageElement]) {
        Self::call(self.on_preview.as_ref(), page, elements);
    }
}

/// Page builder instance for WASM.
#[wasm_bindgen]
pub struct WasmPageBuilder {
    session: BuilderSession<JsHost>,
    drag: Option<DragItem>,
}

#[wasm_bindgen]
impl WasmPageBuilder {
    /// Open a builder for a page with an empty canvas.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(page_id: Option<String>, coalesce_text_edits: bool) -> Self {
        let policy = HistoryPolicy {
            coalesce_text_edits,
        };
        Self {
            session: BuilderSession::open_with_policy(
                page_id.map(PageId::new),
                Arc::new(WidgetCatalog::standard()),
                policy,
                JsHost::default(),
            ),
            drag: None,
        }
    }

    /// Register the save callback: `(pageId, elementsJson) => void`.
    #[wasm_bindgen(js_name = setOnSave)]
    pub fn set_on_save(&mut self, callback: js_sys::Function) {
        self.session.host_mut().on_save = Some(callback);
    }

    /// Register the preview callback: `(pageId, elementsJson) => void`.
    #[wasm_bindgen(js_name = setOnPreview)]
    pub fn set_on_preview(&mut self, callback: js_sys::Function) {
        self.session.host_mut().on_preview = Some(callback);
    }

    /// Apply a JSON command. Returns whether it had an effect.
    ///
    /// Editing commands end any drag in progress.
    ///
    /// # Errors
    ///
    /// Returns an error string if the command cannot be parsed.
    #[wasm_bindgen(js_name = dispatch)]
    pub fn dispatch(&mut self, json: &str) -> Result<bool, String> {
        let command = BuilderCommand::from_json(json).map_err(|e| e.to_string())?;
        if command.is_mutation() {
            self.drag = None;
        }
        Ok(self.session.dispatch(command))
    }

    /// Get the current elements as JSON.
    #[wasm_bindgen(js_name = getElementsJson)]
    #[must_use]
    pub fn get_elements_json(&self) -> String {
        serde_json::to_string(self.session.canvas().elements()).unwrap_or_default()
    }

    /// Get the current page as a `{ "blocks": [...] }` document.
    #[wasm_bindgen(js_name = getPageContentJson)]
    #[must_use]
    pub fn get_page_content_json(&self) -> String {
        PageContent::from(self.session.canvas().elements())
            .to_json()
            .unwrap_or_default()
    }

    /// Get the structure list rows as JSON.
    #[wasm_bindgen(js_name = getStructureJson)]
    #[must_use]
    pub fn get_structure_json(&self) -> String {
        serde_json::to_string(&structure_rows(self.session.canvas())).unwrap_or_default()
    }

    /// Get the property panel of the selected element as JSON (`null` if none).
    #[wasm_bindgen(js_name = getPropertyPanelJson)]
    #[must_use]
    pub fn get_property_panel_json(&self) -> String {
        serde_json::to_string(&PropertyPanel::for_selection(self.session.canvas()))
            .unwrap_or_default()
    }

    /// Get the widget catalog as JSON.
    #[wasm_bindgen(js_name = getCatalogJson)]
    #[must_use]
    pub fn get_catalog_json(&self) -> String {
        let widgets: Vec<_> = self.session.canvas().catalog().iter().collect();
        serde_json::to_string(&widgets).unwrap_or_default()
    }

    /// Start dragging the structure row at `index`.
    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, index: usize) -> bool {
        self.drag = DragItem::begin(self.session.canvas(), index);
        self.drag.is_some()
    }

    /// The dragged row hovers row `index`. Returns whether the order changed.
    #[wasm_bindgen(js_name = hoverDrag)]
    pub fn hover_drag(&mut self, index: usize, top: f32, bottom: f32, pointer_y: f32) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let outcome = drag.hover(
            self.session.canvas_mut(),
            index,
            RowBounds::new(top, bottom),
            pointer_y,
        );
        matches!(outcome, HoverOutcome::Moved { .. })
    }

    /// Finish the current drag.
    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.canvas().can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.session.canvas().can_redo()
    }

    /// Whether there are changes since the last save.
    #[wasm_bindgen(js_name = hasUnsavedChanges)]
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.session.has_unsaved_changes()
    }
}
