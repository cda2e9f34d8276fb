//! # Page Builder Renderer
//!
//! HTML renderer for page-builder elements.
//!
//! ## Surfaces
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              HtmlRenderer                   │
//! ├─────────────┬─────────────┬─────────────────┤
//! │ Canvas      │ Preview     │ Structure list  │
//! │ (editable)  │ (read-only) │ (drag rows)     │
//! └─────────────┴─────────────┴─────────────────┘
//! ```
//!
//! Element types without a dedicated layout fall back to a generic box, so
//! rendering an element never fails.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
mod html;
pub mod markup;
pub mod structure;

pub use error::{RenderError, RenderResult};
pub use structure::{icon_glyph, render_structure};

use std::fmt::Write as _;

use builder_core::{ElementId, PageContent, PageElement};

/// Which surface is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Editing canvas: every element is wrapped in a selectable frame.
    #[default]
    Canvas,
    /// Read-only preview: bare element markup.
    Preview,
}

/// Configuration for the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Surface produced by [`HtmlRenderer::render`].
    pub mode: RenderMode,
    /// Title of standalone documents.
    pub title: String,
    /// Language attribute of standalone documents.
    pub lang: String,
    /// Placeholder shown on an empty canvas.
    pub empty_canvas_text: String,
    /// Stylesheet embedded in standalone documents.
    pub stylesheet: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Canvas,
            title: "Pré-visualização".to_string(),
            lang: "pt-BR".to_string(),
            empty_canvas_text: "Arraste widgets para cá".to_string(),
            stylesheet: Some(DEFAULT_STYLESHEET.to_string()),
        }
    }
}

/// Minimal stylesheet for the generic fallback and the canvas frames.
const DEFAULT_STYLESHEET: &str = "\
.pb-canvas-item{position:relative;outline:1px dashed transparent}\
.pb-canvas-item:hover{outline-color:#94a3b8}\
.pb-selected{outline:2px solid #2563eb}\
.pb-canvas-empty{padding:48px;text-align:center;color:#64748b}\
.pb-generic{padding:16px;border:1px dashed #cbd5e1;border-radius:8px}\
.pb-generic-type{font-size:12px;color:#64748b;margin:0}\
.pb-hero{text-align:center;color:#fff}\
.pb-button{display:inline-block;padding:8px 16px}";

/// Renders page elements to HTML.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    config: RendererConfig,
}

impl HtmlRenderer {
    /// Create a renderer with the given configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render a single element.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn render_element(&self, element: &PageElement) -> String {
        let mut out = String::new();
        html::element_html(element, &mut out);
        out
    }

    /// Render the page body as it will be published.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn render_page(&self, elements: &[PageElement]) -> String {
        let mut out = String::from("<main class=\"pb-page\">");
        for element in elements {
            html::element_html(element, &mut out);
        }
        out.push_str("</main>");
        out
    }

    /// Render the editing canvas, marking the selected element.
    #[must_use]
    pub fn render_canvas(
        &self,
        elements: &[PageElement],
        selected: Option<&ElementId>,
    ) -> String {
        let mut out = String::from("<div class=\"pb-canvas\">");
        if elements.is_empty() {
            let _ = write!(
                out,
                "<div class=\"pb-canvas-empty\">{}</div>",
                markup::escape(&self.config.empty_canvas_text)
            );
        }
        for element in elements {
            let class = if selected == Some(&element.id) {
                "pb-canvas-item pb-selected"
            } else {
                "pb-canvas-item"
            };
            let _ = write!(
                out,
                "<div class=\"{class}\" data-element-id=\"{}\">",
                markup::escape(element.id.as_str())
            );
            html::element_html(element, &mut out);
            out.push_str("</div>");
        }
        out.push_str("</div>");
        out
    }

    /// Render the configured surface. `selected` is ignored in preview mode.
    #[must_use]
    pub fn render(&self, elements: &[PageElement], selected: Option<&ElementId>) -> String {
        match self.config.mode {
            RenderMode::Canvas => self.render_canvas(elements, selected),
            RenderMode::Preview => self.render_page(elements),
        }
    }

    /// Render a standalone preview document.
    #[must_use]
    pub fn render_document(&self, elements: &[PageElement]) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        let _ = write!(
            out,
            "<html lang=\"{}\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{}</title>",
            markup::escape(&self.config.lang),
            markup::escape(&self.config.title)
        );
        if let Some(css) = &self.config.stylesheet {
            let _ = write!(out, "<style>{css}</style>");
        }
        out.push_str("</head><body>");
        out.push_str(&self.render_page(elements));
        out.push_str("</body></html>\n");
        out
    }

    /// Render a standalone document from stored page content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid page document.
    pub fn render_stored(&self, json: &str) -> RenderResult<String> {
        let content = PageContent::from_json(json)?;
        tracing::debug!("Rendering stored page with {} blocks", content.len());
        Ok(self.render_document(&content.blocks))
    }

    /// Write a standalone document to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_document<W: std::io::Write>(
        &self,
        elements: &[PageElement],
        writer: &mut W,
    ) -> RenderResult<()> {
        writer.write_all(self.render_document(elements).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use builder_core::{Canvas, WidgetCatalog};

    fn canvas() -> Canvas {
        Canvas::new(Arc::new(WidgetCatalog::standard()))
    }

    #[test]
    fn test_render_element_fallback() {
        let html = HtmlRenderer::default().render_element(&PageElement::unknown("mystery-widget"));
        assert!(html.starts_with("<div class=\"pb-generic\""));
        assert!(html.contains("Elemento: mystery-widget"));
    }

    #[test]
    fn test_empty_canvas_placeholder() {
        let renderer = HtmlRenderer::default();
        let html = renderer.render_canvas(&[], None);
        assert!(html.contains("Arraste widgets para cá"));
        assert_eq!(renderer.render_page(&[]), "<main class=\"pb-page\"></main>");
    }

    #[test]
    fn test_canvas_marks_selection() {
        let mut canvas = canvas();
        canvas.add_element("heading", None);
        let text = canvas.add_element("text", None);
        canvas.select(&text);

        let renderer = HtmlRenderer::default();
        let html = renderer.render(canvas.elements(), canvas.selected());
        assert_eq!(html.matches("pb-canvas-item").count(), 2);
        assert_eq!(html.matches("pb-selected").count(), 1);
        assert!(html.contains(&format!(
            "<div class=\"pb-canvas-item pb-selected\" data-element-id=\"{text}\">"
        )));
    }

    #[test]
    fn test_preview_has_no_frames() {
        let mut canvas = canvas();
        canvas.add_element("hero", None);
        let renderer = HtmlRenderer::new(RendererConfig {
            mode: RenderMode::Preview,
            ..RendererConfig::default()
        });
        let html = renderer.render(canvas.elements(), canvas.selected());
        assert!(!html.contains("pb-canvas-item"));
        assert!(html.contains("Bem-vindos"));
        assert!(html.contains("background-color: #1e3a8a"));
    }

    #[test]
    fn test_document_wraps_page() {
        let renderer = HtmlRenderer::new(RendererConfig {
            title: "Início".into(),
            stylesheet: None,
            ..RendererConfig::default()
        });
        let html = renderer.render_document(&[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Início</title>"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_render_stored_rejects_garbage() {
        let renderer = HtmlRenderer::default();
        assert!(matches!(
            renderer.render_stored("{ not json"),
            Err(RenderError::Content(_))
        ));
        assert!(renderer.render_stored("").is_ok());
    }

    #[test]
    fn test_write_document() {
        let renderer = HtmlRenderer::default();
        let mut buffer = Vec::new();
        renderer
            .write_document(&[], &mut buffer)
            .expect("write to vec");
        let html = String::from_utf8(buffer).expect("utf8");
        assert!(html.ends_with("</html>\n"));
    }
}
