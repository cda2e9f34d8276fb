//! Element layouts.
//!
//! Heading, text, button, hero and container have bespoke layouts. Every
//! other type renders as a generic box naming the type, so an element can
//! always be drawn even when its widget has no layout here.

use std::fmt::Write as _;

use builder_core::PageElement;

use crate::markup::{escape, safe_href, style_attr};

/// Default heading level when the element has no valid `level` prop.
const DEFAULT_HEADING_LEVEL: u64 = 2;

/// Render a single element, recursing into children when present.
pub(crate) fn element_html(element: &PageElement, out: &mut String) {
    match element.element_type.as_str() {
        "heading" => heading(element, out),
        "text" => text(element, out),
        "button" => button(element, out),
        "hero" => hero(element, out),
        "container" => container(element, out),
        other => {
            tracing::trace!("Fallback layout for {other}");
            fallback(element, out);
        }
    }
}

fn heading(element: &PageElement, out: &mut String) {
    let level = element
        .props
        .get("level")
        .and_then(serde_json::Value::as_u64)
        .filter(|l| (1..=6).contains(l))
        .unwrap_or(DEFAULT_HEADING_LEVEL);
    let _ = write!(
        out,
        "<h{level} class=\"pb-heading\"{}>{}</h{level}>",
        style_attr(&element.styles),
        escape(element.text())
    );
}

fn text(element: &PageElement, out: &mut String) {
    let _ = write!(
        out,
        "<p class=\"pb-text\"{}>{}</p>",
        style_attr(&element.styles),
        escape(element.text())
    );
}

fn button(element: &PageElement, out: &mut String) {
    let href = safe_href(element.prop_str("href").unwrap_or("#"));
    let _ = write!(
        out,
        "<a class=\"pb-button\" href=\"{}\"{}>{}</a>",
        escape(href),
        style_attr(&element.styles),
        escape(element.text())
    );
}

fn hero(element: &PageElement, out: &mut String) {
    let _ = write!(
        out,
        "<section class=\"pb-hero\"{}><h1>{}</h1>",
        style_attr(&element.styles),
        escape(element.text())
    );
    if let Some(subtitle) = element.prop_str("subtitle").filter(|s| !s.is_empty()) {
        let _ = write!(out, "<p class=\"pb-hero-subtitle\">{}</p>", escape(subtitle));
    }
    out.push_str("</section>");
}

fn container(element: &PageElement, out: &mut String) {
    let _ = write!(
        out,
        "<div class=\"pb-container\"{}>",
        style_attr(&element.styles)
    );
    if !element.text().is_empty() {
        out.push_str(&escape(element.text()));
    }
    for child in element.children.iter().flatten() {
        element_html(child, out);
    }
    out.push_str("</div>");
}

fn fallback(element: &PageElement, out: &mut String) {
    let _ = write!(
        out,
        "<div class=\"pb-generic\" data-type=\"{}\"{}><p class=\"pb-generic-type\">Elemento: {}</p>",
        escape(&element.element_type),
        style_attr(&element.styles),
        escape(&element.element_type)
    );
    if !element.text().is_empty() {
        let _ = write!(
            out,
            "<div class=\"pb-generic-content\">{}</div>",
            escape(element.text())
        );
    }
    out.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use builder_core::{ElementId, ElementPatch, StyleMap};

    fn render(element: &PageElement) -> String {
        let mut out = String::new();
        element_html(element, &mut out);
        out
    }

    fn element(element_type: &str, content: &str) -> PageElement {
        PageElement {
            id: ElementId::from("el"),
            element_type: element_type.to_string(),
            props: builder_core::Props::new(),
            content: Some(content.to_string()),
            styles: StyleMap::new(),
            children: None,
        }
    }

    #[test]
    fn test_heading_level() {
        let mut heading = element("heading", "Cultos");
        assert_eq!(render(&heading), "<h2 class=\"pb-heading\">Cultos</h2>");
        ElementPatch::default()
            .with_prop("level", serde_json::json!(1))
            .apply(&mut heading);
        assert!(render(&heading).starts_with("<h1 "));
        ElementPatch::default()
            .with_prop("level", serde_json::json!(9))
            .apply(&mut heading);
        assert!(render(&heading).starts_with("<h2 "));
    }

    #[test]
    fn test_button_href() {
        let mut button = element("button", "Doe");
        assert!(render(&button).contains("href=\"#\""));
        ElementPatch::default()
            .with_prop("href", serde_json::json!("/doacoes?x=1&y=2"))
            .apply(&mut button);
        assert!(render(&button).contains("href=\"/doacoes?x=1&amp;y=2\""));
    }

    #[test]
    fn test_button_script_href_neutralized() {
        let mut button = element("button", "Doe");
        ElementPatch::default()
            .with_prop("href", serde_json::json!("javascript:alert(document.cookie)"))
            .apply(&mut button);
        let html = render(&button);
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript"));
    }

    #[test]
    fn test_hero_subtitle() {
        let mut hero = element("hero", "Bem-vindos");
        assert_eq!(
            render(&hero),
            "<section class=\"pb-hero\"><h1>Bem-vindos</h1></section>"
        );
        ElementPatch::default()
            .with_prop("subtitle", serde_json::json!("Domingo 10h"))
            .apply(&mut hero);
        assert!(render(&hero).contains("<p class=\"pb-hero-subtitle\">Domingo 10h</p>"));
    }

    #[test]
    fn test_container_renders_children() {
        let mut container = element("container", "");
        container.children = Some(vec![element("text", "dentro")]);
        assert_eq!(
            render(&container),
            "<div class=\"pb-container\"><p class=\"pb-text\">dentro</p></div>"
        );
    }

    #[test]
    fn test_fallback_names_type() {
        let html = render(&element("mystery-widget", ""));
        assert!(html.contains("Elemento: mystery-widget"));
        assert!(!html.contains("pb-generic-content"));

        let html = render(&element("donation-widget", "Contribua"));
        assert!(html.contains("Elemento: donation-widget"));
        assert!(html.contains("<div class=\"pb-generic-content\">Contribua</div>"));
    }

    #[test]
    fn test_missing_content_renders_empty() {
        let mut text = element("text", "");
        text.content = None;
        assert_eq!(render(&text), "<p class=\"pb-text\"></p>");
    }
}
