//! Widget palette and the canvas drop target.
//!
//! Dropping a palette item and clicking it both append a new element.
//! Positional drops from the palette are not supported.

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::element::ElementId;
use crate::widget::{WidgetCatalog, WidgetCategory, WidgetDefinition};

/// Drag payload carried from the palette to the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteItem {
    /// Widget to place.
    pub widget_id: String,
}

impl PaletteItem {
    /// Payload for a widget.
    #[must_use]
    pub fn new(widget_id: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
        }
    }
}

/// The canvas area that accepts palette drops.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasDropTarget;

impl CanvasDropTarget {
    /// Whether the target accepts this payload. Every palette item is accepted.
    #[must_use]
    pub fn can_drop(&self, _item: &PaletteItem) -> bool {
        true
    }

    /// Append the dropped widget to the page.
    pub fn drop_item(&self, canvas: &mut Canvas, item: &PaletteItem) -> ElementId {
        canvas.add_element(&item.widget_id, None)
    }
}

/// A category heading and its widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSection<'a> {
    /// Section category.
    pub category: WidgetCategory,
    /// Widgets in catalog order.
    pub widgets: Vec<&'a WidgetDefinition>,
}

/// The widget palette shown beside the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Palette<'a> {
    catalog: &'a WidgetCatalog,
}

impl<'a> Palette<'a> {
    /// Palette over a catalog.
    #[must_use]
    pub fn new(catalog: &'a WidgetCatalog) -> Self {
        Self { catalog }
    }

    /// Non-empty sections in display order, optionally filtered by a search query.
    #[must_use]
    pub fn sections(&self, query: Option<&str>) -> Vec<PaletteSection<'a>> {
        let matches = self.catalog.search(query.unwrap_or_default());
        WidgetCategory::ALL
            .iter()
            .filter_map(|&category| {
                let widgets: Vec<_> = matches
                    .iter()
                    .copied()
                    .filter(|w| w.category == category)
                    .collect();
                (!widgets.is_empty()).then_some(PaletteSection { category, widgets })
            })
            .collect()
    }

    /// Append a widget to the page, same as dropping it on the canvas.
    pub fn click_to_add(canvas: &mut Canvas, widget_id: &str) -> ElementId {
        CanvasDropTarget.drop_item(canvas, &PaletteItem::new(widget_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_appends() {
        let mut canvas = Canvas::default();
        let first = canvas.add_element("heading", None);
        let dropped = CanvasDropTarget.drop_item(&mut canvas, &PaletteItem::new("hero"));
        assert_eq!(canvas.index_of(&first), Some(0));
        assert_eq!(canvas.index_of(&dropped), Some(1));
    }

    #[test]
    fn test_click_matches_drop() {
        let mut clicked = Canvas::default();
        let mut dropped = Canvas::default();
        let a = Palette::click_to_add(&mut clicked, "bible-verse");
        let b = CanvasDropTarget.drop_item(&mut dropped, &PaletteItem::new("bible-verse"));

        let a = clicked.get(&a).expect("clicked element");
        let b = dropped.get(&b).expect("dropped element");
        assert_eq!(a.element_type, b.element_type);
        assert_eq!(a.content, b.content);
        assert_eq!(a.styles, b.styles);
        assert_eq!(clicked.history().len(), dropped.history().len());
    }

    #[test]
    fn test_sections_follow_category_order() {
        let catalog = WidgetCatalog::standard();
        let sections = Palette::new(&catalog).sections(None);
        let categories: Vec<_> = sections.iter().map(|s| s.category).collect();
        assert_eq!(categories, WidgetCategory::ALL.to_vec());
        let total: usize = sections.iter().map(|s| s.widgets.len()).sum();
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn test_sections_filtered_by_query() {
        let catalog = WidgetCatalog::standard();
        let sections = Palette::new(&catalog).sections(Some("vídeo"));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, WidgetCategory::Media);
        assert_eq!(sections[0].widgets[0].id, "video");
    }
}
