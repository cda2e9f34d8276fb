//! Property panel for the selected element.
//!
//! Exposes the content and a fixed set of style properties. Every edit is
//! applied immediately through [`Canvas::update_element`].

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::element::{ElementId, ElementPatch};

/// Style properties editable from the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    /// Inner spacing.
    Padding,
    /// Outer spacing.
    Margin,
    /// Background color.
    BackgroundColor,
}

impl StyleProperty {
    /// All editable style properties in panel order.
    pub const ALL: [Self; 3] = [Self::Padding, Self::Margin, Self::BackgroundColor];

    /// Key in the element's style map.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Padding => "padding",
            Self::Margin => "margin",
            Self::BackgroundColor => "backgroundColor",
        }
    }

    /// Field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Padding => "Espaçamento interno",
            Self::Margin => "Margem",
            Self::BackgroundColor => "Cor de fundo",
        }
    }
}

/// A field of the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "field", content = "property", rename_all = "camelCase")]
pub enum PropertyField {
    /// The element's content.
    Content,
    /// One style property.
    Style(StyleProperty),
}

impl PropertyField {
    /// Field label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Content => "Conteúdo",
            Self::Style(property) => property.label(),
        }
    }

    /// Single-field patch setting this field to `value`.
    #[must_use]
    pub fn patch(self, value: impl Into<String>) -> ElementPatch {
        match self {
            Self::Content => ElementPatch::content(value),
            Self::Style(property) => ElementPatch::style(property.key(), value),
        }
    }
}

/// A field and its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// The field.
    pub field: PropertyField,
    /// Current value, empty when unset.
    pub value: String,
}

/// Editable values of the selected element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyPanel {
    /// Element being edited.
    pub element_id: ElementId,
    /// Element type, shown as the panel title.
    pub element_type: String,
    /// Fields in display order: content first, then styles.
    pub fields: Vec<PropertyValue>,
}

impl PropertyPanel {
    /// Panel for the current selection, or `None` when nothing is selected.
    #[must_use]
    pub fn for_selection(canvas: &Canvas) -> Option<Self> {
        let element = canvas.selected_element()?;
        let mut fields = vec![PropertyValue {
            field: PropertyField::Content,
            value: element.text().to_string(),
        }];
        fields.extend(StyleProperty::ALL.iter().map(|&property| PropertyValue {
            field: PropertyField::Style(property),
            value: element.style(property.key()).unwrap_or_default().to_string(),
        }));
        Some(Self {
            element_id: element.id.clone(),
            element_type: element.element_type.clone(),
            fields,
        })
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, field: PropertyField) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.value.as_str())
    }

    /// Apply an edit to the element and refresh the panel.
    ///
    /// Returns `false` if the element no longer exists.
    pub fn edit(&mut self, canvas: &mut Canvas, field: PropertyField, value: &str) -> bool {
        if !canvas.update_element(&self.element_id, &field.patch(value)) {
            return false;
        }
        if let Some(entry) = self.fields.iter_mut().find(|f| f.field == field) {
            entry.value = value.to_string();
        }
        true
    }

    /// The field lost focus; closes a coalesced text edit run.
    pub fn commit(&self, canvas: &mut Canvas) {
        canvas.commit_text_edit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_selection_no_panel() {
        let mut canvas = Canvas::default();
        canvas.add_element("text", None);
        assert!(PropertyPanel::for_selection(&canvas).is_none());
    }

    #[test]
    fn test_panel_reads_values() {
        let mut canvas = Canvas::default();
        let id = canvas.add_element("hero", None);
        canvas.select(&id);
        let panel = PropertyPanel::for_selection(&canvas).expect("panel");
        assert_eq!(panel.element_type, "hero");
        assert_eq!(panel.fields.len(), 4);
        assert_eq!(
            panel.value(PropertyField::Content),
            Some("Bem-vindos à Nossa Igreja")
        );
        assert_eq!(
            panel.value(PropertyField::Style(StyleProperty::BackgroundColor)),
            Some("#1e3a8a")
        );
        assert_eq!(panel.value(PropertyField::Style(StyleProperty::Margin)), Some(""));
    }

    #[test]
    fn test_edit_updates_element_and_history() {
        let mut canvas = Canvas::default();
        let id = canvas.add_element("text", None);
        canvas.select(&id);
        let mut panel = PropertyPanel::for_selection(&canvas).expect("panel");

        let padding = PropertyField::Style(StyleProperty::Padding);
        assert!(panel.edit(&mut canvas, padding, "24px"));
        assert!(panel.edit(&mut canvas, PropertyField::Content, "Culto às 19h"));

        let element = canvas.get(&id).expect("element");
        assert_eq!(element.style("padding"), Some("24px"));
        assert_eq!(element.text(), "Culto às 19h");
        assert_eq!(panel.value(padding), Some("24px"));
        assert_eq!(canvas.history().len(), 4);
    }

    #[test]
    fn test_edit_after_removal_fails() {
        let mut canvas = Canvas::default();
        let id = canvas.add_element("text", None);
        canvas.select(&id);
        let mut panel = PropertyPanel::for_selection(&canvas).expect("panel");
        canvas.remove_element(&id);
        assert!(!panel.edit(&mut canvas, PropertyField::Content, "x"));
    }

    #[test]
    fn test_field_serialization() {
        let json = serde_json::to_string(&PropertyField::Style(StyleProperty::BackgroundColor))
            .expect("serialize");
        assert_eq!(json, r#"{"field":"style","property":"backgroundColor"}"#);
        let field: PropertyField =
            serde_json::from_str(r#"{"field":"content"}"#).expect("deserialize");
        assert_eq!(field, PropertyField::Content);
    }
}
