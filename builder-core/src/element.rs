//! Page elements - the widgets placed on a page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::widget::{default_content_for, WidgetDefinition};

/// Style properties keyed by their camelCase CSS name (e.g. `backgroundColor`).
pub type StyleMap = BTreeMap<String, String>;

/// Free-form element properties.
pub type Props = serde_json::Map<String, serde_json::Value>;

/// Unique identifier for a page element.
///
/// New ids are UUID v4 strings. Any string is accepted on load so pages saved
/// by older editors keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A widget instance placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElement {
    /// Unique identifier, stable across moves and edits.
    pub id: ElementId,
    /// Widget type, copied from the definition at insertion time.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Free-form properties.
    #[serde(default)]
    pub props: Props,
    /// Textual or HTML payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Style properties.
    #[serde(default)]
    pub styles: StyleMap,
    /// Nested elements. Reserved for container nesting; no operation fills it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PageElement>>,
}

impl PageElement {
    /// Build a fresh element from a widget definition.
    ///
    /// Content falls back to the canned default for the widget type, then to
    /// an empty string.
    #[must_use]
    pub fn from_widget(widget: &WidgetDefinition) -> Self {
        let content = widget
            .content
            .clone()
            .unwrap_or_else(|| default_content_for(&widget.widget_type).to_string());
        Self {
            id: ElementId::new(),
            element_type: widget.widget_type.clone(),
            props: widget.props.clone().unwrap_or_default(),
            content: Some(content),
            styles: widget.styles.clone().unwrap_or_default(),
            children: None,
        }
    }

    /// Build an element for a type that has no catalog entry.
    #[must_use]
    pub fn unknown(element_type: impl Into<String>) -> Self {
        let element_type = element_type.into();
        let content = default_content_for(&element_type).to_string();
        Self {
            id: ElementId::new(),
            element_type,
            props: Props::new(),
            content: Some(content),
            styles: StyleMap::new(),
            children: None,
        }
    }

    /// Content as a string slice, empty when unset.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Look up a single style value.
    #[must_use]
    pub fn style(&self, key: &str) -> Option<&str> {
        self.styles.get(key).map(String::as_str)
    }

    /// Look up a string property.
    #[must_use]
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(serde_json::Value::as_str)
    }
}

/// A partial update to an element.
///
/// Unset fields are preserved. Set maps merge key by key: new keys are added,
/// existing keys are overwritten and omitted keys are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    /// Properties to merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
    /// Replacement content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Styles to merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
}

impl ElementPatch {
    /// Patch that replaces the content.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Patch that sets a single style.
    #[must_use]
    pub fn style(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::default().with_style(key, value)
    }

    /// Add a style to this patch.
    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles
            .get_or_insert_with(StyleMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Add a property to this patch.
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.props
            .get_or_insert_with(Props::new)
            .insert(key.into(), value);
        self
    }

    /// Whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_none() && self.content.is_none() && self.styles.is_none()
    }

    /// Whether the patch only touches the content.
    #[must_use]
    pub fn is_content_only(&self) -> bool {
        self.content.is_some() && self.props.is_none() && self.styles.is_none()
    }

    /// Merge this patch into `element`.
    ///
    /// Returns `true` if any field changed.
    pub fn apply(&self, element: &mut PageElement) -> bool {
        let mut changed = false;

        if let Some(props) = &self.props {
            for (key, value) in props {
                if element.props.get(key) != Some(value) {
                    element.props.insert(key.clone(), value.clone());
                    changed = true;
                }
            }
        }

        if let Some(content) = &self.content {
            if element.content.as_ref() != Some(content) {
                element.content = Some(content.clone());
                changed = true;
            }
        }

        if let Some(styles) = &self.styles {
            for (key, value) in styles {
                if element.styles.get(key) != Some(value) {
                    element.styles.insert(key.clone(), value.clone());
                    changed = true;
                }
            }
        }

        changed
    }
}
