//! Serialized page content as stored in a page record's `content` field.
//!
//! ```json
//! { "blocks": [ { "id": "...", "type": "heading", "content": "Novo Título", ... } ] }
//! ```

use serde::{Deserialize, Serialize};

use crate::element::PageElement;
use crate::BuilderResult;

/// Canonical page document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Top-level elements in page order.
    #[serde(default)]
    pub blocks: Vec<PageElement>,
}

/// Shapes accepted when reading stored content.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredContent {
    Document(PageContent),
    Bare(Vec<PageElement>),
}

impl PageContent {
    /// Document holding `blocks`.
    #[must_use]
    pub fn new(blocks: Vec<PageElement>) -> Self {
        Self { blocks }
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BuilderResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse stored content.
    ///
    /// Accepts the `{ "blocks": [...] }` document, a bare element array, or a
    /// blank string (an empty page).
    ///
    /// # Errors
    ///
    /// Returns an error if the content is neither shape.
    pub fn from_json(json: &str) -> BuilderResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let stored: StoredContent = serde_json::from_str(json)?;
        Ok(match stored {
            StoredContent::Document(doc) => doc,
            StoredContent::Bare(blocks) => Self { blocks },
        })
    }

    /// Number of top-level blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the page has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl From<&[PageElement]> for PageContent {
    fn from(elements: &[PageElement]) -> Self {
        Self::new(elements.to_vec())
    }
}
