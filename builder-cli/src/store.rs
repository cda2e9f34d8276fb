//! Page storage for the reference host.
//!
//! [`PageStore`] keeps page records in memory and, when given a data
//! directory, mirrors every change to one JSON file per page.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use builder_core::{BuilderError, PageContent, PageElement};
use serde::{Deserialize, Serialize};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested page does not exist.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// The id is empty or contains characters not allowed in a file name.
    #[error("Invalid page id {0:?}: use letters, digits, '-' or '_'")]
    InvalidPageId(String),
    /// A page with this id already exists.
    #[error("Page already exists: {0}")]
    DuplicatePage(String),
    /// The stored page content is not a valid document.
    #[error("Invalid page content: {0}")]
    Content(#[from] BuilderError),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A record could not be serialized or parsed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A stored page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Page content as a `{ "blocks": [...] }` document. Empty until first save.
    #[serde(default)]
    pub content: String,
    /// Last modification, Unix milliseconds.
    pub updated_at: u64,
}

impl PageRecord {
    /// Create an empty page record.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            slug: slugify(&title),
            title,
            content: String::new(),
            updated_at: current_timestamp_ms(),
        }
    }

    /// Set the slug.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Parse the stored content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid page document.
    pub fn elements(&self) -> Result<Vec<PageElement>, StoreError> {
        Ok(PageContent::from_json(&self.content)?.blocks)
    }
}

/// Thread-safe page storage.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pages: Arc<RwLock<HashMap<String, PageRecord>>>,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
}

impl PageStore {
    /// Create an in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store persisted to `data_dir`, loading any pages found there.
    ///
    /// The directory is created if it doesn't exist. Files that cannot be
    /// parsed are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created or read.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        let store = Self {
            pages: Arc::new(RwLock::new(HashMap::new())),
            data_dir: Some(data_dir),
        };
        let loaded = store.load_all()?;
        tracing::debug!("Loaded {loaded} pages from disk");
        Ok(store)
    }

    /// The data directory, if persistent.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Create a new empty page.
    ///
    /// The page file is written before the record becomes visible, so a
    /// page that could not be persisted is never reported as created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPageId`] if the id is not usable as a
    /// file name, [`StoreError::DuplicatePage`] if the id (or its file) is
    /// taken, and [`StoreError::Io`] if the page file cannot be written.
    pub fn create(&self, record: PageRecord) -> Result<PageRecord, StoreError> {
        if !is_valid_page_id(&record.id) {
            return Err(StoreError::InvalidPageId(record.id));
        }
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if pages.contains_key(&record.id) || self.page_file_exists(&record.id) {
            return Err(StoreError::DuplicatePage(record.id));
        }
        self.persist_page(&record)?;
        pages.insert(record.id.clone(), record.clone());
        tracing::info!("Created page {}", record.id);
        Ok(record)
    }

    /// Get a page by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<PageRecord> {
        let pages = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pages.get(id).cloned()
    }

    /// All pages, ordered by id.
    #[must_use]
    pub fn list(&self) -> Vec<PageRecord> {
        let pages = self
            .pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut records: Vec<_> = pages.values().cloned().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }

    /// Replace a page's content document.
    ///
    /// The stored record only changes once the page file has been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if the page does not exist and
    /// [`StoreError::Io`] if the page file cannot be written.
    pub fn save_content(&self, id: &str, content: String) -> Result<(), StoreError> {
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let record = pages
            .get_mut(id)
            .ok_or_else(|| StoreError::PageNotFound(id.to_string()))?;
        let updated = PageRecord {
            content,
            updated_at: current_timestamp_ms(),
            ..record.clone()
        };
        self.persist_page(&updated)?;
        *record = updated;
        Ok(())
    }

    /// Delete a page and its file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PageNotFound`] if the page does not exist and
    /// [`StoreError::Io`] if the page file cannot be removed; the page is
    /// kept in that case.
    pub fn delete(&self, id: &str) -> Result<PageRecord, StoreError> {
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if !pages.contains_key(id) {
            return Err(StoreError::PageNotFound(id.to_string()));
        }
        self.delete_page_file(id)?;
        let record = pages
            .remove(id)
            .ok_or_else(|| StoreError::PageNotFound(id.to_string()))?;
        tracing::info!("Deleted page {id}");
        Ok(record)
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the store has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn page_path(data_dir: &Path, id: &str) -> PathBuf {
        data_dir.join(format!("{}.json", sanitize_filename(id)))
    }

    fn page_file_exists(&self, id: &str) -> bool {
        self.data_dir
            .as_deref()
            .is_some_and(|dir| Self::page_path(dir, id).exists())
    }

    /// Write a page to disk. No-op without a data directory.
    fn persist_page(&self, record: &PageRecord) -> Result<(), StoreError> {
        let Some(ref data_dir) = self.data_dir else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(record)?;
        let path = Self::page_path(data_dir, &record.id);
        std::fs::write(&path, json).map_err(|e| {
            tracing::warn!(
                "Failed to persist page {} to {}: {e}",
                record.id,
                path.display()
            );
            StoreError::Io(e)
        })
    }

    /// Load every `*.json` record in the data directory. Returns the count.
    fn load_all(&self) -> Result<usize, StoreError> {
        let Some(ref data_dir) = self.data_dir else {
            return Ok(0);
        };
        let mut loaded = Vec::new();
        for entry in std::fs::read_dir(data_dir)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match Self::read_record(&path) {
                Ok(record) if path.file_stem().is_some_and(|stem| stem == record.id.as_str()) => {
                    loaded.push(record);
                }
                Ok(record) => tracing::warn!(
                    "Skipping {}: holds page {:?} which belongs in another file",
                    path.display(),
                    record.id
                ),
                Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
            }
        }
        let count = loaded.len();
        let mut pages = self
            .pages
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for record in loaded {
            pages.insert(record.id.clone(), record);
        }
        Ok(count)
    }

    fn read_record(path: &Path) -> Result<PageRecord, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Remove a page file. A file that is already gone is not an error.
    fn delete_page_file(&self, id: &str) -> Result<(), StoreError> {
        let Some(ref data_dir) = self.data_dir else {
            return Ok(());
        };
        let path = Self::page_path(data_dir, id);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::warn!("Failed to delete page file {}: {e}", path.display());
                Err(StoreError::Io(e))
            }
        }
    }
}

/// Derive a URL slug from a title.
///
/// Lowercases ASCII letters, folds common Portuguese accents and joins words
/// with `-`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars().flat_map(char::to_lowercase) {
        let c = match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        };
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Whether `id` can be used as a page id.
///
/// Valid ids map to file names unchanged, so two distinct ids never share
/// a page file.
#[must_use]
pub fn is_valid_page_id(id: &str) -> bool {
    !id.is_empty() && sanitize_filename(id) == id
}

/// Sanitize a page id for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Get the current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| {
        #[allow(clippy::cast_possible_truncation)]
        {
            d.as_millis() as u64
        }
    })
}
