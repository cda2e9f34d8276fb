//! # Page Builder CLI
//!
//! Reference host for the page builder.
//!
//! Pages live in a data directory as one JSON file each. The `edit`
//! subcommand opens a builder session on a page and replays a script of
//! builder commands against it, exactly as the dashboard would send them.
//!
//! ## Usage
//!
//! ```bash
//! page-builder create inicio --title "Início"
//! page-builder edit --page inicio --script edits.json
//! page-builder preview --page inicio --out inicio.html
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `HostConfig` - Data directory, default page and history policy
//! - `PageStore` - File-backed page records
//! - `StoreHost` - `BuilderHost` that saves into the store and renders previews

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod host;
pub mod script;
pub mod store;

pub use host::StoreHost;
pub use script::{read_script, run_edit, EditReport};
pub use store::{is_valid_page_id, slugify, PageRecord, PageStore, StoreError};

use std::path::PathBuf;

use builder_core::{HistoryPolicy, PageId};
use builder_renderer::RendererConfig;
use clap::{Parser, Subcommand};

/// Default data directory when none is configured.
pub const DEFAULT_DATA_DIR: &str = "pages";

/// Command-line arguments for page-builder.
#[derive(Debug, Clone, Parser)]
#[command(name = "page-builder")]
#[command(about = "Edit church website pages with the page builder")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding one JSON file per page
    #[arg(long, env = "BUILDER_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Default page for commands that take one
    #[arg(long, env = "BUILDER_PAGE_ID", global = true)]
    pub page: Option<String>,

    /// Merge consecutive text edits of one element into a single undo step
    #[arg(long)]
    pub coalesce_text_edits: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the widget catalog
    Widgets {
        /// Filter by name or id
        #[arg(long)]
        search: Option<String>,
    },
    /// List stored pages
    Pages,
    /// Create an empty page
    Create {
        /// Page id
        id: String,
        /// Display title (defaults to the id)
        #[arg(long)]
        title: Option<String>,
        /// URL slug (derived from the title when omitted)
        #[arg(long)]
        slug: Option<String>,
    },
    /// Replay a command script against a page
    Edit {
        /// JSON array of builder commands; `-` reads stdin
        #[arg(long)]
        script: PathBuf,
        /// Start from the page's saved content instead of an empty canvas
        #[arg(long)]
        resume: bool,
        /// Write the last preview document here
        #[arg(long)]
        preview_out: Option<PathBuf>,
    },
    /// Render a page's saved content as a standalone HTML document
    Preview {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete a page
    Delete,
}

/// Host configuration.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Directory holding page files.
    pub data_dir: PathBuf,
    /// Default page.
    pub page: Option<PageId>,
    /// Snapshot policy for builder sessions.
    pub policy: HistoryPolicy,
    /// Renderer settings for previews.
    pub renderer: RendererConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl HostConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page: None,
            policy: HistoryPolicy::default(),
            renderer: RendererConfig::default(),
        }
    }
}

impl From<&CliArgs> for HostConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            data_dir: args.data_dir.clone(),
            page: args.page.clone().map(PageId::new),
            policy: HistoryPolicy {
                coalesce_text_edits: args.coalesce_text_edits,
            },
            renderer: RendererConfig::default(),
        }
    }
}
