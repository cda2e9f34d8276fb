//! Replaying builder command scripts against stored pages.

use std::io::Read as _;
use std::path::Path;
use std::sync::Arc;

use builder_core::{BuilderCommand, BuilderSession, PageId, WidgetCatalog};
use builder_renderer::HtmlRenderer;

use crate::host::StoreHost;
use crate::store::{PageStore, StoreError};
use crate::HostConfig;

/// Outcome of an edit session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditReport {
    /// Commands that changed something.
    pub applied: usize,
    /// Commands that were no-ops.
    pub ignored: usize,
    /// Elements on the canvas when the session closed.
    pub blocks: usize,
    /// Successful saves.
    pub saves: usize,
    /// Saves the store could not persist.
    pub failed_saves: usize,
    /// Whether the session closed with unsaved changes, which were discarded.
    pub discarded_changes: bool,
    /// The last preview document, if one was requested.
    pub preview: Option<String>,
}

/// Read a JSON array of builder commands from `path`, or stdin for `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a command list.
pub fn read_script(path: &Path) -> Result<Vec<BuilderCommand>, StoreError> {
    let json = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(BuilderCommand::list_from_json(&json)?)
}

/// Open a builder session on `page`, apply `commands`, then close it.
///
/// With `resume`, the canvas starts from the page's saved content;
/// otherwise it starts empty. Anything not saved by a `save` command is
/// discarded when the session closes.
///
/// # Errors
///
/// Returns an error if the page does not exist, or if `resume` is set and
/// the saved content cannot be parsed.
pub fn run_edit(
    store: &PageStore,
    config: &HostConfig,
    page: &PageId,
    commands: Vec<BuilderCommand>,
    resume: bool,
) -> Result<EditReport, StoreError> {
    if store.get(page.as_str()).is_none() {
        return Err(StoreError::PageNotFound(page.to_string()));
    }

    let host = StoreHost::new(store.clone(), HtmlRenderer::new(config.renderer.clone()));
    let catalog = Arc::new(WidgetCatalog::standard());
    let mut session = if resume {
        let elements = host.saved_elements(page)?;
        BuilderSession::resume(Some(page.clone()), catalog, config.policy, elements, host)
    } else {
        BuilderSession::open_with_policy(Some(page.clone()), catalog, config.policy, host)
    };

    let mut report = EditReport::default();
    for command in commands {
        if session.dispatch(command) {
            report.applied += 1;
        } else {
            report.ignored += 1;
        }
    }

    report.blocks = session.canvas().len();
    report.discarded_changes = session.has_unsaved_changes();
    let host = session.close();
    report.saves = host.saves();
    report.failed_saves = host.failed_saves();
    report.preview = host.last_preview().map(str::to_string);

    tracing::info!(
        page = %page,
        applied = report.applied,
        ignored = report.ignored,
        saves = report.saves,
        failed_saves = report.failed_saves,
        "Edit session closed"
    );
    Ok(report)
}
