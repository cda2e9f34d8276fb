//! # Page Builder CLI
//!
//! Command-line host for the page builder.

use std::io::Write as _;

use anyhow::Context as _;
use builder_cli::{
    read_script, run_edit, slugify, CliArgs, Command, HostConfig, PageRecord, PageStore,
};
use builder_core::{PageId, WidgetCatalog, WidgetCategory};
use builder_renderer::HtmlRenderer;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing, with JSON output when `RUST_LOG_FORMAT=json`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,builder_cli=debug,builder_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = HostConfig::from(&args);
    tracing::debug!("Data directory: {}", config.data_dir.display());

    let store = PageStore::with_data_dir(&config.data_dir).with_context(|| {
        format!("Failed to open data directory {}", config.data_dir.display())
    })?;

    match args.command {
        Command::Widgets { search } => list_widgets(search.as_deref()),
        Command::Pages => list_pages(&store),
        Command::Create { id, title, slug } => {
            let title = title.unwrap_or_else(|| id.clone());
            let slug = slug.unwrap_or_else(|| slugify(&title));
            let record = store.create(PageRecord::new(id, title).with_slug(slug))?;
            println!("Created page {} (/{})", record.id, record.slug);
            Ok(())
        }
        Command::Edit {
            script,
            resume,
            preview_out,
        } => {
            let page = required_page(&config)?;
            let commands = read_script(&script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let report = run_edit(&store, &config, &page, commands, resume)?;

            println!(
                "{page}: {} applied, {} ignored, {} blocks, {} saves",
                report.applied, report.ignored, report.blocks, report.saves
            );
            if report.discarded_changes {
                println!("Unsaved changes were discarded (add a \"save\" command to keep them)");
            }
            if let (Some(path), Some(html)) = (preview_out, report.preview) {
                std::fs::write(&path, html)
                    .with_context(|| format!("Failed to write preview {}", path.display()))?;
                println!("Preview written to {}", path.display());
            }
            if report.failed_saves > 0 {
                anyhow::bail!(
                    "{} of {} saves for {page} could not be written to {}",
                    report.failed_saves,
                    report.saves + report.failed_saves,
                    config.data_dir.display()
                );
            }
            Ok(())
        }
        Command::Preview { out } => {
            let page = required_page(&config)?;
            let record = store
                .get(page.as_str())
                .ok_or_else(|| anyhow::anyhow!("Page not found: {page}"))?;
            let renderer = HtmlRenderer::new(config.renderer.clone());
            let elements = record.elements()?;
            match out {
                Some(path) => {
                    let mut file = std::fs::File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    renderer.write_document(&elements, &mut file)?;
                    println!("Preview written to {}", path.display());
                }
                None => renderer.write_document(&elements, &mut std::io::stdout().lock())?,
            }
            Ok(())
        }
        Command::Delete => {
            let page = required_page(&config)?;
            let record = store.delete(page.as_str())?;
            println!("Deleted page {}", record.id);
            Ok(())
        }
    }
}

fn required_page(config: &HostConfig) -> anyhow::Result<PageId> {
    config
        .page
        .clone()
        .ok_or_else(|| anyhow::anyhow!("No page given (use --page or BUILDER_PAGE_ID)"))
}

fn list_widgets(search: Option<&str>) -> anyhow::Result<()> {
    let catalog = WidgetCatalog::standard();
    let mut out = std::io::stdout().lock();
    if let Some(query) = search {
        for widget in catalog.search(query) {
            writeln!(out, "{:<20} {}", widget.id, widget.name)?;
        }
        return Ok(());
    }
    for category in WidgetCategory::ALL {
        writeln!(out, "{}", category.label())?;
        for widget in catalog.by_category(category) {
            writeln!(out, "  {:<20} {}", widget.id, widget.name)?;
        }
    }
    Ok(())
}

fn list_pages(store: &PageStore) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    if store.is_empty() {
        writeln!(out, "No pages")?;
    }
    for record in store.list() {
        let blocks = record.elements().map_or(0, |e| e.len());
        writeln!(
            out,
            "{:<20} {:<30} /{:<20} {blocks} blocks",
            record.id, record.title, record.slug
        )?;
    }
    Ok(())
}
