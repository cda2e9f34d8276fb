//! # Page Builder Core
//!
//! Core logic for the drag-and-drop page builder of the church website admin.
//! Compiles to WASM so the dashboard drives the same store the host tests against.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              builder-core.wasm              │
//! ├─────────────────────────────────────────────┤
//! │  Widget Catalog  │  Canvas Store            │
//! │  - Categories    │  - Ordered elements      │
//! │  - Icons         │  - Selection             │
//! │  - Defaults      │  - Snapshot history      │
//! ├─────────────────────────────────────────────┤
//! │  Interaction     │  Session                 │
//! │  - Palette drop  │  - Host save/preview     │
//! │  - Row reorder   │  - JSON commands         │
//! │  - Property edit │  - Keyboard shortcuts    │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod history;
pub mod palette;
pub mod reorder;
pub mod schema;
pub mod session;
pub mod widget;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use canvas::Canvas;
pub use editor::{PropertyField, PropertyPanel, PropertyValue, StyleProperty};
pub use element::{ElementId, ElementPatch, PageElement, Props, StyleMap};
pub use error::{BuilderError, BuilderResult};
pub use event::{shortcut_for, BuilderCommand, KeyModifiers};
pub use history::{History, HistoryPolicy};
pub use palette::{CanvasDropTarget, Palette, PaletteItem, PaletteSection};
pub use reorder::{structure_rows, DragItem, HoverOutcome, RowBounds, StructureRow};
pub use schema::PageContent;
pub use session::{BuilderHost, BuilderSession, PageId};
pub use widget::{WidgetCatalog, WidgetCategory, WidgetDefinition, WidgetIcon};

/// Builder core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
