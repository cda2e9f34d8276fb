//! Page Builder Integration Tests
//!
//! Tests the element store and history end to end:
//! - Insert, remove, update and move semantics
//! - Undo/redo laws
//! - Drag reordering through the structure list
//! - Saving through a host

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use builder_core::{
    BuilderCommand, BuilderHost, BuilderSession, Canvas, DragItem, ElementId, ElementPatch,
    HoverOutcome, PageContent, PageElement, PageId, RowBounds, WidgetCatalog,
};

/// Canvas with the standard catalog.
fn canvas() -> Canvas {
    Canvas::new(Arc::new(WidgetCatalog::standard()))
}

/// Sorted element ids, for multiset comparison.
fn id_set(canvas: &Canvas) -> Vec<ElementId> {
    let mut ids: Vec<_> = canvas.elements().iter().map(|e| e.id.clone()).collect();
    ids.sort();
    ids
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_add_heading_records_history() {
    let mut canvas = canvas();
    canvas.add_element("heading", None);

    assert_eq!(canvas.len(), 1);
    assert_eq!(canvas.elements()[0].element_type, "heading");
    assert_eq!(canvas.elements()[0].text(), "Novo Título");
    assert_eq!(canvas.history().len(), 2);
    assert_eq!(canvas.history().cursor(), 1);
}

#[test]
fn test_undo_then_redo_restores_same_id() {
    let mut canvas = canvas();
    let id = canvas.add_element("heading", None);

    assert!(canvas.undo());
    assert!(canvas.is_empty());
    assert_eq!(canvas.history().cursor(), 0);

    assert!(canvas.redo());
    assert_eq!(canvas.len(), 1);
    assert_eq!(canvas.elements()[0].id, id);
}

#[test]
fn test_move_first_to_end() {
    let mut canvas = canvas();
    let a = canvas.add_element("heading", None);
    let b = canvas.add_element("text", None);
    let c = canvas.add_element("button", None);

    assert!(canvas.move_element(0, 2));
    let order: Vec<_> = canvas.elements().iter().map(|e| e.id.clone()).collect();
    assert_eq!(order, vec![b, c, a]);
}

#[test]
fn test_unknown_widget_is_placed() {
    let mut canvas = canvas();
    let id = canvas.add_element("mystery-widget", None);
    let element = canvas.get(&id).expect("element placed");
    assert_eq!(element.element_type, "mystery-widget");
    assert_eq!(element.text(), "");
}

#[test]
fn test_style_updates_merge() {
    let mut canvas = canvas();
    let id = canvas.add_element("text", None);
    canvas.update_element(&id, &ElementPatch::style("padding", "24px"));
    canvas.update_element(&id, &ElementPatch::style("backgroundColor", "#fff"));

    let element = canvas.get(&id).expect("element");
    assert_eq!(element.style("padding"), Some("24px"));
    assert_eq!(element.style("backgroundColor"), Some("#fff"));
    assert_eq!(element.style("fontSize"), Some("16px"));
}

#[test]
fn test_remove_nonexistent_keeps_history() {
    let mut canvas = canvas();
    canvas.add_element("text", None);
    canvas.add_element("text", None);
    let history_len = canvas.history().len();
    let cursor = canvas.history().cursor();

    assert!(canvas
        .remove_element(&ElementId::from("nonexistent-id"))
        .is_none());
    assert_eq!(canvas.len(), 2);
    assert_eq!(canvas.history().len(), history_len);
    assert_eq!(canvas.history().cursor(), cursor);
    assert_eq!(canvas.history().current(), canvas.elements());
}

// ============================================================================
// Property Tests
// ============================================================================

#[test]
fn test_ids_unique_across_many_adds() {
    let mut canvas = canvas();
    let widgets: Vec<String> = canvas.catalog().iter().map(|w| w.id.clone()).collect();
    for round in 0..10 {
        for (i, widget) in widgets.iter().enumerate() {
            let at = if (round + i) % 3 == 0 { Some(i) } else { None };
            canvas.add_element(widget, at);
        }
    }
    let unique: HashSet<_> = canvas.elements().iter().map(|e| e.id.clone()).collect();
    assert_eq!(unique.len(), canvas.len());
    assert_eq!(canvas.len(), widgets.len() * 10);
}

#[test]
fn test_ids_unique_after_undo_and_readd() {
    let mut canvas = canvas();
    let first = canvas.add_element("heading", None);
    canvas.undo();
    let second = canvas.add_element("heading", None);
    assert_ne!(first, second);
}

#[test]
fn test_length_changes_by_one() {
    let mut canvas = canvas();
    for widget in ["hero", "text", "donation-widget"] {
        let before = canvas.len();
        canvas.add_element(widget, None);
        assert_eq!(canvas.len(), before + 1);
    }
    let id = canvas.elements()[1].id.clone();
    let before = canvas.len();
    canvas.remove_element(&id);
    assert_eq!(canvas.len(), before - 1);
    canvas.remove_element(&id);
    assert_eq!(canvas.len(), before - 1);
}

#[test]
fn test_undo_redo_idempotence() {
    let mut canvas = canvas();
    let a = canvas.add_element("heading", None);
    canvas.add_element("text", None);
    canvas.update_element(&a, &ElementPatch::content("Cultos de Domingo"));
    canvas.move_element(1, 0);

    let before: Vec<PageElement> = canvas.elements().to_vec();
    canvas.undo();
    assert_ne!(canvas.elements(), before.as_slice());
    canvas.redo();
    assert_eq!(canvas.elements(), before.as_slice());
}

#[test]
fn test_history_truncation_law() {
    let mut canvas = canvas();
    canvas.add_element("heading", None);
    canvas.add_element("text", None);
    canvas.add_element("button", None);
    canvas.undo();
    canvas.undo();
    assert!(canvas.can_redo());

    canvas.add_element("hero", None);
    assert!(!canvas.can_redo());
    assert!(!canvas.redo());
    assert_eq!(canvas.history().len(), 3);
    let types: Vec<_> = canvas
        .elements()
        .iter()
        .map(|e| e.element_type.as_str())
        .collect();
    assert_eq!(types, vec!["heading", "hero"]);
}

#[test]
fn test_cursor_snapshot_matches_live_sequence() {
    let mut canvas = canvas();
    let a = canvas.add_element("heading", None);
    assert_eq!(canvas.history().current(), canvas.elements());
    canvas.update_element(&a, &ElementPatch::style("margin", "0 auto"));
    assert_eq!(canvas.history().current(), canvas.elements());
    canvas.add_element("text", Some(0));
    canvas.move_element(0, 1);
    assert_eq!(canvas.history().current(), canvas.elements());
    canvas.undo();
    assert_eq!(canvas.history().current(), canvas.elements());
}

#[test]
fn test_move_preserves_membership() {
    let mut canvas = canvas();
    for widget in ["heading", "text", "button", "hero", "container"] {
        canvas.add_element(widget, None);
    }
    let before = id_set(&canvas);
    for (from, to) in [(0, 4), (3, 1), (2, 2), (4, 0), (1, 3)] {
        assert!(canvas.move_element(from, to));
        assert_eq!(id_set(&canvas), before);
    }
}

#[test]
fn test_past_snapshots_unaffected_by_edits() {
    let mut canvas = canvas();
    let id = canvas.add_element("hero", None);
    let snapshot_one: Vec<PageElement> = canvas.history().current().to_vec();

    canvas.update_element(
        &id,
        &ElementPatch::style("backgroundColor", "#000").with_prop("subtitle", "Cultos".into()),
    );
    assert_eq!(canvas.history().get(1), Some(snapshot_one.as_slice()));
}

// ============================================================================
// Drag Reorder Tests
// ============================================================================

#[test]
fn test_drag_down_through_list_moves_step_by_step() {
    let mut canvas = canvas();
    let ids: Vec<_> = ["heading", "text", "button", "hero"]
        .iter()
        .map(|w| canvas.add_element(w, None))
        .collect();
    let history_before = canvas.history().len();

    let mut drag = DragItem::begin(&canvas, 0).expect("row 0");
    for hover in 1..4 {
        #[allow(clippy::cast_precision_loss)]
        let top = hover as f32 * 40.0;
        let bounds = RowBounds::new(top, top + 40.0);
        assert_eq!(drag.hover(&mut canvas, hover, bounds, top + 5.0), HoverOutcome::Held);
        assert_eq!(
            drag.hover(&mut canvas, hover, bounds, top + 35.0),
            HoverOutcome::Moved {
                from: hover - 1,
                to: hover
            }
        );
    }

    assert_eq!(canvas.elements()[3].id, ids[0]);
    assert_eq!(canvas.history().len(), history_before + 3);
}

// ============================================================================
// Session Tests
// ============================================================================

#[derive(Default)]
struct MemoryHost {
    pages: BTreeMap<String, String>,
}

impl BuilderHost for MemoryHost {
    fn on_save(&mut self, page: Option<&PageId>, elements: &[PageElement]) {
        let Some(page) = page else { return };
        let json = PageContent::from(elements).to_json().expect("serialize");
        self.pages.insert(page.to_string(), json);
    }

    fn on_preview(&mut self, _page: Option<&PageId>, _elements: &[PageElement]) {}
}

#[test]
fn test_session_script_and_save() {
    let script = r#"[
        {"type": "add_element", "widget_id": "hero"},
        {"type": "add_element", "widget_id": "bible-verse"},
        {"type": "add_element", "widget_id": "heading", "at_index": 1},
        {"type": "move_element", "from": 2, "to": 0},
        {"type": "undo"},
        {"type": "save"}
    ]"#;
    let commands = BuilderCommand::list_from_json(script).expect("parse script");

    let mut session = BuilderSession::open(
        Some(PageId::new("inicio")),
        Arc::new(WidgetCatalog::standard()),
        MemoryHost::default(),
    );
    for command in commands {
        session.dispatch(command);
    }
    assert!(!session.has_unsaved_changes());

    let host = session.close();
    let saved = PageContent::from_json(&host.pages["inicio"]).expect("parse saved");
    let types: Vec<_> = saved.blocks.iter().map(|b| b.element_type.as_str()).collect();
    assert_eq!(types, vec!["hero", "heading", "bible-verse"]);
}

#[test]
fn test_closing_without_save_discards() {
    let mut session = BuilderSession::open(
        Some(PageId::new("inicio")),
        Arc::new(WidgetCatalog::standard()),
        MemoryHost::default(),
    );
    session.dispatch(BuilderCommand::AddElement {
        widget_id: "text".into(),
        at_index: None,
    });
    assert!(session.has_unsaved_changes());
    let host = session.close();
    assert!(host.pages.is_empty());
}
