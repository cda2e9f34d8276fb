//! Drag-and-drop reordering in the structure list.
//!
//! Reordering is hover-driven: while a row is dragged over another row, the
//! dragged element is moved as soon as the pointer crosses the hovered row's
//! vertical midpoint. Each step is a single [`Canvas::move_element`] call, so
//! every intermediate order is a valid page.
//!
//! ```text
//! dragging down (drag < hover): move once pointer is below the midpoint
//! dragging up   (drag > hover): move once pointer is above the midpoint
//! ```

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::element::ElementId;
use crate::widget::WidgetIcon;

/// Vertical extent of a row, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowBounds {
    /// Top edge.
    pub top: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl RowBounds {
    /// Create bounds from top and bottom edges.
    #[must_use]
    pub const fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Distance from the top edge to the vertical midpoint.
    #[must_use]
    pub fn midpoint_offset(&self) -> f32 {
        (self.bottom - self.top) / 2.0
    }
}

/// What a hover step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// The dragged element moved.
    Moved {
        /// Index before the move.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// The pointer has not crossed the midpoint yet.
    Held,
    /// Hovering the dragged row itself.
    SameRow,
    /// The hovered index is not a valid row or the move was rejected.
    Ignored,
}

/// The row being dragged and its tracked position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragItem {
    /// Element being dragged.
    pub id: ElementId,
    /// Current index of the dragged element; updated after each move.
    pub index: usize,
}

impl DragItem {
    /// Start dragging the row at `index`. Returns `None` if there is no such row.
    #[must_use]
    pub fn begin(canvas: &Canvas, index: usize) -> Option<Self> {
        let element = canvas.elements().get(index)?;
        Some(Self {
            id: element.id.clone(),
            index,
        })
    }

    /// Handle the dragged row hovering the row at `hover_index`.
    ///
    /// `pointer_y` is the pointer's client y coordinate. The dragged element
    /// is located by id, so edits made mid-drag cannot redirect the move to
    /// another element; if it was removed the hover is ignored.
    pub fn hover(
        &mut self,
        canvas: &mut Canvas,
        hover_index: usize,
        bounds: RowBounds,
        pointer_y: f32,
    ) -> HoverOutcome {
        let Some(drag_index) = canvas.index_of(&self.id) else {
            tracing::debug!("Dragged element {} no longer on canvas", self.id);
            return HoverOutcome::Ignored;
        };
        self.index = drag_index;
        if drag_index == hover_index {
            return HoverOutcome::SameRow;
        }
        if hover_index >= canvas.len() {
            tracing::debug!("Hover over missing row {hover_index}");
            return HoverOutcome::Ignored;
        }

        let midpoint = bounds.midpoint_offset();
        let offset = pointer_y - bounds.top;

        if drag_index < hover_index && offset < midpoint {
            return HoverOutcome::Held;
        }
        if drag_index > hover_index && offset > midpoint {
            return HoverOutcome::Held;
        }

        if !canvas.move_element(drag_index, hover_index) {
            return HoverOutcome::Ignored;
        }
        self.index = hover_index;
        HoverOutcome::Moved {
            from: drag_index,
            to: hover_index,
        }
    }
}

/// One row of the structure list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRow {
    /// Position in the page.
    pub index: usize,
    /// Element id.
    pub id: ElementId,
    /// Element type.
    pub element_type: String,
    /// Widget display name, or the raw type for unknown widgets.
    pub name: String,
    /// Widget icon, [`WidgetIcon::Unknown`] for unknown widgets.
    pub icon: WidgetIcon,
    /// Whether this row is the selected element.
    pub selected: bool,
}

/// Build the structure list rows for a canvas.
#[must_use]
pub fn structure_rows(canvas: &Canvas) -> Vec<StructureRow> {
    let selected = canvas.selected();
    canvas
        .elements()
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let (name, icon) = canvas.catalog().get(&element.element_type).map_or_else(
                || (element.element_type.clone(), WidgetIcon::Unknown),
                |w| (w.name.clone(), w.icon),
            );
            StructureRow {
                index,
                id: element.id.clone(),
                element_type: element.element_type.clone(),
                name,
                icon,
                selected: selected == Some(&element.id),
            }
        })
        .collect()
}
