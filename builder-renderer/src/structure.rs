//! Structure list markup.

use std::fmt::Write as _;

use builder_core::{StructureRow, WidgetIcon};

use crate::markup::escape;

/// Icon name (lucide set) used for a widget icon.
#[must_use]
pub const fn icon_glyph(icon: WidgetIcon) -> &'static str {
    match icon {
        WidgetIcon::Heading => "heading",
        WidgetIcon::Text => "type",
        WidgetIcon::Button => "mouse-pointer-click",
        WidgetIcon::Image => "image",
        WidgetIcon::Divider => "minus",
        WidgetIcon::Spacer => "move-vertical",
        WidgetIcon::Hero => "layout-template",
        WidgetIcon::Container => "square",
        WidgetIcon::Columns => "columns-3",
        WidgetIcon::Card => "credit-card",
        WidgetIcon::Quote => "quote",
        WidgetIcon::Gallery => "images",
        WidgetIcon::Mail => "mail",
        WidgetIcon::Newsletter => "newspaper",
        WidgetIcon::Prayer => "hand-heart",
        WidgetIcon::Video => "video",
        WidgetIcon::Audio => "music",
        WidgetIcon::LiveStream => "radio",
        WidgetIcon::Pastor => "user-round",
        WidgetIcon::Bible => "book-open",
        WidgetIcon::Donation => "heart-handshake",
        WidgetIcon::Clock => "clock",
        WidgetIcon::Calendar => "calendar",
        WidgetIcon::Users => "users",
        WidgetIcon::Code => "code",
        WidgetIcon::Map => "map-pin",
        WidgetIcon::Timer => "timer",
        WidgetIcon::Unknown => "box",
    }
}

/// Render the structure list: one draggable row per top-level element.
///
/// Rows carry `data-index` so the host can report hover positions back to
/// the drag controller.
#[must_use]
pub fn render_structure(rows: &[StructureRow]) -> String {
    let mut out = String::from("<ol class=\"pb-structure\">");
    if rows.is_empty() {
        out.push_str("<li class=\"pb-structure-empty\">Nenhum elemento</li>");
    }
    for row in rows {
        let class = if row.selected {
            "pb-structure-row pb-selected"
        } else {
            "pb-structure-row"
        };
        let _ = write!(
            out,
            "<li class=\"{class}\" draggable=\"true\" data-index=\"{}\" data-element-id=\"{}\">\
             <i data-lucide=\"{}\"></i><span>{}</span></li>",
            row.index,
            escape(row.id.as_str()),
            icon_glyph(row.icon),
            escape(&row.name)
        );
    }
    out.push_str("</ol>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use builder_core::ElementId;

    fn row(index: usize, name: &str, icon: WidgetIcon, selected: bool) -> StructureRow {
        StructureRow {
            index,
            id: ElementId::from(format!("el-{index}").as_str()),
            element_type: name.to_lowercase(),
            name: name.to_string(),
            icon,
            selected,
        }
    }

    #[test]
    fn test_empty_structure() {
        assert_eq!(
            render_structure(&[]),
            "<ol class=\"pb-structure\"><li class=\"pb-structure-empty\">Nenhum elemento</li></ol>"
        );
    }

    #[test]
    fn test_rows_in_order() {
        let html = render_structure(&[
            row(0, "Título", WidgetIcon::Heading, false),
            row(1, "Texto", WidgetIcon::Text, true),
        ]);
        let first = html.find("data-index=\"0\"").expect("row 0");
        let second = html.find("data-index=\"1\"").expect("row 1");
        assert!(first < second);
        assert!(html.contains("pb-structure-row pb-selected\" draggable=\"true\" data-index=\"1\""));
        assert!(html.contains("data-lucide=\"heading\""));
    }

    #[test]
    fn test_unknown_icon_glyph() {
        assert_eq!(icon_glyph(WidgetIcon::Unknown), "box");
        let html = render_structure(&[row(0, "<mystery>", WidgetIcon::Unknown, false)]);
        assert!(html.contains("<span>&lt;mystery&gt;</span>"));
    }
}
