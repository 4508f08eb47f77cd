//! Extracts a native table primitive from a `table` box: rows, spans, column widths, row
//! heights, per-cell fill, borders, alignment and margins.

use log::debug;

use super::{
    constants::MAX_CELL_SPAN,
    diagnostics::Diagnostics,
    shapes::dash_type,
    text::{flatten_text_runs, map_text_align},
    utils::{geometry_to_frame, px_to_in, px_to_pt, resolve_paint_reported},
};
use crate::config::ExportConfig;
use crate::models::{
    common::{Geometry, Side},
    primitives::{FillProps, LineProps, TableCell, TablePrimitive},
    styled_box::{BoxTag, StyledBox},
    text::VerticalAlign,
};

/// A row together with the section that holds it, if any.
struct RowRef<'a> {
    row: &'a StyledBox,
    section: Option<&'a StyledBox>,
}

impl<'a> RowRef<'a> {
    fn cells(&self) -> impl Iterator<Item = &'a StyledBox> {
        let row: &'a StyledBox = self.row;
        row.element_children()
            .filter(|cell| !cell.style.is_invisible())
    }

    fn column_count(&self) -> u32 {
        self.cells()
            .map(|cell| clamp_span(cell.col_span))
            .fold(0, u32::saturating_add)
    }
}

fn clamp_span(span: u32) -> u32 {
    span.clamp(1, MAX_CELL_SPAN)
}

/// Rows in document order: direct rows first-come, and rows nested in header/body/footer sections.
fn collect_rows(table: &StyledBox) -> Vec<RowRef<'_>> {
    let mut rows = Vec::new();
    for child in table.element_children() {
        if child.style.is_invisible() {
            continue;
        }
        match child.tag {
            BoxTag::Row => rows.push(RowRef { row: child, section: None }),
            BoxTag::Section => rows.extend(
                child
                    .element_children()
                    .filter(|row| row.tag == BoxTag::Row && !row.style.is_invisible())
                    .map(|row| RowRef {
                        row,
                        section: Some(child),
                    }),
            ),
            _ => {}
        }
    }
    rows
}

/// Column widths in inches.
///
/// Prefers a row that has one cell per column. Without one, the widest row is split: a cell
/// spanning `n` columns gives each of them `width / n`.
fn column_widths(rows: &[RowRef<'_>], config: &ExportConfig) -> Vec<f64> {
    let Some(max_columns) = rows.iter().map(RowRef::column_count).max() else {
        return Vec::new();
    };

    let simple = rows.iter().find(|row| {
        row.cells().count() as u32 == max_columns && row.cells().all(|cell| cell.col_span <= 1)
    });
    if let Some(row) = simple {
        return row
            .cells()
            .map(|cell| px_to_in(cell.geometry.width, config))
            .collect();
    }

    let mut widths = Vec::with_capacity(max_columns as usize);
    if let Some(widest) = rows.iter().find(|row| row.column_count() == max_columns) {
        for cell in widest.cells() {
            let span = clamp_span(cell.col_span);
            let share = px_to_in(cell.geometry.width, config) / f64::from(span);
            widths.extend(std::iter::repeat(share).take(span as usize));
        }
    }
    widths
}

fn cell_valign(value: &str) -> VerticalAlign {
    match value.trim().to_ascii_lowercase().as_str() {
        "middle" => VerticalAlign::Middle,
        "bottom" => VerticalAlign::Bottom,
        _ => VerticalAlign::Top,
    }
}

/// Border of one cell edge; top and bottom fall back to the row's edge.
fn cell_border(
    cell: &StyledBox,
    row: &StyledBox,
    side: Side,
    opacity: f64,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> Option<LineProps> {
    let own = cell.style.border.edge(side);
    let (owner, edge) = if own.is_drawn() {
        (cell, own)
    } else if matches!(side, Side::Top | Side::Bottom) && row.style.border.edge(side).is_drawn() {
        (row, row.style.border.edge(side))
    } else {
        return None;
    };
    let color = resolve_paint_reported(&edge.color, opacity, owner, diagnostics).present()?;
    Some(LineProps {
        color: color.hex,
        width_pt: px_to_pt(edge.width, config),
        dash: dash_type(&edge.style),
        transparency: color.transparency,
    })
}

/// First visible background of cell, row, then section.
fn cell_fill(
    cell: &StyledBox,
    row: &RowRef<'_>,
    opacity: f64,
    diagnostics: &mut Diagnostics,
) -> Option<FillProps> {
    [Some(cell), Some(row.row), row.section]
        .into_iter()
        .flatten()
        .find_map(|owner| {
            resolve_paint_reported(&owner.style.background_color, opacity, owner, diagnostics)
                .present()
        })
        .map(|color| FillProps {
            color: color.hex,
            transparency: color.transparency,
        })
}

/// Builds the table primitive for `table`.
///
/// # Arguments
/// * `table` - A box tagged `table`.
/// * `geometry` - The table's geometry with the pagination offset already applied.
/// * `opacity` - The table's effective opacity.
///
/// # Returns
/// The table primitive. Invisible rows and cells are left out.
pub(crate) fn extract_table(
    table: &StyledBox,
    geometry: &Geometry,
    opacity: f64,
    config: &ExportConfig,
    diagnostics: &mut Diagnostics,
) -> TablePrimitive {
    let rows = collect_rows(table);
    let column_widths = column_widths(&rows, config);
    let row_heights = rows
        .iter()
        .map(|row| px_to_in(row.row.geometry.height, config))
        .collect();

    let mut cells = Vec::with_capacity(rows.len());
    for row in &rows {
        let row_opacity = opacity * row.row.style.opacity;
        let mut row_cells = Vec::new();
        for cell in row.cells() {
            let cell_opacity = row_opacity * cell.style.opacity;
            let borders = Side::ALL
                .map(|side| cell_border(cell, row.row, side, cell_opacity, config, diagnostics));
            row_cells.push(TableCell {
                runs: flatten_text_runs(cell, cell_opacity, config, diagnostics),
                fill: cell_fill(cell, row, cell_opacity, diagnostics),
                borders,
                align: map_text_align(&cell.style.text_align),
                valign: cell_valign(&cell.style.vertical_align),
                margin_pt: cell.style.padding.map(|px| px_to_pt(px, config)).to_array(),
                col_span: clamp_span(cell.col_span),
                row_span: clamp_span(cell.row_span),
            });
        }
        cells.push(row_cells);
    }

    debug!(
        "[extract_table] {}: {} rows x {} columns",
        table.label(),
        cells.len(),
        column_widths.len()
    );
    TablePrimitive {
        frame: geometry_to_frame(geometry, config),
        column_widths,
        row_heights,
        rows: cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        styled_box::{BorderEdge, ResolvedStyle},
        text::TextAlign,
    };

    fn cell(x: f64, width: f64, text: &str) -> StyledBox {
        StyledBox::new(BoxTag::Cell, Geometry::new(x, 0.0, width, 24.0)).with_text(text)
    }

    fn row(y: f64, height: f64, cells: Vec<StyledBox>) -> StyledBox {
        cells.into_iter().fold(
            StyledBox::new(BoxTag::Row, Geometry::new(0.0, y, 288.0, height)),
            StyledBox::with_child,
        )
    }

    fn extract(table: &StyledBox) -> TablePrimitive {
        let mut diagnostics = Diagnostics::new();
        extract_table(table, &table.geometry, 1.0, &ExportConfig::default(), &mut diagnostics)
    }

    fn solid(width: f64, color: &str) -> BorderEdge {
        BorderEdge {
            width,
            color: color.to_string(),
            style: "solid".to_string(),
        }
    }

    #[test]
    fn test_rows_from_sections_and_direct_children() {
        let head = StyledBox::new(BoxTag::Section, Geometry::default())
            .with_child(row(0.0, 24.0, vec![cell(0.0, 96.0, "A"), cell(96.0, 192.0, "B")]));
        let table = StyledBox::new(BoxTag::Table, Geometry::new(0.0, 0.0, 288.0, 72.0))
            .with_child(head)
            .with_child(row(24.0, 48.0, vec![cell(0.0, 96.0, "1"), cell(96.0, 192.0, "2")]));

        let primitive = extract(&table);
        assert_eq!(primitive.rows.len(), 2);
        assert_eq!(primitive.column_widths, vec![1.0, 2.0]);
        assert_eq!(primitive.row_heights, vec![0.25, 0.5]);
        assert_eq!(primitive.rows[0][1].runs[0].text, "B");
        assert_eq!(primitive.rows[1][0].runs[0].text, "1");
    }

    #[test]
    fn test_column_widths_split_spanned_cells() {
        let mut wide = cell(0.0, 192.0, "spans two");
        wide.col_span = 2;
        let table = StyledBox::new(BoxTag::Table, Geometry::new(0.0, 0.0, 288.0, 48.0))
            .with_child(row(0.0, 24.0, vec![wide, cell(192.0, 96.0, "x")]));

        let primitive = extract(&table);
        assert_eq!(primitive.column_widths, vec![1.0, 1.0, 1.0]);
        assert_eq!(primitive.rows[0][0].col_span, 2);
    }

    #[test]
    fn test_extreme_spans_are_clamped() {
        let mut huge = cell(0.0, 96.0, "huge");
        huge.col_span = u32::MAX;
        huge.row_span = u32::MAX;
        let mut other = cell(96.0, 96.0, "other");
        other.col_span = u32::MAX;
        let table = StyledBox::new(BoxTag::Table, Geometry::new(0.0, 0.0, 192.0, 24.0))
            .with_child(row(0.0, 24.0, vec![huge, other]));

        let primitive = extract(&table);
        assert_eq!(primitive.rows[0][0].col_span, MAX_CELL_SPAN);
        assert_eq!(primitive.rows[0][0].row_span, MAX_CELL_SPAN);
        assert_eq!(primitive.column_widths.len(), 2 * MAX_CELL_SPAN as usize);
    }

    #[test]
    fn test_fill_cascades_from_cell_to_row_to_section() {
        let tinted = |color: &str| ResolvedStyle {
            background_color: color.to_string(),
            ..Default::default()
        };
        let own = cell(0.0, 96.0, "own").with_style(ResolvedStyle {
            background_color: "rgb(255, 0, 0)".to_string(),
            ..Default::default()
        });
        let header = StyledBox::new(BoxTag::Section, Geometry::default())
            .with_style(tinted("rgb(0, 0, 255)"))
            .with_child(row(0.0, 24.0, vec![own, cell(96.0, 96.0, "section")]));
        let striped = row(24.0, 24.0, vec![cell(0.0, 96.0, "row"), cell(96.0, 96.0, "row")])
            .with_style(tinted("rgb(0, 255, 0)"));
        let plain = row(48.0, 24.0, vec![cell(0.0, 96.0, ""), cell(96.0, 96.0, "")]);
        let table = StyledBox::new(BoxTag::Table, Geometry::new(0.0, 0.0, 192.0, 72.0))
            .with_child(header)
            .with_child(striped)
            .with_child(plain);

        let primitive = extract(&table);
        let fill = |r: usize, c: usize| primitive.rows[r][c].fill.as_ref().map(|f| f.color.as_str());
        assert_eq!(fill(0, 0), Some("FF0000"));
        assert_eq!(fill(0, 1), Some("0000FF"));
        assert_eq!(fill(1, 0), Some("00FF00"));
        assert_eq!(fill(2, 0), None);
    }

    #[test]
    fn test_row_border_falls_back_for_top_and_bottom_only() {
        let mut row_style = ResolvedStyle::default();
        row_style.border.bottom = solid(2.0, "black");
        row_style.border.left = solid(2.0, "black");
        let mut cell_style = ResolvedStyle::default();
        cell_style.border.top = solid(1.0, "red");

        let table = StyledBox::new(BoxTag::Table, Geometry::new(0.0, 0.0, 96.0, 24.0)).with_child(
            row(0.0, 24.0, vec![cell(0.0, 96.0, "x").with_style(cell_style)]).with_style(row_style),
        );
        let primitive = extract(&table);
        let [top, right, bottom, left] = &primitive.rows[0][0].borders;
        assert_eq!(top.as_ref().map(|line| line.color.as_str()), Some("FF0000"));
        assert!(right.is_none());
        assert_eq!(bottom.as_ref().map(|line| line.width_pt), Some(1.5));
        assert!(left.is_none(), "left edges never inherit the row border");
    }

    #[test]
    fn test_alignment_and_margins() {
        let style = ResolvedStyle {
            text_align: "center".to_string(),
            vertical_align: "middle".to_string(),
            padding: crate::models::common::Edges::new(8.0, 12.0, 8.0, 12.0),
            ..Default::default()
        };
        let table = StyledBox::new(BoxTag::Table, Geometry::new(0.0, 0.0, 96.0, 24.0))
            .with_child(row(0.0, 24.0, vec![cell(0.0, 96.0, "x").with_style(style)]));
        let primitive = extract(&table);
        let cell = &primitive.rows[0][0];
        assert_eq!(cell.align, TextAlign::Center);
        assert_eq!(cell.valign, VerticalAlign::Middle);
        assert_eq!(cell.margin_pt, [6.0, 9.0, 6.0, 9.0]);
    }

    #[test]
    fn test_hidden_row_is_left_out() {
        let hidden = row(24.0, 24.0, vec![cell(0.0, 96.0, "secret")]).with_style(ResolvedStyle {
            display: "none".to_string(),
            ..Default::default()
        });
        let table = StyledBox::new(BoxTag::Table, Geometry::new(0.0, 0.0, 96.0, 48.0))
            .with_child(row(0.0, 24.0, vec![cell(0.0, 96.0, "shown")]))
            .with_child(hidden);
        let primitive = extract(&table);
        assert_eq!(primitive.rows.len(), 1);
        assert_eq!(primitive.row_heights.len(), 1);
    }
}
