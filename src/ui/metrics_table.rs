// Vertex metrics table rendering

use crate::app::AppState;
use crate::metrics::{format_metric, VertexMetricsRow, COLUMN_TITLES};
use crate::theme::{kind_color, ACCENT_PURPLE, MIST, SELECTION_BG};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Row, Table},
    Frame,
};

/// Cells of one table row: vertex, type, then the eight metric columns
pub fn row_cells(row: &VertexMetricsRow) -> Vec<String> {
    let mut cells = Vec::with_capacity(2 + COLUMN_TITLES.len());
    cells.push(format!("{} {}", row.vertex_id, row.name));
    cells.push(row.kind.as_str().to_string());
    cells.extend(row.columns().iter().map(|v| format_metric(*v)));
    cells
}

pub fn render_metrics_table(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = app.metrics_rows();
    let cursor = app.cursor_node().map(|n| n.vertex_id);
    let focus = app.state.focus;

    let header = Row::new(
        ["Vertex", "Type"]
            .into_iter()
            .chain(COLUMN_TITLES)
            .map(|title| Cell::from(title).style(Style::default().fg(ACCENT_PURPLE).add_modifier(Modifier::BOLD))),
    );

    let body: Vec<Row> = rows
        .iter()
        .map(|row| {
            let mut style = Style::default().fg(MIST);
            if cursor == Some(row.vertex_id) {
                style = style.bg(SELECTION_BG);
            }
            if focus == row.vertex_id {
                style = style.fg(Color::White).add_modifier(Modifier::BOLD);
            }
            let cells = row_cells(row).into_iter().enumerate().map(|(idx, text)| {
                if idx == 1 {
                    Cell::from(text).style(Style::default().fg(kind_color(row.kind)))
                } else {
                    Cell::from(text)
                }
            });
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Min(14), Constraint::Length(9)];
    widths.extend(std::iter::repeat(Constraint::Min(10)).take(COLUMN_TITLES.len()));

    let title = if rows.is_empty() {
        " Metrics (no source or sink vertices) ".to_string()
    } else {
        format!(" Metrics ({} vertices) ", rows.len())
    };

    let table = Table::new(body, widths).header(header).column_spacing(1).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_PURPLE))
            .title(Span::styled(
                title,
                Style::default().fg(ACCENT_PURPLE).add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
