// Vertex drawer rendering
//
// The drawer opens beside the overview when a vertex is focused and shows
// its identity, current status and per-table metrics.

use crate::app::AppState;
use crate::job::{JobStatus, VertexType};
use crate::metrics::{format_metric, table_breakdown, TableMetrics};
use crate::theme::{kind_color, status_color, status_icon, ACCENT_PURPLE, MIST};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// View model for the vertex drawer
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerView {
    pub vertex_id: i64,
    pub name: String,
    pub kind: VertexType,
    /// Displayed status, including any simulated update
    pub status: JobStatus,
    pub table_paths: Vec<String>,
    pub tables: Vec<TableMetrics>,
}

/// Build the drawer view for the focused vertex
///
/// None when the drawer is closed or the focused vertex is gone.
pub fn build_drawer_view(app: &AppState) -> Option<DrawerView> {
    if !app.state.drawer_open() {
        return None;
    }
    let vertex = app.state.job.vertex(app.state.focus)?;
    let status = app
        .scene
        .node_by_vertex(vertex.vertex_id)
        .map(|n| n.status)
        .unwrap_or(app.state.job.job_status);

    Some(DrawerView {
        vertex_id: vertex.vertex_id,
        name: vertex.vertex_name.clone(),
        kind: vertex.vertex_type,
        status,
        table_paths: vertex.table_paths.clone(),
        tables: table_breakdown(&app.state.job.metrics, vertex),
    })
}

fn field(label: &str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<8}", label), Style::default().fg(Color::DarkGray)),
        value,
    ])
}

pub fn render_drawer(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(view) = build_drawer_view(app) else {
        return;
    };

    let mut lines = vec![
        field("ID", Span::styled(view.vertex_id.to_string(), Style::default().fg(MIST))),
        field(
            "Name",
            Span::styled(view.name.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ),
        field("Type", Span::styled(view.kind.as_str(), Style::default().fg(kind_color(view.kind)))),
        field(
            "Status",
            Span::styled(
                format!("{} {}", status_icon(view.status), view.status.as_str()),
                Style::default().fg(status_color(view.status)),
            ),
        ),
        Line::from(""),
        Line::from(Span::styled(
            " Tables",
            Style::default().fg(ACCENT_PURPLE).add_modifier(Modifier::BOLD),
        )),
    ];

    if view.table_paths.is_empty() {
        lines.push(Line::from(Span::styled(
            "   (none)",
            Style::default().fg(MIST).add_modifier(Modifier::ITALIC),
        )));
    }

    if view.tables.is_empty() {
        for path in &view.table_paths {
            lines.push(Line::from(Span::styled(format!("   {}", path), Style::default().fg(MIST))));
        }
    } else {
        for table in &view.tables {
            lines.push(Line::from(Span::styled(
                format!("   {}", table.table_path),
                Style::default().fg(Color::White),
            )));
            for (name, value) in &table.values {
                lines.push(Line::from(vec![
                    Span::styled(format!("     {:<36}", name), Style::default().fg(Color::DarkGray)),
                    Span::styled(format_metric(*value), Style::default().fg(MIST)),
                ]));
            }
        }
    }

    let drawer = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(ACCENT_PURPLE))
            .title(Span::styled(
                format!(" Vertex {} ", view.vertex_id),
                Style::default().fg(ACCENT_PURPLE).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Span::styled(" Esc: close ", Style::default().fg(Color::DarkGray))),
    );

    f.render_widget(Clear, area);
    f.render_widget(drawer, area);
}
