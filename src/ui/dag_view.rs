// DAG canvas rendering
//
// Draws the scene on a Braille canvas. Scene coordinates grow downward,
// canvas coordinates grow upward, so every y is negated before drawing.

use super::text::truncate_to_width;
use crate::app::AppState;
use crate::dag::{edge_path, point_along, Port, Scene, NODE_SPACING_X, NODE_SPACING_Y, NODE_WIDTH};
use crate::job::JobStatus;
use crate::theme::{
    interpolate_color, kind_color, status_color, status_icon, ACCENT_PURPLE, AMBER, LIME, MIST,
    SELECTION_BG, SKY,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Rectangle},
        Block, BorderType, Borders, Paragraph,
    },
    Frame,
};

/// Height of a node box in scene units
pub const NODE_HEIGHT: f64 = 40.0;

/// Blank border kept around the outermost nodes, in scene units
const CANVAS_MARGIN: f64 = 40.0;

const PARTICLE_SYMBOL: &str = "•";
const PORT_SYMBOL: &str = "◆";
const PARTICLE_OFFSETS: [f32; 2] = [0.0, 0.5];

/// Canvas bounds covering every node of the scene
///
/// Returns `([x_min, x_max], [y_min, y_max])` in canvas coordinates.
pub fn scene_bounds(scene: &Scene) -> ([f64; 2], [f64; 2]) {
    let (max_row, max_col) = scene.extent().unwrap_or((0, 0));
    let x_max = max_col as f64 * NODE_SPACING_X + NODE_WIDTH + CANVAS_MARGIN;
    let y_min = -(max_row as f64 * NODE_SPACING_Y) - NODE_HEIGHT / 2.0 - CANVAS_MARGIN;
    ([-CANVAS_MARGIN, x_max], [y_min, NODE_HEIGHT / 2.0 + CANVAS_MARGIN])
}

/// Terminal columns available for a node label
///
/// A node box spans `NODE_WIDTH` scene units; this converts that span to
/// cells for a canvas `inner_width` cells wide, minus the status glyph.
pub fn label_columns(inner_width: u16, x_bounds: [f64; 2]) -> usize {
    let span = x_bounds[1] - x_bounds[0];
    if span <= 0.0 {
        return 0;
    }
    let cells = NODE_WIDTH / span * inner_width as f64;
    (cells.floor() as usize).saturating_sub(3)
}

/// Edge stroke color; running edges pulse between lime and sky
fn edge_color(running: bool, pulse_phase: f32) -> Color {
    if running {
        interpolate_color((158, 206, 106), (125, 207, 255), pulse_phase)
    } else {
        Color::DarkGray
    }
}

struct NodeShape {
    x: f64,
    y: f64,
    border: Color,
    /// Anchor points of the node's ports
    ports: Vec<(f64, f64)>,
    label: String,
    label_style: Style,
}

struct EdgeShape {
    path: Vec<(f64, f64)>,
    color: Color,
    running: bool,
}

pub fn render_dag(f: &mut Frame, area: Rect, app: &AppState) {
    let scene = &app.scene;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_PURPLE))
        .title(Span::styled(
            " Job DAG ",
            Style::default().fg(ACCENT_PURPLE).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(legend_line());

    if scene.is_empty() {
        let message = if app.state.loaded {
            "(no DAG to display)"
        } else {
            "Waiting for job..."
        };
        let placeholder = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(MIST).add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let (x_bounds, y_bounds) = scene_bounds(scene);
    let max_label = label_columns(area.width.saturating_sub(2), x_bounds);
    let cursor = app.cursor_node().map(|n| n.vertex_id);
    let focus = app.state.focus;

    let nodes: Vec<NodeShape> = scene
        .nodes
        .iter()
        .map(|node| {
            let mut label_style = Style::default().fg(status_color(node.status));
            if cursor == Some(node.vertex_id) {
                label_style = label_style.bg(SELECTION_BG);
            }
            if focus == node.vertex_id {
                label_style = label_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            let text = format!("{} {}", status_icon(node.status), node.label);
            let ports = [Port::Left, Port::Right]
                .into_iter()
                .filter(|port| node.has_port(*port))
                .map(|port| {
                    let (ax, ay) = node.anchor(port);
                    (ax, -ay)
                })
                .collect();
            NodeShape {
                x: node.x,
                y: -node.y,
                ports,
                border: if focus == node.vertex_id { Color::White } else { kind_color(node.kind) },
                label: truncate_to_width(&text, max_label.max(2)),
                label_style,
            }
        })
        .collect();

    let pulse_phase = app.pulse_phase;
    let edges: Vec<EdgeShape> = scene
        .edges
        .iter()
        .filter_map(|edge| {
            let (from, to) = scene.edge_anchors(edge)?;
            let path = edge_path((from.0, -from.1), (to.0, -to.1));
            Some(EdgeShape {
                path,
                color: edge_color(edge.running, pulse_phase),
                running: edge.running,
            })
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            // Edges first so node boxes sit on top of them
            for edge in &edges {
                for pair in edge.path.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: pair[0].1,
                        x2: pair[1].0,
                        y2: pair[1].1,
                        color: edge.color,
                    });
                }
            }

            for node in &nodes {
                ctx.draw(&Rectangle {
                    x: node.x,
                    y: node.y - NODE_HEIGHT / 2.0,
                    width: NODE_WIDTH,
                    height: NODE_HEIGHT,
                    color: node.border,
                });
            }

            ctx.layer();

            for edge in edges.iter().filter(|e| e.running) {
                for offset in PARTICLE_OFFSETS {
                    let t = (pulse_phase + offset) % 1.0;
                    if let Some((px, py)) = point_along(&edge.path, t) {
                        ctx.print(px, py, Span::styled(PARTICLE_SYMBOL, Style::default().fg(LIME)));
                    }
                }
            }

            for node in &nodes {
                for &(px, py) in &node.ports {
                    ctx.print(px, py, Span::styled(PORT_SYMBOL, Style::default().fg(node.border)));
                }
                ctx.print(
                    node.x + NODE_WIDTH * 0.05,
                    node.y,
                    Span::styled(node.label.clone(), node.label_style),
                );
            }
        });

    f.render_widget(canvas, area);
}

/// Legend line describing node and edge colors
fn legend_line() -> Line<'static> {
    Line::from(vec![
        Span::styled("■ source ", Style::default().fg(SKY)),
        Span::styled("■ transform ", Style::default().fg(ACCENT_PURPLE)),
        Span::styled("■ sink ", Style::default().fg(AMBER)),
        Span::styled(
            format!("{} running", status_icon(JobStatus::Running)),
            Style::default().fg(LIME),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{Edge, PipelineEdges, Vertex, VertexType};

    fn scene(ids: &[i64], edges: &[(i64, i64)]) -> Scene {
        let vertices: Vec<Vertex> = ids
            .iter()
            .map(|&id| Vertex {
                vertex_id: id,
                vertex_name: format!("v{}", id),
                vertex_type: VertexType::Transform,
                table_paths: vec![],
            })
            .collect();
        let mut pipeline = PipelineEdges::new();
        pipeline.insert("0", edges.iter().map(|(a, b)| Edge::new(a, b)).collect());
        let index = crate::dag::ConnectivityIndex::new(&pipeline);
        let grid = crate::dag::build_rows(&vertices, &index);
        crate::dag::build_scene(&grid, &pipeline, JobStatus::Running)
    }

    #[test]
    fn test_bounds_cover_all_nodes() {
        let scene = scene(&[1, 2, 3, 4], &[(1, 2), (2, 3)]);
        let (x, y) = scene_bounds(&scene);

        for node in &scene.nodes {
            assert!(node.x >= x[0] && node.x + NODE_WIDTH <= x[1]);
            assert!(-node.y - NODE_HEIGHT / 2.0 >= y[0] && -node.y + NODE_HEIGHT / 2.0 <= y[1]);
        }
    }

    #[test]
    fn test_label_columns_scale_with_width() {
        let bounds = [-40.0, 820.0];
        assert!(label_columns(200, bounds) > label_columns(80, bounds));
        assert_eq!(label_columns(0, bounds), 0);
        assert_eq!(label_columns(80, [0.0, 0.0]), 0);
    }

    #[test]
    fn test_edge_color_only_pulses_when_running() {
        assert_eq!(edge_color(false, 0.3), Color::DarkGray);
        assert_eq!(edge_color(true, 0.0), Color::Rgb(158, 206, 106));
        assert_ne!(edge_color(true, 0.0), edge_color(true, 1.0));
    }
}
