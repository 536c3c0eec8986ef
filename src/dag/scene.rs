// Graph scene construction
//
// Turns a layout grid plus the pipeline edges into flat node and edge
// descriptors for the canvas. The scene is derived data: it is rebuilt
// from scratch for every new job snapshot and only the status animation
// mutates it afterwards.

use super::LayoutGrid;
use crate::job::{JobStatus, PipelineEdges, VertexType};

/// Horizontal distance between grid columns, in scene units
pub const NODE_SPACING_X: f64 = 300.0;

/// Vertical distance between grid rows, in scene units
pub const NODE_SPACING_Y: f64 = 120.0;

/// Node box width in scene units (anchors sit on its left/right sides)
pub const NODE_WIDTH: f64 = 180.0;

/// Number of segments used to approximate an edge curve
const EDGE_PATH_SEGMENTS: usize = 16;

/// Connection port side on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    Left,
    Right,
}

/// Reference to a port on a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRef {
    pub cell: String,
    pub port: Port,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: String,
    pub vertex_id: i64,
    pub label: String,
    pub kind: VertexType,
    pub status: JobStatus,
    /// Grid position, kept for keyboard navigation
    pub row: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub ports: Vec<Port>,
}

impl SceneNode {
    pub fn has_port(&self, port: Port) -> bool {
        self.ports.contains(&port)
    }

    /// Anchor point on the given side of the node box
    pub fn anchor(&self, port: Port) -> (f64, f64) {
        match port {
            Port::Left => (self.x, self.y),
            Port::Right => (self.x + NODE_WIDTH, self.y),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    pub id: String,
    pub source: PortRef,
    pub target: PortRef,
    /// Draw order, later edges render above earlier ones
    pub z_index: usize,
    /// Whether the edge is drawn with the animated "running" stroke
    pub running: bool,
}

/// Flat list of drawable nodes and edges
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, cell: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == cell)
    }

    pub fn node_by_vertex(&self, vertex_id: i64) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.vertex_id == vertex_id)
    }

    /// Highest row and column index present, if any
    pub fn extent(&self) -> Option<(usize, usize)> {
        let max_row = self.nodes.iter().map(|n| n.row).max()?;
        let max_col = self.nodes.iter().map(|n| n.column).max()?;
        Some((max_row, max_col))
    }

    /// Set the displayed status of a vertex's node
    ///
    /// Returns false when the vertex has no node in the scene. The running
    /// flag of every edge leaving the node is re-derived.
    pub fn apply_status(&mut self, vertex_id: i64, status: JobStatus) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.vertex_id == vertex_id) else {
            return false;
        };
        node.status = status;
        let cell = node.id.clone();

        for edge in self.edges.iter_mut().filter(|e| e.source.cell == cell) {
            edge.running = status.is_running();
        }
        true
    }

    /// Endpoints of an edge as (source anchor, target anchor)
    ///
    /// None when either end references a vertex that is not on the grid.
    pub fn edge_anchors(&self, edge: &SceneEdge) -> Option<((f64, f64), (f64, f64))> {
        let source = self.node(&edge.source.cell)?;
        let target = self.node(&edge.target.cell)?;
        Some((source.anchor(edge.source.port), target.anchor(edge.target.port)))
    }
}

/// Build the scene for a grid
///
/// Produces an empty scene when there is nothing to draw: no vertices, or
/// no pipeline edges yet.
pub fn build_scene(grid: &LayoutGrid<'_>, edges: &PipelineEdges, status: JobStatus) -> Scene {
    if grid.is_empty() || edges.is_empty() {
        return Scene::default();
    }

    let mut nodes = Vec::with_capacity(grid.vertex_count());
    for (row_idx, row) in grid.rows.iter().enumerate() {
        let last = row.len().saturating_sub(1);
        for (col_idx, vertex) in row.iter().enumerate() {
            let mut ports = Vec::with_capacity(2);
            if col_idx != 0 {
                ports.push(Port::Left);
            }
            if col_idx != last {
                ports.push(Port::Right);
            }

            nodes.push(SceneNode {
                id: vertex.vertex_id.to_string(),
                vertex_id: vertex.vertex_id,
                label: vertex.vertex_name.clone(),
                kind: vertex.vertex_type,
                status,
                row: row_idx,
                column: col_idx,
                x: col_idx as f64 * NODE_SPACING_X,
                y: row_idx as f64 * NODE_SPACING_Y,
                ports,
            });
        }
    }

    let mut scene_edges = Vec::with_capacity(edges.edge_count());
    let mut z_index = 0;
    for (pipeline, pipeline_edges) in edges.pipelines() {
        for (idx, edge) in pipeline_edges.iter().enumerate() {
            scene_edges.push(SceneEdge {
                id: format!("{}-{}", pipeline, idx),
                source: PortRef {
                    cell: edge.input_vertex_id.clone(),
                    port: Port::Right,
                },
                target: PortRef {
                    cell: edge.target_vertex_id.clone(),
                    port: Port::Left,
                },
                z_index,
                running: status.is_running(),
            });
            z_index += 1;
        }
    }

    Scene {
        nodes,
        edges: scene_edges,
    }
}

/// Horizontal cubic bezier between two anchors, sampled into a polyline
///
/// Control points pull out horizontally from both anchors so the curve
/// leaves the source to the right and enters the target from the left.
pub fn edge_path(from: (f64, f64), to: (f64, f64)) -> Vec<(f64, f64)> {
    let pull = ((to.0 - from.0).abs() / 2.0).max(NODE_SPACING_X / 4.0);
    let c1 = (from.0 + pull, from.1);
    let c2 = (to.0 - pull, to.1);

    (0..=EDGE_PATH_SEGMENTS)
        .map(|step| {
            let t = step as f64 / EDGE_PATH_SEGMENTS as f64;
            let u = 1.0 - t;
            let x = u * u * u * from.0 + 3.0 * u * u * t * c1.0 + 3.0 * u * t * t * c2.0 + t * t * t * to.0;
            let y = u * u * u * from.1 + 3.0 * u * u * t * c1.1 + 3.0 * u * t * t * c2.1 + t * t * t * to.1;
            (x, y)
        })
        .collect()
}

/// Point at fraction `t` (0.0 ~ 1.0) along a polyline, by segment count
pub fn point_along(path: &[(f64, f64)], t: f32) -> Option<(f64, f64)> {
    let (first, rest) = path.split_first()?;
    if rest.is_empty() {
        return Some(*first);
    }
    let t = t.clamp(0.0, 1.0) as f64;
    let segments = rest.len() as f64;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(rest.len() - 1);
    let local = pos - idx as f64;
    let (x1, y1) = path[idx];
    let (x2, y2) = path[idx + 1];
    Some((x1 + (x2 - x1) * local, y1 + (y2 - y1) * local))
}
