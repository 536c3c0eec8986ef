// Vertex connectivity lookup
//
// Answers "does an edge run from A to B" by scanning every pipeline edge.
// Each lookup is linear in the edge count and allocates nothing.

use crate::job::{PipelineEdges, Vertex};

#[derive(Debug, Clone, Copy)]
pub struct ConnectivityIndex<'a> {
    edges: &'a PipelineEdges,
}

impl<'a> ConnectivityIndex<'a> {
    pub fn new(edges: &'a PipelineEdges) -> Self {
        Self { edges }
    }

    /// True if some pipeline has an edge `source -> target`
    ///
    /// Edge ids are string-encoded, so the vertex ids are compared in
    /// their decimal form.
    pub fn is_connected(&self, source: &Vertex, target: &Vertex) -> bool {
        let source_id = source.vertex_id.to_string();
        let target_id = target.vertex_id.to_string();

        self.edges
            .all_edges()
            .any(|edge| edge.input_vertex_id == source_id && edge.target_vertex_id == target_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Edge;

    fn vertex(id: i64) -> Vertex {
        Vertex {
            vertex_id: id,
            ..Default::default()
        }
    }

    #[test]
    fn test_connected_across_pipelines() {
        let mut edges = PipelineEdges::new();
        edges.insert("0", vec![Edge::new(1, 2)]);
        edges.insert("1", vec![Edge::new(3, 4)]);
        let index = ConnectivityIndex::new(&edges);

        assert!(index.is_connected(&vertex(1), &vertex(2)));
        assert!(index.is_connected(&vertex(3), &vertex(4)));
        assert!(!index.is_connected(&vertex(1), &vertex(4)));
    }

    #[test]
    fn test_connected_under_any_pipeline_key() {
        let mut edges = PipelineEdges::new();
        edges.insert("b", vec![Edge::new(5, 6)]);
        edges.insert("10", vec![Edge::new(1, 2)]);
        edges.insert("+1", vec![Edge::new(7, 8)]);
        let index = ConnectivityIndex::new(&edges);

        assert!(index.is_connected(&vertex(5), &vertex(6)));
        assert!(index.is_connected(&vertex(1), &vertex(2)));
        assert!(index.is_connected(&vertex(7), &vertex(8)));
        assert!(!index.is_connected(&vertex(6), &vertex(7)));
    }

    #[test]
    fn test_direction_matters() {
        let mut edges = PipelineEdges::new();
        edges.insert("0", vec![Edge::new(1, 2)]);
        let index = ConnectivityIndex::new(&edges);

        assert!(!index.is_connected(&vertex(2), &vertex(1)));
    }

    #[test]
    fn test_empty_edges_never_connect() {
        let edges = PipelineEdges::new();
        let index = ConnectivityIndex::new(&edges);

        assert!(!index.is_connected(&vertex(1), &vertex(1)));
    }

    #[test]
    fn test_ids_compare_as_decimal_strings() {
        let mut edges = PipelineEdges::new();
        edges.insert("0", vec![Edge::new("01", "2")]);
        let index = ConnectivityIndex::new(&edges);

        // "01" is not the decimal form of 1
        assert!(!index.is_connected(&vertex(1), &vertex(2)));
    }
}
