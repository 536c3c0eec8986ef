// Row layout of DAG vertices
//
// Buckets vertices into display rows by walking connectivity in input
// order. This is not a topological sort: a vertex only joins an existing
// row when its first-found predecessor is the tail of that row.

use super::ConnectivityIndex;
use crate::job::Vertex;

/// Rows of vertices, each row ordered left to right
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutGrid<'a> {
    pub rows: Vec<Vec<&'a Vertex>>,
}

impl<'a> LayoutGrid<'a> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Vertex ids per row, handy for assertions and logging
    pub fn id_rows(&self) -> Vec<Vec<i64>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|v| v.vertex_id).collect())
            .collect()
    }

    /// Locate the first placed vertex connected to `target`
    ///
    /// Scans row-then-column and returns `(row, column)` of the first match.
    fn find_predecessor(&self, index: &ConnectivityIndex<'_>, target: &Vertex) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(row_idx, row)| {
            row.iter()
                .position(|candidate| index.is_connected(candidate, target))
                .map(|col_idx| (row_idx, col_idx))
        })
    }
}

/// Build the layout grid for `vertices` (kept in input order)
pub fn build_rows<'a>(vertices: &'a [Vertex], index: &ConnectivityIndex<'_>) -> LayoutGrid<'a> {
    let mut grid = LayoutGrid::default();

    for vertex in vertices {
        match grid.find_predecessor(index, vertex) {
            // Predecessor is the tail of its row: no successor yet
            Some((row, col)) if col + 1 == grid.rows[row].len() => {
                grid.rows[row].push(vertex);
            }
            // Fan-out, or no placed predecessor
            _ => grid.rows.push(vec![vertex]),
        }
    }

    grid
}
