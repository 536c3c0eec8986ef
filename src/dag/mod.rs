// DAG layout module
//
// Connectivity lookup, row layout and scene construction for the pipeline
// graph view. `build_job_scene` runs the whole pass for a job snapshot.

pub mod connectivity;
pub mod layout;
pub mod scene;

pub use connectivity::ConnectivityIndex;
pub use layout::{build_rows, LayoutGrid};
pub use scene::{
    build_scene, edge_path, point_along, Port, Scene, SceneNode,
    NODE_SPACING_X, NODE_SPACING_Y, NODE_WIDTH,
};

use crate::job::Job;
use tracing::debug;

/// Lay out a job's DAG and build its scene
pub fn build_job_scene(job: &Job) -> Scene {
    let index = ConnectivityIndex::new(job.edges());
    let grid = build_rows(job.vertices(), &index);
    let scene = build_scene(&grid, job.edges(), job.job_status);

    debug!(
        rows = ?grid.id_rows(),
        nodes = scene.nodes.len(),
        edges = scene.edges.len(),
        "Built DAG scene"
    );

    scene
}
