// Simulated vertex status animation (demo mode)
//
// Cycles through recorded status snapshots: every tick one snapshot is
// picked at random and its statuses are painted onto the scene nodes. This
// is placeholder behaviour for demos; it is not a status feed.

use crate::dag::Scene;
use crate::job::JobStatus;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, trace};

/// One per-vertex status change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub vertex_id: i64,
    pub status: JobStatus,
}

/// A point-in-time set of vertex statuses
pub type StatusSnapshot = Vec<StatusUpdate>;

/// Result of one animation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorTick {
    /// A snapshot was applied; `updated` nodes matched a vertex
    Applied { snapshot: usize, updated: usize },
    /// Nothing to animate; no further ticks should be scheduled
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct StatusAnimator {
    snapshots: Vec<StatusSnapshot>,
}

impl StatusAnimator {
    pub fn new(snapshots: Vec<StatusSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Parse a JSON array of snapshots
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Apply one randomly chosen snapshot to the scene
    pub fn tick<R: Rng>(&self, scene: &mut Scene, rng: &mut R) -> AnimatorTick {
        if self.snapshots.is_empty() {
            debug!("No status snapshots, animation finished");
            return AnimatorTick::Finished;
        }

        let snapshot = rng.random_range(0..self.snapshots.len());
        let updated = self.snapshots[snapshot]
            .iter()
            .filter(|update| scene.apply_status(update.vertex_id, update.status))
            .count();

        trace!(snapshot, updated, "Applied status snapshot");
        AnimatorTick::Applied { snapshot, updated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::build_job_scene;
    use crate::job::Job;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running_scene() -> Scene {
        let job: Job = serde_json::from_str(
            r#"{
                "jobStatus": "RUNNING",
                "jobDag": {
                    "vertexInfoMap": [
                        {"vertexId": 1, "type": "source", "vertexName": "src"},
                        {"vertexId": 2, "type": "sink", "vertexName": "out"}
                    ],
                    "pipelineEdges": {"0": [{"inputVertexId": "1", "targetVertexId": "2"}]}
                }
            }"#,
        )
        .unwrap();
        build_job_scene(&job)
    }

    #[test]
    fn test_empty_snapshots_finish_without_mutation() {
        let mut scene = running_scene();
        let before = scene.clone();
        let mut rng = StdRng::seed_from_u64(7);

        let tick = StatusAnimator::default().tick(&mut scene, &mut rng);

        assert_eq!(tick, AnimatorTick::Finished);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_single_snapshot_is_applied() {
        let mut scene = running_scene();
        let animator = StatusAnimator::from_json(
            r#"[[{"vertexId": 1, "status": "FAILED"}, {"vertexId": 9, "status": "FINISHED"}]]"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let tick = animator.tick(&mut scene, &mut rng);

        assert_eq!(tick, AnimatorTick::Applied { snapshot: 0, updated: 1 });
        assert_eq!(scene.node_by_vertex(1).unwrap().status, JobStatus::Failed);
        assert_eq!(scene.node_by_vertex(2).unwrap().status, JobStatus::Running);
        assert!(!scene.edges[0].running);
    }

    #[test]
    fn test_random_pick_stays_in_range() {
        let mut scene = running_scene();
        let animator = StatusAnimator::new(vec![
            vec![StatusUpdate { vertex_id: 1, status: JobStatus::Running }],
            vec![StatusUpdate { vertex_id: 1, status: JobStatus::Finished }],
            vec![StatusUpdate { vertex_id: 2, status: JobStatus::Failed }],
        ]);
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = [false; 3];
        for _ in 0..200 {
            match animator.tick(&mut scene, &mut rng) {
                AnimatorTick::Applied { snapshot, updated } => {
                    assert_eq!(updated, 1);
                    seen[snapshot] = true;
                }
                AnimatorTick::Finished => panic!("animator finished with snapshots present"),
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_bad_snapshot_file_is_an_error() {
        assert!(StatusAnimator::from_json(r#"{"vertexId": 1}"#).is_err());
    }
}
