//! Spatial lookup of joints.
//!
//! The path-search frontend starts from a coordinate, not a joint; an
//! R-tree (via `rstar`) over joint positions answers "which joint is
//! nearest to here".  Build the locator once the graph is finished —
//! it snapshots positions and does not follow later mutations.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use rn_core::{JointId, Point2D};

use crate::graph::IndexGraph;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D position with the associated joint id.
#[derive(Clone)]
struct JointEntry {
    position: [f64; 2],
    id: JointId,
}

impl RTreeObject for JointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for JointEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── JointLocator ──────────────────────────────────────────────────────────────

/// Nearest-joint queries over a finished graph.
pub struct JointLocator {
    tree: RTree<JointEntry>,
}

impl JointLocator {
    /// Snapshot every joint position of `graph` into a bulk-loaded R-tree.
    pub fn build(graph: &IndexGraph) -> Self {
        let entries: Vec<JointEntry> = (0..graph.joint_count())
            .map(|i| {
                let id = JointId(i);
                let p = graph.joint_point(id);
                JointEntry { position: [p.x, p.y], id }
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// The joint nearest to `position`.  `None` only for an empty graph.
    pub fn nearest_joint(&self, position: Point2D) -> Option<JointId> {
        self.tree
            .nearest_neighbor(&[position.x, position.y])
            .map(|e| e.id)
    }

    /// Up to `k` nearest joints, ascending by distance.
    pub fn k_nearest(&self, position: Point2D, k: usize) -> Vec<JointId> {
        self.tree
            .nearest_neighbor_iter(&[position.x, position.y])
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}
