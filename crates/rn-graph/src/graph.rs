//! The index graph: a joint-level view over a road feature dataset.
//!
//! # Construction and lifecycle
//!
//! 1. [`IndexGraph::new`] with a geometry loader and an edge estimator.
//! 2. [`IndexGraph::import`] with the joints extracted from the dataset —
//!    this builds both indices.
//! 3. [`IndexGraph::apply_restrictions`] (see [`crate::restrictions`])
//!    rewrites the graph so forbidden maneuvers become unreachable.
//! 4. The path search enumerates edges through [`IndexGraph::edge_list`].
//!
//! After step 3 the graph is conceptually read-only: enumeration and all
//! lookups take `&self` and touch no lazily populated state, so a finished
//! graph may be shared across threads as long as nothing mutates it.
//!
//! # Fake features
//!
//! The rewriter synthesizes "fake" features: one-way, always-routable roads
//! whose geometry copies stretches of real roads.  Their ids start at
//! [`FAKE_FEATURE_START`], far above any real feature id, which makes
//! [`IndexGraph::is_fake_feature`] a plain comparison.  The geometry
//! facade ([`IndexGraph::road`]) serves fake geometry from its own map and
//! delegates everything else to the loader.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rn_core::{FeatureId, Joint, JointId, Point2D, RoadGeometry, RoadPoint};

use crate::edge::{DirectedEdge, Direction, GraphView, JointEdge};
use crate::estimator::EdgeEstimator;
use crate::joint_index::JointIndex;
use crate::loader::GeometryLoader;
use crate::road_index::RoadIndex;

/// First id of the fake-feature region.  Real feature ids must stay below
/// this; [`IndexGraph::new`] checks the loader's declared range.
pub const FAKE_FEATURE_START: FeatureId = FeatureId(u32::MAX / 2);

/// Joint-level road graph with turn-restriction rewriting.
pub struct IndexGraph {
    loader: Box<dyn GeometryLoader>,
    estimator: Arc<dyn EdgeEstimator>,
    pub(crate) road_index: RoadIndex,
    pub(crate) joint_index: JointIndex,
    pub(crate) fake_geometry: HashMap<FeatureId, RoadGeometry>,
    pub(crate) blocked_edges: HashSet<DirectedEdge>,
    pub(crate) edge_mapping: HashMap<DirectedEdge, Vec<DirectedEdge>>,
    pub(crate) next_fake_feature: FeatureId,
}

impl IndexGraph {
    /// Create an empty graph over `loader`, pricing edges with `estimator`.
    ///
    /// # Panics
    /// Panics if the loader declares a feature id range that collides with
    /// the fake-feature region.
    pub fn new(loader: Box<dyn GeometryLoader>, estimator: Arc<dyn EdgeEstimator>) -> Self {
        assert!(
            loader.feature_count() <= FAKE_FEATURE_START.0,
            "loader declares {} features, colliding with the fake-feature id region",
            loader.feature_count()
        );
        Self {
            loader,
            estimator,
            road_index: RoadIndex::new(),
            joint_index: JointIndex::new(),
            fake_geometry: HashMap::new(),
            blocked_edges: HashSet::new(),
            edge_mapping: HashMap::new(),
            next_fake_feature: FAKE_FEATURE_START,
        }
    }

    /// Import the dataset's joints and build both indices.
    pub fn import(&mut self, joints: &[Joint]) {
        self.road_index.import(joints);
        self.build(joints.len() as u32);
    }

    fn build(&mut self, joint_count: u32) {
        self.joint_index.build(&self.road_index, joint_count);
    }

    // ── Geometry facade ───────────────────────────────────────────────────

    /// Geometry of `feature`: the rewriter's fake geometry if registered,
    /// otherwise whatever the loader says.
    pub fn road(&self, feature: FeatureId) -> &RoadGeometry {
        if let Some(geometry) = self.fake_geometry.get(&feature) {
            return geometry;
        }
        self.loader.road(feature)
    }

    /// `true` when `feature` lies in the id region minted by the rewriter.
    #[inline]
    pub fn is_fake_feature(feature: FeatureId) -> bool {
        feature >= FAKE_FEATURE_START
    }

    /// Number of fake features synthesized so far.
    pub fn fake_feature_count(&self) -> usize {
        self.fake_geometry.len()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Position of a road point.
    ///
    /// # Panics
    /// Panics if the point id is out of range for its feature.
    pub fn point(&self, rp: RoadPoint) -> Point2D {
        self.road(rp.feature).point(rp.point)
    }

    /// Position of a joint (via any of its road points).
    pub fn joint_point(&self, joint: JointId) -> Point2D {
        self.point(self.joint_index.point(joint))
    }

    /// Nominal speed of the feature under `rp`.
    pub fn speed(&self, rp: RoadPoint) -> f64 {
        self.road(rp.feature).speed()
    }

    #[inline]
    pub fn joint_count(&self) -> u32 {
        self.joint_index.joint_count()
    }

    /// `true` if any road point of `joint` lies on `feature`.
    pub fn joint_lies_on_road(&self, joint: JointId, feature: FeatureId) -> bool {
        self.joint_index
            .points(joint)
            .iter()
            .any(|rp| rp.feature == feature)
    }

    /// `true` if the rewriter has suppressed `edge` from the restricted
    /// view.
    pub fn is_blocked(&self, edge: DirectedEdge) -> bool {
        self.blocked_edges.contains(&edge)
    }

    /// The direct replacements recorded for `edge`, if any rewrite touched
    /// it.  Route reconstruction walks this relation backwards to report
    /// results in original coordinates.
    pub fn edge_replacements(&self, edge: DirectedEdge) -> &[DirectedEdge] {
        self.edge_mapping.get(&edge).map_or(&[], |v| v.as_slice())
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// The joint at `rp`, creating a singleton joint if `rp` has none.
    /// Path searches use this to anchor route start and finish points.
    pub fn insert_joint(&mut self, rp: RoadPoint) -> JointId {
        let existing = self.road_index.joint_id(rp);
        if existing != JointId::INVALID {
            return existing;
        }

        let joint = self.joint_index.insert_joint(rp);
        self.road_index.add_joint(rp, joint);
        joint
    }

    // ── Edge enumeration ──────────────────────────────────────────────────

    /// All edges incident to `joint` in the chosen direction and view.
    pub fn edge_list(&self, joint: JointId, dir: Direction, view: GraphView) -> Vec<JointEdge> {
        let mut edges = Vec::new();
        for &rp in self.joint_index.points(joint) {
            self.neighboring_edges(rp, dir, view, &mut edges);
        }
        edges
    }

    fn neighboring_edges(
        &self,
        rp: RoadPoint,
        dir: Direction,
        view: GraphView,
        edges: &mut Vec<JointEdge>,
    ) {
        let road = self.road(rp.feature);
        if !road.is_road() {
            return;
        }

        // On a one-way road the travel direction is ascending point order,
        // so outgoing edges look forward and ingoing edges look backward.
        // Two-way roads yield an edge in both polyline directions.
        let bidirectional = !road.is_one_way();
        if !dir.is_outgoing() || bidirectional {
            self.neighboring_edge(road, rp, false, dir, view, edges);
        }
        if dir.is_outgoing() || bidirectional {
            self.neighboring_edge(road, rp, true, dir, view, edges);
        }
    }

    fn neighboring_edge(
        &self,
        road: &RoadGeometry,
        rp: RoadPoint,
        forward: bool,
        dir: Direction,
        view: GraphView,
        edges: &mut Vec<JointEdge>,
    ) {
        // The unrestricted view shows the graph as imported.
        if view == GraphView::Unrestricted && Self::is_fake_feature(rp.feature) {
            return;
        }

        let Some((neighbor, neighbor_point)) = self.road_index.find_neighbor(rp, forward) else {
            return;
        };

        if view == GraphView::Restricted {
            let joint = self.road_index.joint_id(rp);
            let edge = if dir.is_outgoing() {
                DirectedEdge::new(joint, neighbor, rp.feature)
            } else {
                DirectedEdge::new(neighbor, joint, rp.feature)
            };
            if self.blocked_edges.contains(&edge) {
                return;
            }
        }

        let weight = self
            .estimator
            .edge_weight(rp.feature, road, rp.point, neighbor_point);
        edges.push(JointEdge::new(neighbor, weight));
    }

    // ── Shared with the rewriter ──────────────────────────────────────────

    pub(crate) fn estimator(&self) -> &dyn EdgeEstimator {
        self.estimator.as_ref()
    }
}
