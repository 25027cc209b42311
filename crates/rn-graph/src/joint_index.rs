//! Per-joint road-point registry: the inverse of [`RoadIndex`].
//!
//! The two indices reference each other only through ids (`JointId` one
//! way, `RoadPoint` the other), never through pointers; the bijectivity of
//! the pair is an invariant the tests verify.

use rn_core::{JointId, RoadPoint};

use crate::road_index::RoadIndex;

/// Maps each joint to the road points fused into it.
///
/// Joint lists stay mutable after construction: the restriction rewriter
/// appends fake-feature endpoints to existing joints and inserts fresh
/// singleton joints.
#[derive(Default)]
pub struct JointIndex {
    points: Vec<Vec<RoadPoint>>,
}

impl JointIndex {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Populate from a finished road index.
    ///
    /// # Panics
    /// Panics if the road index references a joint id at or beyond
    /// `joint_count`.
    pub fn build(&mut self, road_index: &RoadIndex, joint_count: u32) {
        self.points = vec![Vec::new(); joint_count as usize];
        road_index.for_each_mapping(|rp, joint| {
            assert!(
                joint.index() < self.points.len(),
                "{joint} out of range ({joint_count} joints)"
            );
            self.points[joint.index()].push(rp);
        });
    }

    #[inline]
    pub fn joint_count(&self) -> u32 {
        self.points.len() as u32
    }

    /// The road points of `joint`.  Order is unspecified but stable between
    /// mutations.
    ///
    /// # Panics
    /// Panics if `joint` is out of range.
    pub fn points(&self, joint: JointId) -> &[RoadPoint] {
        assert!(joint.index() < self.points.len(), "{joint} out of range");
        &self.points[joint.index()]
    }

    /// Any representative road point of `joint`.
    ///
    /// # Panics
    /// Panics if `joint` is out of range or empty.
    pub fn point(&self, joint: JointId) -> RoadPoint {
        let points = self.points(joint);
        assert!(!points.is_empty(), "{joint} has no road points");
        points[0]
    }

    /// Every pair of road points through which `a` and `b` share a feature.
    ///
    /// One pair per occurrence: a feature connecting the joints at two
    /// distinct point indices (a loop road) contributes two pairs.  This is
    /// how parallel connections between a joint pair are discovered.
    pub fn points_with_common_feature(
        &self,
        a: JointId,
        b: JointId,
    ) -> Vec<(RoadPoint, RoadPoint)> {
        let mut pairs = Vec::new();
        for &rp_a in self.points(a) {
            for &rp_b in self.points(b) {
                if rp_a.feature == rp_b.feature {
                    pairs.push((rp_a, rp_b));
                }
            }
        }
        pairs
    }

    /// Allocate a new singleton joint containing `rp`.
    pub fn insert_joint(&mut self, rp: RoadPoint) -> JointId {
        let id = JointId(self.points.len() as u32);
        self.points.push(vec![rp]);
        id
    }

    /// Add `rp` to an existing joint.
    ///
    /// # Panics
    /// Panics if `joint` is out of range.
    pub fn append_to_joint(&mut self, joint: JointId, rp: RoadPoint) {
        assert!(joint.index() < self.points.len(), "{joint} out of range");
        self.points[joint.index()].push(rp);
    }
}
