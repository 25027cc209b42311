//! Per-feature joint registry.
//!
//! # Data layout
//!
//! For every feature the index keeps an ordered, sparse mapping from point
//! id to joint id: only the polyline vertices that are joints appear.  Both
//! map levels are `BTreeMap`, so iteration over a feature's joints is in
//! ascending point order and neighbor search is a range scan from the query
//! point.  Ordered maps also make every walk over the index deterministic,
//! which keeps rewrite outcomes reproducible across runs.

use std::collections::BTreeMap;
use std::ops::Bound;

use rn_core::{FeatureId, Joint, JointId, PointId, RoadPoint};

use crate::restrictions::RestrictionPoint;

/// Maps road points to the joints they belong to, feature by feature.
#[derive(Default)]
pub struct RoadIndex {
    roads: BTreeMap<FeatureId, BTreeMap<PointId, JointId>>,
}

impl RoadIndex {
    pub fn new() -> Self {
        Self { roads: BTreeMap::new() }
    }

    /// Register every road point of every joint.  Joint ids are the
    /// positions in `joints`.
    pub fn import(&mut self, joints: &[Joint]) {
        for (id, joint) in joints.iter().enumerate() {
            for &rp in joint.points() {
                self.add_joint(rp, JointId(id as u32));
            }
        }
    }

    /// Insert the mapping `rp -> joint`.
    ///
    /// # Panics
    /// Panics if `rp` is already mapped: a road point belongs to at most
    /// one joint.
    pub fn add_joint(&mut self, rp: RoadPoint, joint: JointId) {
        let prev = self.roads.entry(rp.feature).or_default().insert(rp.point, joint);
        if let Some(existing) = prev {
            panic!("{rp} is already mapped to {existing}");
        }
    }

    /// The joint `rp` belongs to, or [`JointId::INVALID`] if `rp` is not a
    /// joint.
    pub fn joint_id(&self, rp: RoadPoint) -> JointId {
        self.roads
            .get(&rp.feature)
            .and_then(|road| road.get(&rp.point))
            .copied()
            .unwrap_or(JointId::INVALID)
    }

    /// All joints registered on `feature`, in ascending point order.
    pub fn feature_joints(
        &self,
        feature: FeatureId,
    ) -> impl Iterator<Item = (PointId, JointId)> + '_ {
        self.roads
            .get(&feature)
            .into_iter()
            .flatten()
            .map(|(&point, &joint)| (point, joint))
    }

    /// Nearest joint along `rp`'s feature strictly after (`forward`) or
    /// before (`!forward`) `rp`'s point.
    pub fn find_neighbor(&self, rp: RoadPoint, forward: bool) -> Option<(JointId, PointId)> {
        let road = self.roads.get(&rp.feature)?;
        let entry = if forward {
            road.range((Bound::Excluded(rp.point), Bound::Unbounded)).next()
        } else {
            road.range(..rp.point).next_back()
        };
        entry.map(|(&point, &joint)| (joint, point))
    }

    /// The pivot shared by two features: the first joint registered on both,
    /// with the coincident road point on each side.
    ///
    /// Two features may be adjacent at more than one point; the scan picks
    /// the first pair in ascending point order, which is stable for a given
    /// dataset.
    pub fn adjacent_feature_point(
        &self,
        from_feature: FeatureId,
        to_feature: FeatureId,
    ) -> Option<RestrictionPoint> {
        let from_road = self.roads.get(&from_feature)?;
        let to_road = self.roads.get(&to_feature)?;

        for (&from_point, &from_joint) in from_road {
            for (&to_point, &to_joint) in to_road {
                if from_joint == to_joint {
                    return Some(RestrictionPoint {
                        from: RoadPoint::new(from_feature, from_point),
                        to: RoadPoint::new(to_feature, to_point),
                        center: from_joint,
                    });
                }
            }
        }
        None
    }

    /// Visit every `(road point, joint)` mapping in the index.
    pub(crate) fn for_each_mapping(&self, mut f: impl FnMut(RoadPoint, JointId)) {
        for (&feature, road) in &self.roads {
            for (&point, &joint) in road {
                f(RoadPoint::new(feature, point), joint);
            }
        }
    }
}
