//! Joints: the nodes of the index graph.

use crate::ids::RoadPoint;

/// An unordered set of road points fused into one graph node.
///
/// Joints of size two or more are true intersections: the same geographic
/// location reached by several features (or by one feature twice, for a
/// loop road).  Singleton joints appear as loose ends — route start/finish
/// points inserted on a feature, and the far endpoints of fake features
/// synthesized by the restriction rewriter.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Joint {
    points: Vec<RoadPoint>,
}

impl Joint {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_points(points: Vec<RoadPoint>) -> Self {
        Self { points }
    }

    pub fn add_point(&mut self, rp: RoadPoint) {
        self.points.push(rp);
    }

    #[inline]
    pub fn points(&self) -> &[RoadPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
