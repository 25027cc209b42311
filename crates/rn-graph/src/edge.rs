//! Edge vocabulary shared by the enumerator and the restriction rewriter.

use std::fmt;

use rn_core::{FeatureId, JointId, RoadPoint};

/// Orientation of edge enumeration relative to a joint.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Outgoing,
    Ingoing,
}

impl Direction {
    #[inline]
    pub fn is_outgoing(self) -> bool {
        self == Direction::Outgoing
    }
}

/// Which rendition of the graph enumeration sees.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GraphView {
    /// The rewritten graph the path search runs on: fake features are
    /// visible, blocked edges are hidden.
    Restricted,
    /// The graph as imported: fake features are hidden and the blocked-edge
    /// set is ignored.  The rewriter canonicalizes restrictions against
    /// this view.
    Unrestricted,
}

/// A weighted edge to a neighboring joint — the enumeration output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JointEdge {
    pub target: JointId,
    pub weight: f64,
}

impl JointEdge {
    #[inline]
    pub fn new(target: JointId, weight: f64) -> Self {
        Self { target, weight }
    }
}

/// An edge to a neighboring joint together with the road points it
/// traverses.  Used by the rewriter, which needs geometry, not weights.
#[derive(Clone, Debug, PartialEq)]
pub struct JointEdgeGeom {
    pub target: JointId,
    pub path: Vec<RoadPoint>,
}

impl JointEdgeGeom {
    pub fn new(target: JointId, path: Vec<RoadPoint>) -> Self {
        Self { target, path }
    }
}

/// A directed joint-to-joint edge tagged with the feature it follows.
///
/// The feature id is part of the identity: two joints may be connected by
/// more than one feature, and blocking one parallel road must not block
/// the others.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct DirectedEdge {
    pub from: JointId,
    pub to: JointId,
    pub feature: FeatureId,
}

impl DirectedEdge {
    #[inline]
    pub fn new(from: JointId, to: JointId, feature: FeatureId) -> Self {
        Self { from, to, feature }
    }
}

impl fmt::Display for DirectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirectedEdge[{}, {}, {}]", self.from.0, self.to.0, self.feature.0)
    }
}
