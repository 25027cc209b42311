//! Turn-restriction input records.
//!
//! Restrictions arrive from map data as lists of feature ids plus a kind.
//! Only two-feature restrictions (from-feature, to-feature through their
//! shared intersection) are applied by the graph; the batch driver logs and
//! skips everything else.

use crate::ids::FeatureId;

/// What a restriction says about the maneuver it describes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestrictionKind {
    /// The maneuver is forbidden.
    No,
    /// The maneuver is the only one permitted from its ingoing edge.
    Only,
}

impl RestrictionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RestrictionKind::No => "No",
            RestrictionKind::Only => "Only",
        }
    }
}

impl std::fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A turn restriction over an ordered list of features.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restriction {
    pub kind: RestrictionKind,
    pub feature_ids: Vec<FeatureId>,
}

impl Restriction {
    pub fn new(kind: RestrictionKind, feature_ids: Vec<FeatureId>) -> Self {
        Self { kind, feature_ids }
    }
}
