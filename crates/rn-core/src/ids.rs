//! Strongly typed, zero-cost identifier wrappers.
//!
//! All ids are `Copy + Ord + Hash` so they can serve as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into `Vec`s via `id.0 as usize`, but callers should prefer
//! the `.index()` helper for clarity.
//!
//! Every id type carries an `INVALID` sentinel (`u32::MAX`).  A fresh
//! `Default` id is `INVALID`, so uninitialized ids are visibly invalid
//! rather than silently pointing at element zero.

use std::fmt;

/// Generate a typed id wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid id" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `true` unless this id is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self.0 != <$inner>::MAX
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Id of a road feature (a polyline with geometry, one-way flag, and
    /// nominal speed).  Ids above the fake-feature threshold are minted at
    /// runtime by the restriction rewriter.
    pub struct FeatureId(u32);
}

typed_id! {
    /// Index of a vertex within a feature's polyline.
    pub struct PointId(u32);
}

typed_id! {
    /// Id of a joint — a set of coincident road points acting as one graph
    /// node.
    pub struct JointId(u32);
}

/// One vertex of a feature's polyline, addressed by feature and point index.
///
/// A road point belongs to at most one joint.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadPoint {
    pub feature: FeatureId,
    pub point: PointId,
}

impl RoadPoint {
    #[inline]
    pub fn new(feature: FeatureId, point: PointId) -> Self {
        Self { feature, point }
    }
}

impl fmt::Display for RoadPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoadPoint({}, {})", self.feature.0, self.point.0)
    }
}
