//! Edge weight estimation seam.
//!
//! # Pluggability
//!
//! The graph prices edges through the [`EdgeEstimator`] trait so the
//! vehicle model can be swapped without touching enumeration: a car
//! estimator, a truck estimator with per-road penalties, or a unit-weight
//! estimator for hop counting all fit behind the same seam.  The default
//! [`TravelTimeEstimator`] is sufficient when the nominal road speed is the
//! whole story.

use std::cmp::{max, min};

use rn_core::{FeatureId, PointId, RoadGeometry};

// ── EdgeEstimator ─────────────────────────────────────────────────────────────

/// Prices the traversal of a contiguous point range on one road.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: one estimator is typically shared
/// by several graphs (`Arc<dyn EdgeEstimator>`).
pub trait EdgeEstimator: Send + Sync {
    /// Weight of traversing `road` from point `from` to point `to`.
    ///
    /// Must be non-negative and deterministic for fixed inputs.  The caller
    /// has already chosen the orientation, so implementations may treat the
    /// range as unordered.
    fn edge_weight(&self, feature: FeatureId, road: &RoadGeometry, from: PointId, to: PointId)
        -> f64;
}

// ── TravelTimeEstimator ───────────────────────────────────────────────────────

/// Default estimator: travel time in seconds at the road's nominal speed.
pub struct TravelTimeEstimator;

impl EdgeEstimator for TravelTimeEstimator {
    fn edge_weight(
        &self,
        _feature: FeatureId,
        road: &RoadGeometry,
        from: PointId,
        to: PointId,
    ) -> f64 {
        let lo = min(from, to);
        let hi = max(from, to);
        let mut length = 0.0;
        for i in lo.0..hi.0 {
            length += road.point(PointId(i)).distance(road.point(PointId(i + 1)));
        }
        length / road.speed()
    }
}
