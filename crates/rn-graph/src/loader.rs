//! Geometry loader seam.
//!
//! The graph never reads map files itself.  It asks a [`GeometryLoader`]
//! for feature geometry and treats the answer as authoritative.  The
//! production loader streams from the map container; [`MemoryGeometryLoader`]
//! below serves tests and small hand-built networks.

use std::collections::HashMap;

use rn_core::{FeatureId, Point2D, RoadGeometry};

// ── GeometryLoader ────────────────────────────────────────────────────────────

/// Supplies road geometry per feature id.
///
/// Lookup is infallible by contract: an unknown id yields a sentinel
/// geometry with `is_road() == false`, which the graph then skips.
///
/// The graph takes exclusive ownership of its loader (`Box<dyn
/// GeometryLoader>`), so implementations are free to keep internal caches
/// behind `&self` interior mutability if they need to.
pub trait GeometryLoader {
    /// Geometry of `feature`.
    fn road(&self, feature: FeatureId) -> &RoadGeometry;

    /// Number of real features.  Every loadable id is below this bound;
    /// the graph mints fake-feature ids strictly above it.
    fn feature_count(&self) -> u32;
}

// ── MemoryGeometryLoader ──────────────────────────────────────────────────────

/// In-memory loader backed by a feature map.
///
/// # Example
///
/// ```
/// use rn_core::{FeatureId, Point2D};
/// use rn_graph::MemoryGeometryLoader;
///
/// let mut loader = MemoryGeometryLoader::new();
/// loader.add_road(
///     FeatureId(0),
///     false,      // two-way
///     10.0,       // speed
///     vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)],
/// );
/// ```
pub struct MemoryGeometryLoader {
    roads: HashMap<FeatureId, RoadGeometry>,
    feature_count: u32,
    sentinel: RoadGeometry,
}

impl Default for MemoryGeometryLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGeometryLoader {
    pub fn new() -> Self {
        Self {
            roads: HashMap::new(),
            feature_count: 0,
            sentinel: RoadGeometry::sentinel(),
        }
    }

    /// Register a routable road feature.
    pub fn add_road(&mut self, feature: FeatureId, one_way: bool, speed: f64, points: Vec<Point2D>) {
        self.add_geometry(feature, RoadGeometry::new(true, one_way, speed, points));
    }

    /// Register arbitrary geometry, routable or not.  Non-road features
    /// (footways when routing a car, say) participate in joints but never
    /// produce edges.
    pub fn add_geometry(&mut self, feature: FeatureId, geometry: RoadGeometry) {
        self.feature_count = self.feature_count.max(feature.0 + 1);
        self.roads.insert(feature, geometry);
    }
}

impl GeometryLoader for MemoryGeometryLoader {
    fn road(&self, feature: FeatureId) -> &RoadGeometry {
        self.roads.get(&feature).unwrap_or(&self.sentinel)
    }

    fn feature_count(&self) -> u32 {
        self.feature_count
    }
}
