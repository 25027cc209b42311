//! Road feature geometry as seen by the graph.
//!
//! A `RoadGeometry` is what a geometry loader hands back for a feature id:
//! the polyline, the one-way flag, the nominal speed, and whether the
//! feature is routable at all for the active vehicle ("is-road").  Loaders
//! never fail — an unknown id yields [`RoadGeometry::sentinel`], which is
//! simply not a road.

use crate::geo::Point2D;
use crate::ids::PointId;

/// Geometry and routing attributes of one road feature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadGeometry {
    is_road: bool,
    one_way: bool,
    speed: f64,
    points: Vec<Point2D>,
}

impl RoadGeometry {
    pub fn new(is_road: bool, one_way: bool, speed: f64, points: Vec<Point2D>) -> Self {
        Self { is_road, one_way, speed, points }
    }

    /// The geometry loaders return for feature ids they know nothing about:
    /// not a road, no points.
    pub fn sentinel() -> Self {
        Self { is_road: false, one_way: false, speed: 0.0, points: Vec::new() }
    }

    /// `false` for features the vehicle model rejects (e.g. a footway when
    /// routing a car) and for the sentinel.
    #[inline]
    pub fn is_road(&self) -> bool {
        self.is_road
    }

    #[inline]
    pub fn is_one_way(&self) -> bool {
        self.one_way
    }

    /// Nominal travel speed, projection units per second.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Position of the polyline vertex `point`.
    ///
    /// # Panics
    /// Panics if `point` is out of range.
    #[inline]
    pub fn point(&self, point: PointId) -> Point2D {
        assert!(
            point.index() < self.points.len(),
            "point {point} out of range ({} points)",
            self.points.len()
        );
        self.points[point.index()]
    }

    #[inline]
    pub fn points_count(&self) -> u32 {
        self.points.len() as u32
    }

    #[inline]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }
}
