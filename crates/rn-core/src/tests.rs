//! Unit tests for rn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{FeatureId, JointId, PointId, RoadPoint};

    #[test]
    fn index_roundtrip() {
        let id = FeatureId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(FeatureId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(PointId(0) < PointId(1));
        assert!(JointId(100) > JointId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(FeatureId::INVALID.0, u32::MAX);
        assert_eq!(JointId::INVALID.0, u32::MAX);
        assert!(!JointId::INVALID.is_valid());
        assert!(JointId(0).is_valid());
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(JointId::default(), JointId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(JointId(7).to_string(), "JointId(7)");
        let rp = RoadPoint::new(FeatureId(3), PointId(1));
        assert_eq!(rp.to_string(), "RoadPoint(3, 1)");
    }

    #[test]
    fn road_point_ordering_is_by_feature_then_point() {
        let a = RoadPoint::new(FeatureId(1), PointId(9));
        let b = RoadPoint::new(FeatureId(2), PointId(0));
        assert!(a < b);
    }
}

#[cfg(test)]
mod geo {
    use crate::Point2D;

    #[test]
    fn zero_distance() {
        let p = Point2D::new(3.5, -1.25);
        assert_eq!(p.distance(p), 0.0);
    }

    #[test]
    fn axis_aligned_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }
}

#[cfg(test)]
mod road {
    use crate::{Point2D, PointId, RoadGeometry};

    fn line() -> RoadGeometry {
        RoadGeometry::new(
            true,
            false,
            10.0,
            vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)],
        )
    }

    #[test]
    fn sentinel_is_not_road() {
        let s = RoadGeometry::sentinel();
        assert!(!s.is_road());
        assert_eq!(s.points_count(), 0);
    }

    #[test]
    fn point_lookup() {
        let r = line();
        assert_eq!(r.point(PointId(1)), Point2D::new(1.0, 0.0));
        assert_eq!(r.points_count(), 2);
        assert_eq!(r.speed(), 10.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn point_out_of_range_panics() {
        line().point(PointId(2));
    }
}

#[cfg(test)]
mod joint {
    use crate::{FeatureId, Joint, PointId, RoadPoint};

    #[test]
    fn add_and_list_points() {
        let mut j = Joint::new();
        assert!(j.is_empty());
        j.add_point(RoadPoint::new(FeatureId(0), PointId(2)));
        j.add_point(RoadPoint::new(FeatureId(1), PointId(0)));
        assert_eq!(j.len(), 2);
        assert_eq!(j.points()[0], RoadPoint::new(FeatureId(0), PointId(2)));
    }
}

#[cfg(test)]
mod restriction {
    use crate::{FeatureId, Restriction, RestrictionKind};

    #[test]
    fn kind_display() {
        assert_eq!(RestrictionKind::No.to_string(), "No");
        assert_eq!(RestrictionKind::Only.to_string(), "Only");
    }

    #[test]
    fn holds_feature_list() {
        let r = Restriction::new(RestrictionKind::No, vec![FeatureId(1), FeatureId(2)]);
        assert_eq!(r.feature_ids.len(), 2);
    }
}
