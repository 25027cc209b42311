//! Turn-restriction rewriting.
//!
//! # The idea
//!
//! The path search never learns about restrictions.  Instead the graph is
//! rewritten so that forbidden maneuvers are simply absent: edges are
//! blocked, and where blocking alone would also kill permitted maneuvers,
//! the pivot joint is cloned — traffic arriving along the restricted
//! ingoing feature is diverted onto synthesized ("fake") features that
//! reconstruct exactly the permitted outgoing edges.
//!
//! # Composability
//!
//! Every rewrite records `original edge -> replacement edge(s)` in a
//! mapping multimap.  A later restriction that references original feature
//! ids is first canonicalized against the unrestricted view and then
//! expanded through the mapping, so it lands on the concrete edges the
//! earlier rewrites produced.  The expansion is a depth-first walk to the
//! leaves of the mapping relation, skipping leaves that are blocked.
//!
//! # Failure policy
//!
//! Restriction-data faults ([`GraphError`]) abort the offending restriction
//! only; the batch driver logs them and continues.  Degenerate topology
//! found mid-rewrite (a self-loop through the pivot, an empty ingoing
//! path) silently aborts the transformation and leaves the graph
//! consistent, with that restriction unenforced.

use log::error;

use rn_core::{FeatureId, JointId, PointId, Restriction, RestrictionKind, RoadGeometry, RoadPoint};

use crate::edge::{DirectedEdge, Direction, GraphView, JointEdge, JointEdgeGeom};
use crate::error::{GraphError, GraphResult};
use crate::graph::IndexGraph;

// ── Restriction geometry ──────────────────────────────────────────────────────

/// The geometric locus of a two-feature restriction: the coincident road
/// points of the two features and the pivot joint they meet at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RestrictionPoint {
    pub from: RoadPoint,
    pub to: RoadPoint,
    pub center: JointId,
}

/// A restriction in the rewriter's canonical form: the pivot, the neighbor
/// joints one step aside along each feature, and the feature ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RestrictionInfo {
    pub center: JointId,
    pub from: JointId,
    pub to: JointId,
    pub from_feature: FeatureId,
    pub to_feature: FeatureId,
}

impl RestrictionInfo {
    /// The two canonical directed edges of the restricted maneuver:
    /// `(from -> center, center -> to)`.
    pub fn to_edges(&self) -> (DirectedEdge, DirectedEdge) {
        (
            DirectedEdge::new(self.from, self.center, self.from_feature),
            DirectedEdge::new(self.center, self.to, self.to_feature),
        )
    }

    /// Rebuild an info from a compatible edge pair (`ingoing.to ==
    /// outgoing.from` becomes the pivot).
    fn from_edges(ingoing: DirectedEdge, outgoing: DirectedEdge) -> Self {
        Self {
            center: ingoing.to,
            from: ingoing.from,
            to: outgoing.to,
            from_feature: ingoing.feature,
            to_feature: outgoing.feature,
        }
    }
}

/// An ingoing/outgoing edge pair describes a maneuver only if the ingoing
/// edge ends where the outgoing one starts.
#[inline]
fn compatible(ingoing: DirectedEdge, outgoing: DirectedEdge) -> bool {
    ingoing.to == outgoing.from
}

// ── Rewriter ──────────────────────────────────────────────────────────────────

impl IndexGraph {
    // ── Connection paths ──────────────────────────────────────────────────

    /// Every road point on `from`'s feature between `from` and `to`
    /// inclusive, walking the polyline in whichever direction reaches `to`.
    ///
    /// # Panics
    /// Panics if the road points lie on different features.
    pub fn single_feature_path(&self, from: RoadPoint, to: RoadPoint) -> Vec<RoadPoint> {
        assert_eq!(
            from.feature, to.feature,
            "single-feature path spans features {} and {}",
            from.feature, to.feature
        );

        let feature = from.feature;
        let (a, b) = (from.point.0, to.point.0);
        if a <= b {
            (a..=b).map(|i| RoadPoint::new(feature, PointId(i))).collect()
        } else {
            (b..=a)
                .rev()
                .map(|i| RoadPoint::new(feature, PointId(i)))
                .collect()
        }
    }

    /// One point path per feature shared by the two joints — all parallel
    /// connections between them.
    ///
    /// # Panics
    /// Panics on invalid joint ids.
    pub fn connection_paths(&self, from: JointId, to: JointId) -> Vec<Vec<RoadPoint>> {
        assert!(from.is_valid(), "connection paths from an invalid joint");
        assert!(to.is_valid(), "connection paths to an invalid joint");

        self.joint_index
            .points_with_common_feature(from, to)
            .into_iter()
            .map(|(a, b)| self.single_feature_path(a, b))
            .collect()
    }

    /// Among the parallel routable connections between two joints, the one
    /// of minimum estimator weight.
    ///
    /// Returns an empty path if the joints share no feature at all, and
    /// [`GraphError::NoRoadConnection`] if they share features but none is
    /// routable.
    pub fn shortest_connection_path(
        &self,
        from: JointId,
        to: JointId,
    ) -> GraphResult<Vec<RoadPoint>> {
        let connections = self.joint_index.points_with_common_feature(from, to);
        if connections.is_empty() {
            return Ok(Vec::new());
        }

        // Single connection is the overwhelmingly common case; skip the
        // estimator calls.
        if connections.len() == 1 {
            let (a, b) = connections[0];
            return Ok(self.single_feature_path(a, b));
        }

        let mut best: Option<(f64, (RoadPoint, RoadPoint))> = None;
        for &(a, b) in &connections {
            let geometry = self.road(a.feature);
            if !geometry.is_road() {
                continue;
            }

            let weight = self.estimator().edge_weight(a.feature, geometry, a.point, b.point);
            if best.map_or(true, |(w, _)| weight < w) {
                best = Some((weight, (a, b)));
            }
        }

        match best {
            Some((_, (a, b))) => Ok(self.single_feature_path(a, b)),
            None => Err(GraphError::NoRoadConnection { from, to }),
        }
    }

    /// The connection path along one specific feature, or an empty path if
    /// that feature does not connect the joints.
    pub fn feature_connection_path(
        &self,
        from: JointId,
        to: JointId,
        feature: FeatureId,
    ) -> Vec<RoadPoint> {
        for (a, b) in self.joint_index.points_with_common_feature(from, to) {
            if a.feature == feature {
                return self.single_feature_path(a, b);
            }
        }
        Vec::new()
    }

    /// Reify outgoing edges as geometry paths from `center`, one entry per
    /// routable parallel connection.
    fn outgoing_geom_edges(
        &self,
        outgoing: &[JointEdge],
        center: JointId,
    ) -> GraphResult<Vec<JointEdgeGeom>> {
        let mut geom_edges = Vec::new();
        for edge in outgoing {
            let paths = self.connection_paths(center, edge.target);
            if paths.is_empty() {
                return Err(GraphError::NoCommonFeature { from: center, to: edge.target });
            }

            for path in paths {
                assert!(!path.is_empty(), "empty connection path");
                // A shared feature may still be off-limits for the current
                // vehicle (a footway on a car graph); those paths carry no
                // traffic and are not reconstructed.
                if self.road(path[0].feature).is_road() {
                    geom_edges.push(JointEdgeGeom::new(edge.target, path));
                }
            }
        }
        Ok(geom_edges)
    }

    // ── Fake feature synthesis ────────────────────────────────────────────

    /// Build the geometry for a fake feature tracing `source`: positions
    /// are copied, the nominal speed is averaged over the source points,
    /// and the result is one-way and routable.
    fn create_fake_geometry(&self, source: &[RoadPoint]) -> RoadGeometry {
        let mut speed = 0.0;
        let mut points = Vec::with_capacity(source.len());
        for &rp in source {
            speed += self.speed(rp) / source.len() as f64;
            points.push(self.point(rp));
        }
        RoadGeometry::new(true, true, speed, points)
    }

    /// Synthesize a fake feature whose point 0 joins `from` and whose far
    /// end dangles loose.  Returns the minted feature id.
    ///
    /// # Panics
    /// Panics if `from` is out of range or `source` has fewer than two
    /// points.
    pub(crate) fn add_fake_loose_end_feature(
        &mut self,
        from: JointId,
        source: &[RoadPoint],
    ) -> FeatureId {
        assert!(from.index() < self.joint_count() as usize, "{from} out of range");
        assert!(source.len() > 1, "fake feature needs at least two source points");

        let geometry = self.create_fake_geometry(source);
        let feature = self.next_fake_feature;
        self.next_fake_feature = FeatureId(feature.0 + 1);
        self.fake_geometry.insert(feature, geometry);

        let start = RoadPoint::new(feature, PointId(0));
        self.road_index.add_joint(start, from);
        self.joint_index.append_to_joint(from, start);

        feature
    }

    /// Synthesize a fake feature joining `from` to `to` along `source`.
    pub(crate) fn add_fake_feature(
        &mut self,
        from: JointId,
        to: JointId,
        source: &[RoadPoint],
    ) -> FeatureId {
        assert!(to.index() < self.joint_count() as usize, "{to} out of range");

        let feature = self.add_fake_loose_end_feature(from, source);
        let end = RoadPoint::new(feature, PointId(source.len() as u32 - 1));
        self.road_index.add_joint(end, to);
        self.joint_index.append_to_joint(to, end);

        feature
    }

    // ── Canonicalization ──────────────────────────────────────────────────

    /// The joints among `edges`' targets that lie on `center`'s feature —
    /// the candidates one step aside of the pivot along that feature.
    fn find_one_step_aside(&self, center: RoadPoint, edges: &[JointEdge]) -> Vec<JointId> {
        let mut aside = Vec::new();
        for (_, joint) in self.road_index.feature_joints(center.feature) {
            for edge in edges {
                if edge.target == joint {
                    aside.push(joint);
                }
            }
        }
        aside
    }

    /// Both edge lists at `center`, or `None` if either is empty.
    fn ingoing_and_outgoing_edges(
        &self,
        center: JointId,
        view: GraphView,
    ) -> Option<(Vec<JointEdge>, Vec<JointEdge>)> {
        let ingoing = self.edge_list(center, Direction::Ingoing, view);
        if ingoing.is_empty() {
            return None;
        }

        let outgoing = self.edge_list(center, Direction::Outgoing, view);
        if outgoing.is_empty() {
            return None;
        }
        Some((ingoing, outgoing))
    }

    /// Resolve a restriction point to canonical form against the
    /// unrestricted view: find the neighbor joints one step aside of the
    /// pivot along each feature.  `None` if either side has no candidate.
    ///
    /// When several candidates exist the last one (highest point id on the
    /// feature) wins; the ordered road index makes the choice
    /// deterministic.
    fn prepare_restriction(&self, point: &RestrictionPoint) -> Option<RestrictionInfo> {
        let ingoing = self.edge_list(point.center, Direction::Ingoing, GraphView::Unrestricted);
        let &from = self.find_one_step_aside(point.from, &ingoing).last()?;

        let outgoing = self.edge_list(point.center, Direction::Outgoing, GraphView::Unrestricted);
        let &to = self.find_one_step_aside(point.to, &outgoing).last()?;

        Some(RestrictionInfo {
            center: point.center,
            from,
            to,
            from_feature: point.from.feature,
            to_feature: point.to.feature,
        })
    }

    // ── Expansion over prior rewrites ─────────────────────────────────────

    fn for_each_non_blocked_mapping_leaf(
        &self,
        edge: DirectedEdge,
        f: &mut impl FnMut(DirectedEdge),
    ) {
        match self.edge_mapping.get(&edge) {
            Some(replacements) => {
                for &replacement in replacements {
                    self.for_each_non_blocked_mapping_leaf(replacement, f);
                }
            }
            None => {
                if !self.blocked_edges.contains(&edge) {
                    f(edge);
                }
            }
        }
    }

    /// The concrete edges `edge` stands for after all rewrites so far: the
    /// leaves of the mapping relation under `edge`, minus blocked ones.  An
    /// edge no rewrite touched stands for itself.
    pub fn expanded_edges(&self, edge: DirectedEdge) -> Vec<DirectedEdge> {
        let mut leaves = Vec::new();
        self.for_each_non_blocked_mapping_leaf(edge, &mut |leaf| leaves.push(leaf));
        leaves
    }

    /// Canonicalize `point` and expand it across prior rewrites: every
    /// compatible pair of (expanded ingoing, expanded outgoing) edges is a
    /// concrete restriction to apply.
    fn expand_restriction(&self, point: &RestrictionPoint) -> Vec<RestrictionInfo> {
        let Some(info) = self.prepare_restriction(point) else {
            return Vec::new();
        };

        let (in_edge, out_edge) = info.to_edges();
        let ingoing = self.expanded_edges(in_edge);
        let outgoing = self.expanded_edges(out_edge);

        let mut infos = Vec::new();
        for &i in &ingoing {
            for &o in &outgoing {
                if compatible(i, o) {
                    infos.push(RestrictionInfo::from_edges(i, o));
                }
            }
        }
        infos
    }

    // ── Blocking ──────────────────────────────────────────────────────────

    pub(crate) fn disable_edge(&mut self, edge: DirectedEdge) {
        self.blocked_edges.insert(edge);
    }

    /// Block every parallel edge from `from` to `to`, whatever feature it
    /// follows.
    fn disable_all_edges(&mut self, from: JointId, to: JointId) {
        for (rp, _) in self.joint_index.points_with_common_feature(from, to) {
            self.disable_edge(DirectedEdge::new(from, to, rp.feature));
        }
    }

    // ── "No" restriction ──────────────────────────────────────────────────

    /// Apply a "No" restriction whose referenced features are real,
    /// expanding it first across prior rewrites.
    pub fn apply_restriction_no_real_features(
        &mut self,
        point: &RestrictionPoint,
    ) -> GraphResult<()> {
        for info in self.expand_restriction(point) {
            self.apply_restriction_no(info)?;
        }
        Ok(())
    }

    /// Make the maneuver `from -> center -> to` unreachable.
    ///
    /// If the pivot has a single ingoing edge, blocking the outgoing half
    /// suffices (and vice versa).  Otherwise the pivot is cloned: with a
    /// restriction on `4 -> O -> 3` at a pivot `O`,
    ///
    /// ```text
    /// 1   2   3           1   2   3
    ///   ↖ ↑ ↗               ↖ ↑ ↗
    ///     O         =>    N     O
    ///   ↗ ↑ ↖             ↑   ↗ ↑ ↖
    /// 4   5   6           4   5   6    (N -> 1, N -> 2 as fake features)
    /// ```
    ///
    /// the edge `4 -> O` is blocked, a loose-end fake feature carries
    /// `4 -> N`, and fake features `N -> 1` and `N -> 2` reconstruct every
    /// permitted outgoing edge; nothing reconstructs `N -> 3`.  The
    /// mapping records
    ///
    /// ```text
    /// 4-O -> 4-N
    /// O-1 -> N-1
    /// O-2 -> N-2
    /// ```
    ///
    /// so later restrictions and route reconstruction can follow the
    /// rewrite.
    pub fn apply_restriction_no(&mut self, info: RestrictionInfo) -> GraphResult<()> {
        let center = info.center;
        let from = DirectedEdge::new(info.from, center, info.from_feature);
        let to = DirectedEdge::new(center, info.to, info.to_feature);
        debug_assert!(!self.blocked_edges.contains(&from));
        debug_assert!(!self.blocked_edges.contains(&to));

        let Some((ingoing, outgoing)) =
            self.ingoing_and_outgoing_edges(center, GraphView::Restricted)
        else {
            return Ok(());
        };

        // One ingoing edge: every path through the pivot arrives along the
        // restricted feature, so removing the outgoing half is exact.
        if ingoing.len() == 1 {
            self.disable_edge(to);
            return Ok(());
        }

        // One outgoing edge: symmetric.
        if outgoing.len() == 1 {
            self.disable_edge(from);
            return Ok(());
        }

        let mut outgoing = outgoing;
        outgoing.retain(|e| {
            // Drop the forbidden target, U-turns back to the source (kept
            // unreconstructed, like the forbidden edge itself), and
            // self-loops through the pivot.
            e.target != info.to && e.target != info.from && e.target != center
        });
        outgoing.sort_unstable_by_key(|e| e.target);
        outgoing.dedup_by_key(|e| e.target);

        // A pivot can reach the same target over parallel features; the
        // geometry expansion yields one entry per routable parallel path.
        let geom_edges = self.outgoing_geom_edges(&outgoing, center)?;

        let ingoing_path = self.feature_connection_path(info.from, center, info.from_feature);
        if ingoing_path.is_empty() {
            return Ok(());
        }

        let mut new_joint = JointId::INVALID;
        for (i, geom_edge) in geom_edges.iter().enumerate() {
            if i == 0 {
                if info.from == center || center == geom_edge.target {
                    // Self-loop through the pivot; leave the graph as is.
                    return Ok(());
                }

                let in_feature = self.add_fake_loose_end_feature(info.from, &ingoing_path);
                new_joint = self.insert_joint(RoadPoint::new(
                    in_feature,
                    PointId(ingoing_path.len() as u32 - 1),
                ));
                self.add_edge_mapping(
                    from,
                    DirectedEdge::new(info.from, new_joint, in_feature),
                );
            }

            let out_feature = self.add_fake_feature(new_joint, geom_edge.target, &geom_edge.path);
            let original =
                DirectedEdge::new(center, geom_edge.target, geom_edge.path[0].feature);
            self.add_edge_mapping(
                original,
                DirectedEdge::new(new_joint, geom_edge.target, out_feature),
            );
        }

        self.disable_edge(from);
        Ok(())
    }

    // ── "Only" restriction ────────────────────────────────────────────────

    /// Apply an "Only" restriction whose referenced features are real,
    /// expanding it first across prior rewrites.
    pub fn apply_restriction_only_real_features(
        &mut self,
        point: &RestrictionPoint,
    ) -> GraphResult<()> {
        for info in self.expand_restriction(point) {
            self.apply_restriction_only(info)?;
        }
        Ok(())
    }

    /// Make `center -> to` the only maneuver reachable from `from ->
    /// center`.
    ///
    /// With one outgoing edge there is nothing to do.  With one ingoing
    /// edge all traffic at the pivot is the restricted traffic, so every
    /// other outgoing target is blocked outright (all parallel edges).  In
    /// the general case traffic from `from` is diverted through a clone:
    /// a loose-end fake feature `from -> N` plus a fake feature `N -> to`,
    /// after which the original ingoing edge is blocked — from `N` only the
    /// mandatory turn exists, while other ingoing edges still use the
    /// pivot freely.
    pub fn apply_restriction_only(&mut self, info: RestrictionInfo) -> GraphResult<()> {
        let center = info.center;
        if info.to == center || info.from == center {
            return Ok(());
        }

        let Some((ingoing, outgoing)) =
            self.ingoing_and_outgoing_edges(center, GraphView::Restricted)
        else {
            return Ok(());
        };

        if outgoing.len() == 1 {
            return Ok(());
        }

        if ingoing.len() == 1 {
            for edge in &outgoing {
                if edge.target != info.to {
                    self.disable_all_edges(center, edge.target);
                }
            }
            return Ok(());
        }

        let ingoing_path = self.feature_connection_path(info.from, center, info.from_feature);
        if ingoing_path.len() < 2 {
            return Ok(());
        }

        let outgoing_path = self.feature_connection_path(center, info.to, info.to_feature);
        if outgoing_path.len() < 2 {
            return Ok(());
        }

        let in_feature = self.add_fake_loose_end_feature(info.from, &ingoing_path);
        let new_joint = self.insert_joint(RoadPoint::new(
            in_feature,
            PointId(ingoing_path.len() as u32 - 1),
        ));
        let out_feature = self.add_fake_feature(new_joint, info.to, &outgoing_path);

        let from = DirectedEdge::new(info.from, center, info.from_feature);
        let to = DirectedEdge::new(center, info.to, info.to_feature);
        self.add_edge_mapping(from, DirectedEdge::new(info.from, new_joint, in_feature));
        self.add_edge_mapping(to, DirectedEdge::new(new_joint, info.to, out_feature));

        self.disable_edge(from);
        Ok(())
    }

    fn add_edge_mapping(&mut self, original: DirectedEdge, replacement: DirectedEdge) {
        self.edge_mapping.entry(original).or_default().push(replacement);
    }

    // ── Batch driver ──────────────────────────────────────────────────────

    /// Apply a batch of restrictions, best-effort.
    ///
    /// Unsupported restrictions (anything but two features) and rewrite
    /// failures are logged and skipped; partial effects of a failed
    /// restriction remain, and processing continues with the next one.
    /// Restrictions whose features do not meet at a joint are ignored.
    pub fn apply_restrictions(&mut self, restrictions: &[Restriction]) {
        for restriction in restrictions {
            if restriction.feature_ids.len() != 2 {
                error!(
                    "only two-feature restrictions are supported, got a {}-feature {} restriction",
                    restriction.feature_ids.len(),
                    restriction.kind
                );
                continue;
            }

            let Some(point) = self
                .road_index
                .adjacent_feature_point(restriction.feature_ids[0], restriction.feature_ids[1])
            else {
                // The referenced features are not adjacent.
                continue;
            };

            let result = match restriction.kind {
                RestrictionKind::No => self.apply_restriction_no_real_features(&point),
                RestrictionKind::Only => self.apply_restriction_only_real_features(&point),
            };

            if let Err(e) = result {
                error!(
                    "failed to apply {} restriction between features {} and {}: {e}",
                    restriction.kind, restriction.feature_ids[0], restriction.feature_ids[1]
                );
            }
        }
    }
}
