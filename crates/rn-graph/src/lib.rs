//! `rn-graph` — the road-network index graph of the `rn` routing engine.
//!
//! A joint-level view over a road feature dataset, plus the machinery that
//! rewrites the graph so turn restrictions become structurally
//! unreachable: the path search runs unchanged on a graph in which
//! forbidden maneuvers simply do not exist.
//!
//! # Crate layout
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`graph`]        | `IndexGraph` — construction, lookups, edge enumeration |
//! | [`restrictions`] | The restriction rewriter and its vocabulary            |
//! | [`road_index`]   | `RoadIndex` — feature point -> joint                   |
//! | [`joint_index`]  | `JointIndex` — joint -> road points                    |
//! | [`edge`]         | `DirectedEdge`, `JointEdge`, `Direction`, `GraphView`  |
//! | [`loader`]       | `GeometryLoader` trait, `MemoryGeometryLoader`         |
//! | [`estimator`]    | `EdgeEstimator` trait, `TravelTimeEstimator`           |
//! | [`locator`]      | `JointLocator` — nearest-joint queries (R-tree)        |
//! | [`error`]        | `GraphError`, `GraphResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Forwards to `rn-core/serde` (vocabulary type derives).  |

pub mod edge;
pub mod error;
pub mod estimator;
pub mod graph;
pub mod joint_index;
pub mod loader;
pub mod locator;
pub mod restrictions;
pub mod road_index;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use edge::{DirectedEdge, Direction, GraphView, JointEdge, JointEdgeGeom};
pub use error::{GraphError, GraphResult};
pub use estimator::{EdgeEstimator, TravelTimeEstimator};
pub use graph::{IndexGraph, FAKE_FEATURE_START};
pub use joint_index::JointIndex;
pub use loader::{GeometryLoader, MemoryGeometryLoader};
pub use locator::JointLocator;
pub use restrictions::{RestrictionInfo, RestrictionPoint};
pub use road_index::RoadIndex;
