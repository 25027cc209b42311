//! `rn-core` — foundational types for the `rn` road-network index graph.
//!
//! This crate is a dependency of every other `rn-*` crate.  It holds the
//! shared vocabulary only; all graph logic lives in `rn-graph`.
//!
//! # What lives here
//!
//! | Module          | Contents                                             |
//! |-----------------|------------------------------------------------------|
//! | [`ids`]         | `FeatureId`, `PointId`, `JointId`, `RoadPoint`       |
//! | [`geo`]         | `Point2D` (projected planar coordinate)              |
//! | [`road`]        | `RoadGeometry`                                       |
//! | [`joint`]       | `Joint`                                              |
//! | [`restriction`] | `Restriction`, `RestrictionKind`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod joint;
pub mod restriction;
pub mod road;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::Point2D;
pub use ids::{FeatureId, JointId, PointId, RoadPoint};
pub use joint::Joint;
pub use restriction::{Restriction, RestrictionKind};
pub use road::RoadGeometry;
