//! Graph error type.
//!
//! Restriction-data faults are recoverable: the batch driver logs them and
//! moves on to the next restriction.  Precondition violations (out-of-range
//! point ids, joint ids beyond the joint count, too-short fake geometry)
//! are programmer errors and stay `assert!`s.

use thiserror::Error;

use rn_core::JointId;

/// Errors produced while rewriting the graph for turn restrictions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Two joints that a rewrite step must connect share no feature.
    #[error("joints {from} and {to} share no common feature")]
    NoCommonFeature { from: JointId, to: JointId },

    /// The joints are connected, but by no feature routable for the
    /// current vehicle.
    #[error("joints {from} and {to} are not connected by a routable feature")]
    NoRoadConnection { from: JointId, to: JointId },
}

pub type GraphResult<T> = Result<T, GraphError>;
