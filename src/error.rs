//! Error types for instance construction, solving, and evaluation.

use thiserror::Error;

/// Errors reported by the routing core.
///
/// `MalformedInstance` is fatal and raised before the optimizer ever runs.
/// `InfeasibleInstance` is a terminal optimizer outcome, distinct from
/// success. `DegenerateBaseline` is raised by the evaluator only, so callers
/// can tell "no route found" apart from "route found but efficiency
/// undefined".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The problem description is inconsistent and was rejected at
    /// instance-construction time.
    #[error("malformed instance: {reason}")]
    MalformedInstance { reason: String },

    /// No feasible insertion exists for the named request; the instance as a
    /// whole cannot be served under the capacity/distance/precedence limits.
    #[error("infeasible instance: no feasible insertion for request {request}")]
    InfeasibleInstance { request: usize },

    /// The counterfactual baseline sums to zero, so the efficiency ratio is
    /// undefined.
    #[error("degenerate baseline: counterfactual distance is zero")]
    DegenerateBaseline,
}

impl SolverError {
    /// Shorthand for a `MalformedInstance` with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        SolverError::MalformedInstance {
            reason: reason.into(),
        }
    }
}
