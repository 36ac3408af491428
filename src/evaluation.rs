//! Counterfactual evaluation: routed cost against per-request direct trips.

use serde::{Deserialize, Serialize};

use crate::cost::Cost;
use crate::error::SolverError;
use crate::instance::Instance;
use crate::solution::Solution;

/// Comparison of the routed plan against the counterfactual of serving every
/// request as an isolated direct pickup-to-delivery trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub counterfactual_distance: Cost,
    pub routed_distance: Cost,
    pub efficiency_ratio: f64,
}

/// Evaluate a solution against the direct-trip baseline.
///
/// `efficiency_ratio = (routed - baseline) / baseline`; zero means the
/// routed plan costs exactly as much as the isolated trips, negative means
/// consolidation saved distance. Fails with `DegenerateBaseline` when the
/// baseline sums to zero.
pub fn evaluate(solution: &Solution, instance: &Instance) -> Result<Evaluation, SolverError> {
    let counterfactual: Cost = instance
        .requests()
        .iter()
        .map(|request| instance.cost(request.pickup, request.delivery))
        .sum();

    if counterfactual == 0 {
        return Err(SolverError::DegenerateBaseline);
    }

    let routed = solution.total_distance;
    Ok(Evaluation {
        counterfactual_distance: counterfactual,
        routed_distance: routed,
        efficiency_ratio: (routed - counterfactual) as f64 / counterfactual as f64,
    })
}
