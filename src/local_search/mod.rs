//! Local search: feasibility-preserving improvement of a constructed
//! assignment.
//!
//! Two move kinds are applied in a fixed deterministic schedule, all
//! relocations before all reversals, first improvement within each pass. A
//! move is accepted only if it strictly reduces the objective and the
//! affected routes remain feasible.

pub mod relocate;
pub mod two_opt;

use std::time::Instant;

use log::info;

use crate::assignment::{arc_sum, evaluate_route, with_insertion, RouteAssignment};
use crate::cost::Cost;
use crate::instance::Instance;

/// A candidate local-search move with a uniform evaluate/apply contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Move one whole request to positions (p, q) of a target route.
    Relocate {
        request: usize,
        vehicle: usize,
        pickup_pos: usize,
        delivery_pos: usize,
    },
    /// Reverse the stop segment `[start, end]` within one route.
    Reverse {
        vehicle: usize,
        start: usize,
        end: usize,
    },
}

impl Move {
    /// Evaluate the move without mutating the assignment.
    ///
    /// Returns the objective delta when every affected route stays feasible,
    /// `None` otherwise. Acceptance requires a strictly negative delta.
    pub fn evaluate(
        &self,
        assignment: &RouteAssignment,
        instance: &Instance,
        span_coefficient: Cost,
    ) -> Option<Cost> {
        let replaced = match *self {
            Move::Relocate {
                request,
                vehicle,
                pickup_pos,
                delivery_pos,
            } => {
                if pickup_pos >= delivery_pos {
                    return None;
                }
                let (source, reduced) = remove_request(assignment, instance, request)?;
                let req = instance.request(request);
                if vehicle == source {
                    if delivery_pos > reduced.len() + 1 {
                        return None;
                    }
                    let stops = with_insertion(
                        &reduced,
                        req.pickup,
                        req.delivery,
                        pickup_pos,
                        delivery_pos,
                    );
                    let distance = evaluate_route(&stops, instance.vehicle(vehicle), instance)?;
                    vec![(vehicle, distance)]
                } else {
                    let target = &assignment.routes[vehicle];
                    if delivery_pos > target.stops.len() + 1 {
                        return None;
                    }
                    // Removing a pair can reshape the clamped load profile,
                    // so the shrunk source route is re-validated too.
                    let reduced_distance =
                        evaluate_route(&reduced, instance.vehicle(source), instance)?;
                    let stops = with_insertion(
                        &target.stops,
                        req.pickup,
                        req.delivery,
                        pickup_pos,
                        delivery_pos,
                    );
                    let distance = evaluate_route(&stops, instance.vehicle(vehicle), instance)?;
                    vec![(source, reduced_distance), (vehicle, distance)]
                }
            }
            Move::Reverse {
                vehicle,
                start,
                end,
            } => {
                let route = &assignment.routes[vehicle];
                if start >= end || end >= route.stops.len() {
                    return None;
                }
                let mut stops = route.stops.clone();
                stops[start..=end].reverse();
                let distance = evaluate_route(&stops, instance.vehicle(vehicle), instance)?;
                vec![(vehicle, distance)]
            }
        };

        let current = assignment.objective(span_coefficient);
        Some(objective_with(assignment, &replaced, span_coefficient) - current)
    }

    /// Apply the move. Only called after `evaluate` accepted it.
    pub fn apply(&self, assignment: &mut RouteAssignment, instance: &Instance) {
        match *self {
            Move::Relocate {
                request,
                vehicle,
                pickup_pos,
                delivery_pos,
            } => {
                let Some((source, reduced)) = remove_request(assignment, instance, request) else {
                    return;
                };
                let req = instance.request(request);
                if vehicle == source {
                    let stops = with_insertion(
                        &reduced,
                        req.pickup,
                        req.delivery,
                        pickup_pos,
                        delivery_pos,
                    );
                    let distance = arc_sum(&stops, instance);
                    assignment.set_route(vehicle, stops, distance);
                } else {
                    let reduced_distance = arc_sum(&reduced, instance);
                    let stops = with_insertion(
                        &assignment.routes[vehicle].stops,
                        req.pickup,
                        req.delivery,
                        pickup_pos,
                        delivery_pos,
                    );
                    let distance = arc_sum(&stops, instance);
                    assignment.set_route(source, reduced, reduced_distance);
                    assignment.set_route(vehicle, stops, distance);
                }
            }
            Move::Reverse {
                vehicle,
                start,
                end,
            } => {
                let route = &mut assignment.routes[vehicle];
                route.stops[start..=end].reverse();
                route.distance = arc_sum(&route.stops, instance);
            }
        }
    }
}

/// Route index holding a request, plus its stop sequence with the request's
/// pickup and delivery removed.
fn remove_request(
    assignment: &RouteAssignment,
    instance: &Instance,
    request: usize,
) -> Option<(usize, Vec<usize>)> {
    let req = instance.request(request);
    let (source, _) = assignment.locate(req.pickup)?;
    let reduced = assignment.routes[source]
        .stops
        .iter()
        .copied()
        .filter(|&stop| stop != req.pickup && stop != req.delivery)
        .collect();
    Some((source, reduced))
}

/// Objective value with some route distances replaced by candidate values.
fn objective_with(
    assignment: &RouteAssignment,
    replaced: &[(usize, Cost)],
    span_coefficient: Cost,
) -> Cost {
    let distance_of = |r: usize| {
        replaced
            .iter()
            .find(|&&(route, _)| route == r)
            .map(|&(_, distance)| distance)
            .unwrap_or(assignment.routes[r].distance)
    };

    let mut total = 0;
    let mut min = Cost::MAX;
    let mut max = Cost::MIN;
    for r in 0..assignment.routes.len() {
        let distance = distance_of(r);
        total += distance;
        min = min.min(distance);
        max = max.max(distance);
    }
    let span = if assignment.routes.is_empty() { 0 } else { max - min };
    total + span_coefficient * span
}

/// Runs improvement passes over a feasible assignment.
pub struct LocalSearch {
    pub max_passes: u32,
}

impl LocalSearch {
    /// Create a local search bounded by a pass budget.
    pub fn new(max_passes: u32) -> Self {
        LocalSearch { max_passes }
    }

    /// Improve the assignment until a full pass yields no improving move,
    /// the pass budget is spent, or the deadline expires, whichever comes
    /// first. Returns the number of passes run. The assignment is feasible
    /// on every exit path.
    pub fn improve(
        &self,
        assignment: &mut RouteAssignment,
        instance: &Instance,
        span_coefficient: Cost,
        deadline: Option<Instant>,
    ) -> u32 {
        let mut passes = 0;
        while passes < self.max_passes {
            if let Some(deadline) = deadline {
                if Instant::now() >= deadline {
                    info!("time budget exhausted after {} local-search passes", passes);
                    break;
                }
            }

            let mut improvement = false;
            improvement |= self.relocate_pass(assignment, instance, span_coefficient);
            improvement |= self.reversal_pass(assignment, instance, span_coefficient);
            passes += 1;

            if !improvement {
                break;
            }
        }
        info!(
            "local search finished after {} passes, total distance {}",
            passes,
            assignment.total_distance()
        );
        passes
    }
}
