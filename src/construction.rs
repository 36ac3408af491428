//! Construction phase: cheapest feasible insertion.
//!
//! Repeatedly inserts the globally cheapest feasible (request, vehicle,
//! pickup position, delivery position) candidate until every request is
//! routed, or reports the instance infeasible when no candidate remains.

use log::{debug, info};

use crate::assignment::{evaluate_route, with_insertion, RouteAssignment};
use crate::cost::Cost;
use crate::error::SolverError;
use crate::instance::Instance;

/// The winning candidate of one construction step.
struct Insertion {
    request: usize,
    vehicle: usize,
    pickup_pos: usize,
    delivery_pos: usize,
    delta: Cost,
    stops: Vec<usize>,
    distance: Cost,
}

/// Route every request by cheapest feasible insertion.
///
/// Candidates are scanned in ascending (request, vehicle, p, q) order and the
/// incumbent is replaced only on a strictly smaller marginal cost, so ties
/// break toward the lowest request id, then vehicle id, then p, then q. The
/// scan is deterministic: identical instances yield identical assignments.
pub fn construct(
    assignment: &mut RouteAssignment,
    instance: &Instance,
) -> Result<(), SolverError> {
    let mut unrouted: Vec<usize> = (0..instance.requests().len()).collect();

    while !unrouted.is_empty() {
        let mut best: Option<Insertion> = None;

        for &r in &unrouted {
            let request = instance.request(r);
            for (v, route) in assignment.routes.iter().enumerate() {
                let vehicle = instance.vehicle(v);
                let len = route.stops.len();
                for p in 0..=len {
                    for q in (p + 1)..=(len + 1) {
                        let stops =
                            with_insertion(&route.stops, request.pickup, request.delivery, p, q);
                        let Some(distance) = evaluate_route(&stops, vehicle, instance) else {
                            continue;
                        };
                        let delta = distance - route.distance;
                        if best.as_ref().map_or(true, |b| delta < b.delta) {
                            best = Some(Insertion {
                                request: r,
                                vehicle: v,
                                pickup_pos: p,
                                delivery_pos: q,
                                delta,
                                stops,
                                distance,
                            });
                        }
                    }
                }
            }
        }

        match best {
            Some(insertion) => {
                debug!(
                    "insert request {} into vehicle {} at ({}, {}), marginal cost {}",
                    insertion.request,
                    insertion.vehicle,
                    insertion.pickup_pos,
                    insertion.delivery_pos,
                    insertion.delta
                );
                assignment.set_route(insertion.vehicle, insertion.stops, insertion.distance);
                unrouted.retain(|&r| r != insertion.request);
            }
            None => {
                let request = unrouted[0];
                info!(
                    "construction stalled with {} unrouted requests, instance is infeasible",
                    unrouted.len()
                );
                return Err(SolverError::InfeasibleInstance { request });
            }
        }
    }

    info!(
        "construction complete: total distance {}",
        assignment.total_distance()
    );
    Ok(())
}
