//! Relocation neighborhood: move one whole request to another place.

use log::debug;

use crate::assignment::RouteAssignment;
use crate::cost::Cost;
use crate::instance::Instance;

use super::{LocalSearch, Move};

impl LocalSearch {
    /// One pass of or-opt request relocation over the full assignment.
    ///
    /// Requests, target vehicles, and target positions are scanned in
    /// ascending order; the first strictly improving feasible move per
    /// request is applied immediately. Returns whether any move was applied.
    pub fn relocate_pass(
        &self,
        assignment: &mut RouteAssignment,
        instance: &Instance,
        span_coefficient: Cost,
    ) -> bool {
        let mut improved = false;

        for r in 0..instance.requests().len() {
            let request = instance.request(r);
            let Some((source, _)) = assignment.locate(request.pickup) else {
                continue;
            };

            'vehicles: for v in 0..assignment.routes.len() {
                // Positions index the target route after the pair leaves its
                // current spots.
                let base_len = if v == source {
                    assignment.routes[v].stops.len() - 2
                } else {
                    assignment.routes[v].stops.len()
                };

                for p in 0..=base_len {
                    for q in (p + 1)..=(base_len + 1) {
                        let mv = Move::Relocate {
                            request: r,
                            vehicle: v,
                            pickup_pos: p,
                            delivery_pos: q,
                        };
                        let Some(delta) = mv.evaluate(assignment, instance, span_coefficient)
                        else {
                            continue;
                        };
                        if delta < 0 {
                            debug!(
                                "relocate request {} to vehicle {} at ({}, {}), delta {}",
                                r, v, p, q, delta
                            );
                            mv.apply(assignment, instance);
                            improved = true;
                            break 'vehicles;
                        }
                    }
                }
            }
        }

        improved
    }
}
