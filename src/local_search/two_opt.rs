//! 2-opt neighborhood: route-internal segment reversal.

use log::debug;

use crate::assignment::RouteAssignment;
use crate::cost::Cost;
use crate::instance::Instance;

use super::{LocalSearch, Move};

impl LocalSearch {
    /// One pass of intra-route segment reversals over the full assignment.
    ///
    /// Reversal can break pickup-before-delivery order and reshape the
    /// clamped load profile, so each candidate is re-validated in full by
    /// `Move::evaluate`. First strictly improving feasible reversal per
    /// route is applied. Returns whether any move was applied.
    pub fn reversal_pass(
        &self,
        assignment: &mut RouteAssignment,
        instance: &Instance,
        span_coefficient: Cost,
    ) -> bool {
        let mut improved = false;

        for v in 0..assignment.routes.len() {
            let len = assignment.routes[v].stops.len();
            if len < 2 {
                continue;
            }

            'route: for start in 0..(len - 1) {
                for end in (start + 1)..len {
                    let mv = Move::Reverse {
                        vehicle: v,
                        start,
                        end,
                    };
                    let Some(delta) = mv.evaluate(assignment, instance, span_coefficient) else {
                        continue;
                    };
                    if delta < 0 {
                        debug!(
                            "reverse segment [{}, {}] of vehicle {}, delta {}",
                            start, end, v, delta
                        );
                        mv.apply(assignment, instance);
                        improved = true;
                        break 'route;
                    }
                }
            }
        }

        improved
    }
}
