//! Terminal solution representation and the external output schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assignment::RouteAssignment;
use crate::cost::Cost;
use crate::evaluation::Evaluation;
use crate::instance::Instance;

/// One serviced stop: the node visited and the signed load change there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub node_index: usize,
    pub load_delta: i64,
}

/// One vehicle's final route: ordered stops (depot visits omitted) and the
/// full depot-to-depot distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRoute {
    pub vehicle_id: usize,
    pub stops: Vec<Stop>,
    pub route_distance: Cost,
}

/// A frozen, feasible solution. Created only on successful optimization and
/// immutable thereafter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub routes: Vec<VehicleRoute>,
    pub total_distance: Cost,
}

impl Solution {
    /// Freeze a terminal assignment into ordered per-vehicle stop lists.
    pub fn extract(assignment: &RouteAssignment, instance: &Instance) -> Self {
        let routes = assignment
            .routes
            .iter()
            .map(|route| VehicleRoute {
                vehicle_id: route.vehicle,
                stops: route
                    .stops
                    .iter()
                    .map(|&node| Stop {
                        node_index: node,
                        load_delta: instance.node(node).demand,
                    })
                    .collect(),
                route_distance: route.distance,
            })
            .collect();

        Solution {
            routes,
            total_distance: assignment.total_distance(),
        }
    }

    /// Number of routes that actually visit a stop.
    pub fn active_route_count(&self) -> usize {
        self.routes.iter().filter(|route| !route.stops.is_empty()).count()
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Total Distance: {}", self.total_distance)?;
        writeln!(f, "  Active Routes: {}", self.active_route_count())?;

        for route in &self.routes {
            if route.stops.is_empty() {
                continue;
            }
            let path: Vec<usize> = route.stops.iter().map(|stop| stop.node_index).collect();
            writeln!(
                f,
                "  Vehicle {}: {:?} (Distance: {})",
                route.vehicle_id, path, route.route_distance
            )?;
        }

        Ok(())
    }
}

/// The external output schema handed to plotting/reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    pub routes: Vec<VehicleRoute>,
    pub evaluation: Evaluation,
}

impl PlanReport {
    pub fn new(solution: Solution, evaluation: Evaluation) -> Self {
        PlanReport {
            routes: solution.routes,
            evaluation,
        }
    }
}
