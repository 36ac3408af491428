//! Route assignment: per-vehicle stop sequences and the feasibility
//! evaluator shared by construction and local search.

use itertools::{Itertools, MinMaxResult};

use crate::cost::Cost;
use crate::instance::{Instance, Vehicle};

/// One vehicle's route: an ordered sequence of non-depot node indices. The
/// depot legs at both ends are implicit. `distance` caches the full
/// depot-to-depot cost and is kept in sync with every committed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub vehicle: usize,
    pub stops: Vec<usize>,
    pub distance: Cost,
}

impl RoutePlan {
    /// Create an empty depot-to-depot route for a vehicle.
    pub fn new(vehicle: usize) -> Self {
        RoutePlan {
            vehicle,
            stops: Vec::new(),
            distance: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// The working assignment of requests to vehicle routes, mutated
/// incrementally during construction and local search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAssignment {
    pub routes: Vec<RoutePlan>,
}

impl RouteAssignment {
    /// One empty route per vehicle.
    pub fn new(instance: &Instance) -> Self {
        RouteAssignment {
            routes: instance
                .vehicles()
                .iter()
                .map(|vehicle| RoutePlan::new(vehicle.id))
                .collect(),
        }
    }

    /// Sum of all route distances.
    pub fn total_distance(&self) -> Cost {
        self.routes.iter().map(|route| route.distance).sum()
    }

    /// Spread between the longest and shortest route, empty routes counting
    /// as zero.
    pub fn span(&self) -> Cost {
        match self.routes.iter().map(|route| route.distance).minmax() {
            MinMaxResult::MinMax(min, max) => max - min,
            _ => 0,
        }
    }

    /// The search objective: total distance plus the weighted route-length
    /// spread.
    pub fn objective(&self, span_coefficient: Cost) -> Cost {
        self.total_distance() + span_coefficient * self.span()
    }

    /// Locate a node in the assignment as `(route index, position)`.
    pub fn locate(&self, node: usize) -> Option<(usize, usize)> {
        for (r, route) in self.routes.iter().enumerate() {
            if let Some(pos) = route.stops.iter().position(|&stop| stop == node) {
                return Some((r, pos));
            }
        }
        None
    }

    /// Replace a route's stop sequence and cached distance.
    pub fn set_route(&mut self, route_idx: usize, stops: Vec<usize>, distance: Cost) {
        let route = &mut self.routes[route_idx];
        route.stops = stops;
        route.distance = distance;
    }
}

/// Recompute a route's full depot-to-depot distance by summing consecutive
/// arc costs. Must agree with the incrementally maintained `distance`.
pub fn arc_sum(stops: &[usize], instance: &Instance) -> Cost {
    let depot = instance.depot();
    std::iter::once(depot)
        .chain(stops.iter().copied())
        .chain(std::iter::once(depot))
        .tuple_windows()
        .map(|(from, to)| instance.cost(from, to))
        .sum()
}

/// Evaluate a candidate stop sequence against a vehicle's limits.
///
/// Returns the full depot-to-depot distance when the sequence is feasible:
/// cumulative load (deliveries reduce it, clamped no lower than zero) stays
/// within the vehicle capacity at every position, cumulative distance stays
/// within the vehicle's max route distance, and every request touched by the
/// sequence has its pickup strictly before its delivery with both stops
/// present. Returns `None` on any violation.
pub fn evaluate_route(stops: &[usize], vehicle: &Vehicle, instance: &Instance) -> Option<Cost> {
    let depot = instance.depot();
    let mut open = vec![false; instance.requests().len()];
    let mut load: i64 = 0;
    let mut distance: Cost = 0;
    let mut prev = depot;

    for &stop in stops {
        distance += instance.cost(prev, stop);
        load = (load + instance.node(stop).demand).max(0);
        if load > vehicle.capacity {
            return None;
        }
        if let Some(r) = instance.request_for(stop) {
            if stop == instance.request(r).pickup {
                open[r] = true;
            } else if open[r] {
                open[r] = false;
            } else {
                // Delivery reached before its pickup on this route.
                return None;
            }
        }
        prev = stop;
    }
    distance += instance.cost(prev, depot);

    if open.iter().any(|&pending| pending) {
        // A pickup on this route has no matching delivery after it.
        return None;
    }
    if distance > vehicle.max_route_distance {
        return None;
    }
    Some(distance)
}

/// Build the stop sequence obtained by inserting a request's pickup at
/// position `p` and its delivery at position `q` (`q > p`, indices into the
/// sequence after the pickup is in place).
pub fn with_insertion(
    stops: &[usize],
    pickup: usize,
    delivery: usize,
    p: usize,
    q: usize,
) -> Vec<usize> {
    debug_assert!(p < q && q <= stops.len() + 1);
    let mut candidate = Vec::with_capacity(stops.len() + 2);
    candidate.extend_from_slice(stops);
    candidate.insert(p, pickup);
    candidate.insert(q, delivery);
    candidate
}
