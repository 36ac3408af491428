//! End-to-end tests: generation, solving, invariants, and the state machine.

use std::time::Duration;

use pd_routing::config::Config;
use pd_routing::error::SolverError;
use pd_routing::generator::{generate, GeneratorConfig, OriginSpec};
use pd_routing::instance::{DeliveryRequest, Instance, Node, NodeRole, Vehicle};
use pd_routing::solution::Solution;
use pd_routing::{RoutePlanner, SolverState};

/// A seeded market instance. Max route distance is generous enough that any
/// single request fits an empty vehicle, so the instance is always solvable.
fn create_market_instance(seed: u64) -> Instance {
    generate(&GeneratorConfig {
        origins: vec![
            OriginSpec::new("Store 1", 3),
            OriginSpec::new("Store 2", 4),
            OriginSpec::new("Store 3", 3),
        ],
        max_route_distance: 1000,
        seed,
        ..GeneratorConfig::default()
    })
    .unwrap()
}

/// Assert the structural invariants every solved plan must satisfy.
fn assert_plan_invariants(solution: &Solution, instance: &Instance) {
    // Every request node appears in exactly one route, exactly once, with
    // the pickup strictly before the delivery on the same route.
    for request in instance.requests() {
        let mut seen = 0;
        for route in &solution.routes {
            let pickup = route
                .stops
                .iter()
                .position(|stop| stop.node_index == request.pickup);
            let delivery = route
                .stops
                .iter()
                .position(|stop| stop.node_index == request.delivery);
            match (pickup, delivery) {
                (Some(p), Some(q)) => {
                    assert!(p < q, "pickup after delivery");
                    seen += 1;
                }
                (None, None) => {}
                _ => panic!("request split across routes"),
            }
        }
        assert_eq!(seen, 1, "request routed {} times", seen);
    }

    for route in &solution.routes {
        let vehicle = instance.vehicle(route.vehicle_id);

        // Clamped cumulative load stays within [0, capacity].
        let mut load: i64 = 0;
        for stop in &route.stops {
            load = (load + stop.load_delta).max(0);
            assert!(load <= vehicle.capacity);
            assert!(load >= 0);
        }

        // Route distance obeys the vehicle limit and matches an arc-by-arc
        // recomputation.
        assert!(route.route_distance <= vehicle.max_route_distance);
        let mut recomputed = 0;
        let mut prev = instance.depot();
        for stop in &route.stops {
            recomputed += instance.cost(prev, stop.node_index);
            prev = stop.node_index;
        }
        recomputed += instance.cost(prev, instance.depot());
        assert_eq!(route.route_distance, recomputed);
    }
}

#[test]
fn test_generator_shape_matches_settings() {
    let instance = create_market_instance(123);

    // 10 deliveries over 3 stores: a node pair per delivery plus the depot.
    assert_eq!(instance.requests().len(), 10);
    assert_eq!(instance.num_nodes(), 21);
    assert_eq!(instance.vehicles().len(), 11);
    assert_eq!(instance.node(0).role, NodeRole::Depot);

    // Dummy depot: its arcs cost nothing in both directions.
    for node in 1..instance.num_nodes() {
        assert_eq!(instance.cost(0, node), 0);
        assert_eq!(instance.cost(node, 0), 0);
    }

    // Pickups carry +1, deliveries -1.
    for request in instance.requests() {
        assert_eq!(instance.node(request.pickup).demand, 1);
        assert_eq!(instance.node(request.delivery).demand, -1);
    }
}

#[test]
fn test_generator_is_deterministic_per_seed() {
    assert_eq!(create_market_instance(7), create_market_instance(7));
    assert_ne!(create_market_instance(7), create_market_instance(8));
}

#[test]
fn test_solve_upholds_all_invariants() {
    let instance = create_market_instance(123);
    let mut planner = RoutePlanner::new(instance, Config::new());

    assert_eq!(planner.state, SolverState::Unsolved);
    let solution = planner.solve().unwrap();
    assert_eq!(planner.state, SolverState::Solved);

    assert_plan_invariants(&solution, &planner.instance);
}

#[test]
fn test_repeated_solves_are_identical() {
    let solve = || {
        let mut planner = RoutePlanner::new(create_market_instance(123), Config::new());
        planner.solve().unwrap()
    };

    let first = solve();
    let second = solve();
    assert_eq!(first, second);
}

#[test]
fn test_span_penalty_spreads_work_across_vehicles() {
    let instance = create_market_instance(123);
    let mut plain = RoutePlanner::new(instance.clone(), Config::new());
    let consolidated = plain.solve().unwrap();

    let balanced_config = Config::new().with_span_coefficient(100);
    let mut balanced = RoutePlanner::new(instance, balanced_config);
    let spread = balanced.solve().unwrap();

    assert_plan_invariants(&spread, &balanced.instance);
    assert!(spread.active_route_count() >= consolidated.active_route_count());
}

#[test]
fn test_exhausted_budget_still_returns_a_valid_solution() {
    let instance = create_market_instance(123);
    let config = Config::new().with_time_limit(Duration::from_secs(0));
    let mut planner = RoutePlanner::new(instance, config);

    // The zero budget expires during construction; local search is skipped
    // and the constructed assignment is frozen as solved.
    let solution = planner.solve().unwrap();
    assert_eq!(planner.state, SolverState::Solved);
    assert_eq!(planner.local_search_passes, 0);
    assert_plan_invariants(&solution, &planner.instance);
}

#[test]
fn test_infeasible_instance_reports_terminal_state() {
    // One request whose demand can never fit the only vehicle.
    let nodes = vec![
        Node::new(0, 0.0, 0.0, 0, NodeRole::Depot),
        Node::new(1, 10.0, 0.0, 5, NodeRole::Pickup),
        Node::new(2, 20.0, 0.0, -5, NodeRole::Delivery),
    ];
    let requests = vec![DeliveryRequest::new(1, 2)];
    let vehicles = vec![Vehicle::new(0, 2, 1000)];
    let instance = Instance::new(nodes, requests, vehicles, None).unwrap();

    let mut planner = RoutePlanner::new(instance, Config::new());
    let result = planner.solve();

    assert_eq!(result, Err(SolverError::InfeasibleInstance { request: 0 }));
    assert_eq!(planner.state, SolverState::Infeasible);
}
