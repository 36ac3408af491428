//! Tests for solution extraction.

use pd_routing::assignment::{arc_sum, RouteAssignment};
use pd_routing::instance::{DeliveryRequest, Instance, Node, NodeRole, Vehicle};
use pd_routing::solution::Solution;

fn create_test_instance() -> Instance {
    let nodes = vec![
        Node::new(0, 0.0, 0.0, 0, NodeRole::Depot),
        Node::new(1, 10.0, 0.0, 3, NodeRole::Pickup),
        Node::new(2, 20.0, 0.0, -3, NodeRole::Delivery),
        Node::new(3, 0.0, 10.0, 2, NodeRole::Pickup),
        Node::new(4, 0.0, 20.0, -2, NodeRole::Delivery),
    ];
    let requests = vec![DeliveryRequest::new(1, 2), DeliveryRequest::new(3, 4)];
    let vehicles = vec![Vehicle::new(0, 10, 1000), Vehicle::new(1, 10, 1000)];

    Instance::new(nodes, requests, vehicles, None).unwrap()
}

#[test]
fn test_extraction_reports_stops_and_signed_deltas() {
    let instance = create_test_instance();
    let mut assignment = RouteAssignment::new(&instance);
    let stops = vec![1, 2];
    let distance = arc_sum(&stops, &instance);
    assignment.set_route(0, stops, distance);
    let stops = vec![3, 4];
    let distance = arc_sum(&stops, &instance);
    assignment.set_route(1, stops, distance);

    let solution = Solution::extract(&assignment, &instance);

    assert_eq!(solution.routes.len(), 2);
    assert_eq!(solution.total_distance, 80);
    assert_eq!(solution.active_route_count(), 2);

    let route = &solution.routes[0];
    assert_eq!(route.vehicle_id, 0);
    assert_eq!(route.route_distance, 40);
    // Depot visits are omitted; load deltas keep the raw signed demand.
    assert_eq!(route.stops.len(), 2);
    assert_eq!(route.stops[0].node_index, 1);
    assert_eq!(route.stops[0].load_delta, 3);
    assert_eq!(route.stops[1].node_index, 2);
    assert_eq!(route.stops[1].load_delta, -3);
}

#[test]
fn test_extraction_keeps_idle_vehicles_as_empty_routes() {
    let instance = create_test_instance();
    let mut assignment = RouteAssignment::new(&instance);
    let stops = vec![1, 2, 3, 4];
    let distance = arc_sum(&stops, &instance);
    assignment.set_route(0, stops, distance);

    let solution = Solution::extract(&assignment, &instance);

    assert_eq!(solution.routes.len(), 2);
    assert_eq!(solution.active_route_count(), 1);
    assert!(solution.routes[1].stops.is_empty());
    assert_eq!(solution.routes[1].route_distance, 0);
}

#[test]
fn test_route_distance_equals_recomputed_arc_sum() {
    let instance = create_test_instance();
    let mut assignment = RouteAssignment::new(&instance);
    let stops = vec![1, 3, 2, 4];
    let distance = arc_sum(&stops, &instance);
    assignment.set_route(0, stops, distance);

    let solution = Solution::extract(&assignment, &instance);

    // Recompute each route's distance from scratch along the full
    // depot-to-depot path; it must equal the extracted value.
    for route in &solution.routes {
        let mut recomputed = 0;
        let mut prev = instance.depot();
        for stop in &route.stops {
            recomputed += instance.cost(prev, stop.node_index);
            prev = stop.node_index;
        }
        recomputed += instance.cost(prev, instance.depot());
        assert_eq!(route.route_distance, recomputed);
    }
    assert_eq!(
        solution.total_distance,
        solution.routes.iter().map(|r| r.route_distance).sum::<i64>()
    );
}
