//! Problem instance: nodes, requests, fleet, limits, and the cost matrix,
//! validated once and frozen behind read-only accessors.

use serde::{Deserialize, Serialize};

use crate::cost::{Cost, CostMatrix};
use crate::error::SolverError;

/// The role a node plays in the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Depot,
    Pickup,
    Delivery,
}

/// A location in the problem: the depot, a pickup stop, or a delivery stop.
///
/// Demand is signed: positive load is taken on at a pickup, negative load is
/// dropped off at a delivery, and the depot carries zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub demand: i64,
    pub role: NodeRole,
}

impl Node {
    /// Create a new node.
    pub fn new(id: usize, x: f64, y: f64, demand: i64, role: NodeRole) -> Self {
        Node {
            id,
            x,
            y,
            demand,
            role,
        }
    }

    /// Coordinate pair of this node.
    pub fn coords(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// An ordered pickup/delivery pair. Both stops must end up on the same
/// vehicle route with the pickup visited strictly before the delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub pickup: usize,
    pub delivery: usize,
}

impl DeliveryRequest {
    pub fn new(pickup: usize, delivery: usize) -> Self {
        DeliveryRequest { pickup, delivery }
    }
}

/// A vehicle with a maximum cumulative load and a maximum route distance.
/// Every vehicle starts and ends at the depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: usize,
    pub capacity: i64,
    pub max_route_distance: Cost,
}

impl Vehicle {
    pub fn new(id: usize, capacity: i64, max_route_distance: Cost) -> Self {
        Vehicle {
            id,
            capacity,
            max_route_distance,
        }
    }
}

/// A validated, immutable routing problem. The optimizer only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    nodes: Vec<Node>,
    requests: Vec<DeliveryRequest>,
    vehicles: Vec<Vehicle>,
    matrix: CostMatrix,
    depot: usize,
    /// For each node, the request it belongs to (if any).
    request_of_node: Vec<Option<usize>>,
}

impl Instance {
    /// Validate and freeze a routing problem.
    ///
    /// When `matrix` is `None`, a symmetric Euclidean matrix is computed from
    /// the node coordinates. Fails with `MalformedInstance` on out-of-range or
    /// role-mismatched request indices, non-positive vehicle limits, a
    /// missing (or duplicated) depot, or a matrix of the wrong shape.
    pub fn new(
        nodes: Vec<Node>,
        requests: Vec<DeliveryRequest>,
        vehicles: Vec<Vehicle>,
        matrix: Option<CostMatrix>,
    ) -> Result<Self, SolverError> {
        let mut depot = None;
        for (i, node) in nodes.iter().enumerate() {
            if node.id != i {
                return Err(SolverError::malformed(format!(
                    "node at index {} carries id {}",
                    i, node.id
                )));
            }
            if node.role == NodeRole::Depot {
                if depot.is_some() {
                    return Err(SolverError::malformed("more than one depot node"));
                }
                depot = Some(i);
            }
        }
        let depot = depot.ok_or_else(|| SolverError::malformed("missing depot node"))?;

        let mut request_of_node = vec![None; nodes.len()];
        for (r, request) in requests.iter().enumerate() {
            for (index, expected) in [
                (request.pickup, NodeRole::Pickup),
                (request.delivery, NodeRole::Delivery),
            ] {
                let node = nodes.get(index).ok_or_else(|| {
                    SolverError::malformed(format!(
                        "request {} references node {} out of range",
                        r, index
                    ))
                })?;
                if node.role != expected {
                    return Err(SolverError::malformed(format!(
                        "request {} expects a {:?} node at index {}, found {:?}",
                        r, expected, index, node.role
                    )));
                }
                if request_of_node[index].is_some() {
                    return Err(SolverError::malformed(format!(
                        "node {} belongs to more than one request",
                        index
                    )));
                }
                request_of_node[index] = Some(r);
            }
            if request.pickup == request.delivery {
                return Err(SolverError::malformed(format!(
                    "request {} picks up and delivers at the same node {}",
                    r, request.pickup
                )));
            }
        }

        for vehicle in &vehicles {
            if vehicle.capacity <= 0 {
                return Err(SolverError::malformed(format!(
                    "vehicle {} has non-positive capacity {}",
                    vehicle.id, vehicle.capacity
                )));
            }
            if vehicle.max_route_distance <= 0 {
                return Err(SolverError::malformed(format!(
                    "vehicle {} has non-positive max route distance {}",
                    vehicle.id, vehicle.max_route_distance
                )));
            }
        }

        let matrix = match matrix {
            Some(matrix) => {
                if matrix.len() != nodes.len() {
                    return Err(SolverError::malformed(format!(
                        "cost matrix covers {} nodes, instance has {}",
                        matrix.len(),
                        nodes.len()
                    )));
                }
                matrix
            }
            None => {
                let points: Vec<(f64, f64)> = nodes.iter().map(Node::coords).collect();
                CostMatrix::from_points(&points)
            }
        };

        Ok(Instance {
            nodes,
            requests,
            vehicles,
            matrix,
            depot,
            request_of_node,
        })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn requests(&self) -> &[DeliveryRequest] {
        &self.requests
    }

    pub fn request(&self, index: usize) -> &DeliveryRequest {
        &self.requests[index]
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, index: usize) -> &Vehicle {
        &self.vehicles[index]
    }

    /// Index of the depot node.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Travel cost of the arc from one node to another.
    pub fn cost(&self, from: usize, to: usize) -> Cost {
        self.matrix.get(from, to)
    }

    /// The request a node belongs to, if it is a pickup or delivery stop of
    /// one.
    pub fn request_for(&self, node: usize) -> Option<usize> {
        self.request_of_node[node]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

/// One node of the external input schema: a coordinate pair with optional
/// role and demand metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInput {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub role: Option<NodeRole>,
    #[serde(default)]
    pub demand: Option<i64>,
}

/// The external input schema consumed from instance-generation collaborators.
///
/// Roles default to the depot at `depot_index`, pickup/delivery per request
/// membership otherwise; demands default to +1 / -1 / 0 by role. An explicit
/// `cost_matrix` (possibly asymmetric) overrides the Euclidean default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceInput {
    pub nodes: Vec<NodeInput>,
    pub requests: Vec<[usize; 2]>,
    pub vehicle_count: usize,
    pub capacities: Vec<i64>,
    pub max_route_distance: Cost,
    #[serde(default)]
    pub depot_index: usize,
    #[serde(default)]
    pub cost_matrix: Option<Vec<Vec<Cost>>>,
}

impl TryFrom<InstanceInput> for Instance {
    type Error = SolverError;

    fn try_from(input: InstanceInput) -> Result<Self, Self::Error> {
        if input.depot_index >= input.nodes.len() {
            return Err(SolverError::malformed(format!(
                "depot index {} out of range for {} nodes",
                input.depot_index,
                input.nodes.len()
            )));
        }
        if input.capacities.len() != input.vehicle_count {
            return Err(SolverError::malformed(format!(
                "{} capacities for {} vehicles",
                input.capacities.len(),
                input.vehicle_count
            )));
        }

        let mut inferred_roles = vec![None; input.nodes.len()];
        for request in &input.requests {
            let [pickup, delivery] = *request;
            if let Some(slot) = inferred_roles.get_mut(pickup) {
                *slot = Some(NodeRole::Pickup);
            }
            if let Some(slot) = inferred_roles.get_mut(delivery) {
                *slot = Some(NodeRole::Delivery);
            }
        }

        let nodes = input
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let role = if i == input.depot_index {
                    NodeRole::Depot
                } else {
                    node.role
                        .or(inferred_roles[i])
                        // Nodes referenced by no request take a neutral role.
                        .unwrap_or(NodeRole::Pickup)
                };
                let demand = node.demand.unwrap_or(match role {
                    NodeRole::Depot => 0,
                    NodeRole::Pickup => 1,
                    NodeRole::Delivery => -1,
                });
                Node::new(i, node.x, node.y, demand, role)
            })
            .collect();

        let requests = input
            .requests
            .iter()
            .map(|&[pickup, delivery]| DeliveryRequest::new(pickup, delivery))
            .collect();

        let vehicles = input
            .capacities
            .iter()
            .enumerate()
            .map(|(id, &capacity)| Vehicle::new(id, capacity, input.max_route_distance))
            .collect();

        let matrix = input.cost_matrix.map(CostMatrix::from_rows).transpose()?;

        Instance::new(nodes, requests, vehicles, matrix)
    }
}
