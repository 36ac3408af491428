//! Seeded synthetic instance generation.
//!
//! Models a market of origin stores, each requesting a number of deliveries
//! to random drop-off points on an integer grid. One pickup node is created
//! per delivery (co-located at the store) so several vehicles can service
//! the same store. The depot is a dummy: its arcs cost zero, letting routes
//! effectively start and end anywhere.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cost::{euclidean, Cost, CostMatrix};
use crate::error::SolverError;
use crate::instance::{DeliveryRequest, Instance, Node, NodeRole, Vehicle};

/// An origin store and how many deliveries it requests.
#[derive(Debug, Clone)]
pub struct OriginSpec {
    pub name: String,
    pub delivery_count: usize,
}

impl OriginSpec {
    pub fn new(name: impl Into<String>, delivery_count: usize) -> Self {
        OriginSpec {
            name: name.into(),
            delivery_count,
        }
    }
}

/// Settings for synthetic instance generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub origins: Vec<OriginSpec>,
    pub grid_min: i64,
    pub grid_max: i64,
    pub capacity: i64,
    pub max_route_distance: Cost,
    /// Fleet size; defaults to total deliveries + 1 so the fleet itself is
    /// never the binding constraint.
    pub vehicle_count: Option<usize>,
    pub seed: u64,
    /// Zero the depot's arcs so routes may start anywhere.
    pub dummy_depot: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            origins: vec![
                OriginSpec::new("Store 1", 3),
                OriginSpec::new("Store 2", 4),
                OriginSpec::new("Store 3", 3),
            ],
            grid_min: 0,
            grid_max: 100,
            capacity: 10,
            max_route_distance: 120,
            vehicle_count: None,
            seed: 123,
            dummy_depot: true,
        }
    }
}

/// Generate a validated instance from the settings. Deterministic for a
/// fixed seed.
pub fn generate(config: &GeneratorConfig) -> Result<Instance, SolverError> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let random_point = |rng: &mut ChaCha8Rng| {
        (
            rng.gen_range(config.grid_min..config.grid_max) as f64,
            rng.gen_range(config.grid_min..config.grid_max) as f64,
        )
    };

    let depot_point = random_point(&mut rng);
    let mut nodes = vec![Node::new(0, depot_point.0, depot_point.1, 0, NodeRole::Depot)];
    let mut requests = Vec::new();

    for origin in &config.origins {
        let origin_point = random_point(&mut rng);

        for _ in 0..origin.delivery_count {
            let pickup = nodes.len();
            nodes.push(Node::new(
                pickup,
                origin_point.0,
                origin_point.1,
                1,
                NodeRole::Pickup,
            ));

            let drop_point = random_point(&mut rng);
            let delivery = nodes.len();
            nodes.push(Node::new(
                delivery,
                drop_point.0,
                drop_point.1,
                -1,
                NodeRole::Delivery,
            ));

            requests.push(DeliveryRequest::new(pickup, delivery));
        }
    }

    let vehicle_count = config.vehicle_count.unwrap_or(requests.len() + 1);
    let vehicles = (0..vehicle_count)
        .map(|id| Vehicle::new(id, config.capacity, config.max_route_distance))
        .collect();

    let n = nodes.len();
    let mut rows = vec![vec![0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            if config.dummy_depot && i == 0 {
                continue;
            }
            let cost = euclidean(nodes[i].coords(), nodes[j].coords());
            rows[i][j] = cost;
            rows[j][i] = cost;
        }
    }
    let matrix = CostMatrix::from_rows(rows)?;

    Instance::new(nodes, requests, vehicles, Some(matrix))
}
