//! Thin CLI driver: generate or load an instance, solve it, and print the
//! plan report as JSON on stdout.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use pd_routing::config::Config;
use pd_routing::evaluation;
use pd_routing::generator::{self, GeneratorConfig, OriginSpec};
use pd_routing::instance::{Instance, InstanceInput};
use pd_routing::solution::PlanReport;
use pd_routing::RoutePlanner;

#[derive(Parser, Debug)]
#[command(name = "plan_routes", about = "Plan pickup-and-delivery routes")]
struct Args {
    /// JSON instance file; omit to generate a synthetic market instead.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Seed for synthetic generation.
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Number of origin stores to generate.
    #[arg(long, default_value_t = 3)]
    stores: usize,

    /// Deliveries requested per generated store.
    #[arg(long, default_value_t = 3)]
    deliveries_per_store: usize,

    /// Vehicle capacity for generated instances.
    #[arg(long, default_value_t = 10)]
    capacity: i64,

    /// Maximum route distance for generated instances.
    #[arg(long, default_value_t = 120)]
    max_route_distance: i64,

    /// Span penalty coefficient (route-length balancing).
    #[arg(long, default_value_t = 100)]
    span_coefficient: i64,

    /// Wall-clock budget in seconds.
    #[arg(long)]
    time_limit_secs: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let instance = match &args.input {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            let input: InstanceInput = serde_json::from_reader(reader)?;
            Instance::try_from(input)?
        }
        None => {
            let origins = (0..args.stores)
                .map(|i| OriginSpec::new(format!("Store {}", i + 1), args.deliveries_per_store))
                .collect();
            generator::generate(&GeneratorConfig {
                origins,
                capacity: args.capacity,
                max_route_distance: args.max_route_distance,
                seed: args.seed,
                ..GeneratorConfig::default()
            })?
        }
    };

    let mut config = Config::new().with_span_coefficient(args.span_coefficient);
    if let Some(secs) = args.time_limit_secs {
        config = config.with_time_limit(Duration::from_secs(secs));
    }

    let mut planner = RoutePlanner::new(instance, config);
    let solution = planner.solve()?;
    let evaluation = evaluation::evaluate(&solution, &planner.instance)?;

    let report = PlanReport::new(solution, evaluation);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
