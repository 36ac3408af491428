//! # pd-routing
//!
//! A pickup-and-delivery vehicle routing optimizer.
//!
//! A fleet of capacity- and distance-limited vehicles, all starting and
//! ending at a depot, must service pickup/delivery request pairs with each
//! pickup visited strictly before its delivery on the same route. The solver
//! builds an initial assignment by cheapest feasible insertion, then refines
//! it with deterministic first-improvement local search (request relocation
//! and route-internal segment reversal), and the result is compared against
//! a naive one-trip-per-request baseline.
//!
//! The whole pipeline is deterministic: the same instance always produces
//! the same assignment.

pub mod assignment;
pub mod config;
pub mod construction;
pub mod cost;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod instance;
pub mod local_search;
pub mod solution;

use std::time::{Duration, Instant};

use log::info;

use crate::assignment::RouteAssignment;
use crate::config::Config;
use crate::error::SolverError;
use crate::instance::Instance;
use crate::local_search::LocalSearch;
use crate::solution::Solution;

/// Optimizer lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    Unsolved,
    Constructing,
    LocalSearch,
    Solved,
    Infeasible,
}

/// The main solver structure: owns the instance and the working assignment
/// and drives the two optimization phases.
pub struct RoutePlanner {
    pub instance: Instance,
    pub config: Config,
    pub state: SolverState,
    pub assignment: RouteAssignment,
    pub run_time: Duration,
    pub local_search_passes: u32,
    start_time: Instant,
}

impl RoutePlanner {
    /// Create a new planner for the given instance and configuration.
    pub fn new(instance: Instance, config: Config) -> Self {
        let assignment = RouteAssignment::new(&instance);
        RoutePlanner {
            instance,
            config,
            state: SolverState::Unsolved,
            assignment,
            run_time: Duration::from_secs(0),
            local_search_passes: 0,
            start_time: Instant::now(),
        }
    }

    /// Run construction and local search to termination.
    ///
    /// Returns the frozen solution on success. Infeasibility is a terminal
    /// reported outcome: the state moves to `Infeasible` and no partial
    /// assignment is exposed. When the wall-clock budget expires during the
    /// run, the best feasible assignment found so far is frozen and returned
    /// as `Solved`.
    pub fn solve(&mut self) -> Result<Solution, SolverError> {
        self.start_time = Instant::now();
        let deadline = self.config.time_limit.map(|limit| self.start_time + limit);

        self.state = SolverState::Constructing;
        info!(
            "constructing routes for {} requests over {} vehicles",
            self.instance.requests().len(),
            self.instance.vehicles().len()
        );
        if let Err(error) = construction::construct(&mut self.assignment, &self.instance) {
            self.state = SolverState::Infeasible;
            self.run_time = self.start_time.elapsed();
            return Err(error);
        }

        self.state = SolverState::LocalSearch;
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            info!("time budget spent during construction, skipping local search");
        } else {
            let local_search = LocalSearch::new(self.config.max_local_search_passes);
            self.local_search_passes = local_search.improve(
                &mut self.assignment,
                &self.instance,
                self.config.span_coefficient,
                deadline,
            );
        }

        self.state = SolverState::Solved;
        self.run_time = self.start_time.elapsed();
        Ok(Solution::extract(&self.assignment, &self.instance))
    }
}
