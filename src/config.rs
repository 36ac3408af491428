//! Configuration parameters for the routing optimizer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cost::Cost;

/// Solver settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Weight of the route-length spread (max minus min per-vehicle route
    /// distance) in the search objective. Zero optimizes raw distance only.
    pub span_coefficient: Cost,
    /// Maximum number of local-search passes.
    pub max_local_search_passes: u32,
    /// Optional wall-clock budget, checked between local-search passes.
    pub time_limit: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            span_coefficient: 0,
            max_local_search_passes: 64,
            time_limit: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the span penalty coefficient.
    pub fn with_span_coefficient(mut self, coefficient: Cost) -> Self {
        self.span_coefficient = coefficient;
        self
    }

    /// Set the local-search pass budget.
    pub fn with_max_local_search_passes(mut self, passes: u32) -> Self {
        self.max_local_search_passes = passes;
        self
    }

    /// Set the wall-clock time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }
}
