//! Travel-cost model: pairwise integer costs between nodes.

use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Travel cost between two nodes. Non-negative in any valid matrix; kept
/// signed so cost deltas can be computed without casts.
pub type Cost = i64;

/// Euclidean distance between two points, rounded half away from zero.
pub fn euclidean(a: (f64, f64), b: (f64, f64)) -> Cost {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt().round() as Cost
}

/// A dense square matrix of travel costs, stored row-major.
///
/// Computed once per instance and never recomputed during optimization. The
/// matrix may be asymmetric when supplied explicitly; the default Euclidean
/// matrix is symmetric by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostMatrix {
    size: usize,
    costs: Vec<Cost>,
}

impl CostMatrix {
    /// Build a symmetric Euclidean matrix from node coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut costs = vec![0; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let cost = euclidean(points[i], points[j]);
                costs[i * n + j] = cost;
                costs[j * n + i] = cost;
            }
        }

        CostMatrix { size: n, costs }
    }

    /// Build a matrix from explicit rows, e.g. asymmetric estimated travel
    /// times. Rejects non-square shapes, negative costs, and non-zero
    /// diagonals.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, SolverError> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(SolverError::malformed(format!(
                    "cost matrix row {} has length {}, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            for (j, &cost) in row.iter().enumerate() {
                if cost < 0 {
                    return Err(SolverError::malformed(format!(
                        "negative cost {} at ({}, {})",
                        cost, i, j
                    )));
                }
                if i == j && cost != 0 {
                    return Err(SolverError::malformed(format!(
                        "non-zero diagonal cost {} at node {}",
                        cost, i
                    )));
                }
                costs.push(cost);
            }
        }

        Ok(CostMatrix { size: n, costs })
    }

    /// Travel cost from one node to another.
    pub fn get(&self, from: usize, to: usize) -> Cost {
        self.costs[from * self.size + to]
    }

    /// Number of nodes covered by the matrix.
    pub fn len(&self) -> usize {
        self.size
    }

    /// True if the matrix covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
