//! Per-solve statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::solver::{Method, MethodRequest};

/// Work counters reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchCounters {
    /// Constructive solvers and single-point groups count nothing.
    #[default]
    None,
    /// Exhaustive enumeration.
    Permutations {
        /// Complete tours whose length was computed.
        evaluated: u64,
    },
    /// Depth-first branch-and-bound.
    BranchAndBound {
        /// Search nodes entered, including ones cut on entry.
        nodes_explored: u64,
        /// Branches abandoned because they could not beat the incumbent.
        prunes: u64,
    },
}

/// Statistics for one group's tour computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveStats {
    /// Solver that actually ran. `None` when the group held a single point
    /// and no solver was needed.
    pub method: Option<Method>,
    /// What the caller asked for.
    pub requested: MethodRequest,
    /// Number of points in the solved instance.
    pub points: usize,
    /// Closed tour length found.
    pub length: f64,
    /// Wall-clock time spent in the solver.
    pub elapsed: Duration,
    /// Solver-specific work counters.
    pub counters: SearchCounters,
    /// Set when an explicit request exceeds the method's recommended size.
    pub warning: Option<String>,
}

impl SolveStats {
    /// Stats for a one-point group, which needs no search.
    pub fn single_point(requested: MethodRequest) -> Self {
        Self {
            method: None,
            requested,
            points: 1,
            length: 0.0,
            elapsed: Duration::ZERO,
            counters: SearchCounters::None,
            warning: None,
        }
    }
}
