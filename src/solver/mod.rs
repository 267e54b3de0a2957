//! Single-group TSP solvers and the method-selection policy.
//!
//! - [`ExactSolver`]: Exhaustive permutation search, O(n!)
//! - [`PrunedSolver`]: Depth-first branch-and-bound, O(n!) worst case
//! - [`NearestNeighborSolver`]: Greedy nearest unvisited neighbor, O(n²)
//! - [`SpanningTreeSolver`]: Preorder walk of a minimum spanning tree, O(n²)
//! - [`MethodSelector`]: Picks a method from problem size and request
//!
//! All solvers take a [`DistanceMatrix`] and return a closed tour over its
//! local indices.

mod dispatch;
mod exact;
mod nearest_neighbor;
mod pruned;
mod selector;
mod spanning_tree;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::SearchCounters;

pub use dispatch::{solve, SolvedTour};
pub use exact::{ExactSolver, EXACT_HARD_LIMIT};
pub use nearest_neighbor::NearestNeighborSolver;
pub use pruned::{PrunedSolver, PRUNED_HARD_LIMIT};
pub use selector::{
    MethodSelector, Selection, SelectionThresholds, EXACT_AUTO_LIMIT, PRUNED_AUTO_LIMIT,
};
pub use spanning_tree::SpanningTreeSolver;

/// A concrete TSP solving method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// [`ExactSolver`].
    Exact,
    /// [`PrunedSolver`].
    Pruned,
    /// [`NearestNeighborSolver`].
    NearestNeighbor,
    /// [`SpanningTreeSolver`].
    SpanningTree,
}

impl Method {
    /// Returns `true` for methods guaranteed to find an optimal tour.
    pub fn is_optimal(self) -> bool {
        matches!(self, Method::Exact | Method::Pruned)
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Exact => "exact",
            Method::Pruned => "pruned",
            Method::NearestNeighbor => "nearest_neighbor",
            Method::SpanningTree => "spanning_tree",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = TourError;

    /// Parses canonical names and the aliases callers commonly send.
    ///
    /// ```
    /// use u_tour::solver::Method;
    ///
    /// assert_eq!("brute_force".parse::<Method>().unwrap(), Method::Exact);
    /// assert_eq!("backtracking".parse::<Method>().unwrap(), Method::Pruned);
    /// assert!("simplex".parse::<Method>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "brute_force" | "bruteforce" => Ok(Method::Exact),
            "pruned" | "backtracking" | "branch_and_bound" => Ok(Method::Pruned),
            "nearest_neighbor" | "nearest_neighbour" | "heuristic" | "greedy" => {
                Ok(Method::NearestNeighbor)
            }
            "spanning_tree" | "mst" | "kruskal" | "prim" => Ok(Method::SpanningTree),
            _ => Err(TourError::UnknownMethod(s.to_string())),
        }
    }
}

/// What the caller asks for: let the selector decide, or force a method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodRequest {
    /// Choose by problem size (see [`SelectionThresholds`]).
    #[default]
    Automatic,
    /// Run this method regardless of size; oversized inputs get a warning.
    Forced(Method),
}

impl fmt::Display for MethodRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodRequest::Automatic => f.write_str("auto"),
            MethodRequest::Forced(method) => method.fmt(f),
        }
    }
}

impl FromStr for MethodRequest {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "automatic" => Ok(MethodRequest::Automatic),
            _ => s.parse().map(MethodRequest::Forced),
        }
    }
}

impl From<Method> for MethodRequest {
    fn from(method: Method) -> Self {
        MethodRequest::Forced(method)
    }
}

/// A closed tour over local indices, with its length and work counters.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutput {
    /// Visit order, a permutation of `0..n`.
    pub tour: Vec<usize>,
    /// Closed length of `tour`.
    pub length: f64,
    /// Work done to find it.
    pub counters: SearchCounters,
}

/// A TSP solver over a symmetric distance matrix.
pub trait TspSolver {
    /// The method this solver implements.
    fn method(&self) -> Method;

    /// Computes a closed tour over all locations of `distances`.
    ///
    /// # Errors
    ///
    /// [`TourError::EmptyInput`] for an empty matrix; solvers may add their
    /// own size or parameter checks.
    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverOutput>;
}
