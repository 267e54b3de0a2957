//! Exhaustive permutation search.
//!
//! # Algorithm
//!
//! Fix location 0 as the start (a closed tour's length does not depend on
//! where it starts), enumerate every ordering of the remaining `n - 1`
//! locations in lexicographic order, and keep the first ordering of minimal
//! closed length.
//!
//! # Complexity
//!
//! O(n · (n-1)!). Practical up to about ten locations.

use super::{Method, SolverOutput, TspSolver};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::SearchCounters;

/// Largest instance [`ExactSolver`] accepts by default.
///
/// A circuit breaker for explicit requests, not a practical ceiling:
/// automatic selection stops at 10 locations, and anything above that runs
/// with a warning. Past 20 locations (19! ≈ 1.2 × 10¹⁷ orderings) the
/// search is refused outright.
pub const EXACT_HARD_LIMIT: usize = 20;

/// Finds an optimal tour by trying every ordering.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceMatrix, Planar};
/// use u_tour::models::{Point, SearchCounters};
/// use u_tour::solver::{ExactSolver, TspSolver};
///
/// let points = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 0.0, 3.0),
///     Point::new("c", 4.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, &Planar);
/// let out = ExactSolver::new().solve(&dm).unwrap();
///
/// assert!((out.length - 12.0).abs() < 1e-10);
/// assert_eq!(out.counters, SearchCounters::Permutations { evaluated: 2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactSolver {
    max_size: usize,
}

impl ExactSolver {
    /// Creates a solver with the default hard limit.
    pub fn new() -> Self {
        Self {
            max_size: EXACT_HARD_LIMIT,
        }
    }

    /// Sets the largest instance this solver will attempt.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Largest instance this solver will attempt.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TspSolver for ExactSolver {
    fn method(&self) -> Method {
        Method::Exact
    }

    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverOutput> {
        let n = distances.size();
        if n == 0 {
            return Err(TourError::EmptyInput);
        }
        if n > self.max_size {
            return Err(TourError::InputSizeExceeded {
                method: Method::Exact,
                size: n,
                limit: self.max_size,
            });
        }

        let mut rest: Vec<usize> = (1..n).collect();
        let mut best_rest = rest.clone();
        let mut best_length = f64::INFINITY;
        let mut evaluated: u64 = 0;

        loop {
            let length = length_from_origin(distances, &rest);
            evaluated += 1;
            if length < best_length {
                best_length = length;
                best_rest.clone_from(&rest);
            }
            if !next_permutation(&mut rest) {
                break;
            }
        }

        if !best_length.is_finite() {
            return Err(TourError::NoTourFound(Method::Exact));
        }

        let mut tour = Vec::with_capacity(n);
        tour.push(0);
        tour.extend_from_slice(&best_rest);

        Ok(SolverOutput {
            tour,
            length: best_length,
            counters: SearchCounters::Permutations { evaluated },
        })
    }
}

/// Closed length of `0 → rest[0] → ... → rest[last] → 0`.
fn length_from_origin(distances: &DistanceMatrix, rest: &[usize]) -> f64 {
    match (rest.first(), rest.last()) {
        (Some(&first), Some(&last)) => {
            let inner: f64 = rest.windows(2).map(|w| distances.get(w[0], w[1])).sum();
            distances.get(0, first) + inner + distances.get(last, 0)
        }
        _ => 0.0,
    }
}

/// Rearranges `items` into the next lexicographic permutation.
///
/// Returns `false` (leaving `items` untouched) once the last permutation
/// has been reached.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}
