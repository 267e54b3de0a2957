//! Depth-first branch-and-bound.
//!
//! # Algorithm
//!
//! Grow a partial route from location 0, trying unvisited locations in
//! index order. Edge weights are non-negative, so a partial route whose
//! length already reaches the best complete tour can never improve on it:
//!
//! - on entering a node, a partial length `>= best` abandons the node;
//! - before descending, an extension whose length `>= best` is skipped.
//!
//! Both cuts are counted as prunes. A complete route is closed back to
//! location 0 and replaces the incumbent only when strictly shorter, so the
//! first optimal tour found is kept.
//!
//! # Complexity
//!
//! O(n!) worst case; pruning typically makes 12-15 locations practical.
//! Recursion depth is bounded by n.

use super::{Method, SolverOutput, TspSolver};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::SearchCounters;

/// Largest instance [`PrunedSolver`] accepts by default.
pub const PRUNED_HARD_LIMIT: usize = 24;

/// Finds an optimal tour by depth-first branch-and-bound.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceMatrix, Planar};
/// use u_tour::models::Point;
/// use u_tour::solver::{PrunedSolver, TspSolver};
///
/// let points = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 1.0, 0.0),
///     Point::new("c", 1.0, 1.0),
///     Point::new("d", 0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, &Planar);
/// let out = PrunedSolver::new().solve(&dm).unwrap();
/// assert!((out.length - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrunedSolver {
    max_size: usize,
}

impl PrunedSolver {
    /// Creates a solver with the default hard limit.
    pub fn new() -> Self {
        Self {
            max_size: PRUNED_HARD_LIMIT,
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

impl Default for PrunedSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TspSolver for PrunedSolver {
    fn method(&self) -> Method {
        Method::Pruned
    }

    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverOutput> {
        let n = distances.size();
        if n == 0 {
            return Err(TourError::EmptyInput);
        }
        if n > self.max_size {
            return Err(TourError::InputSizeExceeded {
                method: Method::Pruned,
                size: n,
                limit: self.max_size,
            });
        }

        let mut search = SearchContext::new(distances);
        search.descend(0.0);
        if search.best_route.len() != n {
            return Err(TourError::NoTourFound(Method::Pruned));
        }
        Ok(search.finish())
    }
}

/// Mutable state of one branch-and-bound run.
struct SearchContext<'a> {
    distances: &'a DistanceMatrix,
    route: Vec<usize>,
    visited: Vec<bool>,
    best_route: Vec<usize>,
    best_length: f64,
    nodes_explored: u64,
    prunes: u64,
}

impl<'a> SearchContext<'a> {
    fn new(distances: &'a DistanceMatrix) -> Self {
        let n = distances.size();
        let mut visited = vec![false; n];
        visited[0] = true;
        let mut route = Vec::with_capacity(n);
        route.push(0);
        Self {
            distances,
            route,
            visited,
            best_route: Vec::new(),
            best_length: f64::INFINITY,
            nodes_explored: 0,
            prunes: 0,
        }
    }

    /// A partial route of this length can still lead to a shorter tour.
    fn is_promising(&self, partial_length: f64) -> bool {
        partial_length < self.best_length
    }

    fn descend(&mut self, partial_length: f64) {
        self.nodes_explored += 1;
        if !self.is_promising(partial_length) {
            self.prunes += 1;
            return;
        }

        let n = self.distances.size();
        let last = match self.route.last() {
            Some(&last) => last,
            None => return,
        };

        if self.route.len() == n {
            let total = partial_length + self.distances.get(last, self.route[0]);
            if total < self.best_length {
                self.best_length = total;
                self.best_route.clone_from(&self.route);
            }
            return;
        }

        for next in 0..n {
            if self.visited[next] {
                continue;
            }
            let extended = partial_length + self.distances.get(last, next);
            if !self.is_promising(extended) {
                self.prunes += 1;
                continue;
            }
            self.visited[next] = true;
            self.route.push(next);
            self.descend(extended);
            self.route.pop();
            self.visited[next] = false;
        }
    }

    fn finish(self) -> SolverOutput {
        SolverOutput {
            tour: self.best_route,
            length: self.best_length,
            counters: SearchCounters::BranchAndBound {
                nodes_explored: self.nodes_explored,
                prunes: self.prunes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Planar;
    use crate::models::Point;
    use crate::solver::ExactSolver;

    fn scattered(n: usize) -> DistanceMatrix {
        // Deterministic, irregular layout.
        let points: Vec<Point> = (0..n)
            .map(|i| {
                let t = i as f64;
                Point::new(format!("p{i}"), (t * 7.3).sin() * 10.0, (t * 3.1).cos() * 10.0)
            })
            .collect();
        DistanceMatrix::from_points(&points, &Planar)
    }

    fn counters(out: &SolverOutput) -> (u64, u64) {
        match out.counters {
            SearchCounters::BranchAndBound {
                nodes_explored,
                prunes,
            } => (nodes_explored, prunes),
            other => panic!("unexpected counters {other:?}"),
        }
    }

    #[test]
    fn test_right_triangle() {
        let points = vec![
            Point::new("a", 0.0, 0.0),
            Point::new("b", 0.0, 3.0),
            Point::new("c", 4.0, 0.0),
        ];
        let dm = DistanceMatrix::from_points(&points, &Planar);
        let out = PrunedSolver::new().solve(&dm).expect("small instance");
        assert!((out.length - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_unit_square_first_found() {
        let points = vec![
            Point::new("a", 0.0, 0.0),
            Point::new("b", 1.0, 0.0),
            Point::new("c", 1.0, 1.0),
            Point::new("d", 0.0, 1.0),
        ];
        let dm = DistanceMatrix::from_points(&points, &Planar);
        let out = PrunedSolver::new().solve(&dm).expect("small instance");
        assert_eq!(out.tour, vec![0, 1, 2, 3]);
        assert!((out.length - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_matches_exact() {
        for n in 2..=8 {
            let dm = scattered(n);
            let exact = ExactSolver::new().solve(&dm).expect("exact");
            let pruned = PrunedSolver::new().solve(&dm).expect("pruned");
            assert!(
                (exact.length - pruned.length).abs() < 1e-9,
                "n={n}: exact {} vs pruned {}",
                exact.length,
                pruned.length
            );
            assert!((dm.tour_length(&pruned.tour) - pruned.length).abs() < 1e-9);
        }
    }

    #[test]
    fn test_prunes_on_larger_instance() {
        let dm = scattered(9);
        let out = PrunedSolver::new().solve(&dm).expect("pruned");
        let (nodes, prunes) = counters(&out);
        assert!(prunes > 0);
        // The full search tree over 9 locations has 1 + 8 + 8·7 + ... + 8! nodes.
        let mut full_tree: u64 = 1;
        let mut level: u64 = 1;
        for k in (1..=8).rev() {
            level *= k;
            full_tree += level;
        }
        assert!(nodes <= full_tree);
    }

    #[test]
    fn test_single_location() {
        let dm = DistanceMatrix::new(1);
        let out = PrunedSolver::new().solve(&dm).expect("one location");
        assert_eq!(out.tour, vec![0]);
        assert_eq!(out.length, 0.0);
        assert_eq!(counters(&out), (1, 0));
    }

    #[test]
    fn test_is_permutation() {
        let dm = scattered(7);
        let out = PrunedSolver::new().solve(&dm).expect("pruned");
        let mut sorted = out.tour.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..7).collect::<Vec<_>>());
        assert_eq!(out.tour[0], 0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            PrunedSolver::new().solve(&DistanceMatrix::new(0)),
            Err(TourError::EmptyInput)
        );
    }

    #[test]
    fn test_hard_limit() {
        let dm = DistanceMatrix::new(PRUNED_HARD_LIMIT + 1);
        assert!(matches!(
            PrunedSolver::new().solve(&dm),
            Err(TourError::InputSizeExceeded {
                method: Method::Pruned,
                ..
            })
        ));
    }

    #[test]
    fn test_nan_distance_yields_error() {
        let nan = f64::NAN;
        let dm = DistanceMatrix::from_data(3, vec![0.0, nan, 4.0, nan, 0.0, 5.0, 4.0, 5.0, 0.0])
            .expect("valid");
        assert_eq!(
            PrunedSolver::new().solve(&dm),
            Err(TourError::NoTourFound(Method::Pruned))
        );
    }
}
