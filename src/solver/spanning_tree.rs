//! Minimum-spanning-tree tour construction.
//!
//! # Algorithm
//!
//! 1. Build a minimum spanning tree rooted at location 0 with Prim's
//!    algorithm over the dense matrix.
//! 2. Walk the tree depth-first from the root, recording each location the
//!    first time it is reached (preorder). Children are visited in the order
//!    they joined the tree.
//! 3. The preorder sequence, closed back to the root, is the tour.
//!
//! Under a metric satisfying the triangle inequality the tour is at most
//! twice the optimum.
//!
//! # Complexity
//!
//! O(n²) time, O(n) extra space. The walk uses an explicit stack.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An analysis of
//! several heuristics for the traveling salesman problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use super::{Method, SolverOutput, TspSolver};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TourError};
use crate::models::SearchCounters;

/// Tour from a preorder walk of a minimum spanning tree.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceMatrix, Planar};
/// use u_tour::models::Point;
/// use u_tour::solver::{SpanningTreeSolver, TspSolver};
///
/// let points: Vec<Point> = (0..4).map(|i| Point::new("p", i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points, &Planar);
/// let out = SpanningTreeSolver.solve(&dm).unwrap();
/// assert_eq!(out.tour, vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanningTreeSolver;

impl TspSolver for SpanningTreeSolver {
    fn method(&self) -> Method {
        Method::SpanningTree
    }

    fn solve(&self, distances: &DistanceMatrix) -> Result<SolverOutput> {
        let n = distances.size();
        if n == 0 {
            return Err(TourError::EmptyInput);
        }

        let children = minimum_spanning_tree(distances);
        let tour = preorder(&children);
        let length = distances.tour_length(&tour);

        Ok(SolverOutput {
            tour,
            length,
            counters: SearchCounters::None,
        })
    }
}

/// Prim's algorithm from root 0; returns tree adjacency lists.
///
/// Each node lists its parent first (except the root), then its children in
/// the order they were attached.
fn minimum_spanning_tree(distances: &DistanceMatrix) -> Vec<Vec<usize>> {
    let n = distances.size();
    let mut key = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut in_tree = vec![false; n];
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    key[0] = 0.0;

    for _ in 0..n {
        let mut next: Option<usize> = None;
        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            match next {
                Some(u) if key[v] >= key[u] => {}
                _ => next = Some(v),
            }
        }
        let Some(u) = next else { break };
        in_tree[u] = true;

        if let Some(p) = parent[u] {
            adjacency[u].push(p);
            adjacency[p].push(u);
        }

        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            let d = distances.get(u, v);
            if d < key[v] {
                key[v] = d;
                parent[v] = Some(u);
            }
        }
    }

    adjacency
}

/// Depth-first preorder from node 0 over `adjacency`.
fn preorder(adjacency: &[Vec<usize>]) -> Vec<usize> {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    // (node, index of the next neighbor to consider)
    let mut stack: Vec<(usize, usize)> = vec![(0, 0)];
    visited[0] = true;
    order.push(0);

    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        let pending = &adjacency[node][frame.1..];
        match pending.iter().position(|&v| !visited[v]) {
            Some(offset) => {
                let child = pending[offset];
                frame.1 += offset + 1;
                visited[child] = true;
                order.push(child);
                stack.push((child, 0));
            }
            None => {
                stack.pop();
            }
        }
    }

    order
}
