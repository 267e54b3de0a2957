//! Group tours and the stitched global tour.

use serde::{Deserialize, Serialize};

use super::{Coordinate, Point, SolveStats};
use crate::solver::Method;

/// The solved tour of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTour {
    /// Label the partitioner gave this group.
    pub label: usize,
    /// Global indices of the members, indexed by local index.
    pub members: Vec<usize>,
    /// Mean coordinate of the members.
    pub centroid: Coordinate,
    /// Visit order as local indices (a permutation of `0..members.len()`).
    pub local_tour: Vec<usize>,
    /// Visit order as global indices.
    pub global_tour: Vec<usize>,
    /// Closed length of this group's tour.
    pub length: f64,
    /// How the tour was computed.
    pub stats: SolveStats,
}

impl GroupTour {
    /// Global index of the first stop.
    pub fn first(&self) -> Option<usize> {
        self.global_tour.first().copied()
    }

    /// Global index of the last stop before the group is left.
    pub fn last(&self) -> Option<usize> {
        self.global_tour.last().copied()
    }

    /// Number of stops in this group.
    pub fn len(&self) -> usize {
        self.global_tour.len()
    }

    /// Returns `true` if the group has no stops.
    pub fn is_empty(&self) -> bool {
        self.global_tour.is_empty()
    }
}

/// How many groups each method solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodUsage {
    /// Groups solved by exhaustive search.
    pub exact: usize,
    /// Groups solved by branch-and-bound.
    pub pruned: usize,
    /// Groups solved by the nearest-neighbor heuristic.
    pub nearest_neighbor: usize,
    /// Groups solved by the spanning-tree walk.
    pub spanning_tree: usize,
    /// One-point groups, which skip the solver entirely.
    pub single_point: usize,
}

impl MethodUsage {
    fn record(&mut self, method: Option<Method>) {
        match method {
            Some(Method::Exact) => self.exact += 1,
            Some(Method::Pruned) => self.pruned += 1,
            Some(Method::NearestNeighbor) => self.nearest_neighbor += 1,
            Some(Method::SpanningTree) => self.spanning_tree += 1,
            None => self.single_point += 1,
        }
    }
}

/// A closed tour over all points, built from per-group tours.
///
/// `sequence` visits groups in `group_order`; inside each group it follows
/// that group's own tour. The distance breakdown follows the cluster-first
/// convention: every group contributes its closed tour length, and the
/// transitions between consecutive groups (plus the edge closing the global
/// loop) are counted separately.
///
/// # Examples
///
/// ```
/// use u_tour::assembly::TourAssembler;
/// use u_tour::config::OptimizerConfig;
/// use u_tour::distance::Metric;
/// use u_tour::models::Point;
/// use u_tour::partition::Partition;
///
/// let points = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 0.0, 1.0),
///     Point::new("c", 10.0, 0.0),
/// ];
/// let partition = Partition::from_labels(&points, &[0, 0, 1]).unwrap();
/// let assembler = TourAssembler::new(OptimizerConfig::new(Metric::Planar));
/// let tour = assembler.assemble(&points, &partition).unwrap();
///
/// assert_eq!(tour.len(), 3);
/// let sum = tour.intra_group_distance() + tour.inter_group_distance();
/// assert!((tour.total_distance() - sum).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalTour {
    sequence: Vec<usize>,
    group_order: Vec<usize>,
    groups: Vec<GroupTour>,
    intra_group_distance: f64,
    inter_group_distance: f64,
    route_length: f64,
}

impl GlobalTour {
    pub(crate) fn new(
        sequence: Vec<usize>,
        group_order: Vec<usize>,
        groups: Vec<GroupTour>,
        inter_group_distance: f64,
        route_length: f64,
    ) -> Self {
        let intra_group_distance = groups.iter().map(|g| g.length).sum();
        Self {
            sequence,
            group_order,
            groups,
            intra_group_distance,
            inter_group_distance,
            route_length,
        }
    }

    /// Global point indices in visit order.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Positions into [`groups`](Self::groups) in visit order.
    pub fn group_order(&self) -> &[usize] {
        &self.group_order
    }

    /// Per-group results, in partition order.
    pub fn groups(&self) -> &[GroupTour] {
        &self.groups
    }

    /// Number of points visited.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the tour visits nothing.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Intra-group subtotal plus inter-group subtotal.
    pub fn total_distance(&self) -> f64 {
        self.intra_group_distance + self.inter_group_distance
    }

    /// Sum of every group's closed tour length.
    pub fn intra_group_distance(&self) -> f64 {
        self.intra_group_distance
    }

    /// Transitions between consecutive groups plus the closing edge.
    pub fn inter_group_distance(&self) -> f64 {
        self.inter_group_distance
    }

    /// Closed length of `sequence` walked as a single route.
    ///
    /// Differs from [`total_distance`](Self::total_distance) because the
    /// walk leaves each group from its last stop instead of first returning
    /// to the group's start.
    pub fn route_length(&self) -> f64 {
        self.route_length
    }

    /// Counts of groups per executed method.
    pub fn method_usage(&self) -> MethodUsage {
        let mut usage = MethodUsage::default();
        for group in &self.groups {
            usage.record(group.stats.method);
        }
        usage
    }

    /// Warnings raised while solving, in partition order.
    pub fn warnings(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter_map(|g| g.stats.warning.as_deref())
            .collect()
    }

    /// The given points reordered into visit order.
    ///
    /// `points` must be the slice the tour was assembled from.
    pub fn ordered_points<'a>(&self, points: &'a [Point]) -> Vec<&'a Point> {
        self.sequence.iter().map(|&i| &points[i]).collect()
    }

    /// Point names in visit order.
    pub fn ordered_names<'a>(&self, points: &'a [Point]) -> Vec<&'a str> {
        self.sequence.iter().map(|&i| points[i].name()).collect()
    }
}
