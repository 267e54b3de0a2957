//! Solves every group and stitches the results into one global tour.

use super::chain_by_nearest_centroid;
use crate::config::OptimizerConfig;
use crate::distance::{DistanceMatrix, DistanceMetric};
use crate::error::{Result, TourError};
use crate::models::{Coordinate, GlobalTour, GroupTour, Point, SolveStats};
use crate::partition::{Group, Partition, Partitioner};
use crate::solver;

/// Cluster-first tour builder.
///
/// For each group of a [`Partition`] it builds the group's distance matrix
/// once, lets the configured method request pick a solver, and maps the
/// local tour back to global indices. Groups are then visited in
/// nearest-centroid order and concatenated into a [`GlobalTour`].
///
/// # Examples
///
/// ```
/// use u_tour::assembly::TourAssembler;
/// use u_tour::config::OptimizerConfig;
/// use u_tour::distance::Metric;
/// use u_tour::models::Point;
/// use u_tour::partition::KMeans;
///
/// let points = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 0.0, 1.0),
///     Point::new("c", 1.0, 0.0),
///     Point::new("d", 40.0, 40.0),
///     Point::new("e", 41.0, 40.0),
/// ];
/// let assembler = TourAssembler::new(OptimizerConfig::new(Metric::Planar));
/// let tour = assembler.optimize(&points, &KMeans::default(), 2).unwrap();
///
/// assert_eq!(tour.len(), 5);
/// assert_eq!(tour.groups().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TourAssembler {
    config: OptimizerConfig,
}

impl TourAssembler {
    /// Creates an assembler with the given configuration.
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Partitions `points` into at most `k` groups and assembles the tour.
    pub fn optimize<P>(&self, points: &[Point], partitioner: &P, k: usize) -> Result<GlobalTour>
    where
        P: Partitioner + ?Sized,
    {
        if points.is_empty() {
            return Err(TourError::EmptyInput);
        }
        let partition = partitioner.partition(points, k)?;
        self.assemble(points, &partition)
    }

    /// Assembles a tour, visiting groups in nearest-centroid order.
    ///
    /// # Errors
    ///
    /// - [`TourError::EmptyInput`] if `points` is empty
    /// - [`TourError::NonFiniteCoordinate`] if a point has a NaN or infinite
    ///   coordinate
    /// - [`TourError::InvalidPartition`] if the partition does not cover
    ///   every point exactly once
    /// - [`TourError::InvalidConfig`] if the configuration is inconsistent
    /// - [`TourError::InputSizeExceeded`] if a forced exhaustive method hits
    ///   its hard limit
    pub fn assemble(&self, points: &[Point], partition: &Partition) -> Result<GlobalTour> {
        let centroids: Vec<Coordinate> = partition.groups().iter().map(Group::centroid).collect();
        let order = chain_by_nearest_centroid(&centroids);
        self.assemble_with_order(points, partition, &order)
    }

    /// Assembles a tour visiting groups in a caller-supplied order.
    ///
    /// `order` holds positions into `partition.groups()` and must be a
    /// permutation of them.
    pub fn assemble_with_order(
        &self,
        points: &[Point],
        partition: &Partition,
        order: &[usize],
    ) -> Result<GlobalTour> {
        self.config.validate()?;
        if points.is_empty() {
            return Err(TourError::EmptyInput);
        }
        check_coordinates(points)?;
        partition.validate(points.len())?;
        check_order(order, partition.len())?;

        let groups = partition
            .groups()
            .iter()
            .map(|g| self.solve_group(points, g))
            .collect::<Result<Vec<_>>>()?;

        let sequence: Vec<usize> = order
            .iter()
            .flat_map(|&g| groups[g].global_tour.iter().copied())
            .collect();

        let metric = &self.config.metric;
        let between =
            |a: usize, b: usize| metric.distance(points[a].coordinate(), points[b].coordinate());

        // Consecutive groups, wrapping from the last back to the first. A
        // single group contributes its own last-to-first closing edge.
        let inter_group_distance: f64 = (0..order.len())
            .filter_map(|i| {
                let from = groups[order[i]].last()?;
                let to = groups[order[(i + 1) % order.len()]].first()?;
                Some(between(from, to))
            })
            .sum();

        let route_length = match sequence.first() {
            Some(&first) => {
                let open: f64 = sequence.windows(2).map(|w| between(w[0], w[1])).sum();
                sequence.last().map_or(open, |&last| open + between(last, first))
            }
            None => 0.0,
        };

        let tour = GlobalTour::new(
            sequence,
            order.to_vec(),
            groups,
            inter_group_distance,
            route_length,
        );

        log::info!(
            "assembly.assemble: points={} groups={} total={:.4} intra={:.4} inter={:.4}",
            tour.len(),
            order.len(),
            tour.total_distance(),
            tour.intra_group_distance(),
            tour.inter_group_distance()
        );
        for warning in tour.warnings() {
            log::warn!("assembly.group: {warning}");
        }

        Ok(tour)
    }

    fn solve_group(&self, points: &[Point], group: &Group) -> Result<GroupTour> {
        let members = group.members().to_vec();

        let (local_tour, stats) = if members.len() == 1 {
            (vec![0], SolveStats::single_point(self.config.request))
        } else {
            let coords: Vec<Coordinate> =
                members.iter().map(|&i| points[i].coordinate()).collect();
            let dm = DistanceMatrix::from_coordinates(&coords, &self.config.metric);
            let solved = solver::solve(&dm, self.config.request, &self.config)?;
            (solved.tour, solved.stats)
        };

        let global_tour: Vec<usize> = local_tour.iter().map(|&l| members[l]).collect();
        log::debug!(
            "assembly.group: label={} size={} method={} length={:.4}",
            group.label(),
            members.len(),
            stats.method.map_or("single_point", |m| m.as_str()),
            stats.length
        );

        Ok(GroupTour {
            label: group.label(),
            centroid: group.centroid(),
            length: stats.length,
            members,
            local_tour,
            global_tour,
            stats,
        })
    }
}

/// Rejects NaN or infinite coordinates, which no solver can order.
fn check_coordinates(points: &[Point]) -> Result<()> {
    match points.iter().position(|p| !p.coordinate().is_finite()) {
        Some(index) => Err(TourError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

fn check_order(order: &[usize], groups: usize) -> Result<()> {
    if order.len() != groups {
        return Err(TourError::invalid_partition(format!(
            "group order lists {} groups, partition has {groups}",
            order.len()
        )));
    }
    let mut seen = vec![false; groups];
    for &g in order {
        match seen.get_mut(g) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                return Err(TourError::invalid_partition(format!(
                    "group order entry {g} is out of range or repeated"
                )))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Metric;
    use crate::partition::KMeans;
    use crate::solver::{Method, MethodRequest};

    fn planar() -> TourAssembler {
        TourAssembler::new(OptimizerConfig::new(Metric::Planar))
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(format!("p{i}"), x, y))
            .collect()
    }

    fn is_permutation(seq: &[usize], n: usize) -> bool {
        let mut sorted = seq.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    #[test]
    fn test_single_group_square() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let partition = Partition::from_labels(&points, &[0, 0, 0, 0]).expect("valid");
        let tour = planar().assemble(&points, &partition).expect("valid");

        assert_eq!(tour.sequence(), &[0, 1, 2, 3]);
        assert!((tour.intra_group_distance() - 4.0).abs() < 1e-10);
        // Closing edge from (0, 1) back to (0, 0).
        assert!((tour.inter_group_distance() - 1.0).abs() < 1e-10);
        assert!((tour.total_distance() - 5.0).abs() < 1e-10);
        assert!((tour.route_length() - 4.0).abs() < 1e-10);
        assert_eq!(tour.groups()[0].stats.method, Some(Method::Exact));
    }

    #[test]
    fn test_single_group_counts_closing_edge() {
        let points = pts(&[(0.0, 0.0), (0.0, 3.0), (4.0, 0.0)]);
        let partition = Partition::from_labels(&points, &[0, 0, 0]).expect("valid");
        let tour = planar().assemble(&points, &partition).expect("valid");

        assert_eq!(tour.sequence(), &[0, 1, 2]);
        assert!((tour.intra_group_distance() - 12.0).abs() < 1e-10);
        assert!((tour.inter_group_distance() - 4.0).abs() < 1e-10);
        assert!((tour.total_distance() - 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let mut coords: Vec<(f64, f64)> = (0..12).map(|i| (i as f64, 0.0)).collect();
        coords[5].0 = f64::NAN;
        let points = pts(&coords);
        let partition = Partition::from_labels(&points, &[0; 12]).expect("valid");
        let config = OptimizerConfig::new(Metric::Planar).with_request(Method::Pruned.into());

        let result = TourAssembler::new(config).assemble(&points, &partition);
        assert_eq!(result, Err(TourError::NonFiniteCoordinate { index: 5 }));

        let mut coords: Vec<(f64, f64)> = (0..3).map(|i| (i as f64, 0.0)).collect();
        coords[2].1 = f64::INFINITY;
        let points = pts(&coords);
        let partition = Partition::from_labels(&points, &[0, 1, 1]).expect("valid");
        assert_eq!(
            planar().assemble(&points, &partition),
            Err(TourError::NonFiniteCoordinate { index: 2 })
        );
    }

    #[test]
    fn test_two_clusters_breakdown() {
        let points = pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 1.0),
            (10.0, 1.0),
            (1.0, 0.0),
            (11.0, 0.0),
        ]);
        let partition = Partition::from_labels(&points, &[0, 1, 0, 1, 0, 1]).expect("valid");
        let tour = planar().assemble(&points, &partition).expect("valid");

        assert!(is_permutation(tour.sequence(), 6));
        assert_eq!(tour.group_order(), &[0, 1]);
        assert_eq!(&tour.sequence()[..3], tour.groups()[0].global_tour.as_slice());

        // Each group is a 1-1-√2 triangle.
        let triangle = 2.0 + 2f64.sqrt();
        assert!((tour.intra_group_distance() - 2.0 * triangle).abs() < 1e-9);

        let g0 = &tour.groups()[0];
        let g1 = &tour.groups()[1];
        let d = |a: usize, b: usize| {
            Metric::Planar.distance(points[a].coordinate(), points[b].coordinate())
        };
        let expected_inter = d(g0.last().unwrap(), g1.first().unwrap())
            + d(g1.last().unwrap(), g0.first().unwrap());
        assert!((tour.inter_group_distance() - expected_inter).abs() < 1e-9);
        assert!(
            (tour.total_distance() - tour.intra_group_distance() - tour.inter_group_distance()).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_single_point_groups() {
        let points = pts(&[(0.0, 0.0), (3.0, 4.0)]);
        let partition = Partition::from_labels(&points, &[0, 1]).expect("valid");
        let tour = planar().assemble(&points, &partition).expect("valid");

        assert_eq!(tour.sequence(), &[0, 1]);
        assert_eq!(tour.intra_group_distance(), 0.0);
        assert!((tour.inter_group_distance() - 10.0).abs() < 1e-10);
        assert_eq!(tour.method_usage().single_point, 2);
        for g in tour.groups() {
            assert!(g.stats.method.is_none());
            assert_eq!(g.local_tour, vec![0]);
        }
    }

    #[test]
    fn test_single_point_input() {
        let points = pts(&[(2.0, 2.0)]);
        let partition = Partition::from_labels(&points, &[0]).expect("valid");
        let tour = planar().assemble(&points, &partition).expect("valid");
        assert_eq!(tour.sequence(), &[0]);
        assert_eq!(tour.total_distance(), 0.0);
        assert_eq!(tour.route_length(), 0.0);
    }

    #[test]
    fn test_chaining_beats_label_order() {
        // Four groups on a line with centroids at x = 0, 20, 10, 30.
        let points = pts(&[
            (0.0, 0.0),
            (0.0, 1.0),
            (20.0, 0.0),
            (20.0, 1.0),
            (10.0, 0.0),
            (10.0, 1.0),
            (30.0, 0.0),
            (30.0, 1.0),
        ]);
        let partition =
            Partition::from_labels(&points, &[0, 0, 1, 1, 2, 2, 3, 3]).expect("valid");
        let assembler = planar();

        let chained = assembler.assemble(&points, &partition).expect("valid");
        assert_eq!(chained.group_order(), &[0, 2, 1, 3]);

        let by_label = assembler
            .assemble_with_order(&points, &partition, &[0, 1, 2, 3])
            .expect("valid");
        assert!(chained.inter_group_distance() < by_label.inter_group_distance());
        assert!(
            (chained.intra_group_distance() - by_label.intra_group_distance()).abs() < 1e-12
        );
    }

    #[test]
    fn test_local_to_global_mapping() {
        let points = pts(&[(5.0, 5.0), (0.0, 0.0), (5.0, 6.0), (0.0, 1.0), (6.0, 5.0)]);
        let partition = Partition::from_labels(&points, &[1, 0, 1, 0, 1]).expect("valid");
        let tour = planar().assemble(&points, &partition).expect("valid");

        for g in tour.groups() {
            let mapped: Vec<usize> = g.local_tour.iter().map(|&l| g.members[l]).collect();
            assert_eq!(mapped, g.global_tour);
        }
        assert!(is_permutation(tour.sequence(), 5));
    }

    #[test]
    fn test_forced_method_applies_to_every_group() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (9.0, 9.0), (9.0, 8.0)]);
        let partition = Partition::from_labels(&points, &[0, 0, 0, 1, 1]).expect("valid");
        let config = OptimizerConfig::new(Metric::Planar)
            .with_request(MethodRequest::Forced(Method::SpanningTree));
        let tour = TourAssembler::new(config)
            .assemble(&points, &partition)
            .expect("valid");
        assert_eq!(tour.method_usage().spanning_tree, 2);
        assert!(tour
            .groups()
            .iter()
            .all(|g| g.stats.requested == MethodRequest::Forced(Method::SpanningTree)));
    }

    #[test]
    fn test_errors() {
        let assembler = planar();
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        let empty = Partition::new(Vec::new());
        assert_eq!(assembler.assemble(&[], &empty), Err(TourError::EmptyInput));

        let partial = Partition::new(vec![Group::new(0, vec![0, 1], Coordinate::new(0.0, 0.0))]);
        assert!(matches!(
            assembler.assemble(&points, &partial),
            Err(TourError::InvalidPartition(_))
        ));

        let partition = Partition::from_labels(&points, &[0, 1, 1]).expect("valid");
        assert!(assembler
            .assemble_with_order(&points, &partition, &[0, 0])
            .is_err());
        assert!(assembler
            .assemble_with_order(&points, &partition, &[0])
            .is_err());
        assert!(assembler
            .assemble_with_order(&points, &partition, &[1, 2])
            .is_err());
    }

    #[test]
    fn test_hard_limit_propagates() {
        let points: Vec<Point> = (0..6).map(|i| Point::new("p", i as f64, 0.0)).collect();
        let partition = Partition::from_labels(&points, &[0; 6]).expect("valid");
        let config = OptimizerConfig::new(Metric::Planar)
            .with_thresholds(crate::solver::SelectionThresholds {
                exact_max: 4,
                pruned_max: 5,
            })
            .with_hard_limits(5, 5)
            .with_request(Method::Exact.into());
        let err = TourAssembler::new(config)
            .assemble(&points, &partition)
            .unwrap_err();
        assert!(matches!(err, TourError::InputSizeExceeded { size: 6, .. }));
    }

    #[test]
    fn test_optimize_with_kmeans() {
        let points = pts(&[
            (0.0, 0.0),
            (50.0, 50.0),
            (0.0, 1.0),
            (50.0, 51.0),
            (1.0, 0.0),
            (51.0, 50.0),
        ]);
        let tour = planar()
            .optimize(&points, &KMeans::default(), 2)
            .expect("valid");
        assert_eq!(tour.groups().len(), 2);
        assert!(is_permutation(tour.sequence(), 6));
        assert!(tour.total_distance() >= tour.route_length() - 1e-9);
    }
}
