//! Seeded k-means clustering.
//!
//! Coordinates are clustered as planar `(lat, lon)` pairs, which is adequate
//! for grouping nearby points even when tours are scored on the sphere.
//!
//! # Algorithm
//!
//! 1. Seed `k` centers with k-means++ (each new center drawn with
//!    probability proportional to squared distance from the nearest chosen
//!    center).
//! 2. Alternate assignment (nearest center, lowest index on ties) and
//!    update (member mean) until no center moves more than `tolerance` or
//!    `max_iterations` is reached.
//! 3. Repeat from fresh seeds `restarts` times and keep the run with the
//!    lowest inertia.
//!
//! # Reference
//!
//! Arthur, D. & Vassilvitskii, S. (2007). "k-means++: The Advantages of
//! Careful Seeding", *SODA '07*, 1027-1035.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Group, Partition, Partitioner};
use crate::error::{Result, TourError};
use crate::models::{Coordinate, Point};

/// Configuration for [`KMeans`].
///
/// # Examples
///
/// ```
/// use u_tour::partition::KMeansConfig;
///
/// let config = KMeansConfig::default().with_seed(7).with_restarts(3);
/// assert_eq!(config.seed, 7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Iteration cap per run.
    pub max_iterations: usize,
    /// Independent seeded runs; the best is kept.
    pub restarts: usize,
    /// Convergence threshold on the largest center movement.
    pub tolerance: f64,
    /// Random seed.
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            restarts: 10,
            tolerance: 1e-4,
            seed: 42,
        }
    }
}

impl KMeansConfig {
    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the number of restarts.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(TourError::invalid_config("max_iterations must be positive"));
        }
        if self.restarts == 0 {
            return Err(TourError::invalid_config("restarts must be positive"));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(TourError::invalid_config(
                "tolerance must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// k-means partitioner.
///
/// Deterministic for a fixed seed. Requests for more clusters than points
/// are clamped to the number of points, and clusters that end up empty are
/// dropped, so the result may hold fewer than `k` groups.
///
/// # Examples
///
/// ```
/// use u_tour::models::Point;
/// use u_tour::partition::{KMeans, Partitioner};
///
/// let points = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 0.0, 1.0),
///     Point::new("c", 50.0, 50.0),
///     Point::new("d", 50.0, 51.0),
/// ];
/// let partition = KMeans::default().partition(&points, 2).unwrap();
/// assert_eq!(partition.len(), 2);
/// assert!(partition.validate(points.len()).is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    /// Creates a partitioner with the given configuration.
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}

impl Partitioner for KMeans {
    fn partition(&self, points: &[Point], k: usize) -> Result<Partition> {
        self.config.validate()?;
        if points.is_empty() {
            return Err(TourError::EmptyInput);
        }
        if k == 0 {
            return Err(TourError::invalid_config("k must be positive"));
        }
        if let Some(index) = points.iter().position(|p| !p.coordinate().is_finite()) {
            return Err(TourError::NonFiniteCoordinate { index });
        }

        let coords: Vec<Coordinate> = points.iter().map(Point::coordinate).collect();
        let k = k.min(coords.len());
        let mut rng = u_numflow::random::create_rng(self.config.seed);

        let mut best: Option<(Vec<usize>, f64)> = None;
        for restart in 0..self.config.restarts {
            let centers = seed_centers(&coords, k, &mut rng);
            let (labels, inertia) = lloyd(&coords, centers, &self.config);
            log::debug!("kmeans.restart: restart={restart} k={k} inertia={inertia:.6}");
            if best.as_ref().map_or(true, |(_, b)| inertia < *b) {
                best = Some((labels, inertia));
            }
        }

        let (labels, inertia) = best.ok_or_else(|| TourError::invalid_config("no k-means run"))?;
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); k];
        for (index, &label) in labels.iter().enumerate() {
            members[label].push(index);
        }
        let groups: Vec<Group> = members
            .into_iter()
            .enumerate()
            .filter_map(|(label, m)| Group::from_members(label, m, points))
            .collect();

        log::info!(
            "kmeans.partition: points={} k={k} groups={} inertia={inertia:.6}",
            points.len(),
            groups.len()
        );
        Ok(Partition::new(groups).with_inertia(inertia))
    }
}

fn squared(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = a.lat() - b.lat();
    let dlon = a.lon() - b.lon();
    dlat * dlat + dlon * dlon
}

/// Index of the nearest center; ties go to the lowest index.
fn nearest_center(point: Coordinate, centers: &[Coordinate]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, &c) in centers.iter().enumerate() {
        let d = squared(point, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

/// k-means++ seeding.
fn seed_centers<R: Rng>(coords: &[Coordinate], k: usize, rng: &mut R) -> Vec<Coordinate> {
    let n = coords.len();
    let mut centers = Vec::with_capacity(k);
    centers.push(coords[rng.random_range(0..n as u64) as usize]);

    let mut nearest: Vec<f64> = coords.iter().map(|&c| squared(c, centers[0])).collect();
    while centers.len() < k {
        let total: f64 = nearest.iter().sum();
        let chosen = if total > 0.0 {
            let mut target = rng.random::<f64>() * total;
            let mut pick = n - 1;
            for (i, &d) in nearest.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                if target < d {
                    pick = i;
                    break;
                }
                target -= d;
            }
            pick
        } else {
            // All remaining points coincide with a center.
            rng.random_range(0..n as u64) as usize
        };

        let center = coords[chosen];
        centers.push(center);
        for (slot, &c) in nearest.iter_mut().zip(coords) {
            *slot = slot.min(squared(c, center));
        }
    }
    centers
}

/// Lloyd iterations; returns per-point labels and the final inertia.
fn lloyd(
    coords: &[Coordinate],
    mut centers: Vec<Coordinate>,
    config: &KMeansConfig,
) -> (Vec<usize>, f64) {
    let mut labels = vec![0usize; coords.len()];

    for _ in 0..config.max_iterations {
        for (label, &c) in labels.iter_mut().zip(coords) {
            *label = nearest_center(c, &centers).0;
        }

        let mut shift: f64 = 0.0;
        for (cluster, center) in centers.iter_mut().enumerate() {
            let members = labels
                .iter()
                .zip(coords)
                .filter(|&(&l, _)| l == cluster)
                .map(|(_, &c)| c);
            // Empty clusters keep their previous center.
            if let Some(mean) = Coordinate::mean(members) {
                shift = shift.max(squared(*center, mean).sqrt());
                *center = mean;
            }
        }
        if shift <= config.tolerance {
            break;
        }
    }

    let mut inertia = 0.0;
    for (label, &c) in labels.iter_mut().zip(coords) {
        let (nearest, d) = nearest_center(c, &centers);
        *label = nearest;
        inertia += d;
    }
    (labels, inertia)
}
