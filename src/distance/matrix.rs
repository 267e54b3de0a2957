//! Dense distance matrix.

use super::DistanceMetric;
use crate::models::{Coordinate, Point};

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per group of points and shared by the solver and by final
/// scoring, so the O(n²) distance evaluations happen exactly once.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceMatrix, Metric};
/// use u_tour::models::Point;
///
/// let points = vec![
///     Point::new("a", 0.0, 0.0),
///     Point::new("b", 3.0, 4.0),
///     Point::new("c", 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points, &Metric::Planar);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// assert!((dm.tour_length(&[0, 1, 2]) - 20.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes a symmetric matrix from coordinates under `metric`.
    ///
    /// Each unordered pair is evaluated once and mirrored; the diagonal
    /// stays zero.
    pub fn from_coordinates<M: DistanceMetric + ?Sized>(coords: &[Coordinate], metric: &M) -> Self {
        let n = coords.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = metric.distance(coords[i], coords[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Computes a symmetric matrix from point locations under `metric`.
    pub fn from_points<M: DistanceMetric + ?Sized>(points: &[Point], metric: &M) -> Self {
        let coords: Vec<Coordinate> = points.iter().map(Point::coordinate).collect();
        Self::from_coordinates(&coords, metric)
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix has no locations.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest of `candidates` to `from`.
    ///
    /// Ties go to the candidate listed first. Returns `None` if `candidates`
    /// is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((c, d)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Closed length of `tour`: consecutive edges plus the edge from the
    /// last stop back to the first.
    ///
    /// Empty and single-stop tours have length zero.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        match (tour.first(), tour.last()) {
            (Some(&first), Some(&last)) => {
                let open: f64 = tour.windows(2).map(|w| self.get(w[0], w[1])).sum();
                open + self.get(last, first)
            }
            _ => 0.0,
        }
    }
}
