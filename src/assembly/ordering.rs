//! Group visit ordering.

use crate::distance::{DistanceMatrix, Planar};
use crate::models::Coordinate;

/// Orders groups by nearest-neighbor chaining over their centroids.
///
/// Starts at group 0 and repeatedly moves to the unvisited group whose
/// centroid is closest (planar distance between centroid coordinates,
/// lowest index on ties). Returns positions into `centroids`.
///
/// # Examples
///
/// ```
/// use u_tour::assembly::chain_by_nearest_centroid;
/// use u_tour::models::Coordinate;
///
/// let centroids = [
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(20.0, 0.0),
///     Coordinate::new(10.0, 0.0),
///     Coordinate::new(30.0, 0.0),
/// ];
/// assert_eq!(chain_by_nearest_centroid(&centroids), vec![0, 2, 1, 3]);
/// ```
pub fn chain_by_nearest_centroid(centroids: &[Coordinate]) -> Vec<usize> {
    if centroids.is_empty() {
        return Vec::new();
    }

    let dm = DistanceMatrix::from_coordinates(centroids, &Planar);
    let mut remaining: Vec<usize> = (1..centroids.len()).collect();
    let mut order = Vec::with_capacity(centroids.len());
    let mut current = 0;
    order.push(current);

    while let Some(next) = dm.nearest_neighbor(current, &remaining) {
        remaining.retain(|&g| g != next);
        order.push(next);
        current = next;
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single() {
        assert!(chain_by_nearest_centroid(&[]).is_empty());
        assert_eq!(chain_by_nearest_centroid(&[Coordinate::new(5.0, 5.0)]), vec![0]);
    }

    #[test]
    fn test_always_starts_at_zero() {
        let centroids = [
            Coordinate::new(100.0, 100.0),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
        ];
        assert_eq!(chain_by_nearest_centroid(&centroids), vec![0, 2, 1]);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let centroids = [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, -1.0),
        ];
        assert_eq!(chain_by_nearest_centroid(&centroids), vec![0, 1, 2]);
    }

    #[test]
    fn test_is_permutation() {
        let centroids: Vec<Coordinate> = (0..9)
            .map(|i| Coordinate::new((i * 7 % 5) as f64, (i * 3 % 4) as f64))
            .collect();
        let mut order = chain_by_nearest_centroid(&centroids);
        order.sort_unstable();
        assert_eq!(order, (0..9).collect::<Vec<_>>());
    }
}
