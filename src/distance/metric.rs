//! Distance metrics over latitude/longitude coordinates.

use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// Mean Earth radius in kilometres used by [`Haversine`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A symmetric, non-negative distance between two coordinates.
///
/// Every matrix, tour length and pruning bound in one computation goes
/// through the same metric.
pub trait DistanceMetric {
    /// Distance from `a` to `b`.
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64;
}

/// Euclidean norm of the raw `(lat, lon)` difference.
///
/// Not geographically accurate, but cheap and adequate for comparing
/// distances inside a small region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Planar;

impl DistanceMetric for Planar {
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let dlat = a.lat() - b.lat();
        let dlon = a.lon() - b.lon();
        (dlat * dlat + dlon * dlon).sqrt()
    }
}

/// Great-circle distance in kilometres.
///
/// # Examples
///
/// ```
/// use u_tour::distance::{DistanceMetric, Haversine};
/// use u_tour::models::Coordinate;
///
/// // One degree of longitude on the equator.
/// let d = Haversine.distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
/// assert!((d - 111.195).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let lat1 = a.lat().to_radians();
        let lat2 = b.lat().to_radians();
        let dlat = lat2 - lat1;
        let dlon = (b.lon() - a.lon()).to_radians();

        let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Rounding can push h slightly outside [0, 1] for (near-)antipodal points.
        let h = h.clamp(0.0, 1.0);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// Runtime choice of distance metric.
///
/// There is no default: callers pick the metric that matches their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// See [`Planar`].
    Planar,
    /// See [`Haversine`].
    Haversine,
}

impl DistanceMetric for Metric {
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        match self {
            Metric::Planar => Planar.distance(a, b),
            Metric::Haversine => Haversine.distance(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    #[test]
    fn test_planar_345() {
        assert!((Planar.distance(c(0.0, 0.0), c(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_planar_symmetric() {
        let a = c(1.5, -2.0);
        let b = c(-7.0, 3.25);
        assert_eq!(Planar.distance(a, b), Planar.distance(b, a));
    }

    #[test]
    fn test_haversine_zero() {
        let p = c(-12.05, -77.04);
        assert_eq!(Haversine.distance(p, p), 0.0);
    }

    #[test]
    fn test_haversine_quarter_meridian() {
        let d = Haversine.distance(c(0.0, 0.0), c(90.0, 0.0));
        assert!((d - EARTH_RADIUS_KM * PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_haversine_antipodal() {
        let d = Haversine.distance(c(0.0, 0.0), c(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - EARTH_RADIUS_KM * PI).abs() < 1e-6);
    }

    #[test]
    fn test_haversine_symmetric() {
        let lima = c(-12.0464, -77.0428);
        let cusco = c(-13.5320, -71.9675);
        let d1 = Haversine.distance(lima, cusco);
        let d2 = Haversine.distance(cusco, lima);
        assert!((d1 - d2).abs() < 1e-9);
        // Lima to Cusco is roughly 570 km as the crow flies.
        assert!(d1 > 550.0 && d1 < 590.0);
    }

    #[test]
    fn test_metric_dispatch() {
        let a = c(0.0, 0.0);
        let b = c(0.0, 1.0);
        assert_eq!(Metric::Planar.distance(a, b), Planar.distance(a, b));
        assert_eq!(Metric::Haversine.distance(a, b), Haversine.distance(a, b));
    }

    #[test]
    fn test_metric_serde_names() {
        assert_eq!(
            serde_json::to_string(&Metric::Haversine).expect("serializable"),
            r#""haversine""#
        );
    }
}
