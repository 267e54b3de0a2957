//! Distance metrics and matrices.
//!
//! Provides the planar and great-circle metrics behind one
//! [`DistanceMetric`] trait, and a dense distance matrix built from any of
//! them.

mod matrix;
mod metric;

pub use matrix::DistanceMatrix;
pub use metric::{DistanceMetric, Haversine, Metric, Planar, EARTH_RADIUS_KM};
