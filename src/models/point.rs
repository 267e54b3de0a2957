//! Coordinate and point types.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in floating-point degrees.
///
/// # Examples
///
/// ```
/// use u_tour::models::Coordinate;
///
/// let c = Coordinate::new(-12.05, -77.04);
/// assert_eq!(c.lat(), -12.05);
/// assert_eq!(c.lon(), -77.04);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns `true` if neither component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Component-wise mean of the given coordinates.
    ///
    /// Returns `None` for an empty input.
    ///
    /// ```
    /// use u_tour::models::Coordinate;
    ///
    /// let mean = Coordinate::mean([Coordinate::new(0.0, 0.0), Coordinate::new(2.0, 4.0)]);
    /// assert_eq!(mean, Some(Coordinate::new(1.0, 2.0)));
    /// ```
    pub fn mean<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut count = 0usize;
        let (mut lat, mut lon) = (0.0, 0.0);
        for c in coords {
            lat += c.lat;
            lon += c.lon;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        Some(Self::new(lat / n, lon / n))
    }
}

/// A named stop to be visited by the tour.
///
/// Names are labels only; they need not be unique. Points are never
/// modified once built.
///
/// # Examples
///
/// ```
/// use u_tour::models::Point;
///
/// let p = Point::new("Lima", -12.05, -77.04);
/// assert_eq!(p.name(), "Lima");
/// assert_eq!(p.coordinate().lat(), -12.05);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    name: String,
    coordinate: Coordinate,
}

impl Point {
    /// Creates a point from a name and raw latitude/longitude.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            coordinate: Coordinate::new(lat, lon),
        }
    }

    /// Creates a point at an existing coordinate.
    pub fn at(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }

    /// Point label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of this point.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
