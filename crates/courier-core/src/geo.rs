//! Geographic coordinate type and the great-circle distance metric.
//!
//! Coordinates are `f64` degrees.  No range validation is performed: values
//! outside `[-90, 90]` / `[-180, 180]` give a defined but meaningless
//! distance, and non-finite inputs yield `NaN`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Mean Earth radius used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A bare latitude/longitude pair, e.g. a courier's live GPS fix.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Identical coordinates give exactly `0.0`.  The haversine term is
    /// clamped into `[0, 1]` before `asin`, so antipodal pairs land on
    /// `π · R` instead of `NaN` when rounding pushes it past 1.  A `NaN`
    /// component passes through the clamp and comes out as `NaN`.
    pub fn distance_km(self, other: Coordinate) -> f64 {
        let d_lat = radians(other.lat - self.lat);
        let d_lng = radians(other.lng - self.lng);

        let sin_lat = (d_lat / 2.0).sin();
        let sin_lng = (d_lng / 2.0).sin();

        let h = sin_lat * sin_lat
            + radians(self.lat).cos() * radians(other.lat).cos() * sin_lng * sin_lng;

        2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
    }
}

#[inline]
fn radians(deg: f64) -> f64 {
    (deg * PI) / 180.0
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

impl FromStr for Coordinate {
    type Err = CoreError;

    /// Parse `"lat,lng"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| CoreError::Coordinate { input: s.to_owned(), reason };

        let (lat, lng) = s.split_once(',').ok_or_else(|| err("expected \"lat,lng\""))?;
        let lat = lat.trim().parse::<f64>().map_err(|_| err("latitude is not a number"))?;
        let lng = lng.trim().parse::<f64>().map_err(|_| err("longitude is not a number"))?;

        Ok(Coordinate::new(lat, lng))
    }
}

impl From<(f64, f64)> for Coordinate {
    #[inline]
    fn from((lat, lng): (f64, f64)) -> Self {
        Coordinate::new(lat, lng)
    }
}

// ── Locate ────────────────────────────────────────────────────────────────────

/// Anything with a position on the globe.
///
/// Lets the distance metric and the route engine accept full delivery
/// points and bare coordinates interchangeably.
pub trait Locate {
    fn coordinate(&self) -> Coordinate;
}

impl Locate for Coordinate {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl<T: Locate + ?Sized> Locate for &T {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}

/// Great-circle distance in kilometres between any two located values.
///
/// See [`Coordinate::distance_km`].
#[inline]
pub fn distance_km<A, B>(a: &A, b: &B) -> f64
where
    A: Locate + ?Sized,
    B: Locate + ?Sized,
{
    a.coordinate().distance_km(b.coordinate())
}
