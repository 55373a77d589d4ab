//! Route length over an already-ordered sequence of stops.
//!
//! Lengths are carried at full precision.  [`round_km`] is the only place a
//! length is rounded, and only for display.

use courier_core::{distance_km, Locate};

/// Sum of great-circle legs between consecutive stops, in kilometres.
///
/// `0.0` for fewer than two stops.  A `NaN` leg makes the total `NaN`.
pub fn route_length_km<P: Locate>(ordered: &[P]) -> f64 {
    ordered
        .windows(2)
        .fold(0.0, |total, leg| total + distance_km(&leg[0], &leg[1]))
}

/// Round a length to one decimal place for display (`222.39` → `222.4`).
#[inline]
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
