//! Greedy nearest-neighbor tour construction.
//!
//! # Selection rule
//!
//! Starting from the resolved [`Start`] location, each step scans every
//! point not yet placed, picks the one closest to the current location, and
//! moves there.  The pool of remaining points keeps input order, so equal
//! distances resolve to the point listed first.
//!
//! With [`Start::FirstPoint`] the seed point stays in the pool and sits at
//! distance zero from itself, so it is always placed first regardless of
//! where the other points are.
//!
//! # Non-finite distances
//!
//! A `NaN` distance never beats a finite one.  If every remaining candidate
//! is at `NaN` distance (typically a `NaN` start), the first remaining point
//! is taken so the output is still a full permutation of the input.
//!
//! Cost is `O(n²)` distance evaluations for `n` points.

use courier_core::{Coordinate, DeliveryPoint, Locate, PointId};
use tracing::warn;

// ── Start ─────────────────────────────────────────────────────────────────────

/// Where the tour begins.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Start {
    /// Seed from the first input point (which is then visited first).
    #[default]
    FirstPoint,
    /// Seed from an explicit location, e.g. the courier's GPS fix.
    At(Coordinate),
}

impl Start {
    /// Resolve to a concrete coordinate.  `None` only for `FirstPoint` over
    /// an empty input.
    pub fn resolve<P: Locate>(self, points: &[P]) -> Option<Coordinate> {
        match self {
            Start::At(c) => Some(c),
            Start::FirstPoint => points.first().map(|p| p.coordinate()),
        }
    }
}

impl From<Option<Coordinate>> for Start {
    fn from(start: Option<Coordinate>) -> Self {
        start.map_or(Start::FirstPoint, Start::At)
    }
}

impl From<Coordinate> for Start {
    fn from(c: Coordinate) -> Self {
        Start::At(c)
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Visiting order as point ids.
///
/// Returns a permutation of the input ids; empty input gives an empty
/// order.
pub fn nearest_neighbor_order(points: &[DeliveryPoint], start: Start) -> Vec<PointId> {
    nearest_neighbor_indices(points, start)
        .into_iter()
        .map(|i| points[i].id.clone())
        .collect()
}

/// Visiting order as borrowed points.
pub fn nearest_neighbor_tour(points: &[DeliveryPoint], start: Start) -> Vec<&DeliveryPoint> {
    nearest_neighbor_indices(points, start)
        .into_iter()
        .map(|i| &points[i])
        .collect()
}

/// Visiting order as indices into `points`.
///
/// Works over anything [`Locate`], which is handy when the caller keeps its
/// own point type.
pub fn nearest_neighbor_indices<P: Locate + Sync>(points: &[P], start: Start) -> Vec<usize> {
    let Some(mut current) = start.resolve(points) else {
        return Vec::new();
    };

    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut order = Vec::with_capacity(points.len());

    while !remaining.is_empty() {
        let (best_km, slot) = closest(points, &remaining, current).unwrap_or((f64::NAN, 0));
        if best_km.is_nan() {
            warn!(from = %current, "all remaining candidates at NaN distance, taking first");
        }

        // Removal stays serialized: once per step, after the scan.
        let idx = remaining.remove(slot);
        order.push(idx);
        current = points[idx].coordinate();
    }

    order
}

// ── Candidate scan ────────────────────────────────────────────────────────────

/// Closest candidate to `from` as `(distance_km, slot in candidates)`.
///
/// `None` only when `candidates` is empty.
pub(crate) fn closest<P: Locate + Sync>(
    points: &[P],
    candidates: &[usize],
    from: Coordinate,
) -> Option<(f64, usize)> {
    let score = |(slot, &idx): (usize, &usize)| (from.distance_km(points[idx].coordinate()), slot);

    #[cfg(not(feature = "parallel"))]
    let best = candidates.iter().enumerate().map(score).reduce(prefer);

    #[cfg(feature = "parallel")]
    let best = {
        use rayon::prelude::*;

        candidates.par_iter().enumerate().map(score).reduce_with(prefer)
    };

    best
}

/// Pick the better of two scored candidates: smaller distance wins, `NaN`
/// loses to anything finite, and ties (including two `NaN`s) go to the lower
/// slot.  Order-independent, so sequential and Rayon reductions agree.
#[inline]
fn prefer(a: (f64, usize), b: (f64, usize)) -> (f64, usize) {
    let (lo, hi) = if a.1 <= b.1 { (a, b) } else { (b, a) };
    if hi.0 < lo.0 || (lo.0.is_nan() && !hi.0.is_nan()) { hi } else { lo }
}
