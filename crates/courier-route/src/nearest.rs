//! The single closest pending stop, for "where do I go next?".

use courier_core::{Coordinate, DeliveryPoint};

use crate::optimizer::closest;

/// The unvisited point closest to `from`, with its distance in kilometres.
///
/// Visited points are skipped.  Ties go to the point listed first.  `None`
/// when nothing is pending.
pub fn nearest_unvisited(points: &[DeliveryPoint], from: Coordinate) -> Option<(&DeliveryPoint, f64)> {
    let pending: Vec<usize> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_pending())
        .map(|(i, _)| i)
        .collect();

    let (km, slot) = closest(points, &pending, from)?;
    Some((&points[pending[slot]], km))
}
