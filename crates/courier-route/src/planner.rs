//! Planning trait and default nearest-neighbor implementation.
//!
//! # Pluggability
//!
//! `courier-dispatch` calls planning through the [`RoutePlanner`] trait, so
//! applications can swap in a different tour heuristic (2-opt refinement,
//! an external solver) without touching the service.  The default
//! [`NearestNeighbor`] is the greedy heuristic from [`crate::optimizer`].

use std::fmt;

use courier_core::{DeliveryPoint, PointId};
use tracing::debug;

use crate::length::{route_length_km, round_km};
use crate::optimizer::{nearest_neighbor_tour, Start};

// ── RouteSummary ──────────────────────────────────────────────────────────────

/// Visiting order plus its total length.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSummary {
    pub order:     Vec<PointId>,
    /// Unrounded; use [`RouteSummary::display_length_km`] for output.
    pub length_km: f64,
}

impl RouteSummary {
    /// Summarize an already-ordered tour.
    pub fn from_tour(tour: &[&DeliveryPoint]) -> Self {
        Self {
            order:     tour.iter().map(|p| p.id.clone()).collect(),
            length_km: route_length_km(tour),
        }
    }

    pub fn stops(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Length rounded to one decimal place.
    pub fn display_length_km(&self) -> f64 {
        round_km(self.length_km)
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stops, {:.1} km", self.stops(), self.display_length_km())
    }
}

// ── RoutePlanner trait ────────────────────────────────────────────────────────

/// Pluggable tour construction.
///
/// Implementations must be `Send + Sync` so a single planner can be shared
/// by every request a service handles.
pub trait RoutePlanner: Send + Sync {
    /// Order `points` for visiting, starting from `start`.
    ///
    /// Must return every input point exactly once.
    fn plan<'a>(&self, points: &'a [DeliveryPoint], start: Start) -> Vec<&'a DeliveryPoint>;

    /// Plan and summarize in one step.
    fn summarize(&self, points: &[DeliveryPoint], start: Start) -> RouteSummary {
        RouteSummary::from_tour(&self.plan(points, start))
    }
}

// ── NearestNeighbor ───────────────────────────────────────────────────────────

/// Greedy nearest-neighbor planner.  Deterministic; not optimal.
#[derive(Copy, Clone, Debug, Default)]
pub struct NearestNeighbor;

impl RoutePlanner for NearestNeighbor {
    fn plan<'a>(&self, points: &'a [DeliveryPoint], start: Start) -> Vec<&'a DeliveryPoint> {
        let tour = nearest_neighbor_tour(points, start);
        debug!(
            stops = tour.len(),
            ?start,
            length_km = route_length_km(&tour),
            "planned nearest-neighbor tour"
        );
        tour
    }
}
