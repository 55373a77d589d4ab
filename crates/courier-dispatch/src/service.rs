//! The route service.
//!
//! # Filtering
//!
//! The planner only ever sees pending points: [`RouteService::optimize`]
//! drops visited ones before planning and appends them, in store order,
//! after the planned stops.  [`RouteService::optimize_points`] plans
//! exactly what it is given.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use courier_core::{Coordinate, DeliveryPoint, PointId};
use courier_route::{nearest_unvisited, route_length_km, NearestNeighbor, RoutePlanner, RouteSummary, Start};
use courier_store::PointStore;

use crate::{DispatchError, DispatchResult};

// ── OptimizedRoute ────────────────────────────────────────────────────────────

/// Result of an optimize call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedRoute {
    /// Planned stops in visiting order, followed by any already-visited
    /// points in store order.
    pub points:  Vec<DeliveryPoint>,
    /// Order and length of the planned stops only.
    pub summary: RouteSummary,
}

// ── RouteService ──────────────────────────────────────────────────────────────

/// Courier operations over a point store.
///
/// ```rust,ignore
/// let mut svc = RouteService::new(CsvStore::new("route.csv"));
/// let route = svc.optimize(Some(gps_fix))?;
/// println!("{}", route.summary);
/// svc.confirm(route.summary.order[0].as_str())?;
/// ```
pub struct RouteService<S: PointStore, P: RoutePlanner = NearestNeighbor> {
    store:   S,
    planner: P,
}

impl<S: PointStore> RouteService<S> {
    /// Service with the default nearest-neighbor planner.
    pub fn new(store: S) -> Self {
        Self::with_planner(store, NearestNeighbor)
    }
}

impl<S: PointStore, P: RoutePlanner> RouteService<S, P> {
    pub fn with_planner(store: S, planner: P) -> Self {
        Self { store, planner }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Every point, visited or not, in store order.
    pub fn points(&self) -> DispatchResult<Vec<DeliveryPoint>> {
        Ok(self.store.list()?)
    }

    /// Plan the pending points.
    ///
    /// `start` is the courier's position when known; without it the first
    /// pending point in store order seeds the tour.  Fails with `NoPoints` on
    /// an empty store and `AllVisited` when nothing is left to deliver.
    pub fn optimize(&self, start: Option<Coordinate>) -> DispatchResult<OptimizedRoute> {
        let start = checked_start(start)?;
        let points = self.store.list()?;
        if points.is_empty() {
            return Err(DispatchError::NoPoints);
        }
        let (pending, visited): (Vec<_>, Vec<_>) =
            points.into_iter().partition(DeliveryPoint::is_pending);

        if pending.is_empty() {
            return Err(DispatchError::AllVisited);
        }

        let mut route = self.plan(&pending, start);
        route.points.extend(visited);
        info!(summary = %route.summary, "route optimized");
        Ok(route)
    }

    /// Plan exactly the given points, visited flags ignored.
    ///
    /// An empty slice gives an empty route.
    pub fn optimize_points(
        &self,
        points: &[DeliveryPoint],
        start: Option<Coordinate>,
    ) -> DispatchResult<OptimizedRoute> {
        let start = checked_start(start)?;
        Ok(self.plan(points, start))
    }

    /// Closest pending point to `from`, with its distance in kilometres.
    pub fn nearest(&self, from: Coordinate) -> DispatchResult<(DeliveryPoint, f64)> {
        if !from.is_finite() {
            return Err(DispatchError::InvalidArgument(format!("non-finite position {from}")));
        }
        let points = self.store.list()?;
        if points.is_empty() {
            return Err(DispatchError::NoPoints);
        }
        nearest_unvisited(&points, from)
            .map(|(p, km)| (p.clone(), km))
            .ok_or(DispatchError::AllVisited)
    }

    /// Length of the pending points in store order, unrounded.
    ///
    /// This is the route as currently listed, not a planned one.
    pub fn remaining_length_km(&self) -> DispatchResult<f64> {
        Ok(route_length_km(&self.store.pending()?))
    }

    /// Confirm delivery of `id` now.
    pub fn confirm(&mut self, id: &str) -> DispatchResult<()> {
        self.confirm_at(id, Utc::now())
    }

    /// Confirm delivery of `id` at a given time.
    pub fn confirm_at(&mut self, id: &str, at: DateTime<Utc>) -> DispatchResult<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DispatchError::InvalidArgument("missing point id".into()));
        }
        self.store.confirm(&PointId::from(id), at)?;
        Ok(())
    }

    fn plan(&self, points: &[DeliveryPoint], start: Start) -> OptimizedRoute {
        let tour = self.planner.plan(points, start);
        let summary = RouteSummary::from_tour(&tour);
        debug!(stops = summary.stops(), length_km = summary.length_km, "planned");
        OptimizedRoute {
            points: tour.into_iter().cloned().collect(),
            summary,
        }
    }
}

fn checked_start(start: Option<Coordinate>) -> DispatchResult<Start> {
    match start {
        Some(c) if !c.is_finite() => {
            Err(DispatchError::InvalidArgument(format!("non-finite start {c}")))
        }
        other => Ok(Start::from(other)),
    }
}
