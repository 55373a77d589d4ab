//! The `PointStore` trait and the in-memory backend.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use tracing::info;

use courier_core::{DeliveryPoint, PointId};

use crate::{StoreError, StoreResult};

// ── PointStore trait ──────────────────────────────────────────────────────────

/// Backend that lists delivery points and records confirmations.
///
/// `list` returns points in the store's own stable order; planners treat
/// that order as the tie-break order.
pub trait PointStore {
    /// All points, visited or not.
    fn list(&self) -> StoreResult<Vec<DeliveryPoint>>;

    /// Mark `id` delivered at `at`.
    ///
    /// Confirming an already-visited point succeeds and keeps the original
    /// timestamp.  Unknown ids are [`StoreError::NotFound`].
    fn confirm(&mut self, id: &PointId, at: DateTime<Utc>) -> StoreResult<()>;

    /// Points not yet delivered, in store order.
    fn pending(&self) -> StoreResult<Vec<DeliveryPoint>> {
        let mut points = self.list()?;
        points.retain(DeliveryPoint::is_pending);
        Ok(points)
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

/// Points held in a `Vec`, with an id → position index.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    points: Vec<DeliveryPoint>,
    index:  FxHashMap<PointId, usize>,
}

impl MemoryStore {
    /// Build a store, rejecting duplicate ids.
    pub fn new(points: Vec<DeliveryPoint>) -> StoreResult<Self> {
        let mut index = FxHashMap::default();
        index.reserve(points.len());
        for (i, p) in points.iter().enumerate() {
            if index.insert(p.id.clone(), i).is_some() {
                return Err(StoreError::DuplicateId(p.id.clone()));
            }
        }
        Ok(Self { points, index })
    }

    pub fn get(&self, id: &PointId) -> Option<&DeliveryPoint> {
        self.index.get(id).map(|&i| &self.points[i])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DeliveryPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<DeliveryPoint> {
        self.points
    }
}

impl PointStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<DeliveryPoint>> {
        Ok(self.points.clone())
    }

    fn confirm(&mut self, id: &PointId, at: DateTime<Utc>) -> StoreResult<()> {
        let &i = self
            .index
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.points[i].confirm(at);
        info!(%id, "delivery confirmed");
        Ok(())
    }
}
