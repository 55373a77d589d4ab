//! Delivery points and their identifiers.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::geo::{Coordinate, Locate};

// ── PointId ───────────────────────────────────────────────────────────────────

/// Opaque, stable identifier of a delivery point.
///
/// Assigned by the storage layer and never reused for a different location.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PointId(pub String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for PointId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PointId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PointId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── DeliveryPoint ─────────────────────────────────────────────────────────────

/// One stop on a courier's route.
///
/// Only `id` and `coord` take part in any computation.  `name` and `info`
/// are display data; `visited` and `confirmed_at` are owned by the store
/// and merely carried here so callers can filter before planning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryPoint {
    pub id:           PointId,
    pub coord:        Coordinate,
    pub name:         Option<String>,
    pub visited:      bool,
    /// Free-text note for the courier (door code, floor, …).
    pub info:         Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl DeliveryPoint {
    /// An unvisited, unnamed point.
    pub fn new(id: impl Into<PointId>, lat: f64, lng: f64) -> Self {
        Self {
            id:           id.into(),
            coord:        Coordinate::new(lat, lng),
            name:         None,
            visited:      false,
            info:         None,
            confirmed_at: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn visited(mut self, visited: bool) -> Self {
        self.visited = visited;
        self
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.visited
    }

    /// Mark delivered.  A second confirmation keeps the first timestamp.
    pub fn confirm(&mut self, at: DateTime<Utc>) {
        self.visited = true;
        self.confirmed_at.get_or_insert(at);
    }

    /// `name` if set, otherwise the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(self.id.as_str())
    }
}

impl Locate for DeliveryPoint {
    #[inline]
    fn coordinate(&self) -> Coordinate {
        self.coord
    }
}
