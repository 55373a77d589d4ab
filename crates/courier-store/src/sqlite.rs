//! SQLite point store (feature `sqlite`).
//!
//! One table, `points`, with the same columns as the CSV format.  Listing
//! order is insertion order (`rowid`).  Timestamps are stored as RFC 3339
//! text.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::info;

use courier_core::{Coordinate, DeliveryPoint, PointId};

use crate::store::PointStore;
use crate::{StoreError, StoreResult};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS points (
        id           TEXT PRIMARY KEY,
        lat          REAL NOT NULL,
        lng          REAL NOT NULL,
        name         TEXT,
        visited      INTEGER NOT NULL DEFAULT 0,
        info         TEXT,
        confirmed_at TEXT
    );";

/// A [`PointStore`] backed by an SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;",
        )?;
        Self::with_connection(conn)
    }

    /// A private in-memory database.  Contents vanish on drop.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert points, replacing any existing row with the same id.
    pub fn upsert(&mut self, points: &[DeliveryPoint]) -> StoreResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO points (id, lat, lng, name, visited, info, confirmed_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
                 ON CONFLICT(id) DO UPDATE SET \
                 lat = excluded.lat, lng = excluded.lng, name = excluded.name, \
                 visited = excluded.visited, info = excluded.info, \
                 confirmed_at = excluded.confirmed_at",
            )?;
            for p in points {
                stmt.execute(params![
                    p.id.as_str(),
                    p.coord.lat,
                    p.coord.lng,
                    p.name,
                    p.visited as i64,
                    p.info,
                    p.confirmed_at.map(|t| t.to_rfc3339()),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl PointStore for SqliteStore {
    fn list(&self) -> StoreResult<Vec<DeliveryPoint>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, lat, lng, name, visited, info, confirmed_at \
             FROM points ORDER BY rowid",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, Option<String>>(6)?,
            ))
        })?;

        let mut points = Vec::new();
        for row in rows {
            let (id, lat, lng, name, visited, info, confirmed_at) = row?;
            let confirmed_at = confirmed_at
                .map(|s| {
                    DateTime::parse_from_rfc3339(&s)
                        .map(|t| t.with_timezone(&Utc))
                        .map_err(|e| StoreError::Parse(format!("point {id}: invalid confirmed_at {s:?}: {e}")))
                })
                .transpose()?;
            points.push(DeliveryPoint {
                id: PointId(id),
                coord: Coordinate::new(lat, lng),
                name,
                visited: visited != 0,
                info,
                confirmed_at,
            });
        }
        Ok(points)
    }

    fn confirm(&mut self, id: &PointId, at: DateTime<Utc>) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE points SET visited = 1, confirmed_at = COALESCE(confirmed_at, ?2) \
             WHERE id = ?1",
            params![id.as_str(), at.to_rfc3339()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        info!(%id, "delivery confirmed");
        Ok(())
    }
}
