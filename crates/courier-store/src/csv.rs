//! CSV point files.
//!
//! # CSV format
//!
//! One row per delivery point, with a header row:
//!
//! ```csv
//! id,lat,lng,name,visited,info,confirmed_at
//! a1,52.2297,21.0122,Bakery,false,Back door,
//! a2,52.2400,21.0300,,true,,2024-05-01T08:15:00+00:00
//! a3,52.2100,20.9900,Pharmacy,,,
//! ```
//!
//! Only `id`, `lat`, and `lng` are required.  The other columns may be empty
//! or missing entirely.
//!
//! | Column         | Accepted values                                     |
//! |----------------|-----------------------------------------------------|
//! | `visited`      | `true`/`false`, `1`/`0`, `yes`/`no`, empty = `false` |
//! | `confirmed_at` | RFC 3339 timestamp, empty = none                    |
//!
//! Files are written back with all seven columns, header included even when
//! there are no points.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use courier_core::{Coordinate, DeliveryPoint, PointId};

use crate::store::{MemoryStore, PointStore};
use crate::{StoreError, StoreResult};

// ── CSV record ────────────────────────────────────────────────────────────────

const HEADER: [&str; 7] = ["id", "lat", "lng", "name", "visited", "info", "confirmed_at"];

#[derive(Deserialize, Serialize)]
struct PointRecord {
    id:           String,
    lat:          f64,
    lng:          f64,
    #[serde(default)]
    name:         Option<String>,
    #[serde(default)]
    visited:      Option<String>,
    #[serde(default)]
    info:         Option<String>,
    #[serde(default)]
    confirmed_at: Option<String>,
}

impl PointRecord {
    fn into_point(self) -> StoreResult<DeliveryPoint> {
        let visited = match self.visited.as_deref() {
            None => false,
            Some(v) => parse_visited(v)?,
        };
        let confirmed_at = self
            .confirmed_at
            .as_deref()
            .map(|s| parse_timestamp(&self.id, s))
            .transpose()?;

        Ok(DeliveryPoint {
            id: PointId(self.id),
            coord: Coordinate::new(self.lat, self.lng),
            name: self.name.filter(|s| !s.is_empty()),
            visited,
            info: self.info.filter(|s| !s.is_empty()),
            confirmed_at,
        })
    }

    fn from_point(p: &DeliveryPoint) -> Self {
        Self {
            id:           p.id.0.clone(),
            lat:          p.coord.lat,
            lng:          p.coord.lng,
            name:         p.name.clone(),
            visited:      Some(p.visited.to_string()),
            info:         p.info.clone(),
            confirmed_at: p.confirmed_at.map(|t| t.to_rfc3339()),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load points from a CSV file, in file order.
pub fn load_points_csv(path: &Path) -> StoreResult<Vec<DeliveryPoint>> {
    let file = File::open(path)?;
    let points = load_points_reader(file)?;
    debug!(path = %path.display(), count = points.len(), "loaded points");
    Ok(points)
}

/// Like [`load_points_csv`] but accepts any `Read` source.
pub fn load_points_reader<R: Read>(reader: R) -> StoreResult<Vec<DeliveryPoint>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<PointRecord>()
        .map(|row| {
            let row = row.map_err(|e| StoreError::Parse(e.to_string()))?;
            row.into_point()
        })
        .collect()
}

/// Write points to `path`, replacing it atomically.
///
/// Rows go to a sibling temporary file first, which is synced to disk and
/// then renamed over `path`, so a crash mid-write never leaves a truncated
/// point file.  The temporary file is removed if any step fails.
pub fn save_points_csv(path: &Path, points: &[DeliveryPoint]) -> StoreResult<()> {
    let tmp = tmp_path(path);
    if let Err(e) = write_and_replace(&tmp, path, points) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    debug!(path = %path.display(), count = points.len(), "saved points");
    Ok(())
}

fn write_and_replace(tmp: &Path, path: &Path, points: &[DeliveryPoint]) -> StoreResult<()> {
    let mut file = File::create(tmp)?;
    write_points(&mut file, points)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp, path)?;
    Ok(())
}

/// Write points as CSV (with header) to any `Write` sink.
pub fn write_points<W: Write>(writer: W, points: &[DeliveryPoint]) -> StoreResult<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for p in points {
        csv_writer.serialize(PointRecord::from_point(p))?;
    }
    csv_writer.flush()?;
    Ok(())
}

// ── CsvStore ──────────────────────────────────────────────────────────────────

/// A [`PointStore`] backed by a single CSV file.
///
/// Every call re-reads the file, so edits made by other tools between calls
/// are picked up.  `confirm` rewrites the whole file.
///
/// Only one writer at a time is supported.  Concurrent `confirm` calls from
/// separate processes never corrupt the file (each writes its own temporary
/// file), but they read-modify-write the same rows, so the last rename wins
/// and an earlier confirmation can be lost.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PointStore for CsvStore {
    fn list(&self) -> StoreResult<Vec<DeliveryPoint>> {
        load_points_csv(&self.path)
    }

    fn confirm(&mut self, id: &PointId, at: DateTime<Utc>) -> StoreResult<()> {
        let mut store = MemoryStore::new(load_points_csv(&self.path)?)?;
        store.confirm(id, at)?;
        save_points_csv(&self.path, store.points())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_visited(s: &str) -> StoreResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" => Ok(false),
        "true" | "1" | "yes" => Ok(true),
        other => Err(StoreError::Parse(format!(
            "invalid visited flag {other:?}: expected true/false, 1/0, or yes/no"
        ))),
    }
}

fn parse_timestamp(id: &str, s: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Parse(format!("point {id}: invalid confirmed_at {s:?}: {e}")))
}

/// `<name>.<pid>.tmp` beside `path`, so two processes never share one.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
