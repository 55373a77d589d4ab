//! Unit tests for courier-store.

#[cfg(test)]
mod helpers {
    use chrono::{DateTime, TimeZone, Utc};

    use courier_core::DeliveryPoint;

    pub fn sample() -> Vec<DeliveryPoint> {
        vec![
            DeliveryPoint::new("a1", 52.2297, 21.0122).with_name("Bakery").with_info("Back door"),
            DeliveryPoint::new("a2", 52.2400, 21.0300),
            DeliveryPoint::new("a3", 52.2100, 20.9900).with_name("Pharmacy"),
        ]
    }

    pub fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }
}

// ── MemoryStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use courier_core::{DeliveryPoint, PointId};

    use super::helpers::{sample, t};
    use crate::{MemoryStore, PointStore, StoreError};

    #[test]
    fn list_keeps_order() {
        let store = MemoryStore::new(sample()).unwrap();
        let ids: Vec<_> = store.list().unwrap().into_iter().map(|p| p.id.0).collect();
        assert_eq!(ids, ["a1", "a2", "a3"]);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let pts = vec![DeliveryPoint::new("x", 0.0, 0.0), DeliveryPoint::new("x", 1.0, 1.0)];
        let err = MemoryStore::new(pts).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id.as_str() == "x"));
    }

    #[test]
    fn confirm_marks_visited() {
        let mut store = MemoryStore::new(sample()).unwrap();
        store.confirm(&PointId::from("a2"), t(8)).unwrap();

        let p = store.get(&PointId::from("a2")).unwrap();
        assert!(p.visited);
        assert_eq!(p.confirmed_at, Some(t(8)));

        let pending: Vec<_> = store.pending().unwrap().into_iter().map(|p| p.id.0).collect();
        assert_eq!(pending, ["a1", "a3"]);
    }

    #[test]
    fn confirm_twice_keeps_first_time() {
        let mut store = MemoryStore::new(sample()).unwrap();
        let id = PointId::from("a1");
        store.confirm(&id, t(8)).unwrap();
        store.confirm(&id, t(9)).unwrap();
        assert_eq!(store.get(&id).unwrap().confirmed_at, Some(t(8)));
    }

    #[test]
    fn confirm_unknown_id() {
        let mut store = MemoryStore::new(sample()).unwrap();
        let err = store.confirm(&PointId::from("nope"), t(8)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id.as_str() == "nope"));
    }

    #[test]
    fn empty_store() {
        let store = MemoryStore::default();
        assert!(store.is_empty());
        assert!(store.list().unwrap().is_empty());
        assert!(store.pending().unwrap().is_empty());
    }
}

// ── CSV ────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use courier_core::{Coordinate, PointId};

    use super::helpers::{sample, t};
    use crate::csv::tmp_path;
    use crate::{load_points_csv, load_points_reader, save_points_csv, write_points, CsvStore, PointStore, StoreError};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn load_full_format() {
        let data = "\
id,lat,lng,name,visited,info,confirmed_at
a1,52.2297,21.0122,Bakery,false,Back door,
a2,52.2400,21.0300,,true,,2024-05-01T08:00:00+00:00
a3,52.2100,20.9900,Pharmacy,,,
";
        let pts = load_points_reader(Cursor::new(data)).unwrap();
        assert_eq!(pts.len(), 3);

        assert_eq!(pts[0].id, PointId::from("a1"));
        assert_eq!(pts[0].coord, Coordinate::new(52.2297, 21.0122));
        assert_eq!(pts[0].name.as_deref(), Some("Bakery"));
        assert_eq!(pts[0].info.as_deref(), Some("Back door"));
        assert!(!pts[0].visited);

        assert_eq!(pts[1].name, None);
        assert!(pts[1].visited);
        assert_eq!(pts[1].confirmed_at, Some(t(8)));

        assert!(!pts[2].visited);
        assert_eq!(pts[2].confirmed_at, None);
    }

    #[test]
    fn load_minimal_columns() {
        let data = "id,lat,lng\nx,1.5,-2.5\ny,0,0\n";
        let pts = load_points_reader(Cursor::new(data)).unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].coord, Coordinate::new(1.5, -2.5));
        assert!(pts.iter().all(|p| p.is_pending() && p.name.is_none()));
    }

    #[test]
    fn visited_flag_spellings() {
        let data = "id,lat,lng,visited\na,0,0,1\nb,0,0,YES\nc,0,0,0\nd,0,0,no\n";
        let pts = load_points_reader(Cursor::new(data)).unwrap();
        let flags: Vec<bool> = pts.iter().map(|p| p.visited).collect();
        assert_eq!(flags, [true, true, false, false]);
    }

    #[test]
    fn bad_visited_flag() {
        let data = "id,lat,lng,visited\na,0,0,maybe\n";
        let err = load_points_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn bad_latitude() {
        let data = "id,lat,lng\na,north,0\n";
        let err = load_points_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn bad_timestamp() {
        let data = "id,lat,lng,visited,confirmed_at\na,0,0,true,yesterday\n";
        let err = load_points_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, StoreError::Parse(msg) if msg.contains("point a")));
    }

    #[test]
    fn write_has_header_even_when_empty() {
        let mut buf = Vec::new();
        write_points(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim_end(), "id,lat,lng,name,visited,info,confirmed_at");
    }

    #[test]
    fn save_then_load_preserves_points() {
        let dir = tmp();
        let path = dir.path().join("points.csv");
        let mut pts = sample();
        pts[1].confirm(t(10));

        save_points_csv(&path, &pts).unwrap();
        assert!(!tmp_path(&path).exists());
        assert_eq!(load_points_csv(&path).unwrap(), pts);
    }

    #[test]
    fn tmp_name_is_per_process() {
        let tmp = tmp_path(std::path::Path::new("/data/route.csv"));
        let expected = format!("route.csv.{}.tmp", std::process::id());
        assert_eq!(tmp.file_name().unwrap().to_str().unwrap(), expected);
        assert_eq!(tmp.parent(), Some(std::path::Path::new("/data")));
    }

    #[test]
    fn failed_save_removes_tmp_file() {
        // A non-empty directory at the target path makes the final rename fail.
        let dir = tmp();
        let path = dir.path().join("route.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        assert!(save_points_csv(&path, &sample()).is_err());
        assert!(!tmp_path(&path).exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tmp();
        let err = load_points_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }

    #[test]
    fn csv_store_confirm_persists() {
        let dir = tmp();
        let path = dir.path().join("route.csv");
        save_points_csv(&path, &sample()).unwrap();

        let mut store = CsvStore::new(&path);
        store.confirm(&PointId::from("a3"), t(12)).unwrap();

        let reopened = CsvStore::new(&path);
        let pts = reopened.list().unwrap();
        assert!(pts[2].visited);
        assert_eq!(pts[2].confirmed_at, Some(t(12)));
        assert_eq!(reopened.pending().unwrap().len(), 2);
    }

    #[test]
    fn csv_store_confirm_unknown_leaves_file() {
        let dir = tmp();
        let path = dir.path().join("route.csv");
        save_points_csv(&path, &sample()).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let mut store = CsvStore::new(&path);
        assert!(matches!(
            store.confirm(&PointId::from("zz"), t(12)),
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }
}

// ── SQLite ─────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use courier_core::PointId;

    use super::helpers::{sample, t};
    use crate::{PointStore, SqliteStore, StoreError};

    #[test]
    fn upsert_and_list() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.upsert(&sample()).unwrap();
        assert_eq!(store.list().unwrap(), sample());
    }

    #[test]
    fn upsert_replaces_existing() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.upsert(&sample()).unwrap();
        let moved = vec![courier_core::DeliveryPoint::new("a2", 1.0, 1.0)];
        store.upsert(&moved).unwrap();

        let pts = store.list().unwrap();
        assert_eq!(pts.len(), 3);
        assert_eq!(pts[1], moved[0]);
    }

    #[test]
    fn confirm_keeps_first_time() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.upsert(&sample()).unwrap();
        let id = PointId::from("a1");
        store.confirm(&id, t(8)).unwrap();
        store.confirm(&id, t(9)).unwrap();

        let p = &store.list().unwrap()[0];
        assert!(p.visited);
        assert_eq!(p.confirmed_at, Some(t(8)));
        assert_eq!(store.pending().unwrap().len(), 2);
    }

    #[test]
    fn confirm_unknown() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(
            store.confirm(&PointId::from("nope"), t(8)),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.upsert(&sample()).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.list().unwrap().len(), 3);
    }
}
