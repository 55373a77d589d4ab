//! `courier-store` — where delivery points live between planning calls.
//!
//! The route engine never touches storage: callers list points from a
//! [`PointStore`], filter them, plan, and later confirm deliveries back
//! through the same store.
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`store`]  | `PointStore` trait, `MemoryStore`                            |
//! | [`csv`]    | `CsvStore`, `load_points_csv`, `save_points_csv`, readers    |
//! | [`sqlite`] | `SqliteStore` (feature = `"sqlite"` only)                    |
//! | [`error`]  | `StoreError`, `StoreResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag     | Effect                                                      |
//! |----------|-------------------------------------------------------------|
//! | `sqlite` | Enables the SQLite backend via `rusqlite` (bundled).        |

pub mod csv;
pub mod error;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use crate::csv::{load_points_csv, load_points_reader, save_points_csv, write_points, CsvStore};
pub use error::{StoreError, StoreResult};
pub use store::{MemoryStore, PointStore};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
