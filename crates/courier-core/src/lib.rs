//! `courier-core` — foundational types for the courier route assistant.
//!
//! This crate is a dependency of every other `courier-*` crate.  It has no
//! `courier-*` dependencies and only `chrono` and `thiserror` externally,
//! plus optional `serde`.
//!
//! # What lives here
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | [`geo`]   | `Coordinate`, `Locate`, haversine `distance_km`             |
//! | [`point`] | `PointId`, `DeliveryPoint`                                  |
//! | [`error`] | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod point;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{distance_km, Coordinate, Locate, EARTH_RADIUS_KM};
pub use point::{DeliveryPoint, PointId};
