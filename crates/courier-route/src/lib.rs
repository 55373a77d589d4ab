//! `courier-route` — visiting order and route length.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`optimizer`] | `Start`, `nearest_neighbor_order`, `nearest_neighbor_tour`     |
//! | [`length`]    | `route_length_km`, `round_km`                                  |
//! | [`planner`]   | `RoutePlanner` trait, `NearestNeighbor`, `RouteSummary`        |
//! | [`nearest`]   | `nearest_unvisited`                                            |
//!
//! Everything here is a pure function of its input: no state survives a
//! call, and inputs are never mutated.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Candidate scan runs on Rayon; results are unchanged.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.         |

pub mod length;
pub mod nearest;
pub mod optimizer;
pub mod planner;


pub use length::{route_length_km, round_km};
pub use nearest::nearest_unvisited;
pub use optimizer::{nearest_neighbor_indices, nearest_neighbor_order, nearest_neighbor_tour, Start};
pub use planner::{NearestNeighbor, RoutePlanner, RouteSummary};
