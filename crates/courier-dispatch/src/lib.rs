//! `courier-dispatch` — the courier-facing operations.
//!
//! [`RouteService`] ties a [`PointStore`](courier_store::PointStore) to a
//! [`RoutePlanner`](courier_route::RoutePlanner) and exposes what a courier
//! app needs: list the stops, plan the remaining ones, find the closest
//! pending stop, and confirm a delivery.
//!
//! | Module      | Contents                                  |
//! |-------------|-------------------------------------------|
//! | [`service`] | `RouteService`, `OptimizedRoute`          |
//! | [`error`]   | `DispatchError`, `DispatchResult<T>`      |

pub mod error;
pub mod service;


pub use error::{DispatchError, DispatchResult};
pub use service::{OptimizedRoute, RouteService};
