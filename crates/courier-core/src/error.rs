//! Core error type.
//!
//! The distance metric itself never fails; the only fallible operation in
//! this crate is parsing a coordinate from text.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid coordinate {input:?}: {reason}")]
    Coordinate { input: String, reason: &'static str },
}

/// Shorthand result type for `courier-core`.
pub type CoreResult<T> = Result<T, CoreError>;
