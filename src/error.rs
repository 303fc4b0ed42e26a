//! Ambient error surface.
//!
//! The cache's operation contracts (`set`/`get`/`del`/`exists`/`expire`)
//! are total and report failure as `bool`/`Option`, never `Err` — see
//! the Failure Semantics section of the design doc. `CacheError` only
//! covers the handful of API-boundary preconditions that would otherwise
//! panic.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    #[error("`max_keys` must be greater than zero")]
    ZeroCapacity,
    #[error("key must not be empty")]
    EmptyKey,
}
