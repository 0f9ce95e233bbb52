//! Controller-wide error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::SeatIndex;

/// The base error type for `shadow-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("seat {0} not found")]
    SeatNotFound(SeatIndex),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `shadow-core`.
pub type CoreResult<T> = Result<T, CoreError>;
