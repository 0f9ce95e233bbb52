use shadow_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("at least one seat is required")]
    NoSeats,

    #[error("duplicate seat id {0:?}")]
    DuplicateSeat(String),

    #[error("seat id must not be empty (seat #{0})")]
    EmptySeatId(usize),

    #[error("default seat {0:?} is not a configured seat")]
    UnknownDefaultSeat(String),

    #[error("too many seats: {0} (max {})", u16::MAX)]
    TooManySeats(usize),

    #[error("seat {id:?} has non-positive bounds")]
    InvalidBounds { id: String },

    #[error("seat file parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SeatingResult<T> = Result<T, SeatingError>;

/// A snapshot that could not be understood.  Always recoverable: the caller
/// skips the tick and keeps its previous state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(String),

    #[error("snapshot root must be a JSON object")]
    NotAnObject,

    #[error("snapshot carries no occupancy information")]
    NoOccupancy,

    #[error("malformed snapshot field {field:?}: {reason}")]
    Malformed { field: &'static str, reason: String },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
