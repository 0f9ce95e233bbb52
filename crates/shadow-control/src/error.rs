use shadow_behavior::BehaviorError;
use shadow_core::CoreError;
use shadow_motion::MotionError;
use shadow_seating::SeatingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("controller configuration error: {0}")]
    Config(String),

    #[error("configuration document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Seating(#[from] SeatingError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Motion(#[from] MotionError),
}

pub type ControlResult<T> = Result<T, ControlError>;
