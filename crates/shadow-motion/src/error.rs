use shadow_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("motion configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type MotionResult<T> = Result<T, MotionError>;
