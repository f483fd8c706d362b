//! Error type shared by the scheduler and the JSON interchange layer.

/// Error type for scheduler operations
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Quality rating out of range 0-5: {0}")]
    QualityOutOfRange(i64),

    #[error("Invalid scheduler config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
