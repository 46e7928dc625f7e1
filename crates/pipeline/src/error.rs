use trashmap_core::error::CoreError;

/// Errors raised by pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A domain-level error (validation, not found, conflict).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store failure. Never retried here.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
