use thiserror::Error;

/// Boxed error from a platform backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fatal errors raised while the bell loop or flash mode is running.
#[derive(Debug, Error)]
pub enum BellError {
    #[error("failed to update overlay: {0}")]
    Surface(BoxError),

    #[error("failed to read bell notifications: {0}")]
    Source(BoxError),

    #[error("waiting for bell notifications failed: {0}")]
    Wait(BoxError),
}

/// Outcome of a failed readiness wait.
#[derive(Debug, Error)]
pub enum WaitError {
    /// Interrupted by an unrelated signal; the wait should simply be retried.
    #[error("wait interrupted by signal")]
    Interrupted,

    #[error(transparent)]
    Failed(#[from] BellError),
}
