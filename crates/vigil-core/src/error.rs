use thiserror::Error;

/// Errors raised by a [`TaskRegistry`](crate::ports::TaskRegistry) implementation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry could not produce a snapshot.
    #[error("task registry unavailable: {0}")]
    Unavailable(String),

    #[error("duplicate task name={0}")]
    DuplicateTask(String),

    #[error("unknown task name={0}")]
    UnknownTask(String),

    #[error("task name={0} has no enable/disable switch")]
    NotConfigurable(String),
}

/// Errors surfaced by a health check.
///
/// A failing task is NOT an error; it is reported as `Verdict::Unhealthy`.
#[derive(Debug, Error)]
pub enum HealthError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
