//! Execution outcome: the recorded result of a task's most recent run.
//!
//! The evaluator only looks at `status`. Timestamps and error text are carried so
//! that snapshots stay faithful to what the scheduler recorded.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Completion status of a single task run.
///
/// Serialized in PascalCase (`"Completed"`, `"Failed"`, ...) to match the status
/// strings scheduler snapshots use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCompletionStatus {
    Completed,
    Failed,
    /// Stopped on request.
    Cancelled,
    /// Interrupted by shutdown or a crash.
    Aborted,
}

impl TaskCompletionStatus {
    pub fn is_failed(self) -> bool {
        matches!(self, TaskCompletionStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub status: TaskCompletionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Full error text (stack trace etc.) when the scheduler kept one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_error_message: Option<String>,
}

impl ExecutionOutcome {
    pub fn new(status: TaskCompletionStatus) -> Self {
        Self {
            status,
            started_at: None,
            ended_at: None,
            error_message: None,
            long_error_message: None,
        }
    }

    pub fn completed() -> Self {
        Self::new(TaskCompletionStatus::Completed)
    }

    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            error_message: Some(error_message.into()),
            ..Self::new(TaskCompletionStatus::Failed)
        }
    }

    pub fn cancelled() -> Self {
        Self::new(TaskCompletionStatus::Cancelled)
    }

    pub fn aborted() -> Self {
        Self::new(TaskCompletionStatus::Aborted)
    }

    pub fn with_times(mut self, started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self.ended_at = Some(ended_at);
        self
    }

    pub fn with_long_error(mut self, long_error_message: impl Into<String>) -> Self {
        self.long_error_message = Some(long_error_message.into());
        self
    }

    /// Wall-clock duration of the run, if both timestamps were recorded.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status.is_failed()
    }
}
