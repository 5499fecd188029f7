//! TasksHealthCheck - scheduled task の直近結果から health を判定する
//!
//! # 判定ルール
//! 1. name 昇順で走査（入力順には依存しない。ログの再現性のため）
//! 2. `enabled = !is_configurable || is_enabled`、disabled は無視
//! 3. enabled な task の直近結果が `Failed` なら `Unhealthy`（最初の 1 件で打ち切り）
//! 4. それ以外は `Healthy`（結果なしの task は失敗扱いしない）

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{TaskDescriptor, Verdict};
use crate::error::HealthError;
use crate::ports::{HealthCheck, TaskRegistry};

/// Decide a verdict over one registry snapshot.
///
/// Pure and total: the snapshot is only read, and every input yields a verdict.
pub fn evaluate(snapshot: &[TaskDescriptor]) -> Verdict {
    let mut ordered: Vec<&TaskDescriptor> = snapshot.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let failing = ordered
        .into_iter()
        .filter(|task| {
            if !task.is_enabled() {
                debug!(task = %task.name, "skipping disabled task");
                return false;
            }
            true
        })
        .find(|task| task.has_failed());

    match failing {
        Some(task) => {
            let error = task
                .last_execution
                .as_ref()
                .and_then(|o| o.error_message.as_deref())
                .unwrap_or("");
            warn!(task = %task.name, error, "scheduled task failed on its last run");
            Verdict::Unhealthy
        }
        None => {
            debug!(tasks = snapshot.len(), "no enabled task failed on its last run");
            Verdict::Healthy
        }
    }
}

/// Health check over the scheduled tasks of a [`TaskRegistry`].
///
/// Build it with [`HealthCheckBuilder`](super::HealthCheckBuilder).
pub struct TasksHealthCheck {
    name: String,
    registry: Arc<dyn TaskRegistry>,
}

impl TasksHealthCheck {
    pub(crate) fn new(name: String, registry: Arc<dyn TaskRegistry>) -> Self {
        Self { name, registry }
    }
}

#[async_trait]
impl HealthCheck for TasksHealthCheck {
    fn name(&self) -> &str {
        &self.name
    }

    /// Registry errors are returned as-is: "cannot determine" is not `Unhealthy`.
    async fn check_health(&self) -> Result<Verdict, HealthError> {
        let snapshot = self.registry.scheduled_tasks().await?;
        let verdict = evaluate(&snapshot);
        debug!(check = %self.name, %verdict, "health check evaluated");
        Ok(verdict)
    }
}
