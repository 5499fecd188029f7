//! HealthCheckBuilder - evaluator の構築とワイヤリング
//!
//! # Fail-fast 設計
//! - registry が未設定のまま build() すると BuildError を返す
//! - 設定ミスは起動時に検出し、health 判定（Verdict）には混ぜない

use std::sync::Arc;

use super::health::TasksHealthCheck;
use crate::ports::TaskRegistry;

/// Name reported by the check when none is set.
pub const DEFAULT_CHECK_NAME: &str = "scheduled_tasks";

/// BuildError は health check 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("No task registry configured. Call `registry(..)` before `build()`.")]
    MissingRegistry,
}

/// HealthCheckBuilder は TasksHealthCheck を構築
///
/// # 使用例
/// ```ignore
/// let check = HealthCheckBuilder::new()
///     .name("tasks")
///     .registry(registry)
///     .build()?;
/// let verdict = check.check_health().await?;
/// ```
pub struct HealthCheckBuilder {
    name: String,
    registry: Option<Arc<dyn TaskRegistry>>,
}

impl HealthCheckBuilder {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_CHECK_NAME.to_string(),
            registry: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn registry(mut self, registry: Arc<dyn TaskRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<TasksHealthCheck, BuildError> {
        let registry = self.registry.ok_or(BuildError::MissingRegistry)?;
        Ok(TasksHealthCheck::new(self.name, registry))
    }
}

impl Default for HealthCheckBuilder {
    fn default() -> Self {
        Self::new()
    }
}
