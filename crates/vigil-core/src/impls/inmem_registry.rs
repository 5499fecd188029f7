//! InMemoryTaskRegistry - 開発用・テスト用の task registry
//!
//! # 学習ポイント
//! - tokio::sync::RwLock による並行読み取り
//! - BTreeMap で name 順を自然に保持
//! - スナップショットは clone して返す（ロックを跨いで参照を持たない）

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{ExecutionOutcome, TaskDescriptor, TaskKind};
use crate::error::RegistryError;
use crate::ports::TaskRegistry;

/// InMemoryTaskRegistry は name をキーに TaskDescriptor を保持する
///
/// # 使用例
/// ```ignore
/// let registry = InMemoryTaskRegistry::new();
/// registry.register(TaskDescriptor::configurable("Clean Cache", true)).await?;
/// registry.record_outcome("Clean Cache", ExecutionOutcome::failed("io")).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryTaskRegistry {
    tasks: RwLock<BTreeMap<String, TaskDescriptor>>,
}

impl InMemoryTaskRegistry {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(BTreeMap::new()),
        }
    }

    /// Build a registry from a snapshot (e.g. a JSON file). Names must be unique.
    pub fn from_tasks(
        tasks: impl IntoIterator<Item = TaskDescriptor>,
    ) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for task in tasks {
            if map.contains_key(&task.name) {
                return Err(RegistryError::DuplicateTask(task.name));
            }
            map.insert(task.name.clone(), task);
        }
        Ok(Self {
            tasks: RwLock::new(map),
        })
    }

    pub async fn register(&self, task: TaskDescriptor) -> Result<(), RegistryError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.name) {
            return Err(RegistryError::DuplicateTask(task.name));
        }
        debug!(task = %task.name, "registered scheduled task");
        tasks.insert(task.name.clone(), task);
        Ok(())
    }

    /// Flip the administrative switch of a configurable task.
    pub async fn set_enabled(&self, name: &str, enabled: bool) -> Result<(), RegistryError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownTask(name.to_string()))?;

        match task.kind {
            TaskKind::Configurable { .. } => {
                task.kind = TaskKind::Configurable { enabled };
                Ok(())
            }
            TaskKind::NotConfigurable => Err(RegistryError::NotConfigurable(name.to_string())),
        }
    }

    /// Replace the latest outcome of a task.
    pub async fn record_outcome(
        &self,
        name: &str,
        outcome: ExecutionOutcome,
    ) -> Result<(), RegistryError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownTask(name.to_string()))?;
        task.last_execution = Some(outcome);
        Ok(())
    }

    /// Forget the latest outcome (history unavailable).
    pub async fn clear_outcome(&self, name: &str) -> Result<(), RegistryError> {
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownTask(name.to_string()))?;
        task.last_execution = None;
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[async_trait]
impl TaskRegistry for InMemoryTaskRegistry {
    async fn scheduled_tasks(&self) -> Result<Vec<TaskDescriptor>, RegistryError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskCompletionStatus;

    #[tokio::test]
    async fn register_and_snapshot() {
        let registry = InMemoryTaskRegistry::new();
        assert!(registry.is_empty().await);
        registry
            .register(TaskDescriptor::configurable("b", true))
            .await
            .unwrap();
        registry
            .register(TaskDescriptor::not_configurable("a"))
            .await
            .unwrap();

        let tasks = registry.scheduled_tasks().await.unwrap();
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(registry.len().await, 2);
        assert!(!registry.is_empty().await);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let registry = InMemoryTaskRegistry::new();
        registry
            .register(TaskDescriptor::not_configurable("a"))
            .await
            .unwrap();
        let result = registry
            .register(TaskDescriptor::configurable("a", false))
            .await;
        assert!(matches!(result, Err(RegistryError::DuplicateTask(name)) if name == "a"));
    }

    #[test]
    fn from_tasks_rejects_duplicates() {
        let result = InMemoryTaskRegistry::from_tasks(vec![
            TaskDescriptor::not_configurable("a"),
            TaskDescriptor::not_configurable("a"),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateTask(_))));
    }

    #[tokio::test]
    async fn set_enabled_only_for_configurable_tasks() {
        let registry = InMemoryTaskRegistry::from_tasks(vec![
            TaskDescriptor::configurable("switchable", true),
            TaskDescriptor::not_configurable("fixed"),
        ])
        .unwrap();

        registry.set_enabled("switchable", false).await.unwrap();
        let tasks = registry.scheduled_tasks().await.unwrap();
        let switchable = tasks.iter().find(|t| t.name == "switchable").unwrap();
        assert!(!switchable.is_enabled());

        let result = registry.set_enabled("fixed", false).await;
        assert!(matches!(result, Err(RegistryError::NotConfigurable(_))));

        let result = registry.set_enabled("missing", true).await;
        assert!(matches!(result, Err(RegistryError::UnknownTask(_))));
    }

    #[tokio::test]
    async fn record_and_clear_outcome() {
        let registry =
            InMemoryTaskRegistry::from_tasks(vec![TaskDescriptor::not_configurable("a")]).unwrap();

        registry
            .record_outcome("a", ExecutionOutcome::failed("boom"))
            .await
            .unwrap();
        let tasks = registry.scheduled_tasks().await.unwrap();
        assert_eq!(tasks[0].last_status(), Some(TaskCompletionStatus::Failed));

        registry.clear_outcome("a").await.unwrap();
        let tasks = registry.scheduled_tasks().await.unwrap();
        assert!(tasks[0].last_execution.is_none());

        let result = registry
            .record_outcome("nope", ExecutionOutcome::completed())
            .await;
        assert!(matches!(result, Err(RegistryError::UnknownTask(_))));
    }
}
