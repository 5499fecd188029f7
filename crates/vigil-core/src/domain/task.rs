//! Task descriptor - registry が公開する scheduled task の読み取り専用ビュー
//!
//! # 学習ポイント
//! - 「configurable かどうか」は実行時の型判定ではなく enum の variant で表現
//! - enum に capability query (`is_configurable` / `is_enabled`) を持たせる

use serde::{Deserialize, Serialize};

use super::outcome::{ExecutionOutcome, TaskCompletionStatus};

/// TaskKind は task が enable/disable の capability を持つかを表す
///
/// JSON では descriptor に flatten されます:
/// - `{"kind": "configurable", "enabled": false}`
/// - `{"kind": "not_configurable"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    /// Exposes an administrative enable/disable switch.
    Configurable { enabled: bool },

    /// No switch; always treated as enabled.
    NotConfigurable,
}

impl TaskKind {
    pub fn is_configurable(self) -> bool {
        matches!(self, TaskKind::Configurable { .. })
    }

    /// `enabled = !is_configurable || enabled`
    pub fn is_enabled(self) -> bool {
        match self {
            TaskKind::Configurable { enabled } => enabled,
            TaskKind::NotConfigurable => true,
        }
    }
}

/// TaskDescriptor は registry に登録された background job 1 件
///
/// `name` は診断ログの順序を決めるためだけに使います。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(flatten)]
    pub kind: TaskKind,

    /// Latest recorded run. `None` when the task never ran or history is unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_execution: Option<ExecutionOutcome>,
}

impl TaskDescriptor {
    pub fn new(name: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            name: name.into(),
            key: None,
            category: None,
            kind,
            last_execution: None,
        }
    }

    pub fn configurable(name: impl Into<String>, enabled: bool) -> Self {
        Self::new(name, TaskKind::Configurable { enabled })
    }

    pub fn not_configurable(name: impl Into<String>) -> Self {
        Self::new(name, TaskKind::NotConfigurable)
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_last_execution(mut self, outcome: ExecutionOutcome) -> Self {
        self.last_execution = Some(outcome);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.kind.is_enabled()
    }

    pub fn last_status(&self) -> Option<TaskCompletionStatus> {
        self.last_execution.as_ref().map(|o| o.status)
    }

    /// Did the latest recorded run fail?
    ///
    /// A task with no recorded outcome has not failed: absence of evidence is not a
    /// failure. Enablement is not considered here; see [`TaskDescriptor::is_enabled`].
    pub fn has_failed(&self) -> bool {
        self.last_execution
            .as_ref()
            .is_some_and(ExecutionOutcome::is_failed)
    }
}
