//! TaskRegistry port - 外部 scheduler が所有する task 一覧への読み取りアクセス

use async_trait::async_trait;

use crate::domain::TaskDescriptor;
use crate::error::RegistryError;

/// TaskRegistry は現在登録されている scheduled task のスナップショットを返す
///
/// # 契約
/// - 読み取り専用。evaluator は戻り値を変更しない
/// - 並行読み取りの安全性は実装側の責任
/// - 取得できない場合は `RegistryError::Unavailable` を返す（Healthy/Unhealthy に丸めない）
#[async_trait]
pub trait TaskRegistry: Send + Sync {
    /// Current descriptors, each with its latest outcome (if any). No ordering guarantee.
    async fn scheduled_tasks(&self) -> Result<Vec<TaskDescriptor>, RegistryError>;
}
