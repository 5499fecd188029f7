//! HealthCheck port - HTTP probe や CLI などの transport 層に公開する問い合わせ

use async_trait::async_trait;

use crate::domain::Verdict;
use crate::error::HealthError;

/// A single named health query.
///
/// Cancellation belongs to the caller: drop the future or wrap it in
/// `tokio::time::timeout`. Implementations hold no state between calls.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &str;

    async fn check_health(&self) -> Result<Verdict, HealthError>;
}
