//! Ports - 抽象化レイヤー
//!
//! - **TaskRegistry**: scheduler 側が実装する読み取りポート（消費する側）
//! - **HealthCheck**: monitoring transport へ公開するポート（提供する側）

pub mod health_check;
pub mod task_registry;

pub use self::health_check::HealthCheck;
pub use self::task_registry::TaskRegistry;
