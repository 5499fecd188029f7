//! vigil-core
//!
//! Scheduled task の直近の実行結果から、ホストプロセスの liveness を判定します。
//!
//! # モジュール構成
//! - **domain**: TaskDescriptor, TaskKind, ExecutionOutcome, Verdict
//! - **ports**: TaskRegistry（読み取り）, HealthCheck（公開）
//! - **app**: TasksHealthCheck（evaluator）, HealthCheckBuilder
//! - **impls**: InMemoryTaskRegistry（開発用・テスト用）
//! - **error**: RegistryError, HealthError
//! - **observability**: tracing の初期化

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod observability;
pub mod ports;

pub use app::{BuildError, HealthCheckBuilder, TasksHealthCheck, evaluate};
pub use domain::{ExecutionOutcome, TaskCompletionStatus, TaskDescriptor, TaskKind, Verdict};
pub use error::{HealthError, RegistryError};
pub use impls::InMemoryTaskRegistry;
pub use ports::{HealthCheck, TaskRegistry};
