//! App - アプリケーション層
//!
//! # 主要コンポーネント
//! - **TasksHealthCheck**: registry を読んで Verdict を返す evaluator
//! - **HealthCheckBuilder**: evaluator の構築と起動時検証

pub mod builder;
pub mod health;

pub use self::builder::{BuildError, HealthCheckBuilder};
pub use self::health::{TasksHealthCheck, evaluate};
