//! Impls - ports の実装（開発用・テスト用）
//!
//! 本番の registry は scheduler 側が `TaskRegistry` を実装して渡します。

pub mod inmem_registry;

pub use self::inmem_registry::InMemoryTaskRegistry;
