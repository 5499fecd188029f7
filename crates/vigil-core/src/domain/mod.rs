//! Domain model (task descriptors, execution outcomes, verdicts).
//!
//! ここに置く型はすべて外部の task registry が所有するデータの「形」です。
//! evaluator はこれらを読むだけで、変更しません。

pub mod outcome;
pub mod task;
pub mod verdict;

pub use outcome::{ExecutionOutcome, TaskCompletionStatus};
pub use task::{TaskDescriptor, TaskKind};
pub use verdict::Verdict;
