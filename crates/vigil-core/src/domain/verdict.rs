//! Verdict - evaluator が返す二値の health 判定

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary health determination.
///
/// Serialized as `HEALTHY` / `UNHEALTHY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Healthy,
    Unhealthy,
}

impl Verdict {
    pub fn is_healthy(self) -> bool {
        matches!(self, Verdict::Healthy)
    }

    /// HTTP status for probe endpoints (200 / 503).
    pub fn http_status(self) -> u16 {
        match self {
            Verdict::Healthy => 200,
            Verdict::Unhealthy => 503,
        }
    }

    /// Process exit code for non-HTTP hosting (0 / 1).
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Healthy => 0,
            Verdict::Unhealthy => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Healthy => "healthy",
            Verdict::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
