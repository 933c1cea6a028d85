//! Domain identifiers.
//!
//! TaskId は単調増加する整数 ID です（再利用しない）。
//! 永続化フォーマットでは素の数値として保存し、表示時は `task-` プレフィックスを付けます。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display で使うプレフィックス
const PREFIX: &str = "task-";

/// Identifier of a Task.
///
/// `#[serde(transparent)]` により JSON 上は `7` のような数値になります。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// 次の ID（`u64::MAX` の次はない）
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX}{}", self.0)
    }
}

/// TaskId のパースエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task id: {0:?}")]
pub struct ParseTaskIdError(String);

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    /// `"7"` と `"task-7"` の両方を受け付ける（drag payload は素の数値文字列）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(PREFIX).unwrap_or(trimmed);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseTaskIdError(s.to_string()))
    }
}
