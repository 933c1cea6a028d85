//! State - タスクの状態（todo → doing → done）
//!
//! 表示側のコンテナ ID（`todoTasks` など）との対応もここで定義します。

use serde::{Deserialize, Serialize};
use std::fmt;

/// TaskStatus はタスクのワークフロー上の位置
///
/// # 状態遷移
/// - todo → doing: 開始（countdown 開始）
/// - doing → done: 完了（ledger に記録）
/// - それ以外: countdown を止めるだけ（ledger には記録しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    /// Countdown が進むのは doing のときだけ
    pub fn is_active(self) -> bool {
        matches!(self, TaskStatus::Doing)
    }

    /// 表示側のコンテナ ID
    pub fn container_id(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todoTasks",
            TaskStatus::Doing => "doingTasks",
            TaskStatus::Done => "doneTasks",
        }
    }

    /// Drop 先のコンテナ ID から状態を決める。未知の ID は todo 扱い。
    pub fn from_container_id(container_id: &str) -> Self {
        match container_id {
            "doingTasks" => TaskStatus::Doing,
            "doneTasks" => TaskStatus::Done,
            _ => TaskStatus::Todo,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
