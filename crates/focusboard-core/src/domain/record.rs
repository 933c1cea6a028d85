//! Completed-task ledger record.

use serde::{Deserialize, Serialize};

use super::Task;

/// Immutable snapshot taken when a task moves `doing -> done`.
///
/// The task fields are flattened so the persisted shape is the task object
/// plus `actualTime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTaskRecord {
    #[serde(flatten)]
    task: Task,

    /// Minutes actually spent (fractional).
    actual_time: f64,
}

impl CompletedTaskRecord {
    /// Take the snapshot. `task` must already carry its `done` status and
    /// completion timestamp.
    ///
    /// `completed_at` is stamped only once per task, so a task completed a
    /// second time (`done -> doing -> done`) produces a record that still
    /// carries the first completion time. `actual_time` reflects the latest
    /// countdown.
    pub fn capture(task: &Task) -> Self {
        Self {
            task: task.clone(),
            actual_time: task.actual_minutes(),
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn time_limit(&self) -> u32 {
        self.task.time_limit
    }

    pub fn actual_time(&self) -> f64 {
        self.actual_time
    }

    /// actual / allotted
    pub fn efficiency(&self) -> f64 {
        self.actual_time / f64::from(self.task.time_limit)
    }
}
