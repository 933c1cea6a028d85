//! Presentation data handed to the host UI.

use serde::{Deserialize, Serialize};

use super::{Task, TaskId, TaskStatus};

/// `M:SS`, minutes unbounded (e.g. `125:00`).
pub fn format_remaining(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Render request for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    /// Remaining time as `M:SS`.
    pub remaining: String,
    pub urgent: bool,
    pub status: TaskStatus,
    /// Container the task belongs in.
    pub container_id: String,
}

impl TaskView {
    pub fn of(task: &Task, urgent_threshold_secs: u64) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            remaining: format_remaining(task.time_remaining),
            urgent: task.is_urgent(urgent_threshold_secs),
            status: task.status,
            container_id: task.status.container_id().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTask;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0:00")]
    #[case(9, "0:09")]
    #[case(60, "1:00")]
    #[case(61, "1:01")]
    #[case(1500, "25:00")]
    #[case(7199, "119:59")]
    fn formats_minutes_and_seconds(#[case] seconds: u64, #[case] expected: &str) {
        assert_eq!(format_remaining(seconds), expected);
    }

    #[test]
    fn view_carries_container() {
        let mut task = Task::new(TaskId::new(2), NewTask::new("a", 1).unwrap(), Utc::now());
        task.status = TaskStatus::Doing;
        task.time_remaining = 59;

        let view = TaskView::of(&task, 60);
        assert_eq!(view.remaining, "0:59");
        assert!(view.urgent);
        assert_eq!(view.container_id, "doingTasks");
    }
}
