use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::{TaskId, TaskStatus};

/// Seconds per minute of allotted time.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Validated input for `create_task`.
///
/// Construction is the only validation point: a `NewTask` always has a
/// non-empty (trimmed) title and a positive time limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    time_limit: u32,
}

impl NewTask {
    pub fn new(title: &str, time_limit_minutes: i64) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if time_limit_minutes <= 0 {
            return Err(ValidationError::NonPositiveTimeLimit(time_limit_minutes));
        }
        let time_limit = u32::try_from(time_limit_minutes)
            .map_err(|_| ValidationError::TimeLimitTooLarge(time_limit_minutes))?;
        Ok(Self {
            title: title.to_string(),
            time_limit,
        })
    }

    /// Form input: minutes arrive as text.
    pub fn parse(title: &str, raw_minutes: &str) -> Result<Self, ValidationError> {
        let minutes = raw_minutes
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::NonNumericTimeLimit(raw_minutes.to_string()))?;
        Self::new(title, minutes)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }
}

/// One unit of work on the board.
///
/// Field names follow the persisted snapshot format (camelCase, timestamps
/// as epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,

    /// Allotted minutes.
    pub time_limit: u32,

    /// Seconds left on the countdown.
    pub time_remaining: u64,

    pub status: TaskStatus,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: TaskId, draft: NewTask, created_at: DateTime<Utc>) -> Self {
        let time_remaining = u64::from(draft.time_limit) * SECONDS_PER_MINUTE;
        Self {
            id,
            title: draft.title,
            time_limit: draft.time_limit,
            time_remaining,
            status: TaskStatus::Todo,
            created_at,
            started_at: None,
            completed_at: None,
        }
    }

    /// Allotted time in seconds.
    pub fn time_limit_secs(&self) -> u64 {
        u64::from(self.time_limit) * SECONDS_PER_MINUTE
    }

    /// Seconds consumed so far.
    pub fn elapsed_secs(&self) -> u64 {
        self.time_limit_secs().saturating_sub(self.time_remaining)
    }

    /// Minutes consumed so far (fractional).
    pub fn actual_minutes(&self) -> f64 {
        self.elapsed_secs() as f64 / SECONDS_PER_MINUTE as f64
    }

    /// Decrement the countdown by one second, flooring at zero.
    /// Returns the new remaining time.
    pub fn tick_down(&mut self) -> u64 {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.time_remaining
    }

    pub fn is_expired(&self) -> bool {
        self.time_remaining == 0
    }

    /// Urgent only applies while the countdown is running.
    pub fn is_urgent(&self, threshold_secs: u64) -> bool {
        self.status.is_active() && self.time_remaining <= threshold_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case(1)]
    #[case(25)]
    #[case(90)]
    fn new_task_starts_full(#[case] minutes: i64) {
        let draft = NewTask::new("Write report", minutes).unwrap();
        let task = Task::new(TaskId::new(1), draft, at());
        assert_eq!(task.time_remaining, minutes as u64 * 60);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.started_at, None);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn title_is_trimmed() {
        let draft = NewTask::new("  Review PR \n", 5).unwrap();
        assert_eq!(draft.title(), "Review PR");
    }

    #[rstest]
    #[case::empty("", 5, ValidationError::EmptyTitle)]
    #[case::blank("   ", 5, ValidationError::EmptyTitle)]
    #[case::zero("a", 0, ValidationError::NonPositiveTimeLimit(0))]
    #[case::negative("a", -3, ValidationError::NonPositiveTimeLimit(-3))]
    #[case::huge("a", i64::MAX, ValidationError::TimeLimitTooLarge(i64::MAX))]
    fn invalid_drafts_are_rejected(
        #[case] title: &str,
        #[case] minutes: i64,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(NewTask::new(title, minutes), Err(expected));
    }

    #[test]
    fn parse_rejects_non_numeric_minutes() {
        assert_eq!(
            NewTask::parse("a", "ten"),
            Err(ValidationError::NonNumericTimeLimit("ten".to_string()))
        );
        assert_eq!(NewTask::parse("a", " 15 ").unwrap().time_limit(), 15);
    }

    #[test]
    fn tick_down_floors_at_zero() {
        let mut task = Task::new(TaskId::new(1), NewTask::new("a", 1).unwrap(), at());
        task.time_remaining = 1;
        assert_eq!(task.tick_down(), 0);
        assert_eq!(task.tick_down(), 0);
        assert!(task.is_expired());
    }

    #[test]
    fn actual_minutes_counts_consumed_time() {
        let mut task = Task::new(TaskId::new(1), NewTask::new("a", 10).unwrap(), at());
        task.time_remaining = 300;
        assert_eq!(task.elapsed_secs(), 300);
        assert_eq!(task.actual_minutes(), 5.0);
    }

    #[test]
    fn urgent_only_while_doing() {
        let mut task = Task::new(TaskId::new(1), NewTask::new("a", 1).unwrap(), at());
        assert!(!task.is_urgent(60));
        task.status = TaskStatus::Doing;
        assert!(task.is_urgent(60));
        task.time_remaining = 61;
        assert!(!task.is_urgent(60));
    }

    #[test]
    fn serializes_with_snapshot_field_names() {
        let task = Task::new(TaskId::new(4), NewTask::new("a", 2).unwrap(), at());
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["timeLimit"], 2);
        assert_eq!(value["timeRemaining"], 120);
        assert_eq!(value["status"], "todo");
        assert_eq!(value["createdAt"], at().timestamp_millis());
        assert!(value["startedAt"].is_null());
    }
}
