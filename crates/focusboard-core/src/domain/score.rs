//! Score - 完了 ledger から生産性スコアを計算する
//!
//! すべて純粋関数です（副作用なし）。ledger は小さいので毎回全件を再計算します。
//!
//! # 1 タスクあたりのスコア（efficiency = actual / limit）
//! - `<= 0.5`: 150（100 + 20 + 30）→ 上限 100
//! - `<= 0.8`: 120 → 上限 100
//! - `<= 1.0`: 100
//! - `<= 1.5`: 70
//! - `<= 2.0`: 40
//! - それ以上: 20

use serde::{Deserialize, Serialize};

use super::CompletedTaskRecord;

/// Per-task score ceiling.
pub const TASK_SCORE_CAP: u32 = 100;

/// Aggregate efficiency ceiling, in percent.
pub const EFFICIENCY_CAP_PERCENT: f64 = 200.0;

/// Raw (uncapped) score for one task.
pub fn raw_task_score(efficiency: f64) -> u32 {
    if efficiency <= 1.0 {
        let mut score = 100;
        if efficiency <= 0.8 {
            score += 20; // early
        }
        if efficiency <= 0.5 {
            score += 30; // very early
        }
        score
    } else if efficiency <= 1.5 {
        70
    } else if efficiency <= 2.0 {
        40
    } else {
        20
    }
}

pub fn task_score(efficiency: f64) -> u32 {
    raw_task_score(efficiency).min(TASK_SCORE_CAP)
}

/// Mean of capped per-task scores, rounded. 0 for an empty ledger.
pub fn productivity_score(ledger: &[CompletedTaskRecord]) -> u32 {
    if ledger.is_empty() {
        return 0;
    }
    let total: u32 = ledger
        .iter()
        .map(|record| task_score(record.efficiency()))
        .sum();
    (f64::from(total) / ledger.len() as f64).round() as u32
}

/// Mean actual minutes, rounded. 0 for an empty ledger.
pub fn average_time(ledger: &[CompletedTaskRecord]) -> u64 {
    if ledger.is_empty() {
        return 0;
    }
    let total: f64 = ledger.iter().map(CompletedTaskRecord::actual_time).sum();
    (total / ledger.len() as f64).round() as u64
}

/// `100 * sum(limit) / sum(actual)`, capped at 200 and rounded.
///
/// A ledger whose actual time sums to zero divides to infinity and therefore
/// reports the cap.
pub fn efficiency_percent(ledger: &[CompletedTaskRecord]) -> u32 {
    if ledger.is_empty() {
        return 0;
    }
    let limit: f64 = ledger
        .iter()
        .map(|record| f64::from(record.time_limit()))
        .sum();
    let actual: f64 = ledger.iter().map(CompletedTaskRecord::actual_time).sum();
    let percent = limit / actual * 100.0;
    percent.min(EFFICIENCY_CAP_PERCENT).round() as u32
}

/// The four values shown on the performance board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub productivity_score: u32,
    pub tasks_completed: usize,
    /// Minutes.
    pub average_time: u64,
    /// Percent.
    pub efficiency: u32,
}

impl ScoreSummary {
    pub fn from_ledger(ledger: &[CompletedTaskRecord]) -> Self {
        Self {
            productivity_score: productivity_score(ledger),
            tasks_completed: ledger.len(),
            average_time: average_time(ledger),
            efficiency: efficiency_percent(ledger),
        }
    }

    /// e.g. `"12m"`
    pub fn average_time_label(&self) -> String {
        format!("{}m", self.average_time)
    }

    /// e.g. `"85%"`
    pub fn efficiency_label(&self) -> String {
        format!("{}%", self.efficiency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, Task, TaskId, TaskStatus};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    /// Ledger entry with `limit` minutes allotted and `spent_secs` consumed.
    fn record(id: u64, limit: i64, spent_secs: u64) -> CompletedTaskRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut task = Task::new(TaskId::new(id), NewTask::new("t", limit).unwrap(), at);
        task.time_remaining = task.time_limit_secs().saturating_sub(spent_secs);
        task.status = TaskStatus::Done;
        CompletedTaskRecord::capture(&task)
    }

    /// Ledger entry with an explicit actual time, as loaded from a snapshot.
    fn loaded(limit: u32, actual: f64) -> CompletedTaskRecord {
        let value = serde_json::json!({
            "id": 1,
            "title": "t",
            "timeLimit": limit,
            "timeRemaining": 0,
            "status": "done",
            "createdAt": 0,
            "startedAt": null,
            "completedAt": null,
            "actualTime": actual,
        });
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case::very_early(0.25, 150)]
    #[case::half(0.5, 150)]
    #[case::early(0.7, 120)]
    #[case::eighty(0.8, 120)]
    #[case::on_time(0.9, 100)]
    #[case::exact(1.0, 100)]
    #[case::bit_over(1.2, 70)]
    #[case::half_over(1.5, 70)]
    #[case::late(1.8, 40)]
    #[case::double(2.0, 40)]
    #[case::very_late(3.0, 20)]
    fn raw_score_bands(#[case] efficiency: f64, #[case] expected: u32) {
        assert_eq!(raw_task_score(efficiency), expected);
    }

    #[rstest]
    #[case(0.1, 100)]
    #[case(0.6, 100)]
    #[case(1.1, 70)]
    fn task_score_is_capped(#[case] efficiency: f64, #[case] expected: u32) {
        assert_eq!(task_score(efficiency), expected);
    }

    #[test]
    fn empty_ledger_scores_zero() {
        assert_eq!(ScoreSummary::from_ledger(&[]), ScoreSummary::default());
    }

    #[test]
    fn half_time_is_capped_at_one_hundred() {
        let ledger = [record(1, 10, 300)];
        assert_eq!(ledger[0].actual_time(), 5.0);
        assert_eq!(productivity_score(&ledger), 100);
    }

    #[test]
    fn mixed_ledger_averages_capped_scores() {
        let ledger = [loaded(10, 20.0), loaded(10, 5.0)];
        assert_eq!(productivity_score(&ledger), 70);
    }

    #[test]
    fn average_time_rounds_mean() {
        let ledger = [loaded(10, 4.0), loaded(10, 5.5)];
        // mean 4.75
        assert_eq!(average_time(&ledger), 5);
    }

    #[test]
    fn efficiency_is_capped() {
        let ledger = [loaded(10, 2.0)];
        assert_eq!(efficiency_percent(&ledger), 200);

        let ledger = [loaded(10, 8.0)];
        assert_eq!(efficiency_percent(&ledger), 125);
    }

    #[test]
    fn zero_actual_time_hits_the_cap() {
        let ledger = [record(1, 5, 0)];
        assert_eq!(efficiency_percent(&ledger), 200);
        assert_eq!(productivity_score(&ledger), 100);
    }

    #[test]
    fn summary_labels() {
        let summary = ScoreSummary::from_ledger(&[loaded(10, 8.0), loaded(20, 16.0)]);
        assert_eq!(summary.tasks_completed, 2);
        assert_eq!(summary.average_time_label(), "12m");
        assert_eq!(summary.efficiency_label(), "125%");
        assert_eq!(summary.productivity_score, 100);
    }
}
