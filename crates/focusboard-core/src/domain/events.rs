//! Events - ドメインイベント
//!
//! 表示層は EventSink 経由でこれらを購読します（DOM などへの直接依存はしない）。

use serde::{Deserialize, Serialize};

use super::{ScoreSummary, TaskId, TaskStatus, TaskView};

/// BoardEvent は Board で発生したイベント
///
/// # イベント種類
/// - BoardLoaded: 起動時に snapshot から復元した
/// - TaskCreated / TaskMoved / TaskDeleted: ライフサイクル操作
/// - TimerTicked: countdown が 1 秒進んだ
/// - ScoreUpdated: ledger 変更に伴うスコア再計算
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    BoardLoaded {
        tasks: Vec<TaskView>,
        score: ScoreSummary,
    },
    TaskCreated {
        view: TaskView,
    },
    TaskMoved {
        view: TaskView,
        from: TaskStatus,
        /// Moved by the countdown rather than the user.
        time_expired: bool,
    },
    TimerTicked {
        view: TaskView,
    },
    TaskDeleted {
        task_id: TaskId,
    },
    ScoreUpdated {
        score: ScoreSummary,
    },
}

impl BoardEvent {
    /// Task this event is about, if any.
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            BoardEvent::TaskCreated { view }
            | BoardEvent::TaskMoved { view, .. }
            | BoardEvent::TimerTicked { view } => Some(view.id),
            BoardEvent::TaskDeleted { task_id } => Some(*task_id),
            BoardEvent::BoardLoaded { .. } | BoardEvent::ScoreUpdated { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            BoardEvent::BoardLoaded { .. } => "board_loaded",
            BoardEvent::TaskCreated { .. } => "task_created",
            BoardEvent::TaskMoved { .. } => "task_moved",
            BoardEvent::TimerTicked { .. } => "timer_ticked",
            BoardEvent::TaskDeleted { .. } => "task_deleted",
            BoardEvent::ScoreUpdated { .. } => "score_updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = BoardEvent::TaskDeleted {
            task_id: TaskId::new(5),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "task_deleted");
        assert_eq!(value["task_id"], 5);
        assert_eq!(event.kind(), "task_deleted");
        assert_eq!(event.task_id(), Some(TaskId::new(5)));
    }
}
