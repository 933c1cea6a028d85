//! Snapshot - 永続化フォーマット
//!
//! ```json
//! { "tasks": [...], "completedTasks": [...], "taskIdCounter": 3 }
//! ```
//!
//! 欠けているフィールドは既定値になります（tasks/completedTasks は空、counter は 1）。

use serde::{Deserialize, Serialize};

use super::{CompletedTaskRecord, PersistenceError, Task, TaskId};

fn first_id() -> u64 {
    1
}

/// Durable image of the task store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub completed_tasks: Vec<CompletedTaskRecord>,

    /// Next id to hand out.
    #[serde(default = "first_id")]
    pub task_id_counter: u64,
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            completed_tasks: Vec::new(),
            task_id_counter: first_id(),
        }
    }
}

impl BoardSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The id the next created task gets: the stored counter, raised past
    /// every live and ledger id.
    ///
    /// A snapshot that already uses `u64::MAX` has no id left to hand out.
    pub fn next_task_id(&self) -> Result<TaskId, PersistenceError> {
        let counter = TaskId::new(self.task_id_counter.max(1));
        let highest = self
            .tasks
            .iter()
            .map(|task| task.id)
            .chain(self.completed_tasks.iter().map(|record| record.task().id))
            .max();
        match highest {
            Some(highest) if highest >= counter => highest
                .next()
                .ok_or(PersistenceError::IdSpaceExhausted(highest.get())),
            _ => Ok(counter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gets_defaults() {
        let snapshot = BoardSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, BoardSnapshot::default());
        assert_eq!(snapshot.task_id_counter, 1);
    }

    #[test]
    fn field_names_match_storage_format() {
        let value = serde_json::to_value(BoardSnapshot::default()).unwrap();
        assert!(value.get("tasks").is_some());
        assert!(value.get("completedTasks").is_some());
        assert_eq!(value["taskIdCounter"], 1);
    }

    #[test]
    fn next_id_skips_known_ids() {
        let snapshot = BoardSnapshot::from_json(
            r#"{"tasks": [{"id": 8, "title": "a", "timeLimit": 1, "timeRemaining": 60,
                "status": "todo", "createdAt": 0}], "taskIdCounter": 3}"#,
        )
        .unwrap();
        assert_eq!(snapshot.next_task_id().unwrap(), TaskId::new(9));

        let zero = BoardSnapshot {
            task_id_counter: 0,
            ..BoardSnapshot::default()
        };
        assert_eq!(zero.next_task_id().unwrap(), TaskId::new(1));
    }

    #[test]
    fn largest_stored_id_exhausts_the_id_space() {
        let snapshot = BoardSnapshot::from_json(&format!(
            r#"{{"tasks": [{{"id": {}, "title": "a", "timeLimit": 1, "timeRemaining": 60,
                "status": "todo", "createdAt": 0}}]}}"#,
            u64::MAX
        ))
        .unwrap();
        assert!(matches!(
            snapshot.next_task_id(),
            Err(PersistenceError::IdSpaceExhausted(id)) if id == u64::MAX
        ));
    }

    #[test]
    fn malformed_text_is_an_error() {
        assert!(BoardSnapshot::from_json("not json").is_err());
        assert!(BoardSnapshot::from_json(r#"{"tasks": 5}"#).is_err());
    }
}
