//! TaskStore - タスクと完了 ledger の正本（source of truth）
//!
//! # 不変条件
//! - id は単調増加で再利用しない
//! - ledger は追記のみ（削除されたタスクの記録も残る）
//! - タスクの並び順は作成順
//!
//! Timer Engine は task id しか持たず、データはすべてここが所有します。

use chrono::{DateTime, Utc};

use super::{BoardError, BoardSnapshot, CompletedTaskRecord, NewTask, PersistenceError, Task, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    completed: Vec<CompletedTaskRecord>,
    next_id: TaskId,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            completed: Vec::new(),
            next_id: TaskId::new(1),
        }
    }

    /// Rebuild from a persisted snapshot.
    ///
    /// The counter is raised past every known id so a stale counter can never
    /// cause an id to be handed out twice.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Result<Self, PersistenceError> {
        let next_id = snapshot.next_task_id()?;
        Ok(Self {
            tasks: snapshot.tasks,
            completed: snapshot.completed_tasks,
            next_id,
        })
    }

    pub fn to_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tasks: self.tasks.clone(),
            completed_tasks: self.completed.clone(),
            task_id_counter: self.next_id.get(),
        }
    }

    /// Allocate the next id and append a new `todo` task.
    ///
    /// `u64::MAX` is never handed out: once the counter reaches it, creation
    /// fails without touching the store.
    pub fn insert(&mut self, draft: NewTask, now: DateTime<Utc>) -> Result<&Task, BoardError> {
        let id = self.next_id;
        self.next_id = id.next().ok_or(BoardError::IdSpaceExhausted)?;
        let index = self.tasks.len();
        self.tasks.push(Task::new(id, draft, now));
        Ok(&self.tasks[index])
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Append to the ledger.
    pub fn record_completion(&mut self, record: CompletedTaskRecord) {
        self.completed.push(record);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn completed(&self) -> &[CompletedTaskRecord] {
        &self.completed
    }

    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
