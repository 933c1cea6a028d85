//! Board - タスクのライフサイクルを制御する
//!
//! TaskStore（データ）, TimerRegistry（countdown）, PersistenceAdapter（保存）,
//! EventSink（表示）を束ねます。状態を変更するのはこの型のメソッドだけです。
//!
//! # 変更操作ごとの流れ
//! 1. TaskStore / TimerRegistry を更新
//! 2. EventSink にイベントを emit
//! 3. snapshot を保存
//! 4. スコアを再計算して ScoreUpdated を emit
//!
//! 存在しない task id への move/delete は何もせず `None` を返します。

use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::app::config::BoardConfig;
use crate::app::persistence::PersistenceAdapter;
use crate::app::timers::{CountdownState, TimerRegistry};
use crate::domain::{
    BoardError, BoardEvent, BoardSnapshot, CompletedTaskRecord, NewTask, ScoreSummary, Task,
    TaskId, TaskStatus, TaskStore, TaskView,
};
use crate::observability::BoardCounts;
use crate::ports::{Clock, Countdown, EventSink};

/// What a `move_task` call did.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub task_id: TaskId,
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub time_expired: bool,
    /// Ledger entry appended by a `doing -> done` move.
    pub completed: Option<CompletedTaskRecord>,
}

/// Result of applying one countdown tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No live countdown matches (cancelled, replaced, or never started).
    Stale,
    /// The task is gone; its countdown has been cancelled.
    Cancelled,
    /// The task is not `doing`.
    Suspended,
    Ticked { remaining: u64, urgent: bool },
    /// Time ran out and the task was moved to `done`.
    Expired(Transition),
}

pub struct Board {
    store: TaskStore,
    timers: TimerRegistry,
    persistence: PersistenceAdapter,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    config: BoardConfig,
    score: ScoreSummary,
}

impl Board {
    pub(crate) fn assemble(
        store: TaskStore,
        timers: TimerRegistry,
        persistence: PersistenceAdapter,
        sink: Arc<dyn EventSink>,
        clock: Arc<dyn Clock>,
        config: BoardConfig,
    ) -> Self {
        let score = ScoreSummary::from_ledger(store.completed());
        Self {
            store,
            timers,
            persistence,
            sink,
            clock,
            config,
            score,
        }
    }

    /// Register every restored task with the timer engine and announce the
    /// loaded board. `doing` tasks with time left resume counting down.
    pub(crate) fn resume(&mut self) {
        let restored: Vec<(TaskId, bool)> = self
            .store
            .tasks()
            .iter()
            .map(|task| (task.id, task.status.is_active() && !task.is_expired()))
            .collect();
        for (task_id, running) in restored {
            if running {
                self.timers.start(task_id);
            } else {
                self.timers.register(task_id);
            }
        }
        info!(
            tasks = self.store.len(),
            completed = self.store.completed().len(),
            running = self.timers.running_count(),
            "board loaded"
        );
        self.emit(BoardEvent::BoardLoaded {
            tasks: self.views(),
            score: self.score,
        });
    }

    // ------------------------------------------------------------------
    // Lifecycle operations
    // ------------------------------------------------------------------

    /// Create a `todo` task with `time_limit_minutes` on the clock.
    pub fn create_task(&mut self, title: &str, time_limit_minutes: i64) -> Result<Task, BoardError> {
        let draft = NewTask::new(title, time_limit_minutes)?;
        self.insert(draft)
    }

    /// Same as [`Board::create_task`], with the minutes still as form text.
    pub fn create_task_from_form(&mut self, title: &str, raw_minutes: &str) -> Result<Task, BoardError> {
        let draft = NewTask::parse(title, raw_minutes)?;
        self.insert(draft)
    }

    fn insert(&mut self, draft: NewTask) -> Result<Task, BoardError> {
        let now = self.clock.now();
        let task = self.store.insert(draft, now)?.clone();
        self.timers.register(task.id);
        info!(task_id = %task.id, time_limit = task.time_limit, "task created");

        self.emit(BoardEvent::TaskCreated {
            view: self.view_of(&task),
        });
        self.commit();
        Ok(task)
    }

    /// Move a task to `new_status`.
    ///
    /// - `* -> doing`: stamps `started_at` once and (re)starts the countdown
    /// - `doing -> done`: stamps `completed_at` once, appends to the ledger
    /// - anything else: stops the countdown
    ///
    /// `time_expired` only labels the move as clock-driven.
    pub fn move_task(
        &mut self,
        task_id: TaskId,
        new_status: TaskStatus,
        time_expired: bool,
    ) -> Option<Transition> {
        let now = self.clock.now();
        let Some(task) = self.store.get_mut(task_id) else {
            debug!(task_id = %task_id, to = %new_status, "move ignored, unknown task");
            return None;
        };

        let from = task.status;
        task.status = new_status;
        let mut completed = None;
        if new_status == TaskStatus::Doing {
            task.started_at.get_or_insert(now);
        } else if from == TaskStatus::Doing && new_status == TaskStatus::Done {
            task.completed_at.get_or_insert(now);
            completed = Some(CompletedTaskRecord::capture(task));
        }
        let view = TaskView::of(task, self.config.urgent_threshold_secs);

        if new_status == TaskStatus::Doing {
            self.timers.start(task_id);
        } else {
            self.timers.stop(task_id);
        }
        if let Some(record) = &completed {
            self.store.record_completion(record.clone());
        }
        info!(task_id = %task_id, %from, to = %new_status, time_expired, "task moved");

        self.emit(BoardEvent::TaskMoved {
            view,
            from,
            time_expired,
        });
        self.commit();
        Some(Transition {
            task_id,
            from,
            to: new_status,
            time_expired,
            completed,
        })
    }

    /// Drop-gesture entry point: the id comes from the drag payload and the
    /// status from the drop-target container. Unparseable ids are ignored.
    pub fn drop_task(&mut self, raw_task_id: &str, container_id: &str) -> Option<Transition> {
        let task_id = match raw_task_id.parse::<TaskId>() {
            Ok(task_id) => task_id,
            Err(e) => {
                debug!(error = %e, "drop ignored");
                return None;
            }
        };
        let status = TaskStatus::from_container_id(container_id);
        self.move_task(task_id, status, false)
    }

    /// Remove a task and cancel its countdown. Ledger entries stay.
    pub fn delete_task(&mut self, task_id: TaskId) -> Option<Task> {
        let Some(task) = self.store.remove(task_id) else {
            debug!(task_id = %task_id, "delete ignored, unknown task");
            return None;
        };
        self.timers.remove(task_id);
        info!(task_id = %task_id, "task deleted");

        self.emit(BoardEvent::TaskDeleted { task_id });
        self.commit();
        Some(task)
    }

    // ------------------------------------------------------------------
    // Countdown
    // ------------------------------------------------------------------

    /// Apply one tick of `countdown`.
    pub fn tick(&mut self, countdown: Countdown) -> TickOutcome {
        if !self.timers.is_current(countdown) {
            trace!(task_id = %countdown.task_id, generation = countdown.generation, "stale tick");
            return TickOutcome::Stale;
        }
        let task_id = countdown.task_id;
        let threshold = self.config.urgent_threshold_secs;

        let Some(task) = self.store.get_mut(task_id) else {
            self.timers.remove(task_id);
            debug!(task_id = %task_id, "countdown cancelled, task gone");
            return TickOutcome::Cancelled;
        };
        if !task.status.is_active() {
            return TickOutcome::Suspended;
        }

        let remaining = task.tick_down();
        let urgent = task.is_urgent(threshold);
        let view = TaskView::of(task, threshold);
        debug!(task_id = %task_id, remaining, urgent, "tick");
        self.emit(BoardEvent::TimerTicked { view });

        if remaining > 0 {
            if self.config.persist_on_tick {
                self.persist();
            }
            return TickOutcome::Ticked { remaining, urgent };
        }

        info!(task_id = %task_id, "time is up");
        let outcome = match self.move_task(task_id, TaskStatus::Done, true) {
            Some(transition) => TickOutcome::Expired(transition),
            None => TickOutcome::Cancelled,
        };
        self.timers.stop(task_id);
        outcome
    }

    /// Tick the live countdown of `task_id`, if any.
    pub fn tick_task(&mut self, task_id: TaskId) -> TickOutcome {
        match self.timers.current(task_id) {
            Some(countdown) => self.tick(countdown),
            None => TickOutcome::Stale,
        }
    }

    /// Let `seconds` pass: every running countdown ticks once per second,
    /// in ascending id order. Returns the tasks that ran out of time.
    pub fn advance(&mut self, seconds: u32) -> Vec<Transition> {
        let mut expired = Vec::new();
        for _ in 0..seconds {
            for task_id in self.timers.running_ids() {
                if let TickOutcome::Expired(transition) = self.tick_task(task_id) {
                    expired.push(transition);
                }
            }
        }
        expired
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.store.get(task_id)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn completed_tasks(&self) -> &[CompletedTaskRecord] {
        self.store.completed()
    }

    pub fn score(&self) -> ScoreSummary {
        self.score
    }

    pub fn view(&self, task_id: TaskId) -> Option<TaskView> {
        self.task(task_id).map(|task| self.view_of(task))
    }

    /// Render requests for every live task, in creation order.
    pub fn views(&self) -> Vec<TaskView> {
        self.store
            .tasks()
            .iter()
            .map(|task| self.view_of(task))
            .collect()
    }

    pub fn countdown_state(&self, task_id: TaskId) -> Option<CountdownState> {
        self.timers.state(task_id)
    }

    pub fn counts(&self) -> BoardCounts {
        BoardCounts::tally(
            self.store.tasks(),
            self.store.completed().len(),
            self.timers.running_count(),
        )
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.store.to_snapshot()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn view_of(&self, task: &Task) -> TaskView {
        TaskView::of(task, self.config.urgent_threshold_secs)
    }

    fn emit(&self, event: BoardEvent) {
        self.sink.emit(&event);
    }

    fn persist(&mut self) {
        let snapshot = self.store.to_snapshot();
        self.persistence.save(&snapshot);
    }

    /// Persist, then recompute and publish the score.
    fn commit(&mut self) {
        self.persist();
        self.score = ScoreSummary::from_ledger(self.store.completed());
        self.emit(BoardEvent::ScoreUpdated { score: self.score });
    }
}
