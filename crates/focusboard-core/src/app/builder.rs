//! BoardBuilder - Board の構築とワイヤリング
//!
//! # 起動時の流れ
//! 1. 設定を検証（不正なら BuildError、Fail-fast）
//! 2. 保存先から snapshot を読む（なければ / 壊れていれば空の状態）
//! 3. 全タスクを TimerRegistry に登録し、`doing` のタスクは countdown を再開
//! 4. BoardLoaded を emit
//!
//! 差し替えなかった port には既定値が入ります:
//! InMemoryKeyValueStore / NoopEventSink / SystemClock / ManualTickSource

use std::sync::Arc;

use tokio::runtime::TryCurrentError;

use crate::app::board::Board;
use crate::app::config::{BoardConfig, ConfigError};
use crate::app::persistence::PersistenceAdapter;
use crate::app::timers::TimerRegistry;
use crate::domain::TaskStore;
use crate::impls::InMemoryKeyValueStore;
use crate::ports::{
    Clock, EventSink, KeyValueStore, ManualTickSource, NoopEventSink, SystemClock, TickSource,
};

/// BoardBuilder は Board を構築
///
/// # 使用例
/// ```ignore
/// let board = BoardBuilder::new()
///     .config(BoardConfig::default())
///     .store(FileKeyValueStore::open("./data")?)
///     .sink(sink)
///     .build()?;
/// ```
pub struct BoardBuilder {
    config: BoardConfig,
    store: Option<Box<dyn KeyValueStore>>,
    sink: Option<Arc<dyn EventSink>>,
    clock: Option<Arc<dyn Clock>>,
    ticks: Option<Box<dyn TickSource>>,
}

/// BuildError は Board 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid board config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("countdowns need a tokio runtime: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self {
            config: BoardConfig::default(),
            store: None,
            sink: None,
            clock: None,
            ticks: None,
        }
    }

    pub fn config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config_ref(&self) -> &BoardConfig {
        &self.config
    }

    /// Where snapshots are read from and written to.
    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// What drives countdowns. Without one, ticks only happen through
    /// [`Board::tick_task`] and [`Board::advance`].
    pub fn ticks(mut self, ticks: impl TickSource + 'static) -> Self {
        self.ticks = Some(Box::new(ticks));
        self
    }

    pub fn build(self) -> Result<Board, BuildError> {
        self.config.validate()?;

        let kv = self
            .store
            .unwrap_or_else(|| Box::new(InMemoryKeyValueStore::new()));
        let sink = self.sink.unwrap_or_else(|| Arc::new(NoopEventSink));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ticks = self.ticks.unwrap_or_else(|| Box::new(ManualTickSource));

        let persistence = PersistenceAdapter::new(kv, self.config.storage_key.clone());
        let store = TaskStore::from_snapshot(persistence.load()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "snapshot unusable, starting empty");
            TaskStore::new()
        });

        let mut board = Board::assemble(
            store,
            TimerRegistry::new(ticks),
            persistence,
            sink,
            clock,
            self.config,
        );
        board.resume();
        Ok(board)
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::timers::CountdownState;
    use crate::domain::{BoardEvent, TaskId, TaskStatus};
    use crate::impls::RecordingEventSink;

    const DOING_TASK: &str = r#"{
        "tasks": [
            {"id": 4, "title": "resume me", "timeLimit": 2, "timeRemaining": 45, "status": "doing",
             "createdAt": 1700000000000, "startedAt": 1700000001000, "completedAt": null},
            {"id": 5, "title": "out of time", "timeLimit": 1, "timeRemaining": 0, "status": "doing",
             "createdAt": 1700000000000, "startedAt": 1700000001000, "completedAt": null}
        ],
        "completedTasks": [],
        "taskIdCounter": 6
    }"#;

    #[test]
    fn defaults_build_an_empty_board() {
        let board = BoardBuilder::new().build().unwrap();
        assert!(board.tasks().is_empty());
        assert_eq!(board.config(), &BoardConfig::default());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = BoardConfig {
            tick_interval_ms: 0,
            ..BoardConfig::default()
        };
        let result = BoardBuilder::new().config(config).build();
        assert!(matches!(
            result,
            Err(BuildError::InvalidConfig(ConfigError::ZeroTickInterval))
        ));
    }

    #[test]
    fn loaded_board_is_announced() {
        let sink = RecordingEventSink::new();
        let store = InMemoryKeyValueStore::with_entry("todoAppData", DOING_TASK);

        let board = BoardBuilder::new().store(store).sink(sink.clone()).build().unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        let BoardEvent::BoardLoaded { tasks, .. } = &events[0] else {
            panic!("expected BoardLoaded, got {:?}", events[0]);
        };
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].remaining, "0:45");
        assert!(tasks[0].urgent);
        assert_eq!(board.tasks()[0].status, TaskStatus::Doing);
    }

    #[test]
    fn only_doing_tasks_with_time_left_resume() {
        let store = InMemoryKeyValueStore::with_entry("todoAppData", DOING_TASK);
        let board = BoardBuilder::new().store(store).build().unwrap();

        assert_eq!(
            board.countdown_state(TaskId::new(4)),
            Some(CountdownState::Running)
        );
        assert_eq!(
            board.countdown_state(TaskId::new(5)),
            Some(CountdownState::Inert)
        );
    }

    #[test]
    fn snapshot_without_free_ids_builds_empty() {
        let text = format!(
            r#"{{"tasks": [{{"id": {}, "title": "last", "timeLimit": 1, "timeRemaining": 60,
                "status": "doing", "createdAt": 0}}], "taskIdCounter": 1}}"#,
            u64::MAX
        );
        let store = InMemoryKeyValueStore::with_entry("todoAppData", &text);

        let mut board = BoardBuilder::new().store(store).build().unwrap();

        assert!(board.tasks().is_empty());
        assert_eq!(board.create_task("a", 1).unwrap().id, TaskId::new(1));
    }

    #[test]
    fn storage_key_selects_the_slot() {
        let store = InMemoryKeyValueStore::with_entry("other", DOING_TASK);
        let config = BoardConfig {
            storage_key: "other".to_string(),
            ..BoardConfig::default()
        };

        let board = BoardBuilder::new().config(config).store(store.clone()).build().unwrap();
        assert_eq!(board.tasks().len(), 2);

        let board = BoardBuilder::new().store(store).build().unwrap();
        assert!(board.tasks().is_empty());
    }
}
