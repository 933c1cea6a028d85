//! PersistenceAdapter - snapshot と KeyValueStore の橋渡し
//!
//! # 方針
//! - load: キーがなければ空の状態。壊れた snapshot や I/O 失敗も空の状態にフォールバックする
//!   （パースできても task id を使い切った snapshot は壊れたものとして扱う）
//! - save: 失敗しても呼び出し元には返さない（warn ログのみ）
//!
//! どちらもプロセスを止めるような失敗モードを持ちません。

use crate::domain::{BoardSnapshot, PersistenceError};
use crate::ports::KeyValueStore;

pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl PersistenceAdapter {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Strict read: `Ok(None)` when the slot is empty.
    pub fn try_load(&self) -> Result<Option<BoardSnapshot>, PersistenceError> {
        let Some(text) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let snapshot = BoardSnapshot::from_json(&text)?;
        snapshot.next_task_id()?;
        Ok(Some(snapshot))
    }

    /// Read with recovery: any failure yields the empty snapshot.
    pub fn load(&self) -> BoardSnapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => {
                tracing::debug!(
                    key = %self.key,
                    tasks = snapshot.tasks.len(),
                    completed = snapshot.completed_tasks.len(),
                    "snapshot loaded"
                );
                snapshot
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "no snapshot, starting empty");
                BoardSnapshot::default()
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "snapshot unreadable, starting empty");
                BoardSnapshot::default()
            }
        }
    }

    pub fn try_save(&mut self, snapshot: &BoardSnapshot) -> Result<(), PersistenceError> {
        let text = snapshot.to_json()?;
        self.store.set(&self.key, &text)?;
        Ok(())
    }

    /// Write; failures are logged and swallowed.
    pub fn save(&mut self, snapshot: &BoardSnapshot) -> bool {
        match self.try_save(snapshot) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "snapshot save failed");
                false
            }
        }
    }
}
