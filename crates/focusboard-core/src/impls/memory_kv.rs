//! InMemoryKeyValueStore - 開発・テスト用の保存先
//!
//! # 実装詳細
//! - `Arc<Mutex<HashMap<String, String>>>` で保持
//! - clone は同じマップを共有する（Board に渡した後もテストから中身を覗ける）

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::StoreError;
use crate::ports::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を入れた状態で作成
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn clones_share_entries() {
        let mut store = InMemoryKeyValueStore::new();
        let observer = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(observer.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn with_entry_preloads() {
        let store = InMemoryKeyValueStore::with_entry("todoAppData", "{}");
        assert_eq!(store.get("todoAppData").unwrap().as_deref(), Some("{}"));
    }
}
