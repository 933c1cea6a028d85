//! FileKeyValueStore - キーごとに 1 ファイルで保存する
//!
//! `<dir>/<key>.json` に書き込みます。書き込みは一時ファイル + rename で行うので、
//! 途中で落ちても前回の内容か新しい内容のどちらかが残ります。

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::domain::StoreError;
use crate::ports::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// ディレクトリがなければ作成する
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names, so path separators and dot-only names are refused.
    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && !key.chars().all(|c| c == '.')
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(StoreError::Io {
                key: key.to_string(),
                source: io::Error::new(ErrorKind::InvalidInput, "key is not a valid file name"),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let io_err = |source: io::Error| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::open(dir.path().join("state")).unwrap();

        assert_eq!(store.get("todoAppData").unwrap(), None);
        store.set("todoAppData", r#"{"tasks":[]}"#).unwrap();
        assert_eq!(
            store.get("todoAppData").unwrap().as_deref(),
            Some(r#"{"tasks":[]}"#)
        );
        assert!(store.dir().join("todoAppData.json").exists());
        assert!(!store.dir().join("todoAppData.json.tmp").exists());

        store.remove("todoAppData").unwrap();
        store.remove("todoAppData").unwrap();
        assert_eq!(store.get("todoAppData").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::open(dir.path()).unwrap();

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("..").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn reopening_sees_previous_writes() {
        let dir = tempfile::tempdir().unwrap();
        FileKeyValueStore::open(dir.path())
            .unwrap()
            .set("k", "v")
            .unwrap();

        let reopened = FileKeyValueStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }
}
