//! Errors - エラー型と分類
//!
//! # 分類
//! - ValidationError: 入力不正。状態を変更する前に拒否する
//! - StoreError: KeyValueStore の I/O 失敗
//! - PersistenceError: snapshot の読み書き失敗（Persistence Adapter 内で回復する）
//! - BoardError: コントローラ API が返すエラー
//!
//! 存在しない task id への move/delete はエラーではなく no-op です。

use thiserror::Error;

/// ValidationError は createTask の入力不正
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("time limit must be a positive number of minutes, got {0}")]
    NonPositiveTimeLimit(i64),

    #[error("time limit is not a number: {0:?}")]
    NonNumericTimeLimit(String),

    #[error("time limit is too large: {0} minutes")]
    TimeLimitTooLarge(i64),
}

/// StoreError は永続化トランスポートの失敗
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store is unavailable: {0}")]
    Unavailable(String),
}

/// PersistenceError は snapshot の読み書き失敗
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("snapshot holds task id {0}, no ids are left after it")]
    IdSpaceExhausted(u64),
}

/// BoardError はコントローラ API のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no task ids left")]
    IdSpaceExhausted,
}
