//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryKeyValueStore**: テスト・組み込み用の保存先
//! - **FileKeyValueStore**: キーごとに 1 ファイルの保存先
//! - **RecordingEventSink / ChannelEventSink**: 表示層への通知
//! - **TokioTickSource**: tokio interval による countdown 駆動

pub mod file_kv;
pub mod memory_kv;
pub mod recording_sink;
pub mod tokio_ticks;

// 主要な型を再エクスポート
pub use self::file_kv::FileKeyValueStore;
pub use self::memory_kv::InMemoryKeyValueStore;
pub use self::recording_sink::{ChannelEventSink, RecordingEventSink};
pub use self::tokio_ticks::TokioTickSource;
