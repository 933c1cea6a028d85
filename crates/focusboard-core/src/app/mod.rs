//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **Board**: タスクのライフサイクル制御（唯一の変更窓口）
//! - **BoardBuilder**: 構築とワイヤリング、snapshot の復元
//! - **TimerRegistry**: task id ごとの countdown 管理
//! - **PersistenceAdapter**: snapshot の読み書き
//! - **TickerLoop**: tokio の tick を Board に適用するループ

pub mod board;
pub mod builder;
pub mod config;
pub mod persistence;
pub mod ticker;
pub mod timers;

// 主要な型を再エクスポート
pub use self::board::{Board, TickOutcome, Transition};
pub use self::builder::{BoardBuilder, BuildError};
pub use self::config::{BoardConfig, ConfigError};
pub use self::persistence::PersistenceAdapter;
pub use self::ticker::{SharedBoard, TickerLoop, spawn_board};
pub use self::timers::{CountdownState, TimerRegistry};
