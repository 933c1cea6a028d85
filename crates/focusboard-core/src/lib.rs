//! focusboard-core
//!
//! Time-boxed kanban board: tasks move through `todo -> doing -> done`,
//! each with a per-second countdown while in `doing`. Completions feed a
//! productivity score, and the whole board persists as one JSON snapshot.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, store, snapshot, score, view, events, errors）
//! - **ports**: 抽象化レイヤー（Clock, KeyValueStore, EventSink, TickSource）
//! - **impls**: ports の実装（in-memory / file の保存先, tokio の tick 源, event sink）
//! - **app**: Board（ライフサイクル制御）, builder, 設定, 永続化, timer 管理, ticker loop
//! - **observability**: ログ初期化と件数ビュー

pub mod app;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
