//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! Board（コア）は外部の協調者にこれらの trait 越しにだけ触れます。
//!
//! - Clock: 時刻
//! - KeyValueStore: 永続化トランスポート
//! - EventSink: 表示層への通知
//! - TickSource: countdown の駆動源

pub mod clock;
pub mod event_sink;
pub mod kv_store;
pub mod tick_source;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::{EventSink, NoopEventSink};
pub use self::kv_store::KeyValueStore;
pub use self::tick_source::{CancelHandle, Countdown, ManualTickSource, TickSource};
