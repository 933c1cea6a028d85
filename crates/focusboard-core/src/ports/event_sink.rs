//! EventSink port - 表示層への通知
//!
//! Board は状態が変わるたびに BoardEvent を emit します。
//! 表示層（DOM, TUI, ...）はこの trait を実装して購読します。
//!
//! # 実装
//! - NoopEventSink: 何もしない
//! - RecordingEventSink / ChannelEventSink: `impls` を参照

use crate::domain::BoardEvent;

/// EventSink はドメインイベントを受け取る
///
/// emit は同期・非ブロッキングであること（tick の途中で呼ばれる）。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &BoardEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &BoardEvent) {}
}
