//! EventSink の実装
//!
//! - RecordingEventSink: emit されたイベントをすべて保持する（テスト・デバッグ用）
//! - ChannelEventSink: tokio の mpsc で UI タスクへ転送する

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::domain::BoardEvent;
use crate::ports::EventSink;

/// clone は同じバッファを共有します。
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<BoardEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BoardEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Take and clear everything recorded so far.
    pub fn drain(&self) -> Vec<BoardEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Event kinds in emission order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events().iter().map(BoardEvent::kind).collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: &BoardEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Forwards events to a receiver owned by the presentation layer.
///
/// Sending never blocks; once the receiver is dropped events are discarded.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<BoardEvent>,
}

impl ChannelEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BoardEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: &BoardEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::trace!(kind = event.kind(), "event receiver dropped");
        }
    }
}
