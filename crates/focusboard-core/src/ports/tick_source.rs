//! TickSource port - countdown の駆動源
//!
//! Board は countdown を開始するたびに `arm()` を呼び、返ってきた CancelHandle を保持します。
//! 駆動源は周期ごとに Countdown（task id + generation）を Board に届けるだけで、
//! タスクのデータは持ちません。
//!
//! # 実装
//! - ManualTickSource: 何もしない（`Board::advance` で手動駆動する）
//! - TokioTickSource: tokio の interval（`impls` を参照）

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::AbortHandle;

use crate::domain::TaskId;

/// One armed countdown.
///
/// `generation` distinguishes successive countdowns of the same task so a
/// tick from a replaced or cancelled countdown can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Countdown {
    pub task_id: TaskId,
    pub generation: u64,
}

/// Idempotent cancellation handle for an armed countdown.
///
/// Clones share the same cancelled flag.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    abort: Option<AbortHandle>,
}

impl CancelHandle {
    /// Handle with nothing to abort (manual ticking).
    pub fn detached() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            abort: None,
        }
    }

    /// Handle that aborts a spawned tokio task on cancel.
    pub fn for_task(abort: AbortHandle) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            abort: Some(abort),
        }
    }

    /// Returns `true` only for the call that actually cancelled.
    pub fn cancel(&self) -> bool {
        let first = !self.cancelled.swap(true, Ordering::AcqRel);
        if first && let Some(abort) = &self.abort {
            abort.abort();
        }
        first
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// TickSource は countdown ごとに周期的な tick を発生させる
pub trait TickSource: Send + Sync {
    fn arm(&self, countdown: Countdown) -> CancelHandle;
}

/// Arms nothing; the host calls `Board::advance` / `Board::tick_task`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTickSource;

impl TickSource for ManualTickSource {
    fn arm(&self, _countdown: Countdown) -> CancelHandle {
        CancelHandle::detached()
    }
}
