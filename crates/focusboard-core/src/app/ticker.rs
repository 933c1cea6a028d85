//! TickerLoop - TokioTickSource からの tick を Board に適用する
//!
//! Board は `Arc<tokio::sync::Mutex<_>>` で共有します。
//! ロックは 1 tick の適用の間だけ保持し、await を跨がない。

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;

use crate::app::board::Board;
use crate::app::builder::{BoardBuilder, BuildError};
use crate::impls::TokioTickSource;
use crate::ports::Countdown;

pub type SharedBoard = Arc<Mutex<Board>>;

/// Ticker handle.
/// - `request_shutdown()` でループを止める
/// - countdown の tokio タスク自体は Board（TimerRegistry）が drop 時に止める
pub struct TickerLoop {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TickerLoop {
    pub fn spawn(board: SharedBoard, ticks: mpsc::UnboundedReceiver<Countdown>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(tick_loop(board, ticks, shutdown_rx));
        Self { shutdown_tx, join }
    }

    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    /// Shutdown and wait for the loop to exit.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, "ticker loop ended abnormally");
        }
    }
}

async fn tick_loop(
    board: SharedBoard,
    mut ticks: mpsc::UnboundedReceiver<Countdown>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        let countdown = tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                continue;
            }
            countdown = ticks.recv() => countdown,
        };
        let Some(countdown) = countdown else {
            tracing::debug!("tick source closed");
            break;
        };

        let outcome = board.lock().await.tick(countdown);
        tracing::trace!(task_id = %countdown.task_id, ?outcome, "tick applied");
    }
    tracing::debug!("ticker loop stopped");
}

/// Build a board whose countdowns run on the current tokio runtime, one tick
/// per `tick_interval_ms`, and start the loop that applies them.
pub fn spawn_board(builder: BoardBuilder) -> Result<(SharedBoard, TickerLoop), BuildError> {
    builder.config_ref().validate()?;
    let period = builder.config_ref().tick_interval();
    let (source, ticks) = TokioTickSource::for_current_runtime(period)?;

    let board = builder.ticks(source).build()?;
    let board = Arc::new(Mutex::new(board));
    let ticker = TickerLoop::spawn(Arc::clone(&board), ticks);
    Ok((board, ticker))
}
