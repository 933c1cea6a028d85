//! TokioTickSource - tokio の interval で countdown を駆動する
//!
//! # 実装詳細
//! - countdown ごとに 1 つの tokio タスクを spawn し、周期ごとに Countdown を mpsc で送る
//! - CancelHandle::cancel でタスクを abort する
//! - 受け手（TickerLoop）が Board::tick に渡す。世代の古い tick は Board 側で無視される

use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::ports::{CancelHandle, Countdown, TickSource};

pub struct TokioTickSource {
    runtime: Handle,
    tx: mpsc::UnboundedSender<Countdown>,
    period: Duration,
}

impl TokioTickSource {
    pub fn new(runtime: Handle, period: Duration) -> (Self, mpsc::UnboundedReceiver<Countdown>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            runtime,
            tx,
            period,
        };
        (source, rx)
    }

    /// Bind to the runtime of the calling context.
    pub fn for_current_runtime(
        period: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Countdown>), TryCurrentError> {
        let runtime = Handle::try_current()?;
        Ok(Self::new(runtime, period))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickSource for TokioTickSource {
    fn arm(&self, countdown: Countdown) -> CancelHandle {
        let tx = self.tx.clone();
        let period = self.period;
        let join = self.runtime.spawn(async move {
            // first tick one period after arming
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(countdown).is_err() {
                    break;
                }
            }
        });
        CancelHandle::for_task(join.abort_handle())
    }
}
