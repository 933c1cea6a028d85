//! Observability - ログ初期化と件数ビュー

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::domain::{Task, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCounts {
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
    /// Ledger length (survives deletes).
    pub completed: usize,
    pub active_countdowns: usize,
}

impl BoardCounts {
    pub fn tally(tasks: &[Task], completed: usize, active_countdowns: usize) -> Self {
        let mut counts = Self {
            completed,
            active_countdowns,
            ..Self::default()
        };
        for task in tasks {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::Doing => counts.doing += 1,
                TaskStatus::Done => counts.done += 1,
            }
        }
        counts
    }
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`. Returns `false` if a global subscriber already exists.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
