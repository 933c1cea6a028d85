//! Domain model (ids, tasks, ledger, scoring, events).
//!
//! - ids / state / task / record: タスクとそのライフサイクルのデータ
//! - store: TaskStore（正本）
//! - snapshot: 永続化フォーマット
//! - score: Scoring Engine（純粋関数）
//! - view / events: 表示層へ渡すデータ

pub mod errors;
pub mod events;
pub mod ids;
pub mod record;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod task;
pub mod view;

pub use self::errors::{BoardError, PersistenceError, StoreError, ValidationError};
pub use self::events::BoardEvent;
pub use self::ids::{ParseTaskIdError, TaskId};
pub use self::record::CompletedTaskRecord;
pub use self::score::ScoreSummary;
pub use self::snapshot::BoardSnapshot;
pub use self::state::TaskStatus;
pub use self::store::TaskStore;
pub use self::task::{NewTask, Task};
pub use self::view::{TaskView, format_remaining};
