//! TimerRegistry - task id ごとの countdown 管理
//!
//! # 不変条件
//! - 1 タスクにつき走っている countdown は高々 1 つ
//! - 開始し直すと前の countdown を先にキャンセルする
//! - キャンセルは冪等。キャンセル済み countdown の tick は二度と効かない
//!   （generation が一致しない tick は stale として捨てる）
//!
//! データは task id と CancelHandle だけ。タスク本体は TaskStore が持つ。

use std::collections::HashMap;

use crate::domain::TaskId;
use crate::ports::{CancelHandle, Countdown, TickSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Registered, not ticking (task not in `doing`).
    Inert,
    Running,
}

enum Slot {
    Inert,
    Running {
        generation: u64,
        handle: CancelHandle,
    },
}

impl Slot {
    /// Cancel a running countdown, leaving the slot inert.
    fn stop(&mut self) -> bool {
        match std::mem::replace(self, Slot::Inert) {
            Slot::Running { handle, .. } => {
                handle.cancel();
                true
            }
            Slot::Inert => false,
        }
    }
}

pub struct TimerRegistry {
    source: Box<dyn TickSource>,
    slots: HashMap<TaskId, Slot>,
    next_generation: u64,
}

impl TimerRegistry {
    pub fn new(source: Box<dyn TickSource>) -> Self {
        Self {
            source,
            slots: HashMap::new(),
            next_generation: 1,
        }
    }

    /// Register an inert countdown; no-op if the id is already known.
    pub fn register(&mut self, task_id: TaskId) {
        self.slots.entry(task_id).or_insert(Slot::Inert);
    }

    /// (Re)start the countdown for `task_id`, cancelling any prior one first.
    pub fn start(&mut self, task_id: TaskId) -> Countdown {
        let slot = self.slots.entry(task_id).or_insert(Slot::Inert);
        slot.stop();

        let generation = self.next_generation;
        self.next_generation += 1;
        let countdown = Countdown {
            task_id,
            generation,
        };
        let handle = self.source.arm(countdown);
        *slot = Slot::Running { generation, handle };
        countdown
    }

    /// Stop a running countdown but keep the registration.
    /// Returns whether something was running.
    pub fn stop(&mut self, task_id: TaskId) -> bool {
        self.slots.get_mut(&task_id).is_some_and(Slot::stop)
    }

    /// Cancel and forget `task_id`. Idempotent.
    pub fn remove(&mut self, task_id: TaskId) -> bool {
        match self.slots.remove(&task_id) {
            Some(mut slot) => slot.stop(),
            None => false,
        }
    }

    /// The live countdown for `task_id`, if running.
    pub fn current(&self, task_id: TaskId) -> Option<Countdown> {
        match self.slots.get(&task_id)? {
            Slot::Running { generation, .. } => Some(Countdown {
                task_id,
                generation: *generation,
            }),
            Slot::Inert => None,
        }
    }

    /// `false` for ticks of cancelled or replaced countdowns.
    pub fn is_current(&self, countdown: Countdown) -> bool {
        self.current(countdown.task_id) == Some(countdown)
    }

    pub fn state(&self, task_id: TaskId) -> Option<CountdownState> {
        self.slots.get(&task_id).map(|slot| match slot {
            Slot::Inert => CountdownState::Inert,
            Slot::Running { .. } => CountdownState::Running,
        })
    }

    /// Running countdowns in ascending id order.
    pub fn running_ids(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = self
            .slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Running { .. }))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn running_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot, Slot::Running { .. }))
            .count()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        for slot in self.slots.values_mut() {
            slot.stop();
        }
        self.slots.clear();
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}
