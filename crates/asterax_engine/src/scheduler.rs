//! Delayed task scheduling
//!
//! Replaces coroutine-style "wait, then resume" flows with explicit timers.
//! Each scheduled payload gets a `TaskId` that can cancel it before it fires.
//! Time is whatever the caller passes in (game seconds), so a fake clock or
//! a fixed-step loop drives it the same way as a real one.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a pending task
    pub struct TaskId;
}

#[derive(Debug)]
struct PendingTask<T> {
    due: f64,
    sequence: u64,
    payload: T,
}

/// Timer queue holding payloads until their due time
#[derive(Debug)]
pub struct Scheduler<T> {
    tasks: SlotMap<TaskId, PendingTask<T>>,
    next_sequence: u64,
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            next_sequence: 0,
        }
    }

    /// Schedule `payload` to become due `delay` seconds after `now`
    pub fn schedule(&mut self, now: f64, delay: f64, payload: T) -> TaskId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.tasks.insert(PendingTask {
            due: now + delay.max(0.0),
            sequence,
            payload,
        })
    }

    /// Cancel a pending task, returning whether it was still pending
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(id).is_some()
    }

    /// Whether `id` is still waiting to fire
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    /// Due time of a pending task
    pub fn due_time(&self, id: TaskId) -> Option<f64> {
        self.tasks.get(id).map(|task| task.due)
    }

    /// Remove and return every payload due at or before `now`
    ///
    /// Payloads come back ordered by due time, then by scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<T> {
        let mut due: Vec<(TaskId, f64, u64)> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.due <= now)
            .map(|(id, task)| (id, task.due, task.sequence))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        due.into_iter()
            .filter_map(|(id, _, _)| self.tasks.remove(id))
            .map(|task| task.payload)
            .collect()
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is pending
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every pending task (useful for state transitions)
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
