//! Task Queue
//!
//! Bounded FIFO hand-off between the expression processor and the workers.
//! Neither side ever waits: offering to a full queue hands the task straight
//! back (drop-on-full), and polling an empty queue returns `None`.
//! A capacity of zero is accepted and rejects every task.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::task::Task;

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug)]
pub struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
    capacity: usize,
    dropped: AtomicU64,
}

impl TaskQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            tasks: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY))),
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Appends `task` unless the queue is at capacity, in which case the
    /// task is returned to the caller and counted as dropped.
    pub fn try_push(&self, task: Task) -> Result<(), Task> {
        let mut tasks = self.lock();
        if tasks.len() >= self.capacity {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(task);
        }
        tasks.push_back(task);
        Ok(())
    }

    /// Removes the oldest task, if any.
    pub fn try_pop(&self) -> Option<Task> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tasks rejected because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    // The deque holds no invariant a panicking holder could break, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
