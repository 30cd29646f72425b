//! Deferred-callback scheduling behind a cancellable-timer interface.
//!
//! The controller never reads a wall clock. It hands payloads to a
//! [`Scheduler`]; the browser build backs that with `setTimeout`, while tests
//! and the QA tester use [`VirtualScheduler`] and advance time explicitly.
use std::collections::{BTreeMap, HashMap};

/// Opaque identifier for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Schedule payloads to be delivered after a delay.
pub trait Scheduler<T> {
    /// Queue `task` to fire after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32, task: T) -> TimerHandle;

    /// Cancel a pending task. Returns `false` if it already fired or was
    /// never scheduled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// Deterministic scheduler driven by a virtual millisecond clock.
///
/// Tasks fire in due-time order; ties fire in scheduling order.
#[derive(Debug, Clone)]
pub struct VirtualScheduler<T> {
    now_ms: u64,
    next_seq: u64,
    queue: BTreeMap<(u64, u64), T>,
    due_by_handle: HashMap<TimerHandle, u64>,
}

impl<T> Default for VirtualScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VirtualScheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            due_by_handle: HashMap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of tasks still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest pending task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<T> {
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due > until_ms {
            return None;
        }
        let task = self.queue.remove(&(due, seq))?;
        self.due_by_handle.remove(&TimerHandle(seq));
        self.now_ms = self.now_ms.max(due);
        Some(task)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Drain every task due by `until_ms` in order, then park the clock there.
    /// Only for callers that do not reschedule from inside a task.
    pub fn drain_until(&mut self, until_ms: u64) -> Vec<T> {
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(until_ms) {
            fired.push(task);
        }
        self.set_now(until_ms);
        fired
    }
}

impl<T> Scheduler<T> for VirtualScheduler<T> {
    fn schedule(&mut self, delay_ms: u32, task: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now_ms + u64::from(delay_ms);
        self.queue.insert((due, seq), task);
        let handle = TimerHandle(seq);
        self.due_by_handle.insert(handle, due);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.due_by_handle
            .remove(&handle)
            .and_then(|due| self.queue.remove(&(due, handle.0)))
            .is_some()
    }
}
