#![forbid(unsafe_code)]

//! One-shot timers.
//!
//! [`TimerQueue`] fires tasks in deadline order; tasks sharing a deadline fire
//! in the order they were scheduled, matching how a browser drains
//! `setTimeout` callbacks. There is no cancellation: once scheduled, a task
//! always comes back to the host, which must tolerate it being stale.

use core::time::Duration;
use std::collections::VecDeque;

use crate::clock::DeterministicClock;
use crate::deferred::note_scheduled;

/// Deferred execution seam implemented by every host.
pub trait Scheduler<T> {
    /// Run `task` once, `delay` from now.
    fn schedule(&mut self, delay: Duration, task: T);
}

#[derive(Debug, Clone)]
struct Entry<T> {
    due: Duration,
    task: T,
}

/// Host-driven timer queue over a [`DeterministicClock`].
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    clock: DeterministicClock,
    entries: VecDeque<Entry<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: DeterministicClock::new(),
            entries: VecDeque::new(),
        }
    }

    /// Current time of the underlying clock.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.front().map(|e| e.due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        if self.entries.front()?.due > until {
            return None;
        }
        let entry = self.entries.pop_front()?;
        self.clock.set(entry.due);
        Some(entry.task)
    }

    /// Advance by `dt`, handing every task that comes due to `run`.
    ///
    /// `run` receives the queue, so tasks may schedule follow-ups; follow-ups
    /// that fall inside the window fire in the same call. Returns the number
    /// of tasks run.
    pub fn advance_with<F>(&mut self, dt: Duration, mut run: F) -> usize
    where
        F: FnMut(&mut Self, T),
    {
        let until = self.clock.now().saturating_add(dt);
        let mut ran = 0;
        while let Some(task) = self.pop_due(until) {
            run(self, task);
            ran += 1;
        }
        self.clock.set(until);
        ran
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, delay: Duration, task: T) {
        let due = self.clock.now().saturating_add(delay);
        let idx = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(idx, Entry { due, task });
        note_scheduled();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_in_deadline_then_insertion_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(30), "c");
        q.schedule(ms(10), "a");
        q.schedule(ms(30), "d");
        q.schedule(ms(10), "b");

        let mut fired = Vec::new();
        let ran = q.advance_with(ms(100), |_, t| fired.push(t));
        assert_eq!(ran, 4);
        assert_eq!(fired, vec!["a", "b", "c", "d"]);
        assert_eq!(q.now(), ms(100));
        assert!(q.is_empty());
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(ms(10), 1);
        assert_eq!(q.advance_with(ms(9), |_, _| {}), 0);
        assert_eq!(q.next_deadline(), Some(ms(10)));
        assert_eq!(q.advance_with(ms(1), |_, _| {}), 1);
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn follow_ups_inside_window_fire_in_same_advance() {
        let mut q = TimerQueue::new();
        q.schedule(ms(5000), 0u32);
        let mut seen = Vec::new();
        q.advance_with(ms(5300), |q, stage| {
            seen.push((q.now(), stage));
            if stage == 0 {
                q.schedule(ms(300), 1);
            }
        });
        assert_eq!(seen, vec![(ms(5000), 0), (ms(5300), 1)]);
    }

    #[test]
    fn follow_ups_outside_window_wait() {
        let mut q = TimerQueue::new();
        q.schedule(ms(10), 0u32);
        q.advance_with(ms(10), |q, _| q.schedule(ms(300), 1));
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(ms(310)));
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut q = TimerQueue::new();
        q.schedule(Duration::ZERO, ());
        assert_eq!(q.advance_with(Duration::ZERO, |_, _| {}), 1);
    }
}
