// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::{IntoIter, Vec};

/// Identity of one scheduled timer.
///
/// Ids increase monotonically per queue, so a later schedule always has a
/// larger id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer that reached its deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<K> {
    /// Id assigned when the timer was scheduled.
    pub id: TimerId,
    /// Key the timer was scheduled under.
    pub key: K,
    /// Deadline the timer was scheduled for.
    pub deadline: u64,
}

#[derive(Clone, Debug)]
struct Entry<K> {
    id: TimerId,
    key: K,
    deadline: u64,
}

/// Single-shot timers, at most one per key.
///
/// `K` only needs equality; the queue is a small `Vec` scanned linearly, sized
/// for a handful of concurrently pending timers.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    entries: Vec<Entry<K>>,
    next_id: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending deadline, if any.
    ///
    /// Hosts use this to schedule their next wake-up.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Cancels every pending timer, returning how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }
}

impl<K: PartialEq> TimerQueue<K> {
    /// Schedules a timer for `key` at `deadline`.
    ///
    /// Any timer already pending for `key` is cancelled first.
    pub fn schedule(&mut self, key: K, deadline: u64) -> TimerId {
        self.cancel(&key);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, key, deadline });
        id
    }

    /// Cancels the timer pending for `key`, returning its id.
    pub fn cancel(&mut self, key: &K) -> Option<TimerId> {
        let index = self.entries.iter().position(|e| e.key == *key)?;
        Some(self.entries.swap_remove(index).id)
    }

    /// Returns the id of the timer pending for `key`.
    #[must_use]
    pub fn pending(&self, key: &K) -> Option<TimerId> {
        self.entries.iter().find(|e| e.key == *key).map(|e| e.id)
    }

    /// Returns the deadline of the timer pending for `key`.
    #[must_use]
    pub fn deadline_of(&self, key: &K) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.key == *key)
            .map(|e| e.deadline)
    }

    /// Removes and returns every timer whose deadline is at or before `now`.
    ///
    /// Timers are yielded by deadline, ties broken by scheduling order.
    pub fn pop_expired(&mut self, now: u64) -> IntoIter<Expired<K>> {
        let mut fired = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                let e = self.entries.swap_remove(i);
                fired.push(Expired {
                    id: e.id,
                    key: e.key,
                    deadline: e.deadline,
                });
            } else {
                i += 1;
            }
        }
        fired.sort_by_key(|e| (e.deadline, e.id));
        fired.into_iter()
    }
}
