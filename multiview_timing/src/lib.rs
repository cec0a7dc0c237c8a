// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiview Timing: keyed single-shot timers driven by an injectable clock.
//!
//! UI hosts differ in how they schedule work (`setTimeout`, an event-loop
//! timer, a frame callback). This crate does not schedule anything itself.
//! Instead, [`TimerQueue`] records deadlines in milliseconds on a host-defined
//! timeline, and the host calls [`TimerQueue::pop_expired`] whenever it wakes
//! up, using [`TimerQueue::next_deadline`] to decide when that should be.
//!
//! Timers are keyed: at most one timer is pending per key, and scheduling a
//! key again replaces its previous timer. This is the "cancel before restart"
//! discipline a per-item heuristic needs so that a stale timer can never fire
//! after a newer one was started.
//!
//! Time comes from a [`Clock`]. [`ManualClock`] is advanced by hand, which makes
//! timer-driven state machines fully deterministic under test. With the `std`
//! feature, [`SystemClock`] reads a monotonic wall clock.
//!
//! ## Minimal example
//!
//! ```rust
//! use multiview_timing::{Clock, ManualClock, TimerQueue};
//!
//! let clock = ManualClock::new();
//! let mut timers = TimerQueue::new();
//!
//! timers.schedule("a", clock.now_millis() + 100);
//! timers.schedule("b", clock.now_millis() + 50);
//! // Restarting "a" cancels its first timer.
//! clock.advance(10);
//! timers.schedule("a", clock.now_millis() + 200);
//!
//! clock.advance(100);
//! let fired: Vec<_> = timers.pop_expired(clock.now_millis()).map(|t| t.key).collect();
//! assert_eq!(fired, ["b"]);
//!
//! clock.advance(100);
//! let fired: Vec<_> = timers.pop_expired(clock.now_millis()).map(|t| t.key).collect();
//! assert_eq!(fired, ["a"]);
//! assert!(timers.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clock;
mod queue;

#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use queue::{Expired, TimerId, TimerQueue};
