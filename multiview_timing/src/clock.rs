// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cell::Cell;

/// A source of monotonic time in milliseconds.
///
/// The origin is arbitrary; only differences between readings matter.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_millis(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

/// A clock that only moves when told to.
///
/// Uses interior mutability so it can be shared by reference between the code
/// under test and the test driving it.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Creates a clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    /// Creates a clock at the given time.
    #[must_use]
    pub const fn starting_at(millis: u64) -> Self {
        Self {
            now: Cell::new(millis),
        }
    }

    /// Moves the clock forward by `millis`.
    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    /// Sets the clock to an absolute time.
    ///
    /// Moving backwards is ignored; the clock is monotonic.
    pub fn set(&self, millis: u64) {
        if millis > self.now.get() {
            self.now.set(millis);
        }
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

/// Monotonic wall clock measured from its creation.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl SystemClock {
    /// Creates a clock whose origin is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
