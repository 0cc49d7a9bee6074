//! Injected time sources
//!
//! Intersection reads time through `Clock` so tests can pin it.

use std::time::Instant;

/// A monotonic source of seconds
pub trait Clock {
    fn now(&self) -> f32;
}

/// Always returns the same time
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedClock(pub f32);

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> f32 {
        self.0
    }
}

/// Seconds elapsed since construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}
