//! Request counter with rollover.
//!
//! The counter is bumped *before* the limit check, so the request that sees
//! `max + 1` is the one that triggers the overflow and resets it to zero.
//! Increment, check, and reset happen in one `fetch_update`, so concurrent
//! visits never lose an update.

use std::sync::atomic::{AtomicU32, Ordering};

/// Outcome of one visit to the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Served normally; `number` is the 1-based request number.
    Served { number: u32 },
    /// Limit exceeded; `observed` is the post-increment value (`max + 1`).
    /// The counter is already back at zero.
    Overflow { observed: u32 },
}

impl Visit {
    /// Counter value as seen right after the increment.
    pub fn observed(&self) -> u32 {
        match *self {
            Visit::Served { number } => number,
            Visit::Overflow { observed } => observed,
        }
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, Visit::Overflow { .. })
    }
}

#[derive(Debug)]
pub struct RequestCounter {
    value: AtomicU32,
    max: u32,
}

impl RequestCounter {
    /// `max` is clamped to `u32::MAX - 1` so the overflow value `max + 1`
    /// always fits.
    pub fn new(max: u32) -> Self {
        Self {
            value: AtomicU32::new(0),
            max: max.min(u32::MAX - 1),
        }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Current value without mutation.
    pub fn current(&self) -> u32 {
        self.value.load(Ordering::Acquire)
    }

    /// Increment, and roll over to zero once the limit is exceeded.
    pub fn visit(&self) -> Visit {
        let max = self.max;
        let prev = match self.value.fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
            Some(match v.checked_add(1) {
                Some(next) if next <= max => next,
                _ => 0,
            })
        }) {
            Ok(v) | Err(v) => v,
        };

        match prev.checked_add(1) {
            Some(number) if number <= max => Visit::Served { number },
            _ => Visit::Overflow {
                observed: prev.saturating_add(1),
            },
        }
    }

    /// Force the counter back to zero. Returns the new value.
    pub fn reset(&self) -> u32 {
        self.value.store(0, Ordering::Release);
        0
    }
}
