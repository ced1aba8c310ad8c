//! Generation counters for cancelling work that spans a suspend point.
//!
//! A `LoadToken` is taken before awaiting and checked after resuming. Any
//! call to [`LoadGenerations::invalidate`] in between makes the token stale,
//! and the resumed work must drop its result instead of mutating state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default)]
pub struct LoadGenerations {
    current: Arc<AtomicU64>,
}

/// Snapshot of a [`LoadGenerations`] counter.
#[derive(Debug, Clone)]
pub struct LoadToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    pub fn token(&self) -> LoadToken {
        LoadToken {
            generation: self.generation(),
            current: Arc::clone(&self.current),
        }
    }

    /// Makes every outstanding token stale. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        self.current.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }
}

impl LoadToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        !self.is_current()
    }
}
