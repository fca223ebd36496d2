//! Lock-free rotation counters for fair tie-breaking.

use std::sync::atomic::{AtomicU32, Ordering};

/// A monotonic counter that varies the starting offset of candidate scans.
///
/// Each scan over a candidate set of size > 1 advances the counter with
/// fetch-and-add semantics, so repeated calls start at successive offsets
/// and ties are broken fairly over time instead of always favoring the same
/// candidate. The counter is created once per selection context, lives for
/// the engine's lifetime, wraps silently on overflow, and is never reset.
#[derive(Debug, Default)]
pub struct RotationCounter(AtomicU32);

impl RotationCounter {
    /// Create a counter starting at zero.
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// The starting offset for a scan over `len` candidates.
    ///
    /// Returns 0 without advancing the counter when `len <= 1`.
    pub fn next_offset(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.0.fetch_add(1, Ordering::Relaxed) as usize % len
    }
}
