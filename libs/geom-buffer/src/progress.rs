//! # Progress Counter
//!
//! Coarse, best-effort progress value in `0..=PROGRESS_MAX` that a worker
//! thread updates while another thread polls it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use config::constants::PROGRESS_MAX;

/// Shared progress handle.
///
/// Clones refer to the same counter. Relaxed ordering only; the value is a
/// hint for display, not a synchronization point.
///
/// # Example
///
/// ```rust
/// use geom_buffer::Progress;
///
/// let progress = Progress::new();
/// let observer = progress.clone();
/// progress.set_fraction(1, 4);
/// assert_eq!(observer.get(), 25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Progress(Arc<AtomicU32>);

impl Progress {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Sets the value, clamped to `PROGRESS_MAX`.
    #[inline]
    pub fn set(&self, value: u32) {
        self.0.store(value.min(PROGRESS_MAX), Ordering::Relaxed);
    }

    /// Sets the value from `done` out of `total` steps.
    pub fn set_fraction(&self, done: usize, total: usize) {
        if total == 0 {
            self.set(PROGRESS_MAX);
        } else {
            let value = (done.min(total) as u64 * PROGRESS_MAX as u64) / total as u64;
            self.set(value as u32);
        }
    }

    /// Resets to zero.
    #[inline]
    pub fn reset(&self) {
        self.set(0);
    }
}
