//! Fixed-Window Temporal Smoother
//!
//! ## Overview
//!
//! Per-channel Kalman filtering removes sensor noise, but a single tick's
//! fused score still jumps with every arm swing. The smoother averages the
//! last N raw scores (N = 30 at 1 Hz = 30 seconds) before classification.
//!
//! Storage is a `heapless::HistoryBuffer`: fixed memory, O(1) push, the oldest
//! score is overwritten once the window is full.
//!
//! ```text
//! push(v31) on a full window:
//! [v1 v2 ... v30] → [v2 v3 ... v31]
//! smoothed() = mean(v2..v31), clamped to [0, 1]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use kinetrack_core::TemporalSmoother;
//!
//! let mut smoother: TemporalSmoother = TemporalSmoother::new();
//! smoother.push(0.2);
//! smoother.push(0.4);
//! assert!((smoother.smoothed() - 0.3).abs() < 1e-6);
//! ```

use heapless::HistoryBuffer;

use crate::constants::buffers::SMOOTHING_WINDOW_SIZE;

/// Sliding-window mean over the last `N` raw activity scores
pub struct TemporalSmoother<const N: usize = SMOOTHING_WINDOW_SIZE> {
    window: HistoryBuffer<f32, N>,
}

impl<const N: usize> TemporalSmoother<N> {
    /// Create an empty smoother
    pub const fn new() -> Self {
        Self {
            window: HistoryBuffer::new(),
        }
    }

    /// Append a score, evicting the oldest when full
    pub fn push(&mut self, value: f32) {
        self.window.write(value);
    }

    /// Mean of the window clamped to [0, 1]; 0 when empty
    pub fn smoothed(&self) -> f32 {
        let len = self.window.len();
        if len == 0 {
            return 0.0;
        }

        let sum: f32 = self.window.oldest_ordered().sum();
        (sum / len as f32).clamp(0.0, 1.0)
    }

    /// Scores currently held
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// True when no score has been pushed since the last reset
    pub fn is_empty(&self) -> bool {
        self.window.len() == 0
    }

    /// Window capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discard all scores
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

impl<const N: usize> Default for TemporalSmoother<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for TemporalSmoother<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TemporalSmoother")
            .field("len", &self.len())
            .field("capacity", &N)
            .field("smoothed", &self.smoothed())
            .finish()
    }
}
