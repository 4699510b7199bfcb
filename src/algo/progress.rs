//! Progress reporting for long simplification runs.
//!
//! # Example
//!
//! ```
//! use pare::algo::Progress;
//!
//! let progress = Progress::new(|current, total, message| {
//!     eprintln!("[{}/{}] {}", current, total, message);
//! })
//! .with_stride(1000);
//! # let _ = progress;
//! ```

/// A progress callback invoked while a long operation runs.
///
/// The callback receives:
/// - `current`: Steps completed so far
/// - `total`: Upper bound on the number of steps
/// - `message`: Description of the current phase
///
/// A contraction loop can run millions of steps, so [`tick`](Self::tick)
/// only forwards every `stride`-th step.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
    stride: usize,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
            stride: 1,
        }
    }

    /// Forward only every `stride`-th tick. A stride of 0 is treated as 1.
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride.max(1);
        self
    }

    /// Report progress unconditionally.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Report progress if `current` falls on the stride or completes `total`.
    #[inline]
    pub fn tick(&self, current: usize, total: usize, message: &str) {
        if current % self.stride == 0 || current >= total {
            self.report(current, total, message);
        }
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_tick_respects_stride() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let progress = Progress::new(move |_, _, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .with_stride(10);

        for i in 1..=25 {
            progress.tick(i, 25, "contracting");
        }
        // Steps 10, 20 and the final step 25.
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_zero_stride_reports_everything() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let progress = Progress::new(move |_, _, _| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .with_stride(0);

        for i in 0..5 {
            progress.tick(i, 100, "contracting");
        }
        assert_eq!(calls.load(Ordering::Relaxed), 5);
    }
}
