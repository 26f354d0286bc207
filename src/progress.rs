//! Progress reporting and cancellation support.
//!
//! This module provides [`ProgressCallback`] for monitoring a detection run,
//! [`CancellationToken`] for cooperative cancellation, and [`ProgressInfo`]
//! for progress snapshots.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use shotcut::{
//!     CancellationToken, DetectorOptions, ProgressCallback, ProgressInfo, ShotDetector,
//!     ShotcutError, VideoFile,
//! };
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if let Some(pct) = info.percentage {
//!             println!("[{:?}] {pct:.1}% complete", info.operation);
//!         }
//!     }
//! }
//!
//! let options = DetectorOptions::new().with_progress(Arc::new(PrintProgress));
//! let mut video = VideoFile::open("input.mp4")?;
//! let detection = ShotDetector::new(options).detect(&mut video)?;
//! # Ok::<(), ShotcutError>(())
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

/// The kind of work currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Decoding frames and computing their histograms.
    FeatureExtraction,
    /// Writing one key frame per shot.
    KeyFrameExport,
}

/// A snapshot of run progress.
///
/// Delivered to [`ProgressCallback::on_progress`] at a cadence controlled
/// by [`DetectorOptions::with_batch_size`](crate::DetectorOptions::with_batch_size).
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// How many items (frames or key frames) have been processed so far.
    pub current: u64,
    /// Total items expected, if known ahead of time.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the operation started.
    pub elapsed: Duration,
    /// Estimated time remaining, based on current throughput.
    pub estimated_remaining: Option<Duration>,
    /// Index of the frame most recently processed.
    pub current_frame: Option<usize>,
}

/// Trait for receiving progress updates.
///
/// Implementations must be [`Send`] and [`Sync`] so a configured detector can
/// be shared between threads running independent videos.
///
/// Progress callbacks are **infallible**: they observe but cannot halt the
/// run. Use [`CancellationToken`] for cooperative cancellation.
pub trait ProgressCallback: Send + Sync {
    /// Called at regular intervals during a run.
    fn on_progress(&self, info: &ProgressInfo);
}

/// Discards all progress notifications. Default when no callback is set.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Cooperative cancellation token backed by an [`AtomicBool`].
///
/// Clone this token and share it between threads; call
/// [`cancel`](CancellationToken::cancel) from any thread to stop the
/// associated run before its next decoded frame.
///
/// # Example
///
/// ```
/// use shotcut::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation.
    ///
    /// All clones of this token will observe the cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts processed items for one operation and reports every
/// `batch_size` items, plus once more on [`finish`](Self::finish).
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: Option<u64>,
    current: u64,
    batch_size: u64,
    last_frame: Option<usize>,
    started: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: Option<u64>,
        batch_size: u64,
    ) -> Self {
        Self {
            callback,
            operation,
            total,
            current: 0,
            batch_size: batch_size.max(1),
            last_frame: None,
            started: Instant::now(),
        }
    }

    pub(crate) fn advance(&mut self, frame_index: usize) {
        self.current += 1;
        self.last_frame = Some(frame_index);
        if self.current % self.batch_size == 0 {
            self.report();
        }
    }

    pub(crate) fn finish(&mut self) {
        self.report();
    }

    fn report(&self) {
        let elapsed = self.started.elapsed();
        // Container totals are estimates and may be exceeded.
        let total = self.total.filter(|&total| total > 0);
        let percentage =
            total.map(|total| (self.current as f32 / total as f32 * 100.0).min(100.0));
        let estimated_remaining = total.filter(|_| self.current > 0).and_then(|total| {
            let remaining = total.saturating_sub(self.current) as f64;
            Duration::try_from_secs_f64(elapsed.as_secs_f64() / self.current as f64 * remaining)
                .ok()
        });

        self.callback.on_progress(&ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed,
            estimated_remaining,
            current_frame: self.last_frame,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recorder(Mutex<Vec<u64>>);

    impl ProgressCallback for Recorder {
        fn on_progress(&self, info: &ProgressInfo) {
            self.0.lock().unwrap().push(info.current);
        }
    }

    #[test]
    fn tracker_reports_every_batch() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let mut tracker =
            ProgressTracker::new(recorder.clone(), OperationType::FeatureExtraction, Some(7), 3);
        for index in 0..7 {
            tracker.advance(index);
        }
        tracker.finish();

        assert_eq!(*recorder.0.lock().unwrap(), vec![3, 6, 7]);
    }

    #[test]
    fn tracker_clamps_zero_batch_size() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let mut tracker =
            ProgressTracker::new(recorder.clone(), OperationType::KeyFrameExport, None, 0);
        tracker.advance(0);
        tracker.advance(1);

        assert_eq!(*recorder.0.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn tracker_tolerates_overstated_totals() {
        struct Last(Mutex<Option<ProgressInfo>>);
        impl ProgressCallback for Last {
            fn on_progress(&self, info: &ProgressInfo) {
                *self.0.lock().unwrap() = Some(info.clone());
            }
        }

        let last = Arc::new(Last(Mutex::new(None)));
        let mut tracker = ProgressTracker::new(
            last.clone(),
            OperationType::FeatureExtraction,
            Some(1 << 40),
            1,
        );
        tracker.advance(0);
        tracker.advance(1);
        tracker.finish();

        let info = last.0.lock().unwrap().clone().unwrap();
        assert_eq!(info.current, 2);
        assert_eq!(info.current_frame, Some(1));
        assert!(info.percentage.unwrap() < 1e-6);
    }
}
