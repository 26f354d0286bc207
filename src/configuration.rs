//! Detector configuration.
//!
//! [`DetectorOptions`] is a builder that carries the tuning constants of the
//! shot-boundary algorithm together with the operational settings of a run
//! (key-frame export, progress callbacks, cancellation).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use shotcut::{CancellationToken, DetectorOptions, ProgressCallback, ProgressInfo};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} done", info.operation, info.current);
//!     }
//! }
//!
//! let token = CancellationToken::new();
//! let options = DetectorOptions::new()
//!     .with_min_duration(12)
//!     .with_threshold(1.2)
//!     .with_output_dir("keyframes")
//!     .with_progress(Arc::new(LogProgress))
//!     .with_cancellation(token.clone());
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;

use crate::error::ShotcutError;
use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback};

/// Default minimum shot duration, in frames.
pub const DEFAULT_MIN_DURATION: usize = 10;
/// Default number of histogram bins per color channel.
pub const DEFAULT_HIST_SIZE: usize = 64;
/// Default absolute distance threshold for declaring a cut.
pub const DEFAULT_THRESHOLD: f64 = 1.5;

/// Configuration for a shot detection run.
///
/// All fields have defaults; a default-constructed value reproduces the
/// classic settings (10-frame minimum, 64 bins, threshold 1.5, no export).
///
/// The threshold is an empirically tuned constant. Scores range over
/// `[0, 6]` (three independently normalized channels, each contributing at
/// most 2), and the local-jump test uses half the threshold.
#[derive(Clone)]
pub struct DetectorOptions {
    pub(crate) min_duration: usize,
    pub(crate) hist_size: usize,
    pub(crate) threshold: f64,
    /// Key-frame directory. `None` disables frame buffering and export.
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) image_format: ImageFormat,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    pub(crate) cancellation: Option<CancellationToken>,
    /// How often to fire the progress callback (every N items).
    pub(crate) batch_size: u64,
}

impl Debug for DetectorOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DetectorOptions")
            .field("min_duration", &self.min_duration)
            .field("hist_size", &self.hist_size)
            .field("threshold", &self.threshold)
            .field("output_dir", &self.output_dir)
            .field("image_format", &self.image_format)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("batch_size", &self.batch_size)
            .finish()
    }
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self {
            min_duration: DEFAULT_MIN_DURATION,
            hist_size: DEFAULT_HIST_SIZE,
            threshold: DEFAULT_THRESHOLD,
            output_dir: None,
            image_format: ImageFormat::Jpeg,
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            batch_size: 1,
        }
    }

    /// Set the minimum shot duration, in frames.
    #[must_use]
    pub fn with_min_duration(mut self, frames: usize) -> Self {
        self.min_duration = frames;
        self
    }

    /// Set the number of histogram bins per channel (1–256).
    #[must_use]
    pub fn with_hist_size(mut self, bins: usize) -> Self {
        self.hist_size = bins;
        self
    }

    /// Set the absolute distance threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable key-frame export into `dir`.
    ///
    /// When set, every decoded frame is retained for the run so that the
    /// first frame of each final shot can be written afterwards.
    #[must_use]
    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the image format used for key frames. Defaults to JPEG.
    #[must_use]
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When the token is cancelled the decode loop stops and the run returns
    /// [`ShotcutError::Cancelled`].
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set how often the progress callback fires. Clamped to at least 1.
    #[must_use]
    pub fn with_batch_size(mut self, size: u64) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Minimum shot duration, in frames.
    pub fn min_duration(&self) -> usize {
        self.min_duration
    }

    /// Histogram bins per channel.
    pub fn hist_size(&self) -> usize {
        self.hist_size
    }

    /// Absolute distance threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Key-frame output directory, if export is enabled.
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Image format used for key frames.
    pub fn image_format(&self) -> ImageFormat {
        self.image_format
    }

    /// Check option ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ShotcutError::InvalidConfiguration`] when `min_duration` is
    /// zero, `hist_size` is outside `1..=256`, or `threshold` is negative or
    /// not finite.
    pub fn validate(&self) -> Result<(), ShotcutError> {
        if self.min_duration == 0 {
            return Err(ShotcutError::InvalidConfiguration(
                "min_duration must be at least 1 frame".to_string(),
            ));
        }
        if self.hist_size == 0 || self.hist_size > 256 {
            return Err(ShotcutError::InvalidConfiguration(format!(
                "hist_size must be between 1 and 256, got {}",
                self.hist_size
            )));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(ShotcutError::InvalidConfiguration(format!(
                "threshold must be a non-negative finite number, got {}",
                self.threshold
            )));
        }
        if !self.image_format.can_write() {
            return Err(ShotcutError::InvalidConfiguration(format!(
                "image format {:?} cannot be written",
                self.image_format
            )));
        }
        Ok(())
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}
