//! The shot detection pipeline.
//!
//! [`ShotDetector`] holds only configuration; every run keeps its features,
//! scores and shots in local state, so one detector can serve several
//! videos, including from different threads.
//!
//! A run pulls every frame from a [`FrameSource`], computes its histogram
//! features, scores adjacent frames, declares cuts and finally merges shots
//! shorter than the minimum duration. Key-frame export is a separate step
//! ([`ShotDetector::export`]) fed by the resulting [`ShotDetection`].
//!
//! # Example
//!
//! ```no_run
//! use shotcut::{DetectorOptions, ShotDetector, ShotcutError, VideoFile};
//!
//! let detector = ShotDetector::new(DetectorOptions::new().with_output_dir("keyframes"));
//! let mut video = VideoFile::open("input.mp4")?;
//! let detection = detector.detect(&mut video)?;
//! for shot in detection.shots() {
//!     println!("{shot}");
//! }
//! if let Some(report) = detector.export(&detection)? {
//!     println!("wrote {} key frames", report.exported().len());
//! }
//! # Ok::<(), ShotcutError>(())
//! ```

use image::RgbImage;

use crate::{
    boundary::detect_boundaries,
    configuration::DetectorOptions,
    distance::score_sequence,
    error::ShotcutError,
    export::{ExportReport, ImageDirectorySink, export_with_tracker},
    histogram::{FeatureVector, extract_features},
    merge::merge_short_shots,
    progress::{OperationType, ProgressTracker},
    shot::Shot,
    source::{FrameSource, MemoryFrameSource},
};

/// Summary statistics of a run's score sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    /// Smallest inter-frame distance.
    pub min: f64,
    /// Largest inter-frame distance.
    pub max: f64,
    /// Mean inter-frame distance.
    pub mean: f64,
}

impl ScoreSummary {
    fn from_scores(scores: &[f64]) -> Self {
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = scores.iter().sum::<f64>() / scores.len().max(1) as f64;
        Self { min, max, mean }
    }
}

/// The result of one detection run.
#[derive(Debug, Clone)]
#[must_use]
pub struct ShotDetection {
    shots: Vec<Shot>,
    frame_count: usize,
    cut_count: usize,
    scores: ScoreSummary,
    frames: Vec<RgbImage>,
}

impl ShotDetection {
    /// Final shots, partitioning `[0, frame_count)`.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// Number of frames analysed.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Number of cuts declared before short shots were merged.
    pub fn cut_count(&self) -> usize {
        self.cut_count
    }

    /// Statistics of the inter-frame distances.
    pub fn score_summary(&self) -> ScoreSummary {
        self.scores
    }

    /// Frames buffered for key-frame export.
    ///
    /// Empty unless the run was configured with an output directory.
    pub fn frames(&self) -> &[RgbImage] {
        &self.frames
    }

    /// The key frame of every shot, if frames were buffered.
    pub fn key_frames(&self) -> impl Iterator<Item = (usize, &RgbImage)> {
        self.shots
            .iter()
            .filter_map(|shot| self.frames.get(shot.start).map(|frame| (shot.start, frame)))
    }

    /// Consume the detection, keeping only the shots.
    pub fn into_shots(self) -> Vec<Shot> {
        self.shots
    }
}

/// Configured shot boundary detector.
#[derive(Debug, Clone, Default)]
pub struct ShotDetector {
    options: DetectorOptions,
}

impl ShotDetector {
    /// Create a detector with the given options.
    pub fn new(options: DetectorOptions) -> Self {
        Self { options }
    }

    /// The detector's options.
    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Run detection over every frame of `source`.
    ///
    /// Frames are retained in the result only when an output directory is
    /// configured.
    ///
    /// # Errors
    ///
    /// - [`ShotcutError::InvalidConfiguration`] if the options are out of range.
    /// - [`ShotcutError::InvalidFrame`] if the source yields a frame with no
    ///   pixels.
    /// - [`ShotcutError::InsufficientFrames`] if fewer than two frames are
    ///   decoded.
    /// - [`ShotcutError::VideoTooShort`] if the video is shorter than the
    ///   minimum shot duration.
    /// - [`ShotcutError::Cancelled`] if the cancellation token fires.
    /// - Any error the source reports while decoding.
    pub fn detect<S: FrameSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<ShotDetection, ShotcutError> {
        self.options.validate()?;

        let (features, frames) = self.extract(source)?;
        let mut detection = self.detect_from_features(&features)?;
        detection.frames = frames;
        Ok(detection)
    }

    /// Run detection over frames already in memory.
    pub fn detect_frames(&self, frames: Vec<RgbImage>) -> Result<ShotDetection, ShotcutError> {
        self.detect(&mut MemoryFrameSource::new(frames))
    }

    /// Score, cut and merge a precomputed feature sequence.
    ///
    /// This is the pure part of the pipeline; the result holds no frames.
    ///
    /// # Errors
    ///
    /// - [`ShotcutError::InvalidConfiguration`] if the options are out of
    ///   range or the vectors do not share one layout.
    /// - [`ShotcutError::InsufficientFrames`] and
    ///   [`ShotcutError::VideoTooShort`] as for [`ShotDetector::detect`].
    pub fn detect_from_features(
        &self,
        features: &[FeatureVector],
    ) -> Result<ShotDetection, ShotcutError> {
        self.options.validate()?;

        let scores = score_sequence(features)?;
        let summary = ScoreSummary::from_scores(&scores);
        log::debug!(
            "Score range over {} frames: min={:.4} max={:.4} mean={:.4}",
            features.len(),
            summary.min,
            summary.max,
            summary.mean
        );

        let candidates = detect_boundaries(
            &scores,
            self.options.threshold,
            self.options.min_duration,
        )?;
        let cut_count = candidates.len() - 1;
        let shots = merge_short_shots(&candidates, self.options.min_duration);

        log::debug!(
            "Detected {} shot(s) from {} cut(s)",
            shots.len(),
            cut_count
        );

        Ok(ShotDetection {
            shots,
            frame_count: features.len(),
            cut_count,
            scores: summary,
            frames: Vec::new(),
        })
    }

    /// Write the key frame of every shot into the configured output
    /// directory.
    ///
    /// Returns `Ok(None)` when no output directory is configured. Individual
    /// write failures are collected in the report and do not stop the
    /// remaining exports.
    ///
    /// # Errors
    ///
    /// Returns [`ShotcutError::IoError`] if the output directory cannot be
    /// created.
    pub fn export(&self, detection: &ShotDetection) -> Result<Option<ExportReport>, ShotcutError> {
        let Some(directory) = self.options.output_dir.as_deref() else {
            return Ok(None);
        };

        let mut sink = ImageDirectorySink::new(directory, self.options.image_format)?;
        let mut tracker = ProgressTracker::new(
            self.options.progress.clone(),
            OperationType::KeyFrameExport,
            Some(detection.shots.len() as u64),
            self.options.batch_size,
        );
        let report = export_with_tracker(
            &detection.shots,
            &detection.frames,
            &mut sink,
            Some(&mut tracker),
        );

        log::debug!(
            "Key frames written to {} ({} failure(s))",
            directory.display(),
            report.failures().len()
        );

        Ok(Some(report))
    }

    /// Decode every frame, computing features and buffering frames if
    /// export is configured.
    fn extract<S: FrameSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<(Vec<FeatureVector>, Vec<RgbImage>), ShotcutError> {
        let keep_frames = self.options.output_dir.is_some();
        let hint = source.frame_count_hint();
        let mut tracker = ProgressTracker::new(
            self.options.progress.clone(),
            OperationType::FeatureExtraction,
            hint,
            self.options.batch_size,
        );

        // The hint comes from container headers and only drives progress.
        let mut features = Vec::new();
        let mut frames = Vec::new();

        loop {
            if self.options.is_cancelled() {
                return Err(ShotcutError::Cancelled);
            }

            let Some(frame) = source.next_frame()? else {
                break;
            };

            let frame_index = features.len();
            features.push(extract_features(
                &frame,
                self.options.hist_size,
                frame_index,
            )?);
            if keep_frames {
                frames.push(frame);
            }
            tracker.advance(frame_index);
        }
        tracker.finish();

        log::debug!(
            "Extracted features from {} frame(s) (hist_size={}, buffered={})",
            features.len(),
            self.options.hist_size,
            keep_frames
        );

        Ok((features, frames))
    }
}
