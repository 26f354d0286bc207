//! Key-frame export.
//!
//! Export is a separate stage from detection: it takes the final shot list
//! and the frames buffered during the run, and hands the first frame of each
//! shot to a [`FrameSink`]. Failures are collected per shot and never stop
//! the remaining exports.
//!
//! # Example
//!
//! ```no_run
//! use image::ImageFormat;
//! use shotcut::{DetectorOptions, ImageDirectorySink, ShotDetector, ShotcutError, VideoFile};
//!
//! let options = DetectorOptions::new().with_output_dir("keyframes");
//! let mut video = VideoFile::open("input.mp4")?;
//! let detection = ShotDetector::new(options).detect(&mut video)?;
//!
//! let mut sink = ImageDirectorySink::new("keyframes", ImageFormat::Png)?;
//! let report = shotcut::export_key_frames(detection.shots(), detection.frames(), &mut sink);
//! for failure in report.failures() {
//!     eprintln!("{failure}");
//! }
//! # Ok::<(), ShotcutError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};

use crate::error::ShotcutError;
use crate::progress::ProgressTracker;
use crate::shot::Shot;

/// A destination for key frames.
pub trait FrameSink {
    /// Persist `frame`, the key frame of the shot starting at `frame_index`.
    fn write_frame(&mut self, frame_index: usize, frame: &RgbImage) -> Result<(), ShotcutError>;
}

/// Writes key frames as `frame-<index>.<ext>` files into one directory.
#[derive(Debug, Clone)]
pub struct ImageDirectorySink {
    directory: PathBuf,
    format: ImageFormat,
    written: Vec<PathBuf>,
}

impl ImageDirectorySink {
    /// Create a sink writing into `directory`, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ShotcutError::IoError`] if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(directory: P, format: ImageFormat) -> Result<Self, ShotcutError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            format,
            written: Vec::new(),
        })
    }

    /// File path used for the key frame at `frame_index`.
    pub fn path_for(&self, frame_index: usize) -> PathBuf {
        let extension = self.format.extensions_str().first().copied().unwrap_or("img");
        self.directory
            .join(format!("frame-{frame_index}.{extension}"))
    }

    /// Paths written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl FrameSink for ImageDirectorySink {
    fn write_frame(&mut self, frame_index: usize, frame: &RgbImage) -> Result<(), ShotcutError> {
        let path = self.path_for(frame_index);
        frame.save_with_format(&path, self.format)?;
        log::debug!("Wrote key frame {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Outcome of a best-effort export.
#[derive(Debug, Default)]
pub struct ExportReport {
    exported: Vec<usize>,
    failures: Vec<ShotcutError>,
}

impl ExportReport {
    /// Start indices of the shots whose key frame was written.
    pub fn exported(&self) -> &[usize] {
        &self.exported
    }

    /// One [`ShotcutError::ExportFailed`] per shot that could not be written.
    pub fn failures(&self) -> &[ShotcutError] {
        &self.failures
    }

    /// `true` if every key frame was written.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Treat the export as all-or-nothing, returning the first failure.
    pub fn into_result(self) -> Result<Vec<usize>, ShotcutError> {
        match self.failures.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.exported),
        }
    }
}

/// Write the first frame of every shot to `sink`.
///
/// `frames` must hold the run's frames in decode order. Each failure is
/// reported as [`ShotcutError::ExportFailed`] and the remaining shots are
/// still exported.
pub fn export_key_frames<S: FrameSink + ?Sized>(
    shots: &[Shot],
    frames: &[RgbImage],
    sink: &mut S,
) -> ExportReport {
    export_with_tracker(shots, frames, sink, None)
}

pub(crate) fn export_with_tracker<S: FrameSink + ?Sized>(
    shots: &[Shot],
    frames: &[RgbImage],
    sink: &mut S,
    mut tracker: Option<&mut ProgressTracker>,
) -> ExportReport {
    let mut report = ExportReport::default();

    for shot in shots {
        let frame_index = shot.start;
        let result = match frames.get(frame_index) {
            Some(frame) => sink.write_frame(frame_index, frame),
            None => Err(ShotcutError::ExportFailed {
                frame_index,
                reason: format!("frame was not buffered ({} frames held)", frames.len()),
            }),
        };

        match result {
            Ok(()) => report.exported.push(frame_index),
            Err(error) => {
                let error = match error {
                    ShotcutError::ExportFailed { .. } => error,
                    other => ShotcutError::ExportFailed {
                        frame_index,
                        reason: other.to_string(),
                    },
                };
                log::warn!("{error}");
                report.failures.push(error);
            }
        }

        if let Some(tracker) = tracker.as_deref_mut() {
            tracker.advance(frame_index);
        }
    }

    if let Some(tracker) = tracker {
        tracker.finish();
    }

    log::debug!(
        "Exported {} of {} key frame(s)",
        report.exported.len(),
        shots.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    #[derive(Default)]
    struct Recording {
        indices: Vec<usize>,
        fail_on: Option<usize>,
    }

    impl FrameSink for Recording {
        fn write_frame(&mut self, frame_index: usize, _: &RgbImage) -> Result<(), ShotcutError> {
            if self.fail_on == Some(frame_index) {
                return Err(ShotcutError::IoError(std::io::Error::other("disk full")));
            }
            self.indices.push(frame_index);
            Ok(())
        }
    }

    fn frames(count: usize) -> Vec<RgbImage> {
        (0..count)
            .map(|_| RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])))
            .collect()
    }

    #[test]
    fn writes_first_frame_of_each_shot() {
        let shots = [Shot::new(0, 12), Shot::new(12, 30)];
        let mut sink = Recording::default();
        let report = export_key_frames(&shots, &frames(30), &mut sink);

        assert!(report.is_complete());
        assert_eq!(sink.indices, vec![0, 12]);
        assert_eq!(report.exported(), &[0, 12]);
    }

    #[test]
    fn failure_does_not_stop_remaining_exports() {
        let shots = [Shot::new(0, 10), Shot::new(10, 20), Shot::new(20, 30)];
        let mut sink = Recording {
            fail_on: Some(10),
            ..Recording::default()
        };
        let report = export_key_frames(&shots, &frames(30), &mut sink);

        assert_eq!(sink.indices, vec![0, 20]);
        assert_eq!(report.failures().len(), 1);
        assert!(matches!(
            report.failures()[0],
            ShotcutError::ExportFailed {
                frame_index: 10,
                ..
            }
        ));
        assert!(report.into_result().is_err());
    }

    #[test]
    fn missing_frames_are_reported() {
        let shots = [Shot::new(0, 10), Shot::new(10, 20)];
        let mut sink = Recording::default();
        let report = export_key_frames(&shots, &frames(5), &mut sink);

        assert_eq!(report.exported(), &[0]);
        assert_eq!(report.failures().len(), 1);
    }

    #[test]
    fn directory_sink_names_files_by_start_index() {
        let directory = tempfile::tempdir().expect("Failed to create temp dir");
        let sink = ImageDirectorySink::new(directory.path().join("nested"), ImageFormat::Jpeg)
            .expect("Failed to create sink");

        assert!(directory.path().join("nested").is_dir());
        assert_eq!(
            sink.path_for(15),
            directory.path().join("nested").join("frame-15.jpg")
        );
    }
}
