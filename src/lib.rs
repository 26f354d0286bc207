//! # shotcut
//!
//! Shot boundary detection for video files: find the frames where the
//! picture changes abruptly, group frames into shots, and optionally export
//! one key frame per shot.
//!
//! Each frame is summarised by a normalized RGB color histogram. Adjacent
//! frames are compared by L1 distance, a cut is declared where the distance
//! both clears an absolute threshold and jumps sharply relative to the
//! previous distance, and shots shorter than a minimum duration are merged
//! into their neighbors. Decoding is done with FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate, and key
//! frames are written with the [`image`](https://crates.io/crates/image)
//! crate.
//!
//! ## Quick Start
//!
//! ```no_run
//! use shotcut::{DetectorOptions, ShotDetector, VideoFile};
//!
//! let options = DetectorOptions::new()
//!     .with_min_duration(10)
//!     .with_threshold(1.5)
//!     .with_output_dir("keyframes");
//! let detector = ShotDetector::new(options);
//!
//! let mut video = VideoFile::open("input.mp4").unwrap();
//! let detection = detector.detect(&mut video).unwrap();
//! println!("{:?}", detection.shots());
//!
//! detector.export(&detection).unwrap();
//! ```
//!
//! ## Frames already in memory
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use shotcut::{DetectorOptions, Shot, ShotDetector};
//!
//! let mut frames = vec![RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])); 15];
//! frames.extend(vec![RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])); 15]);
//!
//! let detector = ShotDetector::new(DetectorOptions::new().with_min_duration(5));
//! let detection = detector.detect_frames(frames).unwrap();
//! assert_eq!(detection.shots(), &[Shot::new(0, 15), Shot::new(15, 30)]);
//! ```
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `rayon` | Score adjacent frames in parallel |
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod boundary;
pub mod configuration;
mod conversion;
pub mod detector;
pub mod distance;
pub mod error;
pub mod export;
pub mod ffmpeg;
pub mod histogram;
pub mod merge;
pub mod metadata;
pub mod progress;
pub mod shot;
pub mod source;
pub mod video;

pub use boundary::{cut_indices, detect_boundaries};
pub use configuration::{
    DEFAULT_HIST_SIZE, DEFAULT_MIN_DURATION, DEFAULT_THRESHOLD, DetectorOptions,
};
pub use detector::{ScoreSummary, ShotDetection, ShotDetector};
pub use distance::{manhattan_distance, score_sequence};
pub use error::ShotcutError;
pub use export::{ExportReport, FrameSink, ImageDirectorySink, export_key_frames};
pub use ffmpeg::{FfmpegLogLevel, set_ffmpeg_log_level};
pub use histogram::{FeatureVector, extract_features};
pub use merge::merge_short_shots;
pub use metadata::VideoMetadata;
pub use progress::{CancellationToken, OperationType, ProgressCallback, ProgressInfo};
pub use shot::{Shot, is_partition};
pub use source::{FrameSource, MemoryFrameSource};
pub use video::VideoFile;
