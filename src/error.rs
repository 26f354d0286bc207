//! Error types for the `shotcut` crate.
//!
//! This module defines [`ShotcutError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry enough context (frame
//! indices, counts, paths) to diagnose a failed run without extra logging at
//! the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `shotcut` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShotcutError {
    /// A frame with zero pixels was produced by the frame source.
    #[error("Invalid frame {frame_index}: {width}x{height} has no pixels")]
    InvalidFrame {
        /// Index of the offending frame in decode order.
        frame_index: usize,
        /// Reported frame width.
        width: u32,
        /// Reported frame height.
        height: u32,
    },

    /// Fewer than two frames were decoded, so no distance can be scored.
    #[error("At least 2 frames are required for shot detection, got {frame_count}")]
    InsufficientFrames {
        /// Number of frames the source produced.
        frame_count: usize,
    },

    /// The video is shorter than the configured minimum shot duration.
    #[error("Video has {frame_count} frames, shorter than the minimum shot duration of {min_duration}")]
    VideoTooShort {
        /// Number of frames the source produced.
        frame_count: usize,
        /// Configured minimum shot duration, in frames.
        min_duration: usize,
    },

    /// A key frame could not be persisted by the frame sink.
    #[error("Failed to export key frame {frame_index}: {reason}")]
    ExportFailed {
        /// Start index of the shot whose key frame failed.
        frame_index: usize,
        /// Underlying reason reported by the sink.
        reason: String,
    },

    /// A detector option is out of its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The video file could not be opened.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoFile::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// A video frame could not be decoded.
    #[error("Failed to decode video frame: {0}")]
    VideoDecodeError(String),

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while encoding a key frame.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    /// The run was cancelled via a [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<FfmpegError> for ShotcutError {
    fn from(error: FfmpegError) -> Self {
        ShotcutError::FfmpegError(error.to_string())
    }
}
