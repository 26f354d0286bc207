//! Video stream metadata.
//!
//! Metadata is read once when a [`VideoFile`](crate::VideoFile) is opened and
//! cached for its lifetime.

use std::time::Duration;

/// Metadata for the video stream being analysed.
///
/// # Example
///
/// ```no_run
/// use shotcut::VideoFile;
///
/// let video = VideoFile::open("input.mp4").unwrap();
/// let metadata = video.metadata();
/// println!("{}x{} @ {:.2} fps", metadata.width, metadata.height, metadata.frames_per_second);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    pub frames_per_second: f64,
    /// Estimated total number of frames.
    ///
    /// Taken from the stream header when present, otherwise computed from
    /// duration and frame rate. The decoded count may differ.
    pub frame_count: u64,
    /// Container-level duration.
    pub duration: Duration,
    /// Codec name (e.g. `"h264"`, `"vp9"`, `"av1"`).
    pub codec: String,
    /// Container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format: String,
}

impl VideoMetadata {
    /// Presentation time of `frame_index`, assuming a constant frame rate.
    ///
    /// Returns `None` when the frame rate is unknown.
    pub fn frame_timestamp(&self, frame_index: usize) -> Option<Duration> {
        (self.frames_per_second > 0.0)
            .then(|| Duration::from_secs_f64(frame_index as f64 / self.frames_per_second))
    }
}
