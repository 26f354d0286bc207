//! FFmpeg-backed frame source.
//!
//! [`VideoFile`] opens a media file, selects its best video stream, and
//! decodes frames on demand as RGB24 [`RgbImage`] values. Each call to
//! [`FrameSource::next_frame`] reads and decodes just enough packets to
//! produce the next frame.
//!
//! # Example
//!
//! ```no_run
//! use shotcut::{FrameSource, ShotcutError, VideoFile};
//!
//! let mut video = VideoFile::open("input.mp4")?;
//! let mut count = 0;
//! while let Some(frame) = video.next_frame()? {
//!     count += 1;
//!     let _ = frame.dimensions();
//! }
//! println!("decoded {count} frames");
//! # Ok::<(), ShotcutError>(())
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::RgbImage;

use crate::{
    conversion::{frame_to_rgb_buffer, rational_to_fps},
    error::ShotcutError,
    metadata::VideoMetadata,
    source::FrameSource,
};

/// Source format and size the current scaler was built for.
type ScalerKey = (Pixel, u32, u32);

/// A video file decoded sequentially with FFmpeg.
///
/// Created via [`VideoFile::open`]. Frames are produced once, front to back;
/// the decoder is not rewound.
pub struct VideoFile {
    input_context: Input,
    decoder: VideoDecoder,
    scaler: Option<(ScalerKey, ScalingContext)>,
    video_stream_index: usize,
    metadata: VideoMetadata,
    decoded_frame: VideoFrame,
    rgb_frame: VideoFrame,
    frames_decoded: u64,
    eof_sent: bool,
    done: bool,
    file_path: PathBuf,
}

impl Debug for VideoFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFile")
            .field("file_path", &self.file_path)
            .field("video_stream_index", &self.video_stream_index)
            .field("metadata", &self.metadata)
            .field("frames_decoded", &self.frames_decoded)
            .finish_non_exhaustive()
    }
}

impl VideoFile {
    /// Open a video file for decoding.
    ///
    /// Initializes FFmpeg (idempotent), opens the file, locates the best
    /// video stream and caches its metadata.
    ///
    /// # Errors
    ///
    /// - [`ShotcutError::FileOpen`] if the file cannot be opened or its
    ///   decoder cannot be created.
    /// - [`ShotcutError::NoVideoStream`] if the file has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ShotcutError> {
        let path = path.as_ref();
        let file_path = path.to_path_buf();

        log::debug!("Opening video file: {}", file_path.display());

        ffmpeg_next::init().map_err(|error| ShotcutError::FileOpen {
            path: file_path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| ShotcutError::FileOpen {
                path: file_path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(ShotcutError::NoVideoStream)?;
        let video_stream_index = stream.index();

        let decoder_context =
            CodecContext::from_parameters(stream.parameters()).map_err(|error| {
                ShotcutError::FileOpen {
                    path: file_path.clone(),
                    reason: format!(
                        "Failed to read video codec parameters for stream {video_stream_index}: {error}"
                    ),
                }
            })?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| ShotcutError::FileOpen {
                path: file_path.clone(),
                reason: format!(
                    "Failed to create video decoder for stream {video_stream_index}: {error}"
                ),
            })?;

        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let frames_per_second = match rational_to_fps(stream.avg_frame_rate()) {
            fps if fps > 0.0 => fps,
            _ => rational_to_fps(stream.rate()),
        };

        let frame_count = match stream.frames() {
            frames if frames > 0 => frames as u64,
            _ => (duration.as_secs_f64() * frames_per_second) as u64,
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            duration,
            codec,
            format: input_context.format().name().to_string(),
        };

        log::debug!(
            "Video stream {}: {}x{} {} @ {:.3} fps, ~{} frames",
            video_stream_index,
            metadata.width,
            metadata.height,
            metadata.codec,
            metadata.frames_per_second,
            metadata.frame_count
        );

        Ok(Self {
            input_context,
            decoder,
            scaler: None,
            video_stream_index,
            metadata,
            decoded_frame: VideoFrame::empty(),
            rgb_frame: VideoFrame::empty(),
            frames_decoded: 0,
            eof_sent: false,
            done: false,
            file_path,
        })
    }

    /// Metadata of the selected video stream.
    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Number of frames produced so far.
    pub fn frames_decoded(&self) -> u64 {
        self.frames_decoded
    }

    /// Convert the current `decoded_frame` to an RGB image.
    ///
    /// The scaler is keyed on the decoded frame's own format and size
    /// because some decoders change pixel format mid-stream.
    fn convert_current_frame(&mut self) -> Result<RgbImage, ShotcutError> {
        let width = self.decoded_frame.width();
        let height = self.decoded_frame.height();
        let key = (self.decoded_frame.format(), width, height);

        let scaler = match self.scaler.take() {
            Some((current, scaler)) if current == key => scaler,
            _ => ScalingContext::get(
                key.0,
                width,
                height,
                Pixel::RGB24,
                width,
                height,
                ScalingFlags::BILINEAR,
            )?,
        };
        let (_, scaler) = self.scaler.insert((key, scaler));
        scaler.run(&self.decoded_frame, &mut self.rgb_frame)?;

        let buffer = frame_to_rgb_buffer(&self.rgb_frame, width, height);
        RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            ShotcutError::VideoDecodeError(
                "Failed to construct RGB image from decoded frame data".to_string(),
            )
        })
    }

    fn fail(&mut self, error: ShotcutError) -> Result<Option<RgbImage>, ShotcutError> {
        self.done = true;
        Err(error)
    }
}

impl FrameSource for VideoFile {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, ShotcutError> {
        if self.done {
            return Ok(None);
        }

        loop {
            if self.decoder.receive_frame(&mut self.decoded_frame).is_ok() {
                return match self.convert_current_frame() {
                    Ok(image) => {
                        self.frames_decoded += 1;
                        Ok(Some(image))
                    }
                    Err(error) => self.fail(error),
                };
            }

            if self.eof_sent {
                self.done = true;
                log::debug!("Decoder drained after {} frames", self.frames_decoded);
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    // Non-video packets are skipped.
                    if packet.stream() == self.video_stream_index
                        && let Err(error) = self.decoder.send_packet(&packet)
                    {
                        return self.fail(ShotcutError::VideoDecodeError(error.to_string()));
                    }
                }
                Err(FfmpegError::Eof) => {
                    if let Err(error) = self.decoder.send_eof() {
                        return self.fail(ShotcutError::from(error));
                    }
                    self.eof_sent = true;
                }
                Err(error) => return self.fail(ShotcutError::from(error)),
            }
        }
    }

    fn frame_count_hint(&self) -> Option<u64> {
        (self.metadata.frame_count > 0).then_some(self.metadata.frame_count)
    }
}
