//! Frame sources.
//!
//! A [`FrameSource`] yields decoded frames in presentation order until it is
//! exhausted. The detector pulls from it exactly once, front to back.
//! [`VideoFile`](crate::VideoFile) decodes frames with FFmpeg;
//! [`MemoryFrameSource`] serves frames that are already in memory.

use std::collections::VecDeque;

use image::RgbImage;

use crate::error::ShotcutError;

/// A sequential producer of decoded RGB frames.
pub trait FrameSource {
    /// Decode and return the next frame, or `Ok(None)` once exhausted.
    fn next_frame(&mut self) -> Result<Option<RgbImage>, ShotcutError>;

    /// Expected number of frames, if known ahead of time.
    ///
    /// Only used for progress reporting; it may be an estimate.
    fn frame_count_hint(&self) -> Option<u64> {
        None
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, ShotcutError> {
        (**self).next_frame()
    }

    fn frame_count_hint(&self) -> Option<u64> {
        (**self).frame_count_hint()
    }
}

/// A frame source over frames held in memory.
///
/// # Example
///
/// ```
/// use image::{Rgb, RgbImage};
/// use shotcut::{FrameSource, MemoryFrameSource};
///
/// let mut source = MemoryFrameSource::new(vec![RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]))]);
/// assert!(source.next_frame()?.is_some());
/// assert!(source.next_frame()?.is_none());
/// # Ok::<(), shotcut::ShotcutError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFrameSource {
    frames: VecDeque<RgbImage>,
}

impl MemoryFrameSource {
    /// Serve `frames` in order.
    pub fn new(frames: Vec<RgbImage>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Number of frames not yet served.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl From<Vec<RgbImage>> for MemoryFrameSource {
    fn from(frames: Vec<RgbImage>) -> Self {
        Self::new(frames)
    }
}

impl FromIterator<RgbImage> for MemoryFrameSource {
    fn from_iter<I: IntoIterator<Item = RgbImage>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl FrameSource for MemoryFrameSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>, ShotcutError> {
        Ok(self.frames.pop_front())
    }

    fn frame_count_hint(&self) -> Option<u64> {
        Some(self.frames.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;

    fn shaded(values: &[u8]) -> MemoryFrameSource {
        values
            .iter()
            .map(|&value| RgbImage::from_pixel(1, 1, Rgb([value, 0, 0])))
            .collect()
    }

    #[test]
    fn serves_frames_in_order() {
        let mut source = shaded(&[1, 2, 3]);
        assert_eq!(source.frame_count_hint(), Some(3));

        let mut seen = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            seen.push(frame.get_pixel(0, 0)[0]);
        }

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(source.remaining(), 0);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn mutable_reference_is_a_source() {
        fn drain<S: FrameSource>(mut source: S) -> usize {
            let mut count = 0;
            while source.next_frame().unwrap().is_some() {
                count += 1;
            }
            count
        }

        let mut source = shaded(&[7, 8]);
        assert_eq!((&mut source).frame_count_hint(), Some(2));
        assert_eq!(drain(&mut source), 2);
        assert_eq!(source.remaining(), 0);
    }
}
