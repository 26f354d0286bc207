//! Per-frame color histogram features.
//!
//! Each frame is summarised by one histogram per RGB channel. The channel
//! histograms are normalized independently (each sums to 1.0) and
//! concatenated in R, G, B order into a [`FeatureVector`].

use image::RgbImage;

use crate::error::ShotcutError;

/// Number of color channels in a frame.
pub const CHANNELS: usize = 3;

/// Concatenated per-channel normalized color histogram of one frame.
///
/// The layout is `[R bins.., G bins.., B bins..]`, every channel holding
/// `bins` entries that sum to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
    bins: usize,
}

impl FeatureVector {
    /// Number of bins per channel.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Total number of entries (`3 * bins`).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a vector built by [`extract_features`].
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All entries, channel-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// The normalized histogram of one channel (0 = R, 1 = G, 2 = B).
    ///
    /// # Panics
    ///
    /// Panics if `channel >= 3`.
    pub fn channel(&self, channel: usize) -> &[f64] {
        assert!(channel < CHANNELS, "channel index {channel} out of range");
        &self.values[channel * self.bins..(channel + 1) * self.bins]
    }
}

/// Compute the feature vector of one frame.
///
/// Sample value `v` falls in bin `v * bins / 256`, so the bins are of equal
/// width over `[0, 256)`. `frame_index` is only used for error reporting.
///
/// # Errors
///
/// Returns [`ShotcutError::InvalidFrame`] if the frame has zero pixels, and
/// [`ShotcutError::InvalidConfiguration`] if `bins` is outside `1..=256`.
pub fn extract_features(
    frame: &RgbImage,
    bins: usize,
    frame_index: usize,
) -> Result<FeatureVector, ShotcutError> {
    if bins == 0 || bins > 256 {
        return Err(ShotcutError::InvalidConfiguration(format!(
            "hist_size must be between 1 and 256, got {bins}"
        )));
    }

    let pixel_count = frame.width() as usize * frame.height() as usize;
    if pixel_count == 0 {
        return Err(ShotcutError::InvalidFrame {
            frame_index,
            width: frame.width(),
            height: frame.height(),
        });
    }

    let mut counts = vec![0u64; CHANNELS * bins];
    for pixel in frame.pixels() {
        for (channel, &sample) in pixel.0.iter().enumerate() {
            let bin = sample as usize * bins / 256;
            counts[channel * bins + bin] += 1;
        }
    }

    let total = pixel_count as f64;
    let values = counts.into_iter().map(|count| count as f64 / total).collect();

    Ok(FeatureVector { values, bins })
}
