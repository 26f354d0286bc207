//! Inter-frame distance scoring.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::ShotcutError;
use crate::histogram::FeatureVector;

/// L1 (Manhattan) distance between two feature vectors.
///
/// Both vectors must share the same layout; with three normalized channels
/// the result lies in `[0, 6]`.
pub fn manhattan_distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y).abs())
        .sum()
}

/// Score every pair of temporally adjacent frames.
///
/// Returns `features.len() - 1` scores, where score `i` is the distance
/// between frames `i` and `i + 1`.
///
/// # Errors
///
/// Returns [`ShotcutError::InsufficientFrames`] when fewer than two feature
/// vectors are given, and [`ShotcutError::InvalidConfiguration`] when the
/// vectors were built with different bin counts.
pub fn score_sequence(features: &[FeatureVector]) -> Result<Vec<f64>, ShotcutError> {
    if features.len() < 2 {
        return Err(ShotcutError::InsufficientFrames {
            frame_count: features.len(),
        });
    }

    let bins = features[0].bins();
    if let Some((index, mismatched)) = features
        .iter()
        .enumerate()
        .find(|(_, feature)| feature.bins() != bins || feature.len() != features[0].len())
    {
        return Err(ShotcutError::InvalidConfiguration(format!(
            "feature vector {index} has {} bins, expected {bins}",
            mismatched.bins()
        )));
    }

    #[cfg(feature = "rayon")]
    let scores = features
        .par_windows(2)
        .map(|pair| manhattan_distance(&pair[0], &pair[1]))
        .collect();

    #[cfg(not(feature = "rayon"))]
    let scores = features
        .windows(2)
        .map(|pair| manhattan_distance(&pair[0], &pair[1]))
        .collect();

    Ok(scores)
}
