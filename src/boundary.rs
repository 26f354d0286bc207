//! Shot boundary detection from the score sequence.
//!
//! A cut is declared at frame `i + 1` when score `i` clears the absolute
//! threshold *and* jumps by at least half the threshold relative to score
//! `i - 1`. The second condition rejects gradual drifts that happen to
//! cross the threshold. Score 0 is only ever used as the reference for
//! score 1, so no cut can be declared before frame 2.

use crate::error::ShotcutError;
use crate::shot::Shot;

/// Frame indices at which a cut is declared, in increasing order.
pub fn cut_indices(scores: &[f64], threshold: f64) -> Vec<usize> {
    let Some((&first, rest)) = scores.split_first() else {
        return Vec::new();
    };

    let jump = threshold / 2.0;
    let mut cuts = Vec::new();
    let mut prev_score = first;

    for (offset, &score) in rest.iter().enumerate() {
        if score >= threshold && (score - prev_score).abs() >= jump {
            // `rest[offset]` is score `offset + 1`, comparing frames
            // `offset + 1` and `offset + 2`.
            cuts.push(offset + 2);
        }
        prev_score = score;
    }

    cuts
}

/// Split the video into candidate shots at every declared cut.
///
/// The frame count is `scores.len() + 1`. A trailing shot from the last cut
/// to the end of the video is always emitted; short shots are left for
/// [`merge_short_shots`](crate::merge_short_shots) to absorb.
///
/// # Errors
///
/// - [`ShotcutError::InsufficientFrames`] if `scores` is empty.
/// - [`ShotcutError::VideoTooShort`] if the video has fewer than
///   `min_duration` frames.
pub fn detect_boundaries(
    scores: &[f64],
    threshold: f64,
    min_duration: usize,
) -> Result<Vec<Shot>, ShotcutError> {
    if scores.is_empty() {
        return Err(ShotcutError::InsufficientFrames {
            frame_count: scores.len() + 1,
        });
    }

    let frame_count = scores.len() + 1;
    if frame_count < min_duration {
        return Err(ShotcutError::VideoTooShort {
            frame_count,
            min_duration,
        });
    }

    let mut shots = Vec::new();
    let mut prev_boundary = 0;
    for cut in cut_indices(scores, threshold) {
        shots.push(Shot::new(prev_boundary, cut));
        prev_boundary = cut;
    }
    shots.push(Shot::new(prev_boundary, frame_count));

    log::debug!(
        "Declared {} cut(s) over {} frames (threshold={})",
        shots.len() - 1,
        frame_count,
        threshold
    );

    Ok(shots)
}
