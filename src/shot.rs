//! Shot intervals.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

/// A contiguous run of frames, as the half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shot {
    /// Index of the first frame (the key frame).
    pub start: usize,
    /// Index one past the last frame.
    pub end: usize,
}

impl Shot {
    /// Create a shot covering `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of frames in the shot.
    pub fn duration(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// `true` if the shot covers no frames.
    pub fn is_empty(&self) -> bool {
        self.duration() == 0
    }

    /// `true` if `frame_index` falls inside the shot.
    pub fn contains(&self, frame_index: usize) -> bool {
        (self.start..self.end).contains(&frame_index)
    }

    /// The frame indices covered by the shot.
    pub fn frames(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<(usize, usize)> for Shot {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<Shot> for (usize, usize) {
    fn from(shot: Shot) -> Self {
        (shot.start, shot.end)
    }
}

impl Display for Shot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Check that `shots` partitions `[0, frame_count)`: ordered, contiguous,
/// non-overlapping and covering every index exactly once.
pub fn is_partition(shots: &[Shot], frame_count: usize) -> bool {
    let mut expected_start = 0;
    for shot in shots {
        if shot.start != expected_start || shot.end <= shot.start {
            return false;
        }
        expected_start = shot.end;
    }
    expected_start == frame_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_checks() {
        let shots = [Shot::new(0, 4), Shot::new(4, 9)];
        assert!(is_partition(&shots, 9));
        assert!(!is_partition(&shots, 10));
        assert!(!is_partition(&[Shot::new(0, 4), Shot::new(5, 9)], 9));
        assert!(!is_partition(&[Shot::new(0, 4), Shot::new(4, 4), Shot::new(4, 9)], 9));
        assert!(is_partition(&[], 0));
    }

    #[test]
    fn display_matches_tuple_form() {
        assert_eq!(Shot::new(15, 30).to_string(), "(15, 30)");
        assert_eq!(<(usize, usize)>::from(Shot::new(3, 8)), (3, 8));
    }
}
