//! Merging of shots shorter than the minimum duration.

use crate::shot::Shot;

/// Which neighbor a short shot is folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Repeatedly fold the shortest shot into a neighbor until every shot lasts
/// at least `min_duration` frames.
///
/// Each iteration picks the first shortest shot. The last shot merges left,
/// the first merges right, and any other merges toward its shorter neighbor
/// (ties go right). The merged interval spans both shots, so a partition
/// stays a partition. Every iteration removes one shot, so the loop runs at
/// most `shots.len() - 1` times; a lone shot is returned as-is.
pub fn merge_short_shots(shots: &[Shot], min_duration: usize) -> Vec<Shot> {
    let mut shots = shots.to_vec();
    let mut merges = 0usize;

    while shots.len() > 1 {
        let Some((index, shortest)) = shots
            .iter()
            .map(Shot::duration)
            .enumerate()
            .min_by_key(|&(index, duration)| (duration, index))
        else {
            break;
        };
        if shortest >= min_duration {
            break;
        }

        let direction = if index == shots.len() - 1 {
            Direction::Left
        } else if index == 0 {
            Direction::Right
        } else if shots[index - 1].duration() < shots[index + 1].duration() {
            Direction::Left
        } else {
            Direction::Right
        };

        match direction {
            Direction::Left => {
                let end = shots[index].end;
                shots[index - 1].end = end;
                shots.remove(index);
            }
            Direction::Right => {
                let start = shots[index].start;
                shots[index + 1].start = start;
                shots.remove(index);
            }
        }
        merges += 1;
    }

    log::debug!(
        "Merged {} short shot(s), {} remain (min_duration={})",
        merges,
        shots.len(),
        min_duration
    );

    shots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shot::is_partition;

    fn shots(bounds: &[usize]) -> Vec<Shot> {
        bounds
            .windows(2)
            .map(|pair| Shot::new(pair[0], pair[1]))
            .collect()
    }

    #[test]
    fn long_shots_are_untouched() {
        let input = shots(&[0, 10, 25, 40]);
        assert_eq!(merge_short_shots(&input, 10), input);
    }

    #[test]
    fn last_shot_merges_left() {
        let merged = merge_short_shots(&shots(&[0, 12, 24, 26]), 10);
        assert_eq!(merged, shots(&[0, 12, 26]));
    }

    #[test]
    fn first_shot_merges_right() {
        let merged = merge_short_shots(&shots(&[0, 3, 15, 30]), 10);
        assert_eq!(merged, shots(&[0, 15, 30]));
    }

    #[test]
    fn middle_shot_merges_toward_shorter_neighbor() {
        let merged = merge_short_shots(&shots(&[0, 11, 13, 25]), 10);
        assert_eq!(merged, shots(&[0, 13, 25]));

        let merged = merge_short_shots(&shots(&[0, 12, 14, 25]), 10);
        assert_eq!(merged, shots(&[0, 12, 25]));
    }

    #[test]
    fn equal_neighbors_merge_right() {
        let merged = merge_short_shots(&shots(&[0, 12, 14, 26]), 10);
        assert_eq!(merged, shots(&[0, 12, 26]));
    }

    #[test]
    fn first_of_equal_shortest_is_merged_first() {
        // Shots of 2 at indices 1 and 3. Index 1 goes first and merges
        // right (20 vs 11); the other then sits between 13 and 15 and
        // merges left.
        let merged = merge_short_shots(&shots(&[0, 20, 22, 33, 35, 50]), 10);
        assert_eq!(merged, shots(&[0, 20, 35, 50]));
    }

    #[test]
    fn cascade_collapses_to_one_shot() {
        let input = shots(&[0, 2, 4, 6, 8, 10, 12]);
        let merged = merge_short_shots(&input, 10);
        assert_eq!(merged, vec![Shot::new(0, 12)]);
    }

    #[test]
    fn empty_trailing_shot_is_absorbed() {
        let merged = merge_short_shots(&[Shot::new(0, 12), Shot::new(12, 12)], 1);
        assert_eq!(merged, vec![Shot::new(0, 12)]);
    }

    #[test]
    fn is_idempotent_and_preserves_partition() {
        let input = shots(&[0, 1, 5, 6, 30, 31, 33, 60, 61]);
        let merged = merge_short_shots(&input, 10);
        assert!(is_partition(&merged, 61));
        assert!(merged.iter().all(|shot| shot.duration() >= 10));
        assert_eq!(merge_short_shots(&merged, 10), merged);
    }

    #[test]
    fn single_and_empty_lists() {
        assert_eq!(merge_short_shots(&[Shot::new(0, 3)], 10), vec![Shot::new(0, 3)]);
        assert!(merge_short_shots(&[], 10).is_empty());
    }
}
