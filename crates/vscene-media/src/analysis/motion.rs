//! Frame-to-frame motion scoring.

use tracing::debug;

use crate::frame::Frame;

/// Motion intensity between two consecutive frames, in [0, 1].
///
/// Mean absolute grayscale pixel difference divided by 255. This is an
/// optional quality signal, not a correctness-critical value: any internal
/// inconsistency (mismatched shapes, empty buffers) logs and returns 0.0
/// rather than propagating an error.
pub fn motion_score(previous: &Frame, current: &Frame) -> f64 {
    if previous.width != current.width || previous.height != current.height {
        debug!(
            prev = ?(previous.width, previous.height),
            curr = ?(current.width, current.height),
            "Motion score on mismatched frame shapes, returning 0.0"
        );
        return 0.0;
    }

    let prev_gray = previous.to_gray();
    let curr_gray = current.to_gray();
    if prev_gray.is_empty() || prev_gray.len() != curr_gray.len() {
        debug!("Motion score on empty or inconsistent buffers, returning 0.0");
        return 0.0;
    }

    let total_diff: f64 = prev_gray
        .iter()
        .zip(curr_gray.iter())
        .map(|(&a, &b)| (a as f64 - b as f64).abs())
        .sum();

    (total_diff / prev_gray.len() as f64 / 255.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(value: u8) -> Frame {
        Frame::new(8, 8, vec![value; 8 * 8 * 3])
    }

    #[test]
    fn test_identical_frames_zero_motion() {
        let frame = solid_frame(100);
        assert_eq!(motion_score(&frame, &frame), 0.0);
    }

    #[test]
    fn test_black_to_white_full_motion() {
        let score = motion_score(&solid_frame(0), &solid_frame(255));
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_motion() {
        let score = motion_score(&solid_frame(0), &solid_frame(51));
        assert!((score - 0.2).abs() < 0.01);
    }

    #[test]
    fn test_mismatched_shapes_fail_soft() {
        let a = Frame::new(8, 8, vec![0; 8 * 8 * 3]);
        let b = Frame::new(4, 4, vec![0; 4 * 4 * 3]);
        assert_eq!(motion_score(&a, &b), 0.0);
    }
}
