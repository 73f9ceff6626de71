//! Frame quality metrics.
//!
//! Four independent sub-metrics plus a weighted composite, all in [0, 1]:
//! Laplacian-variance sharpness, mean brightness, contrast, and histogram
//! entropy. Pure functions; well-formed RGB24 input is the caller's
//! contract.

use vscene_models::{FrameQuality, QualityWeights};

use crate::analysis::histogram::{gray_histogram, normalized_entropy};
use crate::frame::Frame;

/// Empirical divisor normalizing Laplacian variance into [0, 1].
const SHARPNESS_DIVISOR: f64 = 1000.0;

/// Compute the quality metrics of a single frame.
pub fn analyze_frame(frame: &Frame, weights: &QualityWeights) -> FrameQuality {
    let gray = frame.to_gray();

    let sharpness = (laplacian_variance(&gray, frame.width as usize, frame.height as usize)
        / SHARPNESS_DIVISOR)
        .min(1.0);

    let mean = mean_intensity(&gray);
    let brightness = mean / 255.0;
    let contrast = std_dev(&gray, mean) / 255.0;

    let hist = gray_histogram(&gray);
    let histogram_diversity = normalized_entropy(&hist);

    let overall = combined_quality(
        sharpness,
        brightness,
        contrast,
        histogram_diversity,
        weights,
    );

    FrameQuality {
        sharpness,
        brightness,
        contrast,
        histogram_diversity,
        overall,
    }
}

/// Weighted composite: rewards sharp, high-contrast, diverse frames at
/// mid-range brightness (over/under-exposure is penalized through the
/// exposure term).
pub fn combined_quality(
    sharpness: f64,
    brightness: f64,
    contrast: f64,
    diversity: f64,
    weights: &QualityWeights,
) -> f64 {
    let exposure = 1.0 - (brightness - 0.5).abs() * 2.0;
    let score = sharpness * weights.sharpness
        + contrast * weights.contrast
        + diversity * weights.diversity
        + exposure * weights.exposure;
    score.clamp(0.0, 1.0)
}

/// Variance of the 4-neighbor Laplacian over a grayscale image.
///
/// Border pixels are excluded; images smaller than 3x3 have no interior and
/// score 0.0.
fn laplacian_variance(gray: &[u8], width: usize, height: usize) -> f64 {
    if width < 3 || height < 3 {
        return 0.0;
    }

    let mut responses = Vec::with_capacity((width - 2) * (height - 2));
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = gray[y * width + x] as f64;
            let up = gray[(y - 1) * width + x] as f64;
            let down = gray[(y + 1) * width + x] as f64;
            let left = gray[y * width + x - 1] as f64;
            let right = gray[y * width + x + 1] as f64;
            responses.push(up + down + left + right - 4.0 * center);
        }
    }

    let n = responses.len() as f64;
    let mean = responses.iter().sum::<f64>() / n;
    responses.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n
}

fn mean_intensity(gray: &[u8]) -> f64 {
    if gray.is_empty() {
        return 0.0;
    }
    gray.iter().map(|&p| p as f64).sum::<f64>() / gray.len() as f64
}

fn std_dev(gray: &[u8], mean: f64) -> f64 {
    if gray.is_empty() {
        return 0.0;
    }
    let variance =
        gray.iter().map(|&p| (p as f64 - mean).powi(2)).sum::<f64>() / gray.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(value: u8, width: u32, height: u32) -> Frame {
        Frame::new(width, height, vec![value; (width * height * 3) as usize])
    }

    fn checkerboard(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::new(width, height, data)
    }

    #[test]
    fn test_flat_frame_scores() {
        let weights = QualityWeights::default();
        let quality = analyze_frame(&solid_frame(128, 16, 16), &weights);

        assert!(quality.sharpness < 1e-9);
        assert!((quality.brightness - 128.0 / 255.0).abs() < 0.01);
        assert!(quality.contrast < 1e-9);
        assert!(quality.histogram_diversity < 1e-9);
    }

    #[test]
    fn test_checkerboard_is_sharp_and_contrasty() {
        let weights = QualityWeights::default();
        let quality = analyze_frame(&checkerboard(16, 16), &weights);

        assert!((quality.sharpness - 1.0).abs() < 1e-9); // Variance far exceeds the divisor
        assert!(quality.contrast > 0.9);
        assert!(quality.overall > 0.5);
    }

    #[test]
    fn test_all_scores_bounded() {
        let weights = QualityWeights::default();
        for frame in [
            solid_frame(0, 8, 8),
            solid_frame(255, 8, 8),
            checkerboard(8, 8),
        ] {
            let q = analyze_frame(&frame, &weights);
            for score in [
                q.sharpness,
                q.brightness,
                q.contrast,
                q.histogram_diversity,
                q.overall,
            ] {
                assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
            }
        }
    }

    #[test]
    fn test_exposure_preference() {
        let weights = QualityWeights::default();
        // Mid-gray beats black: only the exposure term differs
        let mid = analyze_frame(&solid_frame(128, 8, 8), &weights);
        let black = analyze_frame(&solid_frame(0, 8, 8), &weights);
        assert!(mid.overall > black.overall);
    }

    #[test]
    fn test_tiny_frame_sharpness_zero() {
        assert_eq!(laplacian_variance(&[1, 2, 3, 4], 2, 2), 0.0);
    }
}
