//! Color and grayscale histograms with comparison measures.

use crate::frame::Frame;

/// Bins per RGB channel for the color histogram.
const BINS_PER_CHANNEL: usize = 8;

/// Normalized 3-channel color histogram (8 bins per channel, 512 total).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorHistogram {
    bins: Vec<f64>,
}

impl ColorHistogram {
    /// Compute the normalized color histogram of a frame.
    pub fn from_frame(frame: &Frame) -> Self {
        let total_bins = BINS_PER_CHANNEL * BINS_PER_CHANNEL * BINS_PER_CHANNEL;
        let mut bins = vec![0.0; total_bins];

        for px in frame.data.chunks_exact(3) {
            let r = (px[0] as usize * BINS_PER_CHANNEL) / 256;
            let g = (px[1] as usize * BINS_PER_CHANNEL) / 256;
            let b = (px[2] as usize * BINS_PER_CHANNEL) / 256;
            bins[r * BINS_PER_CHANNEL * BINS_PER_CHANNEL + g * BINS_PER_CHANNEL + b] += 1.0;
        }

        let total: f64 = bins.iter().sum();
        if total > 0.0 {
            for val in &mut bins {
                *val /= total;
            }
        }

        Self { bins }
    }

    /// Bin values.
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Pearson correlation with another histogram.
    pub fn correlation(&self, other: &ColorHistogram) -> f64 {
        correlation(&self.bins, &other.bins)
    }
}

/// Pearson correlation between two equal-length histograms.
///
/// Returns 1.0 for identical distributions, values near 0 for unrelated
/// ones. Mismatched lengths or degenerate (zero-variance) inputs yield 0.0.
pub fn correlation(h1: &[f64], h2: &[f64]) -> f64 {
    if h1.len() != h2.len() || h1.is_empty() {
        return 0.0;
    }

    let n = h1.len() as f64;
    let mean1: f64 = h1.iter().sum::<f64>() / n;
    let mean2: f64 = h2.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var1 = 0.0;
    let mut var2 = 0.0;

    for (a, b) in h1.iter().zip(h2.iter()) {
        let da = a - mean1;
        let db = b - mean2;
        cov += da * db;
        var1 += da * da;
        var2 += db * db;
    }

    let denom = (var1 * var2).sqrt();
    if denom > 0.0 {
        cov / denom
    } else if var1 == 0.0 && var2 == 0.0 {
        // Two flat histograms are identical distributions
        1.0
    } else {
        0.0
    }
}

/// 256-bin grayscale histogram (raw counts).
pub fn gray_histogram(gray: &[u8]) -> [u64; 256] {
    let mut hist = [0u64; 256];
    for &px in gray {
        hist[px as usize] += 1;
    }
    hist
}

/// Shannon entropy of a grayscale histogram, normalized by the 8.0-bit
/// maximum so the result lies in [0, 1].
pub fn normalized_entropy(hist: &[u64; 256]) -> f64 {
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let mut entropy = 0.0;
    for &count in hist.iter() {
        if count > 0 {
            let p = count as f64 / total;
            entropy -= p * p.log2();
        }
    }

    (entropy / 8.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(r: u8, g: u8, b: u8) -> Frame {
        let mut data = Vec::with_capacity(16 * 16 * 3);
        for _ in 0..16 * 16 {
            data.extend_from_slice(&[r, g, b]);
        }
        Frame::new(16, 16, data)
    }

    #[test]
    fn test_correlation_identical() {
        let h = vec![0.1, 0.2, 0.3, 0.4];
        assert!((correlation(&h, &h) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_disjoint() {
        let h1 = vec![1.0, 0.0, 0.0, 0.0];
        let h2 = vec![0.0, 0.0, 0.0, 1.0];
        assert!(correlation(&h1, &h2) < 0.0);
    }

    #[test]
    fn test_correlation_length_mismatch() {
        assert_eq!(correlation(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_histogram_normalized() {
        let hist = ColorHistogram::from_frame(&solid_frame(200, 10, 10));
        let sum: f64 = hist.bins().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_solid_frames_correlate() {
        let red = ColorHistogram::from_frame(&solid_frame(220, 0, 0));
        let red2 = ColorHistogram::from_frame(&solid_frame(225, 0, 0));
        let blue = ColorHistogram::from_frame(&solid_frame(0, 0, 220));

        assert!(red.correlation(&red2) > 0.9);
        assert!(red.correlation(&blue) < 0.5);
    }

    #[test]
    fn test_entropy_flat_image() {
        let gray = vec![128u8; 1000];
        let hist = gray_histogram(&gray);
        assert!(normalized_entropy(&hist) < 1e-9);
    }

    #[test]
    fn test_entropy_uniform_distribution() {
        // All 256 levels equally represented: maximum entropy
        let gray: Vec<u8> = (0..=255u8).cycle().take(2560).collect();
        let hist = gray_histogram(&gray);
        assert!((normalized_entropy(&hist) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_empty() {
        let hist = [0u64; 256];
        assert_eq!(normalized_entropy(&hist), 0.0);
    }
}
