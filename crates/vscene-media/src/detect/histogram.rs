//! Histogram-correlation scene detection.
//!
//! The always-available basic path: sample one frame per second, compute a
//! normalized 3-channel color histogram per sample, and compare consecutive
//! samples by correlation. A correlation below `1.0 - threshold/100` marks a
//! scene boundary at the sampled frame.

use async_trait::async_trait;
use tracing::debug;

use vscene_models::SceneDetectionMethod;

use super::{spans_from_boundaries, DetectOptions, SceneDetector, SceneSpan, VideoStream};
use crate::analysis::histogram::ColorHistogram;
use crate::error::MediaResult;

/// Histogram-correlation detector.
#[derive(Debug, Clone, Default)]
pub struct HistogramDetector;

impl HistogramDetector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SceneDetector for HistogramDetector {
    async fn detect(
        &self,
        video: &mut VideoStream<'_>,
        opts: &DetectOptions,
    ) -> MediaResult<Vec<SceneSpan>> {
        let fps = video.info.safe_fps();
        let total_frames = video.info.safe_frame_count();

        // One sample per second of footage
        let step = (fps.round() as u64).max(1);
        let correlation_floor = 1.0 - (opts.threshold / 100.0).clamp(0.0, 1.0);

        let mut boundaries: Vec<u64> = vec![0];
        let mut prev_hist: Option<ColorHistogram> = None;

        let mut index = 0u64;
        while index < total_frames {
            let frame = match video.source.read_frame(index).await {
                Ok(f) => f,
                Err(e) => {
                    debug!(frame = index, error = %e, "Sample decode failed, skipping");
                    index += step;
                    continue;
                }
            };

            let hist = ColorHistogram::from_frame(&frame);
            if let Some(prev) = &prev_hist {
                let corr = prev.correlation(&hist);
                if corr < correlation_floor {
                    debug!(
                        frame = index,
                        correlation = format!("{corr:.3}"),
                        floor = format!("{correlation_floor:.3}"),
                        "Histogram boundary"
                    );
                    boundaries.push(index);
                }
            }

            prev_hist = Some(hist);
            index += step;
        }

        if *boundaries.last().unwrap() != total_frames {
            boundaries.push(total_frames);
        }

        Ok(spans_from_boundaries(
            &boundaries,
            fps,
            opts.min_scene_length,
        ))
    }

    fn method(&self) -> SceneDetectionMethod {
        SceneDetectionMethod::Histogram
    }

    fn name(&self) -> &'static str {
        "histogram"
    }
}
