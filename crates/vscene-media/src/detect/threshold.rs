//! Pixel-difference threshold detection.
//!
//! Samples decoded frames at roughly 2 fps and marks a boundary when the
//! mean absolute grayscale difference between consecutive samples exceeds
//! the configured sensitivity, mapped onto the 0-255 intensity range.

use async_trait::async_trait;
use tracing::debug;

use vscene_models::SceneDetectionMethod;

use super::{spans_from_boundaries, DetectOptions, SceneDetector, SceneSpan, VideoStream};
use crate::error::MediaResult;

/// Sampling cadence in samples per second.
const SAMPLE_FPS: f64 = 2.0;

/// Frame-differencing detector over decoded samples.
#[derive(Debug, Clone, Default)]
pub struct ThresholdDetector;

impl ThresholdDetector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SceneDetector for ThresholdDetector {
    async fn detect(
        &self,
        video: &mut VideoStream<'_>,
        opts: &DetectOptions,
    ) -> MediaResult<Vec<SceneSpan>> {
        let fps = video.info.safe_fps();
        let total_frames = video.info.safe_frame_count();
        let step = ((fps / SAMPLE_FPS).round() as u64).max(1);
        let diff_floor = (opts.threshold / 100.0).clamp(0.0, 1.0) * 255.0;

        let mut boundaries: Vec<u64> = vec![0];
        let mut prev_gray: Option<Vec<u8>> = None;

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

            let gray = frame.to_gray();
            if let Some(prev) = &prev_gray {
                if prev.len() == gray.len() && !gray.is_empty() {
                    let mean_diff: f64 = prev
                        .iter()
                        .zip(gray.iter())
                        .map(|(&a, &b)| (a as f64 - b as f64).abs())
                        .sum::<f64>()
                        / gray.len() as f64;

                    if mean_diff > diff_floor {
                        debug!(
                            frame = index,
                            mean_diff = format!("{mean_diff:.1}"),
                            "Threshold boundary"
                        );
                        boundaries.push(index);
                    }
                }
            }

            prev_gray = Some(gray);
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
        SceneDetectionMethod::Threshold
    }

    fn name(&self) -> &'static str {
        "threshold"
    }
}
