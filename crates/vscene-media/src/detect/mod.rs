//! Scene boundary detection.
//!
//! Detectors implement one trait and are tried through an ordered fallback
//! chain: a failing detector logs and hands over to the next one, and the
//! always-available histogram detector terminates every chain. The chain for
//! a given configuration is assembled by [`detector_chain`] from the
//! requested method and the injected capability set.

use async_trait::async_trait;
use std::path::Path;
use tracing::{info, warn};

use vscene_models::SceneDetectionMethod;

use crate::capability::CapabilityProvider;
use crate::error::{MediaError, MediaResult};
use crate::frame::FrameSource;
use crate::probe::VideoInfo;

pub mod content;
pub mod histogram;
pub mod threshold;

pub use content::ContentDetector;
pub use histogram::HistogramDetector;
pub use threshold::ThresholdDetector;

/// One detected scene span.
///
/// Spans partition the frame timeline: `end_frame` is exclusive and equals
/// the next span's `start_frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpan {
    /// 1-based sequential scene number.
    pub scene_number: u32,
    /// First frame of the span.
    pub start_frame: u64,
    /// One past the last frame of the span.
    pub end_frame: u64,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
}

impl SceneSpan {
    /// Span duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Raw frame count of the span.
    pub fn frame_count(&self) -> u64 {
        self.end_frame - self.start_frame
    }
}

/// Detection parameters extracted from the processing configuration.
#[derive(Debug, Clone, Copy)]
pub struct DetectOptions {
    /// Sensitivity on the 0-100 scale.
    pub threshold: f64,
    /// Minimum scene duration in seconds.
    pub min_scene_length: f64,
}

/// A video being analyzed: its path for CLI-backed detectors, probed
/// metadata, and the frame reader for decode-backed detectors.
pub struct VideoStream<'a> {
    pub path: &'a Path,
    pub info: VideoInfo,
    pub source: &'a mut dyn FrameSource,
}

/// Core trait for scene detectors.
#[async_trait]
pub trait SceneDetector: Send + Sync {
    /// Partition the video timeline into scene spans.
    async fn detect(
        &self,
        video: &mut VideoStream<'_>,
        opts: &DetectOptions,
    ) -> MediaResult<Vec<SceneSpan>>;

    /// The method this detector implements.
    fn method(&self) -> SceneDetectionMethod;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Build the ordered fallback chain for a detection method.
///
/// `Content` and `Threshold` lead with their preferred detector when the
/// capability provider reports support; the histogram detector is always the
/// terminal entry.
pub fn detector_chain(
    method: SceneDetectionMethod,
    capabilities: &dyn CapabilityProvider,
) -> Vec<Box<dyn SceneDetector>> {
    let mut chain: Vec<Box<dyn SceneDetector>> = Vec::with_capacity(2);

    match method {
        SceneDetectionMethod::Content => {
            if capabilities.has_content_detection() {
                chain.push(Box::new(ContentDetector::new()));
            } else {
                info!("Content detection unavailable, using histogram detector");
            }
        }
        SceneDetectionMethod::Threshold => {
            chain.push(Box::new(ThresholdDetector::new()));
        }
        SceneDetectionMethod::Adaptive | SceneDetectionMethod::Histogram => {}
    }

    chain.push(Box::new(HistogramDetector::new()));
    chain
}

/// Run a detector chain, falling back on failure.
///
/// Returns the spans together with the method that actually produced them.
/// Only the final chain member's error propagates; earlier failures are
/// logged and absorbed.
pub async fn run_chain(
    chain: &[Box<dyn SceneDetector>],
    video: &mut VideoStream<'_>,
    opts: &DetectOptions,
) -> MediaResult<(Vec<SceneSpan>, SceneDetectionMethod)> {
    let last = chain.len().saturating_sub(1);
    for (i, detector) in chain.iter().enumerate() {
        match detector.detect(video, opts).await {
            Ok(spans) => {
                info!(
                    detector = detector.name(),
                    scenes = spans.len(),
                    "Scene detection complete"
                );
                return Ok((spans, detector.method()));
            }
            Err(e) if i < last => {
                warn!(
                    detector = detector.name(),
                    error = %e,
                    "Scene detector failed, falling back"
                );
            }
            Err(e) => return Err(e),
        }
    }

    Err(MediaError::detection_failed("Empty detector chain"))
}

/// Convert a monotonic boundary list into numbered spans.
///
/// `boundaries` must start at 0 and end at the total frame count. Spans
/// shorter than `min_scene_length` are discarded; survivors are renumbered
/// sequentially from 1.
pub(crate) fn spans_from_boundaries(
    boundaries: &[u64],
    fps: f64,
    min_scene_length: f64,
) -> Vec<SceneSpan> {
    let mut spans = Vec::new();
    let mut scene_number = 1u32;

    for pair in boundaries.windows(2) {
        let (start_frame, end_frame) = (pair[0], pair[1]);
        if end_frame <= start_frame {
            continue;
        }

        let start_time = start_frame as f64 / fps;
        let end_time = end_frame as f64 / fps;
        if end_time - start_time < min_scene_length {
            continue;
        }

        spans.push(SceneSpan {
            scene_number,
            start_frame,
            end_frame,
            start_time,
            end_time,
        });
        scene_number += 1;
    }

    spans
}
