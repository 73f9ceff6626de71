//! Key-frame selection.
//!
//! Selectors pick up to a budgeted number of representative frames from a
//! detected scene span. The strategy is chosen by the configuration's
//! extraction method through [`selector_for`]; methods without a dedicated
//! selector resolve to uniform sampling.

use async_trait::async_trait;
use std::path::Path;
use tracing::warn;

use vscene_models::{FrameExtractionMethod, KeyFrame, VideoProcessingConfig};

use crate::detect::SceneSpan;
use crate::error::MediaResult;
use crate::frame::{Frame, FrameSource};
use crate::save::save_key_frame;

pub mod adaptive;
pub mod uniform;

pub use adaptive::AdaptiveSelector;
pub use uniform::UniformSelector;

/// Per-scene selection parameters.
pub struct SelectionContext<'a> {
    /// The processing configuration.
    pub config: &'a VideoProcessingConfig,

    /// 1-based scene number, used for saved-frame naming.
    pub scene_number: u32,

    /// Remaining frame budget for this scene: the per-scene limit already
    /// reduced by the global `max_frames_total` accounting.
    pub frame_budget: u32,

    /// Destination for saved frames; `None` disables saving regardless of
    /// the configuration flag.
    pub save_dir: Option<&'a Path>,
}

/// Core trait for key-frame selectors.
#[async_trait]
pub trait KeyFrameSelector: Send + Sync {
    /// Select key frames for one scene span, ordered by ascending frame
    /// number. A scene where nothing decodes yields an empty list, not an
    /// error.
    async fn select(
        &self,
        source: &mut dyn FrameSource,
        span: &SceneSpan,
        ctx: &SelectionContext<'_>,
    ) -> MediaResult<Vec<KeyFrame>>;

    /// The method this selector implements.
    fn method(&self) -> FrameExtractionMethod;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Resolve the selector for an extraction method.
///
/// `Adaptive` gets the scored selector; everything else samples uniformly.
pub fn selector_for(method: FrameExtractionMethod) -> Box<dyn KeyFrameSelector> {
    match method {
        FrameExtractionMethod::Adaptive => Box::new(AdaptiveSelector::new()),
        FrameExtractionMethod::Uniform
        | FrameExtractionMethod::Keyframe
        | FrameExtractionMethod::Histogram
        | FrameExtractionMethod::Motion => Box::new(UniformSelector::new()),
    }
}

/// Evenly spaced frame indices across `[start_frame, end_frame)`.
///
/// When the span holds fewer frames than requested, every frame in the span
/// is returned instead.
pub(crate) fn uniform_indices(span: &SceneSpan, count: u32) -> Vec<u64> {
    let range = span.frame_count();
    if range == 0 || count == 0 {
        return Vec::new();
    }

    if range <= count as u64 {
        return (span.start_frame..span.end_frame).collect();
    }

    if count == 1 {
        return vec![span.start_frame];
    }

    let interval = range as f64 / (count - 1) as f64;
    let last = span.end_frame - 1;
    let mut indices = Vec::with_capacity(count as usize);
    for i in 0..count {
        let index = (span.start_frame as f64 + i as f64 * interval).round() as u64;
        let index = index.min(last);
        if indices.last() != Some(&index) {
            indices.push(index);
        }
    }
    indices
}

/// Sort selected frames into temporal order and persist them when enabled.
///
/// A save failure downgrades that frame to path-less rather than failing the
/// scene.
pub(crate) fn finalize_selection(
    mut selected: Vec<(KeyFrame, Frame)>,
    ctx: &SelectionContext<'_>,
) -> Vec<KeyFrame> {
    selected.sort_by_key(|(kf, _)| kf.frame_number);

    selected
        .into_iter()
        .map(|(mut key_frame, frame)| {
            if ctx.config.save_frames {
                if let Some(dir) = ctx.save_dir {
                    match save_key_frame(
                        &frame,
                        dir,
                        ctx.scene_number,
                        key_frame.frame_number,
                        ctx.config.target_dimensions,
                        &ctx.config.output_format,
                        ctx.config.output_quality,
                    ) {
                        Ok(path) => key_frame.frame_path = Some(path.display().to_string()),
                        Err(e) => warn!(
                            frame = key_frame.frame_number,
                            error = %e,
                            "Failed to save key frame"
                        ),
                    }
                }
            }
            key_frame
        })
        .collect()
}
