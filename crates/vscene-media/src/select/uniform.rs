//! Uniform key-frame selection.

use async_trait::async_trait;
use tracing::debug;

use vscene_models::{FrameExtractionMethod, KeyFrame};

use super::{finalize_selection, uniform_indices, KeyFrameSelector, SelectionContext};
use crate::analysis::{analyze_frame, motion_score};
use crate::detect::SceneSpan;
use crate::error::MediaResult;
use crate::frame::{Frame, FrameSource};

/// Evenly spaced selection across the scene span.
#[derive(Debug, Clone, Default)]
pub struct UniformSelector;

impl UniformSelector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyFrameSelector for UniformSelector {
    async fn select(
        &self,
        source: &mut dyn FrameSource,
        span: &SceneSpan,
        ctx: &SelectionContext<'_>,
    ) -> MediaResult<Vec<KeyFrame>> {
        let fps = source.info().safe_fps();
        let indices = uniform_indices(span, ctx.frame_budget);

        let mut selected: Vec<(KeyFrame, Frame)> = Vec::with_capacity(indices.len());
        let mut prev_frame: Option<Frame> = None;

        for index in indices {
            let frame = match source.read_frame(index).await {
                Ok(f) => f,
                Err(e) => {
                    debug!(frame = index, error = %e, "Decode failed, skipping candidate");
                    continue;
                }
            };

            let quality = analyze_frame(&frame, &ctx.config.quality_weights);
            let motion = prev_frame
                .as_ref()
                .map(|prev| motion_score(prev, &frame))
                .unwrap_or(0.0);
            prev_frame = Some(frame.clone());

            if quality.overall < ctx.config.min_frame_quality {
                debug!(
                    frame = index,
                    quality = format!("{:.3}", quality.overall),
                    "Below quality floor, excluded"
                );
                continue;
            }

            let key_frame = KeyFrame::new(index, index as f64 / fps, frame.width, frame.height, 3)
                .with_quality(quality)
                .with_motion(motion);
            selected.push((key_frame, frame));
        }

        Ok(finalize_selection(selected, ctx))
    }

    fn method(&self) -> FrameExtractionMethod {
        FrameExtractionMethod::Uniform
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}
