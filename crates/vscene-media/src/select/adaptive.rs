//! Adaptive key-frame selection.
//!
//! Decodes a uniformly spaced candidate pool of up to three times the frame
//! budget, scores each candidate by quality, motion relative to the previous
//! candidate, and histogram diversity, then keeps the top scorers and
//! restores temporal order.

use async_trait::async_trait;
use tracing::debug;

use vscene_models::{FrameExtractionMethod, KeyFrame};

use super::{finalize_selection, uniform_indices, KeyFrameSelector, SelectionContext};
use crate::analysis::{analyze_frame, motion_score};
use crate::detect::SceneSpan;
use crate::error::MediaResult;
use crate::frame::{Frame, FrameSource};

/// Candidate pool multiplier over the frame budget.
const CANDIDATE_FACTOR: u32 = 3;

/// Quality + motion + diversity scored top-K selection.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveSelector;

impl AdaptiveSelector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KeyFrameSelector for AdaptiveSelector {
    async fn select(
        &self,
        source: &mut dyn FrameSource,
        span: &SceneSpan,
        ctx: &SelectionContext<'_>,
    ) -> MediaResult<Vec<KeyFrame>> {
        let fps = source.info().safe_fps();
        let weights = ctx.config.adaptive_weights;
        let candidate_count = ctx.frame_budget.saturating_mul(CANDIDATE_FACTOR);
        let indices = uniform_indices(span, candidate_count);

        let mut scored: Vec<(f64, KeyFrame, Frame)> = Vec::with_capacity(indices.len());
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

            let combined = quality.overall * weights.quality
                + motion * weights.motion
                + quality.histogram_diversity * weights.diversity;

            let key_frame = KeyFrame::new(index, index as f64 / fps, frame.width, frame.height, 3)
                .with_quality(quality)
                .with_motion(motion);
            scored.push((combined, key_frame, frame));
        }

        // Top K by combined score; finalize_selection restores frame order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(ctx.frame_budget as usize);

        let selected = scored.into_iter().map(|(_, kf, frame)| (kf, frame)).collect();
        Ok(finalize_selection(selected, ctx))
    }

    fn method(&self) -> FrameExtractionMethod {
        FrameExtractionMethod::Adaptive
    }

    fn name(&self) -> &'static str {
        "adaptive"
    }
}
