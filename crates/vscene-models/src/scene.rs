//! Detected scene data model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::keyframe::KeyFrame;
use crate::method::SceneType;

/// One contiguous temporal segment of the source video.
///
/// Scenes partition the video timeline: scene numbers are 1-based and
/// sequential, spans are non-overlapping and increasing, and every span
/// meets the configured minimum duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoScene {
    /// 1-based sequential scene number.
    pub scene_number: u32,

    /// Start time in seconds.
    pub start_time: f64,

    /// End time in seconds (exclusive; greater than `start_time`).
    pub end_time: f64,

    /// First frame index of the span.
    pub start_frame: u64,

    /// Last frame index of the span (exclusive).
    pub end_frame: u64,

    /// Raw frame span length, independent of how many key frames were kept.
    pub frame_count: u64,

    /// Selected key frames, ordered by ascending frame number.
    pub key_frames: Vec<KeyFrame>,

    /// Characterization label.
    pub scene_type: SceneType,

    /// Mean motion score across selected frames, in [0, 1].
    pub motion_intensity: f64,

    /// Mean histogram diversity across selected frames, in [0, 1].
    pub color_diversity: f64,

    /// Standard deviation of brightness across selected frames.
    pub brightness_variation: f64,

    /// Composite scene quality score, in [0, 1].
    pub quality_score: f64,
}

impl VideoScene {
    /// Scene duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Number of selected key frames.
    pub fn key_frame_count(&self) -> usize {
        self.key_frames.len()
    }
}
