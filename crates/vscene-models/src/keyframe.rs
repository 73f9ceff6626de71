//! Key-frame data model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-frame quality sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FrameQuality {
    /// Laplacian-variance sharpness, normalized.
    pub sharpness: f64,

    /// Mean grayscale intensity / 255.
    pub brightness: f64,

    /// Grayscale standard deviation / 255.
    pub contrast: f64,

    /// Normalized Shannon entropy of the grayscale histogram.
    pub histogram_diversity: f64,

    /// Weighted composite of the four sub-scores.
    pub overall: f64,
}

/// One selected representative frame.
///
/// Created during frame selection and immutable afterward; owned exclusively
/// by its parent [`crate::VideoScene`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeyFrame {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Frame index within the source video.
    pub frame_number: u64,

    /// Timestamp in seconds (`frame_number / fps`).
    pub timestamp: f64,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Channel count of the decoded frame.
    pub channels: u8,

    /// Quality sub-scores.
    pub quality: FrameQuality,

    /// Motion score relative to the previous analyzed frame, in [0, 1].
    pub motion_score: f64,

    /// Whether this frame was retained as a key frame.
    pub is_keyframe: bool,

    /// Path of the saved image, when frame saving is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_path: Option<String>,

    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl KeyFrame {
    /// Create a new key frame with a fresh UUID.
    pub fn new(frame_number: u64, timestamp: f64, width: u32, height: u32, channels: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            frame_number,
            timestamp,
            width,
            height,
            channels,
            quality: FrameQuality::default(),
            motion_score: 0.0,
            is_keyframe: true,
            frame_path: None,
            metadata: HashMap::new(),
        }
    }

    /// Set the quality sub-scores.
    pub fn with_quality(mut self, quality: FrameQuality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the motion score.
    pub fn with_motion(mut self, motion_score: f64) -> Self {
        self.motion_score = motion_score;
        self
    }

    /// Set the saved image path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.frame_path = Some(path.into());
        self
    }
}
