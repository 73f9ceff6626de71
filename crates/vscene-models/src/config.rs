//! Processing configuration.
//!
//! `VideoProcessingConfig` is supplied fully formed by the caller (an API
//! layer maps user options into it). There is no environment or file based
//! loading here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::method::{FrameExtractionMethod, SceneDetectionMethod};

/// Weights for the adaptive selector's combined candidate score.
///
/// `combined = quality * quality_w + motion * motion_w + diversity * diversity_w`.
/// Defaults are empirical starting points, not invariants; retune against
/// real footage as needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AdaptiveWeights {
    pub quality: f64,
    pub motion: f64,
    pub diversity: f64,
}

impl Default for AdaptiveWeights {
    fn default() -> Self {
        Self {
            quality: 0.4,
            motion: 0.3,
            diversity: 0.3,
        }
    }
}

/// Weights for frame-level and scene-level composite quality scores.
///
/// The four terms are sharpness (frame) or motion (scene), contrast,
/// histogram diversity, and mid-range brightness preference. Weights sum to
/// 1.0 so composite scores stay in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QualityWeights {
    pub sharpness: f64,
    pub contrast: f64,
    pub diversity: f64,
    pub exposure: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            sharpness: 0.3,
            contrast: 0.3,
            diversity: 0.2,
            exposure: 0.2,
        }
    }
}

/// Weights for the scene-level composite quality score: mean contrast,
/// histogram diversity, mid-range brightness preference, and motion capped
/// at 0.5 (rescaled to [0, 1]). Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneWeights {
    pub contrast: f64,
    pub diversity: f64,
    pub exposure: f64,
    pub motion: f64,
}

impl Default for SceneWeights {
    fn default() -> Self {
        Self {
            contrast: 0.3,
            diversity: 0.3,
            exposure: 0.2,
            motion: 0.2,
        }
    }
}

/// Immutable configuration for one `process_video` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoProcessingConfig {
    /// Scene boundary detection strategy.
    pub scene_detection_method: SceneDetectionMethod,

    /// Key-frame selection strategy.
    pub frame_extraction_method: FrameExtractionMethod,

    /// Maximum key frames selected per scene (>= 1).
    pub frames_per_scene: u32,

    /// Hard ceiling on key frames across all scenes.
    pub max_frames_total: u32,

    /// Minimum scene duration in seconds; shorter spans are discarded.
    pub min_scene_length: f64,

    /// Detection sensitivity on a 0-100 scale. The histogram detector marks
    /// a boundary when consecutive-sample correlation drops below
    /// `1.0 - scene_threshold / 100`; the content detector maps the same
    /// value to the decoder's 0-1 scene score as `scene_threshold / 100`.
    pub scene_threshold: f64,

    /// Frames whose overall quality falls below this floor are excluded.
    pub min_frame_quality: f64,

    /// Target dimensions (width, height) for saved key-frame images.
    pub target_dimensions: (u32, u32),

    /// Reject input files larger than this (gigabytes).
    pub max_file_size_gb: f64,

    /// Advisory processing deadline in seconds. Enforcement is the caller's
    /// responsibility (wrap the `process_video` future in a timeout); the
    /// pipeline does not interrupt itself mid-decode.
    pub processing_timeout_s: u64,

    /// Persist selected frames as image files.
    pub save_frames: bool,

    /// Image format for saved frames ("jpg" or "png").
    pub output_format: String,

    /// JPEG encoding quality (1-100) for saved frames.
    pub output_quality: u8,

    /// Adaptive selector score weights.
    #[serde(default)]
    pub adaptive_weights: AdaptiveWeights,

    /// Frame-level composite quality score weights.
    #[serde(default)]
    pub quality_weights: QualityWeights,

    /// Scene-level composite quality score weights.
    #[serde(default)]
    pub scene_weights: SceneWeights,
}

impl Default for VideoProcessingConfig {
    fn default() -> Self {
        Self {
            scene_detection_method: SceneDetectionMethod::Content,
            frame_extraction_method: FrameExtractionMethod::Uniform,
            frames_per_scene: 5,
            max_frames_total: 100,
            min_scene_length: 1.0,
            scene_threshold: 30.0,
            min_frame_quality: 0.0,
            target_dimensions: (1280, 720),
            max_file_size_gb: 2.0,
            processing_timeout_s: 600,
            save_frames: false,
            output_format: "jpg".to_string(),
            output_quality: 85,
            adaptive_weights: AdaptiveWeights::default(),
            quality_weights: QualityWeights::default(),
            scene_weights: SceneWeights::default(),
        }
    }
}

impl VideoProcessingConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.frames_per_scene == 0 {
            return Err("frames_per_scene must be at least 1".to_string());
        }

        if self.max_frames_total == 0 {
            return Err("max_frames_total must be at least 1".to_string());
        }

        if self.min_scene_length <= 0.0 {
            return Err("min_scene_length must be positive".to_string());
        }

        if !(0.0..=100.0).contains(&self.scene_threshold) {
            return Err("scene_threshold must be in 0-100".to_string());
        }

        if !(0.0..=1.0).contains(&self.min_frame_quality) {
            return Err("min_frame_quality must be in 0.0-1.0".to_string());
        }

        if self.target_dimensions.0 == 0 || self.target_dimensions.1 == 0 {
            return Err("target_dimensions must be positive".to_string());
        }

        if self.max_file_size_gb <= 0.0 {
            return Err("max_file_size_gb must be positive".to_string());
        }

        if self.output_quality == 0 || self.output_quality > 100 {
            return Err("output_quality must be in 1-100".to_string());
        }

        if !matches!(self.output_format.as_str(), "jpg" | "jpeg" | "png") {
            return Err(format!(
                "Unsupported output format: {}",
                self.output_format
            ));
        }

        Ok(())
    }

    /// File size ceiling in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        (self.max_file_size_gb * 1024.0 * 1024.0 * 1024.0) as u64
    }
}
