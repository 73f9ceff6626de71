//! Processing result contract.
//!
//! `VideoProcessingResult` is the orchestrator's sole output. Its serialized
//! shape (scenes -> key_frames -> scalar fields) is the stable contract
//! consumed by downstream indexing and storage layers.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::VideoProcessingConfig;
use crate::method::{FrameExtractionMethod, SceneDetectionMethod};
use crate::scene::VideoScene;

/// Source video metadata captured at probe time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoSourceInfo {
    /// Filesystem path of the input.
    pub path: String,

    /// Duration in seconds.
    pub duration: f64,

    /// Container format name.
    pub format: String,

    /// Video codec name.
    pub codec: String,

    /// Frame rate.
    pub frame_rate: f64,

    /// Total frame count (from the container, or derived as duration * fps).
    pub total_frames: u64,

    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,

    /// File size in bytes.
    pub file_size: u64,

    /// Bitrate in bits/second, when reported by the container.
    pub bitrate: u64,
}

/// Aggregate quality-confidence scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct QualityReport {
    /// Confidence in the detected scene partition.
    pub scene_detection_confidence: f64,

    /// Mean per-frame quality across all selected key frames.
    pub frame_extraction_quality: f64,

    /// Weighted combination of detection confidence, frame quality, and
    /// mean scene quality.
    pub overall_quality: f64,
}

/// Throughput and resource metrics for one processing call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceReport {
    /// `processing_time / video_duration`; below 1.0 is faster than realtime.
    pub processing_speed_ratio: f64,

    /// Frames decoded per wall-clock second.
    pub frames_per_second: f64,

    /// Estimated peak decode memory in megabytes.
    pub estimated_memory_mb: f64,
}

/// The complete, read-only result of one `process_video` call.
///
/// Partial success is not a boolean flag: a structurally complete result
/// with empty scene or key-frame lists is a valid, non-exceptional outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoProcessingResult {
    /// Detected scenes in ascending temporal order.
    pub scenes: Vec<VideoScene>,

    /// Total key frames selected across all scenes.
    pub total_key_frames: usize,

    /// Source video metadata.
    pub source: VideoSourceInfo,

    /// Wall-clock processing time in seconds.
    pub processing_time_s: f64,

    /// Scene detection method that produced the partition. May differ from
    /// the configured method when a fallback engaged.
    pub detection_method_used: SceneDetectionMethod,

    /// Frame extraction method used.
    pub extraction_method_used: FrameExtractionMethod,

    /// Aggregate quality-confidence scores.
    pub quality: QualityReport,

    /// Throughput and resource metrics.
    pub performance: PerformanceReport,

    /// The configuration this result was produced with.
    pub config: VideoProcessingConfig,

    /// Directory saved key frames were written to, when enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    /// When processing completed.
    pub processed_at: DateTime<Utc>,

    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl VideoProcessingResult {
    /// Sum of key frames across scenes (recomputed, for consistency checks).
    pub fn count_key_frames(&self) -> usize {
        self.scenes.iter().map(|s| s.key_frames.len()).sum()
    }

    /// True when no scene produced any usable key frame.
    pub fn is_empty(&self) -> bool {
        self.total_key_frames == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> VideoProcessingResult {
        VideoProcessingResult {
            scenes: vec![],
            total_key_frames: 0,
            source: VideoSourceInfo {
                path: "/tmp/in.mp4".to_string(),
                duration: 10.0,
                format: "mp4".to_string(),
                codec: "h264".to_string(),
                frame_rate: 30.0,
                total_frames: 300,
                width: 1280,
                height: 720,
                file_size: 1024,
                bitrate: 800_000,
            },
            processing_time_s: 1.5,
            detection_method_used: SceneDetectionMethod::Histogram,
            extraction_method_used: FrameExtractionMethod::Uniform,
            quality: QualityReport::default(),
            performance: PerformanceReport::default(),
            config: VideoProcessingConfig::default(),
            output_dir: None,
            processed_at: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    #[test]
    fn test_empty_result_is_valid() {
        let result = sample_result();
        assert!(result.is_empty());
        assert_eq!(result.count_key_frames(), 0);
    }

    #[test]
    fn test_contract_field_names() {
        let value = serde_json::to_value(sample_result()).unwrap();
        assert!(value.get("scenes").is_some());
        assert!(value.get("total_key_frames").is_some());
        assert_eq!(value["source"]["frame_rate"], 30.0);
        assert_eq!(value["detection_method_used"], "histogram");
        // Optional fields are omitted, not null
        assert!(value.get("output_dir").is_none());
    }
}
