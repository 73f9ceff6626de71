//! Shared data models for the VScene backend.
//!
//! This crate provides Serde-serializable types for:
//! - Processing configuration and strategy selection
//! - Key frames and their quality scores
//! - Detected scenes and scene characterization
//! - The processing result contract consumed by downstream indexing

pub mod config;
pub mod keyframe;
pub mod method;
pub mod result;
pub mod scene;

// Re-export common types
pub use config::{AdaptiveWeights, QualityWeights, SceneWeights, VideoProcessingConfig};
pub use keyframe::{FrameQuality, KeyFrame};
pub use method::{FrameExtractionMethod, MethodParseError, SceneDetectionMethod, SceneType};
pub use result::{PerformanceReport, QualityReport, VideoProcessingResult, VideoSourceInfo};
pub use scene::VideoScene;
