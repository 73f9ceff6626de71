//! Strategy enums for scene detection and frame extraction.
//!
//! These enums select among the detector and selector implementations in
//! `vscene-media`:
//!
//! - `SceneDetectionMethod`: how scene boundaries are found
//! - `FrameExtractionMethod`: how representative frames are chosen per scene
//! - `SceneType`: the characterization label assigned to a detected scene

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scene boundary detection strategy.
///
/// `Content` and `Threshold` prefer an FFmpeg-backed detector and fall back
/// to the histogram detector when FFmpeg is unavailable or fails. `Adaptive`
/// and `Histogram` use the always-available histogram detector directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SceneDetectionMethod {
    /// Content-aware detection via the decoder's scene-change filter.
    #[default]
    Content,

    /// Pixel-difference thresholding on sampled frames.
    Threshold,

    /// Histogram correlation with an adaptive sampling cadence.
    Adaptive,

    /// Plain histogram correlation at one sample per second.
    Histogram,
}

impl SceneDetectionMethod {
    /// All available detection methods.
    pub const ALL: &'static [SceneDetectionMethod] = &[
        SceneDetectionMethod::Content,
        SceneDetectionMethod::Threshold,
        SceneDetectionMethod::Adaptive,
        SceneDetectionMethod::Histogram,
    ];

    /// Returns the method name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneDetectionMethod::Content => "content",
            SceneDetectionMethod::Threshold => "threshold",
            SceneDetectionMethod::Adaptive => "adaptive",
            SceneDetectionMethod::Histogram => "histogram",
        }
    }

    /// Returns true if this method prefers the FFmpeg-backed content path.
    pub fn prefers_content_detector(&self) -> bool {
        matches!(
            self,
            SceneDetectionMethod::Content | SceneDetectionMethod::Threshold
        )
    }
}

impl fmt::Display for SceneDetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SceneDetectionMethod {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "content" => Ok(SceneDetectionMethod::Content),
            "threshold" => Ok(SceneDetectionMethod::Threshold),
            "adaptive" => Ok(SceneDetectionMethod::Adaptive),
            "histogram" => Ok(SceneDetectionMethod::Histogram),
            _ => Err(MethodParseError(s.to_string())),
        }
    }
}

/// Key-frame selection strategy within a detected scene.
///
/// Only `Uniform` and `Adaptive` have dedicated selectors; the remaining
/// variants are accepted for compatibility and resolve to `Uniform`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrameExtractionMethod {
    /// Evenly spaced frames across the scene span.
    #[default]
    Uniform,

    /// Container key-frame positions (resolves to uniform sampling).
    Keyframe,

    /// Histogram-diversity driven (resolves to uniform sampling).
    Histogram,

    /// Motion-peak driven (resolves to uniform sampling).
    Motion,

    /// Quality + motion + diversity scored top-K selection.
    Adaptive,
}

impl FrameExtractionMethod {
    /// All available extraction methods.
    pub const ALL: &'static [FrameExtractionMethod] = &[
        FrameExtractionMethod::Uniform,
        FrameExtractionMethod::Keyframe,
        FrameExtractionMethod::Histogram,
        FrameExtractionMethod::Motion,
        FrameExtractionMethod::Adaptive,
    ];

    /// Returns the method name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameExtractionMethod::Uniform => "uniform",
            FrameExtractionMethod::Keyframe => "keyframe",
            FrameExtractionMethod::Histogram => "histogram",
            FrameExtractionMethod::Motion => "motion",
            FrameExtractionMethod::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for FrameExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FrameExtractionMethod {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(FrameExtractionMethod::Uniform),
            "keyframe" => Ok(FrameExtractionMethod::Keyframe),
            "histogram" => Ok(FrameExtractionMethod::Histogram),
            "motion" => Ok(FrameExtractionMethod::Motion),
            "adaptive" => Ok(FrameExtractionMethod::Adaptive),
            _ => Err(MethodParseError(s.to_string())),
        }
    }
}

/// Characterization label for a detected scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SceneType {
    /// High motion intensity.
    Action,

    /// Steady, high-contrast framing typical of talking heads.
    Dialogue,

    /// Large brightness variation across selected frames.
    Transition,

    /// Low motion, low variation.
    Static,

    /// No usable frames to characterize.
    #[default]
    Unknown,
}

impl SceneType {
    /// Returns the scene type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneType::Action => "action",
            SceneType::Dialogue => "dialogue",
            SceneType::Transition => "transition",
            SceneType::Static => "static",
            SceneType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SceneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown method: {0}")]
pub struct MethodParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_method_round_trip() {
        for method in SceneDetectionMethod::ALL {
            let parsed: SceneDetectionMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, *method);
        }
    }

    #[test]
    fn test_extraction_method_round_trip() {
        for method in FrameExtractionMethod::ALL {
            let parsed: FrameExtractionMethod = method.as_str().parse().unwrap();
            assert_eq!(parsed, *method);
        }
    }

    #[test]
    fn test_content_detector_preference() {
        assert!(SceneDetectionMethod::Content.prefers_content_detector());
        assert!(SceneDetectionMethod::Threshold.prefers_content_detector());
        assert!(!SceneDetectionMethod::Adaptive.prefers_content_detector());
        assert!(!SceneDetectionMethod::Histogram.prefers_content_detector());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&SceneDetectionMethod::Histogram).unwrap();
        assert_eq!(json, "\"histogram\"");

        let json = serde_json::to_string(&SceneType::Dialogue).unwrap();
        assert_eq!(json, "\"dialogue\"");
    }

    #[test]
    fn test_unknown_method_fails() {
        assert!("scenedetect".parse::<SceneDetectionMethod>().is_err());
        assert!("best".parse::<FrameExtractionMethod>().is_err());
    }
}
