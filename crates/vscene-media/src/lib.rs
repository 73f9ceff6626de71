#![deny(unreachable_patterns)]
//! Scene detection and key-frame extraction core.
//!
//! This crate provides:
//! - FFprobe container introspection
//! - A frame-decoder port with an FFmpeg CLI adapter
//! - Per-frame quality, motion, and histogram analysis
//! - Pluggable scene detectors with an ordered fallback chain
//! - Key-frame selectors (uniform and adaptive)
//! - Scene-level characterization

pub mod analysis;
pub mod capability;
pub mod characterize;
pub mod decode;
pub mod detect;
pub mod error;
pub mod frame;
pub mod probe;
pub mod save;
pub mod select;

pub use capability::{CapabilityProvider, StaticCapabilities, SystemCapabilities};
pub use characterize::{SceneCharacteristics, SceneCharacterizer};
pub use decode::{FfmpegDecoder, FrameDecoder, SUPPORTED_CONTAINERS};
pub use detect::{detector_chain, DetectOptions, SceneDetector, SceneSpan, VideoStream};
pub use error::{MediaError, MediaResult};
pub use frame::{Frame, FrameSource};
pub use probe::{probe_video, VideoInfo};
pub use select::{selector_for, KeyFrameSelector, SelectionContext};
