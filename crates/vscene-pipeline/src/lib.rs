//! Video processing orchestration.
//!
//! This crate wires the `vscene-media` components into the public
//! `VideoService::process_video` operation: input validation, scene
//! detection with fallback, per-scene key-frame selection and
//! characterization, aggregate quality scoring, and service-level metrics.

pub mod error;
pub mod metrics;
pub mod service;

pub use error::{PipelineError, PipelineResult};
pub use metrics::{MetricsSnapshot, ServiceMetrics};
pub use service::VideoService;
