//! Per-frame signal analysis.
//!
//! Pure functions over decoded frame buffers: color/grayscale histograms,
//! quality sub-metrics, and frame-to-frame motion scoring.

pub mod histogram;
pub mod motion;
pub mod quality;

pub use histogram::{correlation, gray_histogram, normalized_entropy, ColorHistogram};
pub use motion::motion_score;
pub use quality::analyze_frame;
