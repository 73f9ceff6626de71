//! Service-level metrics.
//!
//! Two layers, both fed once per processed video:
//! - the `metrics` facade (counters/histograms for whatever exporter the
//!   host installs)
//! - an explicit cumulative accumulator holding running averages across the
//!   life of a service instance. The accumulator is injectable and shared
//!   behind `Arc<Mutex<..>>`; it is append/merge-only.

use metrics::{counter, histogram};
use std::sync::{Arc, Mutex};

/// Metric names as constants for consistency.
pub mod names {
    pub const VIDEOS_PROCESSED_TOTAL: &str = "vscene_videos_processed_total";
    pub const SCENES_DETECTED_TOTAL: &str = "vscene_scenes_detected_total";
    pub const KEY_FRAMES_SELECTED_TOTAL: &str = "vscene_key_frames_selected_total";
    pub const PROCESSING_DURATION_SECONDS: &str = "vscene_processing_duration_seconds";
    pub const VIDEO_QUALITY: &str = "vscene_video_quality";
}

/// Record facade metrics for one processed video.
pub fn record_video_processed(
    detection_method: &'static str,
    scenes: usize,
    key_frames: usize,
    duration_secs: f64,
    overall_quality: f64,
) {
    let labels = [("method", detection_method)];
    counter!(names::VIDEOS_PROCESSED_TOTAL, &labels).increment(1);
    counter!(names::SCENES_DETECTED_TOTAL).increment(scenes as u64);
    counter!(names::KEY_FRAMES_SELECTED_TOTAL).increment(key_frames as u64);
    histogram!(names::PROCESSING_DURATION_SECONDS, &labels).record(duration_secs);
    histogram!(names::VIDEO_QUALITY).record(overall_quality);
}

/// Point-in-time view of the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSnapshot {
    pub videos_processed: u64,
    pub total_scenes: u64,
    pub total_key_frames: u64,
    pub avg_overall_quality: f64,
    pub avg_speed_ratio: f64,
}

/// Cumulative averages across all videos processed by one service instance.
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    snapshot: MetricsSnapshot,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle for injection into a service.
    pub fn shared() -> Arc<Mutex<ServiceMetrics>> {
        Arc::new(Mutex::new(ServiceMetrics::new()))
    }

    /// Merge one processed video into the running averages.
    pub fn record_video(
        &mut self,
        scenes: usize,
        key_frames: usize,
        overall_quality: f64,
        speed_ratio: f64,
    ) {
        let s = &mut self.snapshot;
        s.videos_processed += 1;
        s.total_scenes += scenes as u64;
        s.total_key_frames += key_frames as u64;

        let n = s.videos_processed as f64;
        s.avg_overall_quality += (overall_quality - s.avg_overall_quality) / n;
        s.avg_speed_ratio += (speed_ratio - s.avg_speed_ratio) / n;
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let metrics = ServiceMetrics::new();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_running_averages() {
        let mut metrics = ServiceMetrics::new();
        metrics.record_video(5, 25, 0.8, 0.5);
        metrics.record_video(3, 9, 0.4, 1.5);

        let s = metrics.snapshot();
        assert_eq!(s.videos_processed, 2);
        assert_eq!(s.total_scenes, 8);
        assert_eq!(s.total_key_frames, 34);
        assert!((s.avg_overall_quality - 0.6).abs() < 1e-9);
        assert!((s.avg_speed_ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_shared_handle() {
        let shared = ServiceMetrics::shared();
        shared.lock().unwrap().record_video(1, 2, 0.5, 0.5);
        assert_eq!(shared.lock().unwrap().snapshot().videos_processed, 1);
    }
}
