//! Video processing service.
//!
//! `VideoService` owns one `process_video` pipeline pass: validate the
//! input, probe and open it through the decoder port, detect scenes via the
//! configured fallback chain, select and characterize key frames per scene,
//! then score the run and fold it into the service metrics.
//!
//! Construction is explicit: the decoder, capability provider, and metrics
//! accumulator are all injected, which keeps fallback behavior and the
//! orchestration itself testable without FFmpeg on the machine.

use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info, warn};

use vscene_media::{
    detect::{self, DetectOptions, VideoStream},
    select::{selector_for, SelectionContext},
    CapabilityProvider, FfmpegDecoder, FrameDecoder, MediaError, SceneCharacterizer,
    SystemCapabilities, VideoInfo,
};
use vscene_models::{
    PerformanceReport, QualityReport, VideoProcessingConfig, VideoProcessingResult, VideoScene,
    VideoSourceInfo,
};

use crate::error::{PipelineError, PipelineResult};
use crate::metrics::{record_video_processed, ServiceMetrics};

/// Scene count at which detection confidence saturates.
const SCENE_COUNT_TARGET: f64 = 10.0;

/// The video processing orchestrator.
pub struct VideoService {
    decoder: Arc<dyn FrameDecoder>,
    capabilities: Arc<dyn CapabilityProvider>,
    characterizer: SceneCharacterizer,
    metrics: Arc<Mutex<ServiceMetrics>>,
}

impl VideoService {
    /// Service over the system FFmpeg installation.
    pub fn new() -> Self {
        Self::with_decoder(
            Arc::new(FfmpegDecoder::new()),
            Arc::new(SystemCapabilities::probe()),
        )
    }

    /// Service over an injected decoder and capability provider.
    pub fn with_decoder(
        decoder: Arc<dyn FrameDecoder>,
        capabilities: Arc<dyn CapabilityProvider>,
    ) -> Self {
        Self {
            decoder,
            capabilities,
            characterizer: SceneCharacterizer::new(),
            metrics: ServiceMetrics::shared(),
        }
    }

    /// Replace the metrics accumulator with a shared handle.
    pub fn with_metrics(mut self, metrics: Arc<Mutex<ServiceMetrics>>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Handle to the service metrics accumulator.
    pub fn metrics(&self) -> Arc<Mutex<ServiceMetrics>> {
        Arc::clone(&self.metrics)
    }

    /// Process a video into scenes and key frames.
    ///
    /// Saved frames (when `config.save_frames` is set) go to an
    /// auto-created directory under the system temp dir; use
    /// [`VideoService::process_video_to`] to direct them elsewhere.
    ///
    /// Only precondition failures (missing decoder, missing or oversized
    /// file, unreadable container) surface as errors. Per-scene failures
    /// degrade to scenes with empty key-frame lists, so an empty result is a
    /// valid, non-exceptional outcome.
    pub async fn process_video(
        &self,
        path: impl AsRef<Path>,
        config: &VideoProcessingConfig,
    ) -> PipelineResult<VideoProcessingResult> {
        self.process_video_to(path, config, None).await
    }

    /// Process a video, saving any key-frame images under `output_dir`.
    pub async fn process_video_to(
        &self,
        path: impl AsRef<Path>,
        config: &VideoProcessingConfig,
        output_dir: Option<&Path>,
    ) -> PipelineResult<VideoProcessingResult> {
        let path = path.as_ref();
        let started = Instant::now();

        config.validate().map_err(PipelineError::config)?;

        if !self.decoder.is_available() {
            return Err(MediaError::FfmpegNotFound.into());
        }

        // Fail fast on the file itself, before any decoder work
        let file_size = std::fs::metadata(path)
            .map_err(|_| MediaError::FileNotFound(path.to_path_buf()))?
            .len();
        let limit = config.max_file_size_bytes();
        if file_size > limit {
            return Err(MediaError::FileTooLarge {
                size: file_size,
                limit,
            }
            .into());
        }

        let info = self.decoder.probe(path).await?;
        let mut source = self.decoder.open(path).await?;

        info!(
            path = %path.display(),
            duration = info.duration,
            fps = info.fps,
            frames = info.total_frames,
            "Processing video"
        );

        // Scene detection through the configured fallback chain
        let chain = detect::detector_chain(
            config.scene_detection_method,
            self.capabilities.as_ref(),
        );
        let opts = DetectOptions {
            threshold: config.scene_threshold,
            min_scene_length: config.min_scene_length,
        };
        let mut stream = VideoStream {
            path,
            info: info.clone(),
            source: source.as_mut(),
        };
        let (spans, method_used) = detect::run_chain(&chain, &mut stream, &opts).await?;

        let save_dir = resolve_output_dir(config, output_dir)?;
        let selector = selector_for(config.frame_extraction_method);

        // Per-scene selection and characterization; a failing scene is
        // retained with an empty key-frame list rather than aborting the run
        let mut scenes: Vec<VideoScene> = Vec::with_capacity(spans.len());
        let mut total_key_frames = 0usize;

        for span in &spans {
            let remaining = (config.max_frames_total as usize).saturating_sub(total_key_frames);
            let budget = (config.frames_per_scene as usize).min(remaining) as u32;

            let key_frames = if budget == 0 {
                debug!(scene = span.scene_number, "Frame budget exhausted");
                Vec::new()
            } else {
                let ctx = SelectionContext {
                    config,
                    scene_number: span.scene_number,
                    frame_budget: budget,
                    save_dir: save_dir.as_deref(),
                };
                match selector.select(source.as_mut(), span, &ctx).await {
                    Ok(frames) => frames,
                    Err(e) => {
                        warn!(
                            scene = span.scene_number,
                            error = %e,
                            "Frame extraction failed, emitting empty scene"
                        );
                        Vec::new()
                    }
                }
            };

            total_key_frames += key_frames.len();

            let characteristics = self
                .characterizer
                .characterize(&key_frames, &config.scene_weights);

            scenes.push(VideoScene {
                scene_number: span.scene_number,
                start_time: span.start_time,
                end_time: span.end_time,
                start_frame: span.start_frame,
                end_frame: span.end_frame,
                frame_count: span.frame_count(),
                key_frames,
                scene_type: characteristics.scene_type,
                motion_intensity: characteristics.motion_intensity,
                color_diversity: characteristics.color_diversity,
                brightness_variation: characteristics.brightness_variation,
                quality_score: characteristics.quality_score,
            });
        }

        let frames_read = source.frames_read();
        drop(source);

        let processing_time = started.elapsed().as_secs_f64();
        let quality = score_quality(&scenes);
        let performance = score_performance(&info, frames_read, processing_time);

        self.metrics.lock().expect("metrics mutex poisoned").record_video(
            scenes.len(),
            total_key_frames,
            quality.overall_quality,
            performance.processing_speed_ratio,
        );
        record_video_processed(
            method_used.as_str(),
            scenes.len(),
            total_key_frames,
            processing_time,
            quality.overall_quality,
        );

        info!(
            scenes = scenes.len(),
            key_frames = total_key_frames,
            time = format!("{processing_time:.2}s"),
            quality = format!("{:.3}", quality.overall_quality),
            "Video processing complete"
        );

        Ok(VideoProcessingResult {
            scenes,
            total_key_frames,
            source: source_info(path, &info, file_size),
            processing_time_s: processing_time,
            detection_method_used: method_used,
            extraction_method_used: config.frame_extraction_method,
            quality,
            performance,
            config: config.clone(),
            output_dir: save_dir.map(|d| d.display().to_string()),
            processed_at: Utc::now(),
            metadata: HashMap::new(),
        })
    }
}

impl Default for VideoService {
    fn default() -> Self {
        Self::new()
    }
}

fn source_info(path: &Path, info: &VideoInfo, file_size: u64) -> VideoSourceInfo {
    VideoSourceInfo {
        path: path.display().to_string(),
        duration: info.duration,
        format: info.container.clone(),
        codec: info.codec.clone(),
        frame_rate: info.fps,
        total_frames: info.total_frames,
        width: info.width,
        height: info.height,
        file_size,
        bitrate: info.bitrate,
    }
}

/// Pick the save directory: the caller's, or an auto-created temp dir when
/// saving is on and no directory was given.
fn resolve_output_dir(
    config: &VideoProcessingConfig,
    explicit: Option<&Path>,
) -> PipelineResult<Option<PathBuf>> {
    if !config.save_frames {
        return Ok(None);
    }

    let dir = match explicit {
        Some(d) => d.to_path_buf(),
        None => std::env::temp_dir().join(format!("vscene-frames-{}", uuid::Uuid::new_v4())),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(Some(dir))
}

/// Aggregate quality-confidence scores for one run.
fn score_quality(scenes: &[VideoScene]) -> QualityReport {
    let detection = scene_detection_confidence(scenes);

    let frame_qualities: Vec<f64> = scenes
        .iter()
        .flat_map(|s| s.key_frames.iter().map(|f| f.quality.overall))
        .collect();
    let frame_quality = mean(&frame_qualities);

    let scene_qualities: Vec<f64> = scenes.iter().map(|s| s.quality_score).collect();
    let scene_quality = mean(&scene_qualities);

    QualityReport {
        scene_detection_confidence: detection,
        frame_extraction_quality: frame_quality,
        overall_quality: (0.3 * detection + 0.4 * frame_quality + 0.3 * scene_quality)
            .clamp(0.0, 1.0),
    }
}

/// Confidence in the scene partition: half from a reasonable scene count
/// (saturating at the target), half from inter-scene duration consistency.
fn scene_detection_confidence(scenes: &[VideoScene]) -> f64 {
    if scenes.is_empty() {
        return 0.0;
    }

    let count_score = (scenes.len() as f64 / SCENE_COUNT_TARGET).min(1.0);

    let durations: Vec<f64> = scenes.iter().map(|s| s.duration()).collect();
    let mean_duration = mean(&durations);
    let consistency = if durations.len() < 2 || mean_duration <= 0.0 {
        1.0
    } else {
        let variance = durations
            .iter()
            .map(|d| (d - mean_duration).powi(2))
            .sum::<f64>()
            / durations.len() as f64;
        (1.0 - variance.sqrt() / mean_duration).max(0.0)
    };

    0.5 * count_score + 0.5 * consistency
}

fn score_performance(info: &VideoInfo, frames_read: u64, processing_time: f64) -> PerformanceReport {
    let speed_ratio = if info.duration > 0.0 {
        processing_time / info.duration
    } else {
        0.0
    };

    let frames_per_second = if processing_time > 0.0 {
        frames_read as f64 / processing_time
    } else {
        0.0
    };

    // Decode buffer estimate: RGB24 bytes per frame at source resolution
    // (~2.7 MB per 1280x720 frame)
    let frame_bytes = (info.width as f64) * (info.height as f64) * 3.0;
    let estimated_memory_mb = frames_read as f64 * frame_bytes / (1024.0 * 1024.0);

    PerformanceReport {
        processing_speed_ratio: speed_ratio,
        frames_per_second,
        estimated_memory_mb,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use vscene_models::SceneType;

    fn scene(number: u32, start: f64, end: f64, quality: f64) -> VideoScene {
        VideoScene {
            scene_number: number,
            start_time: start,
            end_time: end,
            start_frame: (start * 30.0) as u64,
            end_frame: (end * 30.0) as u64,
            frame_count: ((end - start) * 30.0) as u64,
            key_frames: vec![],
            scene_type: SceneType::Static,
            motion_intensity: 0.0,
            color_diversity: 0.0,
            brightness_variation: 0.0,
            quality_score: quality,
        }
    }

    #[test]
    fn test_detection_confidence_empty() {
        assert_eq!(scene_detection_confidence(&[]), 0.0);
    }

    #[test]
    fn test_detection_confidence_single_scene() {
        // One scene: count score 0.1, consistency 1.0
        let scenes = vec![scene(1, 0.0, 10.0, 0.5)];
        let confidence = scene_detection_confidence(&scenes);
        assert!((confidence - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_detection_confidence_consistent_scenes() {
        // Ten equal scenes saturate both halves
        let scenes: Vec<VideoScene> = (0..10)
            .map(|i| scene(i + 1, i as f64 * 2.0, (i + 1) as f64 * 2.0, 0.5))
            .collect();
        let confidence = scene_detection_confidence(&scenes);
        assert!((confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_detection_confidence_bounded() {
        // Wildly uneven durations must not go negative
        let scenes = vec![
            scene(1, 0.0, 0.1, 0.5),
            scene(2, 0.1, 30.0, 0.5),
            scene(3, 30.0, 30.2, 0.5),
        ];
        let confidence = scene_detection_confidence(&scenes);
        assert!((0.0..=1.0).contains(&confidence));
    }

    #[test]
    fn test_quality_report_empty() {
        let report = score_quality(&[]);
        assert_eq!(report.scene_detection_confidence, 0.0);
        assert_eq!(report.frame_extraction_quality, 0.0);
        assert_eq!(report.overall_quality, 0.0);
    }

    #[test]
    fn test_performance_zero_duration_guard() {
        let info = VideoInfo {
            duration: 0.0,
            width: 1280,
            height: 720,
            fps: 0.0,
            total_frames: 0,
            codec: String::new(),
            container: String::new(),
            size: 0,
            bitrate: 0,
        };
        let report = score_performance(&info, 10, 0.0);
        assert_eq!(report.processing_speed_ratio, 0.0);
        assert_eq!(report.frames_per_second, 0.0);
    }

    #[test]
    fn test_estimated_memory_720p() {
        let info = VideoInfo {
            duration: 10.0,
            width: 1280,
            height: 720,
            fps: 30.0,
            total_frames: 300,
            codec: "h264".to_string(),
            container: "mp4".to_string(),
            size: 0,
            bitrate: 0,
        };
        let report = score_performance(&info, 1, 1.0);
        // One 1280x720 RGB frame is ~2.6 MB
        assert!((report.estimated_memory_mb - 2.64).abs() < 0.05);
    }
}
