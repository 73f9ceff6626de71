//! Content-aware scene detection via FFmpeg's scene-change filter.
//!
//! Runs `select='gt(scene,θ)',showinfo` over the input and parses boundary
//! timestamps from the filter's stderr log. θ maps the configured 0-100
//! sensitivity onto FFmpeg's 0-1 scene score.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use vscene_models::SceneDetectionMethod;

use super::{spans_from_boundaries, DetectOptions, SceneDetector, SceneSpan, VideoStream};
use crate::error::{MediaError, MediaResult};

/// FFmpeg-backed content-change detector.
#[derive(Debug, Clone, Default)]
pub struct ContentDetector;

impl ContentDetector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SceneDetector for ContentDetector {
    async fn detect(
        &self,
        video: &mut VideoStream<'_>,
        opts: &DetectOptions,
    ) -> MediaResult<Vec<SceneSpan>> {
        let scene_score = (opts.threshold / 100.0).clamp(0.0, 1.0);
        let filter = format!("select='gt(scene,{scene_score})',showinfo");

        let output = Command::new("ffmpeg")
            .args(["-v", "info", "-i"])
            .arg(video.path)
            .args(["-vf", &filter, "-f", "null", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(MediaError::ffmpeg_failed(
                "Scene filter failed",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
                output.status.code(),
            ));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let cut_times = parse_showinfo_times(&stderr);
        debug!(cuts = cut_times.len(), "Content detector found cut points");

        let fps = video.info.safe_fps();
        let total_frames = video.info.safe_frame_count();

        let mut boundaries: Vec<u64> = vec![0];
        for t in cut_times {
            let frame = (t * fps).round() as u64;
            if frame > *boundaries.last().unwrap() && frame < total_frames {
                boundaries.push(frame);
            }
        }
        boundaries.push(total_frames);

        Ok(spans_from_boundaries(
            &boundaries,
            fps,
            opts.min_scene_length,
        ))
    }

    fn method(&self) -> SceneDetectionMethod {
        SceneDetectionMethod::Content
    }

    fn name(&self) -> &'static str {
        "content"
    }
}

/// Extract `pts_time:` values from showinfo stderr output.
///
/// Lines look like:
/// `[Parsed_showinfo_1 @ 0x...] n:   0 pts:  90090 pts_time:3.003    ...`
fn parse_showinfo_times(stderr: &str) -> Vec<f64> {
    let mut times = Vec::new();
    for line in stderr.lines() {
        if !line.contains("Parsed_showinfo") {
            continue;
        }
        if let Some(idx) = line.find("pts_time:") {
            let rest = &line[idx + "pts_time:".len()..];
            let token: String = rest
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            if let Ok(t) = token.parse::<f64>() {
                if t >= 0.0 {
                    times.push(t);
                }
            }
        }
    }
    times.sort_by(|a, b| a.partial_cmp(b).unwrap());
    times
}
