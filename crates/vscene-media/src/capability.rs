//! Strategy availability reporting.
//!
//! Detectors and the decode port branch on which external tools are present.
//! The availability check is made at construction time through this trait so
//! fallback behavior can be unit-tested by injecting a fake provider instead
//! of manipulating PATH.

/// Reports which processing strategies are available.
pub trait CapabilityProvider: Send + Sync {
    /// FFmpeg binary is available (frame decoding, content detection).
    fn has_ffmpeg(&self) -> bool;

    /// FFprobe binary is available (container introspection).
    fn has_ffprobe(&self) -> bool;

    /// The FFmpeg scene-change filter path is usable.
    fn has_content_detection(&self) -> bool {
        self.has_ffmpeg()
    }
}

/// Probes the system PATH once at construction.
#[derive(Debug, Clone)]
pub struct SystemCapabilities {
    ffmpeg: bool,
    ffprobe: bool,
}

impl SystemCapabilities {
    /// Probe the PATH for ffmpeg and ffprobe.
    pub fn probe() -> Self {
        Self {
            ffmpeg: which::which("ffmpeg").is_ok(),
            ffprobe: which::which("ffprobe").is_ok(),
        }
    }
}

impl Default for SystemCapabilities {
    fn default() -> Self {
        Self::probe()
    }
}

impl CapabilityProvider for SystemCapabilities {
    fn has_ffmpeg(&self) -> bool {
        self.ffmpeg
    }

    fn has_ffprobe(&self) -> bool {
        self.ffprobe
    }
}

/// Fixed capability set for tests and forced-fallback scenarios.
#[derive(Debug, Clone, Copy)]
pub struct StaticCapabilities {
    pub ffmpeg: bool,
    pub ffprobe: bool,
}

impl StaticCapabilities {
    /// Everything available.
    pub fn all() -> Self {
        Self {
            ffmpeg: true,
            ffprobe: true,
        }
    }

    /// Nothing available.
    pub fn none() -> Self {
        Self {
            ffmpeg: false,
            ffprobe: false,
        }
    }
}

impl CapabilityProvider for StaticCapabilities {
    fn has_ffmpeg(&self) -> bool {
        self.ffmpeg
    }

    fn has_ffprobe(&self) -> bool {
        self.ffprobe
    }
}
