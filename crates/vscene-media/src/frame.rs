//! Decoded frame buffer and the per-video frame reader trait.

use async_trait::async_trait;

use crate::error::MediaResult;
use crate::probe::VideoInfo;

/// One decoded frame as packed RGB24.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,

    /// Packed RGB pixel data, `width * height * 3` bytes.
    pub data: Vec<u8>,
}

impl Frame {
    /// Channel count of the packed buffer.
    pub const CHANNELS: u8 = 3;

    /// Create a frame from packed RGB24 data.
    ///
    /// Callers must supply `width * height * 3` bytes; a short buffer is a
    /// contract violation surfaced at decode time, not here.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// Pixel count.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Grayscale conversion using BT.601 luma weights, one byte per pixel.
    pub fn to_gray(&self) -> Vec<u8> {
        self.data
            .chunks_exact(3)
            .map(|px| {
                let luma =
                    0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2]);
                luma.round().min(255.0) as u8
            })
            .collect()
    }
}

/// Per-video frame reader.
///
/// One implementation instance is owned exclusively by a single processing
/// call for its duration; dropping it releases any underlying decode handle.
#[async_trait]
pub trait FrameSource: Send {
    /// Source video metadata.
    fn info(&self) -> &VideoInfo;

    /// Decode the frame at the given index.
    async fn read_frame(&mut self, index: u64) -> MediaResult<Frame>;

    /// Number of frames decoded so far, for throughput accounting.
    fn frames_read(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_conversion_solid() {
        let frame = Frame::new(2, 1, vec![255, 255, 255, 0, 0, 0]);
        let gray = frame.to_gray();
        assert_eq!(gray, vec![255, 0]);
    }

    #[test]
    fn test_gray_conversion_luma_weights() {
        // Pure green carries the largest luma weight
        let frame = Frame::new(3, 1, vec![255, 0, 0, 0, 255, 0, 0, 0, 255]);
        let gray = frame.to_gray();
        assert!(gray[1] > gray[0]);
        assert!(gray[0] > gray[2]);
    }

    #[test]
    fn test_pixel_count() {
        let frame = Frame::new(4, 2, vec![0; 24]);
        assert_eq!(frame.pixel_count(), 8);
    }
}
