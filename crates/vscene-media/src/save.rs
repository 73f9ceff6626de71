//! Key-frame image persistence.
//!
//! Saved frames are resized to the configured target dimensions and written
//! under deterministic names: `scene_<3-digit>_frame_<6-digit>.<ext>`.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops::FilterType, ImageBuffer, Rgb, RgbImage};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{MediaError, MediaResult};
use crate::frame::Frame;

/// Deterministic file name for a saved key frame.
pub fn key_frame_file_name(scene_number: u32, frame_number: u64, format: &str) -> String {
    format!("scene_{scene_number:03}_frame_{frame_number:06}.{format}")
}

/// Resize and write one key frame, returning the written path.
pub fn save_key_frame(
    frame: &Frame,
    output_dir: &Path,
    scene_number: u32,
    frame_number: u64,
    target_dimensions: (u32, u32),
    format: &str,
    quality: u8,
) -> MediaResult<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let img: RgbImage =
        ImageBuffer::<Rgb<u8>, _>::from_raw(frame.width, frame.height, frame.data.clone())
            .ok_or_else(|| {
                MediaError::ImageEncode(format!(
                    "Frame buffer does not match {}x{}",
                    frame.width, frame.height
                ))
            })?;

    let (target_w, target_h) = target_dimensions;
    let img = if frame.width != target_w || frame.height != target_h {
        image::imageops::resize(&img, target_w, target_h, FilterType::Triangle)
    } else {
        img
    };

    let path = output_dir.join(key_frame_file_name(scene_number, frame_number, format));
    match format {
        "jpg" | "jpeg" => {
            let file = fs::File::create(&path)?;
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
            encoder
                .encode_image(&img)
                .map_err(|e| MediaError::ImageEncode(e.to_string()))?;
        }
        _ => {
            img.save(&path)
                .map_err(|e| MediaError::ImageEncode(e.to_string()))?;
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_format() {
        assert_eq!(
            key_frame_file_name(3, 1234, "jpg"),
            "scene_003_frame_001234.jpg"
        );
        assert_eq!(
            key_frame_file_name(12, 7, "png"),
            "scene_012_frame_000007.png"
        );
    }

    #[test]
    fn test_save_and_resize() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::new(8, 8, vec![200; 8 * 8 * 3]);

        let path = save_key_frame(&frame, dir.path(), 1, 42, (4, 4), "png", 85).unwrap();
        assert!(path.exists());
        assert!(path.to_string_lossy().ends_with("scene_001_frame_000042.png"));

        let saved = image::open(&path).unwrap();
        assert_eq!(saved.width(), 4);
        assert_eq!(saved.height(), 4);
    }

    #[test]
    fn test_save_jpeg_quality_path() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::new(8, 8, vec![90; 8 * 8 * 3]);

        let path = save_key_frame(&frame, dir.path(), 2, 1, (8, 8), "jpg", 60).unwrap();
        assert!(path.exists());
        assert!(path.to_string_lossy().ends_with("scene_002_frame_000001.jpg"));
    }
}
