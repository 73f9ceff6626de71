//! Scene-level characterization.
//!
//! Aggregates a scene's selected key frames into scene descriptors: motion
//! intensity, color diversity, brightness variation, a composite quality
//! score, and a categorical scene type.

use vscene_models::{KeyFrame, SceneType, SceneWeights};

/// Aggregated scene descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneCharacteristics {
    pub scene_type: SceneType,
    pub motion_intensity: f64,
    pub color_diversity: f64,
    pub brightness_variation: f64,
    pub quality_score: f64,
}

/// Computes scene descriptors from selected key frames.
#[derive(Debug, Clone, Default)]
pub struct SceneCharacterizer;

impl SceneCharacterizer {
    pub fn new() -> Self {
        Self
    }

    /// Characterize a scene from its key frames.
    ///
    /// An empty frame list is a valid input and yields all-zero metrics with
    /// scene type `Unknown`.
    pub fn characterize(
        &self,
        key_frames: &[KeyFrame],
        weights: &SceneWeights,
    ) -> SceneCharacteristics {
        if key_frames.is_empty() {
            return SceneCharacteristics::default();
        }

        let n = key_frames.len() as f64;
        let motion = key_frames.iter().map(|f| f.motion_score).sum::<f64>() / n;
        let brightness = key_frames.iter().map(|f| f.quality.brightness).sum::<f64>() / n;
        let contrast = key_frames.iter().map(|f| f.quality.contrast).sum::<f64>() / n;
        let diversity = key_frames
            .iter()
            .map(|f| f.quality.histogram_diversity)
            .sum::<f64>()
            / n;

        let brightness_variance = key_frames
            .iter()
            .map(|f| (f.quality.brightness - brightness).powi(2))
            .sum::<f64>()
            / n;
        let brightness_variation = brightness_variance.sqrt();

        let scene_type = classify(motion, brightness_variation, contrast);

        let exposure = 1.0 - (brightness - 0.5).abs() * 2.0;
        let quality_score = (contrast * weights.contrast
            + diversity * weights.diversity
            + exposure * weights.exposure
            + motion.min(0.5) * 2.0 * weights.motion)
            .clamp(0.0, 1.0);

        SceneCharacteristics {
            scene_type,
            motion_intensity: motion,
            color_diversity: diversity,
            brightness_variation,
            quality_score,
        }
    }
}

/// Priority-ordered decision rule for the scene label.
fn classify(motion: f64, brightness_variation: f64, contrast: f64) -> SceneType {
    if motion > 0.3 {
        SceneType::Action
    } else if brightness_variation > 0.2 {
        SceneType::Transition
    } else if contrast > 0.5 {
        SceneType::Dialogue
    } else {
        SceneType::Static
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vscene_models::FrameQuality;

    fn frame_with(brightness: f64, contrast: f64, diversity: f64, motion: f64) -> KeyFrame {
        KeyFrame::new(0, 0.0, 640, 360, 3)
            .with_quality(FrameQuality {
                sharpness: 0.5,
                brightness,
                contrast,
                histogram_diversity: diversity,
                overall: 0.5,
            })
            .with_motion(motion)
    }

    #[test]
    fn test_empty_scene_is_unknown() {
        let characterizer = SceneCharacterizer::new();
        let result = characterizer.characterize(&[], &SceneWeights::default());
        assert_eq!(result.scene_type, SceneType::Unknown);
        assert_eq!(result.motion_intensity, 0.0);
        assert_eq!(result.quality_score, 0.0);
    }

    #[test]
    fn test_high_motion_is_action() {
        let characterizer = SceneCharacterizer::new();
        let frames = vec![
            frame_with(0.5, 0.6, 0.5, 0.5),
            frame_with(0.5, 0.6, 0.5, 0.4),
        ];
        let result = characterizer.characterize(&frames, &SceneWeights::default());
        assert_eq!(result.scene_type, SceneType::Action);
    }

    #[test]
    fn test_brightness_swings_are_transition() {
        let characterizer = SceneCharacterizer::new();
        let frames = vec![
            frame_with(0.1, 0.3, 0.5, 0.0),
            frame_with(0.9, 0.3, 0.5, 0.0),
        ];
        let result = characterizer.characterize(&frames, &SceneWeights::default());
        assert!(result.brightness_variation > 0.2);
        assert_eq!(result.scene_type, SceneType::Transition);
    }

    #[test]
    fn test_high_contrast_is_dialogue() {
        let characterizer = SceneCharacterizer::new();
        let frames = vec![frame_with(0.5, 0.7, 0.5, 0.1)];
        let result = characterizer.characterize(&frames, &SceneWeights::default());
        assert_eq!(result.scene_type, SceneType::Dialogue);
    }

    #[test]
    fn test_flat_scene_is_static() {
        let characterizer = SceneCharacterizer::new();
        let frames = vec![frame_with(0.5, 0.2, 0.3, 0.05)];
        let result = characterizer.characterize(&frames, &SceneWeights::default());
        assert_eq!(result.scene_type, SceneType::Static);
    }

    #[test]
    fn test_quality_score_bounded() {
        let characterizer = SceneCharacterizer::new();
        for frames in [
            vec![frame_with(1.0, 1.0, 1.0, 1.0)],
            vec![frame_with(0.0, 0.0, 0.0, 0.0)],
            vec![frame_with(0.5, 0.6, 0.7, 0.25)],
        ] {
            let result = characterizer.characterize(&frames, &SceneWeights::default());
            assert!((0.0..=1.0).contains(&result.quality_score));
        }
    }
}
