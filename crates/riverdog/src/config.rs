use image::Rgb;
use serde::{Deserialize, Serialize};
use crate::{
    algorithms::{ColorPaintover, ColorQuantization, EdgeMajority, OutlineRenderer},
    pipeline::{builder::PipelineBuilder, Pipeline, ShapeSelection},
    types::WHITE,
};

/// One configurable preprocessing stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreprocessStep {
    /// Keep the highest bit of every channel
    Quantize,
    /// Replace each `from` color with `to`
    Paintover {
        from: Vec<[u8; 3]>,
        #[serde(default = "white")]
        to: [u8; 3],
    },
    /// Whiten the most common border color
    EdgeMajority,
}

impl PreprocessStep {
    /// Paint the quantized colors that cannot be water white.
    pub fn not_river_paintover() -> Self {
        let palette = ColorPaintover::not_river();
        Self::Paintover {
            from: palette.from.iter().map(|c| c.0).collect(),
            to: palette.to.0,
        }
    }

    fn apply(&self, builder: PipelineBuilder) -> PipelineBuilder {
        match self {
            Self::Quantize => builder.add_preprocessor(ColorQuantization::default()),
            Self::Paintover { from, to } => {
                builder.with_paintover(from.iter().copied().map(Rgb), Rgb(*to))
            }
            Self::EdgeMajority => builder.add_preprocessor(EdgeMajority::default()),
        }
    }
}

fn white() -> [u8; 3] {
    WHITE.0
}

/// Serializable description of a [`Pipeline`] and its outline color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub preprocessing: Vec<PreprocessStep>,
    /// Classify pixels by color before tracing
    pub classify: bool,
    pub selection: ShapeSelection,
    pub outline_color: [u8; 3],
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            preprocessing: Vec::new(),
            classify: true,
            selection: ShapeSelection::default(),
            outline_color: OutlineRenderer::default().color.0,
        }
    }
}

impl PipelineSettings {
    /// Quantize, drop non-river colors and whiten the border color before tracing.
    pub fn filtered() -> Self {
        Self {
            preprocessing: vec![
                PreprocessStep::Quantize,
                PreprocessStep::not_river_paintover(),
                PreprocessStep::EdgeMajority,
            ],
            ..Self::default()
        }
    }

    pub fn builder(&self) -> PipelineBuilder {
        let builder = self
            .preprocessing
            .iter()
            .fold(Pipeline::builder(), |builder, step| step.apply(builder))
            .with_selection(self.selection);

        if self.classify {
            builder
        } else {
            builder.without_classification()
        }
    }

    pub fn build(&self) -> Pipeline {
        self.builder().build()
    }

    pub fn renderer(&self) -> OutlineRenderer {
        OutlineRenderer::new(Rgb(self.outline_color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PipelineSettings::default();
        assert!(settings.classify);
        assert_eq!(settings.selection, ShapeSelection::RelatedGroup);
        assert_eq!(settings.renderer().color, Rgb([255, 0, 0]));
        assert_eq!(
            settings.build().info(),
            "Pipeline: 0 preprocessors, classification on, selection related_group"
        );
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: PipelineSettings = serde_json::from_str(r#"{ "selection": "all" }"#).unwrap();
        assert_eq!(settings.selection, ShapeSelection::All);
        assert!(settings.classify);
        assert!(settings.preprocessing.is_empty());
    }

    #[test]
    fn test_preprocess_steps_are_tagged() {
        let json = r#"{
            "preprocessing": [
                { "type": "quantize" },
                { "type": "paintover", "from": [[128, 0, 0]] },
                { "type": "edge_majority" }
            ],
            "classify": false
        }"#;
        let settings: PipelineSettings = serde_json::from_str(json).unwrap();
        assert_eq!(
            settings.preprocessing,
            vec![
                PreprocessStep::Quantize,
                PreprocessStep::Paintover { from: vec![[128, 0, 0]], to: [255, 255, 255] },
                PreprocessStep::EdgeMajority,
            ]
        );
        assert_eq!(
            settings.build().info(),
            "Pipeline: 3 preprocessors, classification off, selection related_group"
        );
    }

    #[test]
    fn test_filtered_round_trips() {
        let settings = PipelineSettings::filtered();
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<PipelineSettings>(&json).unwrap(), settings);

        match &settings.preprocessing[1] {
            PreprocessStep::Paintover { from, to } => {
                assert_eq!(from.len(), 4);
                assert!(from.contains(&[128, 0, 128]));
                assert_eq!(*to, [255, 255, 255]);
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_filtered_pipeline_whitens_land() {
        use image::RgbImage;

        // Green land quantizes to (0, 128, 0) and is painted white; the dark
        // blue river survives quantization as (0, 0, 128)
        let image = RgbImage::from_fn(6, 6, |x, _| {
            if x == 2 { Rgb([20, 60, 200]) } else { Rgb([40, 200, 40]) }
        });
        let result = PipelineSettings::filtered().build().process(&image).unwrap();
        assert_eq!(result.detection.segments.len(), 1);
        assert_eq!(result.detection.segments[0].polygon().seed().x, 2);
    }
}
