use image::Rgb;
use crate::{
    pipeline::{Pipeline, ShapeSelection},
    traits::{ContourTracer, ImagePreprocessor, PixelClassifier},
    algorithms::{
        ColorPaintover,
        ColorQuantization,
        EdgeMajority,
        MooreTracer,
        RiverColorClassifier,
    },
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    classifier: Option<Box<dyn PixelClassifier>>,
    classify: bool,
    tracer: Option<Box<dyn ContourTracer>>,
    selection: ShapeSelection,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            classifier: None,
            classify: true,
            tracer: None,
            selection: ShapeSelection::default(),
        }
    }

    /// Add a preprocessor; preprocessors run in the order they were added
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the classifier (replaces any existing one and re-enables classification)
    pub fn set_classifier<C>(mut self, classifier: C) -> Self
    where
        C: PixelClassifier + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self.classify = true;
        self
    }

    /// Trace the preprocessed image directly, one shape per color region
    pub fn without_classification(mut self) -> Self {
        self.classifier = None;
        self.classify = false;
        self
    }

    /// Set the contour tracer (replaces any existing one)
    pub fn set_tracer<T>(mut self, tracer: T) -> Self
    where
        T: ContourTracer + 'static,
    {
        self.tracer = Some(Box::new(tracer));
        self
    }

    pub fn with_selection(mut self, selection: ShapeSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Add the default high-bit color quantization
    pub fn with_quantization(self) -> Self {
        self.add_preprocessor(ColorQuantization::default())
    }

    /// Add a paintover of `from` colors with `to`
    pub fn with_paintover(self, from: impl IntoIterator<Item = Rgb<u8>>, to: Rgb<u8>) -> Self {
        self.add_preprocessor(ColorPaintover::new(from, to))
    }

    /// Add whitening of the dominant border color
    pub fn with_edge_majority_removal(self) -> Self {
        self.add_preprocessor(EdgeMajority::default())
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let classifier = if self.classify {
            Some(
                self.classifier
                    .unwrap_or_else(|| Box::new(RiverColorClassifier)),
            )
        } else {
            None
        };

        let tracer = self.tracer
            .unwrap_or_else(|| Box::new(MooreTracer::default()));

        Pipeline::new(self.preprocessors, classifier, tracer, self.selection)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
