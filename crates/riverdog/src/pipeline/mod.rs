pub mod builder;

use image::RgbImage;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;
use crate::{
    catalog::ShapeCatalog,
    error::{validate_grid, Result},
    traits::{ContourTracer, ImagePreprocessor, PixelClassifier},
    types::Shape,
};

/// Which traced shapes a pipeline reports as river segments
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShapeSelection {
    /// Every traced shape, largest first
    All,
    /// Only the shape with the largest perimeter
    Largest,
    /// The largest shape and its color-consistent followers
    #[default]
    RelatedGroup,
}

/// River segments found in one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverDetection {
    pub segments: Vec<Shape>,
    /// Number of shapes traced before selection
    pub shape_count: usize,
    pub image_width: u32,
    pub image_height: u32,
}

impl RiverDetection {
    pub fn river_found(&self) -> bool {
        !self.segments.is_empty()
    }
}

/// Output of [`Pipeline::process`]
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// The image the tracer ran on: the classified mask, or the preprocessed
    /// image when classification is disabled
    pub regions: RgbImage,
    pub detection: RiverDetection,
}

/// Preprocessing, classification, tracing and selection in one pass
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    classifier: Option<Box<dyn PixelClassifier>>,
    tracer: Box<dyn ContourTracer>,
    selection: ShapeSelection,
}

impl Pipeline {
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        classifier: Option<Box<dyn PixelClassifier>>,
        tracer: Box<dyn ContourTracer>,
        selection: ShapeSelection,
    ) -> Self {
        Self {
            preprocessors,
            classifier,
            tracer,
            selection,
        }
    }

    /// Preprocess and classify `image`, producing the region image the
    /// tracer walks.
    pub fn prepare(&self, image: &RgbImage) -> Result<RgbImage> {
        validate_grid(image.width(), image.height())?;

        let mut prepared = image.clone();
        for preprocessor in &self.preprocessors {
            prepared = preprocessor.preprocess(&prepared)?;
        }

        match &self.classifier {
            Some(classifier) => {
                let mask = classifier.classify_image(&prepared)?;
                debug!(foreground = mask.foreground_count(), "classified");
                Ok(mask.to_image())
            }
            None => Ok(prepared),
        }
    }

    /// Prepare `original` and catalog it with this pipeline's tracer.
    pub fn catalog<'a>(&'a self, original: &'a RgbImage) -> Result<ShapeCatalog<'a>> {
        let regions = self.prepare(original)?;
        ShapeCatalog::with_tracer(self.tracer.as_ref(), regions, original)
    }

    /// Run `image` through every stage.
    ///
    /// Boundary colors are always sampled from `image` itself, never from a
    /// preprocessed copy.
    pub fn process(&self, image: &RgbImage) -> Result<ProcessedImage> {
        let (width, height) = image.dimensions();
        let span = tracing::debug_span!("process", width, height);
        let _enter = span.enter();

        let catalog = self.catalog(image)?;
        let shape_count = catalog.shape_count()?;

        let selected = match self.selection {
            ShapeSelection::All => catalog.all_shapes_by_size()?.to_vec(),
            ShapeSelection::Largest => catalog.largest_shape()?.cloned().into_iter().collect(),
            ShapeSelection::RelatedGroup => catalog.largest_related_group()?.to_vec(),
        };
        let segments: Vec<Shape> = selected.into_iter().map(Shape::into_river).collect();
        debug!(shape_count, segments = segments.len(), selection = %self.selection, "traced");

        Ok(ProcessedImage {
            regions: catalog.into_regions(),
            detection: RiverDetection {
                segments,
                shape_count,
                image_width: width,
                image_height: height,
            },
        })
    }

    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} preprocessors, {}, selection {}",
            self.preprocessors.len(),
            if self.classifier.is_some() { "classification on" } else { "classification off" },
            self.selection,
        )
    }
}
