use image::{Rgb, RgbImage};
use crate::{
    error::{validate_grid, Result},
    types::{Mask, PixelClass, Shape},
};

/// Trait for whole-image filters applied before classification
pub trait ImagePreprocessor: Send + Sync {
    /// Produce a filtered copy of the image
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage>;
}

/// Trait for per-pixel foreground/background classification
pub trait PixelClassifier: Send + Sync {
    /// Classify one pixel, independently of its neighbours
    fn classify(&self, pixel: Rgb<u8>) -> PixelClass;

    /// Build a mask by classifying every pixel of the grid
    fn classify_image(&self, grid: &RgbImage) -> Result<Mask> {
        validate_grid(grid.width(), grid.height())?;
        Ok(Mask::from_fn(grid.width(), grid.height(), |x, y| {
            self.classify(*grid.get_pixel(x, y)).is_foreground()
        }))
    }
}

/// Trait for boundary tracing over a region image
pub trait ContourTracer: Send + Sync {
    /// Trace every region of the image, in discovery order
    fn trace(&self, regions: &RgbImage) -> Result<Vec<Shape>>;
}

/// Trait for drawing traced shapes back onto an image
pub trait ShapeRenderer: Send + Sync {
    /// Return a copy of the image with the shapes drawn on it
    fn render(&self, image: &RgbImage, shapes: &[Shape]) -> RgbImage;
}
