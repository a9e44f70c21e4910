//! # River Detection Library
//!
//! Finds rivers in aerial and satellite images by color.
//!
//! Every pixel is classified as river-colored or not, the boundary of every
//! connected region of the result is traced with Moore-neighbor tracing, and
//! the traced shapes are ranked by perimeter. The largest shape plus the
//! next-largest shapes whose boundary colors match it form the river.
//!
//! ## Core Features
//!
//! - **Pixel classification**: fixed HSB window around water colors
//! - **Boundary tracing**: one ordered boundary polygon per region
//! - **Shape catalog**: perimeter ranking and color-consistent grouping
//! - **Preprocessing**: quantization, color paintover, border-color removal
//! - **Output**: red outlines drawn on the original, GeoJSON export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use riverdog::{io, Pipeline, ShapeRenderer, OutlineRenderer};
//!
//! let image = io::load_rgb("aerial.png")?;
//! let result = Pipeline::builder().build().process(&image)?;
//!
//! let outlined = OutlineRenderer::default().render(&image, &result.detection.segments);
//! io::save_rgb(&outlined, "aerial-riverDetected.png")?;
//! result.detection.save_geojson("aerial-shapes.geojson")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Components on their own
//!
//! ```rust,no_run
//! use riverdog::{PixelClassifier, RiverColorClassifier, ShapeCatalog};
//!
//! let original = riverdog::io::load_rgb("aerial.png")?;
//! let mask = RiverColorClassifier.classify_image(&original)?;
//! let catalog = ShapeCatalog::from_mask(&mask, &original)?;
//! for shape in catalog.largest_related_group()? {
//!     println!("{} points, {}", shape.polygon().len(), shape.color_hex());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod color;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod catalog;
pub mod pipeline;
pub mod config;
pub mod io;

#[cfg(test)]
mod fixtures;

pub use error::{RiverError, Result};
pub use color::{Hsb, HsbWindow};
pub use types::{BoundaryPolygon, Mask, PixelClass, Point, Shape, ShapeKind};
pub use traits::*;
pub use algorithms::*;
pub use catalog::{perimeter, ShapeCatalog, COLOR_SIMILARITY_TOLERANCE};
pub use pipeline::{builder::PipelineBuilder, Pipeline, ProcessedImage, RiverDetection, ShapeSelection};
pub use config::{PipelineSettings, PreprocessStep};
