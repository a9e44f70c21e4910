//! Ranking of traced shapes and color-consistent grouping.
//!
//! A [`ShapeCatalog`] owns the region image it traces and borrows the
//! untouched original for color sampling. Tracing happens on the first query
//! and every later query reads the cached result, so repeated calls return
//! the very same slices.

use std::cell::OnceCell;

use image::RgbImage;
use crate::{
    algorithms::MooreTracer,
    color::Hsb,
    error::{validate_same_size, Result},
    traits::ContourTracer,
    types::{Mask, Shape, WHITE},
};

/// Largest per-channel HSB difference between a shape and the largest shape
/// for both to count as the same river.
pub const COLOR_SIMILARITY_TOLERANCE: f32 = 0.23;

static DEFAULT_TRACER: MooreTracer = MooreTracer { background: WHITE };

/// Length of the closed boundary; zero for a single point.
pub fn perimeter(shape: &Shape) -> f64 {
    use geo::EuclideanLength;
    shape.polygon().to_line_string().euclidean_length()
}

/// Shapes sorted by decreasing perimeter, with the perimeters alongside.
#[derive(Debug)]
struct Ranking {
    shapes: Vec<Shape>,
    perimeters: Vec<f64>,
}

impl Ranking {
    fn from_scan(shapes: Vec<Shape>) -> Self {
        let mut ranked: Vec<(Shape, f64)> = shapes
            .into_iter()
            .map(|shape| {
                let length = perimeter(&shape);
                (shape, length)
            })
            .collect();

        // Stable: equal perimeters keep discovery order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (shapes, perimeters) = ranked.into_iter().unzip();
        Self { shapes, perimeters }
    }
}

pub struct ShapeCatalog<'a> {
    tracer: &'a dyn ContourTracer,
    regions: RgbImage,
    original: &'a RgbImage,
    ranking: OnceCell<Ranking>,
    related_len: OnceCell<usize>,
}

impl<'a> ShapeCatalog<'a> {
    /// Catalog for a region image (background white), sampling colors from `original`.
    pub fn new(regions: RgbImage, original: &'a RgbImage) -> Result<Self> {
        Self::with_tracer(&DEFAULT_TRACER, regions, original)
    }

    pub fn from_mask(mask: &Mask, original: &'a RgbImage) -> Result<Self> {
        Self::new(mask.to_image(), original)
    }

    /// Fails with `InvalidGrid` when either image is empty or their sizes differ.
    pub fn with_tracer(
        tracer: &'a dyn ContourTracer,
        regions: RgbImage,
        original: &'a RgbImage,
    ) -> Result<Self> {
        validate_same_size(regions.dimensions(), original.dimensions())?;
        Ok(Self {
            tracer,
            regions,
            original,
            ranking: OnceCell::new(),
            related_len: OnceCell::new(),
        })
    }

    pub fn into_regions(self) -> RgbImage {
        self.regions
    }

    fn ranking(&self) -> Result<&Ranking> {
        if let Some(ranking) = self.ranking.get() {
            return Ok(ranking);
        }
        let ranking = Ranking::from_scan(self.tracer.trace(&self.regions)?);
        Ok(self.ranking.get_or_init(|| ranking))
    }

    /// Every traced shape, largest perimeter first.
    pub fn all_shapes_by_size(&self) -> Result<&[Shape]> {
        Ok(&self.ranking()?.shapes)
    }

    /// Perimeters matching [`ShapeCatalog::all_shapes_by_size`] index for index.
    pub fn perimeters(&self) -> Result<&[f64]> {
        Ok(&self.ranking()?.perimeters)
    }

    pub fn shape_count(&self) -> Result<usize> {
        Ok(self.ranking()?.shapes.len())
    }

    pub fn largest_shape(&self) -> Result<Option<&Shape>> {
        Ok(self.all_shapes_by_size()?.first())
    }

    /// The largest shape followed by every next-largest shape whose boundary
    /// color stays within [`COLOR_SIMILARITY_TOLERANCE`] of it.
    ///
    /// The walk stops at the first shape that does not match; smaller shapes
    /// after it are never considered, even if their color would match.
    /// Empty when nothing was traced.
    pub fn largest_related_group(&self) -> Result<&[Shape]> {
        let shapes = self.all_shapes_by_size()?;
        let len = *self.related_len.get_or_init(|| self.related_prefix_len(shapes));
        Ok(&shapes[..len])
    }

    fn related_prefix_len(&self, shapes: &[Shape]) -> usize {
        let Some((largest, rest)) = shapes.split_first() else {
            return 0;
        };
        let base = self.average_boundary_hsb(largest);

        1 + rest
            .iter()
            .take_while(|shape| {
                base.within(&self.average_boundary_hsb(shape), COLOR_SIMILARITY_TOLERANCE)
            })
            .count()
    }

    /// Mean HSB of the original image sampled at every boundary point.
    pub fn average_boundary_hsb(&self, shape: &Shape) -> Hsb {
        let mut total = Hsb::default();
        let mut samples = 0usize;

        for p in shape.polygon().points() {
            let Some(pixel) = self.original.get_pixel_checked(p.x as u32, p.y as u32) else {
                continue;
            };
            let hsb = Hsb::from_rgb(*pixel);
            total.hue += hsb.hue;
            total.saturation += hsb.saturation;
            total.brightness += hsb.brightness;
            samples += 1;
        }

        if samples == 0 {
            return total;
        }
        let n = samples as f32;
        Hsb::new(total.hue / n, total.saturation / n, total.brightness / n)
    }
}
