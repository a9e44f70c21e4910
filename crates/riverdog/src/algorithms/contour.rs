use image::{Rgb, RgbImage};
use crate::{
    error::{validate_grid, Result},
    traits::ContourTracer,
    types::{BoundaryPolygon, Mask, Point, Shape, WHITE},
};

/// The eight neighbour offsets in clockwise order (y grows downward),
/// starting at the upper-left corner.
const CLOCKWISE: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Moore-neighbourhood boundary tracer.
///
/// Every pixel that is not `background` is foreground, and a region is a
/// group of pixels with exactly the same color. Columns are scanned left to
/// right, each bottom to top; the first unvisited pixel on the lower edge of
/// a region seeds a walk around its outline.
///
/// A region joined to the rest only through a diagonal may not be enclosed
/// by a single walk.
#[derive(Debug, Clone)]
pub struct MooreTracer {
    pub background: Rgb<u8>,
}

impl Default for MooreTracer {
    fn default() -> Self {
        Self { background: WHITE }
    }
}

impl ContourTracer for MooreTracer {
    fn trace(&self, regions: &RgbImage) -> Result<Vec<Shape>> {
        validate_grid(regions.width(), regions.height())?;
        Ok(self.scan(regions))
    }
}

impl MooreTracer {
    pub fn new(background: Rgb<u8>) -> Self {
        Self { background }
    }

    /// Trace the foreground of a classified mask.
    pub fn trace_mask(mask: &Mask) -> Result<Vec<Shape>> {
        Self::default().trace(&mask.to_image())
    }

    /// Expects a validated, non-empty grid.
    fn scan(&self, regions: &RgbImage) -> Vec<Shape> {
        let (width, height) = regions.dimensions();
        let mut visited = VisitedSet::new(width, height);
        let mut shapes = Vec::new();

        for x in 0..width {
            // The pixel scanned just before the seed; starts below the image
            let mut previous = Point { x: x as i32, y: height as i32 };

            for y in (0..height).rev() {
                if !visited.contains(x, y) && self.is_seed(regions, x, y) {
                    let seed = Point { x: x as i32, y: y as i32 };
                    shapes.push(walk(regions, seed, previous, &mut visited));
                }
                previous = Point { x: x as i32, y: y as i32 };
            }
        }

        shapes
    }

    /// A foreground pixel on the bottom row or above a differently colored pixel.
    fn is_seed(&self, regions: &RgbImage, x: u32, y: u32) -> bool {
        let pixel = regions.get_pixel(x, y);
        if *pixel == self.background {
            return false;
        }
        y + 1 == regions.height() || regions.get_pixel(x, y + 1) != pixel
    }
}

/// Pixels already placed on a boundary during one scan.
struct VisitedSet {
    width: u32,
    cells: Vec<bool>,
}

impl VisitedSet {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            cells: vec![false; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        self.cells[self.index(x, y)]
    }

    fn mark(&mut self, p: Point) {
        let index = self.index(p.x as u32, p.y as u32);
        self.cells[index] = true;
    }
}

/// Walks the outline of the region containing `seed`, entering from `entry`.
fn walk(regions: &RgbImage, seed: Point, entry: Point, visited: &mut VisitedSet) -> Shape {
    let color = *regions.get_pixel(seed.x as u32, seed.y as u32);
    let mut polygon = BoundaryPolygon::new(seed);
    visited.mark(seed);

    if is_isolated(regions, seed, color) {
        return Shape::new(polygon, color);
    }

    let mut current = seed;
    let mut backtrack = entry;
    let mut candidate = next_clockwise(backtrack, current);

    while candidate != seed {
        if pixel_at(regions, candidate) == Some(color) {
            polygon.push(candidate);
            visited.mark(candidate);
            current = candidate;
        } else {
            // Off-grid candidates land here too, without being read
            backtrack = candidate;
        }
        candidate = next_clockwise(backtrack, current);
    }

    Shape::new(polygon, color)
}

/// The neighbour of `center` that follows `from` in clockwise order.
///
/// `from` is always one of the eight neighbours of `center`.
fn next_clockwise(from: Point, center: Point) -> Point {
    let offset = (from.x - center.x, from.y - center.y);
    let slot = CLOCKWISE.iter().position(|&o| o == offset);
    debug_assert!(slot.is_some(), "backtrack {from:?} does not neighbour {center:?}");

    let (dx, dy) = CLOCKWISE[slot.map_or(0, |s| (s + 1) % CLOCKWISE.len())];
    Point { x: center.x + dx, y: center.y + dy }
}

/// The pixel at `p`, or `None` outside the grid.
fn pixel_at(regions: &RgbImage, p: Point) -> Option<Rgb<u8>> {
    let (width, height) = regions.dimensions();
    if p.x < 0 || p.y < 0 || p.x as u32 >= width || p.y as u32 >= height {
        return None;
    }
    Some(*regions.get_pixel(p.x as u32, p.y as u32))
}

/// No in-grid neighbour shares the color.
fn is_isolated(regions: &RgbImage, p: Point, color: Rgb<u8>) -> bool {
    CLOCKWISE
        .iter()
        .all(|&(dx, dy)| pixel_at(regions, Point { x: p.x + dx, y: p.y + dy }) != Some(color))
}
