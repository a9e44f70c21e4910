use geo_types::{Coord, LineString, Polygon, Rect};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Integer pixel coordinate; origin top-left, +x right, +y down.
///
/// Signed so that rotation candidates just outside the grid are representable.
pub type Point = Coord<i32>;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Verdict for a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    Foreground,
    Background,
}

impl PixelClass {
    /// The color a classified image uses for this verdict.
    pub fn sentinel(self) -> Rgb<u8> {
        match self {
            Self::Foreground => BLACK,
            Self::Background => WHITE,
        }
    }

    pub fn is_foreground(self) -> bool {
        self == Self::Foreground
    }
}

/// Boolean foreground grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Foreground test; `false` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// The classified image: foreground black, background white.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            if self.get(x, y) {
                PixelClass::Foreground.sentinel()
            } else {
                PixelClass::Background.sentinel()
            }
        })
    }
}

/// Ordered boundary coordinates of one traced region.
///
/// Order is trace order. Never empty; a lone pixel yields a single point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>")]
pub struct BoundaryPolygon(Vec<Point>);

impl TryFrom<Vec<Point>> for BoundaryPolygon {
    type Error = &'static str;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        if points.is_empty() {
            return Err("a boundary polygon needs at least its seed point");
        }
        Ok(Self(points))
    }
}

impl BoundaryPolygon {
    pub fn new(seed: Point) -> Self {
        Self(vec![seed])
    }

    pub fn push(&mut self, point: Point) {
        self.0.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First traced point.
    pub fn seed(&self) -> Point {
        self.0[0]
    }

    pub fn is_single_point(&self) -> bool {
        self.0.len() == 1
    }

    /// The boundary as a closed ring in float coordinates.
    pub fn to_line_string(&self) -> LineString<f64> {
        let mut ring: LineString<f64> = self
            .0
            .iter()
            .map(|p| Coord { x: p.x as f64, y: p.y as f64 })
            .collect();
        ring.close();
        ring
    }

    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        Polygon::new(self.to_line_string(), vec![])
    }

    /// Enclosed area; zero for lines and single points.
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    pub fn bounding_rect(&self) -> Rect<i32> {
        use geo::BoundingRect;
        let seed = self.seed();
        LineString::new(self.0.clone())
            .bounding_rect()
            .unwrap_or_else(|| Rect::new(seed, seed))
    }

    pub fn centroid(&self) -> [f64; 2] {
        use geo::Centroid;
        match self.to_geo_polygon().centroid() {
            Some(c) if self.area() > 0.0 => [c.x(), c.y()],
            _ => {
                // Lines and points have no interior; use the box center
                let rect = self.bounding_rect();
                let (min, max) = (rect.min(), rect.max());
                [(min.x + max.x) as f64 / 2.0, (min.y + max.y) as f64 / 2.0]
            }
        }
    }
}

/// Whether a shape has been accepted as part of a river.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default,
    Serialize, Deserialize,
    Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Region,
    River,
}

/// One traced region: its boundary and the color it was traced on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    polygon: BoundaryPolygon,
    color: [u8; 3],
    #[serde(default)]
    kind: ShapeKind,
}

impl Shape {
    pub fn new(polygon: BoundaryPolygon, color: Rgb<u8>) -> Self {
        Self {
            polygon,
            color: color.0,
            kind: ShapeKind::Region,
        }
    }

    pub fn polygon(&self) -> &BoundaryPolygon {
        &self.polygon
    }

    pub fn color(&self) -> Rgb<u8> {
        Rgb(self.color)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn is_river(&self) -> bool {
        self.kind == ShapeKind::River
    }

    /// The same shape, tagged as a river segment.
    pub fn into_river(self) -> Self {
        Self {
            kind: ShapeKind::River,
            ..self
        }
    }

    /// `#rrggbb`
    pub fn color_hex(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn polygon(points: &[(i32, i32)]) -> BoundaryPolygon {
        let mut iter = points.iter().map(|&(x, y)| Coord { x, y });
        let mut polygon = BoundaryPolygon::new(iter.next().unwrap());
        for p in iter {
            polygon.push(p);
        }
        polygon
    }

    #[test]
    fn test_mask_to_image_uses_sentinels() {
        let mask = Mask::from_fn(2, 2, |x, y| x == y);
        let image = mask.to_image();
        assert_eq!(*image.get_pixel(0, 0), BLACK);
        assert_eq!(*image.get_pixel(1, 1), BLACK);
        assert_eq!(*image.get_pixel(1, 0), WHITE);
        assert_eq!(*image.get_pixel(0, 1), WHITE);
        assert_eq!(mask.foreground_count(), 2);
        assert!(!mask.get(5, 5));
    }

    #[test]
    fn test_square_geometry() {
        let square = polygon(&[(0, 2), (0, 0), (2, 0), (2, 2)]);
        assert_relative_eq!(square.area(), 4.0);
        let [cx, cy] = square.centroid();
        assert_relative_eq!(cx, 1.0, epsilon = 1e-9);
        assert_relative_eq!(cy, 1.0, epsilon = 1e-9);
        let rect = square.bounding_rect();
        assert_eq!(rect.min(), Coord { x: 0, y: 0 });
        assert_eq!(rect.max(), Coord { x: 2, y: 2 });
    }

    #[test]
    fn test_degenerate_geometry() {
        let point = polygon(&[(3, 4)]);
        assert!(point.is_single_point());
        assert_eq!(point.area(), 0.0);
        assert_eq!(point.centroid(), [3.0, 4.0]);

        let line = polygon(&[(0, 1), (1, 1), (2, 1), (1, 1)]);
        assert_eq!(line.area(), 0.0);
        assert_eq!(line.centroid(), [1.0, 1.0]);
    }

    #[test]
    fn test_line_string_is_closed() {
        let ring = polygon(&[(0, 0), (1, 0), (1, 1)]).to_line_string();
        assert!(ring.is_closed());
        assert_eq!(ring.0.len(), 4);
    }

    #[test]
    fn test_river_tagging() {
        let shape = Shape::new(polygon(&[(1, 1)]), Rgb([40, 90, 160]));
        assert_eq!(shape.kind(), ShapeKind::Region);
        let river = shape.clone().into_river();
        assert!(river.is_river());
        assert_eq!(river.polygon(), shape.polygon());
        assert_eq!(river.color_hex(), "#285aa0");
        assert_eq!(ShapeKind::River.to_string(), "river");
    }

    #[test]
    fn test_shape_json() {
        let shape = Shape::new(polygon(&[(1, 1), (2, 1)]), Rgb([1, 2, 3])).into_river();
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["kind"], "river");
        assert_eq!(json["polygon"][1], serde_json::json!({ "x": 2, "y": 1 }));
        assert_eq!(serde_json::from_value::<Shape>(json).unwrap(), shape);

        let empty = serde_json::json!({ "polygon": [], "color": [0, 0, 0] });
        assert!(serde_json::from_value::<Shape>(empty).is_err());
    }
}
