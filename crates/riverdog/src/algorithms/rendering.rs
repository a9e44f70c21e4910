use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use crate::{traits::ShapeRenderer, types::Shape};

/// Draws each boundary as a closed chain of one-pixel line segments
#[derive(Debug, Clone)]
pub struct OutlineRenderer {
    pub color: Rgb<u8>,
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self { color: Rgb([255, 0, 0]) }
    }
}

impl OutlineRenderer {
    pub fn new(color: Rgb<u8>) -> Self {
        Self { color }
    }

    /// Draw onto `canvas` in place.
    pub fn draw(&self, canvas: &mut RgbImage, shapes: &[Shape]) {
        for shape in shapes {
            let points = shape.polygon().points();
            let as_f32 = |i: usize| (points[i].x as f32, points[i].y as f32);

            for i in 0..points.len() {
                let next = (i + 1) % points.len();
                draw_line_segment_mut(canvas, as_f32(i), as_f32(next), self.color);
            }
        }
    }
}

impl ShapeRenderer for OutlineRenderer {
    fn render(&self, image: &RgbImage, shapes: &[Shape]) -> RgbImage {
        let mut canvas = image.clone();
        self.draw(&mut canvas, shapes);
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algorithms::MooreTracer, fixtures::regions, traits::ContourTracer, types::WHITE};

    #[test]
    fn test_square_outline_is_drawn_on_a_copy() {
        let image = regions(&[".....", ".###.", ".###.", ".###.", "....."]);
        let shapes = MooreTracer::default().trace(&image).unwrap();
        let renderer = OutlineRenderer::default();

        let rendered = renderer.render(&image, &shapes);

        for x in 1..=3 {
            for y in 1..=3 {
                let expected = if x == 2 && y == 2 { Rgb([0, 0, 0]) } else { renderer.color };
                assert_eq!(*rendered.get_pixel(x, y), expected, "at ({x}, {y})");
            }
        }
        assert_eq!(*rendered.get_pixel(0, 0), WHITE);
        assert_eq!(*image.get_pixel(1, 1), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_no_shapes_leaves_image_unchanged() {
        let image = regions(&["..", ".."]);
        assert_eq!(OutlineRenderer::new(Rgb([0, 255, 0])).render(&image, &[]), image);
    }
}
