use image::{Rgb, RgbImage};
use crate::{error::Result, traits::ImagePreprocessor, types::WHITE};

/// Bitwise color quantization preprocessor
#[derive(Debug, Clone)]
pub struct ColorQuantization {
    pub mask: [u8; 3],
}

impl Default for ColorQuantization {
    fn default() -> Self {
        // Keep only the highest bit of each channel
        Self { mask: [0x80; 3] }
    }
}

impl ImagePreprocessor for ColorQuantization {
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage> {
        let mut result = image.clone();
        for pixel in result.pixels_mut() {
            for (channel, mask) in pixel.0.iter_mut().zip(self.mask) {
                *channel &= mask;
            }
        }
        Ok(result)
    }
}

/// The eight colors [`ColorQuantization::default`] can produce, split by
/// whether they can be water.
#[derive(Debug, Clone, Copy)]
pub struct QuantizedPalette;

impl QuantizedPalette {
    pub const RIVER: [Rgb<u8>; 4] = [
        Rgb([0, 0, 0]),
        Rgb([0, 0, 128]),
        Rgb([0, 128, 128]),
        Rgb([128, 128, 128]),
    ];

    pub const NOT_RIVER: [Rgb<u8>; 4] = [
        Rgb([128, 0, 0]),
        Rgb([0, 128, 0]),
        Rgb([128, 128, 0]),
        Rgb([128, 0, 128]),
    ];
}

/// Replaces every pixel of one of the `from` colors with `to`
#[derive(Debug, Clone)]
pub struct ColorPaintover {
    pub from: Vec<Rgb<u8>>,
    pub to: Rgb<u8>,
}

impl ColorPaintover {
    pub fn new(from: impl IntoIterator<Item = Rgb<u8>>, to: Rgb<u8>) -> Self {
        Self {
            from: from.into_iter().collect(),
            to,
        }
    }

    /// Whitens the quantized colors that cannot be water.
    pub fn not_river() -> Self {
        Self::new(QuantizedPalette::NOT_RIVER, WHITE)
    }
}

impl ImagePreprocessor for ColorPaintover {
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage> {
        let mut result = image.clone();
        for pixel in result.pixels_mut() {
            if self.from.contains(pixel) {
                *pixel = self.to;
            }
        }
        Ok(result)
    }
}

/// Paints the most common border color with `replacement`.
///
/// The color that dominates the image border is assumed to be land; the
/// image is returned unchanged when that color already is the replacement.
#[derive(Debug, Clone)]
pub struct EdgeMajority {
    pub replacement: Rgb<u8>,
}

impl Default for EdgeMajority {
    fn default() -> Self {
        Self { replacement: WHITE }
    }
}

impl EdgeMajority {
    /// Most frequent color along the four borders. Corners count once per
    /// edge they lie on; ties go to the color met first.
    pub fn majority(image: &RgbImage) -> Option<Rgb<u8>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let top = (0..width).map(|x| (x, 0));
        let bottom = (0..width).map(|x| (x, height - 1));
        let left = (0..height).map(|y| (0, y));
        let right = (0..height).map(|y| (width - 1, y));

        // (color, count) in first-seen order
        let mut histogram: Vec<(Rgb<u8>, usize)> = Vec::new();
        for (x, y) in top.chain(bottom).chain(left).chain(right) {
            let pixel = *image.get_pixel(x, y);
            match histogram.iter_mut().find(|(color, _)| *color == pixel) {
                Some((_, count)) => *count += 1,
                None => histogram.push((pixel, 1)),
            }
        }

        histogram
            .into_iter()
            .fold(None, |best: Option<(Rgb<u8>, usize)>, (color, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((color, count)),
            })
            .map(|(color, _)| color)
    }
}

impl ImagePreprocessor for EdgeMajority {
    fn preprocess(&self, image: &RgbImage) -> Result<RgbImage> {
        match Self::majority(image) {
            Some(color) if color != self.replacement => {
                ColorPaintover::new([color], self.replacement).preprocess(image)
            }
            _ => Ok(image.clone()),
        }
    }
}
