use image::Rgb;
use crate::{
    color::{Hsb, HsbWindow},
    traits::PixelClassifier,
    types::PixelClass,
};

/// Marks pixels whose color falls inside [`HsbWindow::RIVER`] as foreground.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiverColorClassifier;

impl PixelClassifier for RiverColorClassifier {
    fn classify(&self, pixel: Rgb<u8>) -> PixelClass {
        if HsbWindow::RIVER.contains(&Hsb::from_rgb(pixel)) {
            PixelClass::Foreground
        } else {
            PixelClass::Background
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use crate::types::{BLACK, WHITE};

    fn river_color() -> Rgb<u8> {
        Hsb::new(0.59, 0.575, 0.5).to_rgb()
    }

    fn land_color() -> Rgb<u8> {
        Hsb::new(0.2, 0.07, 0.05).to_rgb()
    }

    #[test]
    fn test_classify_single_pixels() {
        let classifier = RiverColorClassifier;
        assert_eq!(classifier.classify(river_color()), PixelClass::Foreground);
        assert_eq!(classifier.classify(Rgb([40, 90, 160])), PixelClass::Foreground);
        assert_eq!(classifier.classify(land_color()), PixelClass::Background);
        assert_eq!(classifier.classify(Rgb([40, 160, 40])), PixelClass::Background);
        assert_eq!(classifier.classify(WHITE), PixelClass::Background);
        assert_eq!(classifier.classify(BLACK), PixelClass::Background);
    }

    #[test]
    fn test_diagonal_is_classified_as_foreground() {
        let image = RgbImage::from_fn(3, 3, |x, y| {
            if x == y { river_color() } else { land_color() }
        });

        let classified = RiverColorClassifier
            .classify_image(&image)
            .expect("Should classify")
            .to_image();

        for (x, y, pixel) in classified.enumerate_pixels() {
            let expected = if x == y { BLACK } else { WHITE };
            assert_eq!(*pixel, expected, "unexpected class at ({x}, {y})");
        }
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let err = RiverColorClassifier
            .classify_image(&RgbImage::new(0, 3))
            .unwrap_err();
        assert!(err.is_invalid_grid());
    }
}
