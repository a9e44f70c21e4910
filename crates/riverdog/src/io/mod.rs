pub mod geojson;

use std::path::Path;

use image::RgbImage;
use crate::error::Result;

/// Open any supported image file as 8-bit RGB.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Write an RGB image; the format follows the file extension.
pub fn save_rgb(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    image.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 80, y as u8 * 120, 7]));

        save_rgb(&image, &path).unwrap();
        assert_eq!(load_rgb(&path).unwrap(), image);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_rgb(dir.path().join("absent.png")).is_err());
    }
}
