use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiverError {
    /// Zero-sized grids, grids too large to address with signed
    /// coordinates, or a region image whose size differs from the original.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

impl RiverError {
    pub fn is_invalid_grid(&self) -> bool {
        matches!(self, Self::InvalidGrid(_))
    }
}

pub type Result<T> = std::result::Result<T, RiverError>;

/// Rejects grids the tracer cannot walk.
pub(crate) fn validate_grid(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(RiverError::InvalidGrid(format!(
            "image must have a non-zero area, got {width}x{height}"
        )));
    }
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(RiverError::InvalidGrid(format!(
            "image of {width}x{height} exceeds the addressable coordinate range"
        )));
    }
    Ok(())
}

/// Rejects a region image and an original that do not describe the same pixels.
pub(crate) fn validate_same_size(regions: (u32, u32), original: (u32, u32)) -> Result<()> {
    validate_grid(regions.0, regions.1)?;
    if regions != original {
        return Err(RiverError::InvalidGrid(format!(
            "classified image is {}x{} but the original is {}x{}",
            regions.0, regions.1, original.0, original.1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_grid_is_rejected() {
        assert!(validate_grid(0, 4).unwrap_err().is_invalid_grid());
        assert!(validate_grid(4, 0).unwrap_err().is_invalid_grid());
        assert!(validate_grid(1, 1).is_ok());
    }

    #[test]
    fn test_mismatched_sizes_are_rejected() {
        let err = validate_same_size((3, 3), (3, 4)).unwrap_err();
        assert!(err.is_invalid_grid());
        assert!(err.to_string().contains("3x4"));
        assert!(validate_same_size((3, 3), (3, 3)).is_ok());
    }
}
