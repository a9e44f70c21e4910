use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use riverdog::{
    io::{load_rgb, save_rgb},
    Pipeline, PipelineSettings, RiverError, ShapeRenderer,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extensions picked up when the input is a folder
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "tif", "tiff"];

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    River(#[from] RiverError),
    #[error("No images found at {0}")]
    NoInputImages(PathBuf),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Settings for one batch run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub pipeline: PipelineSettings,
    /// Also write the classified black/white image
    pub save_classified: bool,
    /// Also write the river segments as GeoJSON
    pub export_geojson: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineSettings::default(),
            save_classified: true,
            export_geojson: true,
        }
    }
}

impl RunConfig {
    /// Load RunConfig from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load RunConfig from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    /// Defaults when no path is given or the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                tracing::warn!("Config {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save in the format given by the file extension
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CliError> {
        let path_ref = path.as_ref();
        let content = match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.to_toml()?,
            Some("json") => self.to_json()?,
            _ => return Err(CliError::UnsupportedFileFormat),
        };
        fs::write(path_ref, content)?;
        Ok(())
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// A single file, or every image directly inside a folder in name order.
pub fn collect_images(input: &Path) -> Result<Vec<PathBuf>, CliError> {
    let images = if input.is_dir() {
        let mut images = Vec::new();
        for entry in fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                images.push(path);
            }
        }
        images.sort();
        images
    } else if input.is_file() {
        vec![input.to_path_buf()]
    } else {
        Vec::new()
    };

    if images.is_empty() {
        return Err(CliError::NoInputImages(input.to_path_buf()));
    }
    Ok(images)
}

/// Where the outputs for one input image go
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub classified: PathBuf,
    pub detected: PathBuf,
    pub geojson: PathBuf,
}

impl OutputPaths {
    pub fn new(input: &Path, output_dir: &Path) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Self {
            classified: output_dir.join(format!("{stem}-classified.png")),
            detected: output_dir.join(format!("{stem}-riverDetected.png")),
            geojson: output_dir.join(format!("{stem}-shapes.geojson")),
        }
    }
}

/// Counts for one processed image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReport {
    pub shape_count: usize,
    pub segment_count: usize,
}

/// Run one image through the pipeline and write its outputs.
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    config: &RunConfig,
    pipeline: &Pipeline,
) -> Result<FileReport, CliError> {
    let original = load_rgb(input)?;
    let result = pipeline.process(&original)?;
    let paths = OutputPaths::new(input, output_dir);

    if config.save_classified {
        save_rgb(&result.regions, &paths.classified)?;
    }

    let outlined = config
        .pipeline
        .renderer()
        .render(&original, &result.detection.segments);
    save_rgb(&outlined, &paths.detected)?;

    if config.export_geojson {
        result.detection.save_geojson(&paths.geojson)?;
    }

    Ok(FileReport {
        shape_count: result.detection.shape_count,
        segment_count: result.detection.segments.len(),
    })
}

/// One traced shape as listed by `inspect`
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSummary {
    pub rank: usize,
    pub perimeter: f64,
    pub point_count: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub shapes: Vec<ShapeSummary>,
    pub related_group_len: usize,
}

/// Load `input` and list its shapes.
pub fn inspect_file(input: &Path, pipeline: &Pipeline) -> Result<Inspection, CliError> {
    let original = load_rgb(input)?;
    inspect_image(&original, pipeline)
}

/// Every shape of an already loaded image, largest first.
pub fn inspect_image(original: &RgbImage, pipeline: &Pipeline) -> Result<Inspection, CliError> {
    let catalog = pipeline.catalog(original)?;

    let shapes = catalog
        .all_shapes_by_size()?
        .iter()
        .zip(catalog.perimeters()?)
        .enumerate()
        .map(|(rank, (shape, &perimeter))| ShapeSummary {
            rank,
            perimeter,
            point_count: shape.polygon().len(),
            color: shape.color_hex(),
        })
        .collect();

    Ok(Inspection {
        shapes,
        related_group_len: catalog.largest_related_group()?.len(),
    })
}
