use clap::{Parser, Subcommand};
use cli::{collect_images, inspect_file, process_file, RunConfig};
use color_eyre::eyre::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect rivers in an image or in every image of a folder
    Process {
        /// Image file or folder of images
        #[arg(short, long)]
        input: PathBuf,
        /// Folder the outputs are written to
        #[arg(short, long)]
        output_dir: PathBuf,
        /// Path to a TOML or JSON run configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List every traced shape of one image, largest first
    Inspect {
        /// Image file
        #[arg(short, long)]
        input: PathBuf,
        /// Path to a TOML or JSON run configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the default run configuration
    InitConfig {
        /// Destination (.toml or .json)
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Process { input, output_dir, config } => {
            process(input, output_dir, config.as_deref())?;
        }
        Commands::Inspect { input, config } => {
            inspect(input, config.as_deref())?;
        }
        Commands::InitConfig { output } => {
            RunConfig::default().to_file(output)?;
            info!("Configuration saved to: {:?}", output);
        }
    }

    Ok(())
}

fn process(input: &Path, output_dir: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = RunConfig::load(config_path)?;
    let pipeline = config.pipeline.build();
    info!("{}", pipeline.info());

    let images = collect_images(input)?;
    std::fs::create_dir_all(output_dir)?;
    info!("Processing {} image(s)...", images.len());

    let mut failed = 0;
    for image in &images {
        match process_file(image, output_dir, &config, &pipeline) {
            Ok(report) if report.segment_count == 0 => {
                warn!("{}: no river found ({} shapes traced)", image.display(), report.shape_count);
            }
            Ok(report) => {
                info!(
                    "{}: {} river segment(s) found ({} shapes traced)",
                    image.display(),
                    report.segment_count,
                    report.shape_count
                );
            }
            Err(e) => {
                warn!("Problem processing {}: {}", image.display(), e);
                failed += 1;
            }
        }
    }

    if failed == images.len() {
        bail!("none of the {} image(s) could be processed", images.len());
    }
    info!("Done.");
    Ok(())
}

fn inspect(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = RunConfig::load(config_path)?;
    let pipeline = config.pipeline.build();

    let inspection = inspect_file(input, &pipeline)?;
    for shape in &inspection.shapes {
        info!(
            "#{:<3} perimeter {:>10.2}  points {:>6}  color {}",
            shape.rank, shape.perimeter, shape.point_count, shape.color
        );
    }
    info!(
        "{} shape(s), largest related group has {}",
        inspection.shapes.len(),
        inspection.related_group_len
    );
    Ok(())
}
