//! Blast Report CLI
//!
//! Runs the blast impact analysis over before/after detector output and
//! writes the JSON report, optionally with an annotated after-image.
//!
//! ```bash
//! blast-report --after data/after.json --before data/before.json \
//!     --output outputs/output.json \
//!     --image data/after.jpg --annotated outputs/output.jpg
//! ```

pub mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blast_engine::BlastAnalyzer;
use clap::Parser;
use detections::RawDetection;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub use settings::AppConfig;

/// Blast impact assessment from object detections
#[derive(Parser, Debug)]
#[command(name = "blast-report")]
#[command(author, version, about = "Blast impact assessment from object detections")]
pub struct Cli {
    /// Detections in the after-blast image (JSON array of {label, box})
    #[arg(long)]
    pub after: PathBuf,

    /// Detections in the before-blast image
    #[arg(long)]
    pub before: PathBuf,

    /// Report destination
    #[arg(long, default_value = "outputs/output.json")]
    pub output: PathBuf,

    /// After-blast photograph to annotate
    #[arg(long, requires = "annotated")]
    pub image: Option<PathBuf>,

    /// Annotated image destination
    #[arg(long, requires = "image")]
    pub annotated: Option<PathBuf>,

    /// Settings file (TOML, JSON or YAML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Initialize logging; `RUST_LOG` takes precedence over `default_level`
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Read one image's detector output
pub fn read_detections(path: &Path) -> Result<Vec<RawDetection>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read detections from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of detections", path.display()))
}

/// Write `contents`, creating parent directories as needed
pub fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display())),
        _ => Ok(()),
    }
}

/// Run the full pipeline; nothing is written unless every step succeeds
pub fn run(cli: &Cli, settings: &AppConfig) -> Result<()> {
    let after = read_detections(&cli.after)?;
    let before = read_detections(&cli.before)?;
    info!(after = after.len(), before = before.len(), "Loaded detections");

    let analyzer = BlastAnalyzer::new(settings.engine.clone())?;
    let report = analyzer.analyze_raw(&after, &before)?;
    let json = report.to_json_pretty()?;

    let annotated = match (&cli.image, &cli.annotated) {
        (Some(image), Some(dest)) => {
            let rendered = scene_annotation::render(image, &report, &settings.annotation)
                .with_context(|| format!("Failed to annotate {}", image.display()))?;
            let encoded = scene_annotation::encode(&rendered, dest)
                .with_context(|| format!("Failed to encode {}", dest.display()))?;
            Some((encoded, dest.as_path()))
        }
        _ => None,
    };

    ensure_parent(&cli.output)?;
    if let Some((encoded, dest)) = &annotated {
        write_output(dest, encoded)?;
        info!("Annotated image written to {}", dest.display());
    }

    if let Err(err) = write_output(&cli.output, &json) {
        if let Some((_, dest)) = annotated {
            if let Err(cleanup) = fs::remove_file(dest) {
                warn!("Failed to remove {}: {}", dest.display(), cleanup);
            }
        }
        return Err(err);
    }
    info!("Report written to {}", cli.output.display());

    Ok(())
}
