use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};

use portrait_compositor::{
    config::Config,
    pipeline::PersonalizationEngine,
};

#[derive(Parser)]
#[command(
    name = "portrait-compositor",
    version,
    about = "Composite a stylized face into a decorative template",
    long_about = "Portrait-Compositor stylizes an already cropped face image and blends it into template artwork with a feathered edge. When the template file is missing a plain decorative canvas is generated instead."
)]
struct Cli {
    /// Cropped face image (PNG, JPEG)
    #[arg(short, long)]
    face: PathBuf,

    /// Output image path
    #[arg(short, long)]
    output: PathBuf,

    /// Template image (defaults to the configured template)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Stylizer backend (basic, identity)
    #[arg(short, long)]
    stylizer: Option<String>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the face restoration step
    #[arg(long)]
    no_restore: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting Portrait-Compositor v{}", env!("CARGO_PKG_VERSION"));
    info!("Face: {:?}", cli.face);
    info!("Output: {:?}", cli.output);

    // Load configuration
    let mut config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(stylizer) = cli.stylizer {
        config.stylization.backend = stylizer;
    }
    if cli.no_restore {
        config.restoration.enabled = false;
    }

    let engine = Arc::new(PersonalizationEngine::from_config(config)?);

    let face_bytes = tokio::fs::read(&cli.face)
        .await
        .with_context(|| format!("Failed to read face image {:?}", cli.face))?;

    let template = cli.template;
    let worker = Arc::clone(&engine);
    let personalized = tokio::task::spawn_blocking(move || -> portrait_compositor::Result<_> {
        let face = image::load_from_memory(&face_bytes)?;
        worker.personalize_face_with_template(&face, None, template.as_deref())
    })
    .await
    .context("Personalization task panicked")?
    .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    tokio::fs::write(&cli.output, &personalized.bytes)
        .await
        .with_context(|| format!("Failed to write {:?}", cli.output))?;

    info!(
        "Personalization complete! {}x{} image saved to: {:?}",
        personalized.width, personalized.height, cli.output
    );
    Ok(())
}
