use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palettator::export::ExportFormat;
use palettator::models::AppConfig;
use palettator::rendering::SwatchRenderer;
use palettator::services::{MedianCutExtractor, PaletteCollection};

#[derive(Parser)]
#[command(name = "palettator")]
#[command(about = "Palette From Image - extract, render and export color palettes")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PALETTATOR_CONFIG, then ./palettator.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a palette from each image and save its swatch PNG
    Extract {
        /// Source images
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Number of colors per palette
        #[arg(short, long)]
        size: Option<usize>,

        /// Swatches per row
        #[arg(short, long)]
        columns: Option<u32>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sample images at full resolution
        #[arg(long)]
        no_resize: bool,

        /// Export formats to write after extraction
        #[arg(short, long, value_enum, value_delimiter = ',')]
        export: Vec<ExportFormat>,

        /// Palettes to export: a 1-based index or "all"
        #[arg(long, default_value = "all")]
        select: String,

        /// Print the colors of every palette
        #[arg(long)]
        show: bool,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palettator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = AppConfig::locate(cli.config.as_deref());
    let config = AppConfig::load(config_path.as_deref());

    match cli.command {
        Some(Commands::Extract {
            images,
            size,
            columns,
            output,
            no_resize,
            export,
            select,
            show,
        }) => {
            let mut config = config;
            if let Some(size) = size {
                config.palette.palette_size = size;
            }
            if let Some(columns) = columns {
                config.palette.columns = columns;
            }
            if let Some(output) = output {
                config.palette.save_path = output;
            }
            if no_resize {
                config.palette.resize = false;
            }
            run_extract_command(&config, &images, &export, &select, show)
        }
        Some(Commands::Config) => run_config_command(&config, config_path.as_deref()),
        None => {
            run_config_command(&config, config_path.as_deref())?;
            println!("\nRun `palettator extract --help` to generate palettes.");
            Ok(())
        }
    }
}

/// Run one session: extract every image, then export and/or show the results.
fn run_extract_command(
    config: &AppConfig,
    images: &[PathBuf],
    formats: &[ExportFormat],
    select: &str,
    show: bool,
) -> anyhow::Result<()> {
    let palette_config = &config.palette;
    let renderer = SwatchRenderer::new(palette_config)?;

    let mut collection = PaletteCollection::new();
    collection.extract(images, &MedianCutExtractor, &renderer, palette_config);

    if collection.is_empty() {
        anyhow::bail!("No palette could be generated from {} image(s)", images.len());
    }

    println!("PALETTE{}", if collection.len() > 1 { "S" } else { "" });
    print!("{}", collection.listing());

    if show {
        for (i, record) in collection.records().iter().enumerate() {
            println!("\n--- PALETTE {} ---", i + 1);
            print!("{}", record.details());
        }
    }

    if formats.is_empty() {
        return Ok(());
    }

    let selection = collection.resolve(Some(select), true)?;
    for format in formats {
        println!("\nExporting to {format}");
        let written = collection.export_all(
            format.exporter().as_ref(),
            selection,
            &palette_config.save_path,
        )?;
        for path in written {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

fn run_config_command(config: &AppConfig, source: Option<&Path>) -> anyhow::Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Palettator v{VERSION} - Palette From Image\n");
    println!(
        "Config file: {}\n",
        source
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string())
    );
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}
