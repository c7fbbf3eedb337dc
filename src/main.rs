use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stitch_pattern::{
    rgb_to_hsl, EdgeAlgorithm, KMeansOptions, Palette, ResampleMode, SharpenMode,
    BUILTIN_PALETTES,
};
use stitchgrid::models::{AppConfig, CONFIG_ENV};
use stitchgrid::services::{ConvertService, GridSize};

#[derive(Parser)]
#[command(name = "stitchgrid")]
#[command(about = "Stitchgrid - convert PNG artwork into cross-stitch charts")]
struct Cli {
    /// Config file (default: $STITCHGRID_CONFIG, then ./stitchgrid.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG into a pattern JSON document
    Convert {
        /// Input PNG file
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Grid width in cells (requires --height)
        #[arg(long, requires = "height", conflicts_with = "size")]
        width: Option<usize>,

        /// Grid height in cells (requires --width)
        #[arg(long, requires = "width")]
        height: Option<usize>,

        /// Longer grid side in cells, aspect preserved
        #[arg(short, long)]
        size: Option<usize>,

        /// Palette name (built-in or from the config file)
        #[arg(short, long)]
        palette: Option<String>,

        /// Floyd-Steinberg error diffusion
        #[arg(long)]
        dither: bool,

        /// Edge algorithm: none, outline, sobel, canny, feature, selective
        #[arg(long)]
        edges: Option<EdgeAlgorithm>,

        /// Resampling: areaAverage or detailPreserving
        #[arg(long)]
        resample: Option<ResampleMode>,

        /// Keep isolated internal edges
        #[arg(long)]
        no_contour: bool,

        /// Sharpening before quantization: none, subtle, strong
        #[arg(long)]
        sharpen: Option<SharpenMode>,

        /// Treat near-white pixels as background
        #[arg(long)]
        remove_background: bool,

        /// Derive a K-colour palette from the image
        #[arg(long)]
        kmeans: Option<usize>,

        /// Seed for k-means initialisation
        #[arg(long, requires = "kmeans")]
        seed: Option<u64>,
    },
    /// List built-in palettes
    Palettes,
    /// Write the default config file
    Init {
        /// Destination (default: the resolved config path)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stitchgrid=info,stitch_pattern=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = AppConfig::resolve_path(cli.config.as_deref());

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            width,
            height,
            size,
            palette,
            dither,
            edges,
            resample,
            no_contour,
            sharpen,
            remove_background,
            kmeans,
            seed,
        }) => {
            let mut config = AppConfig::load(&config_path)
                .with_context(|| format!("loading {}", config_path.display()))?;

            if let Some(name) = palette {
                config.palette = name;
            }
            let pattern = &mut config.pattern;
            pattern.dither |= dither;
            pattern.remove_background |= remove_background;
            if no_contour {
                pattern.contour_enabled = false;
            }
            if let Some(algorithm) = edges {
                pattern.edge_algorithm = algorithm;
            }
            if let Some(mode) = resample {
                pattern.resample_mode = mode;
            }
            if let Some(mode) = sharpen {
                pattern.sharpen = mode;
            }
            if let Some(k) = kmeans {
                config.kmeans = Some(KMeansOptions {
                    k,
                    seed,
                    ..config.kmeans.unwrap_or_default()
                });
            }

            let grid = match (width, height) {
                (Some(width), Some(height)) => GridSize::Exact { width, height },
                _ => GridSize::Longest(size.unwrap_or(config.grid_size)),
            };
            run_convert_command(config, &input, &output, grid)
        }
        Some(Commands::Palettes) => run_palettes_command(),
        Some(Commands::Init { path, force }) => {
            run_init_command(path.as_deref().unwrap_or(&config_path), force)
        }
        None => {
            run_status_command(&config_path);
            Ok(())
        }
    }
}

/// Convert one PNG and write the pattern JSON
fn run_convert_command(
    config: AppConfig,
    input: &Path,
    output: &Path,
    grid: GridSize,
) -> anyhow::Result<()> {
    let service = ConvertService::new(config);
    let document = service
        .convert_file(input, grid)
        .with_context(|| format!("converting {}", input.display()))?;

    let json = document.to_json()?;
    std::fs::write(output, &json)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} ({}x{}, {} stitches, {} contour cells, {} colors)",
        output.display(),
        document.width,
        document.height,
        document.stitch_count(),
        document.contour_cells.len(),
        document.palette_used.len()
    );
    Ok(())
}

/// Print every built-in palette with hex and HSL values
fn run_palettes_command() -> anyhow::Result<()> {
    for name in BUILTIN_PALETTES {
        let palette = Palette::builtin(name)?;
        println!("{name} ({} colors)", palette.len());
        for entry in palette.colors() {
            let hsl = rgb_to_hsl(entry.r, entry.g, entry.b);
            println!(
                "  {} {:<14} {}  hsl({:>3.0}, {:>3.0}%, {:>3.0}%)",
                entry.symbol.unwrap_or(' '),
                entry.name,
                entry.to_hex(),
                hsl.h * 360.0,
                hsl.s * 100.0,
                hsl.l * 100.0
            );
        }
        println!();
    }
    Ok(())
}

/// Write the default configuration as YAML
fn run_init_command(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        eprintln!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
        std::process::exit(1);
    }
    let yaml = AppConfig::default().to_yaml()?;
    std::fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

/// Display version and configuration information
fn run_status_command(config_path: &Path) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Stitchgrid v{VERSION}");
    println!("PNG to cross-stitch chart converter\n");

    let env_value = std::env::var(CONFIG_ENV).ok();
    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        env_value.as_deref().unwrap_or("(not set)")
    );

    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", config_path.display())
    };
    println!("\nConfig:   {source}");

    match AppConfig::load(config_path) {
        Ok(config) => {
            println!("Palette:  {}", config.palette);
            println!("Grid:     {} cells on the longer side", config.grid_size);
            println!("Edges:    {}", config.pattern.edge_algorithm);
            println!("Dither:   {}", if config.pattern.dither { "on" } else { "off" });
        }
        Err(e) => println!("Config error: {e}"),
    }

    println!("\nBuilt-in palettes: {}", BUILTIN_PALETTES.join(", "));
    println!("\nRun 'stitchgrid --help' for usage.");
}
