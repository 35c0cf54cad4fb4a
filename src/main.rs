use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eink_quantize::{palette_preview, side_by_side, ColorMatcher};
use pokeink::models::{AppConfig, ColorMode};
use pokeink::rendering::{encode_rgb_png, read_png};
use pokeink::services::{usage_summary, AnalysisReport, SpriteProcessor};

#[derive(Parser)]
#[command(name = "pokeink")]
#[command(about = "Perceptual palette quantization and dithering for e-ink panels")]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantize a PNG for the configured panel
    Quantize {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file (indexed)
        #[arg(short, long)]
        output: PathBuf,

        /// Dithering method: floyd_steinberg, jarvis_judice_ninke, simple, nearest, blue_noise
        #[arg(short, long)]
        method: Option<String>,

        /// Color mode: "monochrome" or "7color" (overrides the display type)
        #[arg(long)]
        mode: Option<ColorMode>,

        /// Diffusion backend: "accelerated" or "reference"
        #[arg(long)]
        backend: Option<String>,

        /// Distance metric: "ciede2000" or "cie76"
        #[arg(long)]
        metric: Option<String>,

        /// Lookup cache grid step
        #[arg(long)]
        cache_step: Option<u8>,

        /// Blue-noise seed
        #[arg(long)]
        seed: Option<u64>,

        /// Scan every row left to right
        #[arg(long)]
        no_serpentine: bool,

        /// Skip color enhancement
        #[arg(long)]
        no_enhance: bool,

        /// Also write packed wire indices to this file
        #[arg(long)]
        packed: Option<PathBuf>,

        /// Bits per pixel for --packed (default: smallest that fits)
        #[arg(long)]
        bits: Option<u8>,

        /// Also write an original/quantized comparison PNG
        #[arg(long)]
        compare: Option<PathBuf>,
    },
    /// Render a swatch strip of the palette
    Preview {
        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, default_value_t = 700)]
        width: usize,

        #[arg(long, default_value_t = 100)]
        height: usize,

        /// Color mode (default: from config)
        #[arg(long)]
        mode: Option<ColorMode>,
    },
    /// Report the most frequent colors of a PNG as JSON
    Analyze {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of colors to report
        #[arg(short, long, default_value_t = 10)]
        top: usize,

        /// Color mode used for nearest-entry mapping (default: from config)
        #[arg(long)]
        mode: Option<ColorMode>,
    },
    /// List palette entries and wire indices
    Palette {
        /// Color mode (default: from config)
        #[arg(long)]
        mode: Option<ColorMode>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `analyze` output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokeink=info,eink_quantize=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path),
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Quantize {
            input,
            output,
            method,
            mode,
            backend,
            metric,
            cache_step,
            seed,
            no_serpentine,
            no_enhance,
            packed,
            bits,
            compare,
        } => {
            apply_mode(&mut config, mode);
            let ip = &mut config.image_processing;
            if let Some(method) = method {
                ip.dithering_algorithm = method;
            }
            if let Some(backend) = backend {
                ip.backend = backend;
            }
            if let Some(metric) = metric {
                ip.metric = metric;
            }
            if let Some(step) = cache_step {
                ip.cache_step = step;
            }
            if let Some(seed) = seed {
                ip.seed = seed;
            }
            if no_serpentine {
                ip.serpentine = false;
            }
            if no_enhance {
                ip.enhance = false;
            }
            run_quantize(
                &config,
                &input,
                &output,
                packed.as_deref(),
                bits,
                compare.as_deref(),
            )
        }
        Commands::Preview {
            output,
            width,
            height,
            mode,
        } => {
            apply_mode(&mut config, mode);
            let display = config.display_spec();
            let palette = config.build_palette(display.color_mode)?;
            let swatch = palette_preview(&palette, width, height)?;
            let png = encode_rgb_png(&swatch)?;
            std::fs::write(&output, &png)?;
            println!("Wrote {} ({} colors)", output.display(), palette.len());
            Ok(())
        }
        Commands::Analyze { input, top, mode } => {
            apply_mode(&mut config, mode);
            let display = config.display_spec();
            let palette = Arc::new(config.build_palette(display.color_mode)?);
            let matcher = ColorMatcher::new(palette, config.image_processing.cache_step)?;
            let image = read_png(&input)?;
            let report = AnalysisReport::build(&image, top, &matcher);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::Palette { mode } => {
            apply_mode(&mut config, mode);
            let display = config.display_spec();
            let palette = config.build_palette(display.color_mode)?;
            println!(
                "{} ({}x{}, {})",
                display.name, display.width, display.height, display.color_mode
            );
            for (position, entry) in palette.iter().enumerate() {
                println!(
                    "  {position}: {:<8} {}  wire={}",
                    entry.name(),
                    entry.rgb(),
                    entry.index()
                );
            }
            Ok(())
        }
    }
}

/// Force a color mode by selecting an unforced display type
fn apply_mode(config: &mut AppConfig, mode: Option<ColorMode>) {
    let Some(mode) = mode else { return };
    if config.display_spec().color_mode != mode {
        config.display.display_type = match mode {
            ColorMode::SevenColor => "7in3e".to_string(),
            ColorMode::Monochrome => "7in5_HD".to_string(),
        };
    }
    config.display.color_mode = mode;
}

/// Quantize one PNG and write the requested outputs
fn run_quantize(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    packed: Option<&Path>,
    bits: Option<u8>,
    compare: Option<&Path>,
) -> anyhow::Result<()> {
    let processor = SpriteProcessor::from_config(config)?;
    let image = read_png(input)?;
    tracing::info!(
        input = %input.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );

    let (quantized, png) = processor.render_png(&image)?;
    std::fs::write(output, &png)?;
    println!("Wrote {} ({} bytes)", output.display(), png.len());
    println!("  {}", usage_summary(&quantized));

    if let Some(path) = packed {
        let bits = bits.unwrap_or_else(|| quantized.wire_bit_depth());
        let data = quantized.packed(bits)?;
        std::fs::write(path, &data)?;
        println!("Wrote {} ({} bytes, {} bpp)", path.display(), data.len(), bits);
    }

    if let Some(path) = compare {
        let comparison = side_by_side(&image, &quantized.to_rgb_image());
        std::fs::write(path, encode_rgb_png(&comparison)?)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
