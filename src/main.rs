use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hexquilt::geometry::grid_dimensions;
use hexquilt::models::{AppConfig, ColorId, ProjectFile, Unit};
use hexquilt::services::{AnchorChange, GradientOptions};
use hexquilt::{EditError, Quilt};
use quilt_color::Srgb;

#[derive(Parser)]
#[command(name = "hexquilt")]
#[command(about = "Hexagon quilt designer - grid layout, fabric supply and gradient fills")]
struct Cli {
    /// YAML file with default settings (overrides HEXQUILT_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grid size for a set of measurements
    Dims {
        /// Point-to-point height of one hexagon
        #[arg(long)]
        hex_size: Option<f64>,

        /// Quilt width
        #[arg(long)]
        width: Option<f64>,

        /// Quilt height
        #[arg(long)]
        height: Option<f64>,
    },
    /// Write an empty project file
    New {
        /// Project file to create
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        hex_size: Option<f64>,

        #[arg(long)]
        width: Option<f64>,

        #[arg(long)]
        height: Option<f64>,

        /// "in" or "cm"
        #[arg(long)]
        unit: Option<Unit>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
    /// Append a fabric color to the palette
    AddColor {
        #[arg(short, long)]
        project: PathBuf,

        /// Color as hex RGB (e.g. "#ff8800")
        #[arg(long)]
        hex: String,

        /// How many hexagons can be cut from this fabric
        #[arg(long)]
        total: u32,
    },
    /// Paint cells around a hexagon
    Paint {
        #[arg(short, long)]
        project: PathBuf,

        #[arg(long)]
        row: usize,

        #[arg(long)]
        col: usize,

        /// Palette color id
        #[arg(long)]
        color: u32,

        /// Brush radius in hex steps
        #[arg(long)]
        radius: Option<u32>,
    },
    /// Add, recolor or remove a gradient anchor
    Anchor {
        #[arg(short, long)]
        project: PathBuf,

        #[arg(long)]
        row: usize,

        #[arg(long)]
        col: usize,

        /// Palette color id
        #[arg(long)]
        color: u32,
    },
    /// Fill the grid with a gradient between the anchors
    Gradient {
        #[arg(short, long)]
        project: PathBuf,

        /// Write the result here instead of back to the project
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Jitter ideal colors to break up flat bands
        #[arg(long)]
        dither: bool,

        /// Dither noise span in LAB units
        #[arg(long)]
        intensity: Option<f64>,

        /// Noise seed for reproducible dithering
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print layout and palette usage of a project
    Info {
        #[arg(short, long)]
        project: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexquilt=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_path = cli
        .config
        .or_else(|| std::env::var("HEXQUILT_CONFIG").ok().map(PathBuf::from));
    let config = match &config_path {
        Some(path) => AppConfig::load(path),
        None => AppConfig::default(),
    };

    match cli.command {
        Some(Commands::Dims {
            hex_size,
            width,
            height,
        }) => {
            let (cols, rows) = grid_dimensions(
                hex_size.unwrap_or(config.layout.hex_real_size),
                width.unwrap_or(config.layout.quilt_width),
                height.unwrap_or(config.layout.quilt_height),
            );
            println!("{cols} x {rows}");
            Ok(())
        }
        Some(Commands::New {
            output,
            hex_size,
            width,
            height,
            unit,
            force,
        }) => run_new_command(&config, &output, hex_size, width, height, unit, force),
        Some(Commands::AddColor {
            project,
            hex,
            total,
        }) => run_add_color_command(&project, &hex, total),
        Some(Commands::Paint {
            project,
            row,
            col,
            color,
            radius,
        }) => run_paint_command(
            &project,
            row,
            col,
            ColorId(color),
            radius.unwrap_or(config.editor.brush_radius),
        ),
        Some(Commands::Anchor {
            project,
            row,
            col,
            color,
        }) => run_anchor_command(&project, row, col, ColorId(color)),
        Some(Commands::Gradient {
            project,
            output,
            dither,
            intensity,
            seed,
        }) => {
            let options = GradientOptions {
                dither: dither || config.gradient.dither,
                intensity: intensity.unwrap_or(config.gradient.intensity),
            };
            let seed = seed.or(config.gradient.seed);
            run_gradient_command(&project, output.as_deref(), &options, seed)
        }
        Some(Commands::Info { project }) => run_info_command(&project),
        None => {
            run_status_command(&config, config_path.as_deref());
            Ok(())
        }
    }
}

fn read_project(path: &Path) -> anyhow::Result<Quilt> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file = ProjectFile::from_json(&json)
        .with_context(|| format!("Invalid project file {}", path.display()))?;
    Quilt::from_project(file).with_context(|| format!("Invalid project file {}", path.display()))
}

fn write_project(path: &Path, quilt: &Quilt) -> anyhow::Result<()> {
    let json = quilt.export_json()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[allow(clippy::too_many_arguments)]
fn run_new_command(
    config: &AppConfig,
    output: &Path,
    hex_size: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    unit: Option<Unit>,
    force: bool,
) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let mut quilt = Quilt::new(
        hex_size.unwrap_or(config.layout.hex_real_size),
        width.unwrap_or(config.layout.quilt_width),
        height.unwrap_or(config.layout.quilt_height),
        unit.unwrap_or(config.layout.unit),
    );
    quilt.set_hex_size(config.layout.hex_size);

    write_project(output, &quilt)?;
    println!(
        "Created {} ({} x {} hexagons)",
        output.display(),
        quilt.cols(),
        quilt.rows()
    );
    Ok(())
}

fn run_add_color_command(project: &Path, hex: &str, total: u32) -> anyhow::Result<()> {
    let color: Srgb = hex
        .parse()
        .with_context(|| format!("Invalid color '{hex}'"))?;

    let mut quilt = read_project(project)?;
    let id = quilt.add_color(color, total)?;
    write_project(project, &quilt)?;

    println!("Added color {id} ({color}, {total} hexagons)");
    Ok(())
}

fn run_paint_command(
    project: &Path,
    row: usize,
    col: usize,
    color: ColorId,
    radius: u32,
) -> anyhow::Result<()> {
    let mut quilt = read_project(project)?;
    let before = quilt.usage_count(color);

    // A stroke that runs out of fabric keeps what it painted
    let result = match quilt.paint(row, col, radius, color) {
        Err(e @ EditError::UnknownColor(_)) => return Err(e.into()),
        other => other,
    };
    let painted = quilt.usage_count(color) - before;
    write_project(project, &quilt)?;

    println!("Painted {painted} hexagons with color {color}");
    if let Err(e) = result {
        eprintln!("Warning: {e}");
    }
    Ok(())
}

fn run_anchor_command(project: &Path, row: usize, col: usize, color: ColorId) -> anyhow::Result<()> {
    let mut quilt = read_project(project)?;
    let change = quilt.toggle_anchor(row, col, color)?;
    let Some(change) = change else {
        anyhow::bail!(
            "Cell ({row}, {col}) is outside the {} x {} grid",
            quilt.cols(),
            quilt.rows()
        );
    };
    write_project(project, &quilt)?;

    match change {
        AnchorChange::Added => println!("Added anchor at ({row}, {col}) with color {color}"),
        AnchorChange::Removed => println!("Removed anchor at ({row}, {col})"),
        AnchorChange::Recolored { previous } => {
            println!("Recolored anchor at ({row}, {col}) from {previous} to {color}")
        }
    }
    Ok(())
}

fn run_gradient_command(
    project: &Path,
    output: Option<&Path>,
    options: &GradientOptions,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut quilt = read_project(project)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = quilt.generate_gradient(options, &mut rng)?;
    write_project(output.unwrap_or(project), &quilt)?;

    println!(
        "Assigned {} hexagons, {} left empty, {} locked",
        report.assigned, report.cleared, report.locked
    );
    Ok(())
}

fn run_info_command(project: &Path) -> anyhow::Result<()> {
    let quilt = read_project(project)?;
    let layout = quilt.layout();

    println!(
        "Quilt: {} x {} {} ({} {} hexagons)",
        layout.quilt_width, layout.quilt_height, layout.unit, layout.hex_real_size, layout.unit
    );
    println!(
        "Grid:  {} x {} ({} cells, {} anchors)",
        quilt.cols(),
        quilt.rows(),
        quilt.grid().len(),
        quilt.grid().anchors().len()
    );

    let summary = quilt.palette_summary();
    if summary.is_empty() {
        println!("\nPalette is empty");
        return Ok(());
    }

    println!("\nPalette:");
    for usage in summary {
        println!(
            "  {:>3}  {}  used {:>4} / {:<4} remaining {}",
            usage.id, usage.color, usage.used, usage.quantity, usage.remaining
        );
    }
    Ok(())
}

fn run_status_command(config: &AppConfig, config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Hexquilt v{VERSION}");
    println!("Hexagon quilt designer\n");

    println!(
        "Config: {}",
        config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string())
    );

    let layout = &config.layout;
    let (cols, rows) = grid_dimensions(layout.hex_real_size, layout.quilt_width, layout.quilt_height);
    println!(
        "Default quilt: {} x {} {} with {} {} hexagons ({cols} x {rows})",
        layout.quilt_width, layout.quilt_height, layout.unit, layout.hex_real_size, layout.unit
    );
    println!(
        "Gradient: dither {}, intensity {}, seed {}",
        config.gradient.dither,
        config.gradient.intensity,
        config
            .gradient
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string())
    );

    println!("\nRun 'hexquilt --help' for commands.");
}
