//! Drift CLI
//!
//! Writes a starter `drift.toml`, simulates a page headlessly and prints the
//! final motion state, or runs a JSON scenario and reports pass/fail.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use drift_app::config::CONFIG_FILE;
use drift_app::{DriftConfig, HeadlessRunConfig, HeadlessScenario, Page, Shell};
use drift_core::{Point, PointerEvent};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "drift")]
#[command(about = "Decorative motion engine - simulate pages and run headless scenarios")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a drift.toml with every default spelled out
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing drift.toml
        #[arg(long)]
        force: bool,
    },

    /// Run a page for a number of frames and print the final state as JSON
    Simulate {
        /// Page to show
        #[arg(short, long, default_value = "profile")]
        page: Page,

        /// Frames to run at the configured frame rate
        #[arg(short, long, default_value = "120")]
        frames: u32,

        /// Fixed pointer position as `x,y`; the pointer is off the surface if omitted
        #[arg(long, value_parser = parse_point)]
        pointer: Option<Point>,

        /// Click at the pointer position before the first frame
        #[arg(long, requires = "pointer")]
        click: bool,

        /// Make the cursor kick away from the face
        #[arg(long)]
        angry: bool,

        /// Config file or directory containing drift.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run a JSON scenario and print its report
    Scenario {
        /// Scenario file
        file: PathBuf,

        /// Logical milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,

        /// Also write the report to this relative path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Config file or directory containing drift.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    drift_app::telemetry::init(if cli.verbose { "debug" } else { "info" });

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Simulate {
            page,
            frames,
            pointer,
            click,
            angry,
            config,
        } => cmd_simulate(page, frames, pointer, click, angry, config.as_deref()),
        Commands::Scenario {
            file,
            tick_ms,
            report,
            config,
        } => cmd_scenario(&file, tick_ms, report.as_deref(), config.as_deref()),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let target = path.join(CONFIG_FILE);
    if target.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", target.display());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    fs::write(&target, DriftConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    info!("Wrote {}", target.display());
    Ok(())
}

fn cmd_simulate(
    page: Page,
    frames: u32,
    pointer: Option<Point>,
    click: bool,
    angry: bool,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let mut shell = Shell::new(config)?;
    shell.navigate(page);
    shell.set_angry(angry);

    if let Some(at) = pointer {
        shell.handle_pointer(PointerEvent::Move { x: at.x, y: at.y });
        if click {
            shell.handle_pointer(PointerEvent::Down { x: at.x, y: at.y });
            shell.handle_pointer(PointerEvent::Up { x: at.x, y: at.y });
        }
    }

    for _ in 0..frames {
        shell.frame_nominal();
    }
    info!(page = %page, frames, "simulation finished");

    println!("{}", serde_json::to_string_pretty(&shell.snapshot())?);
    Ok(())
}

fn cmd_scenario(
    file: &Path,
    tick_ms: u64,
    report_path: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let scenario = HeadlessScenario::from_path(file)?;
    let mut shell = Shell::new(load_config(config)?)?;
    let runtime_cfg = HeadlessRunConfig {
        tick_ms,
        ..Default::default()
    };

    let outcome = drift_app::run_loaded_scenario(&scenario, &mut shell, runtime_cfg)?;
    let report = outcome.report();

    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report
            .write_to_path(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if outcome.is_failed() {
        std::process::exit(1);
    }
    Ok(())
}

/// Explicit path first, then ./drift.toml, then built-in defaults
fn load_config(path: Option<&Path>) -> Result<DriftConfig> {
    match path {
        Some(path) => DriftConfig::load_from_dir(path),
        None if Path::new(CONFIG_FILE).exists() => DriftConfig::load_from_dir(Path::new(".")),
        None => Ok(DriftConfig::default()),
    }
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}
