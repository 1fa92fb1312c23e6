//! parkgrid command-line interface
//!
//! # Examples
//!
//! ```bash
//! # Replay the built-in demo on the default two-level lot
//! parkgrid demo
//!
//! # Show the empty layout of a configured lot
//! parkgrid --config lot.toml layout
//!
//! # Replay a JSON script of operations
//! parkgrid replay --input ops.json --format json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use parkgrid::script::{Script, StepOutcome};
use parkgrid::{Coordinate, LotConfig, ParkingLot, Vehicle};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// parkgrid - multi-level parking spot allocator
#[derive(Parser, Debug)]
#[command(name = "parkgrid")]
#[command(version = parkgrid::VERSION)]
#[command(about = "Multi-level first-fit parking spot allocator", long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Lot configuration file (TOML)
    #[arg(long, global = true, env = "PARKGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Log directory path
    #[arg(long, global = true, default_value = "logs", env = "PARKGRID_LOG_DIR")]
    log_dir: PathBuf,

    /// Log filter: a level (trace, debug, info, warn, error) or directives
    #[arg(long, global = true, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Park three buses and a motorcycle, then release two of them
    Demo,

    /// Show the empty layout and capacity of the configured lot
    Layout,

    /// Replay a JSON script of operations
    Replay(ReplayArgs),

    /// Show version
    Version,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Script file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(&cli)?;

    match cli.command {
        Commands::Demo => demo_command(cli.config),
        Commands::Layout => layout_command(cli.config),
        Commands::Replay(args) => replay_command(cli.config, args),
        Commands::Version => {
            println!("parkgrid {}", parkgrid::VERSION);
            Ok(())
        }
    }
}

/// Setup logging with rolling files and console output
fn setup_logging(cli: &Cli) -> anyhow::Result<()> {
    std::fs::create_dir_all(&cli.log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &cli.log_dir, "parkgrid.log");

    // Accepts a bare level or full directives such as `parkgrid=debug`
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!cli.no_color)
                .pretty(),
        )
        .with(fmt::layer().with_writer(file_appender).with_ansi(false))
        .with(filter)
        .init();

    Ok(())
}

fn load_lot(config: Option<PathBuf>) -> anyhow::Result<ParkingLot> {
    let config = LotConfig::load(config.as_deref())?;
    info!(levels = config.levels.len(), slots = config.total_slots(), "Loaded lot configuration");
    Ok(ParkingLot::new(&config)?)
}

fn print_park(lot: &mut ParkingLot, vehicle: &Vehicle) {
    let result = lot.park(vehicle);
    let (level, row, slot) = Coordinate::triple_or_sentinel(&result);
    println!(
        "Vehicle: {} was parked at level: {} row: {} spot: {}",
        vehicle.plate(),
        level,
        row,
        slot
    );
}

/// Demo command - the classic three buses and a motorcycle
fn demo_command(config: Option<PathBuf>) -> anyhow::Result<()> {
    let mut lot = load_lot(config)?;

    let bus1 = Vehicle::bus("171AZ23", "Tata", "Toyota");
    let bus2 = Vehicle::bus("AZM2323", "Pilot", "Honda");
    let bus3 = Vehicle::bus("QVM2111", "Pilot", "Honda");
    let motorcycle1 = Vehicle::motorcycle("CA21AB1", "AX500", "Honda");

    for vehicle in [&bus1, &bus2, &bus3, &motorcycle1] {
        print_park(&mut lot, vehicle);
    }

    println!("{}", lot);

    let released = lot.release_vehicle(&bus2.identity);
    println!(
        "Removing Vehicle: {} {}",
        bus2.plate(),
        if released { "succeeded" } else { "failed" }
    );

    let target = Coordinate::new(1, 1, 6);
    let released = match lot.release_at(target) {
        Ok(released) => released,
        Err(e) => {
            warn!("Release at {} rejected: {}", target, e);
            false
        }
    };
    println!(
        "Removing Vehicle at level: {}, row: {}, spot {} {}",
        target.level,
        target.row,
        target.slot,
        if released { "succeeded" } else { "failed" }
    );

    println!("{}", lot);
    Ok(())
}

/// Layout command - empty table plus per-level capacity
fn layout_command(config: Option<PathBuf>) -> anyhow::Result<()> {
    let lot = load_lot(config)?;

    print!("{}", lot);
    println!("───────────────────────────────");
    for level in lot.stats().levels {
        println!(
            "  • Level {}: {} rows × {} slots ({} total)",
            level.level, level.rows, level.slots_per_row, level.total_slots
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ReplayReport {
    steps: Vec<StepOutcome>,
    occupancy: Vec<parkgrid::SpotReport>,
    stats: parkgrid::lot::LotStats,
}

/// Replay command - run a script and report each step
fn replay_command(config: Option<PathBuf>, args: ReplayArgs) -> anyhow::Result<()> {
    let mut lot = load_lot(config)?;
    let script = Script::from_json(&std::fs::read_to_string(&args.input)?)?;
    info!(input = %args.input.display(), "Replaying script");

    match args.format {
        OutputFormat::Text => {
            let steps = script.run(&mut lot, |lot| println!("{}", lot));
            for step in &steps {
                let mark = if step.success { "✅" } else { "❌" };
                println!("{} [{}] {}", mark, step.step, step.message);
            }
        }
        OutputFormat::Json => {
            let steps = script.run(&mut lot, |_| {});
            let report = ReplayReport {
                steps,
                occupancy: lot.occupancy(),
                stats: lot.stats(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
