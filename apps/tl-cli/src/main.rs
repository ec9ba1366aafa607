use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tl_project::BenchConfig;
use tl_sim::{Bench, SimRecord, run_sim};
use tracing::Level;

mod compile;
mod error;
mod export;

use compile::Overrides;
use error::CliResult;

#[derive(Parser)]
#[command(name = "tl-cli")]
#[command(about = "Thermoloop CLI - heater and PID thermostat chip simulation", long_about = None)]
struct Cli {
    /// Only log warnings and errors (hides per-tick chip lines)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a bench config file
    Validate {
        /// Path to the bench YAML/JSON file
        config_path: PathBuf,
    },
    /// Write a default bench config
    Init {
        /// Where to write the YAML file
        config_path: PathBuf,
    },
    /// Run the closed loop
    Run {
        /// Path to the bench YAML/JSON file (defaults are used if omitted)
        config_path: Option<PathBuf>,
        /// Controller setpoint in °C
        #[arg(long)]
        setpoint: Option<f64>,
        /// Heater power in watts
        #[arg(long)]
        power: Option<f64>,
        /// End time in seconds
        #[arg(long)]
        t_end: Option<f64>,
        /// Fire the controller before the heater when both are due
        #[arg(long)]
        controller_first: bool,
        /// Export the trace as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Export the trace as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.quiet { Level::WARN } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Init { config_path } => cmd_init(&config_path),
        Commands::Run {
            config_path,
            setpoint,
            power,
            t_end,
            controller_first,
            csv,
            json,
        } => {
            let overrides = Overrides {
                setpoint_c: setpoint,
                power_w: power,
                t_end_s: t_end,
                controller_first,
            };
            cmd_run(
                config_path.as_deref(),
                &overrides,
                csv.as_deref(),
                json.as_deref(),
            )
        }
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = tl_project::load(config_path)?;
    println!("✓ Config '{}' is valid", config.name);
    Ok(())
}

fn cmd_init(config_path: &Path) -> CliResult<()> {
    let config = BenchConfig::new("thermoloop bench");
    tl_project::save_yaml(config_path, &config)?;
    println!("✓ Wrote {}", config_path.display());
    Ok(())
}

fn cmd_run(
    config_path: Option<&Path>,
    overrides: &Overrides,
    csv: Option<&Path>,
    json: Option<&Path>,
) -> CliResult<()> {
    let config = match config_path {
        Some(path) => tl_project::load(path)?,
        None => BenchConfig::new("defaults"),
    };
    let config = overrides.apply(config);
    tl_project::validate_config(&config).map_err(tl_project::ProjectError::from)?;

    println!(
        "Running '{}': setpoint {:.1}°C, power {:.0}W, {:.0}s",
        config.name, config.controller.setpoint_c, config.heater.power_w, config.run.t_end_s
    );

    let mut bench = Bench::new(compile::bench_setup(&config))?;
    let record = run_sim(&mut bench, &compile::sim_options(&config))?;

    print_summary(&record, config.controller.setpoint_c);

    if let Some(path) = csv {
        export::write_csv(path, &record)?;
        println!("✓ Trace written to {}", path.display());
    }
    if let Some(path) = json {
        export::write_json(path, &record)?;
        println!("✓ Trace written to {}", path.display());
    }
    Ok(())
}

/// Setpoint in force at the end of the run, falling back to the configured one.
fn final_setpoint(record: &SimRecord, configured: f64) -> f64 {
    record
        .controller
        .last()
        .map_or(configured, |row| row.sample.setpoint)
}

fn print_summary(record: &SimRecord, configured_setpoint: f64) {
    let setpoint = final_setpoint(record, configured_setpoint);
    println!("\n=== Run Summary ===");
    println!("  Heater ticks:     {}", record.heater.len());
    println!("  Controller ticks: {}", record.controller.len());
    println!("  Heater switches:  {}", record.edges.len());
    if let Some(peak) = record.max_temperature() {
        println!("  Peak temperature: {:.2}°C", peak);
    }
    match record.settling_time(setpoint - 1.0, setpoint + 1.0) {
        Some(t) => println!("  Settled (±1°C):   {:.1}s", t),
        None => println!("  Settled (±1°C):   not within run"),
    }
    if let Some(last) = record.final_temperature() {
        println!("  Final temperature: {:.2}°C", last);
    }
}
