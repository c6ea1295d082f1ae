//! APEX pipeline simulator CLI.
//!
//! This binary provides a single entry point for both simulation modes. It performs:
//! 1. **Simulate:** Run a program silently for a cycle budget and print the final state.
//! 2. **Display:** Same run, printing the code memory and a per-cycle stage trace first.
//!
//! Logs go to stderr through `tracing-subscriber`; the trace and final state go to stdout.

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use apex_core::config::Config;
use apex_core::sim::loader;
use apex_core::sim::{Simulator, TextReporter};

#[derive(Parser, Debug)]
#[command(
    name = "apex",
    author,
    version,
    about = "APEX seven-stage pipeline simulator",
    long_about = "Simulate an APEX assembly program on the seven-stage in-order pipeline.\n\nExamples:\n  apex simulate input.asm 50\n  apex display input.asm 20\n  apex --config machine.json --stats simulate input.asm 100"
)]
struct Cli {
    /// JSON configuration file (defaults to the classic machine).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print pipeline statistics after the run.
    #[arg(long, global = true)]
    stats: bool,

    /// Print the final state as JSON instead of the text dump.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run silently and print the final state.
    Simulate {
        /// Program source file.
        file: PathBuf,
        /// Maximum number of cycles to simulate.
        cycles: u64,
    },

    /// Run while printing the stage contents of every cycle.
    Display {
        /// Program source file.
        file: PathBuf,
        /// Maximum number of cycles to simulate.
        cycles: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (file, cycles, trace) = match &cli.command {
        Commands::Simulate { file, cycles } => (file.as_path(), *cycles, false),
        Commands::Display { file, cycles } => (file.as_path(), *cycles, true),
    };

    if let Err(message) = cmd_run(&cli, file, cycles, trace) {
        eprintln!("APEX_Error : {message}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration and program, runs the simulator and prints the results.
fn cmd_run(cli: &Cli, file: &Path, cycles: u64, trace: bool) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    let program = loader::load_program(file).map_err(|e| e.to_string())?;

    let mut sim = Simulator::new(program, &config).map_err(|e| e.to_string())?;
    if !cli.json {
        sim = sim.with_reporter(Box::new(TextReporter::stdout()));
    }

    let summary = sim.run(cycles, trace).map_err(|e| e.to_string())?;

    if cli.json {
        let text = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{text}");
    }
    if cli.stats {
        sim.cpu.stats.print();
    }
    Ok(())
}
