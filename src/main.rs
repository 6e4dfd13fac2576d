//! Corner Pattern Database
//!
//! Generates the 44 MB table of exact corner distances for the 3x3x3 cube,
//! and answers lookups against a saved table.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use cornerdb::{
    encode, generate, moves, CornerCube, CornerTable, GenerateOutcome, GeneratorConfig,
};

const DEFAULT_TABLE: &str = "corner.bin";

/// Builds and queries the corner pattern database.
#[derive(Parser)]
#[command(name = "cornerdb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the full table and save it to disk.
    Generate {
        /// Where to write the table.
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        output: PathBuf,
        /// Stop after recording this many entries (profiling).
        #[arg(long)]
        entry_limit: Option<usize>,
        /// Stop after exploring this depth.
        #[arg(long)]
        max_depth: Option<u8>,
        /// Log progress every this many traversed nodes.
        #[arg(long, default_value_t = GeneratorConfig::default().progress_interval)]
        progress_interval: u64,
        /// Save the table even if the run was cut short.
        #[arg(long)]
        save_partial: bool,
    },
    /// Print the distance of the corners after a move sequence.
    Lookup {
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        table: PathBuf,
        /// Moves applied to the solved cube, e.g. R U R' U'.
        #[arg(allow_hyphen_values = true)]
        moves: Vec<String>,
    },
    /// Show how many configurations sit at each distance.
    Stats {
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        table: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate {
            output,
            entry_limit,
            max_depth,
            progress_interval,
            save_partial,
        } => {
            let config = GeneratorConfig {
                progress_interval,
                entry_limit,
                max_depth,
            };
            run_generate(&output, &config, save_partial)
        }
        Command::Lookup { table, moves } => run_lookup(&table, &moves.join(" ")),
        Command::Stats { table } => run_stats(&table),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Generates the table and writes it to `output`.
fn run_generate(
    output: &Path,
    config: &GeneratorConfig,
    save_partial: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = CornerTable::new();
    let outcome = generate(&mut table, &CornerCube::SOLVED, config)?;

    match outcome {
        GenerateOutcome::Complete { traversed } => {
            info!("Table complete after {traversed} traversed nodes");
        }
        GenerateOutcome::Partial {
            entries,
            depth,
            traversed,
        } => {
            info!("Stopped early at depth {depth}: {entries} entries, {traversed} traversed nodes");
            if !save_partial {
                info!("Partial table not saved (use --save-partial to keep it)");
                return Ok(());
            }
        }
    }

    table.save(output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

/// Prints index and stored distance of the scrambled corners.
fn run_lookup(table: &Path, sequence: &str) -> Result<(), Box<dyn std::error::Error>> {
    let moves = moves::parse_sequence(sequence)?;
    let table = CornerTable::load(table)?;

    let cube = CornerCube::SOLVED.apply_sequence(&moves);
    println!("index {}, distance {}", encode(&cube), table.distance(&cube));
    Ok(())
}

/// Prints the distance histogram of a saved table.
fn run_stats(table: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = CornerTable::load(table)?;
    print!("{}", format_histogram(&table.histogram()));
    Ok(())
}

/// Formats per-distance entry counts, skipping empty distances.
fn format_histogram(histogram: &[u64; 16]) -> String {
    let mut output = String::new();
    for (distance, &count) in histogram.iter().enumerate() {
        if count > 0 {
            output.push_str(&format!("{distance}: {count}\n"));
        }
    }
    output.push_str(&format!("total: {}\n", histogram.iter().sum::<u64>()));
    output
}
