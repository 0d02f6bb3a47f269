//! Tx Metrics CLI
//!
//! Generates TPS and latency graphs over fixed-width time windows from a
//! transaction submitter's database.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::PathBuf;

use tx_metrics::commands::{
    execute_batches, execute_graph, validate_args, BatchSelection, GraphArgs, GraphKind,
};
use tx_metrics::utils::config::{DEFAULT_DB_PATH, DEFAULT_OUTPUT_DIR, SERIES_SCHEMA_VERSION};

/// Tx Metrics - TPS and latency graphs for batched transaction runs
#[derive(Parser, Debug)]
#[command(name = "tx-metrics")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate TPS and/or latency graphs
    Graph {
        /// Path to the transaction database
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,

        /// Batch identifier to graph (default: most recent batch)
        #[arg(short, long, conflicts_with = "all")]
        batch: Option<String>,

        /// Graph all batches combined instead of one batch
        #[arg(long)]
        all: bool,

        /// Which graph(s) to generate
        #[arg(short, long, value_enum, default_value_t = KindChoice::Both)]
        kind: KindChoice,

        /// Aggregation window width in seconds
        #[arg(short, long, default_value_t = 1)]
        window: u32,

        /// Directory for generated files
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        /// Also export the aligned series as JSON
        #[arg(long)]
        export_json: bool,
    },

    /// List known batch identifiers, most recent first
    Batches {
        /// Path to the transaction database
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: PathBuf,
    },

    /// Display version information
    Version,
}

/// Graph kind selection on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum KindChoice {
    Tps,
    Latency,
    Both,
}

impl KindChoice {
    fn kinds(self) -> Vec<GraphKind> {
        match self {
            KindChoice::Tps => vec![GraphKind::Tps],
            KindChoice::Latency => vec![GraphKind::Latency],
            KindChoice::Both => vec![GraphKind::Tps, GraphKind::Latency],
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Graph {
            db,
            batch,
            all,
            kind,
            window,
            output_dir,
            export_json,
        } => {
            let selection = match (batch, all) {
                (Some(id), _) => BatchSelection::Batch(id),
                (None, true) => BatchSelection::All,
                (None, false) => BatchSelection::MostRecent,
            };

            let args = GraphArgs {
                db_path: db,
                batch: selection,
                kinds: kind.kinds(),
                window_secs: window,
                output_dir,
                export_json,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute graph generation
            execute_graph(args)?;
        }

        Commands::Batches { db } => {
            execute_batches(&db)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Tx Metrics v{}", env!("CARGO_PKG_VERSION"));
    println!("Series Schema: v{}", SERIES_SCHEMA_VERSION);
    println!();
    println!("TPS and latency graph generation for batched transaction runs.");
}
