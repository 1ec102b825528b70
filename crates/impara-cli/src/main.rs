//! impara CLI — offline Italian verb, noun and adjective drills.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use impara_core::model::Tense;

mod commands;
mod console;

#[derive(Parser)]
#[command(
    name = "impara",
    version,
    about = "Offline Italian conjugation and vocabulary drills"
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive practice session
    Practice {
        /// Skip the category menu and open this category
        #[arg(long)]
        category: Option<String>,

        /// Seed for reproducible batches
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a dataset file or a data directory
    Validate {
        /// Dataset file (.json or .jsonl) or directory containing themes.json
        #[arg(long)]
        data: PathBuf,

        /// Record type of a dataset file (guessed from the file name if omitted)
        #[arg(long, value_enum)]
        kind: Option<commands::validate::DatasetKind>,
    },

    /// Show recorded progress
    Status {
        /// Tense for the verb mastery columns
        #[arg(long, default_value = "present")]
        tense: Tense,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the JSON report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print conjugation tables
    Tables {
        /// Tense to print
        #[arg(long, default_value = "present")]
        tense: Tense,

        /// Print the regular present-tense endings instead
        #[arg(long)]
        endings: bool,

        /// Only verbs from this category
        #[arg(long)]
        category: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample data
    Init,
}

fn main() {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "impara=debug"
    } else {
        "impara=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();

    let result = match cli.command {
        Commands::Practice {
            category,
            seed,
            config,
        } => commands::practice::execute(category, seed, config),
        Commands::Validate { data, kind } => commands::validate::execute(data, kind),
        Commands::Status {
            tense,
            format,
            output,
            config,
        } => commands::status::execute(tense, format, output, config),
        Commands::Tables {
            tense,
            endings,
            category,
            config,
        } => commands::tables::execute(tense, endings, category, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
