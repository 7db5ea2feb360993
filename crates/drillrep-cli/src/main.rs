mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "drillrep",
    version,
    about = "Extract structured records from daily drilling report tables"
)]
struct Cli {
    /// Log extraction steps to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a drilling report from an exported table (JSON, CSV, TSV or XLSX)
    Parse {
        /// Path to the exported table
        input_file: PathBuf,

        /// Predefined ruleset: reference (default) or defensive
        #[arg(short, long, env = "DRILLREP_PRESET", value_name = "NAME")]
        preset: Option<String>,

        /// Custom JSON rule file (takes precedence over --preset)
        #[arg(short, long, value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the extracted report to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Show the first row containing all markers, for writing rule files
    Locate {
        /// Path to the exported table
        input_file: PathBuf,

        /// Marker text that must appear in the row (case-sensitive)
        #[arg(required = true)]
        markers: Vec<String>,
    },
    /// Manage and inspect rulesets
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List predefined rulesets
    List,
    /// Explain a ruleset in plain language
    Explain {
        /// Preset name (e.g., "defensive")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom rule file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            preset,
            rules,
            output,
            out,
        } => commands::parse::run(input_file, preset, rules, &output, out),
        Commands::Locate {
            input_file,
            markers,
        } => commands::locate::run(input_file, &markers),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { preset } => commands::rules::explain(&preset),
            RulesAction::Schema => commands::rules::schema(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
