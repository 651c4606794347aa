#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;
mod snapshot;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cadence: kanban flow metrics from work-item event streams",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of CSV.
    #[arg(long, global = true)]
    json: bool,

    /// Omit the header row from CSV output.
    #[arg(long, global = true)]
    no_headers: bool,

    /// Path to the config file (default: cadence.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Csv
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Per-item stage-entry dates and blocked time for a board",
        long_about = "Process a board snapshot into one row per work item: the date it \
                      entered each tracked column, development days, and blocked time.",
        after_help = "EXAMPLES:\n    # Report January 2020 to stdout\n    cadence issues deliverables --snapshot board.json --year 2020 --month 1\n\n    # Write <Project>_issues_<YYYY-MM>.csv\n    cadence issues deliverables --snapshot board.json --create-file\n\n    # Emit machine-readable output\n    cadence issues deliverables --snapshot board.json --json"
    )]
    Issues(cmd::issues::IssuesArgs),

    #[command(
        about = "Per-day column occupancy for a board",
        long_about = "Process a board snapshot into one row per calendar day counting how \
                      many items sat in each tracked column.",
        after_help = "EXAMPLES:\n    # Report January 2020 to stdout\n    cadence columns deliverables --snapshot board.json --year 2020 --month 1\n\n    # Omit the header row\n    cadence columns deliverables --snapshot board.json --no-headers"
    )]
    Columns(cmd::columns::ColumnsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CADENCE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "cadence=debug,info"
        } else {
            "cadence=info,warn"
        })
    });

    // Logs go to stderr; stdout is reserved for report output.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_config(cli.config.as_deref())?;
    let mode = cli.output_mode();

    match cli.command {
        Commands::Issues(ref args) => cmd::issues::run_issues(args, &config, mode, cli.no_headers),
        Commands::Columns(ref args) => {
            cmd::columns::run_columns(args, &config, mode, cli.no_headers)
        }
    }
}
