mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::benford::{AnalyzeArgs, BootstrapArgs, DigitsArgs, HistogramArgs, TheoreticalArgs};

/// Benford's Law conformity analysis
#[derive(Parser)]
#[command(
    name = "benford",
    version,
    about = "Benford's Law conformity analysis",
    long_about = "A CLI for testing whether a dataset follows Benford's Law. Computes \
                  leading-digit distributions, divergence metrics, chi-square and G tests, \
                  and bootstrap statistics for large datasets."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full conformity analysis of a dataset
    Analyze(AnalyzeArgs),
    /// Theoretical Benford proportions
    Theoretical(TheoreticalArgs),
    /// Count leading digits of a dataset
    Digits(DigitsArgs),
    /// Bootstrap power-divergence statistic
    Bootstrap(BootstrapArgs),
    /// Observed-vs-Benford histogram data
    Histogram(HistogramArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::benford::run_analyze(args),
        Commands::Theoretical(args) => commands::benford::run_theoretical(args),
        Commands::Digits(args) => commands::benford::run_digits(args),
        Commands::Bootstrap(args) => commands::benford::run_bootstrap(args),
        Commands::Histogram(args) => commands::benford::run_histogram(args),
        Commands::Version => {
            println!("benford {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
