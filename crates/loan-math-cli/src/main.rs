mod commands;
mod config;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::borrower::DtiArgs;
use commands::loan::{AmortizationArgs, PaymentArgs, RoiArgs};
use commands::summary::SummaryArgs;

/// Mortgage calculator engine
#[derive(Parser)]
#[command(
    name = "loanmath",
    version,
    about = "Mortgage payment, DTI, amortization and ROI calculations",
    long_about = "A CLI for the mortgage calculators with decimal precision. \
                  Supports monthly payment, debt-to-income ratio, a yearly \
                  amortization preview, estimated ROI, and a combined summary."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML or JSON file overriding the calculator defaults
    #[arg(long, env = "LOANMATH_CONFIG", global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the fixed-rate monthly payment
    Payment(PaymentArgs),
    /// Calculate the borrower's debt-to-income ratio
    Dti(DtiArgs),
    /// Yearly amortization preview
    Amortization(AmortizationArgs),
    /// Estimated return on investment from appreciation
    Roi(RoiArgs),
    /// Run every calculator for one borrower and loan
    Summary(SummaryArgs),
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

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let defaults = match config::load_defaults(cli.config.as_deref()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Dti(args) => commands::borrower::run_dti(args),
        Commands::Amortization(args) => commands::loan::run_amortization(args, &defaults),
        Commands::Roi(args) => commands::loan::run_roi(args, &defaults),
        Commands::Summary(args) => commands::summary::run_summary(args, &defaults),
        Commands::Version => {
            println!("loanmath {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
