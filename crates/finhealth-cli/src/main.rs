mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::optimization::OptimizeArgs;
use commands::ratios::RatiosArgs;
use commands::report::ReportArgs;
use commands::risk::RiskArgs;
use commands::scoring::CreditScoreArgs;
use commands::trends::TrendArgs;

/// Small-business financial health calculations
#[derive(Parser)]
#[command(
    name = "finhealth",
    version,
    about = "Small-business financial health calculations",
    long_about = "A CLI for assessing small-business financial health with decimal \
                  precision. Derives liquidity/profitability/leverage/efficiency \
                  ratios, a weighted credit score and tier, a rule-based risk \
                  assessment, benchmark cost recommendations, and period-over-period \
                  trends."
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
    /// Derive financial ratios from raw statement metrics
    Ratios(RatiosArgs),
    /// Calculate the weighted credit score and tier
    CreditScore(CreditScoreArgs),
    /// Run the rule-based risk assessment
    Risk(RiskArgs),
    /// Generate benchmark cost-optimization recommendations
    Optimize(OptimizeArgs),
    /// Compute period-over-period growth percentages
    Trend(TrendArgs),
    /// Produce the full health report (ratios, score, risk, recommendations, trend)
    Report(ReportArgs),
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

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Ratios(args) => commands::ratios::run_ratios(args),
        Commands::CreditScore(args) => commands::scoring::run_credit_score(args),
        Commands::Risk(args) => commands::risk::run_risk(args),
        Commands::Optimize(args) => commands::optimization::run_optimize(args),
        Commands::Trend(args) => commands::trends::run_trend(args),
        Commands::Report(args) => commands::report::run_report(args),
        Commands::Version => {
            println!("finhealth {}", env!("CARGO_PKG_VERSION"));
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
