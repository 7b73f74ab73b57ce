use clap::Args;
use serde_json::Value;

use finhealth_core::ratios::calculate_financial_ratios;
use finhealth_core::FinancialMetrics;

use crate::input;

#[derive(Args)]
pub struct RatiosArgs {
    /// Path to a JSON file with the raw financial metrics
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let metrics: FinancialMetrics = input::typed_input(&args.input)?;
    let result = calculate_financial_ratios(&metrics)?;
    Ok(serde_json::to_value(result)?)
}
