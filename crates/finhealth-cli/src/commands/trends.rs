use clap::Args;
use serde_json::Value;

use finhealth_core::trends::{calculate_trend_analysis, TrendInput};

use crate::input;

#[derive(Args)]
pub struct TrendArgs {
    /// Path to a JSON file with current and previous period metrics
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_trend(args: TrendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: TrendInput = input::typed_input(&args.input)?;
    let result = calculate_trend_analysis(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
