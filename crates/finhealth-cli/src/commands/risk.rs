use clap::Args;
use serde_json::Value;

use finhealth_core::risk::assess_financial_risks;
use finhealth_core::CalculatedRatios;

use crate::input;

#[derive(Args)]
pub struct RiskArgs {
    /// Path to a JSON file with the ratio set
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_risk(args: RiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ratios: CalculatedRatios = input::typed_input(&args.input)?;
    let result = assess_financial_risks(&ratios)?;
    Ok(serde_json::to_value(result)?)
}
