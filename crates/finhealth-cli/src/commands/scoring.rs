use clap::Args;
use serde_json::Value;

use finhealth_core::scoring::{calculate_credit_score, CreditScoreInput};

use crate::input;

#[derive(Args)]
pub struct CreditScoreArgs {
    /// Path to a JSON file with the ratio set and optional override scores
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_credit_score(args: CreditScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: CreditScoreInput = input::typed_input(&args.input)?;
    let result = calculate_credit_score(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
