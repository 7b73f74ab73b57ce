use clap::Args;
use serde_json::Value;

use finhealth_core::optimization::{generate_cost_recommendations, CostOptimizationInput};

use crate::input;

#[derive(Args)]
pub struct OptimizeArgs {
    /// Path to a JSON file with metrics, ratios, and optional benchmarks
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_optimize(args: OptimizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: CostOptimizationInput = input::typed_input(&args.input)?;
    let result = generate_cost_recommendations(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
