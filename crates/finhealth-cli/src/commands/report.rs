use clap::Args;
use serde_json::Value;

use finhealth_core::report::{generate_health_report, HealthReportInput};

use crate::input;

#[derive(Args)]
pub struct ReportArgs {
    /// Path to a JSON file with metrics and optional prior period,
    /// benchmarks, override scores, and reporting period
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: HealthReportInput = input::typed_input(&args.input)?;
    let result = generate_health_report(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
