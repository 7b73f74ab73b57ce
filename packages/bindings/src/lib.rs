use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_financial_ratios(input_json: String) -> NapiResult<String> {
    let metrics: finhealth_core::FinancialMetrics =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finhealth_core::ratios::calculate_financial_ratios(&metrics).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scoring and risk
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_credit_score(input_json: String) -> NapiResult<String> {
    let input: finhealth_core::scoring::CreditScoreInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finhealth_core::scoring::calculate_credit_score(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn assess_financial_risks(input_json: String) -> NapiResult<String> {
    let ratios: finhealth_core::CalculatedRatios =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finhealth_core::risk::assess_financial_risks(&ratios).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Optimization and trends
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_cost_recommendations(input_json: String) -> NapiResult<String> {
    let input: finhealth_core::optimization::CostOptimizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finhealth_core::optimization::generate_cost_recommendations(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_trend_analysis(input_json: String) -> NapiResult<String> {
    let input: finhealth_core::trends::TrendInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finhealth_core::trends::calculate_trend_analysis(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Full report
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_health_report(input_json: String) -> NapiResult<String> {
    let input: finhealth_core::report::HealthReportInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finhealth_core::report::generate_health_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
