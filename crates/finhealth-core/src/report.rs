//! Full financial health report.
//!
//! Runs the engine stages in their fixed sequence: metrics are derived
//! into ratios, then the ratio set feeds the credit score, the risk
//! assessment, and the cost recommendations. Trend analysis is included
//! when a prior period is supplied. Warnings from every stage are
//! collected into the report envelope.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::optimization::{self, CostOptimizationInput, CostRecommendation};
use crate::ratios;
use crate::risk::{self, RiskAssessment};
use crate::scoring::{self, CreditScoreInput, CreditScoreOutput};
use crate::trends::{self, TrendAnalysis, TrendInput};
use crate::types::{
    with_metadata, CalculatedRatios, ComputationOutput, FinancialMetrics, IndustryBenchmarks,
    ReportingPeriod,
};
use crate::FinHealthResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReportInput {
    pub metrics: FinancialMetrics,
    /// Prior-period metrics; enables the trend section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_metrics: Option<FinancialMetrics>,
    #[serde(default)]
    pub benchmarks: IndustryBenchmarks,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_history_score: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_score: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<ReportingPeriod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<ReportingPeriod>,
    pub ratios: CalculatedRatios,
    pub credit_score: CreditScoreOutput,
    pub risk: RiskAssessment,
    pub recommendations: Vec<CostRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendAnalysis>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Produce the complete health report for one period.
pub fn generate_health_report(
    input: &HealthReportInput,
) -> FinHealthResult<ComputationOutput<HealthReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let ratio_output = ratios::calculate_financial_ratios(&input.metrics)?;
    warnings.extend(ratio_output.warnings);
    let derived = ratio_output.result;

    let score_output = scoring::calculate_credit_score(&CreditScoreInput {
        ratios: derived.clone(),
        payment_history_score: input.payment_history_score,
        growth_score: input.growth_score,
    })?;
    warnings.extend(score_output.warnings);

    let risk_output = risk::assess_financial_risks(&derived)?;
    warnings.extend(risk_output.warnings);

    let optimization_output =
        optimization::generate_cost_recommendations(&CostOptimizationInput {
            metrics: input.metrics.clone(),
            ratios: derived.clone(),
            benchmarks: input.benchmarks.clone(),
        })?;
    warnings.extend(optimization_output.warnings);

    let trend = match &input.previous_metrics {
        Some(previous) => {
            let trend_output = trends::calculate_trend_analysis(&TrendInput {
                current: input.metrics.clone(),
                previous: previous.clone(),
            })?;
            warnings.extend(trend_output.warnings);
            Some(trend_output.result)
        }
        None => None,
    };

    let report = HealthReport {
        period: input.period.clone(),
        ratios: derived,
        credit_score: score_output.result,
        risk: risk_output.result,
        recommendations: optimization_output.result,
        trend,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "pipeline": ["ratios", "credit_score", "risk", "recommendations", "trend"],
        "trend_requires_previous_metrics": true
    });

    Ok(with_metadata(
        "Financial Health Report (full pipeline)",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_metrics() -> FinancialMetrics {
        FinancialMetrics {
            assets: Some(dec!(1_000_000)),
            current_assets: Some(dec!(300_000)),
            inventory: Some(dec!(80_000)),
            current_liabilities: Some(dec!(150_000)),
            equity: Some(dec!(500_000)),
            revenue: Some(dec!(1_200_000)),
            net_income: Some(dec!(120_000)),
            operating_income: Some(dec!(160_000)),
            cogs: Some(dec!(600_000)),
            operating_expenses: Some(dec!(300_000)),
            interest_expense: Some(dec!(10_000)),
            accounts_receivable: Some(dec!(100_000)),
            accounts_payable: Some(dec!(60_000)),
            debt: Some(dec!(200_000)),
            short_term_debt: Some(dec!(50_000)),
            long_term_debt: Some(dec!(150_000)),
            ..Default::default()
        }
    }

    #[test]
    fn test_report_contains_every_section() {
        let input = HealthReportInput {
            metrics: sample_metrics(),
            previous_metrics: None,
            benchmarks: IndustryBenchmarks::default(),
            payment_history_score: Some(dec!(85)),
            growth_score: Some(dec!(70)),
            period: Some(ReportingPeriod {
                label: "FY2025".to_string(),
                end_date: None,
            }),
        };
        let out = generate_health_report(&input).unwrap().result;
        assert_eq!(out.period.as_ref().unwrap().label, "FY2025");
        assert!(out.ratios.current_ratio.is_some());
        assert!(out.credit_score.score > Decimal::ZERO);
        assert!(out.trend.is_none());
    }

    #[test]
    fn test_report_trend_section_with_previous_period() {
        let mut previous = sample_metrics();
        previous.revenue = Some(dec!(1_000_000));
        let input = HealthReportInput {
            metrics: sample_metrics(),
            previous_metrics: Some(previous),
            benchmarks: IndustryBenchmarks::default(),
            payment_history_score: None,
            growth_score: None,
            period: None,
        };
        let out = generate_health_report(&input).unwrap().result;
        let trend = out.trend.unwrap();
        assert_eq!(trend.revenue_growth, Some(dec!(20)));
    }

    #[test]
    fn test_report_stages_agree_with_direct_calls() {
        let input = HealthReportInput {
            metrics: sample_metrics(),
            previous_metrics: None,
            benchmarks: IndustryBenchmarks::default(),
            payment_history_score: None,
            growth_score: None,
            period: None,
        };
        let report = generate_health_report(&input).unwrap().result;

        let direct_ratios = ratios::calculate_financial_ratios(&sample_metrics())
            .unwrap()
            .result;
        assert_eq!(report.ratios, direct_ratios);

        let direct_risk = risk::assess_financial_risks(&direct_ratios).unwrap().result;
        assert_eq!(report.risk.risk_score, direct_risk.risk_score);
        assert_eq!(report.risk.risk_factors, direct_risk.risk_factors);
    }
}
