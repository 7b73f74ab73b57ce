//! Benchmark-driven cost optimization recommendations.
//!
//! Compares spend ratios and the collection period against industry
//! benchmarks and emits prioritized recommendations in evaluation order:
//! operating expenses, then COGS, then receivables. An empty list means
//! nothing exceeded its benchmark.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{
    with_metadata, CalculatedRatios, ComputationOutput, FinancialMetrics, IndustryBenchmarks,
    Money, Rate,
};
use crate::{FinHealthError, FinHealthResult};

/// Engine-internal fallbacks when the benchmark lookup has no value.
const DEFAULT_OPEX_RATIO: Decimal = dec!(30);
const DEFAULT_COGS_RATIO: Decimal = dec!(60);
const DEFAULT_DAYS_RECEIVABLE: Decimal = dec!(45);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostOptimizationInput {
    pub metrics: FinancialMetrics,
    pub ratios: CalculatedRatios,
    #[serde(default)]
    pub benchmarks: IndustryBenchmarks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    /// Reserved for future recommendation categories; no current rule
    /// produces it.
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecommendation {
    pub category: String,
    /// The measured value (a percentage of revenue, or days).
    pub current_value: Decimal,
    /// The benchmark it was compared against.
    pub benchmark_value: Decimal,
    /// Annual savings in currency units; 0 for non-monetary findings.
    pub savings_potential: Money,
    pub recommendation: String,
    pub priority: Priority,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare metrics and ratios against industry benchmarks, producing
/// prioritized savings recommendations.
pub fn generate_cost_recommendations(
    input: &CostOptimizationInput,
) -> FinHealthResult<ComputationOutput<Vec<CostRecommendation>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let mut recommendations: Vec<CostRecommendation> = Vec::new();

    validate_benchmarks(&input.benchmarks)?;

    let m = &input.metrics;
    let b = &input.benchmarks;

    // 1. Operating expense ratio vs benchmark
    if let (Some(opex), Some(revenue)) = (m.operating_expenses, m.revenue) {
        let benchmark = b.operating_expense_ratio.unwrap_or(DEFAULT_OPEX_RATIO);
        match spend_ratio(opex, revenue, "operating expense", &mut warnings) {
            Some(ratio) if ratio > benchmark => {
                let overage = ratio - benchmark;
                recommendations.push(CostRecommendation {
                    category: "Operating Expenses".to_string(),
                    current_value: ratio,
                    benchmark_value: benchmark,
                    savings_potential: revenue * overage / dec!(100),
                    recommendation: format!(
                        "Operating expenses run {}% of revenue, {} points above the \
                         {}% industry benchmark. Review discretionary spend, \
                         subscriptions, and staffing costs.",
                        ratio.round_dp(1),
                        overage.round_dp(1),
                        benchmark
                    ),
                    priority: if ratio > benchmark * dec!(1.5) {
                        Priority::High
                    } else {
                        Priority::Medium
                    },
                });
            }
            _ => {}
        }
    }

    // 2. COGS ratio vs benchmark
    if let (Some(cogs), Some(revenue)) = (m.cogs, m.revenue) {
        let benchmark = b.cogs_ratio.unwrap_or(DEFAULT_COGS_RATIO);
        match spend_ratio(cogs, revenue, "COGS", &mut warnings) {
            Some(ratio) if ratio > benchmark => {
                let overage = ratio - benchmark;
                recommendations.push(CostRecommendation {
                    category: "Cost of Goods Sold".to_string(),
                    current_value: ratio,
                    benchmark_value: benchmark,
                    savings_potential: revenue * overage / dec!(100),
                    recommendation: format!(
                        "Cost of goods sold runs {}% of revenue, {} points above the \
                         {}% industry benchmark. Renegotiate supplier terms or \
                         review pricing.",
                        ratio.round_dp(1),
                        overage.round_dp(1),
                        benchmark
                    ),
                    priority: if ratio > benchmark * dec!(1.3) {
                        Priority::High
                    } else {
                        Priority::Medium
                    },
                });
            }
            _ => {}
        }
    }

    // 3. Collection period vs benchmark (non-monetary)
    if let Some(days) = input.ratios.days_receivable_outstanding {
        let benchmark = b.days_receivable_outstanding.unwrap_or(DEFAULT_DAYS_RECEIVABLE);
        if days > benchmark {
            let overage = days - benchmark;
            recommendations.push(CostRecommendation {
                category: "Accounts Receivable".to_string(),
                current_value: days,
                benchmark_value: benchmark,
                savings_potential: Decimal::ZERO,
                recommendation: format!(
                    "Customers take {} days to pay, {} days beyond the {}-day \
                     benchmark. Tighten credit terms and follow up on overdue \
                     invoices.",
                    days.round_dp(0),
                    overage.round_dp(0),
                    benchmark
                ),
                priority: if overage > dec!(30) {
                    Priority::High
                } else {
                    Priority::Medium
                },
            });
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "benchmark_defaults": {
            "operating_expense_ratio": "30",
            "cogs_ratio": "60",
            "days_receivable_outstanding": "45"
        },
        "evaluation_order": ["Operating Expenses", "Cost of Goods Sold", "Accounts Receivable"]
    });

    Ok(with_metadata(
        "Benchmark Cost Optimization",
        &assumptions,
        warnings,
        elapsed,
        recommendations,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Spend as a percentage of revenue. Zero revenue makes the comparison
/// meaningless, so the check is skipped with a warning.
fn spend_ratio(
    spend: Money,
    revenue: Money,
    label: &str,
    warnings: &mut Vec<String>,
) -> Option<Rate> {
    if revenue.is_zero() {
        warnings.push(format!("revenue is zero; {label} check skipped"));
        None
    } else {
        Some(spend / revenue * dec!(100))
    }
}

fn validate_benchmarks(b: &IndustryBenchmarks) -> FinHealthResult<()> {
    for (field, value) in [
        ("operating_expense_ratio", b.operating_expense_ratio),
        ("cogs_ratio", b.cogs_ratio),
        ("days_receivable_outstanding", b.days_receivable_outstanding),
    ] {
        if let Some(v) = value {
            if v < Decimal::ZERO {
                return Err(FinHealthError::InvalidInput {
                    field: field.into(),
                    reason: "Benchmark values cannot be negative.".into(),
                });
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
