//! Period-over-period trend analysis.
//!
//! Growth percentages for revenue, net income, assets, and equity. A
//! field absent on either side is omitted from the output; a previous
//! value of exactly zero has no meaningful growth rate and is reported
//! as a division-by-zero error naming the field.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, FinancialMetrics, Money, Rate};
use crate::{FinHealthError, FinHealthResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendInput {
    pub current: FinancialMetrics,
    pub previous: FinancialMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_growth: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_growth: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_growth: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity_growth: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute period-over-period growth percentages.
pub fn calculate_trend_analysis(
    input: &TrendInput,
) -> FinHealthResult<ComputationOutput<TrendAnalysis>> {
    let start = Instant::now();

    let output = TrendAnalysis {
        revenue_growth: growth(input.current.revenue, input.previous.revenue, "revenue")?,
        profit_growth: growth(
            input.current.net_income,
            input.previous.net_income,
            "net income",
        )?,
        asset_growth: growth(input.current.assets, input.previous.assets, "assets")?,
        equity_growth: growth(input.current.equity, input.previous.equity, "equity")?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "growth_formula": "(current - previous) / previous * 100",
        "omitted_when_either_side_absent": true
    });

    Ok(with_metadata(
        "Period-over-Period Trend Analysis",
        &assumptions,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Growth percent when both sides are present; None when either is absent.
fn growth(current: Option<Money>, previous: Option<Money>, field: &str) -> FinHealthResult<Option<Rate>> {
    match (current, previous) {
        (Some(c), Some(p)) => {
            if p.is_zero() {
                return Err(FinHealthError::DivisionByZero {
                    context: format!("{field} growth: previous period value is zero"),
                });
            }
            Ok(Some((c - p) / p * dec!(100)))
        }
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
