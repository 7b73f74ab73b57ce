//! Rule-based financial risk assessment.
//!
//! Eight independent additive checks over the ratio set. Each check that
//! fires appends a fixed human-readable factor and a fixed point value;
//! a check whose ratio is absent is skipped entirely. The additive score
//! is capped at 100 and bucketed into an ordinal tier.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, CalculatedRatios, ComputationOutput};
use crate::FinHealthResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_tier: RiskTier,
    /// Triggered-condition descriptions, in evaluation order.
    pub risk_factors: Vec<String>,
    /// Additive score, capped at 100.
    pub risk_score: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate the risk rule set against a derived ratio set.
pub fn assess_financial_risks(
    ratios: &CalculatedRatios,
) -> FinHealthResult<ComputationOutput<RiskAssessment>> {
    let start = Instant::now();

    let mut risk_factors: Vec<String> = Vec::new();
    let mut points = Decimal::ZERO;

    let mut check = |value: Option<Decimal>, fires: fn(Decimal) -> bool, factor: &str, pts: Decimal| {
        if let Some(v) = value {
            if fires(v) {
                risk_factors.push(factor.to_string());
                points += pts;
            }
        }
    };

    check(
        ratios.current_ratio,
        |v| v < dec!(1.0),
        "Low liquidity: Current ratio below 1.0",
        dec!(20),
    );
    check(
        ratios.quick_ratio,
        |v| v < dec!(0.5),
        "Critical liquidity: Quick ratio below 0.5",
        dec!(15),
    );
    check(
        ratios.profit_margin,
        |v| v < Decimal::ZERO,
        "Negative profit margin: Business operating at a loss",
        dec!(25),
    );
    check(
        ratios.return_on_equity,
        |v| v < Decimal::ZERO,
        "Negative ROE: Shareholders' equity is decreasing",
        dec!(20),
    );
    check(
        ratios.debt_to_equity_ratio,
        |v| v > dec!(2.0),
        "High leverage: Debt-to-equity ratio exceeds 2.0",
        dec!(25),
    );
    check(
        ratios.debt_service_coverage_ratio,
        |v| v < dec!(1.0),
        "Debt service risk: Cannot cover debt obligations from operating income",
        dec!(30),
    );
    check(
        ratios.cash_conversion_cycle,
        |v| v > dec!(120),
        "Working capital risk: Long cash conversion cycle",
        dec!(15),
    );
    check(
        ratios.inventory_turnover,
        |v| v < dec!(1),
        "Inventory risk: Slow inventory turnover",
        dec!(10),
    );

    let risk_score = points.min(dec!(100));
    let risk_tier = classify_tier(risk_score);

    let output = RiskAssessment {
        risk_tier,
        risk_factors,
        risk_score,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "checks": 8,
        "score_cap": "100",
        "skipped_when_ratio_absent": true
    });

    Ok(with_metadata(
        "Additive Risk Rules (liquidity/profitability/leverage/working capital)",
        &assumptions,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Tier ladder, high threshold first.
fn classify_tier(score: Decimal) -> RiskTier {
    if score >= dec!(80) {
        RiskTier::VeryHigh
    } else if score >= dec!(60) {
        RiskTier::High
    } else if score >= dec!(40) {
        RiskTier::Medium
    } else if score >= dec!(20) {
        RiskTier::Low
    } else {
        RiskTier::VeryLow
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
