//! Weighted creditworthiness scoring.
//!
//! Six component factors (liquidity, profitability, leverage, efficiency,
//! growth, payment history) are combined by fixed weights into a 0-100
//! score and a credit tier. Growth and payment history are caller-supplied
//! overrides: their sources (trend analysis, payment records) live outside
//! this engine.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, CalculatedRatios, ComputationOutput};
use crate::{FinHealthError, FinHealthResult};

const WEIGHT_LIQUIDITY: Decimal = dec!(0.20);
const WEIGHT_PROFITABILITY: Decimal = dec!(0.25);
const WEIGHT_LEVERAGE: Decimal = dec!(0.25);
const WEIGHT_EFFICIENCY: Decimal = dec!(0.15);
const WEIGHT_GROWTH: Decimal = dec!(0.10);
const WEIGHT_PAYMENT_HISTORY: Decimal = dec!(0.05);

/// Applied when the caller supplies no override score.
const DEFAULT_OVERRIDE_SCORE: Decimal = dec!(50);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditScoreInput {
    /// Previously derived ratio set.
    pub ratios: CalculatedRatios,
    /// Payment punctuality score in [0, 100]; defaults to 50.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_history_score: Option<Decimal>,
    /// Growth score in [0, 100]; defaults to 50.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_score: Option<Decimal>,
}

/// The six component scores entering the weighted sum. A factor with no
/// qualifying ratio stays at 0 and still carries its weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditScoreFactors {
    pub liquidity: Decimal,
    pub profitability: Decimal,
    pub leverage: Decimal,
    pub efficiency: Decimal,
    pub growth: Decimal,
    pub payment_history: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl std::fmt::Display for CreditTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::VeryPoor => "very_poor",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditScoreOutput {
    /// Weighted score, rounded to 2 decimal places.
    pub score: Decimal,
    pub tier: CreditTier,
    pub factors: CreditScoreFactors,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Combine the ratio set and caller-supplied override scores into a
/// weighted creditworthiness score and tier.
pub fn calculate_credit_score(
    input: &CreditScoreInput,
) -> FinHealthResult<ComputationOutput<CreditScoreOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_override(input.payment_history_score, "payment_history_score")?;
    validate_override(input.growth_score, "growth_score")?;

    let r = &input.ratios;

    let liquidity = liquidity_score(r);
    if r.current_ratio.is_none() {
        warnings.push("no current ratio available; liquidity factor scored 0".into());
    }

    let profitability = profitability_score(r);
    if r.profit_margin.is_none() {
        warnings.push("no profit margin available; profitability base scored 0".into());
    }

    let leverage = leverage_score(r);
    if r.debt_to_equity_ratio.is_none() {
        warnings.push("no debt-to-equity ratio available; leverage base scored 0".into());
    }

    let efficiency = efficiency_score(r);
    if r.cash_conversion_cycle.is_none() {
        warnings.push("no cash conversion cycle available; efficiency base scored 0".into());
    }

    let growth = input.growth_score.unwrap_or(DEFAULT_OVERRIDE_SCORE);
    let payment_history = input
        .payment_history_score
        .unwrap_or(DEFAULT_OVERRIDE_SCORE);

    let score = (liquidity * WEIGHT_LIQUIDITY
        + profitability * WEIGHT_PROFITABILITY
        + leverage * WEIGHT_LEVERAGE
        + efficiency * WEIGHT_EFFICIENCY
        + growth * WEIGHT_GROWTH
        + payment_history * WEIGHT_PAYMENT_HISTORY)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let output = CreditScoreOutput {
        score,
        tier: classify_tier(score),
        factors: CreditScoreFactors {
            liquidity,
            profitability,
            leverage,
            efficiency,
            growth,
            payment_history,
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "weights": {
            "liquidity": "0.20",
            "profitability": "0.25",
            "leverage": "0.25",
            "efficiency": "0.15",
            "growth": "0.10",
            "payment_history": "0.05"
        },
        "default_override_score": "50"
    });

    Ok(with_metadata(
        "Weighted Credit Score (six-factor decision table)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Factor scoring
// ---------------------------------------------------------------------------

/// Liquidity factor from the current ratio. Peaks across [1.5, 3.0] and
/// decays with distance from 1.5 outside the stepped bands.
fn liquidity_score(r: &CalculatedRatios) -> Decimal {
    match r.current_ratio {
        None => Decimal::ZERO,
        Some(cr) if cr >= dec!(1.5) && cr <= dec!(3.0) => dec!(100),
        Some(cr) if cr >= dec!(1.0) && cr < dec!(1.5) => dec!(75),
        Some(cr) if cr >= dec!(0.5) && cr < dec!(1.0) => dec!(40),
        Some(cr) => Decimal::ZERO.max(dec!(100) - (cr - dec!(1.5)).abs() * dec!(20)),
    }
}

/// Profitability factor: stepped profit-margin score, averaged with an
/// ROE sub-score when ROE is available (15% ROE maps to 100).
fn profitability_score(r: &CalculatedRatios) -> Decimal {
    let mut score = match r.profit_margin {
        None => Decimal::ZERO,
        Some(pm) if pm >= dec!(10) => dec!(100),
        Some(pm) if pm >= dec!(5) => dec!(80),
        Some(pm) if pm >= Decimal::ZERO => dec!(60),
        Some(pm) => Decimal::ZERO.max(dec!(30) + pm * dec!(3)),
    };
    if let Some(roe) = r.return_on_equity {
        let roe_score = dec!(100).min(roe / dec!(15) * dec!(100));
        score = (score + roe_score) / dec!(2);
    }
    score
}

/// Leverage factor: stepped debt-to-equity score, averaged with a DSCR
/// sub-score when coverage is available (2x coverage maps to 100).
fn leverage_score(r: &CalculatedRatios) -> Decimal {
    let mut score = match r.debt_to_equity_ratio {
        None => Decimal::ZERO,
        Some(de) if de <= dec!(0.5) => dec!(100),
        Some(de) if de <= dec!(1.0) => dec!(80),
        Some(de) if de <= dec!(2.0) => dec!(50),
        Some(de) => Decimal::ZERO.max(dec!(100) - de * dec!(20)),
    };
    if let Some(dscr) = r.debt_service_coverage_ratio {
        let dsc_score = dec!(100).min(dscr / dec!(2) * dec!(100));
        score = (score + dsc_score) / dec!(2);
    }
    score
}

/// Efficiency factor: stepped cash-conversion-cycle score, averaged with
/// an asset-turnover sub-score when turnover is available (2.0x maps to 100).
fn efficiency_score(r: &CalculatedRatios) -> Decimal {
    let mut score = match r.cash_conversion_cycle {
        None => Decimal::ZERO,
        Some(ccc) if ccc <= dec!(30) => dec!(100),
        Some(ccc) if ccc <= dec!(60) => dec!(80),
        Some(ccc) if ccc <= dec!(90) => dec!(60),
        Some(ccc) => Decimal::ZERO.max(dec!(100) - (ccc - dec!(30)) / dec!(2)),
    };
    if let Some(ato) = r.asset_turnover {
        let ato_score = dec!(100).min(ato * dec!(50));
        score = (score + ato_score) / dec!(2);
    }
    score
}

/// Exclusive tier ladder, evaluated top-down; first match wins.
fn classify_tier(score: Decimal) -> CreditTier {
    if score >= dec!(80) {
        CreditTier::Excellent
    } else if score >= dec!(65) {
        CreditTier::Good
    } else if score >= dec!(50) {
        CreditTier::Fair
    } else if score >= dec!(35) {
        CreditTier::Poor
    } else {
        CreditTier::VeryPoor
    }
}

fn validate_override(value: Option<Decimal>, field: &str) -> FinHealthResult<()> {
    if let Some(v) = value {
        if v < Decimal::ZERO || v > dec!(100) {
            return Err(FinHealthError::InvalidInput {
                field: field.into(),
                reason: "Override score must be between 0 and 100.".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn strong_ratios() -> CalculatedRatios {
        CalculatedRatios {
            current_ratio: Some(dec!(2.0)),
            profit_margin: Some(dec!(15)),
            debt_to_equity_ratio: Some(dec!(0.5)),
            return_on_equity: Some(dec!(20)),
            cash_conversion_cycle: Some(dec!(30)),
            asset_turnover: Some(dec!(1.5)),
            ..Default::default()
        }
    }

    fn weak_ratios() -> CalculatedRatios {
        CalculatedRatios {
            current_ratio: Some(dec!(0.5)),
            profit_margin: Some(dec!(-10)),
            debt_to_equity_ratio: Some(dec!(3.0)),
            return_on_equity: Some(dec!(-15)),
            cash_conversion_cycle: Some(dec!(120)),
            asset_turnover: Some(dec!(0.3)),
            ..Default::default()
        }
    }

    #[test]
    fn test_strong_company_scores_excellent() {
        let input = CreditScoreInput {
            ratios: strong_ratios(),
            payment_history_score: Some(dec!(90)),
            growth_score: Some(dec!(80)),
        };
        let out = calculate_credit_score(&input).unwrap().result;
        // 100*0.20 + 100*0.25 + 100*0.25 + 87.5*0.15 + 80*0.10 + 90*0.05
        assert_eq!(out.score, dec!(95.63));
        assert!(out.score > dec!(80));
        assert_eq!(out.tier, CreditTier::Excellent);
    }

    #[test]
    fn test_weak_company_scores_below_fifty() {
        let input = CreditScoreInput {
            ratios: weak_ratios(),
            payment_history_score: Some(dec!(20)),
            growth_score: Some(dec!(30)),
        };
        let out = calculate_credit_score(&input).unwrap().result;
        assert!(out.score < dec!(50));
        assert!(matches!(out.tier, CreditTier::Poor | CreditTier::VeryPoor));
    }

    #[test]
    fn test_liquidity_bands() {
        let score_for = |cr: Decimal| {
            liquidity_score(&CalculatedRatios {
                current_ratio: Some(cr),
                ..Default::default()
            })
        };
        assert_eq!(score_for(dec!(1.5)), dec!(100));
        assert_eq!(score_for(dec!(3.0)), dec!(100));
        assert_eq!(score_for(dec!(1.0)), dec!(75));
        assert_eq!(score_for(dec!(0.5)), dec!(40));
        // Above the band: distance decay from 1.5
        assert_eq!(score_for(dec!(4.0)), dec!(50));
        // Far out: floored at 0
        assert_eq!(score_for(dec!(10)), Decimal::ZERO);
    }

    #[test]
    fn test_profitability_roe_average() {
        // pm = 15 -> 100; roe = 7.5 -> 50; average = 75
        let r = CalculatedRatios {
            profit_margin: Some(dec!(15)),
            return_on_equity: Some(dec!(7.5)),
            ..Default::default()
        };
        assert_eq!(profitability_score(&r), dec!(75));
    }

    #[test]
    fn test_negative_roe_can_pull_factor_below_zero() {
        // pm = -10 -> base 0; roe = -15 -> sub-score -100; average -50.
        // Only the explicit clamps are enforced: the factor itself may go
        // negative before weighting.
        let r = CalculatedRatios {
            profit_margin: Some(dec!(-10)),
            return_on_equity: Some(dec!(-15)),
            ..Default::default()
        };
        assert_eq!(profitability_score(&r), dec!(-50));
    }

    #[test]
    fn test_leverage_dscr_average() {
        // d/e = 0.4 -> 100; dscr = 1.0 -> 50; average = 75
        let r = CalculatedRatios {
            debt_to_equity_ratio: Some(dec!(0.4)),
            debt_service_coverage_ratio: Some(dec!(1.0)),
            ..Default::default()
        };
        assert_eq!(leverage_score(&r), dec!(75));
    }

    #[test]
    fn test_efficiency_turnover_cap() {
        // ccc = 20 -> 100; ato = 3.0 -> capped at 100; average = 100
        let r = CalculatedRatios {
            cash_conversion_cycle: Some(dec!(20)),
            asset_turnover: Some(dec!(3.0)),
            ..Default::default()
        };
        assert_eq!(efficiency_score(&r), dec!(100));
    }

    #[test]
    fn test_missing_factors_stay_zero_in_weighted_sum() {
        let input = CreditScoreInput {
            ratios: CalculatedRatios::default(),
            payment_history_score: None,
            growth_score: None,
        };
        let out = calculate_credit_score(&input).unwrap();
        // Only the two defaulted overrides contribute: 50*0.10 + 50*0.05
        assert_eq!(out.result.score, dec!(7.50));
        assert_eq!(out.result.tier, CreditTier::VeryPoor);
        assert_eq!(out.result.factors.liquidity, Decimal::ZERO);
        assert!(out.warnings.len() >= 4);
    }

    #[test]
    fn test_tier_ladder_boundaries() {
        assert_eq!(classify_tier(dec!(80)), CreditTier::Excellent);
        assert_eq!(classify_tier(dec!(79.99)), CreditTier::Good);
        assert_eq!(classify_tier(dec!(65)), CreditTier::Good);
        assert_eq!(classify_tier(dec!(50)), CreditTier::Fair);
        assert_eq!(classify_tier(dec!(35)), CreditTier::Poor);
        assert_eq!(classify_tier(dec!(34.99)), CreditTier::VeryPoor);
    }

    #[test]
    fn test_override_out_of_range_rejected() {
        let input = CreditScoreInput {
            ratios: strong_ratios(),
            payment_history_score: Some(dec!(101)),
            growth_score: None,
        };
        let err = calculate_credit_score(&input).unwrap_err();
        match err {
            FinHealthError::InvalidInput { field, .. } => {
                assert_eq!(field, "payment_history_score")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        let json = serde_json::to_string(&CreditTier::VeryPoor).unwrap();
        assert_eq!(json, "\"very_poor\"");
        assert_eq!(CreditTier::VeryPoor.to_string(), "very_poor");
    }
}
