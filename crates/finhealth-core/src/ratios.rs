//! Financial ratio derivation from raw statement figures.
//!
//! Two rules govern every derivation:
//! 1. A ratio is computed only when all of its required inputs are
//!    present. Absent inputs propagate to an absent output field.
//! 2. A denominator that is present but zero is replaced by 1, with a
//!    warning pushed to the envelope. An absent denominator is never
//!    substituted; the ratio is skipped instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Instant;

use crate::types::{with_metadata, CalculatedRatios, ComputationOutput, FinancialMetrics};
use crate::FinHealthResult;

/// Day basis for the days-outstanding metrics.
const DAYS_PER_YEAR: Decimal = dec!(365);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the full ratio set from raw financial metrics.
pub fn calculate_financial_ratios(
    metrics: &FinancialMetrics,
) -> FinHealthResult<ComputationOutput<CalculatedRatios>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut r = CalculatedRatios::default();

    // -- Liquidity ------------------------------------------------------------
    r.current_ratio = div_opt(
        metrics.current_assets,
        metrics.current_liabilities,
        "current ratio",
        &mut warnings,
    );

    r.quick_ratio = match (
        metrics.current_assets,
        metrics.inventory,
        metrics.current_liabilities,
    ) {
        (Some(ca), Some(inv), Some(cl)) => {
            Some((ca - inv) / guard_denominator(cl, "quick ratio", &mut warnings))
        }
        _ => None,
    };

    // Operating cash flow stands in for cash on hand.
    r.cash_ratio = div_opt(
        metrics.cash_flow,
        metrics.current_liabilities,
        "cash ratio",
        &mut warnings,
    );

    r.working_capital = match (metrics.current_assets, metrics.current_liabilities) {
        (Some(ca), Some(cl)) => Some(ca - cl),
        _ => None,
    };

    // -- Profitability (percent) ----------------------------------------------
    r.profit_margin = pct_opt(
        metrics.net_income,
        metrics.revenue,
        "profit margin",
        &mut warnings,
    );
    r.operating_margin = pct_opt(
        metrics.operating_income,
        metrics.revenue,
        "operating margin",
        &mut warnings,
    );
    r.return_on_assets = pct_opt(
        metrics.net_income,
        metrics.assets,
        "return on assets",
        &mut warnings,
    );
    r.return_on_equity = pct_opt(
        metrics.net_income,
        metrics.equity,
        "return on equity",
        &mut warnings,
    );

    // -- Leverage -------------------------------------------------------------
    r.asset_turnover = div_opt(
        metrics.revenue,
        metrics.assets,
        "asset turnover",
        &mut warnings,
    );
    r.debt_to_equity_ratio = div_opt(
        metrics.debt,
        metrics.equity,
        "debt-to-equity ratio",
        &mut warnings,
    );
    r.debt_to_assets_ratio = div_opt(
        metrics.debt,
        metrics.assets,
        "debt-to-assets ratio",
        &mut warnings,
    );
    r.equity_ratio = pct_opt(
        metrics.equity,
        metrics.assets,
        "equity ratio",
        &mut warnings,
    );

    // DSCR: each obligation term defaults to 0 when absent; the sum of
    // obligations gets the zero-guard.
    r.debt_service_coverage_ratio = metrics.operating_income.map(|oi| {
        let obligations = metrics.short_term_debt.unwrap_or(Decimal::ZERO)
            + metrics.long_term_debt.unwrap_or(Decimal::ZERO)
            + metrics.interest_expense.unwrap_or(Decimal::ZERO);
        oi / guard_denominator(obligations, "debt service coverage", &mut warnings)
    });

    // -- Efficiency -----------------------------------------------------------
    r.receivables_turnover = div_opt(
        metrics.revenue,
        metrics.accounts_receivable,
        "receivables turnover",
        &mut warnings,
    );
    r.inventory_turnover = div_opt(
        metrics.cogs,
        metrics.inventory,
        "inventory turnover",
        &mut warnings,
    );
    r.payables_turnover = div_opt(
        metrics.cogs,
        metrics.accounts_payable,
        "payables turnover",
        &mut warnings,
    );

    r.days_inventory_outstanding = r
        .inventory_turnover
        .map(|t| DAYS_PER_YEAR / guard_denominator(t, "days inventory outstanding", &mut warnings));
    r.days_receivable_outstanding = r
        .receivables_turnover
        .map(|t| DAYS_PER_YEAR / guard_denominator(t, "days receivable outstanding", &mut warnings));
    r.days_payable_outstanding = r
        .payables_turnover
        .map(|t| DAYS_PER_YEAR / guard_denominator(t, "days payable outstanding", &mut warnings));

    // CCC only when all three days-metrics were derived.
    r.cash_conversion_cycle = match (
        r.days_inventory_outstanding,
        r.days_receivable_outstanding,
        r.days_payable_outstanding,
    ) {
        (Some(dio), Some(dro), Some(dpo)) => Some(dio + dro - dpo),
        _ => None,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "zero_denominator_guard": "1",
        "days_per_year": "365",
        "percent_valued": ["profit_margin", "operating_margin", "return_on_assets", "return_on_equity", "equity_ratio"],
        "cash_ratio_numerator": "cash_flow"
    });

    Ok(with_metadata(
        "Financial Ratio Analysis (liquidity/profitability/leverage/efficiency)",
        &assumptions,
        warnings,
        elapsed,
        r,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Zero-guard: a present-but-zero denominator becomes 1.
fn guard_denominator(denom: Decimal, context: &str, warnings: &mut Vec<String>) -> Decimal {
    if denom.is_zero() {
        warnings.push(format!("{context}: denominator is zero, computed against 1"));
        Decimal::ONE
    } else {
        denom
    }
}

/// Divide when both sides are present, guarding the denominator.
fn div_opt(
    numerator: Option<Decimal>,
    denominator: Option<Decimal>,
    context: &str,
    warnings: &mut Vec<String>,
) -> Option<Decimal> {
    match (numerator, denominator) {
        (Some(n), Some(d)) => Some(n / guard_denominator(d, context, warnings)),
        _ => None,
    }
}

/// As `div_opt`, scaled to a percentage.
fn pct_opt(
    numerator: Option<Decimal>,
    denominator: Option<Decimal>,
    context: &str,
    warnings: &mut Vec<String>,
) -> Option<Decimal> {
    div_opt(numerator, denominator, context, warnings).map(|v| v * dec!(100))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
