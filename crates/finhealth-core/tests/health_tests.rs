use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use finhealth_core::optimization::{self, CostOptimizationInput, Priority};
use finhealth_core::ratios;
use finhealth_core::report::{self, HealthReportInput};
use finhealth_core::risk::{self, RiskTier};
use finhealth_core::scoring::{self, CreditScoreInput, CreditTier};
use finhealth_core::trends::{self, TrendInput};
use finhealth_core::{CalculatedRatios, FinancialMetrics, IndustryBenchmarks};

// ===========================================================================
// Pipeline fixtures
// ===========================================================================

/// A stable trading business: comfortable liquidity, modest leverage.
fn stable_retailer() -> FinancialMetrics {
    FinancialMetrics {
        assets: Some(dec!(1_000_000)),
        current_assets: Some(dec!(100_000)),
        inventory: Some(dec!(20_000)),
        current_liabilities: Some(dec!(50_000)),
        equity: Some(dec!(500_000)),
        revenue: Some(dec!(500_000)),
        net_income: Some(dec!(50_000)),
        operating_income: Some(dec!(70_000)),
        cogs: Some(dec!(250_000)),
        operating_expenses: Some(dec!(150_000)),
        interest_expense: Some(dec!(5_000)),
        accounts_receivable: Some(dec!(40_000)),
        accounts_payable: Some(dec!(30_000)),
        debt: Some(dec!(500_000)),
        short_term_debt: Some(dec!(20_000)),
        long_term_debt: Some(dec!(80_000)),
        ..Default::default()
    }
}

// ===========================================================================
// Ratio derivation
// ===========================================================================

#[test]
fn test_liquidity_worked_example() {
    let metrics = FinancialMetrics {
        current_assets: Some(dec!(100_000)),
        current_liabilities: Some(dec!(50_000)),
        inventory: Some(dec!(20_000)),
        ..Default::default()
    };
    let r = ratios::calculate_financial_ratios(&metrics).unwrap().result;
    assert_eq!(r.current_ratio, Some(dec!(2)));
    assert_eq!(r.quick_ratio, Some(dec!(1.6)));
    assert_eq!(r.working_capital, Some(dec!(50_000)));
}

#[test]
fn test_profitability_worked_example() {
    let metrics = FinancialMetrics {
        net_income: Some(dec!(50_000)),
        revenue: Some(dec!(500_000)),
        assets: Some(dec!(1_000_000)),
        equity: Some(dec!(500_000)),
        ..Default::default()
    };
    let r = ratios::calculate_financial_ratios(&metrics).unwrap().result;
    assert_eq!(r.profit_margin, Some(dec!(10)));
    assert_eq!(r.return_on_assets, Some(dec!(5)));
    assert_eq!(r.return_on_equity, Some(dec!(10)));
}

#[test]
fn test_leverage_worked_example() {
    let metrics = FinancialMetrics {
        debt: Some(dec!(500_000)),
        equity: Some(dec!(500_000)),
        assets: Some(dec!(1_000_000)),
        ..Default::default()
    };
    let r = ratios::calculate_financial_ratios(&metrics).unwrap().result;
    assert_eq!(r.debt_to_equity_ratio, Some(dec!(1)));
    assert_eq!(r.debt_to_assets_ratio, Some(dec!(0.5)));
    assert_eq!(r.equity_ratio, Some(dec!(50)));
}

#[test]
fn test_zero_current_liabilities_never_divides_by_zero() {
    let metrics = FinancialMetrics {
        current_assets: Some(dec!(75_000)),
        inventory: Some(dec!(25_000)),
        current_liabilities: Some(Decimal::ZERO),
        ..Default::default()
    };
    let out = ratios::calculate_financial_ratios(&metrics).unwrap();
    // Denominator guarded to 1
    assert_eq!(out.result.current_ratio, Some(dec!(75_000)));
    assert_eq!(out.result.quick_ratio, Some(dec!(50_000)));
    assert!(!out.warnings.is_empty());
}

// ===========================================================================
// Credit scoring
// ===========================================================================

#[test]
fn test_excellent_tier_end_to_end() {
    let input = CreditScoreInput {
        ratios: CalculatedRatios {
            current_ratio: Some(dec!(2.0)),
            profit_margin: Some(dec!(15)),
            debt_to_equity_ratio: Some(dec!(0.5)),
            return_on_equity: Some(dec!(20)),
            cash_conversion_cycle: Some(dec!(30)),
            asset_turnover: Some(dec!(1.5)),
            ..Default::default()
        },
        payment_history_score: Some(dec!(90)),
        growth_score: Some(dec!(80)),
    };
    let out = scoring::calculate_credit_score(&input).unwrap().result;
    assert!(out.score > dec!(80));
    assert_eq!(out.tier, CreditTier::Excellent);
}

#[test]
fn test_weak_tier_end_to_end() {
    let input = CreditScoreInput {
        ratios: CalculatedRatios {
            current_ratio: Some(dec!(0.5)),
            profit_margin: Some(dec!(-10)),
            debt_to_equity_ratio: Some(dec!(3.0)),
            return_on_equity: Some(dec!(-15)),
            cash_conversion_cycle: Some(dec!(120)),
            asset_turnover: Some(dec!(0.3)),
            ..Default::default()
        },
        payment_history_score: Some(dec!(20)),
        growth_score: Some(dec!(30)),
    };
    let out = scoring::calculate_credit_score(&input).unwrap().result;
    assert!(out.score < dec!(50));
    assert!(matches!(out.tier, CreditTier::Poor | CreditTier::VeryPoor));
}

// ===========================================================================
// Risk assessment
// ===========================================================================

#[test]
fn test_clean_ratio_set_is_very_low_risk() {
    let ratios = CalculatedRatios {
        current_ratio: Some(dec!(2.5)),
        quick_ratio: Some(dec!(2.0)),
        profit_margin: Some(dec!(15)),
        debt_to_equity_ratio: Some(dec!(0.5)),
        debt_service_coverage_ratio: Some(dec!(3.0)),
        cash_conversion_cycle: Some(dec!(30)),
        inventory_turnover: Some(dec!(8)),
        ..Default::default()
    };
    let out = risk::assess_financial_risks(&ratios).unwrap().result;
    assert_eq!(out.risk_tier, RiskTier::VeryLow);
    assert_eq!(out.risk_factors, Vec::<String>::new());
    assert_eq!(out.risk_score, Decimal::ZERO);
}

#[test]
fn test_distressed_ratio_set_is_high_risk() {
    let ratios = CalculatedRatios {
        current_ratio: Some(dec!(0.8)),
        profit_margin: Some(dec!(-10)),
        debt_to_equity_ratio: Some(dec!(2.5)),
        debt_service_coverage_ratio: Some(dec!(0.5)),
        cash_conversion_cycle: Some(dec!(150)),
        inventory_turnover: Some(dec!(0.5)),
        quick_ratio: Some(dec!(0.3)),
        ..Default::default()
    };
    let out = risk::assess_financial_risks(&ratios).unwrap().result;
    assert!(matches!(out.risk_tier, RiskTier::High | RiskTier::VeryHigh));
    assert!(out.risk_score > dec!(50));
    assert!(!out.risk_factors.is_empty());
}

// ===========================================================================
// Cost optimization
// ===========================================================================

#[test]
fn test_opex_overage_recommendation() {
    let input = CostOptimizationInput {
        metrics: FinancialMetrics {
            operating_expenses: Some(dec!(400_000)),
            revenue: Some(dec!(1_000_000)),
            ..Default::default()
        },
        ratios: CalculatedRatios::default(),
        benchmarks: IndustryBenchmarks {
            operating_expense_ratio: Some(dec!(25)),
            ..Default::default()
        },
    };
    let recs = optimization::generate_cost_recommendations(&input)
        .unwrap()
        .result;
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].category, "Operating Expenses");
    assert!(recs[0].savings_potential > Decimal::ZERO);
    assert_eq!(recs[0].priority, Priority::High);
}

#[test]
fn test_both_ratios_below_benchmark_is_empty() {
    let input = CostOptimizationInput {
        metrics: FinancialMetrics {
            operating_expenses: Some(dec!(200_000)),
            revenue: Some(dec!(1_000_000)),
            cogs: Some(dec!(500_000)),
            ..Default::default()
        },
        ratios: CalculatedRatios::default(),
        benchmarks: IndustryBenchmarks {
            operating_expense_ratio: Some(dec!(25)),
            cogs_ratio: Some(dec!(60)),
            ..Default::default()
        },
    };
    let recs = optimization::generate_cost_recommendations(&input)
        .unwrap()
        .result;
    assert_eq!(recs, Vec::new());
}

// ===========================================================================
// Full pipeline
// ===========================================================================

#[test]
fn test_full_pipeline_sequencing() {
    let metrics = stable_retailer();

    // Stage by stage
    let derived = ratios::calculate_financial_ratios(&metrics).unwrap().result;
    let score = scoring::calculate_credit_score(&CreditScoreInput {
        ratios: derived.clone(),
        payment_history_score: None,
        growth_score: None,
    })
    .unwrap()
    .result;
    let risk_out = risk::assess_financial_risks(&derived).unwrap().result;

    // Same stages through the report
    let report = report::generate_health_report(&HealthReportInput {
        metrics,
        previous_metrics: None,
        benchmarks: IndustryBenchmarks::default(),
        payment_history_score: None,
        growth_score: None,
        period: None,
    })
    .unwrap()
    .result;

    assert_eq!(report.ratios, derived);
    assert_eq!(report.credit_score.score, score.score);
    assert_eq!(report.credit_score.tier, score.tier);
    assert_eq!(report.risk.risk_score, risk_out.risk_score);
}

#[test]
fn test_trend_analysis_through_pipeline() {
    let mut previous = stable_retailer();
    previous.revenue = Some(dec!(400_000));
    previous.net_income = Some(dec!(40_000));

    let out = trends::calculate_trend_analysis(&TrendInput {
        current: stable_retailer(),
        previous,
    })
    .unwrap()
    .result;
    assert_eq!(out.revenue_growth, Some(dec!(25)));
    assert_eq!(out.profit_growth, Some(dec!(25)));
}

#[test]
fn test_idempotence_bit_identical_outputs() {
    let metrics = stable_retailer();
    let input = HealthReportInput {
        metrics,
        previous_metrics: Some(FinancialMetrics {
            revenue: Some(dec!(450_000)),
            ..Default::default()
        }),
        benchmarks: IndustryBenchmarks::default(),
        payment_history_score: Some(dec!(75)),
        growth_score: Some(dec!(60)),
        period: None,
    };

    let first = report::generate_health_report(&input).unwrap().result;
    let second = report::generate_health_report(&input).unwrap().result;

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_outputs_serialize_to_json() {
    let out = report::generate_health_report(&HealthReportInput {
        metrics: stable_retailer(),
        previous_metrics: None,
        benchmarks: IndustryBenchmarks::default(),
        payment_history_score: None,
        growth_score: None,
        period: None,
    })
    .unwrap();

    let json = serde_json::to_value(&out).unwrap();
    assert!(json.get("result").is_some());
    assert!(json.get("methodology").is_some());
    assert!(json["result"].get("ratios").is_some());
    assert!(json["result"].get("credit_score").is_some());
    assert!(json["result"].get("risk").is_some());
    // Absent optional sections are omitted, not null
    assert!(json["result"].get("trend").is_none());
}
