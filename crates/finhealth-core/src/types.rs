use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentage-valued ratios (10 = 10%).
pub type Rate = Decimal;

/// Day counts (days outstanding, cash conversion cycle).
pub type Days = Decimal;

/// Raw financial statement figures for a single period.
///
/// Every field is optional: an absent field means "not yet known" and
/// suppresses any ratio that needs it. Zero is a real value and
/// participates in calculations (denominators get a zero-guard).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_assets: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liabilities: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_liabilities: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_income: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cogs: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_expenses: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_expense: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_expense: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_flow: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_receivable: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_payable: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_term_debt: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_debt: Option<Money>,
}

/// Derived ratio set. A field is present only when the inputs allowed its
/// derivation; absence of a field is the signal, never a substituted zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatedRatios {
    // Liquidity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_capital: Option<Money>,
    // Profitability (percent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_margin: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_on_assets: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_on_equity: Option<Rate>,
    // Leverage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_turnover: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_equity_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_to_assets_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity_ratio: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_service_coverage_ratio: Option<Decimal>,
    // Efficiency
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receivables_turnover: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payables_turnover: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_turnover: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_inventory_outstanding: Option<Days>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_receivable_outstanding: Option<Days>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_payable_outstanding: Option<Days>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_conversion_cycle: Option<Days>,
}

/// Industry benchmark values supplied by an external lookup. Missing
/// fields fall back to engine-internal defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryBenchmarks {
    /// Operating expenses as a percentage of revenue (default 30).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_expense_ratio: Option<Rate>,
    /// COGS as a percentage of revenue (default 60).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cogs_ratio: Option<Rate>,
    /// Collection period in days (default 45).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_receivable_outstanding: Option<Days>,
}

/// The reporting period a statement covers, e.g. "FY2025".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
