//! Metric registry for discovering and categorizing exported figures.
//!
//! The registry is the single source of column order: the daily DataFrame
//! and the reporting-record schema both follow it.

use serde::{Deserialize, Serialize};

/// Metric category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricCategory {
    /// Dates and provenance
    Identity,
    /// Market prices
    Price,
    /// Earnings per share and its growth
    Earnings,
    /// Price-to-earnings based valuation
    Valuation,
    /// Income-statement flows
    Income,
    /// Balance-sheet snapshots
    BalanceSheet,
    /// Margins and returns
    Profitability,
    /// Leverage and debt service
    Solvency,
}

impl MetricCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Identity => "Report and trading dates, data provenance",
            Self::Price => "Daily closing price",
            Self::Earnings => "Trailing EPS and year-over-year growth",
            Self::Valuation => "PE and PEG ratios",
            Self::Income => "Revenue, net income and EBIT",
            Self::BalanceSheet => "Total debt and shareholders' equity",
            Self::Profitability => "Net margin and return on net worth",
            Self::Solvency => "Debt-to-equity and interest coverage",
        }
    }
}

/// Metadata about a metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricInfo {
    /// Field name as exported
    pub name: &'static str,

    /// Category classification
    pub category: MetricCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Present in the daily merged series
    pub daily: bool,

    /// Present in reporting records
    pub record: bool,
}

const fn metric(
    name: &'static str,
    category: MetricCategory,
    description: &'static str,
    daily: bool,
    record: bool,
) -> MetricInfo {
    MetricInfo {
        name,
        category,
        description,
        daily,
        record,
    }
}

const METRICS: [MetricInfo; 19] = [
    // Identity
    metric("date", MetricCategory::Identity, "Trading day", true, false),
    metric("report_date_official", MetricCategory::Identity, "Statement period end", false, true),
    metric("trading_date_used", MetricCategory::Identity, "First trading day on or after the period end", false, true),
    metric("data_source_type", MetricCategory::Identity, "Quarterly_TTM, Annual or Missing", false, true),
    // Price
    metric("close", MetricCategory::Price, "Closing price", true, false),
    metric("price", MetricCategory::Price, "Close on the trading date used", false, true),
    // Earnings
    metric("ttm_eps", MetricCategory::Earnings, "Trailing-twelve-month EPS", true, true),
    metric("eps_growth_yoy_pct", MetricCategory::Earnings, "TTM EPS growth against 365 days earlier, percent", true, true),
    // Valuation
    metric("pe_ratio", MetricCategory::Valuation, "Price over TTM EPS, undefined for non-positive EPS", true, true),
    metric("peg_ratio", MetricCategory::Valuation, "PE over EPS growth, undefined for non-positive growth", true, true),
    // Income
    metric("revenue", MetricCategory::Income, "Revenue", true, true),
    metric("net_income", MetricCategory::Income, "Net income", true, true),
    metric("ebit", MetricCategory::Income, "Earnings before interest and taxes", true, true),
    // Balance sheet
    metric("total_debt", MetricCategory::BalanceSheet, "Total debt", true, true),
    metric("equity", MetricCategory::BalanceSheet, "Shareholders' equity", true, true),
    // Profitability
    metric("net_margin_pct", MetricCategory::Profitability, "Net income over revenue, percent", true, true),
    metric("ronw_pct", MetricCategory::Profitability, "Net income over equity, percent", true, true),
    // Solvency
    metric("debt_to_equity", MetricCategory::Solvency, "Total debt over equity", true, true),
    metric("interest_coverage", MetricCategory::Solvency, "EBIT over interest expense, 999 without interest", true, true),
];

const DAILY_COLUMNS: [&str; 15] = [
    "date",
    "close",
    "ttm_eps",
    "eps_growth_yoy_pct",
    "pe_ratio",
    "peg_ratio",
    "revenue",
    "net_income",
    "ebit",
    "total_debt",
    "equity",
    "net_margin_pct",
    "ronw_pct",
    "debt_to_equity",
    "interest_coverage",
];

const RECORD_FIELDS: [&str; 17] = [
    "report_date_official",
    "trading_date_used",
    "data_source_type",
    "price",
    "ttm_eps",
    "eps_growth_yoy_pct",
    "pe_ratio",
    "peg_ratio",
    "revenue",
    "net_income",
    "ebit",
    "total_debt",
    "equity",
    "net_margin_pct",
    "ronw_pct",
    "debt_to_equity",
    "interest_coverage",
];

/// Get information about all available metrics, in export order.
#[must_use]
pub fn available_metrics() -> Vec<MetricInfo> {
    METRICS.to_vec()
}

/// Column names of the daily merged series, in order.
#[must_use]
pub const fn daily_columns() -> &'static [&'static str] {
    &DAILY_COLUMNS
}

/// The fixed field set of a reporting record, in order.
#[must_use]
pub const fn record_fields() -> &'static [&'static str] {
    &RECORD_FIELDS
}

/// Get all metrics in a specific category.
#[must_use]
pub fn metrics_by_category(category: MetricCategory) -> Vec<MetricInfo> {
    METRICS
        .iter()
        .filter(|info| info.category == category)
        .cloned()
        .collect()
}

/// Get information about a specific metric by name.
#[must_use]
pub fn get_metric_info(name: &str) -> Option<MetricInfo> {
    METRICS.iter().find(|info| info.name == name).cloned()
}
