//! Per-period solvency history tables.
//!
//! Recent annual and quarterly statements, plus one trailing-twelve-month
//! row, each with its return on net worth, leverage and interest coverage.
//! Ratios are rounded to two decimals for display.

use crate::ratios::{round2, SolvencyRatios};
use crate::statement::{Figures, PeriodicStatement, StatementHistory};
use crate::ttm::aggregate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the trailing row's period column.
pub const TTM_PERIOD_LABEL: &str = "TTM (Last 4Q)";

/// Configuration for history tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Most recent annual periods to show (default: 3).
    pub annual_periods: usize,
    /// Most recent quarterly periods to show (default: 5).
    pub quarterly_periods: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            annual_periods: 3,
            quarterly_periods: 5,
        }
    }
}

/// Kind of history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryRowKind {
    /// A fiscal year.
    Annual,
    /// A fiscal quarter.
    Quarter,
    /// Sum of the last four quarters.
    Trailing,
}

impl fmt::Display for HistoryRowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Annual => "Annual",
            Self::Quarter => "Quarter",
            Self::Trailing => "Trailing 12M",
        })
    }
}

/// One row of a history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRatioRow {
    /// Period end as `YYYY-MM-DD`, or [`TTM_PERIOD_LABEL`].
    pub period: String,
    /// Row kind.
    pub kind: HistoryRowKind,
    /// Return on net worth, percent.
    pub ronw_pct: Option<f64>,
    /// Total debt over equity.
    pub debt_to_equity: Option<f64>,
    /// EBIT over interest expense.
    pub interest_coverage: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// EBIT.
    pub ebit: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
}

impl PeriodRatioRow {
    fn from_figures(period: String, kind: HistoryRowKind, figures: &Figures) -> Self {
        let ratios = SolvencyRatios::derive(figures);
        Self {
            period,
            kind,
            ronw_pct: round2(ratios.ronw_pct),
            debt_to_equity: round2(ratios.debt_to_equity),
            interest_coverage: round2(ratios.interest_coverage),
            net_income: figures.net_income,
            ebit: figures.ebit,
            total_debt: figures.total_debt,
        }
    }

    fn from_statement(stmt: &PeriodicStatement, kind: HistoryRowKind) -> Self {
        Self::from_figures(stmt.period_end.format("%Y-%m-%d").to_string(), kind, &stmt.figures())
    }
}

/// Annual, quarterly and trailing history tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialHistory {
    /// Recent fiscal years, newest first.
    pub annual: Vec<PeriodRatioRow>,
    /// Recent quarters, newest first.
    pub quarterly: Vec<PeriodRatioRow>,
    /// Trailing year at the newest quarter, when four quarters exist.
    pub ttm: Option<PeriodRatioRow>,
}

impl FinancialHistory {
    /// Build the tables from a statement history.
    ///
    /// Annual and quarterly tables only list periods that have both an
    /// income statement and a balance sheet. The trailing row sums the four
    /// newest quarters regardless.
    #[must_use]
    pub fn build(history: &StatementHistory, config: &HistoryConfig) -> Self {
        let rows = |stmts: &[PeriodicStatement], n: usize, kind: HistoryRowKind| -> Vec<PeriodRatioRow> {
            stmts
                .iter()
                .filter(|s| s.has_balance_sheet)
                .take(n)
                .map(|s| PeriodRatioRow::from_statement(s, kind))
                .collect()
        };

        Self {
            annual: rows(&history.annual, config.annual_periods, HistoryRowKind::Annual),
            quarterly: rows(&history.quarterly, config.quarterly_periods, HistoryRowKind::Quarter),
            ttm: aggregate(&history.quarterly, 0).map(|snap| {
                PeriodRatioRow::from_figures(TTM_PERIOD_LABEL.to_string(), HistoryRowKind::Trailing, &snap.figures)
            }),
        }
    }

    /// All rows: trailing first, then quarters, then years.
    pub fn rows(&self) -> impl Iterator<Item = &PeriodRatioRow> {
        self.ttm.iter().chain(self.quarterly.iter()).chain(self.annual.iter())
    }
}
