//! Canonical statement records.

use garp_traits::{Date, PeriodKind};
use serde::{Deserialize, Serialize};

/// Income-statement and balance-sheet figures that feed the solvency ratios.
///
/// Used for a single period, a TTM snapshot, or a unified series entry.
/// Interest expense is an absolute value and is `0` when not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Figures {
    /// Revenue (flow).
    pub revenue: Option<f64>,
    /// Net income (flow).
    pub net_income: Option<f64>,
    /// Earnings before interest and taxes (flow).
    pub ebit: Option<f64>,
    /// Interest expense (flow, absolute).
    pub interest_expense: f64,
    /// Shareholders' equity (point in time).
    pub equity: Option<f64>,
    /// Total debt (point in time).
    pub total_debt: Option<f64>,
}

/// One normalized financial statement period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicStatement {
    /// Fiscal period end.
    pub period_end: Date,
    /// Annual or quarterly.
    pub kind: PeriodKind,
    /// Revenue.
    pub revenue: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Interest expense, absolute; `0` when not reported.
    pub interest_expense: f64,
    /// EBIT, reported or derived from pre-tax income plus interest.
    pub ebit: Option<f64>,
    /// Pre-tax income as reported.
    pub pretax_income: Option<f64>,
    /// Shareholders' equity after the equity policy has been applied.
    pub equity: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
    /// Earnings per share (diluted preferred over basic).
    pub eps: Option<f64>,
    /// Whether a balance-sheet row with the same period end was joined in.
    #[serde(default)]
    pub has_balance_sheet: bool,
}

impl PeriodicStatement {
    /// Create a statement with no figures.
    #[must_use]
    pub const fn empty(period_end: Date, kind: PeriodKind) -> Self {
        Self {
            period_end,
            kind,
            revenue: None,
            net_income: None,
            interest_expense: 0.0,
            ebit: None,
            pretax_income: None,
            equity: None,
            total_debt: None,
            eps: None,
            has_balance_sheet: false,
        }
    }

    /// The figures used by the ratio formulas.
    #[must_use]
    pub const fn figures(&self) -> Figures {
        Figures {
            revenue: self.revenue,
            net_income: self.net_income,
            ebit: self.ebit,
            interest_expense: self.interest_expense,
            equity: self.equity,
            total_debt: self.total_debt,
        }
    }
}

/// The normalized statement history of one instrument.
///
/// Both sequences are ordered newest first with unique period ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementHistory {
    /// Annual statements, newest first.
    pub annual: Vec<PeriodicStatement>,
    /// Quarterly statements, newest first.
    pub quarterly: Vec<PeriodicStatement>,
}

impl StatementHistory {
    /// Annual statement with exactly this period end.
    #[must_use]
    pub fn annual_on(&self, date: Date) -> Option<&PeriodicStatement> {
        self.annual.iter().find(|s| s.period_end == date)
    }

    /// Position of the quarterly statement with exactly this period end.
    #[must_use]
    pub fn quarterly_index_on(&self, date: Date) -> Option<usize> {
        self.quarterly.iter().position(|s| s.period_end == date)
    }

    /// Union of annual and quarterly period ends, deduplicated, ascending.
    #[must_use]
    pub fn official_dates(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self
            .annual
            .iter()
            .chain(self.quarterly.iter())
            .map(|s| s.period_end)
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Whether any statement of either frequency carries an EPS figure.
    #[must_use]
    pub fn has_eps(&self) -> bool {
        self.annual
            .iter()
            .chain(self.quarterly.iter())
            .any(|s| s.eps.is_some())
    }
}
