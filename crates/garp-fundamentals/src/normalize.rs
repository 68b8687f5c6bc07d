//! Statement normalization.
//!
//! Vendors publish the same concept under several line-item names, and the
//! name in use can change between filings. Every canonical field has one
//! ordered alias list in [`LineItem::aliases`]; the first alias with a finite
//! value wins. Resolution happens here, once, and nothing downstream looks at
//! vendor names again.

use crate::statement::{PeriodicStatement, StatementHistory};
use garp_traits::{Date, GarpError, PeriodKind, RawStatement, RawStatementSet, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Canonical line items recognized by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    /// Top-line revenue.
    Revenue,
    /// Net income.
    NetIncome,
    /// Interest expense.
    InterestExpense,
    /// Reported EBIT.
    Ebit,
    /// Pre-tax income.
    PretaxIncome,
    /// Primary shareholders' equity line.
    Equity,
    /// Secondary equity lines consulted when the primary one is absent.
    AlternateEquity,
    /// Total debt.
    TotalDebt,
    /// Earnings per share.
    Eps,
}

impl LineItem {
    /// All line items, income statement first.
    pub const ALL: [Self; 9] = [
        Self::Revenue,
        Self::NetIncome,
        Self::InterestExpense,
        Self::Ebit,
        Self::PretaxIncome,
        Self::Eps,
        Self::Equity,
        Self::AlternateEquity,
        Self::TotalDebt,
    ];

    /// Vendor names for this item, highest priority first.
    #[must_use]
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Revenue => &["Total Revenue", "Operating Revenue", "Revenue"],
            Self::NetIncome => &[
                "Net Income",
                "Net Income Common Stockholders",
                "Net Income From Continuing Operation Net Minority Interest",
            ],
            Self::InterestExpense => &["Interest Expense", "Interest Expense Non Operating"],
            Self::Ebit => &["EBIT"],
            Self::PretaxIncome => &["Pretax Income"],
            Self::Equity => &["Stockholders Equity"],
            Self::AlternateEquity => &["Total Stockholder Equity", "Common Stock Equity"],
            Self::TotalDebt => &["Total Debt"],
            Self::Eps => &["Diluted EPS", "Basic EPS"],
        }
    }

    /// Whether the item is read from the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(&self) -> bool {
        matches!(self, Self::Equity | Self::AlternateEquity | Self::TotalDebt)
    }

    /// Resolve this item against one raw row.
    #[must_use]
    pub fn resolve(&self, row: &RawStatement) -> Option<f64> {
        self.aliases().iter().find_map(|alias| row.value(alias))
    }
}

/// How to treat a missing or zero shareholders' equity figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquityPolicy {
    /// Substitute `1` so that equity ratios stay finite. Ratios for such
    /// periods are numerically large rather than undefined.
    #[default]
    DefaultToOne,
    /// Leave equity absent; RONW and debt-to-equity become undefined.
    Undefined,
}

/// Configuration for the statement normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Equity fallback rule (default: `DefaultToOne`).
    pub equity_policy: EquityPolicy,
    /// Multiplier from statement currency to price currency (default: 1.0).
    pub spot_rate: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            equity_policy: EquityPolicy::DefaultToOne,
            spot_rate: 1.0,
        }
    }
}

/// Maps raw vendor rows onto [`PeriodicStatement`] values.
#[derive(Debug, Clone, Default)]
pub struct StatementNormalizer {
    config: NormalizerConfig,
}

impl StatementNormalizer {
    /// Create a normalizer with the given configuration.
    #[must_use]
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    fn check_spot_rate(&self) -> Result<()> {
        let rate = self.config.spot_rate;
        if rate.is_finite() && rate > 0.0 {
            Ok(())
        } else {
            Err(GarpError::InvalidData(format!(
                "spot rate must be a positive number, got {rate}"
            )))
        }
    }

    /// Normalize one income row with its balance-sheet companion.
    #[must_use]
    pub fn normalize_row(
        &self,
        income: &RawStatement,
        balance: Option<&RawStatement>,
        kind: PeriodKind,
    ) -> PeriodicStatement {
        let rate = self.config.spot_rate;
        let value = |item: LineItem| {
            let row = if item.is_balance_sheet() { balance } else { Some(income) };
            row.and_then(|r| item.resolve(r)).map(|v| v * rate)
        };

        let interest_expense = value(LineItem::InterestExpense).map_or(0.0, f64::abs);
        let pretax_income = value(LineItem::PretaxIncome);
        let ebit = value(LineItem::Ebit).or_else(|| pretax_income.map(|p| p + interest_expense));

        let reported_equity = value(LineItem::Equity).or_else(|| value(LineItem::AlternateEquity));
        let equity = match self.config.equity_policy {
            EquityPolicy::DefaultToOne => match reported_equity {
                Some(e) if e != 0.0 => Some(e),
                _ => Some(1.0),
            },
            EquityPolicy::Undefined => reported_equity.filter(|e| *e != 0.0),
        };

        PeriodicStatement {
            period_end: income.period_end,
            kind,
            revenue: value(LineItem::Revenue),
            net_income: value(LineItem::NetIncome),
            interest_expense,
            ebit,
            pretax_income,
            equity,
            total_debt: value(LineItem::TotalDebt),
            eps: value(LineItem::Eps),
            has_balance_sheet: balance.is_some(),
        }
    }

    /// Normalize one frequency. Returns statements newest first.
    ///
    /// Income rows define the periods; the balance-sheet row with the same
    /// period end is joined in when present. A repeated income period keeps
    /// its first row.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the configured spot rate is not positive.
    pub fn normalize_set(&self, set: &RawStatementSet, kind: PeriodKind) -> Result<Vec<PeriodicStatement>> {
        self.check_spot_rate()?;

        let balances: BTreeMap<Date, &RawStatement> = set
            .balance_sheet
            .iter()
            .rev()
            .map(|row| (row.period_end, row))
            .collect();

        let mut statements: Vec<PeriodicStatement> = set
            .income
            .iter()
            .map(|row| self.normalize_row(row, balances.get(&row.period_end).copied(), kind))
            .collect();

        statements.sort_by(|a, b| b.period_end.cmp(&a.period_end));
        statements.dedup_by_key(|s| s.period_end);

        debug!(
            kind = %kind,
            periods = statements.len(),
            with_balance_sheet = statements
                .iter()
                .filter(|s| balances.contains_key(&s.period_end))
                .count(),
            "normalized statements"
        );

        Ok(statements)
    }

    /// Normalize both frequencies into a [`StatementHistory`].
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when neither frequency has an EPS
    /// figure, and `InvalidData` for an invalid spot rate.
    pub fn normalize(&self, annual: &RawStatementSet, quarterly: &RawStatementSet) -> Result<StatementHistory> {
        let history = StatementHistory {
            annual: self.normalize_set(annual, PeriodKind::Annual)?,
            quarterly: self.normalize_set(quarterly, PeriodKind::Quarterly)?,
        };

        if !history.has_eps() {
            return Err(GarpError::MissingRequiredField(format!(
                "no EPS figure under any of {:?} in annual or quarterly statements",
                LineItem::Eps.aliases()
            )));
        }

        info!(
            annual = history.annual.len(),
            quarterly = history.quarterly.len(),
            "statement history ready"
        );

        Ok(history)
    }
}
