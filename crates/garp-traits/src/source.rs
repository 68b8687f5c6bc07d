//! Input seam for raw statements and prices.
//!
//! Fetching data from a market-data provider happens outside this workspace.
//! Whatever does the fetching hands the engine its results through the
//! [`StatementSource`] trait: a daily price series, annual and quarterly
//! statement rows keyed by vendor line-item names, and an optional spot
//! conversion rate. [`InstrumentBundle`] is the JSON document form of the same
//! inputs and is what the CLI reads.

use crate::{Date, PeriodKind, PricePoint, PriceSeries, Result, Symbol};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

/// One statement period as delivered by the provider: line-item name to value.
///
/// Values may be `null` when the vendor has the line but no figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatement {
    /// Fiscal period end date.
    pub period_end: Date,
    /// Line items keyed by vendor name.
    #[serde(default)]
    pub items: BTreeMap<String, Option<f64>>,
}

impl RawStatement {
    /// Create an empty row for a period.
    #[must_use]
    pub const fn new(period_end: Date) -> Self {
        Self {
            period_end,
            items: BTreeMap::new(),
        }
    }

    /// Builder-style helper to add a line item.
    #[must_use]
    pub fn with_item(mut self, name: impl Into<String>, value: f64) -> Self {
        self.items.insert(name.into(), Some(value));
        self
    }

    /// Finite value of a line item, if present.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.items
            .get(name)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }
}

/// Income statement rows with their balance-sheet companions for one frequency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatementSet {
    /// Income statement periods.
    #[serde(default)]
    pub income: Vec<RawStatement>,
    /// Balance sheet periods.
    #[serde(default)]
    pub balance_sheet: Vec<RawStatement>,
}

impl RawStatementSet {
    /// Whether neither statement has any period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.balance_sheet.is_empty()
    }

    /// All distinct period end dates across both statements.
    #[must_use]
    pub fn period_ends(&self) -> Vec<Date> {
        let mut dates: Vec<Date> = self
            .income
            .iter()
            .chain(self.balance_sheet.iter())
            .map(|s| s.period_end)
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

/// Supplier of the raw inputs for one instrument.
///
/// Implementations must be thread-safe (`Send + Sync`) so that callers can fan
/// out across instruments.
pub trait StatementSource: Send + Sync {
    /// Instrument identifier.
    fn symbol(&self) -> &str;

    /// Daily closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the prices cannot be produced.
    fn prices(&self) -> Result<PriceSeries>;

    /// Raw statements for one frequency.
    ///
    /// # Errors
    ///
    /// Returns an error if the statements cannot be produced.
    fn statements(&self, kind: PeriodKind) -> Result<RawStatementSet>;

    /// Statement-currency to price-currency conversion rate, when they differ.
    fn spot_rate(&self) -> Option<f64> {
        None
    }
}

/// All raw inputs for one instrument in a single serializable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentBundle {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Statement currency, informational.
    #[serde(default)]
    pub currency: Option<String>,
    /// Statement-currency to price-currency rate.
    #[serde(default)]
    pub spot_rate: Option<f64>,
    /// Daily closes.
    #[serde(default)]
    pub prices: Vec<PricePoint>,
    /// Annual statements.
    #[serde(default)]
    pub annual: RawStatementSet,
    /// Quarterly statements.
    #[serde(default)]
    pub quarterly: RawStatementSet,
}

impl InstrumentBundle {
    /// Parse a bundle from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the bundle schema.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a bundle from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl StatementSource for InstrumentBundle {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn prices(&self) -> Result<PriceSeries> {
        Ok(PriceSeries::new(self.prices.iter().copied()))
    }

    fn statements(&self, kind: PeriodKind) -> Result<RawStatementSet> {
        Ok(match kind {
            PeriodKind::Annual => self.annual.clone(),
            PeriodKind::Quarterly => self.quarterly.clone(),
        })
    }

    fn spot_rate(&self) -> Option<f64> {
        self.spot_rate
    }
}
