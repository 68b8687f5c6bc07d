//! Common types used throughout the garp engine.
//!
//! This module defines the temporal primitives, the daily price series that
//! anchors every computation, and the polars-backed [`MarketData`] container
//! used to export tabular results.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, e.g. "AAPL" or "RELIANCE.NS".
pub type Symbol = String;

/// Sampling frequency of a financial statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PeriodKind {
    /// Fiscal-year statement.
    #[default]
    Annual,
    /// Fiscal-quarter statement.
    Quarterly,
}

impl PeriodKind {
    /// Short label used in history tables.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Annual => "Annual",
            Self::Quarterly => "Quarter",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading day.
    pub date: Date,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    #[must_use]
    pub const fn new(date: Date, close: f64) -> Self {
        Self { date, close }
    }
}

/// Ascending, date-unique sequence of daily closes.
///
/// The series is immutable once built. Construction sorts by date, keeps the
/// last observation for a repeated date and drops closes that are not
/// positive finite numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a price series from unordered observations.
    pub fn new(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut valid: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| {
                let ok = p.close.is_finite() && p.close > 0.0;
                if !ok {
                    warn!(date = %p.date, close = p.close, "dropping non-positive close");
                }
                ok
            })
            .collect();

        // Stable sort keeps input order within a date, so the last one wins below.
        valid.sort_by_key(|p| p.date);
        let mut points: Vec<PricePoint> = Vec::with_capacity(valid.len());
        for p in valid {
            match points.last_mut() {
                Some(last) if last.date == p.date => *last = p,
                _ => points.push(p),
            }
        }

        Self { points }
    }

    /// All observations, oldest first.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of trading days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First trading day.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.points.first().map(|p| p.date)
    }

    /// Last trading day.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|p| p.date)
    }

    /// Whether `date` lies within `[first trading day, last trading day]`.
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => first <= date && date <= last,
            _ => false,
        }
    }

    /// Index of the first trading day on or after `date`.
    #[must_use]
    pub fn index_on_or_after(&self, date: Date) -> Option<usize> {
        let idx = self.points.partition_point(|p| p.date < date);
        (idx < self.points.len()).then_some(idx)
    }

    /// The trading day at `date`, or the next one when `date` is not a
    /// trading day.
    #[must_use]
    pub fn pad_forward(&self, date: Date) -> Option<&PricePoint> {
        self.index_on_or_after(date).map(|i| &self.points[i])
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Container for tabular market data.
///
/// `MarketData` wraps a Polars DataFrame. The daily merged series is exported
/// through it with one row per trading day and one column per figure.
#[derive(Debug, Clone)]
pub struct MarketData {
    data: DataFrame,
}

impl MarketData {
    /// Creates a new `MarketData` instance from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the market data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the column names.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Gets a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.data.column(name).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_price_series_sorts_and_dedups() {
        let series = PriceSeries::new(vec![
            PricePoint::new(d(2024, 1, 3), 11.0),
            PricePoint::new(d(2024, 1, 2), 10.0),
            PricePoint::new(d(2024, 1, 3), 12.0),
        ]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].date, d(2024, 1, 2));
        assert_eq!(series.points()[1].close, 12.0);
    }

    #[test]
    fn test_price_series_drops_invalid_closes() {
        let series = PriceSeries::new(vec![
            PricePoint::new(d(2024, 1, 2), 0.0),
            PricePoint::new(d(2024, 1, 3), f64::NAN),
            PricePoint::new(d(2024, 1, 4), -5.0),
            PricePoint::new(d(2024, 1, 5), 5.0),
        ]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.first_date(), Some(d(2024, 1, 5)));
    }

    #[test]
    fn test_pad_forward() {
        let series: PriceSeries = vec![
            PricePoint::new(d(2023, 12, 29), 100.0),
            PricePoint::new(d(2024, 1, 2), 101.0),
        ]
        .into_iter()
        .collect();

        // Exact trading day
        assert_eq!(series.pad_forward(d(2023, 12, 29)).unwrap().close, 100.0);
        // Weekend/holiday rolls forward
        assert_eq!(series.pad_forward(d(2023, 12, 31)).unwrap().date, d(2024, 1, 2));
        // Before the first day resolves to the first day
        assert_eq!(series.pad_forward(d(2023, 1, 1)).unwrap().date, d(2023, 12, 29));
        // Past the end has no trading day
        assert!(series.pad_forward(d(2024, 1, 3)).is_none());
    }

    #[test]
    fn test_covers() {
        let series = PriceSeries::new(vec![
            PricePoint::new(d(2024, 1, 2), 1.0),
            PricePoint::new(d(2024, 6, 28), 2.0),
        ]);
        assert!(series.covers(d(2024, 3, 31)));
        assert!(series.covers(d(2024, 1, 2)));
        assert!(!series.covers(d(2023, 12, 31)));
        assert!(!series.covers(d(2024, 6, 30)));
        assert!(!PriceSeries::default().covers(d(2024, 1, 2)));
    }

    #[test]
    fn test_period_kind_label() {
        assert_eq!(PeriodKind::Annual.to_string(), "Annual");
        assert_eq!(PeriodKind::Quarterly.label(), "Quarter");
    }

    #[test]
    fn test_market_data_columns() {
        let df = df! {
            "close" => &[150.0],
        }
        .unwrap();

        let market_data = MarketData::new(df);
        assert_eq!(market_data.len(), 1);
        assert_eq!(market_data.columns(), vec!["close".to_string()]);
        assert!(market_data.column("close").is_some());
        assert!(market_data.column("open").is_none());
    }
}
