//! Daily merge of prices and forward-filled fundamentals.
//!
//! Each trading day carries the latest [`FundamentalsEntry`] dated on or
//! before it. Days before the first entry have no fundamentals and no ratios.

use crate::ratios::{RatioConfig, SolvencyRatios, ValuationRatios};
use crate::registry::daily_columns;
use crate::unify::{FundamentalsEntry, UnifiedSeries};
use garp_traits::{Date, MarketData, PriceSeries, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One trading day of the merged series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRow {
    /// Trading day.
    pub date: Date,
    /// Close on that day.
    pub close: f64,
    /// Fundamentals in force on that day.
    pub fundamentals: Option<FundamentalsEntry>,
    /// Price-based ratios.
    pub valuation: ValuationRatios,
    /// Statement-based ratios of the fundamentals in force.
    pub solvency: SolvencyRatios,
}

impl DailyRow {
    /// TTM EPS in force, if any.
    #[must_use]
    pub fn ttm_eps(&self) -> Option<f64> {
        self.fundamentals.map(|f| f.ttm_eps)
    }
}

/// Price series joined with the unified fundamentals, one row per trading day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMergedSeries {
    rows: Vec<DailyRow>,
}

impl DailyMergedSeries {
    /// Forward-fill `unified` onto every day of `prices` and derive ratios.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the configured growth lookback is invalid.
    pub fn build(prices: &PriceSeries, unified: &UnifiedSeries, config: &RatioConfig) -> Result<Self> {
        let lookback = config.growth_lookback()?;
        let entries = unified.entries();
        let mut next = 0usize;

        let rows: Vec<DailyRow> = prices
            .points()
            .iter()
            .map(|p| {
                while next < entries.len() && entries[next].date <= p.date {
                    next += 1;
                }
                let fundamentals = next.checked_sub(1).map(|i| entries[i]);

                let (valuation, solvency) = match fundamentals {
                    Some(f) => {
                        let prior = p
                            .date
                            .checked_sub_signed(lookback)
                            .and_then(|d| unified.as_of(d))
                            .map(|e| e.ttm_eps);
                        (
                            ValuationRatios::derive(p.close, Some(f.ttm_eps), prior),
                            SolvencyRatios::derive(&f.figures),
                        )
                    }
                    None => Default::default(),
                };

                DailyRow {
                    date: p.date,
                    close: p.close,
                    fundamentals,
                    valuation,
                    solvency,
                }
            })
            .collect();

        debug!(
            days = rows.len(),
            with_fundamentals = rows.iter().filter(|r| r.fundamentals.is_some()).count(),
            "daily merged series"
        );

        Ok(Self { rows })
    }

    /// Rows, oldest first.
    #[must_use]
    pub fn rows(&self) -> &[DailyRow] {
        &self.rows
    }

    /// Number of trading days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for an exact trading day.
    #[must_use]
    pub fn row_on(&self, date: Date) -> Option<&DailyRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Last row, typically the current valuation.
    #[must_use]
    pub fn latest(&self) -> Option<&DailyRow> {
        self.rows.last()
    }

    /// All defined PE values, oldest first.
    #[must_use]
    pub fn pe_values(&self) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.valuation.pe_ratio).collect()
    }

    /// Export as a DataFrame with one column per entry of [`daily_columns`].
    ///
    /// # Errors
    ///
    /// Returns an error if the DataFrame cannot be assembled.
    pub fn to_market_data(&self) -> Result<MarketData> {
        let fig = |f: fn(&FundamentalsEntry) -> Option<f64>| -> Vec<Option<f64>> {
            self.rows.iter().map(|r| r.fundamentals.as_ref().and_then(f)).collect()
        };
        let ratio = |f: fn(&DailyRow) -> Option<f64>| -> Vec<Option<f64>> { self.rows.iter().map(f).collect() };

        let dates: Vec<Date> = self.rows.iter().map(|r| r.date).collect();
        let closes: Vec<f64> = self.rows.iter().map(|r| r.close).collect();
        let columns = daily_columns();

        let data: Vec<Column> = vec![
            Column::new(columns[0].into(), dates),
            Column::new(columns[1].into(), closes),
            Column::new(columns[2].into(), ratio(|r| r.ttm_eps())),
            Column::new(columns[3].into(), ratio(|r| r.valuation.eps_growth_yoy_pct)),
            Column::new(columns[4].into(), ratio(|r| r.valuation.pe_ratio)),
            Column::new(columns[5].into(), ratio(|r| r.valuation.peg_ratio)),
            Column::new(columns[6].into(), fig(|f| f.figures.revenue)),
            Column::new(columns[7].into(), fig(|f| f.figures.net_income)),
            Column::new(columns[8].into(), fig(|f| f.figures.ebit)),
            Column::new(columns[9].into(), fig(|f| f.figures.total_debt)),
            Column::new(columns[10].into(), fig(|f| f.figures.equity)),
            Column::new(columns[11].into(), ratio(|r| r.solvency.net_margin_pct)),
            Column::new(columns[12].into(), ratio(|r| r.solvency.ronw_pct)),
            Column::new(columns[13].into(), ratio(|r| r.solvency.debt_to_equity)),
            Column::new(columns[14].into(), ratio(|r| r.solvency.interest_coverage)),
        ];

        Ok(MarketData::new(DataFrame::new(data)?))
    }
}
