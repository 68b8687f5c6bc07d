//! Projection of the daily series onto official reporting dates.

use crate::record::ReportingRecord;
use garp_fundamentals::{DailyMergedSeries, StatementHistory};
use garp_traits::{Date, PriceSeries};
use tracing::debug;

/// Official dates inside the price range, ascending.
#[must_use]
pub fn qualifying_dates(history: &StatementHistory, prices: &PriceSeries) -> Vec<Date> {
    history
        .official_dates()
        .into_iter()
        .filter(|d| prices.covers(*d))
        .collect()
}

/// One record per qualifying official date.
///
/// The trading date used is the official date when it is a trading day,
/// otherwise the next trading day. Price, EPS and valuation ratios come from
/// that day's row; statement figures are left for the enricher.
#[must_use]
pub fn project(history: &StatementHistory, prices: &PriceSeries, daily: &DailyMergedSeries) -> Vec<ReportingRecord> {
    let records: Vec<ReportingRecord> = qualifying_dates(history, prices)
        .into_iter()
        .filter_map(|official| {
            let point = prices.pad_forward(official)?;
            let mut record = ReportingRecord::new(official, point.date);
            record.price = Some(point.close);
            if let Some(row) = daily.row_on(point.date) {
                record.ttm_eps = row.ttm_eps();
                record.eps_growth_yoy_pct = row.valuation.eps_growth_yoy_pct;
                record.pe_ratio = row.valuation.pe_ratio;
                record.peg_ratio = row.valuation.peg_ratio;
            }
            Some(record)
        })
        .collect();

    debug!(records = records.len(), "projected reporting records");
    records
}
