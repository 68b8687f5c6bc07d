//! Valuation summary and historical PE bands.

use crate::record::ReportingRecord;
use garp_fundamentals::DailyMergedSeries;
use garp_traits::stats::sample_stats;
use garp_traits::Date;
use serde::{Deserialize, Serialize};

/// Number of trailing records carried in a summary.
pub const RECENT_RECORDS: usize = 4;

/// Mean and standard-deviation bands of the daily PE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeBands {
    /// Mean PE.
    pub mean: f64,
    /// Mean minus one standard deviation.
    pub minus_one_sd: f64,
    /// Mean plus one standard deviation.
    pub plus_one_sd: f64,
    /// Mean plus two standard deviations.
    pub plus_two_sd: f64,
    /// Number of days with a defined PE.
    pub observations: usize,
}

impl PeBands {
    /// Bands over every defined daily PE. `None` with fewer than two values.
    #[must_use]
    pub fn from_daily(daily: &DailyMergedSeries) -> Option<Self> {
        let stats = sample_stats(&daily.pe_values())?;
        Some(Self {
            mean: stats.mean,
            minus_one_sd: stats.mean - stats.std,
            plus_one_sd: stats.mean + stats.std,
            plus_two_sd: stats.mean + 2.0 * stats.std,
            observations: stats.n,
        })
    }
}

/// Latest valuation and the most recent reporting records.
///
/// The latest figures are those of the last record, so they describe the
/// newest official reporting date rather than the last trading day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationSummary {
    /// Whether any reporting record exists.
    pub available: bool,
    /// Trading day used by the last record.
    pub as_of: Option<Date>,
    /// Close of the last record.
    pub latest_price: Option<f64>,
    /// PE of the last record.
    pub latest_pe: Option<f64>,
    /// PEG of the last record.
    pub latest_peg: Option<f64>,
    /// Up to four most recent records, oldest first.
    pub recent: Vec<ReportingRecord>,
}

impl ValuationSummary {
    /// Summarize the enriched records, oldest first.
    #[must_use]
    pub fn build(records: &[ReportingRecord]) -> Self {
        let latest = records.last();
        let start = records.len().saturating_sub(RECENT_RECORDS);
        Self {
            available: latest.is_some(),
            as_of: latest.map(|r| r.trading_date_used),
            latest_price: latest.and_then(|r| r.price),
            latest_pe: latest.and_then(|r| r.pe_ratio),
            latest_peg: latest.and_then(|r| r.peg_ratio),
            recent: records[start..].to_vec(),
        }
    }
}
