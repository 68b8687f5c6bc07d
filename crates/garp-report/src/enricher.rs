//! Second-pass enrichment of reporting records.
//!
//! Statement figures for a record come from one of two places, tried in
//! order:
//!
//! 1. the four quarters starting at the report date (`Quarterly_TTM`)
//! 2. the annual statement dated at the report date (`Annual`)
//!
//! A record where neither exists is tagged `Missing` with its statement
//! figures and ratios cleared. Enrichment is a pure function of the record
//! and the statement history, so enriching an enriched record gives the
//! same record back.

use crate::record::{DataSourceType, ReportingRecord};
use garp_fundamentals::{aggregate, Figures, StatementHistory};
use garp_traits::{Date, GarpError};
use tracing::{debug, warn};

/// Resolve the statement figures for a report date.
#[must_use]
pub fn resolve_figures(history: &StatementHistory, date: Date) -> Option<(DataSourceType, Figures)> {
    if let Some(snap) = history
        .quarterly_index_on(date)
        .and_then(|i| aggregate(&history.quarterly, i))
    {
        return Some((DataSourceType::QuarterlyTtm, snap.figures));
    }
    history
        .annual_on(date)
        .map(|stmt| (DataSourceType::Annual, stmt.figures()))
}

/// Enrich one record.
#[must_use]
pub fn enrich(record: &ReportingRecord, history: &StatementHistory) -> ReportingRecord {
    let mut enriched = record.clone();
    match resolve_figures(history, record.report_date_official) {
        Some((source, figures)) => {
            debug!(date = %record.report_date_official, ?source, "enriched record");
            enriched.data_source_type = Some(source);
            enriched.set_statement_figures(Some(&figures));
        }
        None => {
            let gap = GarpError::RecordEnrichmentGap(format!(
                "no quarterly window or annual statement at {}",
                record.report_date_official
            ));
            warn!(error = %gap, "record left unreconciled");
            enriched.data_source_type = Some(DataSourceType::Missing);
            enriched.set_statement_figures(None);
        }
    }
    enriched
}

/// Enrich every record, preserving order.
#[must_use]
pub fn enrich_all(records: &[ReportingRecord], history: &StatementHistory) -> Vec<ReportingRecord> {
    records.iter().map(|r| enrich(r, history)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{records_to_json, RecordState};
    use approx::assert_relative_eq;
    use garp_fundamentals::{PeriodicStatement, INTEREST_COVERAGE_SENTINEL};
    use garp_traits::PeriodKind;
    use serde_json::Value;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn stmt(date: Date, kind: PeriodKind, scale: f64) -> PeriodicStatement {
        let mut s = PeriodicStatement::empty(date, kind);
        s.revenue = Some(1000.0 * scale);
        s.net_income = Some(100.0 * scale);
        s.ebit = Some(150.0 * scale);
        s.equity = Some(500.0);
        s.total_debt = Some(250.0);
        s
    }

    fn history() -> StatementHistory {
        let q = |y, m, day| stmt(d(y, m, day), PeriodKind::Quarterly, 0.25);
        StatementHistory {
            annual: vec![
                stmt(d(2023, 12, 31), PeriodKind::Annual, 1.0),
                stmt(d(2022, 12, 31), PeriodKind::Annual, 1.0),
            ],
            quarterly: vec![
                q(2024, 3, 31),
                q(2023, 12, 31),
                q(2023, 9, 30),
                q(2023, 6, 30),
                q(2023, 3, 31),
            ],
        }
    }

    #[test]
    fn test_quarterly_window_preferred() {
        let record = ReportingRecord::new(d(2023, 12, 31), d(2024, 1, 2));
        let out = enrich(&record, &history());
        assert_eq!(out.state(), RecordState::QuarterlyEnriched);
        assert_relative_eq!(out.revenue.unwrap(), 1000.0);
        assert_relative_eq!(out.net_income.unwrap(), 100.0);
        assert_relative_eq!(out.ronw_pct.unwrap(), 20.0);
        assert_relative_eq!(out.net_margin_pct.unwrap(), 10.0);
        assert_relative_eq!(out.debt_to_equity.unwrap(), 0.5);
        assert_eq!(out.interest_coverage, Some(INTEREST_COVERAGE_SENTINEL));
    }

    #[test]
    fn test_annual_fallback() {
        // No quarter ends on this date.
        let record = ReportingRecord::new(d(2022, 12, 31), d(2023, 1, 3));
        let out = enrich(&record, &history());
        assert_eq!(out.data_source_type, Some(DataSourceType::Annual));
        assert_relative_eq!(out.revenue.unwrap(), 1000.0);
        assert_relative_eq!(out.ronw_pct.unwrap(), 20.0);
        assert_eq!(out.interest_coverage, Some(INTEREST_COVERAGE_SENTINEL));
    }

    #[test]
    fn test_short_quarterly_window_falls_back() {
        let mut h = history();
        h.annual.push(stmt(d(2023, 6, 30), PeriodKind::Annual, 2.0));
        let out = enrich(&ReportingRecord::new(d(2023, 6, 30), d(2023, 6, 30)), &h);
        assert_eq!(out.data_source_type, Some(DataSourceType::Annual));
        assert_relative_eq!(out.revenue.unwrap(), 2000.0);
    }

    #[test]
    fn test_missing_clears_figures() {
        let mut record = ReportingRecord::new(d(2023, 9, 30), d(2023, 10, 2));
        record.revenue = Some(1.0);
        record.ronw_pct = Some(2.0);
        record.pe_ratio = Some(15.0);
        let out = enrich(&record, &history());
        assert_eq!(out.state(), RecordState::Missing);
        assert_eq!(out.revenue, None);
        assert_eq!(out.ronw_pct, None);
        assert_eq!(out.interest_coverage, None);
        assert_eq!(out.pe_ratio, Some(15.0));
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let mut record = ReportingRecord::new(d(2023, 12, 31), d(2024, 1, 2));
        record.extra.insert("note".to_string(), Value::from("keep"));
        let out = enrich(&record, &history());
        assert_eq!(out.extra, record.extra);
    }

    #[test]
    fn test_enrichment_is_idempotent() {
        let h = history();
        let records = vec![
            ReportingRecord::new(d(2022, 12, 31), d(2023, 1, 3)),
            ReportingRecord::new(d(2023, 9, 30), d(2023, 10, 2)),
            ReportingRecord::new(d(2023, 12, 31), d(2024, 1, 2)),
        ];
        let once = enrich_all(&records, &h);
        let twice = enrich_all(&once, &h);
        assert_eq!(records_to_json(&once).unwrap(), records_to_json(&twice).unwrap());
        assert_eq!(once, twice);
    }
}
