//! Exported reporting records.
//!
//! A [`ReportingRecord`] is the unit of interchange with report and chart
//! consumers. It serializes as a JSON object whose keys follow
//! [`record_fields`](garp_fundamentals::registry::record_fields) exactly.
//! Absent values are written as `null`, never omitted. Keys the engine does
//! not know are kept in [`ReportingRecord::extra`] and written after the
//! fixed set.

use garp_fundamentals::ratios::SolvencyRatios;
use garp_fundamentals::statement::Figures;
use garp_traits::{Date, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt};

/// Which enrichment strategy produced a record's statement figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSourceType {
    /// Four quarters summed, anchored at the report date.
    #[serde(rename = "Quarterly_TTM")]
    QuarterlyTtm,
    /// The annual statement dated at the report date.
    Annual,
    /// Neither strategy had data.
    Missing,
}

impl DataSourceType {
    /// The exported name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QuarterlyTtm => "Quarterly_TTM",
            Self::Annual => "Annual",
            Self::Missing => "Missing",
        }
    }
}

impl fmt::Display for DataSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Projected, not yet enriched.
    Unenriched,
    /// Enriched from a quarterly TTM window.
    QuarterlyEnriched,
    /// Enriched from an annual statement.
    AnnualEnriched,
    /// Enrichment found no data.
    Missing,
}

/// One record per official reporting date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingRecord {
    /// Statement period end.
    pub report_date_official: Date,
    /// Trading day whose close is used.
    pub trading_date_used: Date,
    /// Enrichment provenance; `None` until enriched.
    #[serde(default)]
    pub data_source_type: Option<DataSourceType>,
    /// Close on the trading date used.
    #[serde(default)]
    pub price: Option<f64>,
    /// TTM EPS in force on the trading date used.
    #[serde(default)]
    pub ttm_eps: Option<f64>,
    /// Year-over-year TTM EPS growth, percent.
    #[serde(default)]
    pub eps_growth_yoy_pct: Option<f64>,
    /// Price over TTM EPS.
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    /// PE over growth.
    #[serde(default)]
    pub peg_ratio: Option<f64>,
    /// Revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<f64>,
    /// EBIT.
    #[serde(default)]
    pub ebit: Option<f64>,
    /// Total debt.
    #[serde(default)]
    pub total_debt: Option<f64>,
    /// Shareholders' equity.
    #[serde(default)]
    pub equity: Option<f64>,
    /// Net margin, percent.
    #[serde(default)]
    pub net_margin_pct: Option<f64>,
    /// Return on net worth, percent.
    #[serde(default)]
    pub ronw_pct: Option<f64>,
    /// Total debt over equity.
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    /// EBIT over interest expense.
    #[serde(default)]
    pub interest_coverage: Option<f64>,
    /// Fields outside the fixed set, passed through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ReportingRecord {
    /// A record with dates only.
    #[must_use]
    pub const fn new(report_date_official: Date, trading_date_used: Date) -> Self {
        Self {
            report_date_official,
            trading_date_used,
            data_source_type: None,
            price: None,
            ttm_eps: None,
            eps_growth_yoy_pct: None,
            pe_ratio: None,
            peg_ratio: None,
            revenue: None,
            net_income: None,
            ebit: None,
            total_debt: None,
            equity: None,
            net_margin_pct: None,
            ronw_pct: None,
            debt_to_equity: None,
            interest_coverage: None,
            extra: BTreeMap::new(),
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> RecordState {
        match self.data_source_type {
            None => RecordState::Unenriched,
            Some(DataSourceType::QuarterlyTtm) => RecordState::QuarterlyEnriched,
            Some(DataSourceType::Annual) => RecordState::AnnualEnriched,
            Some(DataSourceType::Missing) => RecordState::Missing,
        }
    }

    /// Replace statement figures and their ratios.
    pub(crate) fn set_statement_figures(&mut self, figures: Option<&Figures>) {
        let ratios = figures.map(SolvencyRatios::derive).unwrap_or_default();
        self.revenue = figures.and_then(|f| f.revenue);
        self.net_income = figures.and_then(|f| f.net_income);
        self.ebit = figures.and_then(|f| f.ebit);
        self.total_debt = figures.and_then(|f| f.total_debt);
        self.equity = figures.and_then(|f| f.equity);
        self.net_margin_pct = ratios.net_margin_pct;
        self.ronw_pct = ratios.ronw_pct;
        self.debt_to_equity = ratios.debt_to_equity;
        self.interest_coverage = ratios.interest_coverage;
    }
}

/// Serialize records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn records_to_json(records: &[ReportingRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse records from a JSON array.
///
/// # Errors
///
/// Returns an error if the text is not an array of records.
pub fn records_from_json(json: &str) -> Result<Vec<ReportingRecord>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use garp_fundamentals::registry::record_fields;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_key_order_and_explicit_nulls() {
        let mut record = ReportingRecord::new(d(2023, 12, 31), d(2024, 1, 2));
        record.extra.insert("analyst_note".to_string(), Value::from("x"));
        let text = serde_json::to_string(&record).unwrap();
        let mut expected: Vec<&str> = record_fields().to_vec();
        expected.push("analyst_note");
        let positions: Vec<usize> = expected
            .iter()
            .map(|k| text.find(&format!("\"{k}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json.as_object().unwrap().len(), expected.len());
        assert!(json["pe_ratio"].is_null());
        assert!(json["data_source_type"].is_null());
        assert_eq!(json["report_date_official"], "2023-12-31");
    }

    #[test]
    fn test_source_type_names() {
        let as_str = |t: DataSourceType| serde_json::to_value(t).unwrap();
        assert_eq!(as_str(DataSourceType::QuarterlyTtm), "Quarterly_TTM");
        assert_eq!(as_str(DataSourceType::Annual), "Annual");
        assert_eq!(as_str(DataSourceType::Missing), "Missing");
        for t in [DataSourceType::QuarterlyTtm, DataSourceType::Annual, DataSourceType::Missing] {
            assert_eq!(as_str(t), t.to_string());
        }
    }

    #[test]
    fn test_round_trip_keeps_unknown_fields() {
        let json = r#"[{
            "report_date_official": "2023-12-31",
            "trading_date_used": "2024-01-02",
            "data_source_type": "Annual",
            "price": 60,
            "pe_ratio": 20.0,
            "custom_score": 7
        }]"#;
        let records = records_from_json(json).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.state(), RecordState::AnnualEnriched);
        assert_eq!(r.price, Some(60.0));
        assert_eq!(r.ttm_eps, None);
        assert_eq!(r.extra.get("custom_score"), Some(&Value::from(7)));
    }

    #[test]
    fn test_state_machine_labels() {
        let mut r = ReportingRecord::new(d(2023, 12, 31), d(2024, 1, 2));
        assert_eq!(r.state(), RecordState::Unenriched);
        r.data_source_type = Some(DataSourceType::QuarterlyTtm);
        assert_eq!(r.state(), RecordState::QuarterlyEnriched);
        r.data_source_type = Some(DataSourceType::Missing);
        assert_eq!(r.state(), RecordState::Missing);
    }
}
