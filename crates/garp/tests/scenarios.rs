//! End-to-end scenarios through the full pipeline.

use approx::assert_relative_eq;
use garp::report::{records_from_json, records_to_json, RecordState};
use garp::{
    DataSourceType, Date, GarpError, InstrumentBundle, PeriodKind, Pipeline, PipelineConfig, PricePoint,
    StatementSource,
};
use garp::traits::{RawStatement, RawStatementSet};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd_opt(y, m, day).unwrap()
}

fn income(date: Date, eps: f64) -> RawStatement {
    RawStatement::new(date)
        .with_item("Total Revenue", 1_000.0)
        .with_item("Net Income", 100.0)
        .with_item("Diluted EPS", eps)
}

fn balance(date: Date) -> RawStatement {
    RawStatement::new(date)
        .with_item("Stockholders Equity", 500.0)
        .with_item("Total Debt", 250.0)
}

fn annual_bundle() -> InstrumentBundle {
    let years = [(d(2021, 12, 31), 2.0), (d(2022, 12, 31), 2.5), (d(2023, 12, 31), 3.0)];
    InstrumentBundle {
        symbol: "ACME".to_string(),
        prices: vec![
            PricePoint::new(d(2021, 12, 31), 30.0),
            PricePoint::new(d(2022, 12, 30), 44.0),
            PricePoint::new(d(2023, 1, 3), 45.0),
            PricePoint::new(d(2023, 12, 29), 58.0),
            PricePoint::new(d(2024, 1, 2), 60.0),
        ],
        annual: RawStatementSet {
            income: years.iter().map(|&(date, eps)| income(date, eps)).collect(),
            balance_sheet: years.iter().map(|&(date, _)| balance(date)).collect(),
        },
        ..Default::default()
    }
}

fn quarterly_bundle() -> InstrumentBundle {
    let quarters = [
        (d(2024, 3, 31), 0.50),
        (d(2023, 12, 31), 0.55),
        (d(2023, 9, 30), 0.60),
        (d(2023, 6, 30), 0.65),
        (d(2023, 3, 31), 0.70),
    ];
    InstrumentBundle {
        symbol: "QTR".to_string(),
        prices: vec![
            PricePoint::new(d(2023, 3, 31), 20.0),
            PricePoint::new(d(2023, 12, 29), 24.0),
            PricePoint::new(d(2024, 1, 2), 25.0),
            PricePoint::new(d(2024, 4, 1), 23.0),
        ],
        quarterly: RawStatementSet {
            income: quarters
                .iter()
                .map(|&(date, eps)| {
                    RawStatement::new(date)
                        .with_item("Total Revenue", 250.0)
                        .with_item("Net Income", 25.0)
                        .with_item("Interest Expense", -5.0)
                        .with_item("Pretax Income", 30.0)
                        .with_item("Diluted EPS", eps)
                })
                .collect(),
            balance_sheet: quarters.iter().map(|&(date, _)| balance(date)).collect(),
        },
        ..Default::default()
    }
}

#[test]
fn annual_only_valuation() {
    let report = Pipeline::default().run(&annual_bundle()).unwrap();

    assert_eq!(report.records.len(), 3);
    let latest = report.records.last().unwrap();
    assert_eq!(latest.report_date_official, d(2023, 12, 31));
    assert_eq!(latest.trading_date_used, d(2024, 1, 2));
    assert_eq!(latest.price, Some(60.0));
    assert_relative_eq!(latest.ttm_eps.unwrap(), 3.0);
    assert_relative_eq!(latest.pe_ratio.unwrap(), 20.0);
    assert_relative_eq!(latest.eps_growth_yoy_pct.unwrap(), 20.0, epsilon = 1e-9);
    assert_relative_eq!(latest.peg_ratio.unwrap(), 1.0, epsilon = 1e-9);

    // No quarters at all, so every record falls back to its annual statement.
    for record in &report.records {
        assert_eq!(record.data_source_type, Some(DataSourceType::Annual));
        assert_relative_eq!(record.net_margin_pct.unwrap(), 10.0);
        assert_relative_eq!(record.ronw_pct.unwrap(), 20.0);
        assert_relative_eq!(record.debt_to_equity.unwrap(), 0.5);
        assert_eq!(record.interest_coverage, Some(999.0));
    }

    let first = &report.records[0];
    assert_eq!(first.eps_growth_yoy_pct, None);
    assert_eq!(first.peg_ratio, None);
}

#[test]
fn quarterly_ttm_windows() {
    let report = Pipeline::default().run(&quarterly_bundle()).unwrap();

    let entries = report.unified.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, d(2023, 12, 31));
    assert_relative_eq!(entries[0].ttm_eps, 2.50, epsilon = 1e-12);
    assert_eq!(entries[1].date, d(2024, 3, 31));
    assert_relative_eq!(entries[1].ttm_eps, 2.30, epsilon = 1e-12);

    let row = report.daily.row_on(d(2024, 4, 1)).unwrap();
    assert_relative_eq!(row.ttm_eps().unwrap(), 2.30, epsilon = 1e-12);
    assert!(report.daily.row_on(d(2023, 3, 31)).unwrap().fundamentals.is_none());

    let by_date = |date: Date| {
        report
            .records
            .iter()
            .find(|r| r.report_date_official == date)
            .unwrap()
    };

    let q4 = by_date(d(2023, 12, 31));
    assert_eq!(q4.state(), RecordState::QuarterlyEnriched);
    assert_relative_eq!(q4.revenue.unwrap(), 1_000.0);
    assert_relative_eq!(q4.ebit.unwrap(), 140.0);
    assert_relative_eq!(q4.interest_coverage.unwrap(), 7.0);
    assert_relative_eq!(q4.equity.unwrap(), 500.0);

    // Fewer than four quarters from here and no annual statement.
    let q3 = by_date(d(2023, 9, 30));
    assert_eq!(q3.state(), RecordState::Missing);
    assert_eq!(q3.revenue, None);
    assert_eq!(q3.interest_coverage, None);

    let ttm = report.history.ttm.as_ref().unwrap();
    assert_eq!(ttm.net_income, Some(100.0));
    assert_eq!(ttm.ronw_pct, Some(20.0));
}

#[test]
fn quarterly_wins_date_collision() {
    let mut bundle = quarterly_bundle();
    bundle.annual = RawStatementSet {
        income: vec![income(d(2023, 12, 31), 9.0)],
        balance_sheet: vec![balance(d(2023, 12, 31))],
    };
    let report = Pipeline::default().run(&bundle).unwrap();

    let entry = report.unified.get(d(2023, 12, 31)).unwrap();
    assert_eq!(entry.source, PeriodKind::Quarterly);
    assert_relative_eq!(entry.ttm_eps, 2.50, epsilon = 1e-12);

    let record = report
        .records
        .iter()
        .find(|r| r.report_date_official == d(2023, 12, 31))
        .unwrap();
    assert_eq!(record.data_source_type, Some(DataSourceType::QuarterlyTtm));
}

#[test]
fn zero_equity_defaults_to_one() {
    let mut bundle = annual_bundle();
    bundle.annual.income = vec![
        RawStatement::new(d(2023, 12, 31))
            .with_item("Net Income", 50.0)
            .with_item("Diluted EPS", 1.0),
    ];
    bundle.annual.balance_sheet = vec![RawStatement::new(d(2023, 12, 31)).with_item("Stockholders Equity", 0.0)];

    let report = Pipeline::default().run(&bundle).unwrap();
    let record = &report.records[0];
    assert_relative_eq!(record.ronw_pct.unwrap(), 5000.0);
    assert_eq!(record.equity, Some(1.0));
}

#[test]
fn zero_equity_undefined_policy() {
    let mut bundle = annual_bundle();
    bundle.annual.balance_sheet = vec![RawStatement::new(d(2023, 12, 31)).with_item("Stockholders Equity", 0.0)];
    let config =
        PipelineConfig::from_json_str(r#"{"normalizer": {"equity_policy": "Undefined"}}"#).unwrap();

    let report = Pipeline::new(config).run(&bundle).unwrap();
    let record = report.records.last().unwrap();
    assert_eq!(record.equity, None);
    assert_eq!(record.ronw_pct, None);
    assert_eq!(record.debt_to_equity, None);
    assert!(record.net_margin_pct.is_some());
}

#[test]
fn missing_eps_is_fatal() {
    let mut bundle = annual_bundle();
    for row in &mut bundle.annual.income {
        row.items.remove("Diluted EPS");
    }
    let err = Pipeline::default().run(&bundle).unwrap_err();
    assert!(matches!(err, GarpError::MissingRequiredField(_)));
    assert!(err.is_fatal());
}

#[test]
fn spot_rate_converts_statements() {
    let mut bundle = annual_bundle();
    bundle.spot_rate = Some(2.0);
    let report = Pipeline::default().run(&bundle).unwrap();
    let latest = report.records.last().unwrap();
    assert_relative_eq!(latest.ttm_eps.unwrap(), 6.0);
    assert_relative_eq!(latest.pe_ratio.unwrap(), 10.0);
    assert_relative_eq!(latest.revenue.unwrap(), 2_000.0);
    // Ratios of two converted figures are unchanged.
    assert_relative_eq!(latest.ronw_pct.unwrap(), 20.0);
}

#[test]
fn enrichment_round_trip_is_byte_identical() {
    let bundle = quarterly_bundle();
    let pipeline = Pipeline::default();
    let report = pipeline.run(&bundle).unwrap();

    let first = records_to_json(&report.records).unwrap();
    let reloaded = records_from_json(&first).unwrap();
    let again = pipeline.enrich_records(&bundle, &reloaded).unwrap();
    assert_eq!(records_to_json(&again).unwrap(), first);
}

#[test]
fn bundle_json_drives_pipeline() {
    let json = r#"{
        "symbol": "JSON",
        "prices": [
            {"date": "2022-12-30", "close": 40.0},
            {"date": "2023-12-29", "close": 50.0}
        ],
        "annual": {
            "income": [
                {"period_end": "2022-12-31", "items": {"Basic EPS": 2.0, "Net Income": 10.0}},
                {"period_end": "2023-12-31", "items": {"Basic EPS": 2.5, "Net Income": 12.0}}
            ]
        }
    }"#;
    let bundle = InstrumentBundle::from_json_str(json).unwrap();
    assert_eq!(bundle.symbol(), "JSON");

    let report = Pipeline::default().run(&bundle).unwrap();
    // 2023-12-31 lies after the last trading day.
    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.report_date_official, d(2022, 12, 31));
    assert_eq!(record.trading_date_used, d(2023, 12, 29));
    assert_relative_eq!(record.pe_ratio.unwrap(), 25.0);
    assert!(report.summary.available);
    assert_relative_eq!(report.summary.latest_pe.unwrap(), 25.0);
}

#[test]
fn invalid_growth_lookback_is_rejected() {
    for days in ["0", "-400", "9223372036854775807"] {
        let json = format!(r#"{{"ratios": {{"growth_lookback_days": {days}}}}}"#);
        let config = PipelineConfig::from_json_str(&json).unwrap();
        let err = Pipeline::new(config).run(&annual_bundle()).unwrap_err();
        assert!(matches!(err, GarpError::InvalidData(_)), "lookback {days}");
    }
}

#[test]
fn history_skips_periods_without_balance_sheet() {
    let mut bundle = annual_bundle();
    bundle.annual.balance_sheet = vec![balance(d(2023, 12, 31))];
    let report = Pipeline::default().run(&bundle).unwrap();

    assert_eq!(report.history.annual.len(), 1);
    let row = &report.history.annual[0];
    assert_eq!(row.period, "2023-12-31");
    assert_eq!(row.ronw_pct, Some(20.0));
}
