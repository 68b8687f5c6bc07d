//! Solvency history command implementation.

use crate::data::{self, fmt_opt};
use anyhow::{Context, Result};
use garp::{Pipeline, PipelineConfig};
use garp_fundamentals::{FinancialHistory, PeriodRatioRow};
use std::path::Path;

fn print_rows(title: &str, rows: &[&PeriodRatioRow]) {
    println!("{title}:");
    println!("{}", "-".repeat(86));
    println!(
        "{:<14} {:<13} {:>9} {:>9} {:>9} {:>13} {:>13}",
        "period", "type", "ronw%", "d/e", "icr", "net_income", "ebit"
    );
    for row in rows {
        println!(
            "{:<14} {:<13} {:>9} {:>9} {:>9} {:>13} {:>13}",
            row.period,
            row.kind.to_string(),
            fmt_opt(row.ronw_pct, 2),
            fmt_opt(row.debt_to_equity, 2),
            fmt_opt(row.interest_coverage, 2),
            fmt_opt(row.net_income, 0),
            fmt_opt(row.ebit, 0),
        );
    }
    println!();
}

/// Print annual, quarterly and trailing solvency tables.
pub(crate) fn show_history(bundle_path: &Path, config: PipelineConfig, json: bool) -> Result<()> {
    let bundle = data::load_bundle(bundle_path)
        .with_context(|| format!("reading bundle {}", bundle_path.display()))?;
    let pipeline = Pipeline::new(config);
    let statements = pipeline.statements(&bundle)?;
    let tables = FinancialHistory::build(&statements, &pipeline.config().history);

    if json {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    println!("\n{} financial history\n", bundle.symbol);
    if let Some(ttm) = &tables.ttm {
        print_rows("Trailing twelve months", &[ttm]);
    }
    print_rows("Quarterly", &tables.quarterly.iter().collect::<Vec<_>>());
    print_rows("Annual", &tables.annual.iter().collect::<Vec<_>>());
    Ok(())
}
