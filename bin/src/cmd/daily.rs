//! Daily series command implementation.

use crate::data::{self, fmt_opt};
use anyhow::{Context, Result};
use garp::{Pipeline, PipelineConfig};
use std::path::Path;

/// Print the daily merged series, optionally limited to a date range.
pub(crate) fn show_daily(
    bundle_path: &Path,
    config: PipelineConfig,
    from: Option<String>,
    to: Option<String>,
    tail: Option<usize>,
    json: bool,
) -> Result<()> {
    let from = from.as_deref().map(data::parse_date).transpose()?;
    let to = to.as_deref().map(data::parse_date).transpose()?;

    let bundle = data::load_bundle(bundle_path)
        .with_context(|| format!("reading bundle {}", bundle_path.display()))?;
    let (_, daily) = Pipeline::new(config).daily(&bundle)?;

    let mut rows: Vec<_> = daily
        .rows()
        .iter()
        .filter(|r| from.is_none_or(|f| r.date >= f) && to.is_none_or(|t| r.date <= t))
        .collect();
    if let Some(n) = tail {
        let skip = rows.len().saturating_sub(n);
        rows.drain(..skip);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let frame = daily.to_market_data()?;
    let pe_days = frame.column("pe_ratio").map_or(0, |c| c.len() - c.null_count());
    println!(
        "\n{}: {} trading days, {} columns, PE defined on {} days\n",
        bundle.symbol,
        frame.len(),
        frame.columns().len(),
        pe_days
    );
    println!(
        "{:<12} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "date", "close", "ttm_eps", "growth%", "pe", "peg", "ronw%", "d/e"
    );
    println!("{}", "-".repeat(84));
    for row in rows {
        println!(
            "{:<12} {:>10.2} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            row.date,
            row.close,
            fmt_opt(row.ttm_eps(), 2),
            fmt_opt(row.valuation.eps_growth_yoy_pct, 1),
            fmt_opt(row.valuation.pe_ratio, 2),
            fmt_opt(row.valuation.peg_ratio, 2),
            fmt_opt(row.solvency.ronw_pct, 1),
            fmt_opt(row.solvency.debt_to_equity, 2),
        );
    }
    println!();
    Ok(())
}
