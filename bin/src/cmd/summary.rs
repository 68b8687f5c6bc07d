//! Valuation summary command implementation.

use crate::data::{self, fmt_opt};
use anyhow::{Context, Result};
use garp::{Pipeline, PipelineConfig};
use std::path::Path;

/// Print the latest valuation, PE bands and the most recent records.
pub(crate) fn show_summary(bundle_path: &Path, config: PipelineConfig) -> Result<()> {
    let bundle = data::load_bundle(bundle_path)
        .with_context(|| format!("reading bundle {}", bundle_path.display()))?;
    let report = Pipeline::new(config).run(&bundle)?;
    let summary = &report.summary;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Valuation Summary                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Symbol:   {}", report.symbol);
    if let Some(date) = summary.as_of {
        println!("As of:    {date}");
    }
    println!("Price:    {}", fmt_opt(summary.latest_price, 2));
    println!("PE:       {}", fmt_opt(summary.latest_pe, 2));
    println!("PEG:      {}", fmt_opt(summary.latest_peg, 2));
    println!();

    match &report.pe_bands {
        Some(bands) => {
            println!("PE bands ({} days):", bands.observations);
            println!("  +2 sd   {:>8.2}", bands.plus_two_sd);
            println!("  +1 sd   {:>8.2}", bands.plus_one_sd);
            println!("  mean    {:>8.2}", bands.mean);
            println!("  -1 sd   {:>8.2}", bands.minus_one_sd);
        }
        None => println!("PE bands: not enough PE history"),
    }
    println!();

    if !summary.available {
        println!("No reporting records inside the price range.\n");
        return Ok(());
    }

    println!(
        "{:<12} {:<12} {:<14} {:>9} {:>9} {:>9} {:>9}",
        "report", "traded", "source", "price", "eps", "pe", "peg"
    );
    println!("{}", "-".repeat(80));
    for r in &summary.recent {
        let source = r.data_source_type.map_or("-", |s| s.as_str());
        println!(
            "{:<12} {:<12} {:<14} {:>9} {:>9} {:>9} {:>9}",
            r.report_date_official,
            r.trading_date_used,
            source,
            fmt_opt(r.price, 2),
            fmt_opt(r.ttm_eps, 2),
            fmt_opt(r.pe_ratio, 2),
            fmt_opt(r.peg_ratio, 2),
        );
    }
    println!();
    Ok(())
}
