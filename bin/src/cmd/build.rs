//! Record export command implementation.

use crate::data;
use anyhow::{Context, Result};
use garp::{Pipeline, PipelineConfig};
use garp_report::records_to_json;
use std::path::Path;

/// Run the full pipeline and export one record per official reporting date.
///
/// With `full`, the whole instrument report (statements, daily series,
/// history tables and summary) is written instead of the records alone.
pub(crate) fn build_records(
    bundle_path: &Path,
    config: PipelineConfig,
    output: Option<&Path>,
    full: bool,
) -> Result<()> {
    let bundle = data::load_bundle(bundle_path)
        .with_context(|| format!("reading bundle {}", bundle_path.display()))?;
    let report = Pipeline::new(config)
        .run(&bundle)
        .with_context(|| format!("analyzing {}", bundle.symbol))?;

    let text = if full {
        serde_json::to_string_pretty(&report)?
    } else {
        records_to_json(&report.records)?
    };
    data::write_output(&text, output)?;

    if output.is_some() {
        println!(
            "{}: {} records ({} trading days, {} fundamentals entries)",
            report.symbol,
            report.records.len(),
            report.daily.len(),
            report.unified.len()
        );
    }
    Ok(())
}
