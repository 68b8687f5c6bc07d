//! Record enrichment command implementation.

use crate::data;
use anyhow::{Context, Result};
use garp::{Pipeline, PipelineConfig};
use garp_report::{records_to_json, RecordState};
use std::path::Path;

/// Re-enrich exported records against the statements in a bundle.
pub(crate) fn enrich_records(
    bundle_path: &Path,
    records_path: &Path,
    config: PipelineConfig,
    output: Option<&Path>,
) -> Result<()> {
    let bundle = data::load_bundle(bundle_path)
        .with_context(|| format!("reading bundle {}", bundle_path.display()))?;
    let records = data::load_records(records_path)
        .with_context(|| format!("reading records {}", records_path.display()))?;

    let enriched = Pipeline::new(config).enrich_records(&bundle, &records)?;
    data::write_output(&records_to_json(&enriched)?, output)?;

    if output.is_some() {
        let count = |state: RecordState| enriched.iter().filter(|r| r.state() == state).count();
        println!(
            "{} records: {} quarterly TTM, {} annual, {} missing",
            enriched.len(),
            count(RecordState::QuarterlyEnriched),
            count(RecordState::AnnualEnriched),
            count(RecordState::Missing)
        );
    }
    Ok(())
}
