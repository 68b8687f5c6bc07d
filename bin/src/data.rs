//! Input and output helpers for the garp CLI.

use chrono::NaiveDate;
use garp::{GarpError, InstrumentBundle, PipelineConfig};
use garp_report::{records_from_json, ReportingRecord};
use std::{fs, path::Path};
use tracing::{debug, info};

/// Load an instrument bundle from a JSON file.
pub(crate) fn load_bundle(path: &Path) -> Result<InstrumentBundle, GarpError> {
    let bundle = InstrumentBundle::from_path(path)?;
    debug!(
        path = %path.display(),
        symbol = %bundle.symbol,
        prices = bundle.prices.len(),
        "loaded bundle"
    );
    Ok(bundle)
}

/// Load the pipeline configuration, or the defaults when no file is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<PipelineConfig, GarpError> {
    match path {
        Some(p) => {
            info!(path = %p.display(), "loading configuration");
            PipelineConfig::from_path(p)
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Load previously exported records.
pub(crate) fn load_records(path: &Path) -> Result<Vec<ReportingRecord>, GarpError> {
    records_from_json(&fs::read_to_string(path)?)
}

/// Write to a file, or to stdout when no path is given.
pub(crate) fn write_output(text: &str, path: Option<&Path>) -> Result<(), GarpError> {
    match path {
        Some(p) => {
            fs::write(p, text)?;
            info!(path = %p.display(), bytes = text.len(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, GarpError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| GarpError::InvalidDate(format!("Invalid date format: {e}")))
}

/// Format an optional figure for table output.
pub(crate) fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}
