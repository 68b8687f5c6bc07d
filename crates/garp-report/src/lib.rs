//! Reporting records for garp.
//!
//! This crate turns the daily fundamentals view into one record per
//! official reporting date:
//! - Projection of official dates onto the trading calendar
//! - Two-strategy enrichment with quarterly TTM or annual figures
//! - Valuation summary and PE bands for report consumers
//!
//! # Example
//!
//! ```rust,ignore
//! use garp_report::{enrich_all, project, records_to_json};
//!
//! let records = project(&history, &prices, &daily);
//! let enriched = enrich_all(&records, &history);
//! println!("{}", records_to_json(&enriched)?);
//! ```

pub mod enricher;
pub mod projector;
pub mod record;
pub mod summary;

// Re-export main types
pub use enricher::{enrich, enrich_all, resolve_figures};
pub use projector::{project, qualifying_dates};
pub use record::{records_from_json, records_to_json, DataSourceType, RecordState, ReportingRecord};
pub use summary::{PeBands, ValuationSummary, RECENT_RECORDS};
