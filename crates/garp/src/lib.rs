#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/garp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Crate Organization
//!
//! - [`traits`] - Core types, the [`StatementSource`] input seam and errors
//! - [`fundamentals`] - Normalization, TTM aggregation, unification and ratios
//! - [`report`] - Reporting records, enrichment and valuation summary
//! - [`pipeline`] - The stages wired together for one instrument
//!
//! ## Data Flow
//!
//! 1. **Normalizer** resolves vendor aliases into canonical statements
//! 2. **TTM Aggregator** sums four quarters at every anchor
//! 3. **Series Unifier** merges annual and TTM entries, quarterly winning ties
//! 4. **Daily merge** forward-fills fundamentals onto every trading day
//! 5. **Projector** emits one record per official date
//! 6. **Enricher** fills statement figures from a TTM window or annual statement

/// Version information for the garp crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod pipeline;

/// Core types and the input seam.
pub mod traits {
    pub use garp_traits::*;
}

/// Statement normalization, TTM aggregation, unification and ratios.
///
/// # Example
///
/// ```ignore
/// use garp::fundamentals::{StatementNormalizer, UnifiedSeries};
///
/// let history = StatementNormalizer::default().normalize(&annual, &quarterly)?;
/// let unified = UnifiedSeries::build(&history);
/// ```
pub mod fundamentals {
    pub use garp_fundamentals::*;
}

/// Reporting records, enrichment and the valuation summary.
pub mod report {
    pub use garp_report::*;
}

// Re-export error types
pub use garp_traits::{GarpError, Result};

// Re-export common types
pub use garp_traits::{Date, InstrumentBundle, PeriodKind, PricePoint, PriceSeries, StatementSource, Symbol};

pub use garp_report::{DataSourceType, ReportingRecord};
pub use pipeline::{analyze, InstrumentReport, Pipeline, PipelineConfig};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use garp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use crate::{analyze, DataSourceType, InstrumentReport, Pipeline, PipelineConfig, ReportingRecord};
}
