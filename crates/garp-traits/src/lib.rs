#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/garp/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the garp fundamentals engine.
//!
//! This crate provides the shared vocabulary of the pipeline: the daily price
//! series, raw statement rows and the [`StatementSource`] input seam, and the
//! [`GarpError`] taxonomy.

/// The version of the garp-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod source;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{GarpError, Result};
pub use source::{InstrumentBundle, RawStatement, RawStatementSet, StatementSource};
pub use types::{Date, MarketData, PeriodKind, PricePoint, PriceSeries, Symbol};
