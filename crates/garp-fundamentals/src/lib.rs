//! Fundamentals computation for the garp engine.
//!
//! This crate turns raw statement rows into a daily view of trailing
//! fundamentals:
//! - [`normalize`]: alias resolution and fallback rules
//! - [`ttm`]: four-quarter rolling aggregation
//! - [`unify`]: annual and quarterly-TTM merge into one timeline
//! - [`daily`]: forward-fill onto the trading calendar
//! - [`ratios`]: valuation and solvency ratios with explicit undefined values
//! - [`history`]: per-period solvency tables
//!
//! # Example
//!
//! ```ignore
//! use garp_fundamentals::{DailyMergedSeries, RatioConfig, StatementNormalizer, UnifiedSeries};
//!
//! let history = StatementNormalizer::default().normalize(&annual, &quarterly)?;
//! let unified = UnifiedSeries::build(&history);
//! let daily = DailyMergedSeries::build(&prices, &unified, &RatioConfig::default())?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod daily;
pub mod history;
pub mod normalize;
pub mod ratios;
pub mod registry;
pub mod statement;
pub mod ttm;
pub mod unify;

// Re-export key types
pub use daily::{DailyMergedSeries, DailyRow};
pub use history::{FinancialHistory, HistoryConfig, PeriodRatioRow};
pub use normalize::{EquityPolicy, LineItem, NormalizerConfig, StatementNormalizer};
pub use ratios::{RatioConfig, SolvencyRatios, ValuationRatios, INTEREST_COVERAGE_SENTINEL};
pub use registry::{MetricCategory, MetricInfo};
pub use statement::{Figures, PeriodicStatement, StatementHistory};
pub use ttm::{aggregate, ttm_series, TtmSnapshot, TTM_WINDOW};
pub use unify::{FundamentalsEntry, UnifiedSeries};
