//! Valuation and solvency ratios.
//!
//! Every ratio is an `Option<f64>`: `None` means undefined, and an undefined
//! ratio is never replaced by zero. A division whose denominator is zero
//! yields `None`, and any result that is not finite is also `None`. The one
//! deliberate exception is interest coverage, which reports
//! [`INTEREST_COVERAGE_SENTINEL`] when there is no interest expense so the
//! column stays orderable.

use crate::statement::Figures;
use chrono::TimeDelta;
use garp_traits::{GarpError, Result};
use serde::{Deserialize, Serialize};

/// Interest coverage reported when interest expense is zero or absent.
pub const INTEREST_COVERAGE_SENTINEL: f64 = 999.0;

/// Calendar-day offset used for year-over-year EPS growth.
pub const GROWTH_LOOKBACK_DAYS: i64 = 365;

/// Interest expense at or below this magnitude counts as none.
pub const ZERO_TOLERANCE: f64 = 1e-9;

/// Configuration for ratio derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioConfig {
    /// Lookback for EPS growth in calendar days (default: 365).
    pub growth_lookback_days: i64,
}

impl Default for RatioConfig {
    fn default() -> Self {
        Self {
            growth_lookback_days: GROWTH_LOOKBACK_DAYS,
        }
    }
}

impl RatioConfig {
    /// The growth lookback as a duration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidData` if the lookback is not a positive, representable
    /// number of days. A non-positive lookback would compare against a later
    /// report.
    pub fn growth_lookback(&self) -> Result<TimeDelta> {
        let days = self.growth_lookback_days;
        TimeDelta::try_days(days).filter(|_| days > 0).ok_or_else(|| {
            GarpError::InvalidData(format!("growth lookback must be a positive number of days, got {days}"))
        })
    }
}

/// Canonicalize infinities and NaN to undefined.
#[must_use]
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// `numerator / denominator`, undefined for a zero or absent denominator.
#[must_use]
pub fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => finite(n / d),
        _ => None,
    }
}

/// Price over TTM EPS. Undefined for non-positive EPS.
#[must_use]
pub fn pe_ratio(price: f64, ttm_eps: Option<f64>) -> Option<f64> {
    match ttm_eps {
        Some(eps) if eps > 0.0 => finite(price / eps),
        _ => None,
    }
}

/// Percentage change of TTM EPS against the value one lookback earlier.
#[must_use]
pub fn eps_growth_pct(ttm_eps: Option<f64>, prior_ttm_eps: Option<f64>) -> Option<f64> {
    safe_div(ttm_eps, prior_ttm_eps).and_then(|r| finite((r - 1.0) * 100.0))
}

/// PE over growth. Undefined unless growth is strictly positive.
#[must_use]
pub fn peg_ratio(pe: Option<f64>, growth_pct: Option<f64>) -> Option<f64> {
    match (pe, growth_pct) {
        (Some(pe), Some(g)) if g > 0.0 => finite(pe / g),
        _ => None,
    }
}

/// EBIT over interest expense, or the sentinel when there is no interest.
#[must_use]
pub fn interest_coverage(ebit: Option<f64>, interest_expense: f64) -> Option<f64> {
    if interest_expense.abs() <= ZERO_TOLERANCE {
        Some(INTEREST_COVERAGE_SENTINEL)
    } else {
        ebit.and_then(|e| finite(e / interest_expense))
    }
}

/// Price-based ratios for one day or record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationRatios {
    /// Price over TTM EPS.
    pub pe_ratio: Option<f64>,
    /// Year-over-year TTM EPS growth in percent.
    pub eps_growth_yoy_pct: Option<f64>,
    /// PE over growth.
    pub peg_ratio: Option<f64>,
}

impl ValuationRatios {
    /// Derive from a close, the current TTM EPS and the EPS one lookback back.
    #[must_use]
    pub fn derive(price: f64, ttm_eps: Option<f64>, prior_ttm_eps: Option<f64>) -> Self {
        let pe = pe_ratio(price, ttm_eps);
        let growth = eps_growth_pct(ttm_eps, prior_ttm_eps);
        Self {
            pe_ratio: pe,
            eps_growth_yoy_pct: growth,
            peg_ratio: peg_ratio(pe, growth),
        }
    }
}

/// Statement-based ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SolvencyRatios {
    /// Net income over revenue, percent.
    pub net_margin_pct: Option<f64>,
    /// Net income over equity, percent.
    pub ronw_pct: Option<f64>,
    /// Total debt over equity.
    pub debt_to_equity: Option<f64>,
    /// EBIT over interest expense.
    pub interest_coverage: Option<f64>,
}

impl SolvencyRatios {
    /// Derive from one set of figures.
    #[must_use]
    pub fn derive(figures: &Figures) -> Self {
        let pct = |r: Option<f64>| r.and_then(|v| finite(v * 100.0));
        Self {
            net_margin_pct: pct(safe_div(figures.net_income, figures.revenue)),
            ronw_pct: pct(safe_div(figures.net_income, figures.equity)),
            debt_to_equity: safe_div(figures.total_debt, figures.equity),
            interest_coverage: interest_coverage(figures.ebit, figures.interest_expense),
        }
    }
}

/// Round to two decimals, as shown in history tables.
#[must_use]
pub fn round2(value: Option<f64>) -> Option<f64> {
    value.map(|v| (v * 100.0).round() / 100.0)
}
