//! Trailing-twelve-month aggregation.
//!
//! Flow items (revenue, net income, EBIT, interest, EPS) are summed over four
//! consecutive quarters. Balance-sheet items are a snapshot of the anchor
//! quarter. Quarters are indexed newest first, so the window at anchor `i`
//! is `[i, i + 4)`.

use crate::ratios::{interest_coverage, SolvencyRatios};
use crate::statement::{Figures, PeriodicStatement};
use garp_traits::{Date, GarpError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of quarters in a trailing year.
pub const TTM_WINDOW: usize = 4;

/// Trailing-twelve-month figures at one quarterly anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TtmSnapshot {
    /// Period end of the anchor quarter.
    pub as_of: Date,
    /// Summed EPS.
    pub eps: Option<f64>,
    /// Summed flows and anchor balance-sheet figures.
    pub figures: Figures,
}

impl TtmSnapshot {
    /// EBIT over summed interest, with the 999 sentinel for no interest.
    #[must_use]
    pub fn interest_coverage(&self) -> Option<f64> {
        interest_coverage(self.figures.ebit, self.figures.interest_expense)
    }

    /// Statement ratios of this snapshot.
    #[must_use]
    pub fn solvency(&self) -> SolvencyRatios {
        SolvencyRatios::derive(&self.figures)
    }
}

/// Sum of one optional field; undefined if any quarter lacks it.
fn sum_field(window: &[PeriodicStatement], field: impl Fn(&PeriodicStatement) -> Option<f64>) -> Option<f64> {
    window.iter().map(field).sum()
}

/// Aggregate the four quarters starting at `anchor`.
///
/// Returns `None` when fewer than four quarters exist from the anchor on.
/// That is insufficient history, not an error.
#[must_use]
pub fn aggregate(quarters: &[PeriodicStatement], anchor: usize) -> Option<TtmSnapshot> {
    let Some(window) = quarters.get(anchor..anchor.saturating_add(TTM_WINDOW)) else {
        debug!(
            reason = %GarpError::InsufficientHistory(format!(
                "{} quarters from anchor {anchor}, need {TTM_WINDOW}",
                quarters.len().saturating_sub(anchor)
            )),
            "TTM unavailable"
        );
        return None;
    };
    let head = &window[0];

    Some(TtmSnapshot {
        as_of: head.period_end,
        eps: sum_field(window, |q| q.eps),
        figures: Figures {
            revenue: sum_field(window, |q| q.revenue),
            net_income: sum_field(window, |q| q.net_income),
            ebit: sum_field(window, |q| q.ebit),
            interest_expense: window.iter().map(|q| q.interest_expense).sum(),
            equity: head.equity,
            total_debt: head.total_debt,
        },
    })
}

/// Snapshots at every anchor with a full window, newest first.
#[must_use]
pub fn ttm_series(quarters: &[PeriodicStatement]) -> Vec<TtmSnapshot> {
    (0..quarters.len())
        .map_while(|i| aggregate(quarters, i))
        .collect()
}
