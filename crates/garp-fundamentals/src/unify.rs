//! Merging annual and quarterly-TTM fundamentals into one timeline.

use crate::statement::{Figures, StatementHistory};
use crate::ttm::ttm_series;
use garp_traits::{Date, PeriodKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Fundamentals known as of one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsEntry {
    /// Period end the figures belong to.
    pub date: Date,
    /// Annual statement or quarterly TTM snapshot.
    pub source: PeriodKind,
    /// Trailing-year EPS: the annual EPS or the four-quarter sum.
    pub ttm_eps: f64,
    /// Flows and balance-sheet figures on the same basis as `ttm_eps`.
    pub figures: Figures,
}

/// Sparse, ascending, date-unique fundamentals series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSeries {
    entries: Vec<FundamentalsEntry>,
}

impl UnifiedSeries {
    /// Merge annual statements and quarterly TTM snapshots.
    ///
    /// Periods without an EPS figure are skipped. When both frequencies have
    /// an entry on the same date the quarterly one is kept.
    #[must_use]
    pub fn build(history: &StatementHistory) -> Self {
        let annual = history.annual.iter().filter_map(|s| {
            s.eps.map(|eps| FundamentalsEntry {
                date: s.period_end,
                source: PeriodKind::Annual,
                ttm_eps: eps,
                figures: s.figures(),
            })
        });
        let quarterly = ttm_series(&history.quarterly).into_iter().filter_map(|snap| {
            snap.eps.map(|eps| FundamentalsEntry {
                date: snap.as_of,
                source: PeriodKind::Quarterly,
                ttm_eps: eps,
                figures: snap.figures,
            })
        });

        let mut by_date: BTreeMap<Date, FundamentalsEntry> = BTreeMap::new();
        let mut collisions = 0usize;
        for entry in annual {
            by_date.insert(entry.date, entry);
        }
        for entry in quarterly {
            if by_date.insert(entry.date, entry).is_some() {
                collisions += 1;
            }
        }

        let series = Self::from_entries(by_date.into_values());
        debug!(entries = series.len(), collisions, "unified fundamentals series");
        series
    }

    /// Build from entries in any order; a later entry replaces an earlier
    /// one with the same date.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = FundamentalsEntry>) -> Self {
        let by_date: BTreeMap<Date, FundamentalsEntry> = entries.into_iter().map(|e| (e.date, e)).collect();
        Self {
            entries: by_date.into_values().collect(),
        }
    }

    /// Entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[FundamentalsEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry dated exactly `date`.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<&FundamentalsEntry> {
        self.entries
            .binary_search_by_key(&date, |e| e.date)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Latest entry dated on or before `date`.
    #[must_use]
    pub fn as_of(&self, date: Date) -> Option<&FundamentalsEntry> {
        let idx = self.entries.partition_point(|e| e.date <= date);
        idx.checked_sub(1).map(|i| &self.entries[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::PeriodicStatement;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn stmt(date: Date, kind: PeriodKind, eps: Option<f64>) -> PeriodicStatement {
        let mut s = PeriodicStatement::empty(date, kind);
        s.eps = eps;
        s
    }

    fn history() -> StatementHistory {
        StatementHistory {
            annual: vec![
                stmt(d(2023, 12, 31), PeriodKind::Annual, Some(3.0)),
                stmt(d(2022, 12, 31), PeriodKind::Annual, Some(2.5)),
                stmt(d(2021, 12, 31), PeriodKind::Annual, None),
            ],
            quarterly: vec![
                stmt(d(2024, 3, 31), PeriodKind::Quarterly, Some(1.0)),
                stmt(d(2023, 12, 31), PeriodKind::Quarterly, Some(0.9)),
                stmt(d(2023, 9, 30), PeriodKind::Quarterly, Some(0.8)),
                stmt(d(2023, 6, 30), PeriodKind::Quarterly, Some(0.7)),
                stmt(d(2023, 3, 31), PeriodKind::Quarterly, Some(0.6)),
            ],
        }
    }

    #[test]
    fn test_quarterly_wins_collision() {
        let series = UnifiedSeries::build(&history());
        let dates: Vec<Date> = series.entries().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![d(2022, 12, 31), d(2023, 12, 31), d(2024, 3, 31)]);

        let collided = series.get(d(2023, 12, 31)).unwrap();
        assert_eq!(collided.source, PeriodKind::Quarterly);
        approx::assert_relative_eq!(collided.ttm_eps, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_as_of_lookup() {
        let series = UnifiedSeries::build(&history());
        assert!(series.as_of(d(2022, 12, 30)).is_none());
        assert_eq!(series.as_of(d(2022, 12, 31)).unwrap().date, d(2022, 12, 31));
        assert_eq!(series.as_of(d(2023, 6, 1)).unwrap().date, d(2022, 12, 31));
        assert_eq!(series.as_of(d(2030, 1, 1)).unwrap().date, d(2024, 3, 31));
    }

    #[test]
    fn test_empty_history() {
        let series = UnifiedSeries::build(&StatementHistory::default());
        assert!(series.is_empty());
        assert!(series.as_of(d(2024, 1, 1)).is_none());
    }
}
