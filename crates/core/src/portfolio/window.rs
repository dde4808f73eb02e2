//! Reconstruction window resolution.
//!
//! Every reconstruction runs over an explicit `[start, end]` calendar-day
//! window. The window is resolved once, up front, from the request and the
//! transaction log; downstream stages never re-derive dates.

use chrono::{Months, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-day window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// All calendar days in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// Named lookback range for chart requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "max")]
    Max,
}

impl ChartRange {
    /// Window start for this range relative to `today`. `None` for `Max`,
    /// which is anchored to the earliest transaction instead.
    fn start_from(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            ChartRange::SevenDays => Some(today - chrono::Duration::days(7)),
            ChartRange::OneMonth => today.checked_sub_months(Months::new(1)),
            ChartRange::ThreeMonths => today.checked_sub_months(Months::new(3)),
            ChartRange::SixMonths => today.checked_sub_months(Months::new(6)),
            ChartRange::OneYear => today.checked_sub_months(Months::new(12)),
            ChartRange::ThreeYears => today.checked_sub_months(Months::new(36)),
            ChartRange::Max => None,
        }
    }
}

/// A resolved window plus whether the fallback window had to be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedWindow {
    pub window: DateWindow,
    /// True when the requested window was invalid (start after end) and the
    /// trailing one-year default was substituted.
    pub fallback_applied: bool,
}

/// Resolve the reconstruction window for a request.
///
/// Precedence: an explicit `start_date` wins over `range`; `range` defaults
/// to one year. The start is clamped forward to the earliest transaction
/// (nothing to reconstruct before it). An inverted window falls back to the
/// trailing year and flags the substitution.
pub fn resolve_window(
    range: Option<ChartRange>,
    start_date: Option<NaiveDate>,
    earliest_transaction: Option<NaiveDate>,
    today: NaiveDate,
) -> ResolvedWindow {
    let requested_start = match (start_date, range) {
        (Some(explicit), _) => Some(explicit),
        (None, Some(range)) => range.start_from(today),
        (None, None) => ChartRange::OneYear.start_from(today),
    };

    // Max range (or a failed month subtraction) anchors to the first trade.
    let requested_start = requested_start.or(earliest_transaction).unwrap_or(today);

    let start = match earliest_transaction {
        Some(first) => requested_start.max(first),
        None => requested_start,
    };

    if start > today {
        warn!(
            "Requested window starts {} after {}; falling back to trailing one year",
            start, today
        );
        let fallback_start = today
            .checked_sub_months(Months::new(12))
            .unwrap_or(today);
        return ResolvedWindow {
            window: DateWindow {
                start: fallback_start,
                end: today,
            },
            fallback_applied: true,
        };
    }

    ResolvedWindow {
        window: DateWindow { start, end: today },
        fallback_applied: false,
    }
}
