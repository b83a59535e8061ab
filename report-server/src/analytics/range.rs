//! Time Range Resolver
//!
//! Turns the optional `startDate` / `endDate` query values into an inclusive
//! `[start, end]` instant pair. Each report picks a [`RangePolicy`] that
//! decides what a missing bound means:
//!
//! | Policy | missing start | missing end |
//! |--------|---------------|-------------|
//! | `Today` | today 00:00:00.000 | today 23:59:59.999 |
//! | `TrailingDays(n)` | n days before the end | now |
//!
//! Supplied dates always expand to full-day bounds in the business timezone.
//! Under `TrailingDays`, a lone `endDate` pulls the window back with it.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::utils::time;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Default applied when a report is called without dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePolicy {
    /// Current calendar day
    Today,
    /// `[end - n days, end]`; not day-aligned when the end is `now`
    TrailingDays(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("startDate ({start}) is after endDate ({end})")]
    Inverted {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Inclusive instant range plus the inclusive day count used by averages
///
/// Also carries the business dates of both ends, for records that are dated
/// rather than timestamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    first_day: NaiveDate,
    last_day: NaiveDate,
    days: i64,
}

impl TimeRange {
    /// Range with an explicit day count; business dates are taken in `tz`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, days: i64, tz: Tz) -> Self {
        Self {
            start,
            end,
            first_day: time::local_date(start, tz),
            last_day: time::local_date(end, tz),
            days,
        }
    }

    /// Full-day range from `from` to `to` inclusive
    pub fn for_dates(from: NaiveDate, to: NaiveDate, tz: Tz) -> Self {
        let days = (to - from).num_days().max(0) + 1;
        Self::new(time::day_start(from, tz), time::day_end(to, tz), days, tz)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether a business date falls on any day the range touches
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    /// `ceil((end - start) / 1 day) + 1`, measured between day anchors
    pub fn days_in_range(&self) -> i64 {
        self.days
    }
}

/// Bound as the resolver sees it before expansion
enum Bound {
    Date(NaiveDate),
    Instant(DateTime<Utc>),
    /// Wall-clock time in the business timezone
    Local(NaiveDateTime),
}

impl Bound {
    /// Wall-clock anchor used for day counting; DST-free
    fn anchor(&self, tz: Tz) -> NaiveDateTime {
        match self {
            Bound::Date(d) => d.and_time(NaiveTime::MIN),
            Bound::Instant(i) => i.with_timezone(&tz).naive_local(),
            Bound::Local(naive) => *naive,
        }
    }
}

/// 23:59:59.999 wall-clock on `date`
fn last_moment(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1)
}

fn parse_bound(
    field: &'static str,
    raw: Option<&str>,
    tz: Tz,
) -> Result<Option<NaiveDate>, InvalidRangeError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => time::parse_date(value, tz)
            .map(Some)
            .ok_or_else(|| InvalidRangeError::InvalidDate {
                field,
                value: value.to_string(),
            }),
    }
}

/// Resolve query bounds into a [`TimeRange`]
///
/// Empty strings count as missing. A start that falls after the end is
/// rejected rather than swapped.
pub fn resolve(
    start: Option<&str>,
    end: Option<&str>,
    policy: RangePolicy,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<TimeRange, InvalidRangeError> {
    let start_date = parse_bound("startDate", start, tz)?;
    let end_date = parse_bound("endDate", end, tz)?;
    let today = time::local_date(now, tz);

    let (start_bound, end_bound) = match policy {
        RangePolicy::Today => (
            Bound::Date(start_date.unwrap_or(today)),
            Bound::Date(end_date.unwrap_or(today)),
        ),
        RangePolicy::TrailingDays(n) => {
            let start = match (start_date, end_date) {
                (Some(start), _) => Bound::Date(start),
                (None, Some(end)) => Bound::Local(last_moment(end) - Duration::days(n)),
                (None, None) => Bound::Instant(now - Duration::days(n)),
            };
            (start, end_date.map(Bound::Date).unwrap_or(Bound::Instant(now)))
        }
    };

    let start_instant = match &start_bound {
        Bound::Date(d) => time::day_start(*d, tz),
        Bound::Instant(i) => *i,
        Bound::Local(naive) => time::local_to_utc(*naive, tz),
    };
    let end_instant = match &end_bound {
        Bound::Date(d) => time::day_end(*d, tz),
        Bound::Instant(i) => *i,
        Bound::Local(naive) => time::local_to_utc(*naive, tz),
    };

    if start_instant > end_instant {
        return Err(InvalidRangeError::Inverted {
            start: start_instant,
            end: end_instant,
        });
    }

    let span_ms = (end_bound.anchor(tz) - start_bound.anchor(tz))
        .num_milliseconds()
        .max(0);
    let days = (span_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY + 1;

    Ok(TimeRange::new(start_instant, end_instant, days, tz))
}
