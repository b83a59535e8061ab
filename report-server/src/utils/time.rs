//! Time helpers - business timezone conversion
//!
//! All calendar math (day boundaries, hour of day, week numbers) happens in
//! the configured business timezone; instants are stored and compared in UTC.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a query date: `YYYY-MM-DD`, or an RFC 3339 timestamp whose calendar
/// date in `tz` is used.
pub fn parse_date(value: &str, tz: Tz) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&tz).date_naive())
}

/// Local wall-clock time → UTC instant (business timezone)
///
/// DST gap fallback: if the local time does not exist, interpret it as UTC.
pub fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// First instant (00:00:00.000) of `date` in `tz`
pub fn day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    local_to_utc(date.and_time(chrono::NaiveTime::MIN), tz)
}

/// Last instant (23:59:59.999) of `date` in `tz`
pub fn day_end(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let next = date.succ_opt().unwrap_or(date);
    day_start(next, tz) - Duration::milliseconds(1)
}

/// Calendar date of `instant` in `tz`
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}
