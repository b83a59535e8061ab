//! Grouping key functions
//!
//! Pure mappings from a timestamp to a bucket key, evaluated in the business
//! timezone. Records that carry a business date instead of a timestamp are
//! keyed from that date as is. Categorical keys (category, payment method, product id) are plain
//! field reads and live next to the report that uses them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

/// Names indexed by `day_of_week - 1`
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Week-of-year convention for `YYYY-Www` keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekNumbering {
    /// Weeks start on Sunday; days before the first Sunday are week 00 (`%U`)
    #[default]
    Sunday,
    /// ISO 8601 weeks; the key uses the ISO week-based year
    Iso,
}

impl FromStr for WeekNumbering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" => Ok(Self::Sunday),
            "iso" => Ok(Self::Iso),
            other => Err(format!("unknown week numbering: {other}")),
        }
    }
}

/// Time bucket for over-time reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    Hour,
    Day,
    Week,
    Month,
}

impl TimeBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl FromStr for TimeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!("unknown bucket: {other}")),
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business calendar: timezone + week convention
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    pub tz: Tz,
    pub weeks: WeekNumbering,
}

impl Calendar {
    pub fn new(tz: Tz, weeks: WeekNumbering) -> Self {
        Self { tz, weeks }
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// `YYYY-MM-DD`
    pub fn day_key(&self, instant: DateTime<Utc>) -> String {
        self.date_key(self.local_date(instant), TimeBucket::Day)
    }

    /// `YYYY-MM-DD HH:00`
    pub fn hour_key(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.tz)
            .format("%Y-%m-%d %H:00")
            .to_string()
    }

    /// `YYYY-Www`
    pub fn week_key(&self, instant: DateTime<Utc>) -> String {
        self.date_key(self.local_date(instant), TimeBucket::Week)
    }

    /// `YYYY-MM`
    pub fn month_key(&self, instant: DateTime<Utc>) -> String {
        self.date_key(self.local_date(instant), TimeBucket::Month)
    }

    pub fn bucket_key(&self, instant: DateTime<Utc>, bucket: TimeBucket) -> String {
        match bucket {
            TimeBucket::Hour => self.hour_key(instant),
            _ => self.date_key(self.local_date(instant), bucket),
        }
    }

    /// Bucket key for a business date; `Hour` maps to the day's `00:00`
    pub fn date_key(&self, date: NaiveDate, bucket: TimeBucket) -> String {
        match bucket {
            TimeBucket::Hour => date.format("%Y-%m-%d 00:00").to_string(),
            TimeBucket::Day => date.format("%Y-%m-%d").to_string(),
            TimeBucket::Week => match self.weeks {
                WeekNumbering::Sunday => date.format("%Y-W%U").to_string(),
                WeekNumbering::Iso => {
                    let week = date.iso_week();
                    format!("{}-W{:02}", week.year(), week.week())
                }
            },
            TimeBucket::Month => date.format("%Y-%m").to_string(),
        }
    }

    /// Local hour of day, 0-23
    pub fn hour_of_day(&self, instant: DateTime<Utc>) -> u32 {
        instant.with_timezone(&self.tz).hour()
    }

    /// 1 (Sunday) - 7 (Saturday)
    pub fn day_of_week(&self, instant: DateTime<Utc>) -> u32 {
        instant
            .with_timezone(&self.tz)
            .weekday()
            .number_from_sunday()
    }
}

/// Name for a 1-based day-of-week number; `None` outside 1..=7
pub fn weekday_name(day_number: u32) -> Option<&'static str> {
    let idx = usize::try_from(day_number.checked_sub(1)?).ok()?;
    WEEKDAY_NAMES.get(idx).copied()
}
