//! Week bucketing.
//!
//! Points are grouped by a `(week, year)` pair computed with a simple
//! "weeks since January 1, offset by January 1's weekday" rule. This is not
//! ISO-8601: existing weekly records were keyed with exactly this arithmetic,
//! so it must not be swapped for a library week number.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: f64 = 86_400_000.0;

/// One scoring period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekBucket {
    pub week: u32,
    pub year: i32,
}

impl fmt::Display for WeekBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl Ord for WeekBucket {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.week).cmp(&(other.year, other.week))
    }
}

impl PartialOrd for WeekBucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Resolve the bucket `now` falls into, in `now`'s own time zone.
///
/// `week = ceil((days_since_jan1 + weekday_of_jan1 + 1) / 7)` where
/// `days_since_jan1` is fractional (the time of day counts) and weekdays run
/// Sunday = 0 through Saturday = 6. As a consequence a bucket boundary falls
/// at the exact midnight that starts each Saturday: any later instant that
/// day already belongs to the next week.
pub fn week_bucket<Tz: TimeZone>(now: &DateTime<Tz>) -> WeekBucket {
    let year = now.year();
    let jan1 = start_of_year(now);

    let elapsed_ms = now.timestamp_millis() - jan1.timestamp_millis();
    let days_since_jan1 = elapsed_ms as f64 / MS_PER_DAY;
    let jan1_weekday = f64::from(jan1.weekday().num_days_from_sunday());

    let week = ((days_since_jan1 + jan1_weekday + 1.0) / 7.0).ceil();

    WeekBucket {
        week: week as u32,
        year,
    }
}

/// Local midnight of January 1 in `now`'s year and time zone.
fn start_of_year<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let date = now.date_naive();
    let jan1 = date - TimeDelta::days(i64::from(date.ordinal0()));
    let midnight = jan1.and_time(NaiveTime::default());

    // Clocks may skip midnight; the year then starts at the first quarter
    // hour that exists locally.
    (0..=96)
        .map(|quarter| midnight + TimeDelta::minutes(15 * quarter))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}
