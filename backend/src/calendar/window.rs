//! Visible time window resolution.
//!
//! The calendar surface shows one month, week, or day at a time; the window
//! derives solely from a reference instant and the active granularity and is
//! recomputed on every navigation or view change. All arithmetic is UTC.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Calendar view granularity, as the view layer names it.
///
/// `agenda` shares the day rule, and so does anything unrecognized coming
/// in from a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Month,
    Week,
    WorkWeek,
    Day,
    Agenda,
}

impl Granularity {
    /// Total over any input: unknown view names fall back to `day`.
    pub fn parse(s: &str) -> Self {
        match s {
            "month" => Granularity::Month,
            "week" => Granularity::Week,
            "work_week" => Granularity::WorkWeek,
            "agenda" => Granularity::Agenda,
            "day" => Granularity::Day,
            _ => Granularity::Day,
        }
    }
}

impl<'de> Deserialize<'de> for Granularity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Granularity::parse(&value))
    }
}

/// Inclusive visible interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Inclusive containment on both bounds.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// An event is admitted when either of its endpoints falls inside the
    /// window. The rule tests endpoints only: an event spanning past both
    /// bounds is not admitted.
    pub fn admits(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.contains(start) || self.contains(end)
    }
}

/// Resolve the visible window for a reference instant. Total over all
/// granularities; there are no error cases.
pub fn resolve_window(reference: DateTime<Utc>, granularity: Granularity) -> TimeWindow {
    match granularity {
        Granularity::Month => month_window(reference),
        Granularity::Week | Granularity::WorkWeek => week_window(reference),
        Granularity::Day | Granularity::Agenda => day_window(reference),
    }
}

fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Last representable instant before `next_start` at millisecond precision.
fn last_instant_before(next_start: DateTime<Utc>) -> DateTime<Utc> {
    next_start - Duration::milliseconds(1)
}

fn day_window(reference: DateTime<Utc>) -> TimeWindow {
    let start = start_of_day(reference);
    TimeWindow {
        start,
        end: last_instant_before(start + Duration::days(1)),
    }
}

/// Weeks start on Sunday.
fn week_window(reference: DateTime<Utc>) -> TimeWindow {
    let back = reference.weekday().num_days_from_sunday() as i64;
    let start = start_of_day(reference) - Duration::days(back);
    TimeWindow {
        start,
        end: last_instant_before(start + Duration::days(7)),
    }
}

fn month_window(reference: DateTime<Utc>) -> TimeWindow {
    let date = reference.date_naive();
    let first = date - Days::new(u64::from(date.day0()));
    let next_month_first = first + Months::new(1);
    TimeWindow {
        start: first.and_time(NaiveTime::MIN).and_utc(),
        end: last_instant_before(next_month_first.and_time(NaiveTime::MIN).and_utc()),
    }
}
