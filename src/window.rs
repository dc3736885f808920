//! Time-window arithmetic for digest generation.
//!
//! A [`Window`] carries the inclusive start/end boundaries of one digest
//! period plus its canonical identifier and human-readable labels:
//!
//! | Kind | Boundaries | Id |
//! |------|-----------|----|
//! | Daily | calendar day | `YY-MM-DD` |
//! | Weekly | ISO-8601 week, Monday through Sunday | `YY-W` (unpadded week) |
//! | Monthly | calendar month | `YY-MM` |
//!
//! Weekly ids pair the ISO week number with the ISO week-year, so the first
//! days of January can belong to the previous year's final week and vice
//! versa.
//!
//! All arithmetic is done on naive UTC dates, keeping window computation a
//! pure function of the reference date. Outside backfill, weekly and monthly
//! generation target the most recently *completed* period; daily targets the
//! current day.

use crate::models::DigestKind;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Default trailing periods per kind in backfill mode.
pub const DEFAULT_BACKFILL_DAYS: usize = 7;
pub const DEFAULT_BACKFILL_WEEKS: usize = 4;
pub const DEFAULT_BACKFILL_MONTHS: usize = 2;

/// One digest period: inclusive bounds, canonical id, and display labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub kind: DigestKind,
    /// First instant of the period (00:00:00.000).
    pub start: NaiveDateTime,
    /// Last instant of the period (23:59:59.999).
    pub end: NaiveDateTime,
    /// Canonical period identifier.
    pub id: String,
    /// Human-readable digest title.
    pub title: String,
    /// Human-readable period label.
    pub date_range: String,
}

impl Window {
    /// The calendar-day window containing `date`.
    pub fn daily(date: NaiveDate) -> Window {
        Window {
            kind: DigestKind::Daily,
            start: day_start(date),
            end: day_end(date),
            id: format!("{:02}-{:02}-{:02}", date.year() % 100, date.month(), date.day()),
            title: format!("Daily Tech Digest - {}", date.format("%B %-d, %Y")),
            date_range: date.format("%B %-d, %Y").to_string(),
        }
    }

    /// The ISO-8601 week window containing `date`, Monday through Sunday.
    pub fn weekly(date: NaiveDate) -> Window {
        let iso = date.iso_week();
        let monday = NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
            .expect("valid ISO week from iso_week()");
        let sunday = monday + Duration::days(6);
        Window {
            kind: DigestKind::Weekly,
            start: day_start(monday),
            end: day_end(sunday),
            id: format!("{:02}-{}", iso.year() % 100, iso.week()),
            title: format!("Weekly Tech Digest - Week {} of {}", iso.week(), iso.year()),
            date_range: format!(
                "{} - {}",
                monday.format("%b %-d"),
                sunday.format("%b %-d, %Y")
            ),
        }
    }

    /// The calendar-month window containing `date`.
    pub fn monthly(date: NaiveDate) -> Window {
        let first = date.with_day(1).expect("day 1 exists in every month");
        let last = last_day_of_month(first);
        Window {
            kind: DigestKind::Monthly,
            start: day_start(first),
            end: day_end(last),
            id: format!("{:02}-{:02}", first.year() % 100, first.month()),
            title: format!("Monthly Tech Digest - {}", first.format("%B %Y")),
            date_range: first.format("%B %Y").to_string(),
        }
    }

    /// Whether a timestamp falls inside this window, boundaries included.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// The window a normal (non-backfill) run generates for `kind`.
///
/// Daily targets the current day; weekly and monthly target the most
/// recently completed week and month.
pub fn target_window(kind: DigestKind, today: NaiveDate) -> Window {
    match kind {
        DigestKind::Daily => Window::daily(today),
        DigestKind::Weekly => Window::weekly(today - Duration::days(7)),
        DigestKind::Monthly => Window::monthly(previous_month_anchor(today)),
    }
}

/// The trailing `count` windows of one granularity, newest first.
///
/// The first entry is the same window [`target_window`] yields, so backfill
/// subsumes the normal run for that kind.
pub fn backfill_windows(kind: DigestKind, today: NaiveDate, count: usize) -> Vec<Window> {
    (0..count)
        .map(|i| match kind {
            DigestKind::Daily => Window::daily(today - Duration::days(i as i64)),
            DigestKind::Weekly => Window::weekly(today - Duration::days(7 * (i as i64 + 1))),
            DigestKind::Monthly => {
                let mut anchor = today;
                for _ in 0..=i {
                    anchor = previous_month_anchor(anchor);
                }
                Window::monthly(anchor)
            }
        })
        .collect()
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).expect("midnight exists")
}

fn day_end(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day exists")
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let next_first = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .expect("first of next month exists");
    next_first - Duration::days(1)
}

/// A date inside the month before the one containing `date`.
fn previous_month_anchor(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month") - Duration::days(1)
}
