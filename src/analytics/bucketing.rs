use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::Period;

/// Monday of the week containing `date`. A Sunday steps back six days.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First day of the calendar month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// January 1 of the calendar year containing `date`.
pub fn year_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// Canonical bucket key for a date at the given granularity.
pub fn bucket_key(date: NaiveDate, period: Period) -> NaiveDate {
    match period {
        Period::Daily => date,
        Period::Weekly => week_start(date),
        Period::Monthly => month_start(date),
        Period::Yearly => year_start(date),
    }
}

/// Week-of-month index, 1-based: ceil(day-of-month / 7).
pub fn week_of_month(date: NaiveDate) -> u32 {
    (date.day() + 6) / 7
}

/// Group items into buckets keyed by canonical period start, ascending.
///
/// Items whose `date_of` yields `None` are skipped silently: upstream
/// collections may carry partially populated legacy records, and a
/// missing instant is not an error.
///
/// Only buckets with at least one item are emitted — no zero-filled gaps.
pub fn bucket_by<T, F>(items: Vec<T>, period: Period, date_of: F) -> Vec<(NaiveDate, Vec<T>)>
where
    F: Fn(&T) -> Option<NaiveDate>,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for item in items {
        let Some(date) = date_of(&item) else { continue };
        buckets.entry(bucket_key(date, period)).or_default().push(item);
    }
    buckets.into_iter().collect()
}

/// Chart label for a month bucket, e.g. "Apr 2025".
pub fn month_label(month: NaiveDate) -> String {
    month.format("%b %Y").to_string()
}

/// Chart label for a week-of-month bucket, e.g. "Week 2".
pub fn week_label(week: u32) -> String {
    format!("Week {week}")
}
