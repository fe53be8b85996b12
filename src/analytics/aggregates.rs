use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::bucketing::{month_label, month_start, week_label, week_of_month};
use super::types::SeriesData;

/// Sum a projected integer field over a slice.
pub fn sum_by<T, F>(items: &[T], f: F) -> i64
where
    F: Fn(&T) -> i64,
{
    items.iter().map(f).sum()
}

/// Arithmetic mean, `None` on an empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Reduce dated quantity points into a monthly series plus a weekly
/// breakdown per month. Months are ascending; weeks ascend by
/// week-of-month index within each month. Months without points simply
/// do not appear.
pub fn monthly_with_weekly(
    points: &[(NaiveDate, i64)],
) -> (SeriesData, BTreeMap<String, SeriesData>) {
    let mut monthly: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut weekly: BTreeMap<NaiveDate, BTreeMap<u32, i64>> = BTreeMap::new();

    for &(date, quantity) in points {
        let month = month_start(date);
        *monthly.entry(month).or_default() += quantity;
        *weekly
            .entry(month)
            .or_default()
            .entry(week_of_month(date))
            .or_default() += quantity;
    }

    let mut series = SeriesData::default();
    let mut by_month = BTreeMap::new();

    for (month, total) in &monthly {
        let label = month_label(*month);
        series.labels.push(label.clone());
        series.values.push(*total);

        let mut week_series = SeriesData::default();
        if let Some(weeks) = weekly.get(month) {
            for (week, qty) in weeks {
                week_series.labels.push(week_label(*week));
                week_series.values.push(*qty);
            }
        }
        by_month.insert(label, week_series);
    }

    (series, by_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn sum_and_mean_basics() {
        assert_eq!(sum_by(&[1i64, 2, 3], |x| *x), 6);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn monthly_series_sums_and_orders() {
        let points = vec![
            (d(2025, 3, 5), 10),
            (d(2025, 1, 20), 7),
            (d(2025, 3, 18), 5),
        ];
        let (monthly, _) = monthly_with_weekly(&points);
        assert_eq!(monthly.labels, vec!["Jan 2025", "Mar 2025"]);
        assert_eq!(monthly.values, vec![7, 15]);
    }

    #[test]
    fn weekly_breakdown_within_month() {
        // Day 5 → week 1, day 18 → week 3, day 20 → week 3
        let points = vec![
            (d(2025, 3, 5), 10),
            (d(2025, 3, 18), 5),
            (d(2025, 3, 20), 2),
        ];
        let (_, by_month) = monthly_with_weekly(&points);
        let march = by_month.get("Mar 2025").unwrap();
        assert_eq!(march.labels, vec!["Week 1", "Week 3"]);
        assert_eq!(march.values, vec![10, 7]);
    }

    #[test]
    fn empty_points_give_empty_series() {
        let (monthly, by_month) = monthly_with_weekly(&[]);
        assert!(monthly.labels.is_empty());
        assert!(monthly.values.is_empty());
        assert!(by_month.is_empty());
    }
}
