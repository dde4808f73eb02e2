use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::portfolio::valuation::ValuationPoint;

use super::{resample, ReportingInterval};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily_series(start: NaiveDate, values: &[Decimal]) -> Vec<ValuationPoint> {
    start
        .iter_days()
        .zip(values.iter())
        .map(|(date, value)| ValuationPoint { date, value: *value })
        .collect()
}

#[test]
fn test_daily_is_passthrough() {
    let points = daily_series(date(2024, 1, 1), &[dec!(1), dec!(2), dec!(3)]);
    let out = resample(&points, ReportingInterval::Daily, date(2024, 1, 1));
    assert_eq!(out, points);
}

#[test]
fn test_five_day_buckets_anchor_at_window_start() {
    let values: Vec<Decimal> = (1..=12).map(Decimal::from).collect();
    let points = daily_series(date(2024, 1, 1), &values);
    let out = resample(&points, ReportingInterval::FiveDay, date(2024, 1, 1));

    // Days 1-5, 6-10, 11-12; last of each bucket wins.
    let picked: Vec<Decimal> = out.iter().map(|p| p.value).collect();
    assert_eq!(picked, vec![dec!(5), dec!(10), dec!(12)]);
    assert_eq!(out[0].date, date(2024, 1, 5));
    assert_eq!(out[2].date, date(2024, 1, 12));
}

#[test]
fn test_weekly_buckets_follow_iso_weeks() {
    // 2024-01-01 is a Monday; the first ISO week runs through Sunday the 7th.
    let values: Vec<Decimal> = (1..=10).map(Decimal::from).collect();
    let points = daily_series(date(2024, 1, 1), &values);
    let out = resample(&points, ReportingInterval::Weekly, date(2024, 1, 1));

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].date, date(2024, 1, 7));
    assert_eq!(out[0].value, dec!(7));
    assert_eq!(out[1].date, date(2024, 1, 10));
}

#[test]
fn test_monthly_buckets_follow_calendar_months() {
    let values: Vec<Decimal> = (1..=45).map(Decimal::from).collect();
    let points = daily_series(date(2024, 1, 20), &values);
    let out = resample(&points, ReportingInterval::Monthly, date(2024, 1, 20));

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].date, date(2024, 1, 31));
    assert_eq!(out[1].date, date(2024, 2, 29));
    assert_eq!(out[2].date, date(2024, 3, 4));
}

#[test]
fn test_quarterly_buckets() {
    let points = vec![
        ValuationPoint { date: date(2024, 2, 15), value: dec!(1) },
        ValuationPoint { date: date(2024, 3, 29), value: dec!(2) },
        ValuationPoint { date: date(2024, 4, 1), value: dec!(3) },
        ValuationPoint { date: date(2024, 7, 10), value: dec!(4) },
    ];
    let out = resample(&points, ReportingInterval::Quarterly, date(2024, 2, 15));

    let dates: Vec<NaiveDate> = out.iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![date(2024, 3, 29), date(2024, 4, 1), date(2024, 7, 10)]);
}

#[test]
fn test_last_series_point_always_survives() {
    let values: Vec<Decimal> = (1..=23).map(Decimal::from).collect();
    let points = daily_series(date(2024, 3, 1), &values);
    for interval in [
        ReportingInterval::FiveDay,
        ReportingInterval::Weekly,
        ReportingInterval::Monthly,
        ReportingInterval::Quarterly,
    ] {
        let out = resample(&points, interval, date(2024, 3, 1));
        assert_eq!(out.last(), points.last());
    }
}

#[test]
fn test_empty_input() {
    assert!(resample(&[], ReportingInterval::Weekly, date(2024, 1, 1)).is_empty());
}

#[test]
fn test_interval_serde_tokens() {
    assert_eq!(
        serde_json::to_string(&ReportingInterval::Weekly).unwrap(),
        "\"1wk\""
    );
    let interval: ReportingInterval = serde_json::from_str("\"3mo\"").unwrap();
    assert_eq!(interval, ReportingInterval::Quarterly);
}

proptest! {
    #[test]
    fn test_resample_is_idempotent(
        len in 1usize..120,
        start_offset in 0i64..1000,
        interval_idx in 0usize..5,
    ) {
        let interval = [
            ReportingInterval::Daily,
            ReportingInterval::FiveDay,
            ReportingInterval::Weekly,
            ReportingInterval::Monthly,
            ReportingInterval::Quarterly,
        ][interval_idx];
        let anchor = date(2023, 1, 1) + chrono::Duration::days(start_offset);
        let values: Vec<Decimal> = (0..len as i64).map(Decimal::from).collect();
        let points = daily_series(anchor, &values);

        let once = resample(&points, interval, anchor);
        let twice = resample(&once, interval, anchor);
        prop_assert_eq!(once, twice);
    }
}
