//! Downsampling of the daily value series to coarser reporting intervals.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::portfolio::valuation::ValuationPoint;

/// Reporting interval for chart output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportingInterval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
    #[serde(rename = "5d")]
    FiveDay,
    #[serde(rename = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    Monthly,
    #[serde(rename = "3mo")]
    Quarterly,
}

/// Bucket identity for one interval. Consecutive days mapping to the same
/// key collapse into one output point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BucketKey {
    Day(NaiveDate),
    FiveDay(i64),
    IsoWeek { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
}

fn bucket_key(date: NaiveDate, interval: ReportingInterval, anchor: NaiveDate) -> BucketKey {
    match interval {
        ReportingInterval::Daily => BucketKey::Day(date),
        ReportingInterval::FiveDay => {
            let offset = (date - anchor).num_days();
            BucketKey::FiveDay(offset.div_euclid(5))
        }
        ReportingInterval::Weekly => {
            let iso = date.iso_week();
            BucketKey::IsoWeek {
                year: iso.year(),
                week: iso.week(),
            }
        }
        ReportingInterval::Monthly => BucketKey::Month {
            year: date.year(),
            month: date.month(),
        },
        ReportingInterval::Quarterly => BucketKey::Quarter {
            year: date.year(),
            quarter: (date.month0() / 3) + 1,
        },
    }
}

/// Downsample a date-ordered daily series.
///
/// The last point of each bucket wins and keeps its own date, so the final
/// day of the series always survives. Five-day buckets are anchored at
/// `anchor` (the window start); weekly buckets follow ISO calendar weeks,
/// monthly and quarterly buckets the calendar. Resampling an already
/// resampled series is a no-op because one point per bucket maps back to
/// the same bucket.
pub fn resample(
    points: &[ValuationPoint],
    interval: ReportingInterval,
    anchor: NaiveDate,
) -> Vec<ValuationPoint> {
    if matches!(interval, ReportingInterval::Daily) {
        return points.to_vec();
    }

    let mut out: Vec<ValuationPoint> = Vec::new();
    let mut current: Option<BucketKey> = None;
    for point in points {
        let key = bucket_key(point.date, interval, anchor);
        if current == Some(key) {
            if let Some(last) = out.last_mut() {
                *last = point.clone();
            }
        } else {
            out.push(point.clone());
            current = Some(key);
        }
    }
    out
}
