use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::DerivationError,
    model::{DailyBucket, ForecastEntry, HourlyBucket},
};

use super::time::shifted_datetime;

const SHORT_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const FULL_LABELS: [&str; 7] =
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

/// What forecast entries are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Grouping {
    /// Weekday label only. Entries a week apart share a bucket.
    #[default]
    Weekday,
    CalendarDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// `Mon`
    #[default]
    Short,
    /// `Monday`
    Full,
}

impl LabelStyle {
    fn labels(&self) -> &'static [&'static str; 7] {
        match self {
            LabelStyle::Short => &SHORT_LABELS,
            LabelStyle::Full => &FULL_LABELS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BucketOptions {
    pub grouping: Grouping,
    pub labels: LabelStyle,
    pub hourly: bool,
    /// Added to every timestamp before it is turned into a date and hour.
    pub utc_offset_secs: i64,
}

/// English (Ireland) weekday name.
pub fn weekday_label(day: Weekday, style: LabelStyle) -> &'static str {
    style.labels()[day.num_days_from_sunday() as usize]
}

/// Gregorian weekday index as used by calendar APIs: 1 is Sunday, 7 is Saturday.
pub fn weekday_from_sunday_index(index: u32) -> Option<Weekday> {
    match index {
        1 => Some(Weekday::Sun),
        2 => Some(Weekday::Mon),
        3 => Some(Weekday::Tue),
        4 => Some(Weekday::Wed),
        5 => Some(Weekday::Thu),
        6 => Some(Weekday::Fri),
        7 => Some(Weekday::Sat),
        _ => None,
    }
}

/// The seven weekday labels, starting today and wrapping around.
pub fn rotated_week(today: Weekday, style: LabelStyle) -> [&'static str; 7] {
    let labels = style.labels();
    let start = today.num_days_from_sunday() as usize;
    std::array::from_fn(|i| labels[(start + i) % labels.len()])
}

pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{icon}@2x.png")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum BucketKey {
    Label(&'static str),
    Date(NaiveDate),
}

/// Group forecast entries into daily min/max buckets.
///
/// Buckets come out in the order their key was first seen, except for
/// calendar-date grouping which is sorted by date. Temperatures are truncated
/// to whole degrees. Any entry whose timestamp cannot be turned into a date
/// fails the whole derivation.
pub fn bucket_forecast(
    entries: &[ForecastEntry],
    options: &BucketOptions,
) -> Result<Vec<DailyBucket>, DerivationError> {
    let mut by_key: IndexMap<BucketKey, DailyBucket> = IndexMap::new();

    for entry in entries {
        let at = shifted_datetime(entry.timestamp, options.utc_offset_secs)?;

        let date = at.date_naive();
        let label = weekday_label(date.weekday(), options.labels);
        let key = match options.grouping {
            Grouping::Weekday => BucketKey::Label(label),
            Grouping::CalendarDate => BucketKey::Date(date),
        };

        let min = entry.temp_min as i32;
        let max = entry.temp_max as i32;

        let bucket = by_key.entry(key).or_insert_with(|| DailyBucket {
            label: label.to_string(),
            date: matches!(key, BucketKey::Date(_)).then_some(date),
            min,
            max,
            hourly: options.hourly.then(Vec::new),
        });

        bucket.min = bucket.min.min(min);
        bucket.max = bucket.max.max(max);

        if let Some(hourly) = bucket.hourly.as_mut() {
            hourly.push(HourlyBucket {
                hour: format!("{}H", at.hour()),
                icon_url: icon_url(entry.icon.as_deref().unwrap_or_default()),
                min,
                max,
            });
        }
    }

    let mut buckets: Vec<DailyBucket> = by_key.into_values().collect();
    if options.grouping == Grouping::CalendarDate {
        buckets.sort_by_key(|b| b.date);
    }

    Ok(buckets)
}

/// Buckets in display order for a week starting `today`.
///
/// Weekday buckets follow [`rotated_week`]; labels with no bucket are skipped,
/// never synthesized. Date buckets are already chronological.
pub fn ordered_buckets<'a>(
    buckets: &'a [DailyBucket],
    today: Weekday,
    options: &BucketOptions,
) -> Vec<&'a DailyBucket> {
    match options.grouping {
        Grouping::Weekday => rotated_week(today, options.labels)
            .iter()
            .filter_map(|label| buckets.iter().find(|b| b.label == *label))
            .collect(),
        Grouping::CalendarDate => buckets.iter().collect(),
    }
}
