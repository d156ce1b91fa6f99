//! Derivations over a fetched snapshot.
//!
//! Everything here is pure: it takes decoded records and returns
//! presentation-ready values. Nothing is cached, callers recompute on read.

pub mod air_quality;
pub mod buckets;
pub mod dms;
pub mod time;

pub use air_quality::{PollutantColumns, aqi_label, aqi_series, pollutant_columns};
pub use buckets::{
    BucketOptions, Grouping, LabelStyle, bucket_forecast, icon_url, ordered_buckets,
    rotated_week, weekday_from_sunday_index, weekday_label,
};
pub use dms::{Axis, Dms, Hemisphere, format_coordinates};
pub use time::{format_local_hm, format_offset_hours, format_utc_hm};
