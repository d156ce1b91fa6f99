//! Display-ready fields over a [`Snapshot`].
//!
//! This is where fetch and derivation failures stop: every accessor hands back
//! `Option`, `None` meaning the section has no data to show.

use chrono::{DateTime, Datelike, Utc};

use crate::{
    aggregate::{
        self, BucketOptions, Grouping, PollutantColumns, aqi_label, aqi_series, bucket_forecast,
        format_coordinates, format_local_hm, format_offset_hours, format_utc_hm,
        pollutant_columns, time::shifted_datetime, weekday_label,
    },
    config::ForecastConfig,
    error::DerivationError,
    model::{AqiReading, CurrentConditions, DailyBucket, Snapshot},
};

pub const TODAY_LABEL: &str = "Today";

#[derive(Debug, Clone, Copy)]
pub struct WeatherReport<'a> {
    snapshot: &'a Snapshot,
    forecast: ForecastConfig,
}

impl<'a> WeatherReport<'a> {
    pub fn new(snapshot: &'a Snapshot, forecast: ForecastConfig) -> Self {
        Self { snapshot, forecast }
    }

    fn current(&self) -> Option<&'a CurrentConditions> {
        self.snapshot.current.as_ref()
    }

    pub fn location_name(&self) -> Option<String> {
        self.snapshot.location.as_ref().map(|l| l.display_name())
    }

    pub fn coordinates(&self) -> Option<String> {
        let location = self.snapshot.location.as_ref()?;
        Some(format_coordinates(location.latitude, location.longitude))
    }

    pub fn sunrise_utc(&self) -> Option<String> {
        derived("sunrise", format_utc_hm(self.current()?.sunrise))
    }

    pub fn sunrise_local(&self) -> Option<String> {
        let current = self.current()?;
        derived(
            "sunrise",
            format_local_hm(current.sunrise, current.utc_offset_secs),
        )
    }

    pub fn sunset_utc(&self) -> Option<String> {
        derived("sunset", format_utc_hm(self.current()?.sunset))
    }

    pub fn sunset_local(&self) -> Option<String> {
        let current = self.current()?;
        derived(
            "sunset",
            format_local_hm(current.sunset, current.utc_offset_secs),
        )
    }

    pub fn timezone(&self) -> Option<String> {
        Some(format_offset_hours(self.current()?.utc_offset_secs))
    }

    pub fn weather_description(&self) -> Option<String> {
        self.current()?.description.clone()
    }

    /// `10°`
    pub fn temperature(&self) -> Option<String> {
        Some(format!("{}°", self.current()?.temperature as i32))
    }

    /// `(L: 8° H: 12°)`
    pub fn low_high(&self) -> Option<String> {
        let current = self.current()?;
        let (low, high) = (current.temp_min as i32, current.temp_max as i32);
        Some(format!("(L: {low}° H: {high}°)"))
    }

    pub fn feels_like(&self) -> Option<String> {
        Some(format!("Feels {}°", self.current()?.feels_like as i32))
    }

    pub fn cloud_coverage(&self) -> Option<String> {
        Some(format!("{}% coverage", self.current()?.cloud_cover_pct))
    }

    pub fn wind(&self) -> Option<String> {
        let current = self.current()?;
        Some(format!("{:?} km/h, dir: {}°", current.wind_speed, current.wind_deg))
    }

    pub fn humidity(&self) -> Option<String> {
        Some(format!("{}%", self.current()?.humidity))
    }

    pub fn pressure(&self) -> Option<String> {
        Some(format!("{} hPa", self.current()?.pressure))
    }

    pub fn icon_url(&self) -> Option<String> {
        self.current()?.icon.as_deref().map(aggregate::icon_url)
    }

    pub fn air_quality(&self) -> Option<&'static str> {
        aqi_label(self.snapshot.air_quality.as_ref()?.aqi)
    }

    pub fn air_quality_details(&self) -> Option<PollutantColumns> {
        Some(pollutant_columns(&self.snapshot.air_quality.as_ref()?.pollutants))
    }

    pub fn bucket_options(&self) -> Option<BucketOptions> {
        let forecast = self.snapshot.forecast.as_ref()?;
        Some(self.forecast.bucket_options(forecast.utc_offset_secs))
    }

    /// Daily buckets in first-seen (or date) order.
    pub fn forecast(&self) -> Option<Vec<DailyBucket>> {
        let forecast = self.snapshot.forecast.as_ref()?;
        let options = self.forecast.bucket_options(forecast.utc_offset_secs);
        derived("forecast", bucket_forecast(&forecast.entries, &options))
    }

    /// Daily buckets in display order for the week containing `now`, with
    /// today's bucket relabelled "Today".
    pub fn ordered_forecast(&self, now: DateTime<Utc>) -> Option<Vec<DailyBucket>> {
        let options = self.bucket_options()?;
        let buckets = self.forecast()?;

        let local_now = derived(
            "forecast",
            shifted_datetime(now.timestamp(), options.utc_offset_secs),
        )?;
        let today = local_now.date_naive();
        let today_label = weekday_label(today.weekday(), options.labels);

        let ordered = aggregate::ordered_buckets(&buckets, today.weekday(), &options)
            .into_iter()
            .map(|bucket| {
                let is_today = match options.grouping {
                    Grouping::Weekday => bucket.label == today_label,
                    Grouping::CalendarDate => bucket.date == Some(today),
                };
                let mut bucket = bucket.clone();
                if is_today {
                    bucket.label = TODAY_LABEL.to_string();
                }
                bucket
            })
            .collect();

        Some(ordered)
    }

    pub fn air_quality_forecast(&self) -> Option<Vec<AqiReading>> {
        derived(
            "air quality forecast",
            aqi_series(self.snapshot.air_quality_forecast.as_ref()?),
        )
    }
}

fn derived<T>(section: &'static str, result: Result<T, DerivationError>) -> Option<T> {
    result
        .inspect_err(|err| tracing::debug!(section, error = %err, "Derivation failed"))
        .ok()
}
