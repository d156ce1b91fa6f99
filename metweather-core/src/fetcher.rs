use crate::{
    error::FetchError,
    model::{
        AirQualityForecastSeries, AirQualitySample, Coordinates, CurrentConditions,
        ForecastSnapshot, ResolvedLocation, Snapshot,
    },
    provider::WeatherApi,
};

/// The four resource fetches for one pair of coordinates, each with its own
/// outcome.
#[derive(Debug)]
pub struct SnapshotResults {
    pub at: Coordinates,
    pub current: Result<CurrentConditions, FetchError>,
    pub air_quality: Result<AirQualitySample, FetchError>,
    pub forecast: Result<ForecastSnapshot, FetchError>,
    pub air_quality_forecast: Result<AirQualityForecastSeries, FetchError>,
}

impl SnapshotResults {
    pub fn failures(&self) -> Vec<&FetchError> {
        [
            self.current.as_ref().err(),
            self.air_quality.as_ref().err(),
            self.forecast.as_ref().err(),
            self.air_quality_forecast.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }

    /// Drop the error detail; failed resources become absent fields.
    pub fn into_snapshot(self, location: Option<ResolvedLocation>) -> Snapshot {
        Snapshot {
            location,
            current: self.current.ok(),
            air_quality: self.air_quality.ok(),
            forecast: self.forecast.ok(),
            air_quality_forecast: self.air_quality_forecast.ok(),
        }
    }
}

/// Fetch all four resources for `at` concurrently. Returns once every fetch has
/// settled; a failure never cancels its siblings.
pub async fn fetch_all(api: &dyn WeatherApi, at: Coordinates) -> SnapshotResults {
    tracing::debug!(
        lat = at.latitude,
        lon = at.longitude,
        "Fetching weather snapshot"
    );

    let (current, air_quality, forecast, air_quality_forecast) = tokio::join!(
        api.current(at),
        api.air_quality(at),
        api.forecast(at),
        api.air_quality_forecast(at),
    );

    let results = SnapshotResults {
        at,
        current,
        air_quality,
        forecast,
        air_quality_forecast,
    };

    for err in results.failures() {
        tracing::warn!(resource = err.resource(), error = %err, "Weather resource unavailable");
    }

    results
}
