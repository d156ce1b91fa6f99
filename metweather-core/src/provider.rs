use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::FetchError,
    model::{
        AirQualityForecastSeries, AirQualitySample, Coordinates, CurrentConditions,
        ForecastSnapshot, ResolvedLocation,
    },
};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Read-only access to the upstream weather API.
///
/// Implementations hand back decoded domain records; nothing above this trait
/// sees HTTP or JSON.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Direct geocoding, at most `limit` matches, best first.
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<ResolvedLocation>, FetchError>;

    async fn reverse_geocode(
        &self,
        at: Coordinates,
        limit: u8,
    ) -> Result<Vec<ResolvedLocation>, FetchError>;

    async fn current(&self, at: Coordinates) -> Result<CurrentConditions, FetchError>;

    async fn air_quality(&self, at: Coordinates) -> Result<AirQualitySample, FetchError>;

    async fn forecast(&self, at: Coordinates) -> Result<ForecastSnapshot, FetchError>;

    async fn air_quality_forecast(
        &self,
        at: Coordinates,
    ) -> Result<AirQualityForecastSeries, FetchError>;
}
