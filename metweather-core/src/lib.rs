//! Core library for the `metweather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client behind the [`WeatherApi`] seam
//! - Location resolution and the four-resource snapshot fetch
//! - Forecast bucketing and display formatting over a fetched snapshot
//! - The search/tap session with stale-result protection
//!
//! It is used by `metweather-cli`, but can also be reused by other front ends.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod provider;
pub mod report;
pub mod resolver;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::{Clock, Config, ForecastConfig, Units};
pub use error::{DerivationError, FetchError};
pub use fetcher::{SnapshotResults, fetch_all};
pub use model::{
    AirQualityForecastSeries, AirQualitySample, AqiPoint, AqiReading, Coordinates,
    CurrentConditions, DailyBucket, ForecastEntry, ForecastSnapshot, HourlyBucket, Pollutants,
    ResolvedLocation, Snapshot,
};
pub use provider::{OpenWeatherClient, WeatherApi};
pub use report::WeatherReport;
pub use resolver::{Resolution, resolve_by_coordinates, resolve_by_name};
pub use session::{ActionOutcome, Phase, Session};
