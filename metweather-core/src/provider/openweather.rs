use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    config::{Config, DEFAULT_BASE_URL, Units},
    error::FetchError,
    model::{
        AirQualityForecastSeries, AirQualitySample, AqiPoint, Coordinates, CurrentConditions,
        ForecastEntry, ForecastSnapshot, Pollutants, ResolvedLocation,
    },
};

use super::WeatherApi;

/// OpenWeatherMap 2.5 client (free tier endpoints only).
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    units: Units,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            units: Units::Metric,
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: config.api_key()?.to_string(),
            base_url: config.base_url.clone(),
            units: config.units,
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        tracing::debug!(resource, url = %url, "Requesting OpenWeatherMap");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| FetchError::Transport { resource, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { resource, source })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                resource,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { resource, source })
    }

    fn point_query(&self, at: Coordinates, with_units: bool) -> Vec<(&'static str, String)> {
        let mut query = vec![("lat", at.latitude.to_string()), ("lon", at.longitude.to_string())];
        if with_units {
            query.push(("units", self.units.as_str().to_string()));
        }
        query
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoLocation {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
    state: Option<String>,
}

impl From<OwGeoLocation> for ResolvedLocation {
    fn from(g: OwGeoLocation) -> Self {
        ResolvedLocation {
            name: g.name,
            state: g.state,
            country: g.country,
            latitude: g.lat,
            longitude: g.lon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: Option<u32>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    #[serde(default)]
    pressure: u32,
    #[serde(default)]
    humidity: u32,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: u32,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    #[serde(default)]
    all: u32,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: OwMain,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    dt: i64,
    sys: OwSys,
    #[serde(default)]
    timezone: i64,
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(r: OwCurrentResponse) -> Self {
        let weather = r.weather.into_iter().next();
        let (condition_id, description, icon) = match weather {
            Some(w) => (w.id, w.description, w.icon),
            None => (None, None, None),
        };

        CurrentConditions {
            temperature: r.main.temp,
            temp_min: r.main.temp_min,
            temp_max: r.main.temp_max,
            feels_like: r.main.feels_like,
            humidity: r.main.humidity,
            pressure: r.main.pressure,
            cloud_cover_pct: r.clouds.all,
            wind_speed: r.wind.speed,
            wind_deg: r.wind.deg,
            description,
            condition_id,
            icon,
            sunrise: r.sys.sunrise,
            sunset: r.sys.sunset,
            utc_offset_secs: r.timezone,
            country: r.sys.country,
            observed_at: r.dt,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwAqiMain {
    aqi: i32,
}

#[derive(Debug, Deserialize)]
struct OwComponents {
    co: f64,
    no: f64,
    no2: f64,
    o3: f64,
    so2: f64,
    pm2_5: f64,
    pm10: f64,
    nh3: f64,
}

#[derive(Debug, Deserialize)]
struct OwPollutionEntry {
    main: OwAqiMain,
    components: OwComponents,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwPollutionResponse {
    #[serde(default)]
    list: Vec<OwPollutionEntry>,
}

impl From<OwPollutionEntry> for AirQualitySample {
    fn from(e: OwPollutionEntry) -> Self {
        let c = e.components;
        AirQualitySample {
            timestamp: e.dt,
            aqi: e.main.aqi,
            pollutants: Pollutants {
                co: c.co,
                no: c.no,
                no2: c.no2,
                o3: c.o3,
                so2: c.so2,
                pm2_5: c.pm2_5,
                pm10: c.pm10,
                nh3: c.nh3,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct OwCity {
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
    #[serde(default)]
    city: OwCity,
}

impl From<OwForecastResponse> for ForecastSnapshot {
    fn from(r: OwForecastResponse) -> Self {
        let entries = r
            .list
            .into_iter()
            .map(|e| ForecastEntry {
                timestamp: e.dt,
                temp: e.main.temp,
                temp_min: e.main.temp_min,
                temp_max: e.main.temp_max,
                icon: e.weather.into_iter().next().and_then(|w| w.icon),
            })
            .collect();

        ForecastSnapshot {
            entries,
            utc_offset_secs: r.city.timezone,
        }
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<ResolvedLocation>, FetchError> {
        let found: Vec<OwGeoLocation> = self
            .get_json(
                "direct geocoding",
                "geo/1.0/direct",
                &[("q", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        Ok(found.into_iter().map(ResolvedLocation::from).collect())
    }

    async fn reverse_geocode(
        &self,
        at: Coordinates,
        limit: u8,
    ) -> Result<Vec<ResolvedLocation>, FetchError> {
        let mut query = self.point_query(at, false);
        query.push(("limit", limit.to_string()));

        let found: Vec<OwGeoLocation> = self
            .get_json("reverse geocoding", "geo/1.0/reverse", &query)
            .await?;

        Ok(found.into_iter().map(ResolvedLocation::from).collect())
    }

    async fn current(&self, at: Coordinates) -> Result<CurrentConditions, FetchError> {
        let query = self.point_query(at, true);
        let parsed: OwCurrentResponse = self
            .get_json("current weather", "data/2.5/weather", &query)
            .await?;

        Ok(parsed.into())
    }

    async fn air_quality(&self, at: Coordinates) -> Result<AirQualitySample, FetchError> {
        const RESOURCE: &str = "air pollution";

        let query = self.point_query(at, false);
        let parsed: OwPollutionResponse = self
            .get_json(RESOURCE, "data/2.5/air_pollution", &query)
            .await?;

        parsed
            .list
            .into_iter()
            .next()
            .map(AirQualitySample::from)
            .ok_or(FetchError::EmptyResponse { resource: RESOURCE })
    }

    async fn forecast(&self, at: Coordinates) -> Result<ForecastSnapshot, FetchError> {
        let parsed: OwForecastResponse = self
            .get_json("forecast", "data/2.5/forecast", &self.point_query(at, true))
            .await?;

        Ok(parsed.into())
    }

    async fn air_quality_forecast(
        &self,
        at: Coordinates,
    ) -> Result<AirQualityForecastSeries, FetchError> {
        let parsed: OwPollutionResponse = self
            .get_json(
                "air pollution forecast",
                "data/2.5/air_pollution/forecast",
                &self.point_query(at, false),
            )
            .await?;

        let points = parsed
            .list
            .into_iter()
            .map(|e| AqiPoint {
                timestamp: e.dt,
                aqi: e.main.aqi,
            })
            .collect();

        Ok(AirQualityForecastSeries { points })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
