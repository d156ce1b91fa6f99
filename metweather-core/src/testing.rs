//! In-memory `WeatherApi` for unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::{collections::HashSet, sync::Arc};
use tokio::sync::Notify;

use crate::{
    error::FetchError,
    model::{
        AirQualityForecastSeries, AirQualitySample, AqiPoint, Coordinates, CurrentConditions,
        ForecastEntry, ForecastSnapshot, Pollutants, ResolvedLocation,
    },
    provider::WeatherApi,
};

/// Parks a call until the test releases it.
#[derive(Debug, Clone)]
pub(crate) struct Gate {
    key: String,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl Gate {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    async fn pass(&self, key: &str) {
        if self.key == key {
            self.entered.notify_one();
            self.release.notified().await;
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    places: Vec<ResolvedLocation>,
    fail_geocode: bool,
    failing: HashSet<&'static str>,
    geocode_gate: Option<Gate>,
    current_gate: Option<Gate>,
    geocode_limits: Mutex<Vec<u8>>,
    fetched_at: Mutex<Vec<Coordinates>>,
}

impl FakeApi {
    pub fn dublin() -> Self {
        Self::default().with_place("Dublin", "IE", 53.3498, -6.2603)
    }

    pub fn with_place(mut self, name: &str, country: &str, latitude: f64, longitude: f64) -> Self {
        self.places.push(ResolvedLocation {
            name: name.into(),
            state: None,
            country: country.into(),
            latitude,
            longitude,
        });
        self
    }

    pub fn failing_geocode(mut self) -> Self {
        self.fail_geocode = true;
        self
    }

    /// Make one of "current", "air_quality", "forecast" or
    /// "air_quality_forecast" fail.
    pub fn failing(mut self, resource: &'static str) -> Self {
        self.failing.insert(resource);
        self
    }

    pub fn gate_geocode(&mut self, query: &str) -> Gate {
        let gate = Gate::new(query);
        self.geocode_gate = Some(gate.clone());
        gate
    }

    pub fn gate_current(&mut self, latitude: f64) -> Gate {
        let gate = Gate::new(latitude.to_string());
        self.current_gate = Some(gate.clone());
        gate
    }

    pub fn geocode_limits(&self) -> Vec<u8> {
        self.geocode_limits.lock().clone()
    }

    pub fn fetched_at(&self) -> Vec<Coordinates> {
        self.fetched_at.lock().clone()
    }

    fn check(&self, resource: &'static str) -> Result<(), FetchError> {
        if self.failing.contains(resource) {
            return Err(FetchError::Status {
                resource,
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}

pub(crate) fn dublin_current() -> CurrentConditions {
    CurrentConditions {
        temperature: 10.0,
        temp_min: 8.0,
        temp_max: 12.0,
        feels_like: 9.3,
        humidity: 81,
        pressure: 1012,
        cloud_cover_pct: 75,
        wind_speed: 5.14,
        wind_deg: 240,
        description: Some("broken clouds".into()),
        condition_id: Some(803),
        icon: Some("04d".into()),
        // 2023-11-14 07:30 and 16:20 UTC
        sunrise: 1699947000,
        sunset: 1699978800,
        utc_offset_secs: 0,
        country: Some("IE".into()),
        observed_at: 1699970000,
    }
}

pub(crate) fn dublin_forecast() -> ForecastSnapshot {
    // Starts Tuesday 2023-11-14 12:00 UTC, 3-hour steps.
    let start = 1699963200;
    let temps = [(9.2, 11.8), (8.1, 10.3), (6.4, 7.9), (5.0, 6.2), (4.4, 5.1), (3.9, 4.6)];

    let entries = temps
        .iter()
        .enumerate()
        .map(|(i, (min, max))| ForecastEntry {
            timestamp: start + i as i64 * 3 * 3600,
            temp: (min + max) / 2.0,
            temp_min: *min,
            temp_max: *max,
            icon: Some(if i < 2 { "04d" } else { "04n" }.into()),
        })
        .collect();

    ForecastSnapshot {
        entries,
        utc_offset_secs: 0,
    }
}

pub(crate) fn dublin_air_quality() -> AirQualitySample {
    AirQualitySample {
        timestamp: 1699970000,
        aqi: 2,
        pollutants: Pollutants {
            co: 230.31,
            no: 0.0,
            no2: 11.65,
            o3: 52.93,
            so2: 1.55,
            pm2_5: 3.04,
            pm10: 4.96,
            nh3: 0.46,
        },
    }
}

pub(crate) fn dublin_air_quality_forecast() -> AirQualityForecastSeries {
    AirQualityForecastSeries {
        points: vec![
            AqiPoint {
                timestamp: 1699970400,
                aqi: 2,
            },
            AqiPoint {
                timestamp: 1699974000,
                aqi: 1,
            },
            AqiPoint {
                timestamp: 1699977600,
                aqi: 3,
            },
        ],
    }
}

#[async_trait]
impl WeatherApi for FakeApi {
    async fn geocode(&self, query: &str, limit: u8) -> Result<Vec<ResolvedLocation>, FetchError> {
        self.geocode_limits.lock().push(limit);
        if let Some(gate) = &self.geocode_gate {
            gate.pass(query).await;
        }
        if self.fail_geocode {
            return Err(FetchError::Status {
                resource: "direct geocoding",
                status: StatusCode::UNAUTHORIZED,
                body: "Invalid API key".into(),
            });
        }

        let query = query.to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|p| query.contains(&p.name.to_lowercase()))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn reverse_geocode(
        &self,
        at: Coordinates,
        limit: u8,
    ) -> Result<Vec<ResolvedLocation>, FetchError> {
        if self.fail_geocode {
            return Err(FetchError::EmptyResponse {
                resource: "reverse geocoding",
            });
        }

        Ok(self
            .places
            .iter()
            .filter(|p| {
                (p.latitude - at.latitude).abs() < 1.0 && (p.longitude - at.longitude).abs() < 1.0
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn current(&self, at: Coordinates) -> Result<CurrentConditions, FetchError> {
        self.fetched_at.lock().push(at);
        if let Some(gate) = &self.current_gate {
            gate.pass(&at.latitude.to_string()).await;
        }
        self.check("current")?;
        Ok(dublin_current())
    }

    async fn air_quality(&self, _at: Coordinates) -> Result<AirQualitySample, FetchError> {
        self.check("air_quality")?;
        Ok(dublin_air_quality())
    }

    async fn forecast(&self, _at: Coordinates) -> Result<ForecastSnapshot, FetchError> {
        self.check("forecast")?;
        Ok(dublin_forecast())
    }

    async fn air_quality_forecast(
        &self,
        _at: Coordinates,
    ) -> Result<AirQualityForecastSeries, FetchError> {
        self.check("air_quality_forecast")?;
        Ok(dublin_air_quality_forecast())
    }
}
