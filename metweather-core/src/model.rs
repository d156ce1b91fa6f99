use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Best geocoding match for a search or a tapped point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "City, State, Country", or "City, Country" when no state is known.
    pub fn display_name(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
    pub cloud_cover_pct: u32,
    pub wind_speed: f64,
    pub wind_deg: u32,
    pub description: Option<String>,
    pub condition_id: Option<u32>,
    pub icon: Option<String>,
    /// Epoch seconds.
    pub sunrise: i64,
    /// Epoch seconds.
    pub sunset: i64,
    pub utc_offset_secs: i64,
    pub country: Option<String>,
    pub observed_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySample {
    pub timestamp: i64,
    /// AQI class, 1 (Good) to 5 (Very Poor) when upstream behaves.
    pub aqi: i32,
    pub pollutants: Pollutants,
}

/// One 3-hour forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: i64,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub icon: Option<String>,
}

/// Forecast steps in the order upstream returned them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub entries: Vec<ForecastEntry>,
    pub utc_offset_secs: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiPoint {
    pub timestamp: i64,
    pub aqi: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AirQualityForecastSeries {
    pub points: Vec<AqiPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyBucket {
    /// Hour of day, e.g. "15H".
    pub hour: String,
    pub icon_url: String,
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBucket {
    pub label: String,
    /// Only set when buckets are keyed by calendar date.
    pub date: Option<NaiveDate>,
    pub min: i32,
    pub max: i32,
    pub hourly: Option<Vec<HourlyBucket>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiReading {
    pub time: DateTime<Utc>,
    pub aqi: i32,
}

/// Everything known about the active location, as seen by the presentation
/// layer. Each field is absent until its fetch succeeds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub location: Option<ResolvedLocation>,
    pub current: Option<CurrentConditions>,
    pub air_quality: Option<AirQualitySample>,
    pub forecast: Option<ForecastSnapshot>,
    pub air_quality_forecast: Option<AirQualityForecastSeries>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.current.is_none()
            && self.air_quality.is_none()
            && self.forecast.is_none()
            && self.air_quality_forecast.is_none()
    }
}
