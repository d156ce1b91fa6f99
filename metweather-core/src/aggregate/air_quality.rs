use crate::{
    error::DerivationError,
    model::{AirQualityForecastSeries, AqiReading, Pollutants},
};

use super::time::utc_datetime;

/// Fixed label for an AQI class; classes outside 1..=5 have none.
pub fn aqi_label(aqi: i32) -> Option<&'static str> {
    match aqi {
        1 => Some("Good"),
        2 => Some("Fair"),
        3 => Some("Moderate"),
        4 => Some("Poor"),
        5 => Some("Very Poor"),
        _ => None,
    }
}

/// Pollutant readings split into two side-by-side columns of four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollutantColumns {
    pub left: [(&'static str, String); 4],
    pub right: [(&'static str, String); 4],
}

pub fn pollutant_columns(p: &Pollutants) -> PollutantColumns {
    let one_decimal = |v: f64| format!("{v:.1}");

    PollutantColumns {
        left: [
            ("NO", one_decimal(p.no)),
            ("O3", one_decimal(p.o3)),
            ("NO2", one_decimal(p.no2)),
            ("CO", one_decimal(p.co)),
        ],
        right: [
            ("PM10", one_decimal(p.pm10)),
            ("NH3", one_decimal(p.nh3)),
            ("PM2.5", one_decimal(p.pm2_5)),
            ("SO2", one_decimal(p.so2)),
        ],
    }
}

/// AQI forecast as a time series, oldest first.
///
/// A single unconvertible timestamp invalidates the series.
pub fn aqi_series(series: &AirQualityForecastSeries) -> Result<Vec<AqiReading>, DerivationError> {
    let mut readings = series
        .points
        .iter()
        .map(|p| utc_datetime(p.timestamp).map(|time| AqiReading { time, aqi: p.aqi }))
        .collect::<Result<Vec<_>, DerivationError>>()?;

    readings.sort_by_key(|r| r.time);
    Ok(readings)
}
