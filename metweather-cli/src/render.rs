use std::fmt::Write;

use chrono::{DateTime, Utc};
use metweather_core::{ForecastConfig, Snapshot, WeatherReport};

const NO_DATA: &str = "No Data";

fn or_placeholder(value: Option<String>) -> String {
    value.unwrap_or_else(|| NO_DATA.to_string())
}

/// Plain-text report, one section per fetched resource.
pub fn render(snapshot: &Snapshot, forecast: ForecastConfig, now: DateTime<Utc>) -> String {
    let report = WeatherReport::new(snapshot, forecast);
    let mut out = String::new();
    write_report(&mut out, &report, now).expect("writing to a String cannot fail");
    out
}

fn write_report(
    out: &mut String,
    report: &WeatherReport<'_>,
    now: DateTime<Utc>,
) -> std::fmt::Result {
    writeln!(out, "{}", or_placeholder(report.location_name()))?;
    writeln!(out)?;

    writeln!(out, "Geo Info")?;
    writeln!(
        out,
        "  Coordinates  {}",
        or_placeholder(report.coordinates())
    )?;
    writeln!(
        out,
        "  Sunrise      {} {}",
        or_placeholder(report.sunrise_utc()),
        report.sunrise_local().unwrap_or_default()
    )?;
    writeln!(
        out,
        "  Sunset       {} {}",
        or_placeholder(report.sunset_utc()),
        report.sunset_local().unwrap_or_default()
    )?;
    writeln!(out, "  Timezone     {}", or_placeholder(report.timezone()))?;
    writeln!(out)?;

    writeln!(
        out,
        "Weather: {}",
        or_placeholder(report.weather_description())
    )?;
    writeln!(
        out,
        "  Temperature  {} {}",
        or_placeholder(report.temperature()),
        report.low_high().unwrap_or_default()
    )?;
    writeln!(
        out,
        "  Feels like   {}",
        or_placeholder(report.feels_like())
    )?;
    writeln!(
        out,
        "  Clouds       {}",
        or_placeholder(report.cloud_coverage())
    )?;
    writeln!(out, "  Wind         {}", or_placeholder(report.wind()))?;
    writeln!(out, "  Humidity     {}", or_placeholder(report.humidity()))?;
    writeln!(out, "  Pressure     {}", or_placeholder(report.pressure()))?;
    writeln!(out)?;

    writeln!(
        out,
        "Air Quality: {}",
        report.air_quality().unwrap_or(NO_DATA)
    )?;
    if let Some(details) = report.air_quality_details() {
        for ((lk, lv), (rk, rv)) in details.left.iter().zip(details.right.iter()) {
            writeln!(out, "  {lk:<5} {lv:>7}    {rk:<5} {rv:>7}")?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Forecast")?;
    match report.ordered_forecast(now) {
        Some(days) if !days.is_empty() => {
            for day in days {
                writeln!(
                    out,
                    "  {:<10} L: {:>3}°  H: {:>3}°",
                    day.label,
                    day.min,
                    day.max
                )?;
                for hour in day.hourly.iter().flatten() {
                    writeln!(
                        out,
                        "      {:>3}  L: {:>3}°  H: {:>3}°  {}",
                        hour.hour, hour.min, hour.max, hour.icon_url
                    )?;
                }
            }
        }
        _ => writeln!(out, "  {NO_DATA}")?,
    }
    writeln!(out)?;

    writeln!(out, "Air Quality Forecast")?;
    match report.air_quality_forecast() {
        Some(series) if !series.is_empty() => {
            for reading in series {
                let time = reading.time.format("%a %H:%M");
                writeln!(out, "  {time}  {}", reading.aqi)?;
            }
        }
        _ => writeln!(out, "  {NO_DATA}")?,
    }

    Ok(())
}
