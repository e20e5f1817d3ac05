use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};
use weather_sdk::model::{AirPollution, DailyForecast, GeocodingRecord, Weather};

/// Render a UTC instant in the location's local time when the offset is known.
fn local_time(at: DateTime<Utc>, offset_secs: Option<i32>, pattern: &str) -> String {
    match offset_secs.and_then(FixedOffset::east_opt) {
        Some(offset) => at.with_timezone(&offset).format(pattern).to_string(),
        None => at.format(pattern).to_string(),
    }
}

pub fn weather(weather: &Weather) -> String {
    let location = &weather.location;
    let offset = location.timezone_offset;
    let mut out = String::new();

    let place = match &location.country {
        Some(country) => format!("{}, {}", location.name, country),
        None => location.name.clone(),
    };
    let observed = local_time(weather.observed_at, offset, "%Y-%m-%d %H:%M");
    let _ = writeln!(out, "{place} at {observed}");

    if let Some(condition) = weather.condition() {
        let _ = writeln!(out, "  {}", condition.description);
    }

    let _ = write!(out, "  Temperature: {}", weather.temperature);
    if let Some(feels_like) = weather.feels_like {
        let _ = write!(out, " (feels like {feels_like})");
    }
    out.push('\n');

    if let Some(humidity) = weather.atmosphere.humidity_pct {
        let _ = writeln!(out, "  Humidity: {humidity}%");
    }
    if let Some(pressure) = weather.atmosphere.pressure {
        let _ = writeln!(out, "  Pressure: {pressure}");
    }
    if let Some(wind) = &weather.wind {
        let _ = write!(out, "  Wind: {}", wind.speed);
        if let Some(direction) = wind.direction_degrees {
            let _ = write!(out, " from {direction:.0}°");
        }
        out.push('\n');
    }
    if let Some(rain) = &weather.rain {
        let _ = writeln!(out, "  Rain: {}", rain.intensity);
    }
    if let Some(snow) = &weather.snow {
        let _ = writeln!(out, "  Snow: {}", snow.intensity);
    }
    if let (Some(sunrise), Some(sunset)) = (location.sunrise, location.sunset) {
        let _ = writeln!(
            out,
            "  Sunrise {} / sunset {}",
            local_time(sunrise, offset, "%H:%M"),
            local_time(sunset, offset, "%H:%M")
        );
    }

    out.trim_end().to_string()
}

pub fn daily_forecast(forecast: &DailyForecast) -> String {
    let offset = forecast.location.timezone_offset;
    let mut out = format!("{}\n", forecast.location.name);

    for day in &forecast.days {
        let date = local_time(day.date, offset, "%a %d %b");
        let _ = write!(out, "  {date}  {}", day.temperature.day);
        if let (Some(min), Some(max)) = (day.temperature.min, day.temperature.max) {
            let _ = write!(out, " ({min} .. {max})");
        }
        if let Some(condition) = day.conditions.first() {
            let _ = write!(out, "  {}", condition.description);
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

pub fn air_pollution(air: &AirPollution) -> String {
    let mut out = String::new();

    for record in &air.records {
        let c = &record.components;
        let _ = writeln!(
            out,
            "{}  AQI {} ({:?})",
            record.measured_at.format("%Y-%m-%d %H:%M UTC"),
            record.index.value(),
            record.index
        );
        for (name, value) in [
            ("PM2.5", c.fine_particles),
            ("PM10", c.coarse_particles),
            ("O3", c.ozone),
            ("NO2", c.nitrogen_dioxide),
            ("CO", c.carbon_monoxide),
        ] {
            if let Some(value) = value {
                let _ = writeln!(out, "  {name}: {value} µg/m³");
            }
        }
    }

    out.trim_end().to_string()
}

pub fn geocoding(records: &[GeocodingRecord]) -> String {
    if records.is_empty() {
        return "No matches".to_string();
    }

    records
        .iter()
        .map(|r| {
            let region = match &r.state {
                Some(state) => format!("{state}, {}", r.country),
                None => r.country.clone(),
            };
            format!(
                "{} ({region})  {:.4}, {:.4}",
                r.name, r.coordinates.latitude, r.coordinates.longitude
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
