use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    DailyForecastEntry, Precipitation, WeatherCondition, Wind,
    forecast::DailyEntryWire,
    wire::{self, ConditionWire, VolumeWire},
};
use crate::{
    error::Result,
    measure::{AtmosphericPressure, PrecipitationIntensity, Temperature, Visibility, WindSpeed},
    params::{Coordinates, UnitSystem},
    terminator::FromWire,
};

/// Current conditions, forecasts and alerts for one location in a single response.
///
/// Blocks removed with `exclude` come back empty (`None` / empty `Vec`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneCall {
    pub coordinates: Coordinates,
    pub timezone: String,
    pub timezone_offset: i32,
    pub current: Option<OneCallPoint>,
    pub minutely: Vec<MinutelyPrecipitation>,
    pub hourly: Vec<OneCallPoint>,
    pub daily: Vec<DailyForecastEntry>,
    pub alerts: Vec<WeatherAlert>,
}

/// Conditions at one instant (the `current` block and each `hourly` entry).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneCallPoint {
    pub at: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub temperature: Temperature,
    pub feels_like: Option<Temperature>,
    pub dew_point: Option<Temperature>,
    pub pressure: Option<AtmosphericPressure>,
    pub humidity_pct: Option<u8>,
    pub uv_index: Option<f64>,
    pub cloudiness_pct: Option<u8>,
    pub visibility: Option<Visibility>,
    pub wind: Option<Wind>,
    pub conditions: Vec<WeatherCondition>,
    pub precipitation_probability: Option<f64>,
    pub rain: Option<Precipitation>,
    pub snow: Option<Precipitation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinutelyPrecipitation {
    pub at: DateTime<Utc>,
    pub intensity: PrecipitationIntensity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    pub sender_name: String,
    pub event: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OneCallWire {
    lat: f64,
    lon: f64,
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    timezone_offset: i32,
    current: Option<PointWire>,
    #[serde(default)]
    minutely: Vec<MinutelyWire>,
    #[serde(default)]
    hourly: Vec<PointWire>,
    #[serde(default)]
    daily: Vec<DailyEntryWire>,
    #[serde(default)]
    alerts: Vec<AlertWire>,
}

#[derive(Debug, Deserialize)]
struct PointWire {
    dt: i64,
    sunrise: Option<i64>,
    sunset: Option<i64>,
    temp: Option<f64>,
    feels_like: Option<f64>,
    dew_point: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<u8>,
    uvi: Option<f64>,
    clouds: Option<u8>,
    visibility: Option<f64>,
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    wind_gust: Option<f64>,
    #[serde(default)]
    weather: Vec<ConditionWire>,
    pop: Option<f64>,
    rain: Option<VolumeWire>,
    snow: Option<VolumeWire>,
}

#[derive(Debug, Deserialize)]
struct MinutelyWire {
    dt: i64,
    precipitation: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AlertWire {
    #[serde(default)]
    sender_name: String,
    event: String,
    start: i64,
    end: i64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl PointWire {
    fn into_point(self, unit_system: UnitSystem) -> Result<OneCallPoint> {
        let wind = match self.wind_speed {
            Some(speed) => Some(Wind {
                speed: wire::required::<WindSpeed>(Some(speed), "wind_speed", unit_system)?,
                direction_degrees: self.wind_deg,
                gust: wire::optional(self.wind_gust, "wind_gust", unit_system)?,
            }),
            None => None,
        };

        Ok(OneCallPoint {
            at: wire::timestamp(self.dt)?,
            sunrise: wire::optional_timestamp(self.sunrise)?,
            sunset: wire::optional_timestamp(self.sunset)?,
            temperature: wire::required(self.temp, "temp", unit_system)?,
            feels_like: wire::optional(self.feels_like, "feels_like", unit_system)?,
            dew_point: wire::optional(self.dew_point, "dew_point", unit_system)?,
            pressure: wire::optional(self.pressure, "pressure", unit_system)?,
            humidity_pct: self.humidity,
            uv_index: self.uvi,
            cloudiness_pct: self.clouds,
            visibility: wire::optional(self.visibility, "visibility", unit_system)?,
            wind,
            conditions: self.weather.into_iter().map(Into::into).collect(),
            precipitation_probability: self.pop,
            rain: wire::precipitation(self.rain, "rain", unit_system)?,
            snow: wire::precipitation(self.snow, "snow", unit_system)?,
        })
    }
}

impl FromWire for OneCall {
    type Wire = OneCallWire;

    fn from_wire(payload: OneCallWire, unit_system: UnitSystem) -> Result<Self> {
        let minutely = payload
            .minutely
            .into_iter()
            .map(|m| {
                Ok(MinutelyPrecipitation {
                    at: wire::timestamp(m.dt)?,
                    intensity: wire::required(
                        m.precipitation,
                        "minutely.precipitation",
                        unit_system,
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let alerts = payload
            .alerts
            .into_iter()
            .map(|a| {
                Ok(WeatherAlert {
                    sender_name: a.sender_name,
                    event: a.event,
                    start: wire::timestamp(a.start)?,
                    end: wire::timestamp(a.end)?,
                    description: a.description,
                    tags: a.tags,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(OneCall {
            coordinates: Coordinates { latitude: payload.lat, longitude: payload.lon },
            timezone: payload.timezone,
            timezone_offset: payload.timezone_offset,
            current: payload.current.map(|c| c.into_point(unit_system)).transpose()?,
            minutely,
            hourly: payload
                .hourly
                .into_iter()
                .map(|h| h.into_point(unit_system))
                .collect::<Result<Vec<_>>>()?,
            daily: payload
                .daily
                .into_iter()
                .map(|d| d.into_entry(unit_system))
                .collect::<Result<Vec<_>>>()?,
            alerts,
        })
    }
}
