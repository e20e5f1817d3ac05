use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Location, Precipitation, WeatherCondition, Wind,
    weather::Atmosphere,
    wire::{self, CloudsWire, ConditionWire, CoordWire, MainWire, VolumeWire, WindWire},
};
use crate::{
    error::Result,
    measure::{AtmosphericPressure, PrecipitationIntensity, Temperature, WindSpeed},
    params::UnitSystem,
    terminator::FromWire,
};

/// Five day forecast in three hour steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub location: Location,
    pub entries: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    pub forecast_at: DateTime<Utc>,
    pub conditions: Vec<WeatherCondition>,
    pub temperature: Temperature,
    pub feels_like: Option<Temperature>,
    pub atmosphere: Atmosphere,
    pub wind: Option<Wind>,
    pub cloudiness_pct: Option<u8>,
    /// Probability of precipitation, 0.0 to 1.0.
    pub precipitation_probability: Option<f64>,
    pub rain: Option<Precipitation>,
    pub snow: Option<Precipitation>,
}

/// Day-by-day forecast (daily and climatic endpoints).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub location: Location,
    pub days: Vec<DailyForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecastEntry {
    pub date: DateTime<Utc>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub temperature: DailyTemperatures,
    pub feels_like: Option<DailyTemperatures>,
    pub pressure: Option<AtmosphericPressure>,
    pub humidity_pct: Option<u8>,
    pub conditions: Vec<WeatherCondition>,
    pub wind: Option<Wind>,
    pub cloudiness_pct: Option<u8>,
    pub precipitation_probability: Option<f64>,
    /// Daily rain total expressed as an average hourly intensity.
    pub rain: Option<PrecipitationIntensity>,
    pub snow: Option<PrecipitationIntensity>,
    pub uv_index: Option<f64>,
}

/// Temperatures across the parts of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTemperatures {
    pub day: Temperature,
    pub night: Option<Temperature>,
    pub morning: Option<Temperature>,
    pub evening: Option<Temperature>,
    pub min: Option<Temperature>,
    pub max: Option<Temperature>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastWire {
    city: CityWire,
    #[serde(default)]
    list: Vec<ForecastEntryWire>,
}

#[derive(Debug, Deserialize)]
pub struct DailyForecastWire {
    city: CityWire,
    #[serde(default)]
    list: Vec<DailyEntryWire>,
}

#[derive(Debug, Deserialize)]
struct CityWire {
    id: Option<u64>,
    #[serde(default)]
    name: String,
    coord: Option<CoordWire>,
    country: Option<String>,
    timezone: Option<i32>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntryWire {
    dt: i64,
    main: MainWire,
    #[serde(default)]
    weather: Vec<ConditionWire>,
    clouds: Option<CloudsWire>,
    wind: Option<WindWire>,
    pop: Option<f64>,
    rain: Option<VolumeWire>,
    snow: Option<VolumeWire>,
}

/// Daily entries appear both in the daily forecast (`speed`/`deg`) and in
/// one-call responses (`wind_speed`/`wind_deg`).
#[derive(Debug, Deserialize)]
pub(crate) struct DailyEntryWire {
    dt: i64,
    sunrise: Option<i64>,
    sunset: Option<i64>,
    temp: DailyTemperaturesWire,
    feels_like: Option<DailyTemperaturesWire>,
    pressure: Option<f64>,
    humidity: Option<u8>,
    #[serde(default)]
    weather: Vec<ConditionWire>,
    #[serde(alias = "wind_speed")]
    speed: Option<f64>,
    #[serde(alias = "wind_deg")]
    deg: Option<f64>,
    #[serde(alias = "wind_gust")]
    gust: Option<f64>,
    clouds: Option<u8>,
    pop: Option<f64>,
    rain: Option<f64>,
    snow: Option<f64>,
    uvi: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DailyTemperaturesWire {
    day: Option<f64>,
    night: Option<f64>,
    morn: Option<f64>,
    eve: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl CityWire {
    fn into_location(self) -> Result<Location> {
        Ok(Location {
            id: self.id,
            name: self.name,
            country: self.country,
            coordinates: self.coord.map(Into::into),
            timezone_offset: self.timezone,
            sunrise: wire::optional_timestamp(self.sunrise)?,
            sunset: wire::optional_timestamp(self.sunset)?,
        })
    }
}

impl DailyTemperaturesWire {
    fn into_temperatures(self, prefix: &str, unit_system: UnitSystem) -> Result<DailyTemperatures> {
        let field = |part: &str| format!("{prefix}.{part}");
        Ok(DailyTemperatures {
            day: wire::required(self.day, &field("day"), unit_system)?,
            night: wire::optional(self.night, &field("night"), unit_system)?,
            morning: wire::optional(self.morn, &field("morn"), unit_system)?,
            evening: wire::optional(self.eve, &field("eve"), unit_system)?,
            min: wire::optional(self.min, &field("min"), unit_system)?,
            max: wire::optional(self.max, &field("max"), unit_system)?,
        })
    }
}

impl DailyEntryWire {
    pub(crate) fn into_entry(self, unit_system: UnitSystem) -> Result<DailyForecastEntry> {
        let wind = match self.speed {
            Some(speed) => Some(Wind {
                speed: wire::required::<WindSpeed>(Some(speed), "speed", unit_system)?,
                direction_degrees: self.deg,
                gust: wire::optional(self.gust, "gust", unit_system)?,
            }),
            None => None,
        };

        Ok(DailyForecastEntry {
            date: wire::timestamp(self.dt)?,
            sunrise: wire::optional_timestamp(self.sunrise)?,
            sunset: wire::optional_timestamp(self.sunset)?,
            temperature: self.temp.into_temperatures("temp", unit_system)?,
            feels_like: self
                .feels_like
                .map(|t| t.into_temperatures("feels_like", unit_system))
                .transpose()?,
            pressure: wire::optional(self.pressure, "pressure", unit_system)?,
            humidity_pct: self.humidity,
            conditions: self.weather.into_iter().map(Into::into).collect(),
            wind,
            cloudiness_pct: self.clouds,
            precipitation_probability: self.pop,
            rain: wire::optional(self.rain.map(|mm| mm / 24.0), "rain", unit_system)?,
            snow: wire::optional(self.snow.map(|mm| mm / 24.0), "snow", unit_system)?,
            uv_index: self.uvi,
        })
    }
}

impl FromWire for Forecast {
    type Wire = ForecastWire;

    fn from_wire(payload: ForecastWire, unit_system: UnitSystem) -> Result<Self> {
        let entries = payload
            .list
            .into_iter()
            .map(|entry| {
                Ok(ForecastEntry {
                    forecast_at: wire::timestamp(entry.dt)?,
                    conditions: entry.weather.into_iter().map(Into::into).collect(),
                    temperature: wire::required(entry.main.temp, "main.temp", unit_system)?,
                    feels_like: wire::optional(
                        entry.main.feels_like,
                        "main.feels_like",
                        unit_system,
                    )?,
                    atmosphere: Atmosphere::from_main(&entry.main, unit_system)?,
                    wind: entry.wind.map(|w| wire::wind(w, unit_system)).transpose()?,
                    cloudiness_pct: entry.clouds.map(|c| c.all),
                    precipitation_probability: entry.pop,
                    rain: wire::precipitation(entry.rain, "rain", unit_system)?,
                    snow: wire::precipitation(entry.snow, "snow", unit_system)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Forecast { location: payload.city.into_location()?, entries })
    }
}

impl FromWire for DailyForecast {
    type Wire = DailyForecastWire;

    fn from_wire(payload: DailyForecastWire, unit_system: UnitSystem) -> Result<Self> {
        let days = payload
            .list
            .into_iter()
            .map(|day| day.into_entry(unit_system))
            .collect::<Result<Vec<_>>>()?;

        Ok(DailyForecast { location: payload.city.into_location()?, days })
    }
}
