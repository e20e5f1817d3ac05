//! Public response models.
//!
//! Each model is mapped from a private wire model through
//! [`FromWire`](crate::terminator::FromWire); the mapping injects the caller's
//! unit system into every measurement value.

pub mod air_pollution;
pub mod forecast;
pub mod geocoding;
pub mod one_call;
pub mod road_risk;
pub mod weather;
pub(crate) mod wire;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    measure::{PrecipitationIntensity, WindSpeed},
    params::Coordinates,
};

pub use air_pollution::{AirPollution, AirPollutionRecord, AirQualityIndex, PollutantConcentrations};
pub use forecast::{DailyForecast, DailyForecastEntry, DailyTemperatures, Forecast, ForecastEntry};
pub use geocoding::{GeocodingRecord, ZipLocation};
pub use one_call::{MinutelyPrecipitation, OneCall, OneCallPoint, WeatherAlert};
pub use road_risk::{RoadRisk, RoadRiskAlert, RoadState, TrackPoint};
pub use weather::{Atmosphere, Weather};

/// A weather condition as classified by the API (e.g. group "Rain", "light rain").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherCondition {
    pub id: u32,
    /// Condition group such as "Clouds" or "Snow".
    pub group: String,
    pub description: String,
    pub icon: String,
}

impl WeatherCondition {
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wind {
    pub speed: WindSpeed,
    /// Meteorological direction the wind blows from, in degrees.
    pub direction_degrees: Option<f64>,
    pub gust: Option<WindSpeed>,
}

/// Rain or snow over a reporting period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Precipitation {
    pub intensity: PrecipitationIntensity,
    pub volume_mm: f64,
    pub period_hours: u8,
}

/// City metadata attached to forecasts and current weather.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: Option<u64>,
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    /// Shift from UTC in seconds.
    pub timezone_offset: Option<i32>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}
