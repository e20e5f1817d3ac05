use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire;
use crate::{
    error::Result,
    measure::{PrecipitationIntensity, Temperature, Visibility, WindSpeed},
    params::{Coordinates, UnitSystem},
    terminator::FromWire,
};

/// A point of a planned route, sent in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Unix seconds at which the route reaches this point.
    pub dt: i64,
}

impl TrackPoint {
    pub fn new(coordinates: Coordinates, at: DateTime<Utc>) -> Self {
        Self { lat: coordinates.latitude, lon: coordinates.longitude, dt: at.timestamp() }
    }
}

/// Weather and road conditions at one track point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadRisk {
    pub coordinates: Coordinates,
    pub forecast_at: DateTime<Utc>,
    pub temperature: Option<Temperature>,
    pub dew_point: Option<Temperature>,
    pub wind_speed: Option<WindSpeed>,
    pub wind_direction_degrees: Option<f64>,
    pub precipitation: Option<PrecipitationIntensity>,
    pub visibility: Option<Visibility>,
    pub road_state: Option<RoadState>,
    pub road_temperature: Option<Temperature>,
    pub alerts: Vec<RoadRiskAlert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoadState {
    NoReport,
    Dry,
    Moist,
    MoistAndTreated,
    Wet,
    WetAndTreated,
    Ice,
    Frost,
    Snow,
    Other(u8),
}

impl From<u8> for RoadState {
    fn from(code: u8) -> Self {
        match code {
            0 => RoadState::NoReport,
            1 => RoadState::Dry,
            2 => RoadState::Moist,
            3 => RoadState::MoistAndTreated,
            4 => RoadState::Wet,
            5 => RoadState::WetAndTreated,
            6 => RoadState::Ice,
            7 => RoadState::Frost,
            8 => RoadState::Snow,
            other => RoadState::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadRiskAlert {
    pub sender_name: Option<String>,
    pub event: String,
    /// 1 (green) to 4 (red).
    pub event_level: u8,
}

#[derive(Debug, Deserialize)]
pub struct RoadRiskWire {
    dt: i64,
    /// `[lat, lon]`
    coord: (f64, f64),
    weather: Option<RoadWeatherWire>,
    road: Option<RoadWire>,
    #[serde(default)]
    alerts: Vec<RoadRiskAlert>,
}

#[derive(Debug, Default, Deserialize)]
struct RoadWeatherWire {
    temp: Option<f64>,
    dew_point: Option<f64>,
    wind_speed: Option<f64>,
    wind_deg: Option<f64>,
    precipitation_intensity: Option<f64>,
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RoadWire {
    state: Option<u8>,
    temp: Option<f64>,
}

impl FromWire for RoadRisk {
    type Wire = RoadRiskWire;

    fn from_wire(payload: RoadRiskWire, unit_system: UnitSystem) -> Result<Self> {
        let (lat, lon) = payload.coord;
        let weather = payload.weather.unwrap_or_default();
        let (road_state, road_temp) = match payload.road {
            Some(road) => (road.state.map(RoadState::from), road.temp),
            None => (None, None),
        };

        Ok(RoadRisk {
            coordinates: Coordinates { latitude: lat, longitude: lon },
            forecast_at: wire::timestamp(payload.dt)?,
            temperature: wire::optional(weather.temp, "weather.temp", unit_system)?,
            dew_point: wire::optional(weather.dew_point, "weather.dew_point", unit_system)?,
            wind_speed: wire::optional(weather.wind_speed, "weather.wind_speed", unit_system)?,
            wind_direction_degrees: weather.wind_deg,
            precipitation: wire::optional(
                weather.precipitation_intensity,
                "weather.precipitation_intensity",
                unit_system,
            )?,
            visibility: wire::optional(weather.visibility, "weather.visibility", unit_system)?,
            road_state,
            road_temperature: wire::optional(road_temp, "road.temp", unit_system)?,
            alerts: payload.alerts,
        })
    }
}
