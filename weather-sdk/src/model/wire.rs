//! Wire-format pieces shared by several endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::{Result, WeatherError},
    params::{Coordinates, UnitSystem},
};

use super::{Precipitation, WeatherCondition, Wind};
use crate::measure::{Measurement, PrecipitationIntensity, WindSpeed};

#[derive(Debug, Deserialize)]
pub(crate) struct CoordWire {
    pub lat: f64,
    pub lon: f64,
}

impl From<CoordWire> for Coordinates {
    fn from(coord: CoordWire) -> Self {
        Coordinates { latitude: coord.lat, longitude: coord.lon }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionWire {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl From<ConditionWire> for WeatherCondition {
    fn from(c: ConditionWire) -> Self {
        WeatherCondition {
            id: c.id,
            group: c.main,
            description: c.description,
            icon: c.icon,
        }
    }
}

/// The `main` block of current weather and hourly forecast entries.
#[derive(Debug, Deserialize)]
pub(crate) struct MainWire {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<f64>,
    pub sea_level: Option<f64>,
    pub grnd_level: Option<f64>,
    pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindWire {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
    pub gust: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CloudsWire {
    pub all: u8,
}

/// `rain` / `snow` objects: millimeters over the last one or three hours.
#[derive(Debug, Deserialize)]
pub(crate) struct VolumeWire {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
    #[serde(rename = "3h")]
    pub three_hours: Option<f64>,
}

pub(crate) fn timestamp(seconds: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp {seconds} is out of range")))
}

pub(crate) fn optional_timestamp(seconds: Option<i64>) -> Result<Option<DateTime<Utc>>> {
    seconds.map(timestamp).transpose()
}

/// Build a measurement from a wire field; an absent or invalid value means the payload is unusable.
pub(crate) fn required<M>(value: Option<f64>, field: &str, unit_system: UnitSystem) -> Result<M>
where
    M: Measurement,
{
    M::try_from(value)
        .map(|m| m.presented_in(unit_system))
        .map_err(|e| WeatherError::Parse(format!("field '{field}': {e}")))
}

/// Like [`required`], but an absent field stays `None`.
pub(crate) fn optional<M>(
    value: Option<f64>,
    field: &str,
    unit_system: UnitSystem,
) -> Result<Option<M>>
where
    M: Measurement,
{
    value.map(|v| required(Some(v), field, unit_system)).transpose()
}

pub(crate) fn wind(wire: WindWire, unit_system: UnitSystem) -> Result<Wind> {
    Ok(Wind {
        speed: required::<WindSpeed>(wire.speed, "wind.speed", unit_system)?,
        direction_degrees: wire.deg,
        gust: optional(wire.gust, "wind.gust", unit_system)?,
    })
}

/// Hourly intensity from a volume block: the 1h value as-is, else the 3h
/// total spread over three hours.
pub(crate) fn precipitation(
    wire: Option<VolumeWire>,
    field: &str,
    unit_system: UnitSystem,
) -> Result<Option<Precipitation>> {
    let Some(volume) = wire else {
        return Ok(None);
    };

    let (per_hour, total_mm, hours) = match (volume.one_hour, volume.three_hours) {
        (Some(mm), _) => (mm, mm, 1),
        (None, Some(mm)) => (mm / 3.0, mm, 3),
        (None, None) => return Ok(None),
    };

    Ok(Some(Precipitation {
        intensity: required::<PrecipitationIntensity>(Some(per_hour), field, unit_system)?,
        volume_mm: total_mm,
        period_hours: hours,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_hour_volume_becomes_hourly_intensity() {
        let wire = VolumeWire { one_hour: None, three_hours: Some(3.0) };

        let p = precipitation(Some(wire), "rain", UnitSystem::Metric).unwrap().unwrap();

        assert_eq!(p.intensity.as_millimeters_per_hour(), 1.0);
        assert_eq!(p.volume_mm, 3.0);
        assert_eq!(p.period_hours, 3);
    }

    #[test]
    fn one_hour_volume_wins() {
        let wire = VolumeWire { one_hour: Some(0.25), three_hours: Some(3.0) };

        let p = precipitation(Some(wire), "rain", UnitSystem::Metric).unwrap().unwrap();

        assert_eq!(p.intensity.as_millimeters_per_hour(), 0.2);
        assert_eq!(p.period_hours, 1);
    }

    #[test]
    fn missing_required_measurement_is_parse_error() {
        let wire = WindWire { speed: None, deg: Some(10.0), gust: None };
        assert!(matches!(wind(wire, UnitSystem::Standard), Err(WeatherError::Parse(_))));
    }

    #[test]
    fn out_of_range_timestamp_is_parse_error() {
        assert!(timestamp(1_485_789_600).is_ok());
        assert!(matches!(timestamp(i64::MAX), Err(WeatherError::Parse(_))));
    }
}
