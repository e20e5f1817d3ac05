use std::convert::TryFrom;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wire::{self, CoordWire};
use crate::{
    error::{Result, WeatherError},
    params::{Coordinates, UnitSystem},
    terminator::FromWire,
};

/// Air quality for one location, one record per hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirPollution {
    pub coordinates: Coordinates,
    pub records: Vec<AirPollutionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirPollutionRecord {
    pub measured_at: DateTime<Utc>,
    pub index: AirQualityIndex,
    pub components: PollutantConcentrations,
}

/// Qualitative air quality index, 1 (good) to 5 (very poor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AirQualityIndex {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AirQualityIndex {
    pub fn value(&self) -> u8 {
        match self {
            AirQualityIndex::Good => 1,
            AirQualityIndex::Fair => 2,
            AirQualityIndex::Moderate => 3,
            AirQualityIndex::Poor => 4,
            AirQualityIndex::VeryPoor => 5,
        }
    }
}

impl TryFrom<u8> for AirQualityIndex {
    type Error = WeatherError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(AirQualityIndex::Good),
            2 => Ok(AirQualityIndex::Fair),
            3 => Ok(AirQualityIndex::Moderate),
            4 => Ok(AirQualityIndex::Poor),
            5 => Ok(AirQualityIndex::VeryPoor),
            _ => Err(WeatherError::Parse(format!("air quality index {value} is outside 1..=5"))),
        }
    }
}

/// Concentrations in μg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PollutantConcentrations {
    #[serde(rename = "co")]
    pub carbon_monoxide: Option<f64>,
    #[serde(rename = "no")]
    pub nitrogen_monoxide: Option<f64>,
    #[serde(rename = "no2")]
    pub nitrogen_dioxide: Option<f64>,
    #[serde(rename = "o3")]
    pub ozone: Option<f64>,
    #[serde(rename = "so2")]
    pub sulphur_dioxide: Option<f64>,
    #[serde(rename = "pm2_5")]
    pub fine_particles: Option<f64>,
    #[serde(rename = "pm10")]
    pub coarse_particles: Option<f64>,
    #[serde(rename = "nh3")]
    pub ammonia: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AirPollutionWire {
    coord: CoordWire,
    #[serde(default)]
    list: Vec<RecordWire>,
}

#[derive(Debug, Deserialize)]
struct RecordWire {
    dt: i64,
    main: IndexWire,
    #[serde(default)]
    components: PollutantConcentrations,
}

#[derive(Debug, Deserialize)]
struct IndexWire {
    aqi: u8,
}

impl FromWire for AirPollution {
    type Wire = AirPollutionWire;

    fn from_wire(payload: AirPollutionWire, _unit_system: UnitSystem) -> Result<Self> {
        let records = payload
            .list
            .into_iter()
            .map(|record| {
                Ok(AirPollutionRecord {
                    measured_at: wire::timestamp(record.dt)?,
                    index: AirQualityIndex::try_from(record.main.aqi)?,
                    components: record.components,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AirPollution { coordinates: payload.coord.into(), records })
    }
}
