use std::{convert::TryFrom, fmt};

use serde::Serialize;

use super::{Measurement, canonical, round_half_even};
use crate::{
    error::{Result, WeatherError},
    params::UnitSystem,
};

const MPH_PER_MPS: f64 = 2.23694;
const KMH_PER_MPS: f64 = 3.6;
const MPS_PER_MPH: f64 = 0.44704;

/// A wind speed stored in meters per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindSpeed {
    meters_per_second: f64,
    unit_system: UnitSystem,
}

impl WindSpeed {
    pub fn from_meters_per_second(mps: f64) -> Result<Self> {
        Self::try_from(Some(mps))
    }

    pub fn from_miles_per_hour(mph: f64) -> Result<Self> {
        Self::from_meters_per_second(mph * MPS_PER_MPH)
    }

    pub fn from_kilometers_per_hour(kmh: f64) -> Result<Self> {
        Self::from_meters_per_second(kmh / KMH_PER_MPS)
    }

    pub fn with_unit_system(self, unit_system: UnitSystem) -> Self {
        Self { unit_system, ..self }
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn as_meters_per_second(&self) -> f64 {
        round_half_even(self.meters_per_second, 2)
    }

    pub fn as_miles_per_hour(&self) -> f64 {
        round_half_even(self.meters_per_second * MPH_PER_MPS, 2)
    }

    pub fn as_kilometers_per_hour(&self) -> f64 {
        round_half_even(self.meters_per_second * KMH_PER_MPS, 2)
    }

    /// m/s for standard and metric, mph for imperial.
    pub fn value(&self) -> f64 {
        match self.unit_system {
            UnitSystem::Standard | UnitSystem::Metric => self.as_meters_per_second(),
            UnitSystem::Imperial => self.as_miles_per_hour(),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.unit_system {
            UnitSystem::Standard | UnitSystem::Metric => "m/s",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl TryFrom<Option<f64>> for WindSpeed {
    type Error = WeatherError;

    fn try_from(mps: Option<f64>) -> Result<Self> {
        Ok(Self {
            meters_per_second: canonical(mps, "wind speed")?,
            unit_system: UnitSystem::Standard,
        })
    }
}

impl Measurement for WindSpeed {
    fn presented_in(self, unit_system: UnitSystem) -> Self {
        self.with_unit_system(unit_system)
    }
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value(), self.unit())
    }
}
