use std::{convert::TryFrom, fmt};

use serde::Serialize;

use super::{Measurement, canonical, round_half_even};
use crate::{
    error::{Result, WeatherError},
    params::UnitSystem,
};

const METERS_PER_MILE: f64 = 1609.34;

/// Visibility distance stored in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visibility {
    meters: f64,
    unit_system: UnitSystem,
}

impl Visibility {
    pub fn from_meters(meters: f64) -> Result<Self> {
        Self::try_from(Some(meters))
    }

    pub fn with_unit_system(self, unit_system: UnitSystem) -> Self {
        Self { unit_system, ..self }
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

    pub fn as_kilometers(&self) -> f64 {
        round_half_even(self.meters / 1000.0, 2)
    }

    pub fn as_miles(&self) -> f64 {
        round_half_even(self.meters / METERS_PER_MILE, 2)
    }

    pub fn value(&self) -> f64 {
        match self.unit_system {
            UnitSystem::Standard => self.as_meters(),
            UnitSystem::Metric => self.as_kilometers(),
            UnitSystem::Imperial => self.as_miles(),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.unit_system {
            UnitSystem::Standard => "m",
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }
}

impl TryFrom<Option<f64>> for Visibility {
    type Error = WeatherError;

    fn try_from(meters: Option<f64>) -> Result<Self> {
        Ok(Self {
            meters: canonical(meters, "visibility")?,
            unit_system: UnitSystem::Standard,
        })
    }
}

impl Measurement for Visibility {
    fn presented_in(self, unit_system: UnitSystem) -> Self {
        self.with_unit_system(unit_system)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.unit())
    }
}
