use std::{convert::TryFrom, fmt};

use serde::Serialize;

use super::{Measurement, canonical, round_half_even};
use crate::{
    error::{Result, WeatherError},
    params::UnitSystem,
};

const KELVIN_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 459.67;

/// A temperature stored in kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Temperature {
    kelvin: f64,
    unit_system: UnitSystem,
}

impl Temperature {
    pub fn from_kelvin(kelvin: f64) -> Result<Self> {
        Self::try_from(Some(kelvin))
    }

    pub fn from_celsius(celsius: f64) -> Result<Self> {
        Self::from_kelvin(celsius + KELVIN_OFFSET)
    }

    pub fn from_fahrenheit(fahrenheit: f64) -> Result<Self> {
        Self::from_kelvin((fahrenheit + FAHRENHEIT_OFFSET) * 5.0 / 9.0)
    }

    /// Same temperature, presented in `unit_system`.
    pub fn with_unit_system(self, unit_system: UnitSystem) -> Self {
        Self { unit_system, ..self }
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn as_kelvin(&self) -> f64 {
        self.kelvin
    }

    pub fn as_celsius(&self) -> f64 {
        round_half_even(self.kelvin - KELVIN_OFFSET, 0)
    }

    pub fn as_fahrenheit(&self) -> f64 {
        round_half_even(self.kelvin * 9.0 / 5.0 - FAHRENHEIT_OFFSET, 0)
    }

    /// Value in the presentation unit system.
    pub fn value(&self) -> f64 {
        match self.unit_system {
            UnitSystem::Standard => self.kelvin,
            UnitSystem::Metric => self.as_celsius(),
            UnitSystem::Imperial => self.as_fahrenheit(),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.unit_system {
            UnitSystem::Standard => "K",
            UnitSystem::Metric => "°C",
            UnitSystem::Imperial => "°F",
        }
    }
}

impl TryFrom<Option<f64>> for Temperature {
    type Error = WeatherError;

    fn try_from(kelvin: Option<f64>) -> Result<Self> {
        Ok(Self {
            kelvin: canonical(kelvin, "temperature")?,
            unit_system: UnitSystem::Standard,
        })
    }
}

impl Measurement for Temperature {
    fn presented_in(self, unit_system: UnitSystem) -> Self {
        self.with_unit_system(unit_system)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.unit())
    }
}
