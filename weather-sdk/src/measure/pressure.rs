use std::{convert::TryFrom, fmt};

use serde::Serialize;

use super::{Measurement, canonical, round_half_even};
use crate::{
    error::{Result, WeatherError},
    params::UnitSystem,
};

const INHG_PER_HPA: f64 = 0.02953;
const MMHG_PER_HPA: f64 = 0.750062;

/// Atmospheric pressure stored in hectopascals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericPressure {
    hectopascals: f64,
    unit_system: UnitSystem,
}

impl AtmosphericPressure {
    pub fn from_hectopascals(hpa: f64) -> Result<Self> {
        Self::try_from(Some(hpa))
    }

    pub fn with_unit_system(self, unit_system: UnitSystem) -> Self {
        Self { unit_system, ..self }
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn as_hectopascals(&self) -> f64 {
        self.hectopascals
    }

    pub fn as_inches_of_mercury(&self) -> f64 {
        round_half_even(self.hectopascals * INHG_PER_HPA, 2)
    }

    pub fn as_millimeters_of_mercury(&self) -> f64 {
        round_half_even(self.hectopascals * MMHG_PER_HPA, 2)
    }

    pub fn value(&self) -> f64 {
        match self.unit_system {
            UnitSystem::Standard | UnitSystem::Metric => self.as_hectopascals(),
            UnitSystem::Imperial => self.as_inches_of_mercury(),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self.unit_system {
            UnitSystem::Standard | UnitSystem::Metric => "hPa",
            UnitSystem::Imperial => "inHg",
        }
    }
}

impl TryFrom<Option<f64>> for AtmosphericPressure {
    type Error = WeatherError;

    fn try_from(hpa: Option<f64>) -> Result<Self> {
        Ok(Self {
            hectopascals: canonical(hpa, "atmospheric pressure")?,
            unit_system: UnitSystem::Standard,
        })
    }
}

impl Measurement for AtmosphericPressure {
    fn presented_in(self, unit_system: UnitSystem) -> Self {
        self.with_unit_system(unit_system)
    }
}

impl fmt::Display for AtmosphericPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_atmosphere() {
        let p = AtmosphericPressure::from_hectopascals(1013.25).unwrap();

        assert_eq!(p.as_inches_of_mercury(), 29.92);
        assert_eq!(p.as_millimeters_of_mercury(), 760.0);
    }

    #[test]
    fn imperial_presents_inches_of_mercury() {
        let p = AtmosphericPressure::from_hectopascals(1000.0)
            .unwrap()
            .with_unit_system(UnitSystem::Imperial);

        assert_eq!(p.to_string(), "29.53 inHg");
    }

    #[test]
    fn absent_value_is_rejected() {
        assert!(matches!(
            AtmosphericPressure::try_from(None),
            Err(WeatherError::InvalidArgument(_))
        ));
    }
}
