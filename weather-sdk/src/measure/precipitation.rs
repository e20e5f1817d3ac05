use std::{convert::TryFrom, fmt};

use serde::Serialize;

use super::{Measurement, canonical, round_half_even};
use crate::{
    error::{Result, WeatherError},
    params::UnitSystem,
};

/// Precipitation intensity stored in millimeters per hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrecipitationIntensity {
    millimeters_per_hour: f64,
    unit_system: UnitSystem,
}

impl PrecipitationIntensity {
    pub fn from_millimeters_per_hour(mm_per_hour: f64) -> Result<Self> {
        Self::try_from(Some(mm_per_hour))
    }

    pub fn with_unit_system(self, unit_system: UnitSystem) -> Self {
        Self { unit_system, ..self }
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn as_millimeters_per_hour(&self) -> f64 {
        round_half_even(self.millimeters_per_hour, 1)
    }

    pub fn as_millimeters_per_minute(&self) -> f64 {
        round_half_even(self.millimeters_per_hour / 60.0, 1)
    }

    /// The API reports precipitation in mm/h for every unit system.
    pub fn value(&self) -> f64 {
        self.as_millimeters_per_hour()
    }

    pub fn unit(&self) -> &'static str {
        "mm/h"
    }
}

impl TryFrom<Option<f64>> for PrecipitationIntensity {
    type Error = WeatherError;

    fn try_from(mm_per_hour: Option<f64>) -> Result<Self> {
        Ok(Self {
            millimeters_per_hour: canonical(mm_per_hour, "precipitation intensity")?,
            unit_system: UnitSystem::Standard,
        })
    }
}

impl Measurement for PrecipitationIntensity {
    fn presented_in(self, unit_system: UnitSystem) -> Self {
        self.with_unit_system(unit_system)
    }
}

impl fmt::Display for PrecipitationIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.value(), self.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::approx_constant)]
    fn rounds_to_one_decimal() {
        let p = PrecipitationIntensity::from_millimeters_per_hour(3.1415).unwrap();

        assert_eq!(p.as_millimeters_per_hour(), 3.1);
        assert_eq!(p.as_millimeters_per_minute(), 0.1);
        assert_eq!(p.to_string(), "3.1 mm/h");
    }

    #[test]
    fn unit_system_does_not_change_presentation() {
        let p = PrecipitationIntensity::from_millimeters_per_hour(12.0)
            .unwrap()
            .with_unit_system(UnitSystem::Imperial);

        assert_eq!(p.value(), 12.0);
        assert_eq!(p.unit(), "mm/h");
    }

    #[test]
    fn absent_value_is_rejected() {
        assert!(matches!(
            PrecipitationIntensity::try_from(None),
            Err(WeatherError::InvalidArgument(_))
        ));
    }
}
