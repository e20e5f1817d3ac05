//! Unit-aware measurement values.
//!
//! Every type stores a single canonical quantity (kelvin, meters/second,
//! meters, millimeters/hour, hectopascals) together with the unit system the
//! caller asked for. Converted accessors are pure functions of the canonical
//! value and round half-to-even to a fixed number of decimals.

mod precipitation;
mod pressure;
mod temperature;
mod visibility;
mod wind;

pub use precipitation::PrecipitationIntensity;
pub use pressure::AtmosphericPressure;
pub use temperature::Temperature;
pub use visibility::Visibility;
pub use wind::WindSpeed;

use crate::{
    error::{Result, WeatherError},
    params::UnitSystem,
};

/// Common shape of the measurement types, used by the response mappers.
pub(crate) trait Measurement: TryFrom<Option<f64>, Error = WeatherError> {
    fn presented_in(self, unit_system: UnitSystem) -> Self;
}

/// Round `value` to `decimals` places, ties to even.
pub(crate) fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round_ties_even() / factor;
    // Avoid presenting "-0".
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Validate a canonical value: present, finite and (for physical magnitudes) not negative.
pub(crate) fn canonical(value: Option<f64>, quantity: &str) -> Result<f64> {
    let value = value
        .ok_or_else(|| WeatherError::InvalidArgument(format!("{quantity} value is required")))?;
    if !value.is_finite() {
        return Err(WeatherError::InvalidArgument(format!(
            "{quantity} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(WeatherError::InvalidArgument(format!(
            "{quantity} must not be negative, got {value}"
        )));
    }
    Ok(value)
}
