use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Location, Precipitation, WeatherCondition, Wind,
    wire::{self, CloudsWire, ConditionWire, CoordWire, MainWire, VolumeWire, WindWire},
};
use crate::{
    error::Result,
    measure::{AtmosphericPressure, Temperature, Visibility},
    params::UnitSystem,
    terminator::FromWire,
};

/// Current weather at one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weather {
    pub location: Location,
    pub observed_at: DateTime<Utc>,
    pub conditions: Vec<WeatherCondition>,
    pub temperature: Temperature,
    pub feels_like: Option<Temperature>,
    pub temperature_min: Option<Temperature>,
    pub temperature_max: Option<Temperature>,
    pub atmosphere: Atmosphere,
    pub wind: Option<Wind>,
    pub visibility: Option<Visibility>,
    pub cloudiness_pct: Option<u8>,
    pub rain: Option<Precipitation>,
    pub snow: Option<Precipitation>,
}

impl Weather {
    /// The primary condition, when the API reported any.
    pub fn condition(&self) -> Option<&WeatherCondition> {
        self.conditions.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atmosphere {
    pub pressure: Option<AtmosphericPressure>,
    pub sea_level_pressure: Option<AtmosphericPressure>,
    pub ground_level_pressure: Option<AtmosphericPressure>,
    pub humidity_pct: Option<u8>,
}

impl Atmosphere {
    pub(crate) fn from_main(main: &MainWire, unit_system: UnitSystem) -> Result<Self> {
        Ok(Self {
            pressure: wire::optional(main.pressure, "main.pressure", unit_system)?,
            sea_level_pressure: wire::optional(main.sea_level, "main.sea_level", unit_system)?,
            ground_level_pressure: wire::optional(main.grnd_level, "main.grnd_level", unit_system)?,
            humidity_pct: main.humidity,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeatherWire {
    id: Option<u64>,
    #[serde(default)]
    name: String,
    coord: Option<CoordWire>,
    dt: i64,
    timezone: Option<i32>,
    #[serde(default)]
    weather: Vec<ConditionWire>,
    main: MainWire,
    wind: Option<WindWire>,
    visibility: Option<f64>,
    clouds: Option<CloudsWire>,
    rain: Option<VolumeWire>,
    snow: Option<VolumeWire>,
    sys: Option<SysWire>,
}

#[derive(Debug, Deserialize)]
struct SysWire {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

impl FromWire for Weather {
    type Wire = CurrentWeatherWire;

    fn from_wire(payload: CurrentWeatherWire, unit_system: UnitSystem) -> Result<Self> {
        let (country, sunrise, sunset) = match payload.sys {
            Some(sys) => (sys.country, sys.sunrise, sys.sunset),
            None => (None, None, None),
        };

        let location = Location {
            id: payload.id,
            name: payload.name,
            country,
            coordinates: payload.coord.map(Into::into),
            timezone_offset: payload.timezone,
            sunrise: wire::optional_timestamp(sunrise)?,
            sunset: wire::optional_timestamp(sunset)?,
        };

        Ok(Weather {
            location,
            observed_at: wire::timestamp(payload.dt)?,
            conditions: payload.weather.into_iter().map(Into::into).collect(),
            temperature: wire::required(payload.main.temp, "main.temp", unit_system)?,
            feels_like: wire::optional(payload.main.feels_like, "main.feels_like", unit_system)?,
            temperature_min: wire::optional(payload.main.temp_min, "main.temp_min", unit_system)?,
            temperature_max: wire::optional(payload.main.temp_max, "main.temp_max", unit_system)?,
            atmosphere: Atmosphere::from_main(&payload.main, unit_system)?,
            wind: payload.wind.map(|w| wire::wind(w, unit_system)).transpose()?,
            visibility: wire::optional(payload.visibility, "visibility", unit_system)?,
            cloudiness_pct: payload.clouds.map(|c| c.all),
            rain: wire::precipitation(payload.rain, "rain", unit_system)?,
            snow: wire::precipitation(payload.snow, "snow", unit_system)?,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::WeatherError;

    pub(crate) const LONDON: &str = r#"{
        "coord": {"lon": -0.13, "lat": 51.51},
        "weather": [{"id": 300, "main": "Drizzle",
                     "description": "light intensity drizzle", "icon": "09d"}],
        "base": "stations",
        "main": {"temp": 280.32, "feels_like": 278.1, "pressure": 1012, "humidity": 81,
                 "temp_min": 279.15, "temp_max": 281.15},
        "visibility": 10000,
        "wind": {"speed": 4.1, "deg": 80},
        "clouds": {"all": 90},
        "rain": {"1h": 0.37},
        "dt": 1485789600,
        "sys": {"type": 1, "id": 5091, "country": "GB",
                "sunrise": 1485762037, "sunset": 1485794875},
        "timezone": 0,
        "id": 2643743,
        "name": "London",
        "cod": 200
    }"#;

    fn parse(json: &str, unit_system: UnitSystem) -> Result<Weather> {
        let payload: CurrentWeatherWire = serde_json::from_str(json)?;
        Weather::from_wire(payload, unit_system)
    }

    #[test]
    fn maps_current_weather_payload() {
        let weather = parse(LONDON, UnitSystem::Metric).unwrap();

        assert_eq!(weather.location.name, "London");
        assert_eq!(weather.location.country.as_deref(), Some("GB"));
        assert_eq!(weather.location.id, Some(2643743));
        assert_eq!(weather.observed_at.timestamp(), 1485789600);
        assert_eq!(weather.condition().unwrap().group, "Drizzle");
        assert_eq!(weather.temperature.as_kelvin(), 280.32);
        assert_eq!(weather.temperature.value(), 7.0);
        assert_eq!(weather.atmosphere.humidity_pct, Some(81));
        assert_eq!(weather.visibility.unwrap().value(), 10.0);
        assert_eq!(weather.cloudiness_pct, Some(90));
        assert_eq!(weather.rain.as_ref().unwrap().intensity.as_millimeters_per_hour(), 0.4);
        assert!(weather.snow.is_none());
    }

    #[test]
    fn every_measurement_carries_requested_unit_system() {
        let weather = parse(LONDON, UnitSystem::Imperial).unwrap();

        assert_eq!(weather.temperature.unit_system(), UnitSystem::Imperial);
        assert_eq!(weather.temperature.value(), 45.0);
        let wind = weather.wind.unwrap();
        assert_eq!(wind.speed.value(), 9.17);
        assert_eq!(wind.direction_degrees, Some(80.0));
        assert_eq!(weather.atmosphere.pressure.unwrap().unit(), "inHg");
    }

    #[test]
    fn missing_temperature_is_a_parse_error() {
        let json = r#"{"dt": 1485789600, "main": {"humidity": 50}}"#;

        let err = parse(json, UnitSystem::Standard).unwrap_err();

        assert!(matches!(err, WeatherError::Parse(msg) if msg.contains("main.temp")));
    }
}
