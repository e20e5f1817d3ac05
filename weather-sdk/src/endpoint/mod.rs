//! Endpoint call sites.
//!
//! Each requester owns a fresh [`RequestSettings`], exposes consuming
//! builder methods for its endpoint-specific parameters and ends the chain
//! with a terminator.

pub mod air_pollution;
pub mod current;
pub mod forecast;
pub mod geocoding;
pub mod one_call;
pub mod road_risk;

use tracing::warn;

use crate::{
    params::{self, Coordinates, Language, UnitSystem},
    settings::RequestSettings,
    transport::TimeoutSettings,
};

/// Customizations shared by every requester.
pub trait Customize: Sized {
    fn settings_mut(&mut self) -> &mut RequestSettings;

    fn language(mut self, language: Language) -> Self {
        self.settings_mut().set_language(language);
        self
    }

    /// Unit system used to present measurements (and, for raw projections, by the server).
    fn unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.settings_mut().set_unit_system(unit_system);
        self
    }

    fn timeouts(mut self, timeouts: TimeoutSettings) -> Self {
        self.settings_mut().set_timeouts(timeouts);
        self
    }

    /// Add a raw query parameter the typed builders do not cover.
    fn parameter(mut self, key: &str, value: &str) -> Self {
        self.settings_mut().put_parameter(key, value);
        self
    }
}

/// Query keys a [`Place`] may write; only one place is active per request.
const LOCATION_KEYS: [&str; 5] =
    [params::QUERY, params::CITY_ID, params::ZIP, params::LATITUDE, params::LONGITUDE];

/// How a location-based endpoint identifies the place.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    CityName {
        city: String,
        state: Option<String>,
        country: Option<String>,
    },
    CityId(u64),
    Coordinates(Coordinates),
    ZipCode { zip: String, country: String },
}

impl Place {
    pub fn city(city: impl Into<String>) -> Self {
        Place::CityName { city: city.into(), state: None, country: None }
    }

    /// City with an ISO 3166 country code, e.g. `("London", "GB")`.
    pub fn city_in(city: impl Into<String>, country: impl Into<String>) -> Self {
        Place::CityName { city: city.into(), state: None, country: Some(country.into()) }
    }

    /// US city with state code, e.g. `("Springfield", "IL", "US")`.
    pub fn city_in_state(
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Place::CityName {
            city: city.into(),
            state: Some(state.into()),
            country: Some(country.into()),
        }
    }

    pub fn id(id: u64) -> Self {
        Place::CityId(id)
    }

    pub fn zip(zip: impl Into<String>, country: impl Into<String>) -> Self {
        Place::ZipCode { zip: zip.into(), country: country.into() }
    }

    pub(crate) fn apply(&self, settings: &mut RequestSettings) {
        for key in LOCATION_KEYS {
            settings.remove_parameter(key);
        }
        match self {
            Place::CityName { city, state, country } => {
                let query = [Some(city), state.as_ref(), country.as_ref()]
                    .into_iter()
                    .flatten()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(",");
                settings.put_parameter(params::QUERY, query);
            }
            Place::CityId(id) => settings.put_parameter(params::CITY_ID, id.to_string()),
            Place::Coordinates(coordinates) => apply_coordinates(settings, *coordinates),
            Place::ZipCode { zip, country } => {
                settings.put_parameter(params::ZIP, format!("{zip},{country}"))
            }
        }
    }
}

impl From<Coordinates> for Place {
    fn from(coordinates: Coordinates) -> Self {
        Place::Coordinates(coordinates)
    }
}

pub(crate) fn apply_coordinates(settings: &mut RequestSettings, coordinates: Coordinates) {
    settings.put_parameter(params::LATITUDE, coordinates.latitude.to_string());
    settings.put_parameter(params::LONGITUDE, coordinates.longitude.to_string());
}

/// Clamp a requested count into `1..=max`, warning when the request was out of range.
pub(crate) fn clamp_count(requested: u32, max: u32, endpoint: &str) -> u32 {
    if requested > max {
        warn!(requested, max, endpoint, "requested count exceeds the endpoint limit; clamping");
        max
    } else if requested == 0 {
        warn!(endpoint, "requested count of zero; using 1");
        1
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_config;

    fn applied(place: Place) -> RequestSettings {
        let mut settings = RequestSettings::new(test_config());
        place.apply(&mut settings);
        settings
    }

    #[test]
    fn city_name_variants_are_comma_joined() {
        assert_eq!(applied(Place::city("London")).parameter("q"), Some("London"));
        assert_eq!(applied(Place::city_in("London", "GB")).parameter("q"), Some("London,GB"));
        assert_eq!(
            applied(Place::city_in_state("Springfield", "IL", "US")).parameter("q"),
            Some("Springfield,IL,US")
        );
    }

    #[test]
    fn id_zip_and_coordinates_use_their_own_keys() {
        assert_eq!(applied(Place::id(2643743)).parameter("id"), Some("2643743"));
        assert_eq!(applied(Place::zip("94040", "US")).parameter("zip"), Some("94040,US"));

        let settings = applied(Coordinates::new(51.5, -0.12).unwrap().into());
        assert_eq!(settings.parameter("lat"), Some("51.5"));
        assert_eq!(settings.parameter("lon"), Some("-0.12"));
    }

    #[test]
    fn later_place_replaces_earlier_one() {
        let mut settings = applied(Coordinates::new(51.5, -0.12).unwrap().into());
        Place::city("London").apply(&mut settings);
        Place::id(2643743).apply(&mut settings);

        assert_eq!(settings.parameter("id"), Some("2643743"));
        for key in ["q", "zip", "lat", "lon"] {
            assert_eq!(settings.parameter(key), None, "{key} should have been cleared");
        }
    }

    #[test]
    fn counts_are_clamped_into_range() {
        assert_eq!(clamp_count(45, 16, "daily"), 16);
        assert_eq!(clamp_count(0, 16, "daily"), 1);
        assert_eq!(clamp_count(7, 16, "daily"), 7);
    }
}
