use std::{convert::TryFrom, fmt};

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

pub const APPID: &str = "appid";
pub const LANGUAGE: &str = "lang";
pub const UNITS: &str = "units";
pub const MODE: &str = "mode";
pub const LATITUDE: &str = "lat";
pub const LONGITUDE: &str = "lon";
pub const CITY_ID: &str = "id";
pub const QUERY: &str = "q";
pub const ZIP: &str = "zip";
pub const COUNT: &str = "cnt";
pub const LIMIT: &str = "limit";
pub const START: &str = "start";
pub const END: &str = "end";
pub const EXCLUDE: &str = "exclude";

/// Unit system used by the server for conversions and by value types for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Kelvin, meters/second, hPa.
    #[default]
    Standard,
    /// Celsius, meters/second, hPa.
    Metric,
    /// Fahrenheit, miles/hour, inHg.
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Standard => "standard",
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Standard, UnitSystem::Metric, UnitSystem::Imperial]
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "standard" => Ok(UnitSystem::Standard),
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(WeatherError::InvalidArgument(format!(
                "unknown unit system '{value}', expected one of: standard, metric, imperial"
            ))),
        }
    }
}

/// Representation the server should answer with (`mode` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
    Html,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
            ResponseFormat::Html => "html",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ResponseFormat {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "json" => Ok(ResponseFormat::Json),
            "xml" => Ok(ResponseFormat::Xml),
            "html" => Ok(ResponseFormat::Html),
            _ => Err(WeatherError::InvalidArgument(format!(
                "unknown response format '{value}', expected one of: json, xml, html"
            ))),
        }
    }
}

/// Which host a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiVariant {
    #[default]
    Standard,
    /// Subscription-only endpoints (climatic forecast and friends).
    Pro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Languages accepted by the `lang` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    Arabic,
    Chinese,
    Czech,
    Dutch,
    #[default]
    English,
    Finnish,
    French,
    German,
    Greek,
    Italian,
    Japanese,
    Korean,
    Polish,
    Portuguese,
    Russian,
    Spanish,
    Swedish,
    Turkish,
    Ukrainian,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Arabic => "ar",
            Language::Chinese => "zh_cn",
            Language::Czech => "cz",
            Language::Dutch => "nl",
            Language::English => "en",
            Language::Finnish => "fi",
            Language::French => "fr",
            Language::German => "de",
            Language::Greek => "el",
            Language::Italian => "it",
            Language::Japanese => "ja",
            Language::Korean => "kr",
            Language::Polish => "pl",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Spanish => "es",
            Language::Swedish => "se",
            Language::Turkish => "tr",
            Language::Ukrainian => "ua",
        }
    }

    pub const fn all() -> &'static [Language] {
        &[
            Language::Arabic,
            Language::Chinese,
            Language::Czech,
            Language::Dutch,
            Language::English,
            Language::Finnish,
            Language::French,
            Language::German,
            Language::Greek,
            Language::Italian,
            Language::Japanese,
            Language::Korean,
            Language::Polish,
            Language::Portuguese,
            Language::Russian,
            Language::Spanish,
            Language::Swedish,
            Language::Turkish,
            Language::Ukrainian,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Language {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();
        Language::all()
            .iter()
            .copied()
            .find(|lang| lang.code() == lower)
            .ok_or_else(|| {
                WeatherError::InvalidArgument(format!("unsupported language code '{value}'"))
            })
    }
}

impl TryFrom<String> for Language {
    type Error = WeatherError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::try_from(value.as_str())
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinates {
    /// Rejects latitudes outside [-90, 90] and longitudes outside [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherError::InvalidArgument(format!(
                "latitude {latitude} is out of range [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidArgument(format!(
                "longitude {longitude} is out of range [-180, 180]"
            )));
        }
        Ok(Self { latitude, longitude })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_as_str_roundtrip() {
        for system in UnitSystem::all() {
            let parsed = UnitSystem::try_from(system.as_str()).expect("roundtrip should succeed");
            assert_eq!(*system, parsed);
        }
    }

    #[test]
    fn language_code_roundtrip() {
        for lang in Language::all() {
            assert_eq!(Language::try_from(lang.code()).unwrap(), *lang);
        }
        assert_eq!(Language::default().code(), "en");
    }

    #[test]
    fn unknown_values_are_invalid_arguments() {
        assert!(matches!(UnitSystem::try_from("kelvinish"), Err(WeatherError::InvalidArgument(_))));
        assert!(matches!(ResponseFormat::try_from("yaml"), Err(WeatherError::InvalidArgument(_))));
        assert!(matches!(Language::try_from("xx"), Err(WeatherError::InvalidArgument(_))));
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(Coordinates::new(51.5, -0.12).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
    }
}
