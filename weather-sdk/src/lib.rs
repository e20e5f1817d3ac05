//! Client library for the OpenWeather HTTP APIs.
//!
//! This crate defines:
//! - Per-request settings and URL assembly
//! - A request executor over a pluggable [`HttpClient`] transport
//! - Terminators projecting a response as a domain object or raw JSON/XML/HTML, sync or async
//! - Unit-aware measurement types (temperature, wind speed, visibility, precipitation, pressure)
//! - Endpoint call sites and their domain models
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.
//!
//! ```no_run
//! use weather_sdk::{Customize, Place, UnitSystem, WeatherClient};
//!
//! # fn main() -> weather_sdk::Result<()> {
//! let client = WeatherClient::new("API_KEY")?;
//! let weather = client
//!     .current_weather()
//!     .at(Place::city_in("London", "GB"))
//!     .unit_system(UnitSystem::Metric)
//!     .retrieve()
//!     .as_domain_object()?;
//! println!("{}", weather.temperature);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod measure;
pub mod model;
pub mod params;
pub mod settings;
pub mod terminator;
pub mod transport;
pub mod url;

#[cfg(test)]
mod testing;

pub use client::{ApiConfiguration, ApiConfigurationBuilder, WeatherClient};
pub use config::Config;
pub use endpoint::{Customize, Place, one_call::OneCallPart};
pub use error::{Result, WeatherError};
pub use measure::{AtmosphericPressure, PrecipitationIntensity, Temperature, Visibility, WindSpeed};
pub use params::{Coordinates, Language, ResponseFormat, UnitSystem};
pub use settings::RequestSettings;
pub use terminator::{FromWire, ListResponseTerminator, PendingResponse, ResponseTerminator};
pub use transport::{HttpClient, HttpResponse, ReqwestHttpClient, TimeoutSettings, TransportError};
