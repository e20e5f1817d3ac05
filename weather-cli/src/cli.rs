use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::debug;
use weather_sdk::{
    Config, Coordinates, Customize, Language, Place, ResponseFormat, UnitSystem, WeatherClient,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "OpenWeather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default units.
    Configure,

    /// Show current weather for a city.
    Current {
        /// City name, optionally followed by `,country` (e.g. "London,GB").
        city: String,

        /// standard, metric or imperial; defaults to the configured units.
        #[arg(long, value_parser = parse_units)]
        units: Option<UnitSystem>,

        /// Language code such as "en" or "de".
        #[arg(long, value_parser = parse_language)]
        lang: Option<Language>,

        /// Print the raw json, xml or html response instead of a summary.
        #[arg(long, value_parser = parse_format)]
        format: Option<ResponseFormat>,
    },

    /// Show the daily forecast for a city.
    Forecast {
        city: String,

        /// Number of days (1 to 16).
        #[arg(long, default_value_t = 5)]
        days: u32,

        #[arg(long, value_parser = parse_units)]
        units: Option<UnitSystem>,
    },

    /// Show air quality at a coordinate.
    Air {
        #[arg(allow_hyphen_values = true)]
        lat: f64,

        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },

    /// Look up coordinates for a place name.
    Geo {
        query: String,

        /// Maximum number of matches (1 to 5).
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
}

fn parse_units(s: &str) -> Result<UnitSystem, String> {
    UnitSystem::try_from(s).map_err(|e| e.to_string())
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::try_from(s).map_err(|e| e.to_string())
}

fn parse_format(s: &str) -> Result<ResponseFormat, String> {
    ResponseFormat::try_from(s).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { city, units, lang, format } => {
                let client = client()?;
                let mut request = client.current_weather().at(Place::city(city));
                if let Some(units) = units {
                    request = request.unit_system(units);
                }
                if let Some(lang) = lang {
                    request = request.language(lang);
                }
                let terminator = request.retrieve();

                let text = match format {
                    Some(ResponseFormat::Json) => terminator.as_json_async().await?,
                    Some(ResponseFormat::Xml) => terminator.as_xml_async().await?,
                    Some(ResponseFormat::Html) => terminator.as_html_async().await?,
                    None => output::weather(&terminator.as_domain_object_async().await?),
                };
                println!("{text}");
                Ok(())
            }
            Command::Forecast { city, days, units } => {
                let client = client()?;
                let mut request = client.daily_forecast().at(Place::city(city)).days(days);
                if let Some(units) = units {
                    request = request.unit_system(units);
                }

                let forecast = request.retrieve().as_domain_object_async().await?;
                println!("{}", output::daily_forecast(&forecast));
                Ok(())
            }
            Command::Air { lat, lon } => {
                let coordinates = Coordinates::new(lat, lon)?;
                let air = client()?
                    .air_pollution()
                    .current(coordinates)
                    .as_domain_object_async()
                    .await?;
                println!("{}", output::air_pollution(&air));
                Ok(())
            }
            Command::Geo { query, limit } => {
                let records = client()?
                    .geocoding()
                    .direct(&query, limit)
                    .as_domain_object_async()
                    .await?;
                println!("{}", output::geocoding(&records));
                Ok(())
            }
        }
    }
}

fn client() -> anyhow::Result<WeatherClient> {
    let cfg = Config::load()?;
    debug!(units = %cfg.units, language = %cfg.language, "loaded configuration");
    Ok(WeatherClient::with_configuration(cfg.api_configuration()?))
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let units = Select::new("Default units:", UnitSystem::all().to_vec())
        .prompt()
        .context("Failed to read default units")?;

    cfg.api_key = Some(api_key.trim().to_string());
    cfg.units = units;
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
