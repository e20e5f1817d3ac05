use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    client::{ApiConfiguration, ApiConfigurationBuilder},
    params::{Language, UnitSystem},
    transport::TimeoutSettings,
};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// language = "en"
/// units = "metric"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub language: Language,
    pub units: UnitSystem,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro_host: Option<String>,
    pub insecure: bool,
}

impl Default for Config {
    fn default() -> Self {
        let timeouts = TimeoutSettings::default();
        Self {
            api_key: None,
            language: Language::default(),
            units: UnitSystem::default(),
            connect_timeout_secs: timeouts.connect.as_secs(),
            read_timeout_secs: timeouts.read.as_secs(),
            standard_host: None,
            pro_host: None,
            insecure: false,
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "openweather", "weather-sdk")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, else the stored one.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.key_with_override(std::env::var(API_KEY_ENV).ok())
    }

    fn key_with_override(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeouts(&self) -> TimeoutSettings {
        TimeoutSettings {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read: Duration::from_secs(self.read_timeout_secs),
        }
    }

    /// Build the client configuration, using the default reqwest transport.
    pub fn api_configuration(&self) -> Result<ApiConfiguration> {
        let api_key = self.resolve_api_key().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `weather configure` or set {API_KEY_ENV}."
            )
        })?;

        self.builder(api_key).build().context("Failed to build API configuration")
    }

    fn builder(&self, api_key: String) -> ApiConfigurationBuilder {
        let mut builder = ApiConfiguration::builder(api_key)
            .language(self.language)
            .unit_system(self.units)
            .timeouts(self.timeouts())
            .insecure(self.insecure);

        if let Some(host) = &self.standard_host {
            builder = builder.standard_host(host.as_str());
        }
        if let Some(host) = &self.pro_host {
            builder = builder.pro_host(host.as_str());
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{params::ApiVariant, testing::RecordingHttpClient};

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg = Config::from_toml(r#"api_key = "KEY""#).unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.units, UnitSystem::Standard);
        assert_eq!(cfg.language, Language::English);
        assert_eq!(cfg.timeouts(), TimeoutSettings::default());
        assert!(!cfg.insecure);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            language: Language::German,
            units: UnitSystem::Metric,
            standard_host: Some("127.0.0.1:8080".into()),
            ..Config::default()
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains(r#"units = "metric""#));
        assert!(text.contains(r#"language = "de""#));
        assert!(!text.contains("pro_host"));

        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn unknown_units_are_rejected() {
        assert!(Config::from_toml(r#"units = "kelvin""#).is_err());
    }

    #[test]
    fn environment_key_takes_precedence() {
        let cfg = Config { api_key: Some("STORED".into()), ..Config::default() };

        assert_eq!(cfg.key_with_override(Some("FROM_ENV".into())).as_deref(), Some("FROM_ENV"));
        assert_eq!(cfg.key_with_override(Some("  ".into())).as_deref(), Some("STORED"));
        assert_eq!(cfg.key_with_override(None).as_deref(), Some("STORED"));
        assert_eq!(Config::default().key_with_override(None), None);
    }

    #[test]
    fn builder_carries_stored_preferences() {
        let cfg = Config {
            units: UnitSystem::Imperial,
            pro_host: Some("pro.local".into()),
            insecure: true,
            read_timeout_secs: 5,
            ..Config::default()
        };

        let config = cfg
            .builder("KEY".into())
            .transport(Arc::new(RecordingHttpClient::ok("{}")))
            .build()
            .unwrap();

        assert_eq!(config.unit_system(), UnitSystem::Imperial);
        assert_eq!(config.host(ApiVariant::Pro), "pro.local");
        assert_eq!(config.scheme(), "http");
        assert_eq!(config.timeouts().read, Duration::from_secs(5));
    }
}
