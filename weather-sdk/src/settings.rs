//! Per-request configuration.
//!
//! A [`RequestSettings`] lives for exactly one logical API call: endpoint
//! call sites fill it in, a terminator consumes it. The only thing it shares
//! with other requests is the read-only [`ApiConfiguration`].

use std::{collections::HashMap, sync::Arc};

use tracing::warn;

use crate::{
    client::ApiConfiguration,
    params::{self, ApiVariant, Language, ResponseFormat, UnitSystem},
    transport::TimeoutSettings,
};

#[derive(Debug, Clone)]
pub struct RequestSettings {
    config: Arc<ApiConfiguration>,
    parameters: HashMap<String, String>,
    body: Option<serde_json::Value>,
    path: String,
    variant: ApiVariant,
    timeouts: Option<TimeoutSettings>,
    language: Language,
    unit_system: UnitSystem,
    format: ResponseFormat,
}

impl RequestSettings {
    /// Start a request with the API key plus the configured default language and unit system.
    pub fn new(config: Arc<ApiConfiguration>) -> Self {
        let mut settings = Self {
            parameters: HashMap::new(),
            body: None,
            path: String::new(),
            variant: ApiVariant::Standard,
            timeouts: None,
            language: config.language(),
            unit_system: config.unit_system(),
            format: ResponseFormat::Json,
            config,
        };

        let api_key = settings.config.api_key().to_owned();
        settings.parameters.insert(params::APPID.to_string(), api_key);

        let (lang, units) = (settings.language, settings.unit_system);
        settings.set_language(lang);
        settings.set_unit_system(units);
        settings
    }

    /// Insert or overwrite a query parameter.
    ///
    /// `lang`, `units` and `mode` are parsed and routed through their typed
    /// setters; values that don't parse are ignored.
    pub fn put_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        match key.as_str() {
            params::APPID => warn!("ignoring attempt to overwrite the API key parameter"),
            params::LANGUAGE => match Language::try_from(value.as_str()) {
                Ok(language) => self.set_language(language),
                Err(err) => warn!(%err, "ignoring invalid language parameter"),
            },
            params::UNITS => match UnitSystem::try_from(value.as_str()) {
                Ok(unit_system) => self.set_unit_system(unit_system),
                Err(err) => warn!(%err, "ignoring invalid units parameter"),
            },
            params::MODE => match ResponseFormat::try_from(value.as_str()) {
                Ok(format) => self.set_response_format(format),
                Err(err) => warn!(%err, "ignoring invalid mode parameter"),
            },
            _ => {
                self.parameters.insert(key, value);
            }
        }
    }

    /// Remove a query parameter.
    ///
    /// The API key and the typed keys (`lang`, `units`, `mode`) always keep a value.
    pub fn remove_parameter(&mut self, key: &str) {
        match key {
            params::APPID => warn!("ignoring attempt to remove the API key parameter"),
            params::LANGUAGE | params::UNITS | params::MODE => {
                warn!(key, "ignoring attempt to remove a typed parameter");
            }
            _ => {
                self.parameters.remove(key);
            }
        }
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.parameters.insert(params::LANGUAGE.to_string(), language.code().to_string());
    }

    pub fn set_unit_system(&mut self, unit_system: UnitSystem) {
        self.unit_system = unit_system;
        self.parameters.insert(params::UNITS.to_string(), unit_system.as_str().to_string());
    }

    pub fn set_response_format(&mut self, format: ResponseFormat) {
        self.format = format;
        self.parameters.insert(params::MODE.to_string(), format.as_str().to_string());
    }

    /// Append a path segment, e.g. `"data/2.5"` then `"weather"`.
    pub fn append_to_path(&mut self, fragment: &str) {
        let fragment = fragment.trim_matches('/');
        if fragment.is_empty() {
            return;
        }
        if !self.path.is_empty() {
            self.path.push('/');
        }
        self.path.push_str(fragment);
    }

    pub fn set_body(&mut self, body: serde_json::Value) {
        self.body = Some(body);
    }

    pub fn set_api_variant(&mut self, variant: ApiVariant) {
        self.variant = variant;
    }

    /// Override the configured timeouts for this request only.
    pub fn set_timeouts(&mut self, timeouts: TimeoutSettings) {
        self.timeouts = Some(timeouts);
    }

    pub fn config(&self) -> &ApiConfiguration {
        &self.config
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn api_variant(&self) -> ApiVariant {
        self.variant
    }

    /// Timeouts to apply: the per-request override, else the configured default.
    pub fn timeouts(&self) -> TimeoutSettings {
        self.timeouts.unwrap_or_else(|| self.config.timeouts())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.format
    }
}
