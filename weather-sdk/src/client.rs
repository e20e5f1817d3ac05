use std::{fmt, sync::Arc};

use crate::{
    endpoint::{
        air_pollution::AirPollutionRequester, current::CurrentWeatherRequester,
        forecast::{ClimaticForecastRequester, DailyForecastRequester, HourlyForecastRequester},
        geocoding::GeocodingRequester, one_call::OneCallRequester, road_risk::RoadRiskRequester,
    },
    error::{Result, WeatherError},
    params::{ApiVariant, Language, UnitSystem},
    transport::{HttpClient, ReqwestHttpClient, TimeoutSettings},
};

pub const DEFAULT_STANDARD_HOST: &str = "api.openweathermap.org";
pub const DEFAULT_PRO_HOST: &str = "pro.openweathermap.org";

/// Everything shared by the requests of one client. Immutable once built.
pub struct ApiConfiguration {
    api_key: String,
    standard_host: String,
    pro_host: String,
    insecure: bool,
    transport: Arc<dyn HttpClient>,
    timeouts: TimeoutSettings,
    language: Language,
    unit_system: UnitSystem,
}

impl ApiConfiguration {
    pub fn builder(api_key: impl Into<String>) -> ApiConfigurationBuilder {
        ApiConfigurationBuilder {
            api_key: api_key.into(),
            standard_host: DEFAULT_STANDARD_HOST.to_string(),
            pro_host: DEFAULT_PRO_HOST.to_string(),
            insecure: false,
            transport: None,
            timeouts: TimeoutSettings::default(),
            language: Language::default(),
            unit_system: UnitSystem::default(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn host(&self, variant: ApiVariant) -> &str {
        match variant {
            ApiVariant::Standard => &self.standard_host,
            ApiVariant::Pro => &self.pro_host,
        }
    }

    pub fn scheme(&self) -> &'static str {
        if self.insecure { "http" } else { "https" }
    }

    pub fn transport(&self) -> &dyn HttpClient {
        self.transport.as_ref()
    }

    pub fn timeouts(&self) -> TimeoutSettings {
        self.timeouts
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.unit_system
    }
}

impl fmt::Debug for ApiConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfiguration")
            .field("api_key", &"<redacted>")
            .field("standard_host", &self.standard_host)
            .field("pro_host", &self.pro_host)
            .field("insecure", &self.insecure)
            .field("transport", &self.transport)
            .field("timeouts", &self.timeouts)
            .field("language", &self.language)
            .field("unit_system", &self.unit_system)
            .finish()
    }
}

#[derive(Debug)]
pub struct ApiConfigurationBuilder {
    api_key: String,
    standard_host: String,
    pro_host: String,
    insecure: bool,
    transport: Option<Arc<dyn HttpClient>>,
    timeouts: TimeoutSettings,
    language: Language,
    unit_system: UnitSystem,
}

impl ApiConfigurationBuilder {
    /// Host (optionally with port) for regular endpoints.
    pub fn standard_host(mut self, host: impl Into<String>) -> Self {
        self.standard_host = host.into();
        self
    }

    /// Host for subscription-only endpoints.
    pub fn pro_host(mut self, host: impl Into<String>) -> Self {
        self.pro_host = host.into();
        self
    }

    /// Use plain HTTP instead of HTTPS.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn HttpClient>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn timeouts(mut self, timeouts: TimeoutSettings) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Language applied to every request unless the call site overrides it.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Unit system applied to every request unless the call site overrides it.
    pub fn unit_system(mut self, unit_system: UnitSystem) -> Self {
        self.unit_system = unit_system;
        self
    }

    pub fn build(self) -> Result<ApiConfiguration> {
        if self.api_key.trim().is_empty() {
            return Err(WeatherError::InvalidArgument("API key must not be empty".to_string()));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestHttpClient::new(self.timeouts.connect)),
        };

        Ok(ApiConfiguration {
            api_key: self.api_key,
            standard_host: self.standard_host.trim_end_matches('/').to_string(),
            pro_host: self.pro_host.trim_end_matches('/').to_string(),
            insecure: self.insecure,
            transport,
            timeouts: self.timeouts,
            language: self.language,
            unit_system: self.unit_system,
        })
    }
}

/// Entry point: hands out one requester per endpoint family.
///
/// Cheap to clone; clones share the same configuration.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    config: Arc<ApiConfiguration>,
}

impl WeatherClient {
    /// Client with default hosts, timeouts and the reqwest transport.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::with_configuration(ApiConfiguration::builder(api_key).build()?))
    }

    pub fn with_configuration(config: ApiConfiguration) -> Self {
        Self::from_shared(Arc::new(config))
    }

    pub fn from_shared(config: Arc<ApiConfiguration>) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &ApiConfiguration {
        &self.config
    }

    pub fn current_weather(&self) -> CurrentWeatherRequester {
        CurrentWeatherRequester::new(self.config.clone())
    }

    pub fn hourly_forecast(&self) -> HourlyForecastRequester {
        HourlyForecastRequester::new(self.config.clone())
    }

    pub fn daily_forecast(&self) -> DailyForecastRequester {
        DailyForecastRequester::new(self.config.clone())
    }

    /// Subscription-only 30 day forecast served from the pro host.
    pub fn climatic_forecast(&self) -> ClimaticForecastRequester {
        ClimaticForecastRequester::new(self.config.clone())
    }

    pub fn one_call(&self) -> OneCallRequester {
        OneCallRequester::new(self.config.clone())
    }

    pub fn air_pollution(&self) -> AirPollutionRequester {
        AirPollutionRequester::new(self.config.clone())
    }

    pub fn geocoding(&self) -> GeocodingRequester {
        GeocodingRequester::new(self.config.clone())
    }

    pub fn road_risk(&self) -> RoadRiskRequester {
        RoadRiskRequester::new(self.config.clone())
    }
}
