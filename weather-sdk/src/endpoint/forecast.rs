use std::sync::Arc;

use super::{Customize, Place, clamp_count};
use crate::{
    client::ApiConfiguration,
    model::{DailyForecast, Forecast},
    params::{self, ApiVariant, HttpMethod},
    settings::RequestSettings,
    terminator::{JSON_XML, ResponseTerminator},
};

pub const MAX_HOURLY_COUNT: u32 = 40;
pub const MAX_DAILY_COUNT: u32 = 16;
pub const MAX_CLIMATIC_COUNT: u32 = 30;

fn forecast_settings(config: Arc<ApiConfiguration>, path: &str) -> RequestSettings {
    let mut settings = RequestSettings::new(config);
    settings.append_to_path("data/2.5");
    settings.append_to_path(path);
    settings
}

/// `data/2.5/forecast`: five days in three hour steps.
#[derive(Debug)]
pub struct HourlyForecastRequester {
    settings: RequestSettings,
}

impl HourlyForecastRequester {
    pub(crate) fn new(config: Arc<ApiConfiguration>) -> Self {
        Self { settings: forecast_settings(config, "forecast") }
    }

    pub fn at(mut self, place: impl Into<Place>) -> Self {
        place.into().apply(&mut self.settings);
        self
    }

    /// Number of three hour steps, at most 40.
    pub fn count(mut self, count: u32) -> Self {
        let count = clamp_count(count, MAX_HOURLY_COUNT, "hourly forecast");
        self.settings.put_parameter(params::COUNT, count.to_string());
        self
    }

    pub fn retrieve(self) -> ResponseTerminator<Forecast> {
        ResponseTerminator::new(self.settings, HttpMethod::Get, JSON_XML)
    }
}

impl Customize for HourlyForecastRequester {
    fn settings_mut(&mut self) -> &mut RequestSettings {
        &mut self.settings
    }
}

/// `data/2.5/forecast/daily`: up to 16 days.
#[derive(Debug)]
pub struct DailyForecastRequester {
    settings: RequestSettings,
}

impl DailyForecastRequester {
    pub(crate) fn new(config: Arc<ApiConfiguration>) -> Self {
        Self { settings: forecast_settings(config, "forecast/daily") }
    }

    pub fn at(mut self, place: impl Into<Place>) -> Self {
        place.into().apply(&mut self.settings);
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        let days = clamp_count(days, MAX_DAILY_COUNT, "daily forecast");
        self.settings.put_parameter(params::COUNT, days.to_string());
        self
    }

    pub fn retrieve(self) -> ResponseTerminator<DailyForecast> {
        ResponseTerminator::new(self.settings, HttpMethod::Get, JSON_XML)
    }
}

impl Customize for DailyForecastRequester {
    fn settings_mut(&mut self) -> &mut RequestSettings {
        &mut self.settings
    }
}

/// `data/2.5/forecast/climate` on the pro host: up to 30 days.
#[derive(Debug)]
pub struct ClimaticForecastRequester {
    settings: RequestSettings,
}

impl ClimaticForecastRequester {
    pub(crate) fn new(config: Arc<ApiConfiguration>) -> Self {
        let mut settings = forecast_settings(config, "forecast/climate");
        settings.set_api_variant(ApiVariant::Pro);
        Self { settings }
    }

    pub fn at(mut self, place: impl Into<Place>) -> Self {
        place.into().apply(&mut self.settings);
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        let days = clamp_count(days, MAX_CLIMATIC_COUNT, "climatic forecast");
        self.settings.put_parameter(params::COUNT, days.to_string());
        self
    }

    pub fn retrieve(self) -> ResponseTerminator<DailyForecast> {
        ResponseTerminator::new(self.settings, HttpMethod::Get, JSON_XML)
    }
}

impl Customize for ClimaticForecastRequester {
    fn settings_mut(&mut self) -> &mut RequestSettings {
        &mut self.settings
    }
}
