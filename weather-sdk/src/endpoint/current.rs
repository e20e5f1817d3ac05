use std::sync::Arc;

use super::{Customize, Place};
use crate::{
    client::ApiConfiguration,
    model::Weather,
    params::HttpMethod,
    settings::RequestSettings,
    terminator::{ALL_FORMATS, ResponseTerminator},
};

/// `data/2.5/weather`: current conditions for one place.
#[derive(Debug)]
pub struct CurrentWeatherRequester {
    settings: RequestSettings,
}

impl CurrentWeatherRequester {
    pub(crate) fn new(config: Arc<ApiConfiguration>) -> Self {
        let mut settings = RequestSettings::new(config);
        settings.append_to_path("data/2.5");
        settings.append_to_path("weather");
        Self { settings }
    }

    pub fn at(mut self, place: impl Into<Place>) -> Self {
        place.into().apply(&mut self.settings);
        self
    }

    /// Available as JSON, XML and HTML.
    pub fn retrieve(self) -> ResponseTerminator<Weather> {
        ResponseTerminator::new(self.settings, HttpMethod::Get, ALL_FORMATS)
    }
}

impl Customize for CurrentWeatherRequester {
    fn settings_mut(&mut self) -> &mut RequestSettings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        WeatherClient,
        error::WeatherError,
        model::weather::tests::LONDON,
        params::{Language, UnitSystem},
        testing::{RecordingHttpClient, config_with},
    };

    fn client(transport: Arc<RecordingHttpClient>) -> WeatherClient {
        WeatherClient::from_shared(config_with(transport))
    }

    #[test]
    fn imperial_request_fetches_standard_and_presents_fahrenheit() {
        let transport = Arc::new(RecordingHttpClient::ok(LONDON));

        let weather = client(transport.clone())
            .current_weather()
            .at(Place::city_in("London", "GB"))
            .language(Language::French)
            .unit_system(UnitSystem::Imperial)
            .retrieve()
            .as_domain_object()
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].url.starts_with("https://api.openweathermap.org/data/2.5/weather?"));
        let query = transport.last_query();
        assert_eq!(query["units"], "standard");
        assert_eq!(query["q"], "London,GB");
        assert_eq!(query["lang"], "fr");
        assert_eq!(query["appid"], "test-key");
        assert_eq!(weather.temperature.as_fahrenheit(), 45.0);
        assert_eq!(weather.temperature.value(), 45.0);
        assert_eq!(weather.temperature.unit(), "°F");
    }

    #[test]
    fn raw_units_parameter_still_drives_presentation() {
        let transport = Arc::new(RecordingHttpClient::ok(LONDON));

        let weather = client(transport.clone())
            .current_weather()
            .at(Place::city("London"))
            .parameter("units", "imperial")
            .retrieve()
            .as_domain_object()
            .unwrap();

        assert_eq!(transport.last_query()["units"], "standard");
        assert_eq!(weather.temperature.unit(), "°F");
        assert_eq!(weather.temperature.value(), 45.0);
    }

    #[test]
    fn html_is_supported_and_returned_raw() {
        let transport = Arc::new(RecordingHttpClient::ok("<html></html>"));

        let html = client(transport.clone())
            .current_weather()
            .at(Place::id(2643743))
            .unit_system(UnitSystem::Metric)
            .retrieve()
            .as_html()
            .unwrap();

        assert_eq!(html, "<html></html>");
        let query = transport.last_query();
        assert_eq!(query["mode"], "html");
        assert_eq!(query["units"], "metric");
        assert_eq!(query["id"], "2643743");
    }

    #[test]
    fn not_found_city_is_distinguishable_from_bad_key() {
        let missing = Arc::new(RecordingHttpClient::status(
            404,
            r#"{"cod":"404","message":"city not found"}"#,
        ));
        let err = client(missing)
            .current_weather()
            .at(Place::city("Atlantis"))
            .retrieve()
            .as_domain_object();
        assert!(matches!(err, Err(WeatherError::NoDataFound { .. })));

        let unauthorized = Arc::new(RecordingHttpClient::status(401, r#"{"cod":401}"#));
        let err = client(unauthorized)
            .current_weather()
            .at(Place::city("London"))
            .retrieve()
            .as_domain_object();
        assert!(matches!(err, Err(WeatherError::InvalidAuthToken)));
    }
}
