use std::sync::Arc;

use super::{Customize, apply_coordinates};
use crate::{
    client::ApiConfiguration,
    model::OneCall,
    params::{self, Coordinates, HttpMethod},
    settings::RequestSettings,
    terminator::{JSON_ONLY, ResponseTerminator},
};

/// A block of the one-call response that can be left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OneCallPart {
    Current,
    Minutely,
    Hourly,
    Daily,
    Alerts,
}

impl OneCallPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            OneCallPart::Current => "current",
            OneCallPart::Minutely => "minutely",
            OneCallPart::Hourly => "hourly",
            OneCallPart::Daily => "daily",
            OneCallPart::Alerts => "alerts",
        }
    }
}

/// `data/3.0/onecall`
#[derive(Debug)]
pub struct OneCallRequester {
    settings: RequestSettings,
}

impl OneCallRequester {
    pub(crate) fn new(config: Arc<ApiConfiguration>) -> Self {
        let mut settings = RequestSettings::new(config);
        settings.append_to_path("data/3.0");
        settings.append_to_path("onecall");
        Self { settings }
    }

    pub fn at(mut self, coordinates: Coordinates) -> Self {
        apply_coordinates(&mut self.settings, coordinates);
        self
    }

    /// Leave the given blocks out of the response. An empty slice clears the exclusion.
    pub fn exclude(mut self, parts: &[OneCallPart]) -> Self {
        if parts.is_empty() {
            self.settings.remove_parameter(params::EXCLUDE);
            return self;
        }

        let mut names: Vec<&str> = Vec::with_capacity(parts.len());
        for part in parts {
            if !names.contains(&part.as_str()) {
                names.push(part.as_str());
            }
        }
        self.settings.put_parameter(params::EXCLUDE, names.join(","));
        self
    }

    pub fn retrieve(self) -> ResponseTerminator<OneCall> {
        ResponseTerminator::new(self.settings, HttpMethod::Get, JSON_ONLY)
    }
}

impl Customize for OneCallRequester {
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
        model::one_call::tests::CHICAGO,
        params::UnitSystem,
        testing::{RecordingHttpClient, config_with},
    };

    #[test]
    fn exclusions_are_comma_joined() {
        let transport = Arc::new(RecordingHttpClient::ok(CHICAGO));
        let client = WeatherClient::from_shared(config_with(transport.clone()));

        let one_call = client
            .one_call()
            .at(Coordinates::new(33.44, -94.04).unwrap())
            .exclude(&[OneCallPart::Minutely, OneCallPart::Alerts])
            .unit_system(UnitSystem::Metric)
            .retrieve()
            .as_domain_object()
            .unwrap();

        let query = transport.last_query();
        assert_eq!(query["exclude"], "minutely,alerts");
        assert_eq!(query["lat"], "33.44");
        assert_eq!(query["lon"], "-94.04");
        assert!(transport.calls()[0].url.contains("/data/3.0/onecall?"));
        assert_eq!(one_call.current.unwrap().temperature.value(), 19.0);
    }

    #[test]
    fn empty_exclusion_removes_the_parameter() {
        let transport = Arc::new(RecordingHttpClient::ok(CHICAGO));
        let client = WeatherClient::from_shared(config_with(transport.clone()));

        client
            .one_call()
            .exclude(&[OneCallPart::Daily])
            .exclude(&[])
            .retrieve()
            .as_json()
            .unwrap();

        assert!(!transport.last_query().contains_key("exclude"));
    }

    #[test]
    fn xml_is_not_offered() {
        let transport = Arc::new(RecordingHttpClient::ok(CHICAGO));
        let client = WeatherClient::from_shared(config_with(transport.clone()));

        let err = client.one_call().retrieve().as_xml().unwrap_err();

        assert!(matches!(err, WeatherError::Unsupported(_)));
        assert!(transport.calls().is_empty());
    }
}
