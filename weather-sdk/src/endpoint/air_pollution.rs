use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{Customize, apply_coordinates};
use crate::{
    client::ApiConfiguration,
    error::{Result, WeatherError},
    model::AirPollution,
    params::{self, Coordinates, HttpMethod},
    settings::RequestSettings,
    terminator::{JSON_ONLY, ResponseTerminator},
};

/// `data/2.5/air_pollution` and its `forecast` and `history` variants.
#[derive(Debug)]
pub struct AirPollutionRequester {
    settings: RequestSettings,
}

impl AirPollutionRequester {
    pub(crate) fn new(config: Arc<ApiConfiguration>) -> Self {
        let mut settings = RequestSettings::new(config);
        settings.append_to_path("data/2.5");
        settings.append_to_path("air_pollution");
        Self { settings }
    }

    pub fn current(mut self, coordinates: Coordinates) -> ResponseTerminator<AirPollution> {
        apply_coordinates(&mut self.settings, coordinates);
        self.terminate()
    }

    /// Hourly forecast for the next four days.
    pub fn forecast(mut self, coordinates: Coordinates) -> ResponseTerminator<AirPollution> {
        self.settings.append_to_path("forecast");
        apply_coordinates(&mut self.settings, coordinates);
        self.terminate()
    }

    /// Hourly history between `start` and `end`.
    pub fn history(
        mut self,
        coordinates: Coordinates,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ResponseTerminator<AirPollution>> {
        if end < start {
            return Err(WeatherError::InvalidArgument(format!(
                "history end {end} is before start {start}"
            )));
        }

        self.settings.append_to_path("history");
        apply_coordinates(&mut self.settings, coordinates);
        self.settings.put_parameter(params::START, start.timestamp().to_string());
        self.settings.put_parameter(params::END, end.timestamp().to_string());
        Ok(self.terminate())
    }

    fn terminate(self) -> ResponseTerminator<AirPollution> {
        ResponseTerminator::new(self.settings, HttpMethod::Get, JSON_ONLY)
    }
}

impl Customize for AirPollutionRequester {
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
        model::{AirQualityIndex, air_pollution::tests::CURRENT},
        testing::{RecordingHttpClient, config_with},
    };

    fn coordinates() -> Coordinates {
        Coordinates::new(50.0, 50.0).unwrap()
    }

    #[test]
    fn current_air_quality() {
        let transport = Arc::new(RecordingHttpClient::ok(CURRENT));
        let client = WeatherClient::from_shared(config_with(transport.clone()));

        let air = client.air_pollution().current(coordinates()).as_domain_object().unwrap();

        assert_eq!(air.records[0].index, AirQualityIndex::Fair);
        assert!(transport.calls()[0].url.contains("/data/2.5/air_pollution?"));
    }

    #[test]
    fn forecast_uses_sub_path() {
        let transport = Arc::new(RecordingHttpClient::ok(CURRENT));
        let client = WeatherClient::from_shared(config_with(transport.clone()));

        client.air_pollution().forecast(coordinates()).as_json().unwrap();

        assert!(transport.calls()[0].url.contains("/data/2.5/air_pollution/forecast?"));
    }

    #[test]
    fn history_sends_unix_bounds() {
        let transport = Arc::new(RecordingHttpClient::ok(CURRENT));
        let client = WeatherClient::from_shared(config_with(transport.clone()));
        let start = DateTime::from_timestamp(1606223802, 0).unwrap();
        let end = DateTime::from_timestamp(1606482999, 0).unwrap();

        client
            .air_pollution()
            .history(coordinates(), start, end)
            .unwrap()
            .as_domain_object()
            .unwrap();

        let query = transport.last_query();
        assert_eq!(query["start"], "1606223802");
        assert_eq!(query["end"], "1606482999");
        assert!(transport.calls()[0].url.contains("/air_pollution/history?"));
    }

    #[test]
    fn inverted_history_range_is_rejected_before_sending() {
        let transport = Arc::new(RecordingHttpClient::ok(CURRENT));
        let client = WeatherClient::from_shared(config_with(transport.clone()));
        let start = DateTime::from_timestamp(1606482999, 0).unwrap();
        let end = DateTime::from_timestamp(1606223802, 0).unwrap();

        let err = client.air_pollution().history(coordinates(), start, end).unwrap_err();

        assert!(matches!(err, WeatherError::InvalidArgument(_)));
        assert!(transport.calls().is_empty());
    }
}
