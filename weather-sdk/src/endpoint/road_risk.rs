use std::sync::Arc;

use serde_json::json;

use super::Customize;
use crate::{
    client::ApiConfiguration,
    error::{Result, WeatherError},
    model::{RoadRisk, TrackPoint},
    params::HttpMethod,
    settings::RequestSettings,
    terminator::{JSON_ONLY, ListResponseTerminator},
};

/// `data/2.5/roadrisk`: weather and road state along a route.
#[derive(Debug)]
pub struct RoadRiskRequester {
    settings: RequestSettings,
}

impl RoadRiskRequester {
    pub(crate) fn new(config: Arc<ApiConfiguration>) -> Self {
        let mut settings = RequestSettings::new(config);
        settings.append_to_path("data/2.5");
        settings.append_to_path("roadrisk");
        Self { settings }
    }

    /// One result per track point, in track order.
    pub fn route(mut self, track: &[TrackPoint]) -> Result<ListResponseTerminator<RoadRisk>> {
        if track.is_empty() {
            return Err(WeatherError::InvalidArgument(
                "road risk track must contain at least one point".to_string(),
            ));
        }

        self.settings.set_body(json!({ "track": track }));
        Ok(ListResponseTerminator::new(self.settings, HttpMethod::Post, JSON_ONLY))
    }
}

impl Customize for RoadRiskRequester {
    fn settings_mut(&mut self) -> &mut RequestSettings {
        &mut self.settings
    }
}
