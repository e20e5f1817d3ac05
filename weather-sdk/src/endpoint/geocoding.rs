use std::sync::Arc;

use super::{Customize, apply_coordinates, clamp_count};
use crate::{
    client::ApiConfiguration,
    model::{GeocodingRecord, ZipLocation},
    params::{self, Coordinates, HttpMethod},
    settings::RequestSettings,
    terminator::{JSON_ONLY, ListResponseTerminator, ResponseTerminator},
};

pub const MAX_GEOCODING_LIMIT: u32 = 5;

/// `geo/1.0`: place names to coordinates and back.
#[derive(Debug)]
pub struct GeocodingRequester {
    settings: RequestSettings,
}

impl GeocodingRequester {
    pub(crate) fn new(config: Arc<ApiConfiguration>) -> Self {
        let mut settings = RequestSettings::new(config);
        settings.append_to_path("geo/1.0");
        Self { settings }
    }

    /// Places matching `query` (`city`, `city,country` or `city,state,country`).
    pub fn direct(mut self, query: &str, limit: u32) -> ListResponseTerminator<GeocodingRecord> {
        self.settings.append_to_path("direct");
        self.settings.put_parameter(params::QUERY, query);
        self.put_limit(limit);
        ListResponseTerminator::new(self.settings, HttpMethod::Get, JSON_ONLY)
    }

    /// Named places near `coordinates`.
    pub fn reverse(
        mut self,
        coordinates: Coordinates,
        limit: u32,
    ) -> ListResponseTerminator<GeocodingRecord> {
        self.settings.append_to_path("reverse");
        apply_coordinates(&mut self.settings, coordinates);
        self.put_limit(limit);
        ListResponseTerminator::new(self.settings, HttpMethod::Get, JSON_ONLY)
    }

    pub fn zip(mut self, zip: &str, country: &str) -> ResponseTerminator<ZipLocation> {
        self.settings.append_to_path("zip");
        self.settings.put_parameter(params::ZIP, format!("{zip},{country}"));
        ResponseTerminator::new(self.settings, HttpMethod::Get, JSON_ONLY)
    }

    fn put_limit(&mut self, limit: u32) {
        let limit = clamp_count(limit, MAX_GEOCODING_LIMIT, "geocoding");
        self.settings.put_parameter(params::LIMIT, limit.to_string());
    }
}

impl Customize for GeocodingRequester {
    fn settings_mut(&mut self) -> &mut RequestSettings {
        &mut self.settings
    }
}
