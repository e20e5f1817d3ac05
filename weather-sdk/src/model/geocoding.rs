use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    params::{Coordinates, UnitSystem},
    terminator::FromWire,
};

/// One match returned by direct or reverse geocoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodingRecord {
    pub name: String,
    /// Localized names keyed by language code.
    pub local_names: HashMap<String, String>,
    pub coordinates: Coordinates,
    pub country: String,
    pub state: Option<String>,
}

impl GeocodingRecord {
    pub fn local_name(&self, code: &str) -> Option<&str> {
        self.local_names.get(code).map(String::as_str)
    }
}

/// Centroid of a zip/post code area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZipLocation {
    pub zip: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingWire {
    name: String,
    #[serde(default)]
    local_names: HashMap<String, String>,
    lat: f64,
    lon: f64,
    country: String,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ZipLocationWire {
    zip: String,
    name: String,
    lat: f64,
    lon: f64,
    country: String,
}

impl FromWire for GeocodingRecord {
    type Wire = GeocodingWire;

    fn from_wire(payload: GeocodingWire, _unit_system: UnitSystem) -> Result<Self> {
        Ok(GeocodingRecord {
            name: payload.name,
            local_names: payload.local_names,
            coordinates: Coordinates { latitude: payload.lat, longitude: payload.lon },
            country: payload.country,
            state: payload.state,
        })
    }
}

impl FromWire for ZipLocation {
    type Wire = ZipLocationWire;

    fn from_wire(payload: ZipLocationWire, _unit_system: UnitSystem) -> Result<Self> {
        Ok(ZipLocation {
            zip: payload.zip,
            name: payload.name,
            coordinates: Coordinates { latitude: payload.lat, longitude: payload.lon },
            country: payload.country,
        })
    }
}
