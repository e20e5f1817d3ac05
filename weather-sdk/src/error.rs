//! Error types surfaced by the request pipeline.
//!
//! Each failure kind gets its own variant so callers can branch on
//! "the server rejected our key" vs. "the server had nothing for us" vs.
//! "the server answered but we could not read it".

use thiserror::Error;

use crate::transport::TransportError;

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum WeatherError {
    /// The API key was rejected or lacks access to the endpoint (HTTP 401).
    #[error("invalid or insufficiently privileged API key")]
    InvalidAuthToken,

    /// No data for the requested location/time window, a malformed request,
    /// or any unclassified transport failure.
    #[error("no data found: {message}")]
    NoDataFound {
        status: Option<u16>,
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// The response arrived but did not match the expected model shape.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The requested representation or feature is not offered by this endpoint.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The background worker running an async request panicked or was aborted.
    #[error("async request did not complete: {0}")]
    Task(String),
}

impl WeatherError {
    pub(crate) fn no_data(status: u16, body: &str) -> Self {
        WeatherError::NoDataFound {
            status: Some(status),
            message: format!("server responded with status {status}: {}", truncate_body(body)),
            source: None,
        }
    }

    /// HTTP status reported by the server, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::InvalidAuthToken => Some(401),
            WeatherError::NoDataFound { status, .. } => *status,
            _ => None,
        }
    }

    /// True when the request failed because a connect or read timeout elapsed.
    ///
    /// Timeouts are still reported as [`WeatherError::NoDataFound`].
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            WeatherError::NoDataFound { source: Some(err), .. } if err.is_timeout()
        )
    }
}

impl From<TransportError> for WeatherError {
    fn from(err: TransportError) -> Self {
        WeatherError::NoDataFound {
            status: None,
            message: "request could not be completed".to_string(),
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
