//! Pluggable HTTP transport.
//!
//! The pipeline only needs "GET this URL" and "POST this JSON to this URL",
//! both returning a status code and a body. Anything that can do that can be
//! plugged into [`crate::ApiConfiguration`]; [`ReqwestHttpClient`] is the
//! default.

use std::{error::Error as StdError, fmt::Debug, sync::OnceLock, time::Duration};

use thiserror::Error;

/// Connect and read timeouts, configured independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSettings {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read: Duration::from_secs(30),
        }
    }
}

/// Status and body of a completed exchange. Non-2xx statuses are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The exchange could not be completed at all (DNS, connect, TLS, timeout, body read).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    timed_out: bool,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), timed_out: false, source: None }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self { message: message.into(), timed_out: true, source: None }
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }
}

/// Blocking HTTP capability used by the request executor.
pub trait HttpClient: Send + Sync + Debug {
    fn get(&self, url: &str, timeouts: &TimeoutSettings) -> Result<HttpResponse, TransportError>;

    fn post(
        &self,
        url: &str,
        json_body: &str,
        timeouts: &TimeoutSettings,
    ) -> Result<HttpResponse, TransportError>;
}

/// Default transport backed by `reqwest::blocking`.
///
/// The underlying client is built on first use, so a `ReqwestHttpClient` can
/// be created inside an async context as long as requests are sent from a
/// blocking thread (the async terminators use Tokio's blocking pool).
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    http: OnceLock<reqwest::blocking::Client>,
    connect_timeout: Duration,
}

impl ReqwestHttpClient {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { http: OnceLock::new(), connect_timeout }
    }

    fn client_for(
        &self,
        timeouts: &TimeoutSettings,
    ) -> Result<reqwest::blocking::Client, TransportError> {
        // reqwest fixes the connect timeout per client, so an override needs its own client.
        if timeouts.connect != self.connect_timeout {
            return build_client(timeouts.connect);
        }
        if let Some(client) = self.http.get() {
            return Ok(client.clone());
        }
        let client = build_client(self.connect_timeout)?;
        Ok(self.http.get_or_init(|| client).clone())
    }

    fn send(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<HttpResponse, TransportError> {
        let res = request.send().map_err(map_reqwest_error)?;
        let status = res.status().as_u16();
        let body = res.text().map_err(map_reqwest_error)?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &str, timeouts: &TimeoutSettings) -> Result<HttpResponse, TransportError> {
        let client = self.client_for(timeouts)?;
        self.send(client.get(url).timeout(timeouts.read))
    }

    fn post(
        &self,
        url: &str,
        json_body: &str,
        timeouts: &TimeoutSettings,
    ) -> Result<HttpResponse, TransportError> {
        let client = self.client_for(timeouts)?;
        self.send(
            client
                .post(url)
                .timeout(timeouts.read)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(json_body.to_owned()),
        )
    }
}

fn build_client(connect_timeout: Duration) -> Result<reqwest::blocking::Client, TransportError> {
    reqwest::blocking::Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .map_err(|e| TransportError::new("failed to build HTTP client").with_source(e))
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    let message = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "failed to connect to the weather API"
    } else {
        "failed to exchange data with the weather API"
    };

    let base = if err.is_timeout() {
        TransportError::timeout(message)
    } else {
        TransportError::new(message)
    };
    base.with_source(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeouts_are_independent() {
        let timeouts = TimeoutSettings::default();
        assert_eq!(timeouts.connect, Duration::from_secs(10));
        assert_eq!(timeouts.read, Duration::from_secs(30));
    }

    #[test]
    fn transport_error_carries_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TransportError::new("connect failed").with_source(io);

        assert!(!err.is_timeout());
        assert_eq!(err.to_string(), "connect failed");
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = ReqwestHttpClient::new(Duration::from_millis(500));
        let err = client.get(&format!("http://{addr}/"), &TimeoutSettings::default()).unwrap_err();
        assert!(StdError::source(&err).is_some());
    }
}
