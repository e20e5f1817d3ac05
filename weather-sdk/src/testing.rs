//! Test doubles shared by the unit tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::{
    client::ApiConfiguration,
    params::HttpMethod,
    settings::RequestSettings,
    transport::{HttpClient, HttpResponse, TimeoutSettings, TransportError},
};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Timeout,
}

/// Returns one canned reply for every call and remembers what was asked.
#[derive(Debug)]
pub struct RecordingHttpClient {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingHttpClient {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            reply: Reply::Response(HttpResponse { status, body: body.to_string() }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn timing_out() -> Self {
        Self { reply: Reply::Timeout, calls: Mutex::new(Vec::new()) }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Query parameters of the last call.
    pub fn last_query(&self) -> HashMap<String, String> {
        let calls = self.calls();
        let last = calls.last().expect("no request was sent");
        query_pairs(&last.url)
    }

    fn record(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<&str>,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_string(),
            body: body.map(str::to_string),
        });
        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Timeout => Err(TransportError::timeout("read timed out")),
        }
    }
}

impl HttpClient for RecordingHttpClient {
    fn get(&self, url: &str, _timeouts: &TimeoutSettings) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Get, url, None)
    }

    fn post(
        &self,
        url: &str,
        json_body: &str,
        _timeouts: &TimeoutSettings,
    ) -> Result<HttpResponse, TransportError> {
        self.record(HttpMethod::Post, url, Some(json_body))
    }
}

pub fn config_with(transport: Arc<RecordingHttpClient>) -> Arc<ApiConfiguration> {
    Arc::new(
        ApiConfiguration::builder("test-key")
            .transport(transport)
            .build()
            .expect("test configuration is valid"),
    )
}

pub fn test_config() -> Arc<ApiConfiguration> {
    config_with(Arc::new(RecordingHttpClient::ok("{}")))
}

pub fn settings_with(client: RecordingHttpClient) -> (RequestSettings, Arc<RecordingHttpClient>) {
    let transport = Arc::new(client);
    let mut settings = RequestSettings::new(config_with(transport.clone()));
    settings.append_to_path("data/2.5/weather");
    (settings, transport)
}

pub fn query_pairs(url: &str) -> HashMap<String, String> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (
                urlencoding::decode(key).unwrap().into_owned(),
                urlencoding::decode(value).unwrap().into_owned(),
            )
        })
        .collect()
}
