use tracing::{debug, error};

use crate::{
    error::{Result, WeatherError},
    params::HttpMethod,
    settings::RequestSettings,
    transport::HttpResponse,
    url::{build_url, redacted},
};

/// Performs exactly one HTTP round trip per call. No retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestExecutor;

impl RequestExecutor {
    /// Send the request described by `settings` and return the raw body.
    pub fn execute(&self, settings: &RequestSettings, method: HttpMethod) -> Result<String> {
        let config = settings.config();
        let url = build_url(settings);
        let timeouts = settings.timeouts();
        let log_url = redacted(&url, config.api_key());

        debug!(?method, url = %log_url, "sending weather API request");

        let response = match method {
            HttpMethod::Get => config.transport().get(&url, &timeouts),
            HttpMethod::Post => {
                let body = match settings.body() {
                    Some(body) => serde_json::to_string(body).map_err(|e| {
                        WeatherError::InvalidArgument(format!(
                            "request body is not serializable: {e}"
                        ))
                    })?,
                    None => String::new(),
                };
                config.transport().post(&url, &body, &timeouts)
            }
        };

        let response = response.map_err(|e| {
            error!(url = %log_url, error = %e, "weather API request failed");
            WeatherError::from(e)
        })?;

        check_status(response, &log_url)
    }
}

fn check_status(response: HttpResponse, log_url: &str) -> Result<String> {
    let HttpResponse { status, body } = response;
    match status {
        200..=299 => Ok(body),
        401 => {
            error!(status, url = %log_url, "weather API rejected the API key");
            Err(WeatherError::InvalidAuthToken)
        }
        _ => {
            error!(status, url = %log_url, "weather API returned an error status");
            Err(WeatherError::no_data(status, &body))
        }
    }
}
