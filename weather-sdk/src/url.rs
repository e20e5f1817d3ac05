use crate::settings::RequestSettings;

/// Render `settings` into `scheme://host/path?k=v&...`.
///
/// Parameter order follows the underlying map and is not stable between
/// otherwise identical requests.
pub fn build_url(settings: &RequestSettings) -> String {
    let config = settings.config();
    let mut url = format!(
        "{}://{}/{}",
        config.scheme(),
        config.host(settings.api_variant()),
        settings.path()
    );

    let query = settings
        .parameters()
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// Same URL with the API key value masked, for logs and error messages.
pub(crate) fn redacted(url: &str, api_key: &str) -> String {
    let encoded = urlencoding::encode(api_key);
    url.replace(&format!("appid={encoded}"), "appid=***")
}
