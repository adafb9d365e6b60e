use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::time::Duration;

use crate::models::settings::AppSettings;

/// Client for the sector pages. Identity headers come from settings;
/// no timeout unless `request_timeout_secs` is set.
pub fn build_sector_client(settings: &AppSettings) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(&settings.user_agent)?);
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&settings.accept_language)?);
    headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"));

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .gzip(true);
    if let Some(secs) = settings.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
