// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};

use crate::error::Result;
use crate::models::FetchConfig;

/// Create a configured asynchronous HTTP client.
///
/// Every request carries `no-cache` headers so intermediaries never hand
/// back a stale copy of the dataset.
pub fn create_async_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()?;
    Ok(client)
}
