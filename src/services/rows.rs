// src/services/rows.rs

//! Row fetching and the process-lifetime row cache.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Config, Row};
use crate::utils::http;

/// Message used when the endpoint reports failure without saying why.
pub const UNKNOWN_API_ERROR: &str = "Unknown API error";

/// Where rows come from.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Fetch the full, unfiltered row set. One attempt, no retry.
    async fn fetch_rows(&self) -> Result<Vec<Row>>;
}

/// Fetches rows from the spreadsheet-backed JSON endpoint.
pub struct HttpRowSource {
    client: Client,
    url: Url,
}

impl HttpRowSource {
    /// Build a source from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = http::create_async_client(&config.fetch)?;
        Ok(Self::with_client(client, config.source_url()?))
    }

    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl RowSource for HttpRowSource {
    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_envelope(&body)
    }
}

/// Validate the `{ ok, data, error }` envelope and extract its rows.
///
/// A missing or non-array `data` yields no rows; non-object entries are
/// skipped.
pub fn parse_envelope(body: &str) -> Result<Vec<Row>> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| AppError::api(format!("Response was not valid JSON: {e}")))?;

    if envelope.get("ok") != Some(&Value::Bool(true)) {
        let message = envelope
            .get("error")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(UNKNOWN_API_ERROR);
        return Err(AppError::api(message));
    }

    let rows = envelope
        .get("data")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|fields| Row::new(fields.clone()))
                .collect()
        })
        .unwrap_or_default();
    Ok(rows)
}

/// Memoizing row cache in front of a [`RowSource`].
///
/// Populated on the first successful fetch and kept until [`invalidate`].
/// The slot lock is held for the duration of a cold fetch, so concurrent
/// callers share one request instead of racing duplicates.
///
/// [`invalidate`]: RowStore::invalidate
pub struct RowStore {
    source: Arc<dyn RowSource>,
    cache: Mutex<Option<Arc<Vec<Row>>>>,
}

impl RowStore {
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(None),
        }
    }

    /// Build a store backed by the configured HTTP endpoint.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpRowSource::new(config)?)))
    }

    /// Return cached rows, fetching them on a cold cache.
    ///
    /// A failed fetch leaves the cache empty; the next call tries again.
    pub async fn get_rows(&self) -> Result<Arc<Vec<Row>>> {
        let mut slot = self.cache.lock().await;
        if let Some(rows) = slot.as_ref() {
            log::debug!("Row cache hit ({} rows)", rows.len());
            return Ok(Arc::clone(rows));
        }

        log::info!("Fetching award rows from data endpoint...");
        let rows = match self.source.fetch_rows().await {
            Ok(rows) => Arc::new(rows),
            Err(e) => {
                log::warn!("Row fetch failed: {}", e);
                return Err(e);
            }
        };
        log::info!("Cached {} rows", rows.len());

        *slot = Some(Arc::clone(&rows));
        Ok(rows)
    }

    /// Drop the cached rows; the next [`get_rows`](Self::get_rows) refetches.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
        log::info!("Row cache invalidated");
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.lock().await.is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde_json::json;

    /// In-memory source counting how often it is hit.
    pub(crate) struct CountingSource {
        pub rows: Vec<Row>,
        pub calls: AtomicUsize,
        pub delay: Duration,
        /// Number of leading calls that fail
        pub failures: usize,
    }

    impl CountingSource {
        pub(crate) fn new(rows: Vec<Row>) -> Self {
            Self {
                rows,
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
                failures: 0,
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RowSource for CountingSource {
        async fn fetch_rows(&self) -> Result<Vec<Row>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if call < self.failures {
                return Err(AppError::Network { status: 500 });
            }
            Ok(self.rows.clone())
        }
    }

    pub(crate) fn sample_rows(values: Value) -> Vec<Row> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_envelope_ok() {
        let rows = parse_envelope(
            r#"{"ok": true, "data": [{"Year": 2024, "Title": "GOTY", "Winner": "Foo"}, 7]}"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year(), Some(2024));
    }

    #[test]
    fn test_envelope_missing_data_is_empty() {
        assert!(parse_envelope(r#"{"ok": true}"#).unwrap().is_empty());
        assert!(parse_envelope(r#"{"ok": true, "data": "nope"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_envelope_failure_message() {
        let err = parse_envelope(r#"{"ok": false, "error": "sheet not found"}"#).unwrap_err();
        assert!(matches!(err, AppError::Api(ref m) if m == "sheet not found"));

        let err = parse_envelope(r#"{"ok": "true"}"#).unwrap_err();
        assert!(matches!(err, AppError::Api(ref m) if m == UNKNOWN_API_ERROR));
    }

    #[test]
    fn test_envelope_not_json() {
        let err = parse_envelope("<html>oops</html>").unwrap_err();
        assert!(matches!(err, AppError::Api(_)));
    }

    #[tokio::test]
    async fn test_rows_fetched_once() {
        let source = Arc::new(CountingSource::new(sample_rows(json!([
            {"Year": 2024, "Title": "GOTY", "Winner": "Foo"}
        ]))));
        let store = RowStore::new(source.clone());

        let first = store.get_rows().await.unwrap();
        let second = store.get_rows().await.unwrap();
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_cold_callers_share_fetch() {
        let mut source = CountingSource::new(sample_rows(json!([{"Year": 2024}])));
        source.delay = Duration::from_millis(30);
        let source = Arc::new(source);
        let store = RowStore::new(source.clone());

        let (a, b) = tokio::join!(store.get_rows(), store.get_rows());
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_not_cached() {
        let mut source = CountingSource::new(sample_rows(json!([{"Year": 2024}])));
        source.failures = 1;
        let source = Arc::new(source);
        let store = RowStore::new(source.clone());

        assert!(matches!(
            store.get_rows().await,
            Err(AppError::Network { status: 500 })
        ));
        assert!(!store.is_cached().await);

        assert_eq!(store.get_rows().await.unwrap().len(), 1);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = Arc::new(CountingSource::new(Vec::new()));
        let store = RowStore::new(source.clone());

        store.get_rows().await.unwrap();
        store.invalidate().await;
        assert!(!store.is_cached().await);
        store.get_rows().await.unwrap();
        assert_eq!(source.calls(), 2);
    }
}
