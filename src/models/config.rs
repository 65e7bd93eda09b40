//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote data endpoint settings
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP client behavior for the data fetch
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Site routing and presentation settings
    #[serde(default)]
    pub site: SiteConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Chip strip geometry used for scroll planning
    #[serde(default)]
    pub carousel: CarouselConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.endpoint.trim().is_empty() {
            return Err(AppError::validation("source.endpoint is empty"));
        }
        Url::parse(&self.source.endpoint)?;
        if self.source.dataset_param.trim().is_empty() {
            return Err(AppError::validation("source.dataset_param is empty"));
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        let listing = self.site.listing.trim();
        if listing.is_empty() || listing.contains('/') {
            return Err(AppError::validation(
                "site.listing must be a single non-empty path segment",
            ));
        }
        if self.site.restore_cookie.trim().is_empty() {
            return Err(AppError::validation("site.restore_cookie is empty"));
        }
        if self.carousel.chip_width <= 0.0 || self.carousel.viewport_width <= 0.0 {
            return Err(AppError::validation(
                "carousel.chip_width and carousel.viewport_width must be > 0",
            ));
        }
        if self.carousel.chip_gap < 0.0 {
            return Err(AppError::validation("carousel.chip_gap must be >= 0"));
        }
        Ok(())
    }

    /// Full request URL for the configured dataset.
    pub fn source_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.source.endpoint)?;
        url.query_pairs_mut()
            .append_pair(&self.source.dataset_param, &self.source.dataset_id);
        Ok(url)
    }
}

/// Remote spreadsheet-backed data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the JSON endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Query parameter naming the dataset
    #[serde(default = "defaults::dataset_param")]
    pub dataset_param: String,

    /// Dataset identifier sent in `dataset_param`
    #[serde(default = "defaults::dataset_id")]
    pub dataset_id: String,

    /// Label stored in every built year record
    #[serde(default = "defaults::label")]
    pub label: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            dataset_param: defaults::dataset_param(),
            dataset_id: defaults::dataset_id(),
            label: defaults::label(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Routing and presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// First path segment of every in-app route
    #[serde(default = "defaults::listing")]
    pub listing: String,

    /// Document title prefix
    #[serde(default = "defaults::title")]
    pub title: String,

    /// Directory served under `/img`; image fallback checks it when set
    #[serde(default = "defaults::image_dir")]
    pub image_dir: Option<PathBuf>,

    /// Image shown when no candidate exists
    #[serde(default = "defaults::placeholder_image")]
    pub placeholder_image: String,

    /// Cookie set by the static fallback page to restore a deep link
    #[serde(default = "defaults::restore_cookie")]
    pub restore_cookie: String,
}

impl SiteConfig {
    /// Canonical listing path, always with a trailing slash.
    pub fn listing_path(&self) -> String {
        format!("/{}/", self.listing)
    }

    /// Canonical year detail path.
    pub fn year_path(&self, year: i32) -> String {
        format!("/{}/{}/", self.listing, year)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listing: defaults::listing(),
            title: defaults::title(),
            image_dir: defaults::image_dir(),
            placeholder_image: defaults::placeholder_image(),
            restore_cookie: defaults::restore_cookie(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind
    #[serde(default = "defaults::bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::bind(),
        }
    }
}

/// Chip strip geometry, in CSS pixels.
///
/// The stylesheet is generated from these values, so the planned scroll and
/// the rendered strip share one layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "defaults::chip_width")]
    pub chip_width: f64,

    #[serde(default = "defaults::chip_gap")]
    pub chip_gap: f64,

    /// Assumed visible width of the strip
    #[serde(default = "defaults::viewport_width")]
    pub viewport_width: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            chip_width: defaults::chip_width(),
            chip_gap: defaults::chip_gap(),
            viewport_width: defaults::viewport_width(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Source defaults
    pub fn endpoint() -> String {
        "https://script.google.com/macros/s/awardhub/exec".into()
    }
    pub fn dataset_param() -> String {
        "sheet".into()
    }
    pub fn dataset_id() -> String {
        "steamawards".into()
    }
    pub fn label() -> String {
        "Steam Awards".into()
    }

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; AwardHub/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Site defaults
    pub fn listing() -> String {
        "steamawards".into()
    }
    pub fn title() -> String {
        "AwardHub".into()
    }
    pub fn image_dir() -> Option<PathBuf> {
        Some(PathBuf::from("img"))
    }
    pub fn placeholder_image() -> String {
        crate::utils::slug::PLACEHOLDER_IMAGE.into()
    }
    pub fn restore_cookie() -> String {
        "awardhub_restore".into()
    }

    // Server defaults
    pub fn bind() -> String {
        "0.0.0.0:8080".into()
    }

    // Carousel defaults
    pub fn chip_width() -> f64 {
        180.0
    }
    pub fn chip_gap() -> f64 {
        12.0
    }
    pub fn viewport_width() -> f64 {
        960.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        let mut config = Config::default();
        config.source.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_nested_listing() {
        let mut config = Config::default();
        config.site.listing = "steam/awards".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [site]
            listing = "gameawards"
            "#,
        )
        .unwrap();
        assert_eq!(config.site.listing, "gameawards");
        assert_eq!(config.site.listing_path(), "/gameawards/");
        assert_eq!(config.source.dataset_id, "steamawards");
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn source_url_appends_dataset() {
        let mut config = Config::default();
        config.source.endpoint = "https://example.com/exec".to_string();
        let url = config.source_url().unwrap();
        assert_eq!(url.as_str(), "https://example.com/exec?sheet=steamawards");
    }

    #[test]
    fn bundled_config_loads_and_validates() {
        let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/config.toml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.site.image_dir, Some(PathBuf::from("img")));
        assert_eq!(config.carousel.chip_gap, 12.0);
    }
}
