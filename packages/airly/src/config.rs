//! Connection settings for the Airly API.

use crate::AirlyError;

/// Production Airly API root.
pub const DEFAULT_BASE_URL: &str = "https://airapi.airly.eu/v2";

/// Environment variable holding the Airly API key.
pub const API_KEY_ENV: &str = "AIRLY_API_KEY";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "AIRLY_BASE_URL";

/// Where to reach Airly and how to authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct AirlyConfig {
    /// API root without a trailing slash, e.g. `https://airapi.airly.eu/v2`.
    pub base_url: String,
    /// Value sent in the `apikey` header.
    pub api_key: String,
}

impl std::fmt::Debug for AirlyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirlyConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl AirlyConfig {
    /// Creates a config for the production API.
    ///
    /// # Errors
    ///
    /// Returns [`AirlyError::Config`] if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AirlyError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a config pointing at an arbitrary API root.
    ///
    /// # Errors
    ///
    /// Returns [`AirlyError::Config`] if `api_key` is blank.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, AirlyError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AirlyError::Config {
                message: "Airly API key is empty".to_string(),
            });
        }

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Reads the config from `AIRLY_API_KEY` and, optionally,
    /// `AIRLY_BASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`AirlyError::Config`] if `AIRLY_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self, AirlyError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| AirlyError::Config {
            message: format!("{API_KEY_ENV} environment variable not set"),
        })?;
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| {
            log::debug!("{BASE_URL_ENV} not set, using {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });

        Self::with_base_url(base_url, api_key)
    }
}
