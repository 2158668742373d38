#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client for the [Airly](https://developer.airly.org/en/api) air quality API.
//!
//! Fetches point measurements, parses the `current` and `history`
//! sections of the response into
//! [`PollutionSnapshot`](air_info_pollution_models::PollutionSnapshot)s,
//! and averages history across Kraków's districts.
//!
//! Requests go out one at a time. Nothing is retried: a rate-limited
//! response surfaces as [`AirlyError::RateLimited`] and the caller picks
//! the retry policy.

pub mod client;
pub mod config;
pub mod naming;
pub mod parsing;
pub mod transport;

pub use client::{AirlyConnector, PollutionReport};
pub use config::AirlyConfig;
pub use parsing::ParseError;

use air_info_pollution::AggregateError;

/// Errors that can occur while talking to the Airly API.
#[derive(Debug, thiserror::Error)]
pub enum AirlyError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Airly answered `429 Too Many Requests`.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Airly answered with a non-success status other than 429.
    #[error("Unexpected HTTP status {status}")]
    Status {
        /// The status code that was returned.
        status: reqwest::StatusCode,
    },

    /// Client configuration is missing or invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what is wrong.
        message: String,
    },

    /// Averaging fetched snapshots failed.
    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),
}
