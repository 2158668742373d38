//! Orchestration: fetch a point measurement, parse it, optionally average.

use air_info_district_models::District;
use air_info_pollution::{AggregateError, AveragingMode, average_snapshots_with};
use air_info_pollution_models::PollutionSnapshot;
use reqwest::StatusCode;

use crate::{
    AirlyConfig, AirlyError, ParseError, parsing,
    transport::{FetchResponse, HttpFetcher, ReqwestFetcher},
};

/// Result of a single Airly call: the HTTP status it was answered with,
/// the parsed data, and the parse failure if the data is a fallback.
#[derive(Debug)]
pub struct PollutionReport<T> {
    /// Status of the response the data was parsed from.
    pub status: StatusCode,
    /// Parsed data, or the fail-soft fallback when `parse_error` is set.
    pub data: T,
    /// Why parsing failed, if it did.
    pub parse_error: Option<ParseError>,
}

/// Client for Airly point measurements.
///
/// Holds no per-call state, so one connector can serve any number of
/// callers. Calls are issued strictly one after another.
pub struct AirlyConnector {
    api_key: String,
    fetcher: Box<dyn HttpFetcher>,
    averaging: AveragingMode,
}

impl AirlyConnector {
    /// Creates a connector that talks to Airly over HTTP.
    #[must_use]
    pub fn new(config: &AirlyConfig) -> Self {
        Self::with_fetcher(config, Box::new(ReqwestFetcher::new(config)))
    }

    /// Creates a connector that sends requests through `fetcher`.
    #[must_use]
    pub fn with_fetcher(config: &AirlyConfig, fetcher: Box<dyn HttpFetcher>) -> Self {
        Self {
            api_key: config.api_key.clone(),
            fetcher,
            averaging: AveragingMode::default(),
        }
    }

    /// Reads the config from the environment and creates a connector.
    ///
    /// # Errors
    ///
    /// Returns [`AirlyError::Config`] if `AIRLY_API_KEY` is missing.
    pub fn from_env() -> Result<Self, AirlyError> {
        Ok(Self::new(&AirlyConfig::from_env()?))
    }

    /// Sets how [`Self::historical_average_pollution`] averages.
    #[must_use]
    pub const fn with_averaging_mode(mut self, averaging: AveragingMode) -> Self {
        self.averaging = averaging;
        self
    }

    #[must_use]
    pub const fn averaging_mode(&self) -> AveragingMode {
        self.averaging
    }

    /// Fetches the latest measurement near `(lat, lng)`.
    ///
    /// An unparseable body yields an empty snapshot with `parse_error` set.
    ///
    /// # Errors
    ///
    /// Returns [`AirlyError`] if the request fails, is rate limited, or
    /// gets a non-success status.
    pub async fn current_pollution(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<PollutionReport<PollutionSnapshot>, AirlyError> {
        let response = self.get(&point_path(lat, lng)).await?;
        let (data, parse_error) = parsing::current_or_default(&response.body);

        Ok(PollutionReport {
            status: response.status,
            data,
            parse_error,
        })
    }

    /// Fetches the hourly history near `(lat, lng)`.
    ///
    /// An unparseable body yields `None` with `parse_error` set.
    ///
    /// # Errors
    ///
    /// Returns [`AirlyError`] if the request fails, is rate limited, or
    /// gets a non-success status.
    pub async fn historical_pollution(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<PollutionReport<Option<Vec<PollutionSnapshot>>>, AirlyError> {
        let response = self.get(&point_path(lat, lng)).await?;
        let (data, parse_error) = parsing::history_or_none(&response.body);

        Ok(PollutionReport {
            status: response.status,
            data,
            parse_error,
        })
    }

    /// Averages the history of every district in `districts` into one
    /// regional snapshot.
    ///
    /// Each district's hourly history is reduced to one snapshot, then the
    /// per-district snapshots are reduced again. Districts whose history
    /// could not be parsed, is empty, or has no complete hour are skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`AirlyError`] if any request fails, and
    /// [`AirlyError::Aggregate`] if no district produced a snapshot.
    pub async fn historical_average_pollution(
        &self,
        districts: &[District],
    ) -> Result<PollutionSnapshot, AirlyError> {
        let mut district_averages = Vec::with_capacity(districts.len());

        for district in districts {
            log::info!("Fetching history for {}", district.display_name());
            let report = self
                .historical_pollution(district.lat(), district.lng())
                .await?;

            let Some(history) = report.data else {
                log::warn!(
                    "Skipping {}: history could not be parsed",
                    district.display_name()
                );
                continue;
            };

            match average_snapshots_with(&history, self.averaging) {
                Ok(average) if average.has_any_empty_value() => {
                    log::warn!(
                        "Skipping {}: no complete hourly measurement",
                        district.display_name()
                    );
                }
                Ok(average) => district_averages.push(average),
                Err(AggregateError::EmptyInput) => {
                    log::warn!("Skipping {}: history is empty", district.display_name());
                }
            }
        }

        log::info!(
            "Averaging {}/{} districts ({})",
            district_averages.len(),
            districts.len(),
            self.averaging
        );

        Ok(average_snapshots_with(&district_averages, self.averaging)?)
    }

    /// Sends a GET and turns error statuses into [`AirlyError`]s.
    async fn get(&self, path: &str) -> Result<FetchResponse, AirlyError> {
        let headers = [
            ("Content-Type", "application/json"),
            ("Accept", "*/*"),
            ("apikey", self.api_key.as_str()),
        ];
        let response = self.fetcher.get(path, &headers).await?;

        if response.status == StatusCode::TOO_MANY_REQUESTS {
            log::warn!("Airly rate limit hit for {path}");
            return Err(AirlyError::RateLimited);
        }
        if !response.status.is_success() {
            log::error!("Airly returned HTTP {} for {path}", response.status);
            return Err(AirlyError::Status {
                status: response.status,
            });
        }

        Ok(response)
    }
}

/// Path of the point-measurement endpoint for `(lat, lng)`.
///
/// Coordinates use Rust's shortest float formatting, so `50.0` is sent as
/// `50` rather than `50.0`. Airly accepts both.
fn point_path(lat: f64, lng: f64) -> String {
    format!("/measurements/point?lat={lat}&lng={lng}")
}
