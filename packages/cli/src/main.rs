#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for querying Airly pollution data.
//!
//! Reads the API key from `AIRLY_API_KEY` and prints results as JSON.

use air_info_airly::AirlyConnector;
use air_info_district_models::District;
use air_info_pollution::{AveragingMode, average_snapshots_with};
use air_info_pollution_models::PollutionSnapshot;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "air_info", about = "Airly pollution readings and averages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest measurement near a point
    Current {
        /// Latitude (WGS84)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude (WGS84)
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Show the hourly history near a point
    History {
        /// Latitude (WGS84)
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude (WGS84)
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Also print the averaged history
        #[arg(long)]
        average: bool,
    },
    /// Average the history of every district into one regional snapshot
    Average {
        /// Comma-separated list of district IDs (e.g., "`stare_miasto,nowa_huta`").
        /// If not specified, all districts are used.
        #[arg(long)]
        districts: Option<String>,
        /// Use a true arithmetic mean instead of the running average
        #[arg(long)]
        mean: bool,
    },
    /// List known districts and their reference coordinates
    Districts,
}

/// A snapshot together with its derived scores, for printing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotSummary<'a> {
    #[serde(flatten)]
    snapshot: &'a PollutionSnapshot,
    harm_factor: Option<f64>,
    harm_factor_percentage: Option<f64>,
}

impl<'a> From<&'a PollutionSnapshot> for SnapshotSummary<'a> {
    fn from(snapshot: &'a PollutionSnapshot) -> Self {
        Self {
            snapshot,
            harm_factor: snapshot.calculate_harm_factor(),
            harm_factor_percentage: snapshot.calculate_harm_factor_percentage(),
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_districts(list: Option<&str>) -> Result<Vec<District>, String> {
    let Some(list) = list else {
        return Ok(District::all().to_vec());
    };

    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<District>()
                .map_err(|_| format!("Unknown district: {s}"))
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Current { lat, lng } => {
            let connector = AirlyConnector::from_env()?;
            let report = connector.current_pollution(lat, lng).await?;
            log::info!("Airly responded with {}", report.status);
            if let Some(e) = &report.parse_error {
                log::warn!("Showing an empty reading: {e}");
            }
            print_json(&SnapshotSummary::from(&report.data))?;
        }
        Commands::History { lat, lng, average } => {
            let connector = AirlyConnector::from_env()?;
            let report = connector.historical_pollution(lat, lng).await?;
            log::info!("Airly responded with {}", report.status);
            let Some(history) = report.data else {
                return Err(report
                    .parse_error
                    .map_or_else(|| "history unavailable".into(), Into::into));
            };

            let summaries: Vec<SnapshotSummary<'_>> =
                history.iter().map(SnapshotSummary::from).collect();
            print_json(&summaries)?;

            if average {
                let averaged = average_snapshots_with(&history, connector.averaging_mode())?;
                print_json(&SnapshotSummary::from(&averaged))?;
            }
        }
        Commands::Average { districts, mean } => {
            let districts = parse_districts(districts.as_deref())?;
            let mode = if mean {
                AveragingMode::ArithmeticMean
            } else {
                AveragingMode::RunningHalving
            };

            let mut average = AirlyConnector::from_env()?
                .with_averaging_mode(mode)
                .historical_average_pollution(&districts)
                .await?;
            average.evaluate_norms();

            print_json(&SnapshotSummary::from(&average))?;
        }
        Commands::Districts => {
            for district in District::all() {
                println!(
                    "{:<26} {:<26} {:.4}, {:.4}",
                    district.to_string(),
                    district.display_name(),
                    district.lat(),
                    district.lng()
                );
            }
        }
    }

    Ok(())
}
