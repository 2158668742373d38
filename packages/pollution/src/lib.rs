#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reduction of many pollution snapshots into one representative snapshot.
//!
//! The same reducer serves two levels of aggregation: hourly history
//! entries for one location collapse into a single daily snapshot, and
//! per-district snapshots collapse into a single regional snapshot.

pub mod aggregate;

pub use aggregate::{AveragingMode, average_snapshots, average_snapshots_with};

/// Errors that can occur while aggregating snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    /// There was nothing to aggregate.
    #[error("cannot average an empty sequence of snapshots")]
    EmptyInput,
}
