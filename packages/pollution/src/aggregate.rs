//! Snapshot averaging.
//!
//! [`AveragingMode::RunningHalving`] is the historical behaviour of the
//! service and stays the default: the accumulator is seeded with a copy of
//! the first snapshot and every complete snapshot, the first one included,
//! is folded in with `acc = (acc + x) / 2`. Later snapshots therefore weigh
//! less than earlier ones. [`AveragingMode::ArithmeticMean`] gives the
//! plain mean for callers that want it.

use air_info_pollution_models::{PollutantKind, PollutionSnapshot};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::AggregateError;

/// How [`average_snapshots_with`] combines values.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AveragingMode {
    /// Fold each complete snapshot into the accumulator as `(acc + x) / 2`.
    #[default]
    RunningHalving,
    /// True arithmetic mean over all complete snapshots.
    ArithmeticMean,
}

/// Averages `snapshots` using [`AveragingMode::RunningHalving`].
///
/// # Errors
///
/// Returns [`AggregateError::EmptyInput`] if `snapshots` is empty.
pub fn average_snapshots(
    snapshots: &[PollutionSnapshot],
) -> Result<PollutionSnapshot, AggregateError> {
    average_snapshots_with(snapshots, AveragingMode::RunningHalving)
}

/// Averages the PM10 and PM2.5 values of `snapshots` into one snapshot.
///
/// The result is a copy of the first snapshot with only its two values
/// replaced. Percentages and `matches_norms` are carried over from that
/// first snapshot untouched, so callers that need a compliance verdict on
/// the aggregate must call
/// [`PollutionSnapshot::evaluate_norms`] themselves. Snapshots with any
/// empty value are skipped. In running-halving mode each pollutant is
/// folded on its own: a value the seed lacks is adopted from the first
/// complete snapshot, while a value the seed has takes part as usual.
///
/// # Errors
///
/// Returns [`AggregateError::EmptyInput`] if `snapshots` is empty.
pub fn average_snapshots_with(
    snapshots: &[PollutionSnapshot],
    mode: AveragingMode,
) -> Result<PollutionSnapshot, AggregateError> {
    let Some(seed) = snapshots.first() else {
        return Err(AggregateError::EmptyInput);
    };

    let mut average = seed.clone();
    let complete = snapshots.iter().filter(|s| !s.has_any_empty_value());

    match mode {
        AveragingMode::RunningHalving => {
            for snapshot in complete {
                for &kind in PollutantKind::all() {
                    let current = snapshot.reading(kind).value();
                    let reading = average.reading_mut(kind);
                    let next = match (reading.value(), current) {
                        (Some(acc), Some(x)) => Some(f64::midpoint(acc, x)),
                        (None, x) => x,
                        (acc, None) => acc,
                    };
                    reading.set_value(next);
                }
            }
        }
        AveragingMode::ArithmeticMean => {
            let complete: Vec<&PollutionSnapshot> = complete.collect();
            if complete.is_empty() {
                log::debug!(
                    "No complete snapshots among {} inputs, returning seed unchanged",
                    snapshots.len()
                );
                return Ok(average);
            }

            #[allow(clippy::cast_precision_loss)]
            let count = complete.len() as f64;
            for &kind in PollutantKind::all() {
                let sum: f64 = complete
                    .iter()
                    .filter_map(|s| s.reading(kind).value())
                    .sum();
                average.reading_mut(kind).set_value(Some(sum / count));
            }
        }
    }

    Ok(average)
}
