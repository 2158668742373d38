#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Particulate-matter readings and the snapshot type they compose into.
//!
//! A [`PollutionSnapshot`] pairs one PM10 and one PM2.5 [`PollutionReading`]
//! and carries a norm-compliance flag. Measured values and norm
//! percentages stay `None` until a parser or reducer fills them in, so an
//! unknown reading is never confused with a legitimate zero.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Norm percentage above which a reading is considered non-compliant.
pub const NORM_LIMIT_PERCENT: f64 = 100.0;

/// Particulate-matter pollutant category.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum PollutantKind {
    /// Particles up to 10 micrometers in diameter.
    Pm10,
    /// Particles up to 2.5 micrometers in diameter.
    Pm25,
}

impl PollutantKind {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pm10, Self::Pm25]
    }
}

/// One pollutant's measured concentration and its percentage of the norm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutionReading {
    kind: PollutantKind,
    value: Option<f64>,
    percentage: Option<f64>,
}

impl PollutionReading {
    /// Creates a reading with no value and no percentage.
    #[must_use]
    pub const fn new(kind: PollutantKind) -> Self {
        Self {
            kind,
            value: None,
            percentage: None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PollutantKind {
        self.kind
    }

    /// Measured concentration in µg/m³, if known.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    pub const fn set_value(&mut self, value: Option<f64>) {
        self.value = value;
    }

    /// Concentration as a percentage of the regulatory norm, if known.
    #[must_use]
    pub const fn percentage(&self) -> Option<f64> {
        self.percentage
    }

    pub const fn set_percentage(&mut self, percentage: Option<f64>) {
        self.percentage = percentage;
    }
}

/// A PM10 + PM2.5 reading pair with a norm-compliance flag.
///
/// `matches_norms` defaults to `true` and is only recomputed through
/// [`PollutionSnapshot::evaluate_norms`]. Snapshots built from history
/// entries or produced by averaging keep whatever the flag already was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutionSnapshot {
    pm10: PollutionReading,
    pm25: PollutionReading,
    matches_norms: bool,
}

impl Default for PollutionSnapshot {
    fn default() -> Self {
        Self {
            pm10: PollutionReading::new(PollutantKind::Pm10),
            pm25: PollutionReading::new(PollutantKind::Pm25),
            matches_norms: true,
        }
    }
}

impl PollutionSnapshot {
    /// Creates an empty snapshot: both readings unset, norms matched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot from raw PM10 and PM2.5 values, with no
    /// percentages.
    #[must_use]
    pub fn from_values(pm10: Option<f64>, pm25: Option<f64>) -> Self {
        let mut snapshot = Self::default();
        snapshot.pm10.set_value(pm10);
        snapshot.pm25.set_value(pm25);
        snapshot
    }

    #[must_use]
    pub const fn pm10(&self) -> &PollutionReading {
        &self.pm10
    }

    #[must_use]
    pub const fn pm25(&self) -> &PollutionReading {
        &self.pm25
    }

    pub const fn pm10_mut(&mut self) -> &mut PollutionReading {
        &mut self.pm10
    }

    pub const fn pm25_mut(&mut self) -> &mut PollutionReading {
        &mut self.pm25
    }

    /// Returns the reading for the given pollutant.
    #[must_use]
    pub const fn reading(&self, kind: PollutantKind) -> &PollutionReading {
        match kind {
            PollutantKind::Pm10 => &self.pm10,
            PollutantKind::Pm25 => &self.pm25,
        }
    }

    /// Returns the reading for the given pollutant, mutably.
    pub const fn reading_mut(&mut self, kind: PollutantKind) -> &mut PollutionReading {
        match kind {
            PollutantKind::Pm10 => &mut self.pm10,
            PollutantKind::Pm25 => &mut self.pm25,
        }
    }

    #[must_use]
    pub const fn matches_norms(&self) -> bool {
        self.matches_norms
    }

    pub const fn set_matches_norms(&mut self, matches_norms: bool) {
        self.matches_norms = matches_norms;
    }

    /// Returns `true` if either reading has no measured value.
    #[must_use]
    pub const fn has_any_empty_value(&self) -> bool {
        self.pm10.value.is_none() || self.pm25.value.is_none()
    }

    /// Composite severity score weighting PM2.5 twice as heavily as PM10.
    ///
    /// Returns `None` when either value is unknown.
    #[must_use]
    pub fn calculate_harm_factor(&self) -> Option<f64> {
        let pm10 = self.pm10.value?;
        let pm25 = self.pm25.value?;
        Some(weighted_harm(pm10, pm25))
    }

    /// Same weighting as [`Self::calculate_harm_factor`], applied to the
    /// norm percentages.
    ///
    /// Returns `None` when either value or either percentage is unknown.
    #[must_use]
    pub fn calculate_harm_factor_percentage(&self) -> Option<f64> {
        if self.has_any_empty_value() {
            return None;
        }
        let pm10 = self.pm10.percentage?;
        let pm25 = self.pm25.percentage?;
        Some(weighted_harm(pm10, pm25))
    }

    /// Decides whether a snapshot complies with the norms.
    ///
    /// Missing values cannot disprove compliance, so an incomplete snapshot
    /// counts as compliant. Otherwise the snapshot fails if either
    /// percentage exceeds [`NORM_LIMIT_PERCENT`]; an unknown percentage
    /// never exceeds it.
    #[must_use]
    pub fn calculate_matches_norms(snapshot: &Self) -> bool {
        if snapshot.has_any_empty_value() {
            return true;
        }

        let exceeds = |reading: &PollutionReading| {
            reading
                .percentage
                .is_some_and(|percentage| percentage > NORM_LIMIT_PERCENT)
        };

        !(exceeds(&snapshot.pm10) || exceeds(&snapshot.pm25))
    }

    /// Recomputes and stores [`Self::matches_norms`].
    pub fn evaluate_norms(&mut self) {
        self.matches_norms = Self::calculate_matches_norms(self);
    }
}

fn weighted_harm(pm10: f64, pm25: f64) -> f64 {
    2.0f64.mul_add(pm25, pm10) / 3.0
}
