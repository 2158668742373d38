#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The administrative districts of Kraków with one reference point each.
//!
//! Each [`District`] maps to a `(lat, lng)` pair near its centre. The
//! table order is stable and matches the official district numbering, so
//! iterating [`District::all`] always visits districts in the same order.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A Kraków district, numbered I through XVIII.
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum District {
    /// I Stare Miasto
    StareMiasto,
    /// II Grzegórzki
    Grzegorzki,
    /// III Prądnik Czerwony
    PradnikCzerwony,
    /// IV Prądnik Biały
    PradnikBialy,
    /// V Krowodrza
    Krowodrza,
    /// VI Bronowice
    Bronowice,
    /// VII Zwierzyniec
    Zwierzyniec,
    /// VIII Dębniki
    Debniki,
    /// IX Łagiewniki-Borek Fałęcki
    LagiewnikiBorekFalecki,
    /// X Swoszowice
    Swoszowice,
    /// XI Podgórze Duchackie
    PodgorzeDuchackie,
    /// XII Bieżanów-Prokocim
    BiezanowProkocim,
    /// XIII Podgórze
    Podgorze,
    /// XIV Czyżyny
    Czyzyny,
    /// XV Mistrzejowice
    Mistrzejowice,
    /// XVI Bieńczyce
    Bienczyce,
    /// XVII Wzgórza Krzesławickie
    WzgorzaKrzeslawickie,
    /// XVIII Nowa Huta
    NowaHuta,
}

impl District {
    /// Returns all districts in official numbering order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::StareMiasto,
            Self::Grzegorzki,
            Self::PradnikCzerwony,
            Self::PradnikBialy,
            Self::Krowodrza,
            Self::Bronowice,
            Self::Zwierzyniec,
            Self::Debniki,
            Self::LagiewnikiBorekFalecki,
            Self::Swoszowice,
            Self::PodgorzeDuchackie,
            Self::BiezanowProkocim,
            Self::Podgorze,
            Self::Czyzyny,
            Self::Mistrzejowice,
            Self::Bienczyce,
            Self::WzgorzaKrzeslawickie,
            Self::NowaHuta,
        ]
    }

    /// Reference point `(lat, lng)` in WGS84.
    #[must_use]
    pub const fn coordinates(self) -> (f64, f64) {
        match self {
            Self::StareMiasto => (50.0614, 19.9366),
            Self::Grzegorzki => (50.0594, 19.9633),
            Self::PradnikCzerwony => (50.0867, 19.9667),
            Self::PradnikBialy => (50.0958, 19.9236),
            Self::Krowodrza => (50.0719, 19.9136),
            Self::Bronowice => (50.0814, 19.8794),
            Self::Zwierzyniec => (50.0556, 19.8728),
            Self::Debniki => (50.0331, 19.9139),
            Self::LagiewnikiBorekFalecki => (50.0181, 19.9328),
            Self::Swoszowice => (49.9917, 19.9442),
            Self::PodgorzeDuchackie => (50.0136, 19.9631),
            Self::BiezanowProkocim => (50.0153, 20.0050),
            Self::Podgorze => (50.0406, 19.9825),
            Self::Czyzyny => (50.0736, 20.0161),
            Self::Mistrzejowice => (50.0978, 20.0067),
            Self::Bienczyce => (50.0881, 20.0297),
            Self::WzgorzaKrzeslawickie => (50.0986, 20.0631),
            Self::NowaHuta => (50.0697, 20.0869),
        }
    }

    #[must_use]
    pub const fn lat(self) -> f64 {
        self.coordinates().0
    }

    #[must_use]
    pub const fn lng(self) -> f64 {
        self.coordinates().1
    }

    /// Human-readable Polish name of the district.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::StareMiasto => "Stare Miasto",
            Self::Grzegorzki => "Grzegórzki",
            Self::PradnikCzerwony => "Prądnik Czerwony",
            Self::PradnikBialy => "Prądnik Biały",
            Self::Krowodrza => "Krowodrza",
            Self::Bronowice => "Bronowice",
            Self::Zwierzyniec => "Zwierzyniec",
            Self::Debniki => "Dębniki",
            Self::LagiewnikiBorekFalecki => "Łagiewniki-Borek Fałęcki",
            Self::Swoszowice => "Swoszowice",
            Self::PodgorzeDuchackie => "Podgórze Duchackie",
            Self::BiezanowProkocim => "Bieżanów-Prokocim",
            Self::Podgorze => "Podgórze",
            Self::Czyzyny => "Czyżyny",
            Self::Mistrzejowice => "Mistrzejowice",
            Self::Bienczyce => "Bieńczyce",
            Self::WzgorzaKrzeslawickie => "Wzgórza Krzesławickie",
            Self::NowaHuta => "Nowa Huta",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn lists_eighteen_districts() {
        assert_eq!(District::all().len(), 18);
    }

    #[test]
    fn districts_are_unique_and_ordered() {
        let all = District::all();
        let unique: BTreeSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn coordinates_are_inside_krakow() {
        for district in District::all() {
            let (lat, lng) = district.coordinates();
            assert!((49.9..=50.2).contains(&lat), "{district} lat {lat}");
            assert!((19.7..=20.3).contains(&lng), "{district} lng {lng}");
        }
    }

    #[test]
    fn parses_snake_case_ids() {
        assert_eq!(
            "nowa_huta".parse::<District>().unwrap(),
            District::NowaHuta
        );
        assert_eq!(District::StareMiasto.to_string(), "stare_miasto");
        assert_eq!(District::Debniki.display_name(), "Dębniki");
    }
}
