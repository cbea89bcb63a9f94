//! Powers and the standard-map territory table.
//!
//! The seven great powers are the only countries that issue orders or own
//! territory. The territory table covers the 75 provinces of the standard
//! map and supplies display names for prompts and the rendered page; game
//! data that uses other identifiers still works, it just renders the raw id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The number of provinces on the standard Diplomacy map.
pub const STANDARD_TERRITORY_COUNT: usize = 75;

/// One of the seven great powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Power {
    Austria,
    England,
    France,
    Germany,
    Italy,
    Russia,
    Turkey,
}

/// All seven powers in standard order.
pub const ALL_POWERS: [Power; 7] = [
    Power::Austria,
    Power::England,
    Power::France,
    Power::Germany,
    Power::Italy,
    Power::Russia,
    Power::Turkey,
];

/// Returned when a string names none of the seven powers.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown power '{0}'")]
pub struct UnknownPower(pub String);

impl Power {
    /// Returns the capitalised country name, as used in game data.
    pub const fn name(self) -> &'static str {
        match self {
            Power::Austria => "Austria",
            Power::England => "England",
            Power::France => "France",
            Power::Germany => "Germany",
            Power::Italy => "Italy",
            Power::Russia => "Russia",
            Power::Turkey => "Turkey",
        }
    }

    /// Parses a power from its country name, ignoring case.
    pub fn from_name(name: &str) -> Option<Power> {
        ALL_POWERS
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Power {
    type Err = UnknownPower;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Power::from_name(s).ok_or_else(|| UnknownPower(s.to_string()))
    }
}

impl TryFrom<String> for Power {
    type Error = UnknownPower;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Power> for &'static str {
    fn from(p: Power) -> Self {
        p.name()
    }
}

/// Static metadata for one standard-map territory.
#[derive(Debug)]
pub struct StandardTerritory {
    pub abbr: &'static str,
    pub name: &'static str,
}

const fn territory(abbr: &'static str, name: &'static str) -> StandardTerritory {
    StandardTerritory { abbr, name }
}

/// Standard-map territories in alphabetical order by abbreviation.
pub static STANDARD_TERRITORIES: [StandardTerritory; STANDARD_TERRITORY_COUNT] = [
    territory("adr", "Adriatic Sea"),
    territory("aeg", "Aegean Sea"),
    territory("alb", "Albania"),
    territory("ank", "Ankara"),
    territory("apu", "Apulia"),
    territory("arm", "Armenia"),
    territory("bal", "Baltic Sea"),
    territory("bar", "Barents Sea"),
    territory("bel", "Belgium"),
    territory("ber", "Berlin"),
    territory("bla", "Black Sea"),
    territory("boh", "Bohemia"),
    territory("bot", "Gulf of Bothnia"),
    territory("bre", "Brest"),
    territory("bud", "Budapest"),
    territory("bul", "Bulgaria"),
    territory("bur", "Burgundy"),
    territory("cly", "Clyde"),
    territory("con", "Constantinople"),
    territory("den", "Denmark"),
    territory("eas", "Eastern Mediterranean"),
    territory("edi", "Edinburgh"),
    territory("eng", "English Channel"),
    territory("fin", "Finland"),
    territory("gal", "Galicia"),
    territory("gas", "Gascony"),
    territory("gol", "Gulf of Lyon"),
    territory("gre", "Greece"),
    territory("hel", "Heligoland Bight"),
    territory("hol", "Holland"),
    territory("ion", "Ionian Sea"),
    territory("iri", "Irish Sea"),
    territory("kie", "Kiel"),
    territory("lon", "London"),
    territory("lvn", "Livonia"),
    territory("lvp", "Liverpool"),
    territory("mao", "Mid-Atlantic Ocean"),
    territory("mar", "Marseilles"),
    territory("mos", "Moscow"),
    territory("mun", "Munich"),
    territory("naf", "North Africa"),
    territory("nao", "North Atlantic Ocean"),
    territory("nap", "Naples"),
    territory("nrg", "Norwegian Sea"),
    territory("nth", "North Sea"),
    territory("nwy", "Norway"),
    territory("par", "Paris"),
    territory("pic", "Picardy"),
    territory("pie", "Piedmont"),
    territory("por", "Portugal"),
    territory("pru", "Prussia"),
    territory("rom", "Rome"),
    territory("ruh", "Ruhr"),
    territory("rum", "Rumania"),
    territory("ser", "Serbia"),
    territory("sev", "Sevastopol"),
    territory("sil", "Silesia"),
    territory("ska", "Skagerrak"),
    territory("smy", "Smyrna"),
    territory("spa", "Spain"),
    territory("stp", "St. Petersburg"),
    territory("swe", "Sweden"),
    territory("syr", "Syria"),
    territory("tri", "Trieste"),
    territory("tun", "Tunisia"),
    territory("tus", "Tuscany"),
    territory("tyr", "Tyrolia"),
    territory("tys", "Tyrrhenian Sea"),
    territory("ukr", "Ukraine"),
    territory("ven", "Venice"),
    territory("vie", "Vienna"),
    territory("wal", "Wales"),
    territory("war", "Warsaw"),
    territory("wes", "Western Mediterranean"),
    territory("yor", "Yorkshire"),
];

/// Looks up a standard territory by abbreviation, ignoring case.
///
/// A coast suffix (`stp/nc`, `Spa/sc`) is ignored for the lookup.
pub fn standard_territory(id: &str) -> Option<&'static StandardTerritory> {
    let base = id.split('/').next().unwrap_or(id);
    STANDARD_TERRITORIES
        .binary_search_by(|t| cmp_ignore_ascii_case(t.abbr, base))
        .ok()
        .map(|i| &STANDARD_TERRITORIES[i])
}

fn cmp_ignore_ascii_case(a: &str, b: &str) -> std::cmp::Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Returns a readable name for a coast suffix such as `nc`.
pub fn coast_name(suffix: &str) -> Option<&'static str> {
    match suffix.to_ascii_lowercase().as_str() {
        "nc" => Some("north coast"),
        "sc" => Some("south coast"),
        "ec" => Some("east coast"),
        _ => None,
    }
}
