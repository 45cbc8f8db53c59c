//! Built-in catalog of confirmed transiting planets
//!
//! Reference periods are in days, as published for each planet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use transit_core::{Error, Result};

/// Catalog data for one host star
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub star: &'static str,
    pub planet_name: &'static str,
    /// Published orbital period in days
    pub reference_period: f64,
    /// Identifier in the input catalog used to look up photometry
    pub catalog_id: &'static str,
    pub info_url: &'static str,
}

const KEPLER_7: CatalogEntry = CatalogEntry {
    star: "Kepler-7",
    planet_name: "Kepler-7b",
    reference_period: 4.89,
    catalog_id: "KIC 6922244",
    info_url: "https://en.wikipedia.org/wiki/Kepler-7b",
};

const KEPLER_10: CatalogEntry = CatalogEntry {
    star: "Kepler-10",
    planet_name: "Kepler-10b",
    reference_period: 0.837,
    catalog_id: "KIC 11904151",
    info_url: "https://en.wikipedia.org/wiki/Kepler-10b",
};

const KEPLER_15: CatalogEntry = CatalogEntry {
    star: "Kepler-15",
    planet_name: "Kepler-15b",
    reference_period: 4.94,
    catalog_id: "KIC 11359879",
    info_url: "https://science.nasa.gov/exoplanet-catalog/kepler-15-b/",
};

const KEPLER_22: CatalogEntry = CatalogEntry {
    star: "Kepler-22",
    planet_name: "Kepler-22b",
    reference_period: 289.9,
    catalog_id: "KIC 10593626",
    info_url: "https://science.nasa.gov/exoplanet-catalog/kepler-22-b",
};

const HD_209458: CatalogEntry = CatalogEntry {
    star: "HD 209458",
    planet_name: "HD 209458b",
    reference_period: 3.5247,
    catalog_id: "HIP 108859",
    info_url: "https://en.wikipedia.org/wiki/HD_209458_b",
};

/// Host stars with a known transiting planet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    #[serde(rename = "Kepler-7")]
    Kepler7,
    #[serde(rename = "Kepler-10")]
    Kepler10,
    #[default]
    #[serde(rename = "Kepler-15")]
    Kepler15,
    #[serde(rename = "Kepler-22")]
    Kepler22,
    #[serde(rename = "HD 209458")]
    Hd209458,
}

impl Target {
    /// Every catalogued target
    pub const ALL: [Target; 5] = [
        Target::Kepler7,
        Target::Kepler10,
        Target::Kepler15,
        Target::Kepler22,
        Target::Hd209458,
    ];

    /// Catalog data for this target
    pub fn entry(&self) -> &'static CatalogEntry {
        match self {
            Target::Kepler7 => &KEPLER_7,
            Target::Kepler10 => &KEPLER_10,
            Target::Kepler15 => &KEPLER_15,
            Target::Kepler22 => &KEPLER_22,
            Target::Hd209458 => &HD_209458,
        }
    }

    /// Star name as written in the catalog
    pub fn name(&self) -> &'static str {
        self.entry().star
    }

    /// Published period in days
    pub fn reference_period(&self) -> f64 {
        self.entry().reference_period
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Compare names on letters and digits only, so "kepler 15", "KEPLER-15" and
// "Kepler-15" all match.
fn fold_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = fold_name(s);
        Target::ALL
            .into_iter()
            .find(|t| fold_name(t.name()) == key)
            .ok_or_else(|| Error::UnknownTarget(s.trim().to_string()))
    }
}
