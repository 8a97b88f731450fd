//! Historical eras

use serde::{Deserialize, Serialize};

/// One of the four historical periods, or whatever text the source carried.
///
/// Unrecognized era names are preserved verbatim in `Other` so a canonical
/// record re-normalizes to itself; layout treats them as the unknown layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Era {
    Ancient,
    Medieval,
    Modern,
    Contemporary,
    Other(String),
}

impl Era {
    /// Parse an era name. Matching ignores surrounding whitespace and case.
    pub fn parse(name: &str) -> Self {
        let trimmed = name.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "ancient" => Era::Ancient,
            "medieval" => Era::Medieval,
            "modern" => Era::Modern,
            "contemporary" => Era::Contemporary,
            _ => Era::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Era::Ancient => "Ancient",
            Era::Medieval => "Medieval",
            Era::Modern => "Modern",
            Era::Contemporary => "Contemporary",
            Era::Other(name) => name,
        }
    }
}

impl Default for Era {
    fn default() -> Self {
        Era::Other(String::new())
    }
}

impl From<String> for Era {
    fn from(name: String) -> Self {
        Era::parse(&name)
    }
}

impl From<Era> for String {
    fn from(era: Era) -> Self {
        era.as_str().to_string()
    }
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
