//! Canonical philosopher record

use super::era::Era;
use super::genome::Genome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strength score per domain, or per related philosopher id.
pub type StrengthMap = BTreeMap<String, f64>;

/// Philosophical domains scored in `domainStrengths`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Logic,
    Ethics,
    Metaphysics,
    Epistemology,
    Politics,
    Aesthetics,
    PhilosophyOfReligion,
    PhilosophyOfScience,
}

impl Domain {
    pub const ALL: [Domain; 8] = [
        Domain::Logic,
        Domain::Ethics,
        Domain::Metaphysics,
        Domain::Epistemology,
        Domain::Politics,
        Domain::Aesthetics,
        Domain::PhilosophyOfReligion,
        Domain::PhilosophyOfScience,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Logic => "Logic",
            Domain::Ethics => "Ethics",
            Domain::Metaphysics => "Metaphysics",
            Domain::Epistemology => "Epistemology",
            Domain::Politics => "Politics",
            Domain::Aesthetics => "Aesthetics",
            Domain::PhilosophyOfReligion => "Philosophy of Religion",
            Domain::PhilosophyOfScience => "Philosophy of Science",
        }
    }

    pub fn from_name(name: &str) -> Option<Domain> {
        Domain::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a philosopher was born.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthLocation {
    pub city: String,
    pub region: String,
    pub modern_country: String,
    /// (latitude, longitude)
    pub coordinates: (f64, f64),
}

/// A stance on a pivotal question and what it implies elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPoint {
    pub question: String,
    pub position: String,
    pub argument: String,
    pub domain_cascades: BTreeMap<String, String>,
}

/// A philosopher in canonical shape.
///
/// Every field is present; absent source data becomes an empty string,
/// empty collection, zero, or 0.5 for `era_position`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhilosopherRecord {
    pub id: String,
    pub name: String,
    /// Negative years are BCE
    pub birth_year: i32,
    pub death_year: i32,
    pub birth_location: BirthLocation,
    pub era: Era,
    /// Fraction through the era, in [0, 0.99]
    pub era_position: f64,
    pub philosophical_genome: Genome,
    pub primary_domain: String,
    pub all_domains: Vec<String>,
    /// Domain name to strength in [0, 100]
    pub domain_strengths: StrengthMap,
    pub spiral_dynamics_stage: String,
    pub spiral_justification: String,
    pub switch_points: Vec<SwitchPoint>,
    pub comprehensive_biography: String,
    pub intellectual_journey: String,
    pub historical_context: String,
    pub influences: Vec<String>,
    pub critiques: Vec<String>,
    /// Source philosopher id to influence strength received
    pub influence_map: StrengthMap,
    /// Target philosopher id to critique strength issued
    pub critique_map: StrengthMap,
}

impl PhilosopherRecord {
    /// A minimal record; remaining fields take their canonical defaults.
    pub fn new(id: impl Into<String>, name: impl Into<String>, era: Era) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            era,
            era_position: 0.5,
            ..Default::default()
        }
    }

    pub fn with_influence(mut self, source_id: impl Into<String>, strength: f64) -> Self {
        self.influence_map.insert(source_id.into(), strength);
        self
    }

    pub fn with_critique(mut self, target_id: impl Into<String>, strength: f64) -> Self {
        self.critique_map.insert(target_id.into(), strength);
        self
    }

    /// True if `domain` is the primary domain or listed among all domains.
    pub fn works_in(&self, domain: &str) -> bool {
        self.primary_domain.eq_ignore_ascii_case(domain)
            || self.all_domains.iter().any(|d| d.eq_ignore_ascii_case(domain))
    }
}
