//! Raw record normalization
//!
//! Turns philosopher records in any of the historical field-naming
//! conventions (flat camelCase, nested legacy objects, snake_case database
//! rows) into canonical [`PhilosopherRecord`]s with every field present and
//! every bounded field within its bounds.
//!
//! Normalization isolates failures per record: a batch never fails because
//! one entry is malformed. Rejected entries are reported alongside the
//! records that made it through.

pub mod resolve;

use crate::record::{BirthLocation, Domain, Era, Genome, GenomeAxis, PhilosopherRecord, StrengthMap};
use resolve::{
    as_number, as_score_map, as_switch_points, as_text, as_text_list, paths,
    resolve_with, truncate, Candidate, Transform,
};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Maximum length of trait values, primary domain and spiral stage.
pub const MAX_CLASSIFICATION_CHARS: usize = 100;
/// Maximum length of an era name.
pub const MAX_ERA_CHARS: usize = 50;
/// Upper clamp for era position; stays clear of the next era's layer.
pub const MAX_ERA_POSITION: f64 = 0.99;
/// Era position used when the source has none.
pub const DEFAULT_ERA_POSITION: f64 = 0.5;
/// Upper bound for domain strength scores.
pub const MAX_DOMAIN_STRENGTH: f64 = 100.0;

/// Why a raw record was not turned into a canonical record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("record has no id")]
    MissingId,
    #[error("record {0} has no name")]
    MissingName(String),
    #[error("record {0} superseded by a later record with the same id")]
    Superseded(String),
}

/// A raw record that did not make it into the batch output.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Position of the raw record in the input
    pub index: usize,
    /// Id of the raw record, when it had a usable one
    pub id: Option<String>,
    pub reason: NormalizeError,
}

/// Output of normalizing a batch.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<PhilosopherRecord>,
    pub rejections: Vec<Rejection>,
}

impl NormalizedBatch {
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }
}

/// Ordered candidate lists for every canonical field.
#[derive(Debug, Clone)]
struct FieldTable {
    id: Vec<Candidate>,
    name: Vec<Candidate>,
    birth_year: Vec<Candidate>,
    death_year: Vec<Candidate>,
    birth_city: Vec<Candidate>,
    birth_region: Vec<Candidate>,
    birth_country: Vec<Candidate>,
    birth_latitude: Vec<Candidate>,
    birth_longitude: Vec<Candidate>,
    era: Vec<Candidate>,
    era_position: Vec<Candidate>,
    genome: Vec<(GenomeAxis, Vec<Candidate>)>,
    primary_domain: Vec<Candidate>,
    all_domains: Vec<Candidate>,
    domain_strengths: Vec<Candidate>,
    spiral_stage: Vec<Candidate>,
    spiral_justification: Vec<Candidate>,
    switch_points: Vec<Candidate>,
    biography: Vec<Candidate>,
    intellectual_journey: Vec<Candidate>,
    historical_context: Vec<Candidate>,
    influences: Vec<Candidate>,
    critiques: Vec<Candidate>,
    influence_map: Vec<Candidate>,
    critique_map: Vec<Candidate>,
}

impl FieldTable {
    /// Canonical names first, then legacy nested names, then snake_case.
    fn standard() -> Self {
        let genome = GenomeAxis::ALL
            .iter()
            .map(|axis| {
                let camel = axis.camel_name();
                let snake = axis.snake_name();
                let candidates = vec![
                    Candidate::at(format!("philosophicalGenome.{}", camel)),
                    Candidate::with(format!("philosophicalGenome.{}", snake), Transform::Position),
                    Candidate::at(format!("philosophical_genome.{}", camel)),
                    Candidate::with(format!("philosophical_genome.{}", snake), Transform::Position),
                    Candidate::at(snake),
                ];
                (*axis, candidates)
            })
            .collect();

        Self {
            id: paths(&["id"]),
            name: paths(&["name"]),
            birth_year: paths(&["birthYear", "birth.year", "birth_year"]),
            death_year: paths(&["deathYear", "death.year", "death_year"]),
            birth_city: paths(&["birthLocation.city", "birth.location.city", "birth_city"]),
            birth_region: paths(&["birthLocation.region", "birth.location.region", "birth_region"]),
            birth_country: paths(&[
                "birthLocation.modernCountry",
                "birth.location.country",
                "birth_country",
            ]),
            birth_latitude: paths(&[
                "birthLocation.coordinates.0",
                "birth.location.coordinates.latitude",
                "birth_latitude",
            ]),
            birth_longitude: paths(&[
                "birthLocation.coordinates.1",
                "birth.location.coordinates.longitude",
                "birth_longitude",
            ]),
            era: paths(&["era", "era_classification"]),
            era_position: paths(&["eraPosition", "era_position"]),
            genome,
            primary_domain: vec![
                Candidate::at("primaryDomain"),
                Candidate::with("philosophical_domains.primary", Transform::First),
                Candidate::at("primary_domain"),
            ],
            all_domains: paths(&["allDomains", "philosophical_domains.primary", "all_domains"]),
            domain_strengths: paths(&[
                "domainStrengths",
                "philosophical_domains.domain_strengths_rating",
                "domain_strengths_rating",
                "domain_strengths",
            ]),
            spiral_stage: paths(&["spiralDynamicsStage", "spiral_dynamics_stage"]),
            spiral_justification: paths(&["spiralJustification", "spiral_justification"]),
            switch_points: paths(&["switchPoints", "switch_points"]),
            biography: paths(&["comprehensiveBiography", "biography", "comprehensive_biography"]),
            intellectual_journey: paths(&["intellectualJourney", "intellectual_journey"]),
            historical_context: paths(&["historicalContext", "historical_context"]),
            influences: paths(&["influences"]),
            critiques: paths(&["critiques"]),
            influence_map: paths(&["influenceMap", "influence_map"]),
            critique_map: paths(&["critiqueMap", "critique_map"]),
        }
    }
}

/// Converts raw JSON records into canonical records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    fields: FieldTable,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            fields: FieldTable::standard(),
        }
    }

    /// Normalize one raw record.
    ///
    /// Fails only when the record is not an object or lacks an id or name.
    pub fn normalize(&self, raw: &Value) -> Result<PhilosopherRecord, NormalizeError> {
        if !raw.is_object() {
            return Err(NormalizeError::NotAnObject);
        }
        let f = &self.fields;

        let id = resolve_with(raw, &f.id, as_text).ok_or(NormalizeError::MissingId)?;
        let name = resolve_with(raw, &f.name, as_text)
            .ok_or_else(|| NormalizeError::MissingName(id.clone()))?;

        let text = |candidates: &[Candidate]| resolve_with(raw, candidates, as_text).unwrap_or_default();
        let bounded = |candidates: &[Candidate], max: usize| truncate(&text(candidates), max);
        let number = |candidates: &[Candidate]| resolve_with(raw, candidates, as_number);

        let mut genome = Genome::default();
        for (axis, candidates) in &f.genome {
            genome.set(*axis, bounded(candidates, MAX_CLASSIFICATION_CHARS));
        }

        let domain_strengths = resolve_with(raw, &f.domain_strengths, as_score_map)
            .map(bound_domain_strengths)
            .unwrap_or_default();
        let all_domains = resolve_with(raw, &f.all_domains, as_text_list)
            .unwrap_or_else(|| domain_strengths.keys().cloned().collect());

        let record = PhilosopherRecord {
            birth_year: number(&f.birth_year).map(to_year).unwrap_or(0),
            death_year: number(&f.death_year).map(to_year).unwrap_or(0),
            birth_location: BirthLocation {
                city: text(&f.birth_city),
                region: text(&f.birth_region),
                modern_country: text(&f.birth_country),
                coordinates: (
                    number(&f.birth_latitude).unwrap_or(0.0),
                    number(&f.birth_longitude).unwrap_or(0.0),
                ),
            },
            era: Era::parse(&bounded(&f.era, MAX_ERA_CHARS)),
            era_position: number(&f.era_position)
                .map(normalize_era_position)
                .unwrap_or(DEFAULT_ERA_POSITION),
            philosophical_genome: genome,
            primary_domain: bounded(&f.primary_domain, MAX_CLASSIFICATION_CHARS),
            all_domains,
            domain_strengths,
            spiral_dynamics_stage: bounded(&f.spiral_stage, MAX_CLASSIFICATION_CHARS),
            spiral_justification: text(&f.spiral_justification),
            switch_points: resolve_with(raw, &f.switch_points, as_switch_points).unwrap_or_default(),
            comprehensive_biography: text(&f.biography),
            intellectual_journey: text(&f.intellectual_journey),
            historical_context: text(&f.historical_context),
            influences: resolve_with(raw, &f.influences, as_text_list).unwrap_or_default(),
            critiques: resolve_with(raw, &f.critiques, as_text_list).unwrap_or_default(),
            influence_map: relationship_map(raw, &f.influence_map, &id, "influence"),
            critique_map: relationship_map(raw, &f.critique_map, &id, "critique"),
            id,
            name,
        };

        Ok(record)
    }

    /// Normalize a batch, isolating failures per record.
    ///
    /// Records sharing an id keep the first occurrence's position but the
    /// last occurrence's content; the earlier record is reported as
    /// superseded.
    pub fn normalize_batch(&self, raw: &[Value]) -> NormalizedBatch {
        let mut batch = NormalizedBatch::default();
        // id -> (output slot, raw index currently occupying it)
        let mut slots: HashMap<String, (usize, usize)> = HashMap::new();

        for (index, value) in raw.iter().enumerate() {
            let record = match self.normalize(value) {
                Ok(record) => record,
                Err(reason) => {
                    warn!(index, %reason, "skipping malformed philosopher record");
                    let id = value.get("id").and_then(as_text);
                    batch.rejections.push(Rejection { index, id, reason });
                    continue;
                }
            };

            match slots.get_mut(&record.id) {
                Some((slot, previous_index)) => {
                    warn!(index, id = %record.id, previous = *previous_index, "duplicate philosopher id");
                    batch.rejections.push(Rejection {
                        index: *previous_index,
                        id: Some(record.id.clone()),
                        reason: NormalizeError::Superseded(record.id.clone()),
                    });
                    *previous_index = index;
                    batch.records[*slot] = record;
                }
                None => {
                    slots.insert(record.id.clone(), (batch.records.len(), index));
                    batch.records.push(record);
                }
            }
        }

        info!(
            normalized = batch.records.len(),
            rejected = batch.rejections.len(),
            "normalized philosopher batch"
        );
        batch
    }
}

/// Scale percentages down to fractions and clamp to [0, 0.99].
pub fn normalize_era_position(value: f64) -> f64 {
    let fraction = if value > 1.0 { value / 100.0 } else { value };
    fraction.clamp(0.0, MAX_ERA_POSITION)
}

fn to_year(value: f64) -> i32 {
    // `as` saturates at the i32 bounds
    value.trunc() as i32
}

/// Fractions below 1 are read as proportions and scaled to percentages.
/// Scores round to whole points and clamp to [0, 100]; entries that end up
/// at zero are dropped. Known domain names take their canonical spelling.
fn bound_domain_strengths(scores: StrengthMap) -> StrengthMap {
    scores
        .into_iter()
        .filter_map(|(domain, score)| {
            let scaled = if score < 1.0 { score * 100.0 } else { score };
            let bounded = scaled.round().clamp(0.0, MAX_DOMAIN_STRENGTH);
            if bounded <= 0.0 {
                debug!(domain = %domain, score, "dropping domain without positive strength");
                return None;
            }
            let name = Domain::from_name(&domain)
                .map(|d| d.as_str().to_string())
                .unwrap_or(domain);
            Some((name, bounded))
        })
        .collect()
}

/// Relationship entries keep only positive strengths.
fn relationship_map(raw: &Value, candidates: &[Candidate], id: &str, kind: &str) -> StrengthMap {
    let Some(map) = resolve_with(raw, candidates, |v| v.as_object().cloned()) else {
        return StrengthMap::new();
    };

    map.into_iter()
        .filter_map(|(other, strength)| match as_number(&strength) {
            Some(s) if s > 0.0 && !other.is_empty() => Some((other, s)),
            _ => {
                debug!(id, other = %other, kind, "dropping relationship without positive strength");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalizer() -> Normalizer {
        Normalizer::new()
    }

    #[test]
    fn minimal_record_gets_every_default() {
        let record = normalizer()
            .normalize(&json!({"id": "plato", "name": "Plato"}))
            .unwrap();

        assert_eq!(record.id, "plato");
        assert_eq!(record.name, "Plato");
        assert_eq!(record.birth_year, 0);
        assert_eq!(record.era, Era::default());
        assert_eq!(record.era_position, 0.5);
        assert_eq!(record.philosophical_genome, Genome::default());
        assert!(record.domain_strengths.is_empty());
        assert!(record.all_domains.is_empty());
        assert!(record.influence_map.is_empty());
        assert!(record.critique_map.is_empty());
        assert_eq!(record.birth_location.coordinates, (0.0, 0.0));
    }

    #[test]
    fn missing_identity_is_rejected() {
        let n = normalizer();
        assert_eq!(n.normalize(&json!({"name": "Nobody"})), Err(NormalizeError::MissingId));
        assert_eq!(
            n.normalize(&json!({"id": "x", "name": "  "})),
            Err(NormalizeError::MissingName("x".to_string()))
        );
        assert_eq!(n.normalize(&json!([1, 2])), Err(NormalizeError::NotAnObject));
        assert_eq!(n.normalize(&json!("plato")), Err(NormalizeError::NotAnObject));
    }

    #[test]
    fn percentage_era_position_is_scaled_and_clamped() {
        assert_eq!(normalize_era_position(150.0), 0.99);
        assert_eq!(normalize_era_position(45.0), 0.45);
        assert_eq!(normalize_era_position(1.0), 0.99);
        assert_eq!(normalize_era_position(0.3), 0.3);
        assert_eq!(normalize_era_position(-2.0), 0.0);

        let record = normalizer()
            .normalize(&json!({"id": "a", "name": "A", "eraPosition": 150}))
            .unwrap();
        assert_eq!(record.era_position, 0.99);
    }

    #[test]
    fn non_numeric_fields_coerce_to_defaults() {
        let record = normalizer()
            .normalize(&json!({
                "id": "a", "name": "A",
                "birthYear": "c. 500 BCE",
                "deathYear": "-322",
                "eraPosition": "middle"
            }))
            .unwrap();
        assert_eq!(record.birth_year, 0);
        assert_eq!(record.death_year, -322);
        assert_eq!(record.era_position, 0.5);
    }

    #[test]
    fn legacy_nested_shape_is_resolved() {
        let record = normalizer()
            .normalize(&json!({
                "id": "spinoza_baruch",
                "name": "Baruch Spinoza",
                "birth": {"year": 1632, "location": {
                    "city": "Amsterdam", "region": "Holland", "country": "Netherlands",
                    "coordinates": {"latitude": 52.37, "longitude": 4.89}
                }},
                "death": {"year": 1677},
                "era_classification": "Modern",
                "philosophical_domains": {
                    "primary": ["Metaphysics", "Ethics"],
                    "domain_strengths_rating": {"Metaphysics": 98, "Ethics": 95}
                },
                "philosophical_genome": {
                    "being_vs_becoming": {"position": "Being", "justification": "substance"},
                    "one_vs_many": "One",
                    "realism_vs_antirealism": {"position": "Realist"}
                },
                "switch_points": [{"question": "Is God transcendent?", "position": "No"}],
                "biography": "Lens grinder."
            }))
            .unwrap();

        assert_eq!(record.birth_year, 1632);
        assert_eq!(record.death_year, 1677);
        assert_eq!(record.birth_location.city, "Amsterdam");
        assert_eq!(record.birth_location.modern_country, "Netherlands");
        assert_eq!(record.birth_location.coordinates, (52.37, 4.89));
        assert_eq!(record.era, Era::Modern);
        assert_eq!(record.primary_domain, "Metaphysics");
        assert_eq!(record.all_domains, vec!["Metaphysics", "Ethics"]);
        assert_eq!(record.domain_strengths["Metaphysics"], 98.0);
        assert_eq!(record.philosophical_genome.being_vs_becoming, "Being");
        assert_eq!(record.philosophical_genome.one_vs_many, "One");
        assert_eq!(record.philosophical_genome.realism_vs_anti_realism, "Realist");
        assert_eq!(record.switch_points.len(), 1);
        assert_eq!(record.comprehensive_biography, "Lens grinder.");
    }

    #[test]
    fn database_row_shape_is_resolved() {
        let record = normalizer()
            .normalize(&json!({
                "id": "hume_david",
                "name": "David Hume",
                "birth_year": 1711,
                "era": "Modern",
                "era_position": "0.40",
                "primary_domain": "Epistemology",
                "spiral_dynamics_stage": "Orange",
                "reason_vs_experience": "Experience"
            }))
            .unwrap();
        assert_eq!(record.birth_year, 1711);
        assert_eq!(record.era_position, 0.4);
        assert_eq!(record.primary_domain, "Epistemology");
        assert_eq!(record.spiral_dynamics_stage, "Orange");
        assert_eq!(record.philosophical_genome.reason_vs_experience, "Experience");
    }

    #[test]
    fn classification_text_is_truncated() {
        let long = "x".repeat(250);
        let record = normalizer()
            .normalize(&json!({
                "id": "a", "name": "A",
                "era": long,
                "primaryDomain": long,
                "philosophicalGenome": {"mindVsMatter": long}
            }))
            .unwrap();
        assert_eq!(record.era.as_str().chars().count(), MAX_ERA_CHARS);
        assert_eq!(record.primary_domain.chars().count(), MAX_CLASSIFICATION_CHARS);
        assert_eq!(
            record.philosophical_genome.mind_vs_matter.chars().count(),
            MAX_CLASSIFICATION_CHARS
        );
    }

    #[test]
    fn domain_strengths_are_bounded_and_feed_all_domains() {
        let record = normalizer()
            .normalize(&json!({
                "id": "a", "name": "A",
                "domainStrengths": {"Ethics": 140, "Logic": -5, "Politics": "60"}
            }))
            .unwrap();
        assert_eq!(record.domain_strengths["Ethics"], 100.0);
        assert!(!record.domain_strengths.contains_key("Logic"));
        assert_eq!(record.domain_strengths["Politics"], 60.0);
        assert_eq!(record.all_domains, vec!["Ethics", "Politics"]);
    }

    #[test]
    fn fractional_domain_strengths_become_percentages() {
        let record = normalizer()
            .normalize(&json!({
                "id": "a", "name": "A",
                "domainStrengths": {"Ethics": 0.85, "Logic": 0.0, "philosophy of science": 72.4}
            }))
            .unwrap();
        assert_eq!(record.domain_strengths.len(), 2);
        assert_eq!(record.domain_strengths["Ethics"], 85.0);
        assert_eq!(record.domain_strengths["Philosophy of Science"], 72.0);
        assert_eq!(record.all_domains, vec!["Ethics", "Philosophy of Science"]);
    }

    #[test]
    fn relationship_maps_drop_unusable_strengths() {
        let record = normalizer()
            .normalize(&json!({
                "id": "kant_immanuel", "name": "Immanuel Kant",
                "influenceMap": {"hume_david": 85, "rousseau_jean": "70", "nobody": 0, "bad": "?"},
                "critiqueMap": {"berkeley_george": 75, "locke_john": -1}
            }))
            .unwrap();
        assert_eq!(record.influence_map.len(), 2);
        assert_eq!(record.influence_map["rousseau_jean"], 70.0);
        assert_eq!(record.critique_map.len(), 1);
        assert_eq!(record.critique_map["berkeley_george"], 75.0);
    }

    #[test]
    fn normalizing_canonical_output_is_identity() {
        let n = normalizer();
        let first = n
            .normalize(&json!({
                "id": "aristotle",
                "name": "Aristotle",
                "birth": {"year": -384},
                "deathYear": -322,
                "era": "ancient",
                "eraPosition": 62,
                "philosophical_genome": {"mind_vs_matter": {"position": "Synthesis"}},
                "domainStrengths": {"Logic": 100, "Ethics": 95},
                "spiralDynamicsStage": "Blue-Orange",
                "critiqueMap": {"plato": 80},
                "influenceMap": {"plato": 95}
            }))
            .unwrap();

        let canonical_json = serde_json::to_value(&first).unwrap();
        let second = n.normalize(&canonical_json).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn batch_skips_bad_records_and_keeps_going() {
        let batch = normalizer().normalize_batch(&[
            json!({"id": "plato", "name": "Plato"}),
            json!(42),
            json!({"name": "anonymous"}),
            json!({"id": "aristotle", "name": "Aristotle"}),
        ]);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.rejections.len(), 2);
        assert_eq!(batch.rejections[0].index, 1);
        assert_eq!(batch.rejections[1].reason, NormalizeError::MissingId);
        assert_eq!(batch.rejections[1].id, None);
        assert!(!batch.is_clean());
    }

    #[test]
    fn duplicate_ids_keep_first_slot_and_last_content() {
        let batch = normalizer().normalize_batch(&[
            json!({"id": "plato", "name": "Plato (draft)"}),
            json!({"id": "socrates", "name": "Socrates"}),
            json!({"id": "plato", "name": "Plato"}),
        ]);
        let names: Vec<&str> = batch.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Plato", "Socrates"]);
        assert_eq!(
            batch.rejections,
            vec![Rejection {
                index: 0,
                id: Some("plato".to_string()),
                reason: NormalizeError::Superseded("plato".to_string())
            }]
        );
    }

    #[test]
    fn rejections_carry_the_raw_id_when_present() {
        let batch = normalizer().normalize_batch(&[json!({"id": "nameless"}), json!({"id": 7})]);
        let ids: Vec<Option<&str>> = batch.rejections.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("nameless"), Some("7")]);
    }

    #[test]
    fn empty_batch_is_empty() {
        let batch = normalizer().normalize_batch(&[]);
        assert!(batch.records.is_empty());
        assert!(batch.is_clean());
    }
}
