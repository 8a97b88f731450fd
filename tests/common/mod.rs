//! Shared fixtures for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Aristotle critiques Plato; both Ancient.
pub fn aristotle_and_plato() -> Vec<Value> {
    vec![
        json!({"id": "aristotle", "name": "Aristotle", "era": "Ancient", "critiqueMap": {"plato": 80}}),
        json!({"id": "plato", "name": "Plato", "era": "Ancient"}),
    ]
}

/// A fully populated record in the shape the HTTP API serves.
pub fn kant_api_record() -> Value {
    json!({
        "id": "kant",
        "name": "Immanuel Kant",
        "birthYear": 1724,
        "deathYear": 1804,
        "birthLocation": {
            "city": "Königsberg",
            "region": "Prussia",
            "modernCountry": "Russia",
            "coordinates": [54.71, 20.51]
        },
        "era": "Modern",
        "eraPosition": 0.6,
        "philosophicalGenome": {
            "beingVsBecoming": "Being",
            "oneVsMany": "Many",
            "mindVsMatter": "Mind",
            "freedomVsDeterminism": "Freedom",
            "transcendentVsImmanent": "Transcendent",
            "realismVsAntiRealism": "Anti-realist",
            "reasonVsExperience": "Both",
            "absoluteVsRelative": "Absolute"
        },
        "primaryDomain": "Epistemology",
        "allDomains": ["Epistemology", "Ethics", "Metaphysics"],
        "domainStrengths": {"Epistemology": 98, "Ethics": 95, "Metaphysics": 90},
        "spiralDynamicsStage": "Orange",
        "influenceMap": {"hume": 90, "leibniz": 70},
        "critiqueMap": {"hume": 60}
    })
}

/// A record in the legacy nested shape.
pub fn hume_legacy_record() -> Value {
    json!({
        "id": "hume",
        "name": "David Hume",
        "birth": {"year": 1711, "location": {"city": "Edinburgh", "country": "United Kingdom"}},
        "death": {"year": 1776},
        "era_classification": "Modern",
        "era_position": 45,
        "philosophical_genome": {
            "being_vs_becoming": {"position": "Becoming"},
            "reason_vs_experience": {"position": "Experience"}
        },
        "philosophical_domains": {
            "primary": ["Epistemology", "Ethics"],
            "domain_strengths_rating": {"Epistemology": 95, "Ethics": 85}
        }
    })
}

/// Write records as a JSON array into `dir`.
pub fn write_records(dir: &Path, file_name: &str, records: &[Value]) -> PathBuf {
    let path = dir.join(file_name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(serde_json::to_string(records).unwrap().as_bytes())
        .unwrap();
    path
}
