//! Distinct values available for filtering

use crate::graph::PositionedNode;
use crate::record::PhilosopherRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct eras, domains and spiral stages present in a record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub eras: BTreeSet<String>,
    pub domains: BTreeSet<String>,
    pub spiral_stages: BTreeSet<String>,
}

impl Facets {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PhilosopherRecord>) -> Self {
        let mut facets = Facets::default();
        for record in records {
            if !record.era.as_str().is_empty() {
                facets.eras.insert(record.era.as_str().to_string());
            }
            if !record.primary_domain.is_empty() {
                facets.domains.insert(record.primary_domain.clone());
            }
            facets.domains.extend(record.all_domains.iter().cloned());
            if !record.spiral_dynamics_stage.is_empty() {
                facets.spiral_stages.insert(record.spiral_dynamics_stage.clone());
            }
        }
        facets
    }

    pub fn from_nodes(nodes: &[PositionedNode]) -> Self {
        Self::from_records(nodes.iter().map(|n| &n.record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Era;

    #[test]
    fn collects_distinct_values() {
        let mut plato = PhilosopherRecord::new("plato", "Plato", Era::Ancient);
        plato.primary_domain = "Metaphysics".to_string();
        plato.all_domains = vec!["Metaphysics".to_string(), "Politics".to_string()];
        plato.spiral_dynamics_stage = "Blue".to_string();

        let mut hume = PhilosopherRecord::new("hume_david", "David Hume", Era::Modern);
        hume.primary_domain = "Epistemology".to_string();

        let anonymous = PhilosopherRecord::new("x", "X", Era::default());

        let facets = Facets::from_records([&plato, &hume, &anonymous]);
        assert_eq!(facets.eras.iter().collect::<Vec<_>>(), vec!["Ancient", "Modern"]);
        assert_eq!(facets.domains.len(), 3);
        assert_eq!(facets.spiral_stages.len(), 1);
    }
}
