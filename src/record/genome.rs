//! The eight-axis philosophical genome

use serde::{Deserialize, Serialize};

/// Height value for hybrid stances and anything outside the vocabulary.
pub const NEUTRAL: f64 = 0.5;

/// One axis of the genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenomeAxis {
    BeingVsBecoming,
    OneVsMany,
    MindVsMatter,
    FreedomVsDeterminism,
    TranscendentVsImmanent,
    RealismVsAntiRealism,
    ReasonVsExperience,
    AbsoluteVsRelative,
}

impl GenomeAxis {
    pub const ALL: [GenomeAxis; 8] = [
        GenomeAxis::BeingVsBecoming,
        GenomeAxis::OneVsMany,
        GenomeAxis::MindVsMatter,
        GenomeAxis::FreedomVsDeterminism,
        GenomeAxis::TranscendentVsImmanent,
        GenomeAxis::RealismVsAntiRealism,
        GenomeAxis::ReasonVsExperience,
        GenomeAxis::AbsoluteVsRelative,
    ];

    /// Field name in the current record shape.
    pub fn camel_name(self) -> &'static str {
        match self {
            GenomeAxis::BeingVsBecoming => "beingVsBecoming",
            GenomeAxis::OneVsMany => "oneVsMany",
            GenomeAxis::MindVsMatter => "mindVsMatter",
            GenomeAxis::FreedomVsDeterminism => "freedomVsDeterminism",
            GenomeAxis::TranscendentVsImmanent => "transcendentVsImmanent",
            GenomeAxis::RealismVsAntiRealism => "realismVsAntiRealism",
            GenomeAxis::ReasonVsExperience => "reasonVsExperience",
            GenomeAxis::AbsoluteVsRelative => "absoluteVsRelative",
        }
    }

    /// Field name in the legacy nested shape and in database rows.
    pub fn snake_name(self) -> &'static str {
        match self {
            GenomeAxis::BeingVsBecoming => "being_vs_becoming",
            GenomeAxis::OneVsMany => "one_vs_many",
            GenomeAxis::MindVsMatter => "mind_vs_matter",
            GenomeAxis::FreedomVsDeterminism => "freedom_vs_determinism",
            GenomeAxis::TranscendentVsImmanent => "transcendent_vs_immanent",
            GenomeAxis::RealismVsAntiRealism => "realism_vs_antirealism",
            GenomeAxis::ReasonVsExperience => "reason_vs_experience",
            GenomeAxis::AbsoluteVsRelative => "absolute_vs_relative",
        }
    }

    /// Symbols this axis admits.
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            GenomeAxis::BeingVsBecoming => &["Being", "Becoming", "Both"],
            GenomeAxis::OneVsMany => &["One", "Many", "Both"],
            GenomeAxis::MindVsMatter => &["Mind", "Matter", "Dualist", "Synthesis"],
            GenomeAxis::FreedomVsDeterminism => &["Freedom", "Determinism", "Both"],
            GenomeAxis::TranscendentVsImmanent => &["Transcendent", "Immanent", "Both"],
            GenomeAxis::RealismVsAntiRealism => &["Realist", "Anti-realist", "Both"],
            GenomeAxis::ReasonVsExperience => &["Reason", "Experience", "Synthesis"],
            GenomeAxis::AbsoluteVsRelative => &["Absolute", "Relative", "Both"],
        }
    }

    pub fn recognizes(self, symbol: &str) -> bool {
        self.vocabulary().contains(&symbol)
    }
}

/// Map a stance symbol to its height contribution.
///
/// Poles sit at 0.2 and 0.8; hybrids and unknown symbols at 0.5.
pub fn stance_value(symbol: &str) -> f64 {
    match symbol {
        "Being" | "One" | "Mind" | "Determinism" | "Immanent" | "Realist" | "Reason"
        | "Absolute" => 0.2,
        "Becoming" | "Many" | "Matter" | "Freedom" | "Transcendent" | "Anti-realist"
        | "Experience" | "Relative" => 0.8,
        "Both" | "Dualist" | "Synthesis" => NEUTRAL,
        _ => NEUTRAL,
    }
}

/// A philosopher's stance on each genome axis.
///
/// Empty strings mean the source carried no stance for that axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genome {
    pub being_vs_becoming: String,
    pub one_vs_many: String,
    pub mind_vs_matter: String,
    pub freedom_vs_determinism: String,
    pub transcendent_vs_immanent: String,
    pub realism_vs_anti_realism: String,
    pub reason_vs_experience: String,
    pub absolute_vs_relative: String,
}

impl Genome {
    pub fn get(&self, axis: GenomeAxis) -> &str {
        match axis {
            GenomeAxis::BeingVsBecoming => &self.being_vs_becoming,
            GenomeAxis::OneVsMany => &self.one_vs_many,
            GenomeAxis::MindVsMatter => &self.mind_vs_matter,
            GenomeAxis::FreedomVsDeterminism => &self.freedom_vs_determinism,
            GenomeAxis::TranscendentVsImmanent => &self.transcendent_vs_immanent,
            GenomeAxis::RealismVsAntiRealism => &self.realism_vs_anti_realism,
            GenomeAxis::ReasonVsExperience => &self.reason_vs_experience,
            GenomeAxis::AbsoluteVsRelative => &self.absolute_vs_relative,
        }
    }

    pub fn set(&mut self, axis: GenomeAxis, symbol: impl Into<String>) {
        let slot = match axis {
            GenomeAxis::BeingVsBecoming => &mut self.being_vs_becoming,
            GenomeAxis::OneVsMany => &mut self.one_vs_many,
            GenomeAxis::MindVsMatter => &mut self.mind_vs_matter,
            GenomeAxis::FreedomVsDeterminism => &mut self.freedom_vs_determinism,
            GenomeAxis::TranscendentVsImmanent => &mut self.transcendent_vs_immanent,
            GenomeAxis::RealismVsAntiRealism => &mut self.realism_vs_anti_realism,
            GenomeAxis::ReasonVsExperience => &mut self.reason_vs_experience,
            GenomeAxis::AbsoluteVsRelative => &mut self.absolute_vs_relative,
        };
        *slot = symbol.into();
    }

    /// Mean stance value across all eight axes, in [0, 1].
    pub fn height(&self) -> f64 {
        let sum: f64 = GenomeAxis::ALL
            .iter()
            .map(|axis| stance_value(self.get(*axis)))
            .sum();
        sum / GenomeAxis::ALL.len() as f64
    }

    /// Axes whose stance is outside that axis' vocabulary (including empty).
    pub fn unrecognized_axes(&self) -> Vec<GenomeAxis> {
        GenomeAxis::ALL
            .iter()
            .copied()
            .filter(|axis| !axis.recognizes(self.get(*axis)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genome_of(symbols: [&str; 8]) -> Genome {
        let mut genome = Genome::default();
        for (axis, symbol) in GenomeAxis::ALL.iter().zip(symbols) {
            genome.set(*axis, symbol);
        }
        genome
    }

    #[test]
    fn empty_genome_is_neutral() {
        assert_eq!(Genome::default().height(), 0.5);
    }

    #[test]
    fn all_low_poles_give_minimum_height() {
        let genome = genome_of([
            "Being", "One", "Mind", "Determinism", "Immanent", "Realist", "Reason", "Absolute",
        ]);
        assert!((genome.height() - 0.2).abs() < 1e-12);
        assert!(genome.unrecognized_axes().is_empty());
    }

    #[test]
    fn all_high_poles_give_maximum_height() {
        let genome = genome_of([
            "Becoming",
            "Many",
            "Matter",
            "Freedom",
            "Transcendent",
            "Anti-realist",
            "Experience",
            "Relative",
        ]);
        assert!((genome.height() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn unknown_symbols_fall_back_to_neutral() {
        let genome = genome_of(["Flux", "", "?", "Both", "Both", "Both", "Synthesis", "Both"]);
        assert_eq!(genome.height(), 0.5);
        assert_eq!(
            genome.unrecognized_axes(),
            vec![
                GenomeAxis::BeingVsBecoming,
                GenomeAxis::OneVsMany,
                GenomeAxis::MindVsMatter
            ]
        );
    }

    #[test]
    fn recognized_vocabulary_stays_within_pole_bounds() {
        for axis in GenomeAxis::ALL {
            for symbol in axis.vocabulary() {
                let v = stance_value(symbol);
                assert!((0.2..=0.8).contains(&v), "{} -> {}", symbol, v);
            }
        }
    }

    #[test]
    fn genome_serializes_with_camel_case_axis_names() {
        let json = serde_json::to_value(Genome::default()).unwrap();
        for axis in GenomeAxis::ALL {
            assert!(json.get(axis.camel_name()).is_some(), "{}", axis.camel_name());
        }
    }
}
