//! Era-sphere layout
//!
//! Each philosopher sits on the concentric layer of their era. Records are
//! spread evenly around the vertical axis by load order; the height comes
//! from the genome. Small bounded jitter keeps the result from looking like
//! a lattice. All randomness comes from a seeded `StdRng`, so a seed fully
//! determines the layout.

use super::node::{Position, PositionedNode};
use crate::record::{spiral, Era, PhilosopherRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Layer radius per era.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraRadii {
    pub ancient: f64,
    pub medieval: f64,
    pub modern: f64,
    pub contemporary: f64,
    /// Layer for eras outside the four known ones
    pub unknown: f64,
}

impl Default for EraRadii {
    fn default() -> Self {
        Self {
            ancient: 3.0,
            medieval: 5.0,
            modern: 7.0,
            contemporary: 9.0,
            unknown: 5.0,
        }
    }
}

impl EraRadii {
    pub fn radius(&self, era: &Era) -> f64 {
        match era {
            Era::Ancient => self.ancient,
            Era::Medieval => self.medieval,
            Era::Modern => self.modern,
            Era::Contemporary => self.contemporary,
            Era::Other(_) => self.unknown,
        }
    }

    fn all(&self) -> [f64; 5] {
        [self.ancient, self.medieval, self.modern, self.contemporary, self.unknown]
    }
}

/// Layout constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub radii: EraRadii,
    /// Max angular offset in radians, either direction
    pub angle_jitter: f64,
    /// Max radial offset, either direction
    pub radius_jitter: f64,
    /// Max vertical offset, either direction
    pub height_jitter: f64,
    /// `y = genome_height * height_scale - height_offset`
    pub height_scale: f64,
    pub height_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radii: EraRadii::default(),
            angle_jitter: 0.15,
            radius_jitter: 0.25,
            height_jitter: 0.25,
            height_scale: 3.0,
            height_offset: 1.5,
        }
    }
}

impl LayoutConfig {
    /// No jitter at all; positions are exact.
    pub fn lattice() -> Self {
        Self {
            angle_jitter: 0.0,
            radius_jitter: 0.0,
            height_jitter: 0.0,
            ..Self::default()
        }
    }

    /// Problems that would make the layout meaningless.
    pub fn validate(&self) -> Result<(), String> {
        if self.radii.all().iter().any(|r| !r.is_finite() || *r <= 0.0) {
            return Err("era radii must be positive".to_string());
        }
        let jitters = [self.angle_jitter, self.radius_jitter, self.height_jitter];
        if jitters.iter().any(|j| !j.is_finite() || *j < 0.0) {
            return Err("jitter amplitudes must be non-negative".to_string());
        }
        if !self.height_scale.is_finite() || !self.height_offset.is_finite() {
            return Err("height scale and offset must be finite".to_string());
        }
        Ok(())
    }
}

/// Places canonical records in scene space.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    config: LayoutConfig,
}

impl Layout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Position every record. The same records and seed give the same output.
    pub fn place(&self, records: Vec<PhilosopherRecord>, seed: u64) -> Vec<PositionedNode> {
        let mut rng = StdRng::seed_from_u64(seed);
        let total = records.len();

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| self.place_one(record, index, total, &mut rng))
            .collect()
    }

    fn place_one(
        &self,
        record: PhilosopherRecord,
        index: usize,
        total: usize,
        rng: &mut StdRng,
    ) -> PositionedNode {
        let c = &self.config;

        // Draw order is part of the reproducibility contract: angle, height, radius.
        let angle = index as f64 * TAU / total as f64 + jitter(rng, c.angle_jitter);
        let genome_height = record.philosophical_genome.height();
        let y = genome_height * c.height_scale - c.height_offset + jitter(rng, c.height_jitter);
        let radius = c.radii.radius(&record.era) + jitter(rng, c.radius_jitter);

        let position = Position::new(radius * angle.cos(), y, radius * angle.sin());
        let color = spiral::stage_color(&record.spiral_dynamics_stage);

        PositionedNode {
            record,
            position,
            genome_height,
            color,
        }
    }
}

/// Uniform offset in `(-amplitude, amplitude)`. Zero, negative or
/// non-finite amplitudes draw nothing.
fn jitter(rng: &mut StdRng, amplitude: f64) -> f64 {
    if amplitude > 0.0 && amplitude.is_finite() {
        rng.gen_range(-amplitude..amplitude)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{stance_value, GenomeAxis};

    fn record(id: &str, era: Era) -> PhilosopherRecord {
        PhilosopherRecord::new(id, id, era)
    }

    #[test]
    fn lattice_layout_is_exact() {
        let layout = Layout::new(LayoutConfig::lattice());
        let nodes = layout.place(
            vec![
                record("a", Era::Ancient),
                record("b", Era::Medieval),
                record("c", Era::Modern),
                record("d", Era::Contemporary),
            ],
            7,
        );

        let expect = [(3.0, 0.0), (0.0, 5.0), (-7.0, 0.0), (0.0, -9.0)];
        for (node, (x, z)) in nodes.iter().zip(expect) {
            assert!((node.position.x - x).abs() < 1e-9, "{:?}", node.position);
            assert!((node.position.z - z).abs() < 1e-9, "{:?}", node.position);
            // Empty genome is neutral: 0.5 * 3 - 1.5
            assert!(node.position.y.abs() < 1e-12);
        }
    }

    #[test]
    fn unknown_era_uses_default_layer() {
        let layout = Layout::new(LayoutConfig::lattice());
        let nodes = layout.place(vec![record("x", Era::parse("Renaissance"))], 0);
        assert!((nodes[0].position.horizontal_radius() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn genome_drives_height() {
        let mut high = record("high", Era::Modern);
        for axis in GenomeAxis::ALL {
            let pole = axis
                .vocabulary()
                .iter()
                .find(|s| stance_value(s) > 0.5)
                .unwrap();
            high.philosophical_genome.set(axis, *pole);
        }
        let layout = Layout::new(LayoutConfig::lattice());
        let nodes = layout.place(vec![high], 0);
        assert!((nodes[0].genome_height - 0.8).abs() < 1e-12);
        assert!((nodes[0].position.y - 0.9).abs() < 1e-9);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let layout = Layout::default();
        let records: Vec<_> = (0..200).map(|i| record(&i.to_string(), Era::Ancient)).collect();
        let nodes = layout.place(records, 12345);

        for (i, node) in nodes.iter().enumerate() {
            let r = node.position.horizontal_radius();
            assert!((2.75..=3.25).contains(&r), "radius {}", r);
            assert!(node.position.y.abs() <= 0.25, "height {}", node.position.y);

            let base = i as f64 * TAU / 200.0;
            let angle = node.position.z.atan2(node.position.x);
            let delta = (angle - base).rem_euclid(TAU);
            let delta = if delta > std::f64::consts::PI { delta - TAU } else { delta };
            assert!(delta.abs() <= 0.15 + 1e-9, "angle offset {}", delta);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let layout = Layout::default();
        let records = vec![record("a", Era::Ancient), record("b", Era::Modern)];
        let first = layout.place(records.clone(), 99);
        let second = layout.place(records.clone(), 99);
        let other = layout.place(records, 100);
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn nothing_to_place() {
        assert!(Layout::default().place(Vec::new(), 1).is_empty());
    }

    #[test]
    fn node_colour_follows_spiral_stage() {
        let mut r = record("a", Era::Modern);
        r.spiral_dynamics_stage = "Orange".to_string();
        let nodes = Layout::new(LayoutConfig::lattice()).place(vec![r], 0);
        assert_eq!(nodes[0].color.to_hex(), "#FF8C00");
    }

    #[test]
    fn validation_rejects_bad_constants() {
        assert!(LayoutConfig::default().validate().is_ok());

        let mut negative_jitter = LayoutConfig::default();
        negative_jitter.height_jitter = -0.1;
        assert!(negative_jitter.validate().is_err());

        let mut zero_radius = LayoutConfig::default();
        zero_radius.radii.modern = 0.0;
        assert!(zero_radius.validate().is_err());
    }

    #[test]
    fn unbounded_jitter_places_without_offsets() {
        let config = LayoutConfig {
            angle_jitter: f64::NAN,
            radius_jitter: f64::INFINITY,
            height_jitter: f64::NEG_INFINITY,
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());

        let nodes = Layout::new(config).place(vec![record("a", Era::Ancient)], 4);
        assert!((nodes[0].position.horizontal_radius() - 3.0).abs() < 1e-9);
        assert!((nodes[0].position.y - 0.0).abs() < 1e-9);
    }
}
