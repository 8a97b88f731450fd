//! Positioned node representation

use crate::record::{PhilosopherRecord, Rgb};
use serde::{Deserialize, Serialize};

/// A point in scene space. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the vertical axis.
    pub fn horizontal_radius(&self) -> f64 {
        self.x.hypot(self.z)
    }
}

impl From<[f64; 3]> for Position {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Position> for [f64; 3] {
    fn from(p: Position) -> Self {
        [p.x, p.y, p.z]
    }
}

/// A philosopher placed in the scene.
///
/// Built once per load; never mutated until the next full reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    #[serde(flatten)]
    pub record: PhilosopherRecord,
    pub position: Position,
    /// Mean genome stance before scaling, in [0, 1]
    pub genome_height: f64,
    /// Spiral-dynamics stage colour
    pub color: Rgb,
}

impl PositionedNode {
    pub fn id(&self) -> &str {
        &self.record.id
    }
}
