//! Spiral-dynamics stage colours

use serde::{Deserialize, Serialize};

/// Stage names in palette order.
pub const STAGES: [&str; 8] = [
    "Purple", "Red", "Blue", "Orange", "Green", "Yellow", "Turquoise", "Coral",
];

const PALETTE: [Rgb; 8] = [
    Rgb::new(0x8B, 0x00, 0xFF),
    Rgb::new(0xFF, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0xFF),
    Rgb::new(0xFF, 0x8C, 0x00),
    Rgb::new(0x00, 0xFF, 0x00),
    Rgb::new(0xFF, 0xFF, 0x00),
    Rgb::new(0x40, 0xE0, 0xD0),
    Rgb::new(0xFF, 0x7F, 0x50),
];

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear mix: `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let hex = s.strip_prefix('#').unwrap_or(&s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid colour: {}", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("invalid colour {}: {}", s, e))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fractional palette index for a stage name.
///
/// Transitional stages written `A-B` sit at the mean of their parts'
/// indices (`Blue-Orange` is 2.5). Unknown stages map to 0.
pub fn stage_index(stage: &str) -> f64 {
    let single = |name: &str| {
        STAGES
            .iter()
            .position(|s| s.eq_ignore_ascii_case(name.trim()))
            .map(|i| i as f64)
    };

    if let Some(i) = single(stage) {
        return i;
    }

    let parts: Option<Vec<f64>> = stage.split('-').map(single).collect();
    match parts {
        Some(indices) if indices.len() > 1 => indices.iter().sum::<f64>() / indices.len() as f64,
        _ => 0.0,
    }
}

/// Palette colour for a stage, mixing neighbours for fractional indices.
pub fn stage_color(stage: &str) -> Rgb {
    let index = stage_index(stage).clamp(0.0, (PALETTE.len() - 1) as f64);
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    PALETTE[lower].mix(PALETTE[upper], index - lower as f64)
}
