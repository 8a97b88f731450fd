//! Canonical philosopher data model

mod era;
mod genome;
mod philosopher;
pub mod spiral;

pub use era::Era;
pub use genome::{stance_value, Genome, GenomeAxis, NEUTRAL};
pub use philosopher::{BirthLocation, Domain, PhilosopherRecord, StrengthMap, SwitchPoint};
pub use spiral::Rgb;
