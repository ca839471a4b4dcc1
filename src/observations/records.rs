//! Observation records as delivered by a dataset resource.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label written to `verified_species` when a record is rejected.
pub const REJECTED_SPECIES: &str = "rejected";

/// Opaque record identifier; datasets use numbers and strings interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer identifier.
    Number(i64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

/// Coordinates attached to an observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Acoustic measurement attached to an observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Dominant frequency in Hz.
    pub freq_peak: f64,
    pub amplitude: f64,
}

/// One reviewable observation entry.
///
/// Every field other than `id` is optional in the wire format; absent
/// optionals render as fallbacks, never as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<Signal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_species: Option<String>,
}

impl Record {
    /// True while the record still awaits a reviewer decision.
    pub fn needs_review(&self) -> bool {
        !self.verified
    }

    /// Apply a reviewer decision in memory.
    ///
    /// Both outcomes mark the record reviewed; the outcome itself is recorded
    /// in `verified_species`: the suggested label when approved, the
    /// rejection sentinel otherwise. Nothing is written back to the dataset
    /// resource, so the mutation lasts only until the next reload.
    pub fn apply_decision(&mut self, approved: bool) {
        self.verified = true;
        self.verified_species = if approved {
            self.suggested_species.clone()
        } else {
            Some(REJECTED_SPECIES.to_string())
        };
    }
}

/// The full collection of records returned by one fetch.
///
/// A payload without a `records` field fails deserialization; that surfaces
/// as a fetch error, matching the single error class of the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    /// Records awaiting review, in payload order.
    pub fn pending(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.needs_review())
    }
}
