//! Helpers to convert domain data into egui-facing view structs.

use crate::egui_app::state::RecordCardView;
use crate::observations::records::{Location, Record, Signal};

/// Fallback label when a record carries no suggested species.
pub const UNKNOWN_SPECIES: &str = "Unknown";

/// Indicator rendered in place of an absent location or signal.
pub const NO_VALUE: &str = "n/a";

/// Convert a record into a card view, remembering its dataset index.
pub fn record_card(record: &Record, record_index: usize) -> RecordCardView {
    RecordCardView {
        record_index,
        id: record.id.to_string(),
        species: species_label(record),
        location: location_label(record.location),
        signal: signal_label(record.signal),
        image: record.image.clone(),
        audio: record.audio.clone(),
    }
}

/// Suggested species, or the fallback label when absent.
pub fn species_label(record: &Record) -> String {
    record
        .suggested_species
        .clone()
        .unwrap_or_else(|| UNKNOWN_SPECIES.to_string())
}

fn location_label(location: Option<Location>) -> String {
    match location {
        Some(location) => format!("{}, {}", location.lat, location.lon),
        None => NO_VALUE.to_string(),
    }
}

fn signal_label(signal: Option<Signal>) -> String {
    match signal {
        Some(signal) => format!("Freq: {} Hz, Amp: {}", signal.freq_peak, signal.amplitude),
        None => NO_VALUE.to_string(),
    }
}
