//! Shared state types for the egui UI.

use std::time::{Duration, Instant};

use egui::Color32;

use crate::egui_app::ui::style;

/// How long a decision toast stays on screen.
const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub selector: DatasetSelectorState,
    pub records: RecordListState,
    /// Most recent decision notification, if still visible.
    pub toast: Option<DecisionToast>,
    /// Card whose audio clip is currently playing.
    pub playing_card: Option<usize>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            selector: DatasetSelectorState::default(),
            records: RecordListState::default(),
            toast: None,
            playing_card: None,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
}

impl StatusBarState {
    /// Default status shown before the first dataset load resolves.
    pub fn idle() -> Self {
        Self {
            text: "Select a dataset to begin review".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
        }
    }
}

/// Dataset selector shown in the top bar.
#[derive(Clone, Debug, Default)]
pub struct DatasetSelectorState {
    pub options: Vec<DatasetChoiceView>,
    pub selected: Option<usize>,
}

/// Display data for one selectable dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetChoiceView {
    pub name: String,
    pub path: String,
}

/// Rendered record cards rebuilt wholesale on each load completion.
#[derive(Clone, Debug, Default)]
pub struct RecordListState {
    pub cards: Vec<RecordCardState>,
    /// Bumped on every rebuild; stale media completions compare against it.
    pub generation: u64,
}

/// One rendered record plus its media slots.
#[derive(Clone, Debug)]
pub struct RecordCardState {
    pub view: RecordCardView,
    pub image: MediaSlot<egui::ColorImage>,
    pub audio: MediaSlot<Vec<u8>>,
}

impl RecordCardState {
    pub fn new(view: RecordCardView) -> Self {
        Self {
            view,
            image: MediaSlot::Absent,
            audio: MediaSlot::Absent,
        }
    }
}

/// Render-friendly projection of one record awaiting review.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordCardView {
    /// Index of the backing record within the loaded dataset.
    pub record_index: usize,
    pub id: String,
    pub species: String,
    pub location: String,
    pub signal: String,
    /// Raw image reference from the payload, when present.
    pub image: Option<String>,
    /// Raw audio reference from the payload, when present.
    pub audio: Option<String>,
}

/// Lifecycle of one optional media element on a card.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MediaSlot<T> {
    /// The record has no such field; no element is rendered.
    #[default]
    Absent,
    Loading,
    Ready(T),
    Failed,
}

impl<T> MediaSlot<T> {
    /// True when the record carries the corresponding field at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Non-blocking decision notification; fires exactly once per decision.
#[derive(Clone, Debug)]
pub struct DecisionToast {
    pub message: String,
    raised_at: Instant,
}

impl DecisionToast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    /// True once the toast has outlived its display window.
    pub fn is_expired(&self) -> bool {
        self.raised_at.elapsed() >= TOAST_LIFETIME
    }
}
