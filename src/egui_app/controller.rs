//! Maintains review state and bridges domain logic to the egui UI.

mod dataset_loader;
mod jobs;
mod media_loader;
#[cfg(test)]
mod tests;

use jobs::{
    ControllerJobs, DatasetLoadJob, DatasetLoadResult, JobMessage, MediaKind, MediaLoadJob,
    MediaLoadResult, MediaPayload,
};

use crate::egui_app::state::*;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::egui_app::view_model;
use crate::media::ReviewAudioPlayer;
use crate::observations::config::AppConfig;
use crate::observations::records::Record;

/// Lazily opened audio output; a failed open is not retried.
enum PlayerSlot {
    Unopened,
    Ready(ReviewAudioPlayer),
    Unavailable,
}

/// Owns the loaded dataset and exposes render-ready state to the UI.
///
/// The rendered card list is rebuilt only by load completions; decisions
/// mutate the in-memory records and trigger a reload, so a decided record
/// reappears once the unchanged remote payload resolves again.
pub struct ReviewController {
    pub ui: UiState,
    config: AppConfig,
    records: Vec<Record>,
    jobs: ControllerJobs,
    player: PlayerSlot,
}

impl ReviewController {
    pub fn new(config: AppConfig) -> Self {
        let mut ui = UiState::default();
        ui.selector.options = config
            .datasets
            .iter()
            .map(|option| DatasetChoiceView {
                name: option.name.clone(),
                path: option.path.clone(),
            })
            .collect();
        Self {
            ui,
            config,
            records: Vec::new(),
            jobs: ControllerJobs::new(),
            player: PlayerSlot::Unopened,
        }
    }

    /// Select the first catalog entry if none is active yet.
    pub fn select_first_dataset(&mut self) {
        if self.ui.selector.selected.is_none() && !self.config.datasets.is_empty() {
            self.select_dataset(0);
        }
    }

    /// Change the selected dataset by catalog index and start a load.
    pub fn select_dataset(&mut self, index: usize) {
        if index >= self.config.datasets.len() {
            return;
        }
        self.ui.selector.selected = Some(index);
        self.request_load();
    }

    /// Re-fetch the currently selected dataset.
    pub fn request_load(&mut self) {
        let Some(index) = self.ui.selector.selected else {
            return;
        };
        let option = self.config.datasets[index].clone();
        let seq = self.jobs.next_load_seq();
        self.set_status(format!("Loading {}", option.name), StatusTone::Busy);
        tracing::info!(dataset = %option.path, seq, "Requesting dataset load");
        self.jobs.send_dataset_job(DatasetLoadJob {
            seq,
            base_url: self.config.base_url.clone(),
            path: option.path,
        });
    }

    /// Apply a reviewer decision to the record at `record_index`.
    ///
    /// Notifies once, mutates the in-memory record, then reloads the current
    /// dataset. The rendered list stays untouched until that reload resolves.
    pub fn decide(&mut self, record_index: usize, approved: bool) {
        let Some(record) = self.records.get_mut(record_index) else {
            return;
        };
        record.apply_decision(approved);
        let id = record.id.clone();
        let outcome = if approved { "approved" } else { "rejected" };
        let message = format!("Record {id} {outcome}.");
        self.ui.toast = Some(DecisionToast::new(message));
        tracing::info!(record = %id, outcome, "Review decision applied");
        self.request_load();
    }

    /// Per-frame maintenance: drain worker messages, expire the toast,
    /// release the playback marker once the clip ends.
    pub fn process_frame(&mut self) {
        self.poll_background_jobs();
        if self
            .ui
            .toast
            .as_ref()
            .is_some_and(DecisionToast::is_expired)
        {
            self.ui.toast = None;
        }
        self.settle_playback();
    }

    /// Borrow a loaded record by dataset index.
    pub fn record(&self, record_index: usize) -> Option<&Record> {
        self.records.get(record_index)
    }

    /// Play the fetched clip attached to a card.
    pub fn play_audio(&mut self, card_index: usize) {
        let Some(card) = self.ui.records.cards.get(card_index) else {
            return;
        };
        let MediaSlot::Ready(bytes) = &card.audio else {
            return;
        };
        let bytes = bytes.clone();
        let play_result = match self.player_mut() {
            Some(player) => player.play(bytes),
            None => {
                self.set_status("Audio output unavailable", StatusTone::Warning);
                return;
            }
        };
        match play_result {
            Ok(()) => self.ui.playing_card = Some(card_index),
            Err(error) => {
                tracing::warn!(%error, "Audio clip playback failed");
                self.set_status(format!("Could not play clip: {error}"), StatusTone::Warning);
            }
        }
    }

    /// Stop any active clip.
    pub fn stop_audio(&mut self) {
        if let PlayerSlot::Ready(player) = &mut self.player {
            player.stop();
        }
        self.ui.playing_card = None;
    }

    fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::DatasetLoaded(message) => self.apply_dataset_result(message),
                JobMessage::MediaLoaded(message) => self.apply_media_result(message),
            }
        }
    }

    fn apply_dataset_result(&mut self, message: DatasetLoadResult) {
        if message.seq != self.jobs.latest_load_seq() {
            tracing::debug!(
                dataset = %message.path,
                seq = message.seq,
                latest = self.jobs.latest_load_seq(),
                "Discarding stale dataset load"
            );
            return;
        }
        match message.result {
            Ok(dataset) => {
                self.records = dataset.records;
                self.rebuild_cards();
                let pending = self.ui.records.cards.len();
                self.set_status(
                    format!("{pending} records awaiting review"),
                    StatusTone::Info,
                );
                tracing::info!(
                    dataset = %message.path,
                    pending,
                    elapsed_ms = message.elapsed.as_millis() as u64,
                    "Dataset loaded"
                );
            }
            Err(error) => {
                // Load failures keep the previous render; they surface only in the log.
                tracing::error!(dataset = %message.path, %error, "Dataset load failed");
            }
        }
    }

    /// Rebuild every card from scratch; no incremental diffing.
    fn rebuild_cards(&mut self) {
        self.stop_audio();
        self.ui.records.generation = self.ui.records.generation.wrapping_add(1);
        self.ui.records.cards = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.needs_review())
            .map(|(record_index, record)| {
                RecordCardState::new(view_model::record_card(record, record_index))
            })
            .collect();
        self.queue_media_jobs();
    }

    fn queue_media_jobs(&mut self) {
        let generation = self.ui.records.generation;
        for (card_index, card) in self.ui.records.cards.iter_mut().enumerate() {
            if let Some(reference) = card.view.image.clone() {
                card.image = MediaSlot::Loading;
                self.jobs.send_media_job(MediaLoadJob {
                    generation,
                    card_index,
                    kind: MediaKind::Image,
                    base_url: self.config.base_url.clone(),
                    reference,
                });
            }
            if let Some(reference) = card.view.audio.clone() {
                card.audio = MediaSlot::Loading;
                self.jobs.send_media_job(MediaLoadJob {
                    generation,
                    card_index,
                    kind: MediaKind::Audio,
                    base_url: self.config.base_url.clone(),
                    reference,
                });
            }
        }
    }

    fn apply_media_result(&mut self, message: MediaLoadResult) {
        if message.generation != self.ui.records.generation {
            return;
        }
        let Some(card) = self.ui.records.cards.get_mut(message.card_index) else {
            return;
        };
        match message.result {
            Ok(MediaPayload::Image(image)) => card.image = MediaSlot::Ready(image),
            Ok(MediaPayload::Audio(bytes)) => card.audio = MediaSlot::Ready(bytes),
            Err(error) => {
                tracing::warn!(
                    card = message.card_index,
                    kind = ?message.kind,
                    %error,
                    "Media load failed"
                );
                match message.kind {
                    MediaKind::Image => card.image = MediaSlot::Failed,
                    MediaKind::Audio => card.audio = MediaSlot::Failed,
                }
            }
        }
    }

    fn settle_playback(&mut self) {
        if self.ui.playing_card.is_none() {
            return;
        }
        let playing = match &self.player {
            PlayerSlot::Ready(player) => player.is_playing(),
            _ => false,
        };
        if !playing {
            self.ui.playing_card = None;
        }
    }

    fn player_mut(&mut self) -> Option<&mut ReviewAudioPlayer> {
        if matches!(self.player, PlayerSlot::Unopened) {
            match ReviewAudioPlayer::new() {
                Ok(player) => self.player = PlayerSlot::Ready(player),
                Err(error) => {
                    tracing::warn!(%error, "Audio output unavailable");
                    self.player = PlayerSlot::Unavailable;
                }
            }
        }
        match &mut self.player {
            PlayerSlot::Ready(player) => Some(player),
            _ => None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = style::status_badge_label(tone).to_string();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }
}
