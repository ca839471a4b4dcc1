//! Rendering for one record card.

use eframe::egui::{self, Frame, Margin, RichText, TextureHandle, Ui};

use super::style;
use crate::egui_app::state::{MediaSlot, RecordCardState};

const THUMBNAIL_MAX_WIDTH: f32 = 320.0;

/// Interaction produced by one card during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum CardAction {
    Approve,
    Reject,
    PlayAudio,
    StopAudio,
}

/// Render a card; returns the action clicked this frame, if any.
pub(super) fn show(
    ui: &mut Ui,
    card: &RecordCardState,
    texture: Option<&TextureHandle>,
    playing: bool,
) -> Option<CardAction> {
    let palette = style::palette();
    let mut action = None;
    Frame::new()
        .fill(palette.bg_secondary)
        .stroke(style::card_border())
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            field_row(ui, "ID:", &card.view.id);
            field_row(ui, "Suggested Species:", &card.view.species);
            field_row(ui, "Location:", &card.view.location);
            field_row(ui, "Signal:", &card.view.signal);

            show_image_slot(ui, &card.image, texture);
            if let Some(audio_action) = show_audio_slot(ui, &card.audio, playing) {
                action = Some(audio_action);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("Approve").color(palette.accent_approve))
                    .clicked()
                {
                    action = Some(CardAction::Approve);
                }
                if ui
                    .button(RichText::new("Reject").color(palette.accent_reject))
                    .clicked()
                {
                    action = Some(CardAction::Reject);
                }
            });
        });
    action
}

fn field_row(ui: &mut Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).strong());
        ui.label(value);
    });
}

fn show_image_slot(
    ui: &mut Ui,
    slot: &MediaSlot<egui::ColorImage>,
    texture: Option<&TextureHandle>,
) {
    let palette = style::palette();
    match slot {
        MediaSlot::Absent => {}
        MediaSlot::Loading => {
            ui.label(RichText::new("Loading image...").color(palette.text_muted));
        }
        MediaSlot::Failed => {
            ui.label(RichText::new("Image unavailable").color(palette.text_muted));
        }
        MediaSlot::Ready(_) => {
            if let Some(texture) = texture {
                let size = texture.size_vec2();
                let scale = (THUMBNAIL_MAX_WIDTH / size.x).min(1.0);
                ui.image((texture.id(), size * scale));
            }
        }
    }
}

fn show_audio_slot(ui: &mut Ui, slot: &MediaSlot<Vec<u8>>, playing: bool) -> Option<CardAction> {
    let palette = style::palette();
    match slot {
        MediaSlot::Absent => None,
        MediaSlot::Loading => {
            ui.label(RichText::new("Loading audio...").color(palette.text_muted));
            None
        }
        MediaSlot::Failed => {
            ui.label(RichText::new("Audio unavailable").color(palette.text_muted));
            None
        }
        MediaSlot::Ready(_) => {
            let mut action = None;
            ui.horizontal(|ui| {
                if playing {
                    if ui.button("Stop").clicked() {
                        action = Some(CardAction::StopAudio);
                    }
                    ui.label(RichText::new("Playing").color(palette.text_muted));
                } else if ui.button("Play audio").clicked() {
                    action = Some(CardAction::PlayAudio);
                }
            });
            action
        }
    }
}
