//! Non-blocking decision notification overlay.

use eframe::egui::{self, Align2, Frame, Margin, Order, RichText};

use super::style;
use crate::egui_app::state::DecisionToast;

/// Render the active toast anchored to the bottom-right corner.
pub(super) fn show(ctx: &egui::Context, toast: Option<&DecisionToast>) {
    let Some(toast) = toast else {
        return;
    };
    let palette = style::palette();
    egui::Area::new(egui::Id::new("decision_toast"))
        .order(Order::Foreground)
        .anchor(Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .show(ctx, |ui| {
            Frame::new()
                .fill(palette.bg_tertiary)
                .stroke(style::card_border())
                .inner_margin(Margin::symmetric(12, 8))
                .show(ui, |ui| {
                    ui.label(RichText::new(&toast.message).color(palette.text_primary));
                });
        });
}
