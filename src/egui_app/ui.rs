//! egui renderer for the application UI.

mod record_card;
/// Palette and status badge styling.
pub mod style;
mod toast;

use std::collections::HashMap;

use eframe::egui::{
    self, Frame, Margin, RichText, TextureHandle, TextureOptions, Ui,
};

use record_card::CardAction;

use crate::egui_app::controller::ReviewController;
use crate::egui_app::state::MediaSlot;
use crate::observations::config;

/// Smallest window the layout still works in.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(720.0, 480.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: ReviewController,
    visuals_set: bool,
    /// Uploaded thumbnails keyed by card index, valid for one generation.
    textures: HashMap<usize, TextureHandle>,
    textures_generation: u64,
}

impl EguiApp {
    /// Create the app from the on-disk configuration.
    pub fn new() -> Result<Self, String> {
        let config =
            config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        let mut controller = ReviewController::new(config);
        controller.select_first_dataset();
        Ok(Self::with_controller(controller))
    }

    /// Wrap an existing controller, e.g. one built from a custom config.
    pub fn with_controller(controller: ReviewController) -> Self {
        Self {
            controller,
            visuals_set: false,
            textures: HashMap::new(),
            textures_generation: 0,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        let options = self.controller.ui.selector.options.clone();
        let selected = self.controller.ui.selector.selected;
        let mut chosen = None;

        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Fieldvet").strong());
                    ui.separator();
                    ui.label("Dataset:");
                    let current = selected
                        .and_then(|index| options.get(index))
                        .map(|option| option.name.clone())
                        .unwrap_or_else(|| "Select a dataset".to_string());
                    egui::ComboBox::from_id_salt("dataset_select")
                        .width(220.0)
                        .selected_text(current)
                        .show_ui(ui, |ui| {
                            for (index, option) in options.iter().enumerate() {
                                let response = ui
                                    .selectable_label(Some(index) == selected, &option.name)
                                    .on_hover_text(&option.path);
                                if response.clicked() {
                                    chosen = Some(index);
                                }
                            }
                        });
                    if ui.button("Reload").clicked() {
                        self.controller.request_load();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });

        if let Some(index) = chosen {
            self.controller.select_dataset(index);
        }
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        6.0,
                        status.badge_color,
                    );
                    ui.add_space(20.0);
                    ui.label(RichText::new(&status.badge_label).strong());
                    ui.separator();
                    ui.label(&status.text);
                });
            });
    }

    fn render_records(&mut self, ui: &mut Ui) {
        self.sync_textures(ui.ctx());
        let palette = style::palette();
        let mut actions: Vec<(usize, CardAction)> = Vec::new();

        egui::ScrollArea::vertical()
            .id_salt("records_scroll")
            .show(ui, |ui| {
                let cards = &self.controller.ui.records.cards;
                if cards.is_empty() {
                    let hint = if self.controller.ui.selector.selected.is_some() {
                        "No records awaiting review"
                    } else {
                        "Select a dataset to begin review"
                    };
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(hint).color(palette.text_muted));
                    });
                    return;
                }
                for (card_index, card) in cards.iter().enumerate() {
                    let texture = self.textures.get(&card_index);
                    let playing = self.controller.ui.playing_card == Some(card_index);
                    if let Some(action) = record_card::show(ui, card, texture, playing) {
                        actions.push((card_index, action));
                    }
                    ui.add_space(8.0);
                }
            });

        for (card_index, action) in actions {
            let record_index = self
                .controller
                .ui
                .records
                .cards
                .get(card_index)
                .map(|card| card.view.record_index);
            match action {
                CardAction::Approve => {
                    if let Some(record_index) = record_index {
                        self.controller.decide(record_index, true);
                    }
                }
                CardAction::Reject => {
                    if let Some(record_index) = record_index {
                        self.controller.decide(record_index, false);
                    }
                }
                CardAction::PlayAudio => self.controller.play_audio(card_index),
                CardAction::StopAudio => self.controller.stop_audio(),
            }
        }
    }

    /// Upload decoded thumbnails for the current card generation.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let generation = self.controller.ui.records.generation;
        if generation != self.textures_generation {
            self.textures.clear();
            self.textures_generation = generation;
        }
        for (card_index, card) in self.controller.ui.records.cards.iter().enumerate() {
            if let MediaSlot::Ready(image) = &card.image {
                if !self.textures.contains_key(&card_index) {
                    let texture = ctx.load_texture(
                        format!("record_image_{generation}_{card_index}"),
                        image.clone(),
                        TextureOptions::LINEAR,
                    );
                    self.textures.insert(card_index, texture);
                }
            }
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.process_frame();
        self.render_top_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_records(ui);
        });
        self.render_status(ctx);
        toast::show(ctx, self.controller.ui.toast.as_ref());
        ctx.request_repaint();
    }
}
