// Panel rendering for One Hand
// Top bar, status bar and the activation log.

use crate::app::{OneHand, PageActions};
use crate::layout::{LOG_PANEL_DEFAULT, LOG_ROW_HEIGHT};
use eframe::egui;

impl OneHand {
    pub(crate) fn render_top_bar(&mut self, ctx: &egui::Context, actions: &mut PageActions) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading(self.document.title());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("?").on_hover_text("Shortcuts").clicked() {
                        self.show_help = !self.show_help;
                    }
                    if ui.button("◐").on_hover_text("Theme").clicked() {
                        self.toggle_theme();
                    }
                    if ui
                        .selectable_label(self.ui.show_log, "Log")
                        .on_hover_text("Activation log")
                        .clicked()
                    {
                        self.ui.show_log = !self.ui.show_log;
                    }
                    if ui.button("⟳").on_hover_text("Reload page").clicked() {
                        actions.reload = true;
                    }
                    ui.label(
                        egui::RichText::new(format!("Toggle: {}", self.keymap.toggle)).weak(),
                    );
                });
            });
            ui.add_space(4.0);
        });
    }

    pub(crate) fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let enabled = self.enabled_flag.get();
                ui.monospace(format!("{} = {}", self.enabled_flag.name(), enabled));
                if enabled {
                    ui.separator();
                    ui.label(self.navigator.view().label());
                }
                if let Some(path) = &self.page_path {
                    ui.separator();
                    ui.label(egui::RichText::new(path.display().to_string()).weak());
                }
                if let Some((err, _)) = &self.ui.error_message {
                    ui.colored_label(egui::Color32::RED, format!(" | {}", err));
                } else if let Some((info, _)) = &self.ui.info_message {
                    ui.colored_label(egui::Color32::LIGHT_GREEN, format!(" | {}", info));
                }
            });
        });
    }

    pub(crate) fn render_log_panel(&self, ctx: &egui::Context) {
        if !self.ui.show_log {
            return;
        }
        egui::SidePanel::right("log_panel")
            .resizable(true)
            .default_width(LOG_PANEL_DEFAULT)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Activations");
                });
                ui.separator();

                if self.ui.activation_log.is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new("Nothing clicked yet").weak());
                    });
                    return;
                }

                use egui_extras::{Column, TableBuilder};
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(false)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::auto().at_least(60.0))
                    .column(Column::remainder().clip(true))
                    .column(Column::auto())
                    .header(LOG_ROW_HEIGHT, |mut header| {
                        header.col(|ui| {
                            ui.strong("Time");
                        });
                        header.col(|ui| {
                            ui.strong("Element");
                        });
                        header.col(|ui| {
                            ui.strong("Result");
                        });
                    })
                    .body(|body| {
                        body.rows(LOG_ROW_HEIGHT, self.ui.activation_log.len(), |mut row| {
                            let record = &self.ui.activation_log[row.index()];
                            row.col(|ui| {
                                ui.monospace(record.at.format("%H:%M:%S").to_string());
                            });
                            row.col(|ui| {
                                ui.add(
                                    egui::Label::new(format!("<{}> {}", record.tag, record.text))
                                        .truncate(),
                                );
                            });
                            row.col(|ui| {
                                ui.label(&record.outcome);
                            });
                        });
                    });
            });
    }
}
