// Modal rendering for One Hand
// Shortcut reference built from the active keymap.

use crate::app::OneHand;
use eframe::egui;

impl OneHand {
    pub(crate) fn render_help_modal(&mut self, ctx: &egui::Context) {
        if !self.show_help {
            return;
        }
        let rows = [
            (self.keymap.toggle.to_string(), "Turn navigator on / off"),
            (self.keymap.next.to_string(), "Next element"),
            (self.keymap.prev.to_string(), "Previous element"),
            (self.keymap.activate.to_string(), "Click current element"),
            (self.keymap.refresh.to_string(), "Rescan the page"),
            (self.keymap.exit.to_string(), "Exit navigator"),
        ];

        let mut open = self.show_help;
        egui::Window::new("Shortcuts")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("help_grid").striped(true).show(ui, |ui| {
                    for (chord, action) in &rows {
                        ui.monospace(chord);
                        ui.label(*action);
                        ui.end_row();
                    }
                });
                ui.separator();
                ui.label(
                    egui::RichText::new("Only the toggle works while the navigator is off.").weak(),
                );
            });
        self.show_help = open;
    }
}
