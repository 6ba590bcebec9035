// Overlay rendering for One Hand
// Floating control panel drawn from the overlay nodes in the document.

use crate::app::{OneHand, PageActions};
use crate::config::Corner;
use crate::layout::{LABEL_CLASS, OVERLAY_CLASS, OVERLAY_MARGIN, OVERLAY_PADDING, OVERLAY_ROUNDING};
use crate::message::Message;
use crate::model::Document;
use crate::subscription::COMMAND_ATTR;
use eframe::egui;

enum Control {
    Button { text: String, command: Option<Message> },
    Label(String),
}

/// Reads the attached overlay subtree, if any, into drawable controls.
fn overlay_controls(doc: &Document) -> Option<Vec<Control>> {
    let root = doc
        .nodes_with_class(OVERLAY_CLASS)
        .into_iter()
        .find(|id| doc.is_connected(*id))?;
    let children = doc.node(root)?.children().to_vec();

    let controls = children
        .into_iter()
        .filter_map(|child| {
            let node = doc.node(child)?;
            if node.tag == "button" {
                Some(Control::Button {
                    text: doc.text_content(child),
                    command: node.attr(COMMAND_ATTR).and_then(Message::from_overlay_command),
                })
            } else if node.has_class(LABEL_CLASS) {
                Some(Control::Label(doc.text_content(child)))
            } else {
                None
            }
        })
        .collect();
    Some(controls)
}

fn anchor(corner: Corner) -> (egui::Align2, egui::Vec2) {
    match corner {
        Corner::TopLeft => (egui::Align2::LEFT_TOP, egui::vec2(OVERLAY_MARGIN, OVERLAY_MARGIN)),
        Corner::TopRight => (egui::Align2::RIGHT_TOP, egui::vec2(-OVERLAY_MARGIN, OVERLAY_MARGIN)),
        Corner::BottomLeft => (egui::Align2::LEFT_BOTTOM, egui::vec2(OVERLAY_MARGIN, -OVERLAY_MARGIN)),
        Corner::BottomRight => (
            egui::Align2::RIGHT_BOTTOM,
            egui::vec2(-OVERLAY_MARGIN, -OVERLAY_MARGIN),
        ),
    }
}

impl OneHand {
    pub(crate) fn render_overlay(&self, ctx: &egui::Context, actions: &mut PageActions) {
        let Some(controls) = overlay_controls(&self.document) else {
            return;
        };
        let (align, offset) = anchor(self.config.overlay.corner);

        egui::Area::new(egui::Id::new("ohn_overlay"))
            .order(egui::Order::Foreground)
            .anchor(align, offset)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .corner_radius(OVERLAY_ROUNDING)
                    .inner_margin(OVERLAY_PADDING)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            for control in controls {
                                match control {
                                    Control::Button { text, command } => {
                                        if ui.button(text).clicked() {
                                            if let Some(message) = command {
                                                actions.dispatch(message);
                                            }
                                        }
                                    }
                                    Control::Label(text) => {
                                        ui.separator();
                                        ui.label(egui::RichText::new(text).monospace().strong());
                                    }
                                }
                            }
                        });
                    });
            });
    }
}
