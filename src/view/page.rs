// Page rendering for One Hand
// Draws the hosted document and the highlight marker around the current element.

use crate::app::{OneHand, PageActions};
use crate::layout::{FOCUS_CLASS, NODE_SPACING, OVERLAY_CLASS, PAGE_MAX_WIDTH};
use crate::model::{Document, NodeId};
use crate::state::is_interactive;
use crate::style::PageStyle;
use eframe::egui;

const INLINE_CONTAINERS: [&str; 13] = [
    "p", "li", "label", "h1", "h2", "h3", "h4", "h5", "h6", "td", "th", "nav", "blockquote",
];

#[derive(Clone, Copy, Default)]
struct TextFormat {
    heading: Option<u8>,
    strong: bool,
    italics: bool,
    strike: bool,
    monospace: bool,
}

struct PageRenderer<'a> {
    doc: &'a mut Document,
    style: &'a PageStyle,
    actions: &'a mut PageActions,
    scroll_target: Option<NodeId>,
    focus_target: Option<NodeId>,
}

impl OneHand {
    pub(crate) fn render_page(&mut self, ctx: &egui::Context, actions: &mut PageActions) {
        let scroll_target = self.document.take_scroll_request();
        let focus_target = self.document.take_focus_request();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("page_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_max_width(PAGE_MAX_WIDTH.min(ui.available_width()));
                    ui.spacing_mut().item_spacing.y = NODE_SPACING;
                    let body = self.document.body();
                    let mut renderer = PageRenderer {
                        doc: &mut self.document,
                        style: &self.style,
                        actions,
                        scroll_target,
                        focus_target,
                    };
                    renderer.children(ui, body, TextFormat::default());
                });
        });
    }
}

impl PageRenderer<'_> {
    fn children(&mut self, ui: &mut egui::Ui, id: NodeId, format: TextFormat) {
        let children = self
            .doc
            .node(id)
            .map(|n| n.children().to_vec())
            .unwrap_or_default();
        for child in children {
            self.node(ui, child, format);
        }
    }

    fn text(&self, text: &str, format: TextFormat) -> egui::RichText {
        let size = format
            .heading
            .map_or(self.style.font_size, |level| self.style.heading_size(level));
        let mut rich = egui::RichText::new(text).size(size);
        if format.strong || format.heading.is_some() {
            rich = rich.strong();
        }
        if format.italics {
            rich = rich.italics();
        }
        if format.strike {
            rich = rich.strikethrough();
        }
        if format.monospace {
            rich = rich.monospace();
        }
        rich
    }

    fn node(&mut self, ui: &mut egui::Ui, id: NodeId, format: TextFormat) {
        let Some(node) = self.doc.node(id) else {
            return;
        };
        if node.hides_itself() || node.has_class(OVERLAY_CLASS) {
            return;
        }
        if node.is_text() {
            let text = node.text.clone();
            ui.label(self.text(&text, format));
            return;
        }

        let tag = node.tag.clone();
        let focused = node.has_class(FOCUS_CLASS);
        let interactive = is_interactive(node);
        let disabled = node.attr("disabled").is_some();
        let input_type = node.attr("type").unwrap_or("text").to_ascii_lowercase();
        let placeholder = node.attr("placeholder").unwrap_or_default().to_string();
        let label = self.doc.text_content(id);

        let response = match tag.as_str() {
            "a" => {
                let response = ui.add(egui::Link::new(self.text(&label, format)));
                self.activate_on_click(&response, id)
            }
            "button" => {
                let response = ui.add_enabled(!disabled, egui::Button::new(self.text(&label, format)));
                self.activate_on_click(&response, id)
            }
            "input" => self.input(ui, id, &input_type, &placeholder, disabled),
            "textarea" => {
                let mut value = self.doc.attr(id, "value").unwrap_or_default().to_string();
                let response = ui.add_enabled(
                    !disabled,
                    egui::TextEdit::multiline(&mut value)
                        .hint_text(placeholder)
                        .desired_rows(3),
                );
                if response.changed() {
                    self.doc.set_attr(id, "value", value);
                }
                response
            }
            "select" => {
                let response = ui.add_enabled(!disabled, egui::Button::new(format!("{} ⏷", label.trim())));
                self.activate_on_click(&response, id)
            }
            "hr" => ui.separator(),
            "br" => ui.label(""),
            "img" => {
                let src = self.doc.attr(id, "src").unwrap_or_default().to_string();
                ui.add(egui::Image::new(src).max_width(ui.available_width()))
            }
            "pre" | "code" => {
                let format = TextFormat {
                    monospace: true,
                    ..format
                };
                ui.horizontal_wrapped(|ui| self.children(ui, id, format)).response
            }
            "li" => {
                ui.horizontal_wrapped(|ui| {
                    ui.label("•");
                    self.children(ui, id, format);
                })
                .response
            }
            _ => {
                let format = nested_format(&tag, format);
                let inner = if INLINE_CONTAINERS.contains(&tag.as_str()) {
                    ui.horizontal_wrapped(|ui| self.children(ui, id, format))
                } else {
                    ui.vertical(|ui| self.children(ui, id, format))
                };
                if interactive {
                    let response = inner.response.interact(egui::Sense::click());
                    self.activate_on_click(&response, id)
                } else {
                    inner.response
                }
            }
        };

        if focused {
            ui.painter().rect_stroke(
                response.rect.expand(3.0),
                4.0,
                self.style.highlight,
                egui::StrokeKind::Outside,
            );
        }
        if self.scroll_target == Some(id) {
            if self.style.smooth_scroll {
                response.scroll_to_me(Some(egui::Align::Center));
            } else {
                response.scroll_to_me_animation(
                    Some(egui::Align::Center),
                    egui::style::ScrollAnimation::none(),
                );
            }
        }
        if self.focus_target == Some(id) {
            response.request_focus();
        }
    }

    fn input(
        &mut self,
        ui: &mut egui::Ui,
        id: NodeId,
        input_type: &str,
        placeholder: &str,
        disabled: bool,
    ) -> egui::Response {
        match input_type {
            "checkbox" => {
                let mut checked = self.doc.attr(id, "checked").is_some();
                let response = ui.add_enabled(!disabled, egui::Checkbox::without_text(&mut checked));
                self.activate_on_click(&response, id)
            }
            "radio" => {
                let checked = self.doc.attr(id, "checked").is_some();
                let response = ui.add_enabled(!disabled, egui::RadioButton::new(checked, ""));
                self.activate_on_click(&response, id)
            }
            "button" | "submit" | "reset" => {
                let text = self
                    .doc
                    .attr(id, "value")
                    .unwrap_or(input_type)
                    .to_string();
                let response = ui.add_enabled(!disabled, egui::Button::new(text));
                self.activate_on_click(&response, id)
            }
            _ => {
                let mut value = self.doc.attr(id, "value").unwrap_or_default().to_string();
                let response = ui.add_enabled(
                    !disabled,
                    egui::TextEdit::singleline(&mut value)
                        .hint_text(placeholder)
                        .password(input_type == "password"),
                );
                if response.changed() {
                    self.doc.set_attr(id, "value", value);
                }
                response
            }
        }
    }

    fn activate_on_click(&mut self, response: &egui::Response, id: NodeId) -> egui::Response {
        if response.clicked() {
            self.actions.activate(id);
        }
        response.clone()
    }
}

fn nested_format(tag: &str, format: TextFormat) -> TextFormat {
    let heading = tag
        .strip_prefix('h')
        .and_then(|level| level.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level));
    match tag {
        "strong" | "b" | "th" => TextFormat {
            strong: true,
            ..format
        },
        "em" | "i" => TextFormat {
            italics: true,
            ..format
        },
        "del" | "s" => TextFormat {
            strike: true,
            ..format
        },
        _ if heading.is_some() => TextFormat { heading, ..format },
        _ => format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_format() {
        let base = TextFormat::default();
        assert_eq!(nested_format("h2", base).heading, Some(2));
        assert_eq!(nested_format("h7", base).heading, None);
        assert_eq!(nested_format("hr", base).heading, None);
        assert!(nested_format("strong", base).strong);
        let both = nested_format("em", nested_format("strong", base));
        assert!(both.strong && both.italics);
    }
}
