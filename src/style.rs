use crate::config::Config;
use eframe::egui;
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            other => {
                warn!(theme = other, "unknown theme, using dark");
                Theme::Dark
            }
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn visuals(&self) -> egui::Visuals {
        match self {
            Self::Light => egui::Visuals::light(),
            Self::Dark => egui::Visuals::dark(),
        }
    }
}

/// Colors and sizes the page renderer needs, resolved once from config.
#[derive(Clone, Copy, Debug)]
pub struct PageStyle {
    pub highlight: egui::Stroke,
    pub font_size: f32,
    pub smooth_scroll: bool,
}

impl PageStyle {
    pub fn from_config(config: &Config) -> Self {
        let [r, g, b] = config.highlight.rgb().unwrap_or_else(|e| {
            warn!("{e}; using default highlight color");
            [0xff, 0xb0, 0x20]
        });
        Self {
            highlight: egui::Stroke::new(
                config.highlight.width.max(1.0),
                egui::Color32::from_rgb(r, g, b),
            ),
            font_size: config.ui.font_size,
            smooth_scroll: config.ui.smooth_scroll,
        }
    }

    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1 => self.font_size * 1.7,
            2 => self.font_size * 1.4,
            3 => self.font_size * 1.2,
            _ => self.font_size * 1.05,
        }
    }
}
