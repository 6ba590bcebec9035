mod app;
mod config;
mod error;
mod io;
mod layout;
mod message;
mod model;
mod state;
mod style;
mod subscription;
mod view;

use app::OneHand;
use clap::Parser;
use config::Config;
use eframe::egui;
use message::Message;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keyboard-only navigation over interactive page elements
#[derive(Parser, Debug)]
#[command(name = "onehand", version, about)]
struct Args {
    /// Page to open (.toml or .md). Opens the built-in demo when omitted.
    page: Option<PathBuf>,

    /// Configuration file to use instead of the per-user one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with the navigator already on
    #[arg(short, long)]
    enable: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("onehand=info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn main() -> eframe::Result<()> {
    init_tracing();
    let args = Args::parse();

    let (config, config_path) = match args.config {
        Some(path) => (Config::load_or_default(&path), Some(path)),
        None => {
            if let Err(e) = Config::create_default() {
                warn!("could not write default config: {e}");
            }
            (Config::load(), Config::config_path())
        }
    };

    let mut app = OneHand::new(config, config_path, args.page);
    if args.enable {
        app.dispatch(Message::Enable);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_title("One Hand"),
        ..Default::default()
    };

    eframe::run_native(
        "One Hand",
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}
