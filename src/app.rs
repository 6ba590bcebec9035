use crate::config::Config;
use crate::error::Result;
use crate::io;
use crate::layout::MESSAGE_TIMEOUT_SECS;
use crate::message::Message;
use crate::model::{Activation, Document, ElementRef, NodeId};
use crate::state::{ActivationRecord, Navigator, Outcome, UIState};
use crate::style::{PageStyle, Theme};
use crate::subscription::{
    poll_keyboard, DomRenderer, EnabledFlag, Keymap, Subscribers, TraceObserver,
};
use chrono::Local;
use eframe::egui;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Work collected while drawing a frame and applied once drawing is done.
#[derive(Default)]
pub struct PageActions {
    pub messages: Vec<Message>,
    pub activations: Vec<NodeId>,
    pub reload: bool,
}

impl PageActions {
    pub fn dispatch(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn activate(&mut self, id: NodeId) {
        self.activations.push(id);
    }
}

pub struct OneHand {
    pub config: Config,
    /// File the config came from and theme changes are written back to.
    pub config_path: Option<PathBuf>,
    pub keymap: Keymap,
    pub style: PageStyle,

    // Hosted page
    pub page_path: Option<PathBuf>,
    pub document: Document,
    /// Bumped on every attach so work queued for an older page can be dropped.
    page_generation: u64,

    // Navigator
    pub navigator: Navigator,
    pub subscribers: Subscribers,
    pub enabled_flag: EnabledFlag,

    // UI State
    pub ui: UIState,
    pub show_help: bool,
}

impl OneHand {
    pub fn new(config: Config, config_path: Option<PathBuf>, page_path: Option<PathBuf>) -> Self {
        let mut ui = UIState::new(Theme::from_name(&config.ui.theme));
        let keymap = Keymap::from_config(&config.keys).unwrap_or_else(|e| {
            warn!("{e}; using default shortcuts");
            ui.set_error(e.to_string());
            Keymap::default()
        });

        let (document, page_path) = match Self::open_page(page_path.as_deref()) {
            Ok(document) => (document, page_path),
            Err(e) => {
                warn!("{e}; showing demo page");
                ui.set_error(e.to_string());
                let demo = io::demo_page().unwrap_or_else(|_| Document::new("Empty page"));
                (demo, None)
            }
        };

        let mut app = Self {
            style: PageStyle::from_config(&config),
            config,
            config_path,
            keymap,
            page_path: None,
            document: Document::new(""),
            page_generation: 0,
            navigator: Navigator::new(),
            subscribers: Subscribers::new(),
            enabled_flag: EnabledFlag::new(),
            ui,
            show_help: false,
        };
        app.attach_document(document, page_path);
        app
    }

    fn open_page(path: Option<&Path>) -> Result<Document> {
        match path {
            Some(path) => io::load_page(path),
            None => io::demo_page(),
        }
    }

    /// Replaces the hosted page. Everything the navigator held belonged to the
    /// old page, so it starts over disabled.
    pub fn attach_document(&mut self, document: Document, page_path: Option<PathBuf>) {
        self.document = document;
        self.page_path = page_path;
        self.page_generation += 1;
        self.navigator = Navigator::new();
        self.subscribers = Subscribers::new();
        self.subscribers.subscribe(DomRenderer::new());
        self.subscribers.subscribe(self.enabled_flag.clone());
        self.subscribers.subscribe(TraceObserver);
        self.subscribers
            .publish(&self.navigator.view(), &mut self.document);
        info!(title = self.document.title(), "page attached");
    }

    pub fn reload(&mut self) {
        match Self::open_page(self.page_path.as_deref()) {
            Ok(document) => {
                let path = self.page_path.take();
                self.attach_document(document, path);
                self.ui.set_info("Page reloaded".to_string());
            }
            Err(e) => {
                warn!("{e}");
                self.ui.set_error(e.to_string());
            }
        }
    }

    /// Flips the theme and persists it to the config file in use.
    pub fn toggle_theme(&mut self) {
        self.ui.theme = self.ui.theme.toggle();
        self.config.ui.theme = self.ui.theme.name().to_string();
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            warn!("could not save theme: {e}");
            self.ui.set_error(e.to_string());
        }
    }

    pub fn dispatch(&mut self, message: Message) {
        match self.navigator.update(message, &mut self.document) {
            Outcome::Changed(view) => self.subscribers.publish(&view, &mut self.document),
            Outcome::Activated(element, activation) => {
                self.handle_activation(element.id(), activation)
            }
            Outcome::Ignored => {}
        }
    }

    /// A direct click on the page, outside the navigator's cursor.
    pub fn activate_node(&mut self, id: NodeId) {
        if let Some(activation) = self.document.activate(ElementRef::from(id)) {
            self.handle_activation(id, activation);
        }
    }

    fn handle_activation(&mut self, id: NodeId, activation: Activation) {
        let tag = self
            .document
            .node(id)
            .map(|n| n.tag.clone())
            .unwrap_or_default();
        let text = self.document.text_content(id).trim().to_string();
        let outcome = match &activation {
            Activation::FollowLink(href) => format!("→ {href}"),
            Activation::Toggled { checked: true } => "checked".to_string(),
            Activation::Toggled { checked: false } => "unchecked".to_string(),
            Activation::Focus => "focused".to_string(),
            Activation::Press => "pressed".to_string(),
        };
        self.ui.record(ActivationRecord {
            at: Local::now(),
            tag,
            text,
            outcome,
        });

        if let Activation::FollowLink(href) = activation {
            self.follow_link(&href);
        }
    }

    fn follow_link(&mut self, href: &str) {
        if let Some(fragment) = href.strip_prefix('#') {
            match self.document.find_by_id(fragment) {
                Some(target) => self.document.request_scroll(target),
                None => self.ui.set_error(format!("No element with id {fragment:?}")),
            }
            return;
        }

        if let Some(path) = self.local_page(href) {
            match io::load_page(&path) {
                Ok(document) => self.attach_document(document, Some(path)),
                Err(e) => {
                    warn!("{e}");
                    self.ui.set_error(e.to_string());
                }
            }
            return;
        }

        info!(href, "opening externally");
        if let Err(e) = open::that(href) {
            self.ui.set_error(format!("Could not open {href}: {e}"));
        }
    }

    /// Relative links to `.toml` / `.md` files resolve next to the current page.
    fn local_page(&self, href: &str) -> Option<PathBuf> {
        local_page_target(self.page_path.as_deref(), href)
    }

    fn apply(&mut self, actions: PageActions) {
        let generation = self.page_generation;
        for message in actions.messages {
            self.dispatch(message);
        }
        for id in actions.activations {
            // Node ids were taken from a page that has since been replaced.
            if self.page_generation != generation {
                break;
            }
            self.activate_node(id);
        }
        if actions.reload {
            self.reload();
        }
    }
}

fn local_page_target(current: Option<&Path>, href: &str) -> Option<PathBuf> {
    if href.contains("://") || href.starts_with("mailto:") {
        return None;
    }
    let relative = href.split('#').next().unwrap_or(href);
    let extension = Path::new(relative)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())?;
    if !matches!(extension.as_str(), "toml" | "md" | "markdown") {
        return None;
    }
    let base = current.and_then(Path::parent).unwrap_or(Path::new("."));
    Some(base.join(relative))
}

impl eframe::App for OneHand {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.ui.theme.visuals());

        for message in poll_keyboard(ctx, &self.keymap, self.navigator.is_enabled()) {
            self.dispatch(message);
        }
        self.ui.clear_expired_messages(MESSAGE_TIMEOUT_SECS);

        let mut actions = PageActions::default();
        self.render_top_bar(ctx, &mut actions);
        self.render_status_bar(ctx);
        self.render_log_panel(ctx);
        self.render_page(ctx, &mut actions);
        self.render_overlay(ctx, &mut actions);
        self.render_help_modal(ctx);

        self.apply(actions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FOCUS_CLASS, OVERLAY_CLASS};
    use std::fs;

    fn app_with(page: &str, name: &str) -> (OneHand, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(name);
        fs::write(&path, page).expect("write page");
        (OneHand::new(Config::default(), None, Some(path)), dir)
    }

    const SCENARIO: &str = r#"
        [[node]]
        tag = "a"
        text = "Link A"
        attrs = { href = "other.md" }

        [[node]]
        tag = "button"
        text = "Button B"

        [[node]]
        tag = "div"
        text = "Div C"

        [[node]]
        tag = "input"
        attrs = { type = "checkbox" }
    "#;

    #[test]
    fn test_local_page_target() {
        let current = Path::new("/pages/index.toml");
        assert_eq!(
            local_page_target(Some(current), "next.md#top"),
            Some(PathBuf::from("/pages/next.md"))
        );
        assert_eq!(local_page_target(Some(current), "https://x.org/a.md"), None);
        assert_eq!(local_page_target(Some(current), "image.png"), None);
        assert_eq!(
            local_page_target(None, "a.toml"),
            Some(PathBuf::from("./a.toml"))
        );
    }

    #[test]
    fn test_dispatch_drives_flag_and_document() {
        let (mut app, _dir) = app_with(SCENARIO, "index.toml");
        assert!(!app.enabled_flag.get());

        app.dispatch(Message::Toggle);
        assert!(app.enabled_flag.get());
        assert_eq!(app.navigator.view().label(), "1 / 3");
        assert_eq!(app.document.nodes_with_class(FOCUS_CLASS).len(), 1);

        app.dispatch(Message::Move(2));
        app.dispatch(Message::ClickCurrent);
        let record = app.ui.activation_log.front().expect("logged");
        assert_eq!(record.tag, "input");
        assert_eq!(record.outcome, "checked");

        app.dispatch(Message::Disable);
        assert!(!app.enabled_flag.get());
        assert!(app.document.nodes_with_class(FOCUS_CLASS).is_empty());
    }

    #[test]
    fn test_following_local_link_resets_navigator() {
        let (mut app, dir) = app_with(SCENARIO, "index.toml");
        fs::write(dir.path().join("other.md"), "# Other\n\n[back](index.toml)\n")
            .expect("write other");

        app.dispatch(Message::Enable);
        app.dispatch(Message::ClickCurrent);

        assert_eq!(app.document.title(), "Other");
        assert!(!app.navigator.is_enabled());
        assert!(!app.enabled_flag.get());
        assert!(app
            .document
            .nodes_with_class(OVERLAY_CLASS)
            .into_iter()
            .all(|id| !app.document.is_connected(id)));
    }

    #[test]
    fn test_fragment_link_requests_scroll() {
        let page = r##"
            [[node]]
            tag = "a"
            text = "down"
            attrs = { href = "#end" }

            [[node]]
            tag = "p"
            text = "end"
            attrs = { id = "end" }
        "##;
        let (mut app, _dir) = app_with(page, "frag.toml");
        let link = app.document.find_by_id("end").expect("target");
        app.dispatch(Message::Enable);
        app.document.take_scroll_request();
        app.dispatch(Message::ClickCurrent);
        assert_eq!(app.document.take_scroll_request(), Some(link));
    }

    #[test]
    fn test_missing_page_falls_back_with_error() {
        let app = OneHand::new(
            Config::default(),
            None,
            Some(PathBuf::from("/no/such/page.toml")),
        );
        assert!(app.ui.error_message.is_some());
        assert!(app.page_path.is_none());
    }

    #[test]
    fn test_bad_shortcut_config_uses_default_keymap() {
        let mut config = Config::default();
        config.keys.toggle = "Hyper+O".to_string();
        let app = OneHand::new(config, None, None);
        assert_eq!(app.keymap, Keymap::default());
        assert!(app.ui.error_message.is_some());
    }

    #[test]
    fn test_theme_saved_only_to_active_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let active = dir.path().join("custom.toml");
        let other = dir.path().join("config.toml");
        let mut config = Config::default();
        config.ui.font_size = 20.0;
        config.save_to(&active).expect("write active");
        Config::default().save_to(&other).expect("write other");
        let other_before = fs::read_to_string(&other).expect("read other");

        let config = Config::load_from(&active).expect("load active");
        let mut app = OneHand::new(config, Some(active.clone()), None);
        app.toggle_theme();

        let saved = Config::load_from(&active).expect("reload active");
        assert_eq!(saved.ui.theme, "light");
        assert_eq!(saved.ui.font_size, 20.0);
        assert_eq!(fs::read_to_string(&other).expect("read other"), other_before);
    }

    #[test]
    fn test_theme_toggle_without_config_file_stays_in_memory() {
        let mut app = OneHand::new(Config::default(), None, None);
        app.toggle_theme();
        assert_eq!(app.ui.theme, Theme::Light);
        assert_eq!(app.config.ui.theme, "light");
        assert!(app.ui.error_message.is_none());
    }

    #[test]
    fn test_clicks_queued_for_replaced_page_are_dropped() {
        let (mut app, dir) = app_with(SCENARIO, "index.toml");
        fs::write(dir.path().join("other.md"), "# Other\n\n- [ ] task\n").expect("write other");
        let checkbox = app.document.traverse(app.document.body()).find(|id| {
            app.document.attr(*id, "type") == Some("checkbox")
        });

        let mut actions = PageActions::default();
        actions.dispatch(Message::Enable);
        actions.dispatch(Message::ClickCurrent);
        actions.activate(checkbox.expect("checkbox"));
        app.apply(actions);

        assert_eq!(app.document.title(), "Other");
        assert_eq!(app.ui.activation_log.len(), 1);
        assert_eq!(app.ui.activation_log[0].tag, "a");
    }
}
