// Observers - subscribers that react to navigator state changes
// The document renderer owns every DOM side effect of a transition.

use crate::layout::{
    CLICK_LABEL, ENABLED_FLAG_NAME, EXIT_LABEL, FOCUS_CLASS, LABEL_CLASS, NEXT_LABEL,
    OVERLAY_CLASS, PREV_LABEL,
};
use crate::model::{Document, NodeId};
use crate::state::NavigatorView;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

/// Attribute on overlay buttons naming the command they stand for.
pub const COMMAND_ATTR: &str = "data-command";

pub trait Observer {
    fn notify(&mut self, view: &NavigatorView, doc: &mut Document);
}

#[derive(Default)]
pub struct Subscribers {
    observers: Vec<Box<dyn Observer>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn publish(&mut self, view: &NavigatorView, doc: &mut Document) {
        for observer in &mut self.observers {
            observer.notify(view, doc);
        }
    }
}

struct OverlayNodes {
    root: NodeId,
    label: NodeId,
}

/// Applies the highlight marker, requests scrolling and keeps the overlay
/// subtree in the document while the navigator is enabled.
#[derive(Default)]
pub struct DomRenderer {
    overlay: Option<OverlayNodes>,
}

impl DomRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay_root(&self) -> Option<NodeId> {
        self.overlay.as_ref().map(|o| o.root)
    }

    fn ensure_overlay(&mut self, doc: &mut Document) -> NodeId {
        if let Some(overlay) = &self.overlay {
            return overlay.label;
        }

        let root = doc.create_element("div");
        doc.add_class(root, OVERLAY_CLASS);
        for (command, text) in [
            ("prev", PREV_LABEL),
            ("next", NEXT_LABEL),
            ("click", CLICK_LABEL),
            ("exit", EXIT_LABEL),
        ] {
            let button = doc.create_element("button");
            doc.set_attr(button, COMMAND_ATTR, command);
            doc.set_text_content(button, text);
            doc.append_child(root, button);
        }
        let label = doc.create_element("div");
        doc.add_class(label, LABEL_CLASS);
        doc.set_text_content(label, "0 / 0");
        doc.append_child(root, label);

        let document_root = doc.root();
        doc.append_child(document_root, root);
        debug!("overlay attached");
        self.overlay = Some(OverlayNodes { root, label });
        label
    }

    fn remove_overlay(&mut self, doc: &mut Document) {
        if let Some(overlay) = self.overlay.take() {
            doc.remove(overlay.root);
            debug!("overlay removed");
        }
    }
}

impl Observer for DomRenderer {
    fn notify(&mut self, view: &NavigatorView, doc: &mut Document) {
        for id in doc.nodes_with_class(FOCUS_CLASS) {
            doc.remove_class(id, FOCUS_CLASS);
        }

        if !view.enabled {
            self.remove_overlay(doc);
            return;
        }

        let label = self.ensure_overlay(doc);
        doc.set_text_content(label, &view.label());

        if let Some(element) = view.highlighted {
            doc.add_class(element.id(), FOCUS_CLASS);
            if view.scroll {
                doc.request_scroll(element.id());
            }
        }
    }
}

/// Read-only view of whether the navigator is on, for anything outside the
/// navigator that wants to know. Clones share the same value.
#[derive(Clone, Debug, Default)]
pub struct EnabledFlag(Rc<Cell<bool>>);

impl EnabledFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn name(&self) -> &'static str {
        ENABLED_FLAG_NAME
    }
}

impl Observer for EnabledFlag {
    fn notify(&mut self, view: &NavigatorView, _doc: &mut Document) {
        self.0.set(view.enabled);
    }
}

/// Logs every published view.
pub struct TraceObserver;

impl Observer for TraceObserver {
    fn notify(&mut self, view: &NavigatorView, doc: &mut Document) {
        let Some(element) = view.highlighted else {
            info!(enabled = view.enabled, label = %view.label(), "navigator state");
            return;
        };
        let tag = doc.node(element.id()).map(|n| n.tag.clone()).unwrap_or_default();
        let text = doc.text_content(element.id());
        info!(
            enabled = view.enabled,
            label = %view.label(),
            tag = %tag,
            text = %text.trim(),
            "navigator state"
        );
    }
}
