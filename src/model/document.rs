// Document model - the hosted page the navigator runs on top of
// Arena-backed node tree; the document owns every node, callers hold NodeIds.

use super::element::{Activation, ElementRef};
use std::collections::{BTreeMap, BTreeSet};

pub const TEXT_TAG: &str = "#text";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
pub struct Node {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    /// Only set on `#text` nodes.
    pub text: String,
    classes: BTreeSet<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            text: String::new(),
            classes: BTreeSet::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// True when this node alone would produce no layout box.
    pub fn hides_itself(&self) -> bool {
        if self.attrs.contains_key("hidden") {
            return true;
        }
        self.attr("style").is_some_and(|style| {
            style.split(';').any(|decl| {
                let mut parts = decl.splitn(2, ':');
                let prop = parts.next().unwrap_or("").trim();
                let value = parts.next().unwrap_or("").trim();
                prop.eq_ignore_ascii_case("display") && value.eq_ignore_ascii_case("none")
            })
        })
    }
}

pub struct Document {
    title: String,
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    scroll_request: Option<NodeId>,
    focus_request: Option<NodeId>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        let mut doc = Self {
            title: title.into(),
            nodes: vec![Node::new("html")],
            root: NodeId(0),
            body: NodeId(0),
            scroll_request: None,
            focus_request: None,
        };
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc.body = body;
        doc
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        let id = self.create_element(TEXT_TAG);
        self.nodes[id.0].text = text.into();
        id
    }

    /// Moves `child` under `parent`, detaching it from any previous parent.
    /// Appending a node under its own subtree is refused.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        if self.is_inclusive_ancestor(child, parent) {
            return;
        }
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.node(node).and_then(Node::parent);
        }
        false
    }

    /// Detaches a node (and its subtree) from the tree. The node stays in the
    /// arena, so stale handles still resolve but are no longer connected.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).and_then(Node::parent) else {
            return;
        };
        self.nodes[parent.0].children.retain(|c| *c != id);
        self.nodes[id.0].parent = None;
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.attrs.insert(name.to_ascii_lowercase(), value.into());
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attrs.remove(name);
        }
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.remove(class);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_class(class))
    }

    /// Every node in the arena carrying `class`, connected or not.
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.has_class(class))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root {
                return true;
            }
            current = self.node(node_id).and_then(Node::parent);
        }
        false
    }

    /// Connected and not hidden by itself or any ancestor.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.node(node_id) else {
                return false;
            };
            if node.hides_itself() {
                return false;
            }
            if node_id == self.root {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Depth-first, document order, starting at (and including) `from`.
    pub fn traverse(&self, from: NodeId) -> Traverse<'_> {
        Traverse {
            doc: self,
            stack: vec![from],
        }
    }

    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.traverse(self.root)
            .find(|id| self.attr(*id, "id") == Some(element_id))
    }

    /// Concatenated text of every `#text` descendant.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node_id in self.traverse(id) {
            if let Some(node) = self.node(node_id) {
                if node.is_text() {
                    out.push_str(&node.text);
                }
            }
        }
        out
    }

    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let Some(node) = self.node(id) else {
            return;
        };
        for child in node.children.clone() {
            self.remove(child);
        }
        let text_node = self.create_text(text);
        self.append_child(id, text_node);
    }

    pub fn request_scroll(&mut self, id: NodeId) {
        self.scroll_request = Some(id);
    }

    pub fn take_scroll_request(&mut self) -> Option<NodeId> {
        self.scroll_request.take()
    }

    pub fn request_focus(&mut self, id: NodeId) {
        self.focus_request = Some(id);
    }

    pub fn take_focus_request(&mut self) -> Option<NodeId> {
        self.focus_request.take()
    }

    /// Runs the element's activation behaviour, the equivalent of `click()`.
    /// Detached or disabled elements do nothing.
    pub fn activate(&mut self, element: ElementRef) -> Option<Activation> {
        let id = element.id();
        if !self.is_connected(id) {
            return None;
        }
        let node = self.node(id)?;
        if node.attrs.contains_key("disabled") {
            return None;
        }

        let tag = node.tag.clone();
        let input_type = node
            .attr("type")
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match (tag.as_str(), input_type.as_str()) {
            ("a", _) => match node.attr("href") {
                Some(href) => Some(Activation::FollowLink(href.to_string())),
                None => Some(Activation::Press),
            },
            ("input", "checkbox") => {
                let checked = !node.attrs.contains_key("checked");
                if checked {
                    self.set_attr(id, "checked", "");
                } else {
                    self.remove_attr(id, "checked");
                }
                Some(Activation::Toggled { checked })
            }
            ("input", "radio") => {
                if let Some(group) = node.attr("name").map(str::to_string) {
                    let peers: Vec<NodeId> = self
                        .traverse(self.root)
                        .filter(|peer| {
                            self.attr(*peer, "type")
                                .is_some_and(|t| t.eq_ignore_ascii_case("radio"))
                                && self.attr(*peer, "name") == Some(group.as_str())
                        })
                        .collect();
                    for peer in peers {
                        self.remove_attr(peer, "checked");
                    }
                }
                self.set_attr(id, "checked", "");
                Some(Activation::Toggled { checked: true })
            }
            ("input", "button" | "submit" | "reset") => Some(Activation::Press),
            ("input" | "textarea" | "select", _) => {
                self.request_focus(id);
                Some(Activation::Focus)
            }
            _ => Some(Activation::Press),
        }
    }
}

pub struct Traverse<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Traverse<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some(node) = self.doc.node(id) {
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(id)
    }
}
