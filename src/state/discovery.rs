// Discovery - finds the elements the navigator can move between
// Tag/role/tabindex heuristic, filtered to rendered nodes, in document order.

use crate::layout::OVERLAY_CLASS;
use crate::model::{Document, ElementRef, Node, NodeId};

const INTERACTIVE_TAGS: [&str; 5] = ["a", "button", "input", "select", "textarea"];
const INTERACTIVE_ROLES: [&str; 2] = ["button", "link"];

pub fn is_interactive(node: &Node) -> bool {
    if INTERACTIVE_TAGS.contains(&node.tag.as_str()) {
        return true;
    }
    if node
        .attr("role")
        .is_some_and(|role| INTERACTIVE_ROLES.contains(&role))
    {
        return true;
    }
    node.attr("tabindex").is_some_and(|index| index != "-1")
}

pub fn collect_interactive(doc: &Document) -> Vec<ElementRef> {
    doc.traverse(doc.root())
        .filter(|id| {
            doc.node(*id).is_some_and(is_interactive)
                && doc.is_rendered(*id)
                && !inside_overlay(doc, *id)
        })
        .map(ElementRef::from)
        .collect()
}

fn inside_overlay(doc: &Document, id: NodeId) -> bool {
    let mut current = Some(id);
    while let Some(node_id) = current {
        if doc.has_class(node_id, OVERLAY_CLASS) {
            return true;
        }
        current = doc.node(node_id).and_then(Node::parent);
    }
    false
}
