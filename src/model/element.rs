use super::document::NodeId;

/// A handle to an element owned by the document. Nothing about the element
/// is cached; liveness is checked whenever it is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef(NodeId);

impl ElementRef {
    pub fn id(&self) -> NodeId {
        self.0
    }
}

impl From<NodeId> for ElementRef {
    fn from(id: NodeId) -> Self {
        Self(id)
    }
}

/// What activating an element did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    FollowLink(String),
    Toggled { checked: bool },
    Focus,
    Press,
}
