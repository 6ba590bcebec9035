mod document;
mod element;

pub use document::{Document, Node, NodeId, TEXT_TAG};
pub use element::{Activation, ElementRef};
