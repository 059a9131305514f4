//! Document tree and HTML import.

mod document;
mod html;

pub use document::{Document, ElementData, Node, NodeData, NodeId};
