//! Arena-backed document tree.

use std::fmt;

use slotmap::{SlotMap, new_key_type};

use crate::selector::ElementTree;
use crate::{Error, Result};

new_key_type! {
    /// A stable handle to a node in a [`Document`].
    ///
    /// Handles stay valid for the lifetime of the document; nodes are never
    /// removed once inserted.
    pub struct NodeId;
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use slotmap::Key;
        write!(f, "#{}", self.data().as_ffi())
    }
}

/// An element's name and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase local name.
    pub name: String,
    /// Attributes in source order; names are lowercase.
    pub attributes: Vec<(String, String)>,
}

impl ElementData {
    /// Create an element with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    /// Value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_ascii_lowercase(), value)),
        }
    }

    /// Iterate over the class list.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Check the class list.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let mut list: Vec<&str> = self.classes().collect();
        list.push(class);
        let joined = list.join(" ");
        self.set_attribute("class", joined);
        true
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let joined = self
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            self.attributes.retain(|(n, _)| n != "class");
        } else {
            self.set_attribute("class", joined);
        }
        true
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document node (tree root).
    Document,
    /// An element.
    Element(ElementData),
    /// A text node.
    Text(String),
    /// A comment.
    Comment(String),
}

/// A node and its links.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node payload.
    pub data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// The element data, if this is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Parent node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// An HTML document stored in a slot map.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl Document {
    /// Create a document containing only the document node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            data: NodeData::Document,
            parent: None,
            children: Vec::new(),
        });
        Self { nodes, root }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The first element child of the document node (usually `html`).
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(self.root).next()
    }

    /// Get a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get an element's data.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match self.nodes.get_mut(id).map(|n| &mut n.data) {
            Some(NodeData::Element(element)) => Ok(element),
            _ => Err(Error::UnknownNode(id.to_string())),
        }
    }

    /// Check if a handle refers to an element of this document.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Number of nodes, including the document node.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the document holds only the document node.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Insert a detached node.
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        self.nodes.insert(Node {
            data,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Insert a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.create_node(NodeData::Element(ElementData::new(name)))
    }

    /// Insert a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.create_node(NodeData::Text(text.into()))
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::UnknownNode(parent.to_string()));
        }
        let node = self
            .nodes
            .get_mut(child)
            .ok_or_else(|| Error::UnknownNode(child.to_string()))?;
        if node.parent.is_some() || child == self.root || child == parent {
            return Err(Error::UnknownNode(child.to_string()));
        }
        node.parent = Some(parent);
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.push(child);
        }
        Ok(())
    }

    /// Set or replace an attribute on an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> Result<()> {
        self.element_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    /// Add a class to an element. Returns false if it was already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        Ok(self.element_mut(id)?.add_class(class))
    }

    /// Remove a class from an element. Returns false if it was not present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        Ok(self.element_mut(id)?.remove_class(class))
    }

    /// Parent element of a node.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.nodes
            .get(id)?
            .parent
            .filter(|p| self.is_element(*p))
    }

    /// Element children of a node, in order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
    }

    /// Every element in document order (pre-order, depth first).
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.as_element().is_some() {
                out.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Find the first element with the given local name.
    pub fn find_element(&self, name: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|id| self.element(*id).is_some_and(|e| e.name.eq_ignore_ascii_case(name)))
    }

    /// Concatenated text of a node's descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if let NodeData::Text(t) = &node.data {
                text.push_str(t);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        text
    }

    fn sibling_element(&self, id: NodeId, forward: bool) -> Option<NodeId> {
        let parent = self.nodes.get(id)?.parent?;
        let siblings = &self.nodes.get(parent)?.children;
        let position = siblings.iter().position(|s| *s == id)?;
        if forward {
            siblings[position + 1..].iter().copied().find(|s| self.is_element(*s))
        } else {
            siblings[..position].iter().rev().copied().find(|s| self.is_element(*s))
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree for Document {
    type Element = NodeId;

    fn parent_element(&self, element: NodeId) -> Option<NodeId> {
        Document::parent_element(self, element)
    }

    fn prev_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        self.sibling_element(element, false)
    }

    fn next_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        self.sibling_element(element, true)
    }

    fn local_name(&self, element: NodeId) -> &str {
        self.element(element).map_or("", |e| e.name.as_str())
    }

    fn element_id(&self, element: NodeId) -> Option<&str> {
        self.element(element)?.attribute("id")
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.element(element).is_some_and(|e| e.has_class(class))
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.element(element)?.attribute(name)
    }

    fn is_empty(&self, element: NodeId) -> bool {
        let Some(node) = self.nodes.get(element) else {
            return true;
        };
        node.children.iter().all(|child| match self.nodes.get(*child).map(|n| &n.data) {
            Some(NodeData::Element(_)) => false,
            Some(NodeData::Text(t)) => t.is_empty(),
            _ => true,
        })
    }

    fn is_root(&self, element: NodeId) -> bool {
        self.nodes.get(element).and_then(|n| n.parent) == Some(self.root)
    }
}
