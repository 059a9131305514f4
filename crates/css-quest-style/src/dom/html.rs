//! HTML import.

use scraper::{Html, Node as HtmlNode};

use crate::dom::{Document, ElementData, NodeData};

impl Document {
    /// Parse an HTML document.
    ///
    /// Parsing follows the HTML5 tree-construction rules, so missing
    /// `html`, `head` and `body` elements are created. Doctypes and
    /// processing instructions are dropped.
    pub fn parse_html(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        for error in &html.errors {
            tracing::debug!("HTML parse error: {}", error);
        }

        let mut document = Document::new();
        let root = document.root();

        let mut stack: Vec<_> = html.tree.root().children().map(|c| (c, root)).collect();
        stack.reverse();

        while let Some((node, parent)) = stack.pop() {
            let data = match node.value() {
                HtmlNode::Element(element) => {
                    let mut data = ElementData::new(element.name());
                    for (name, value) in element.attrs() {
                        data.set_attribute(name, value);
                    }
                    NodeData::Element(data)
                }
                HtmlNode::Text(text) => NodeData::Text((**text).to_string()),
                HtmlNode::Comment(comment) => NodeData::Comment((**comment).to_string()),
                _ => continue,
            };

            let id = document.create_node(data);
            if let Err(e) = document.append_child(parent, id) {
                tracing::warn!("Dropping HTML node: {}", e);
                continue;
            }

            let children: Vec<_> = node.children().collect();
            for child in children.into_iter().rev() {
                stack.push((child, id));
            }
        }

        document
    }
}
