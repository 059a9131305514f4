//! The rendered challenge: a document plus its stylesheets.

use std::path::Path;
use std::sync::Arc;

use crate::dom::{Document, NodeId};
use crate::parser::parse_selector_list;
use crate::resolve::StyleEngine;
use crate::rules::{StylePriority, StyleSheet};
use crate::selector::SelectorMatcher;
use crate::style::ComputedStyle;
use crate::Result;

/// A rendered document with the user-agent, arena and learner stylesheets.
///
/// Computed values are resolved lazily and cached until a stylesheet or a
/// class list changes.
///
/// # Example
///
/// ```
/// use css_quest_style::prelude::*;
///
/// let mut arena = Arena::from_markup("<div class='box'></div><div class='item'></div>");
/// arena.replace_stylesheet(StylePriority::Learner, ".box { background-color: #adff2f }");
///
/// let boxes = arena.query_selector_all(".box").unwrap();
/// assert_eq!(boxes.len(), 1);
/// assert_eq!(
///     arena.computed_value(boxes[0], "background-color").unwrap(),
///     "rgb(173, 255, 47)"
/// );
/// ```
pub struct Arena {
    document: Document,
    engine: StyleEngine,
}

impl Arena {
    /// Render HTML markup with the built-in user-agent stylesheet.
    pub fn from_markup(markup: &str) -> Self {
        Self::with_document(Document::parse_html(markup))
    }

    /// Wrap an existing document.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            engine: StyleEngine::with_user_agent(),
        }
    }

    /// The document tree.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The style engine.
    pub fn engine(&self) -> &StyleEngine {
        &self.engine
    }

    /// Set the size of the `medium` font-size keyword.
    pub fn set_base_font_size(&mut self, size: f32) {
        self.engine.set_base_font_size(size);
    }

    /// Replace the stylesheet of a priority with new CSS text.
    pub fn replace_stylesheet(&mut self, priority: StylePriority, css: &str) {
        tracing::debug!("Replacing {:?} stylesheet ({} bytes)", priority, css.len());
        self.engine.replace_stylesheet(StyleSheet::from_css(css, priority));
    }

    /// Replace the stylesheet of a priority with the contents of a file.
    pub fn load_stylesheet(&mut self, priority: StylePriority, path: impl AsRef<Path>) -> Result<()> {
        let sheet = StyleSheet::from_file(path, priority)?;
        self.engine.replace_stylesheet(sheet);
        Ok(())
    }

    /// Reserve a class that no stylesheet rule may target.
    pub fn reserve_class(&mut self, class: impl Into<String>) {
        self.engine.reserve_class(class);
    }

    /// All elements matching a selector list, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let list = parse_selector_list(selector)?;
        Ok(self
            .document
            .elements()
            .into_iter()
            .filter(|element| SelectorMatcher::matches_list(&list, &self.document, *element))
            .collect())
    }

    /// The first element matching a selector list.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Every element in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.document.elements()
    }

    /// Computed style of an element.
    pub fn computed_style(&self, node: NodeId) -> Result<Arc<ComputedStyle>> {
        self.engine.compute_style(&self.document, node)
    }

    /// Serialized computed value of a property, like `getPropertyValue`.
    ///
    /// Unknown properties yield the empty string.
    pub fn computed_value(&self, node: NodeId, property: &str) -> Result<String> {
        Ok(self.computed_style(node)?.property_value(property))
    }

    /// Add a class to an element. Returns false if it was already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<bool> {
        let added = self.document.add_class(node, class)?;
        if added {
            self.engine.invalidate_all();
        }
        Ok(added)
    }

    /// Remove a class from an element. Returns false if it was not present.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<bool> {
        let removed = self.document.remove_class(node, class)?;
        if removed {
            self.engine.invalidate_all();
        }
        Ok(removed)
    }

    /// Check an element's class list.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.document.element(node).is_some_and(|e| e.has_class(class))
    }

    /// Set an attribute on an element.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.document.set_attribute(node, name, value)?;
        self.engine.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const MARKUP: &str = r#"
        <div class="challenge-arena-container">
            <div class="box"></div>
            <div class="box special"></div>
            <div class="item" style="padding: 3px"></div>
        </div>"#;

    #[test]
    fn query_in_document_order() {
        let arena = Arena::from_markup(MARKUP);
        let boxes = arena.query_selector_all(".box").unwrap();
        let all = arena.query_selector_all(".challenge-arena-container > *").unwrap();

        assert_eq!(boxes.len(), 2);
        assert_eq!(all.len(), 3);
        assert_eq!(&all[..2], &boxes[..]);
        assert!(arena.query_selector_all(".nonexistent").unwrap().is_empty());
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let arena = Arena::from_markup(MARKUP);
        let err = arena.query_selector_all("div[").unwrap_err();
        assert!(err.is_invalid_selector());
    }

    #[test]
    fn learner_sheet_overrides_arena_sheet() {
        let mut arena = Arena::from_markup(MARKUP);
        arena.replace_stylesheet(StylePriority::Arena, ".box { width: 50px; height: 50px }");
        arena.replace_stylesheet(StylePriority::Learner, ".box { width: 80px }");
        let first = arena.query_selector(".box").unwrap().unwrap();

        assert_eq!(arena.computed_value(first, "width").unwrap(), "80px");
        assert_eq!(arena.computed_value(first, "height").unwrap(), "50px");
    }

    #[test]
    fn inline_style_is_applied() {
        let arena = Arena::from_markup(MARKUP);
        let item = arena.query_selector(".item").unwrap().unwrap();

        assert_eq!(arena.computed_value(item, "padding").unwrap(), "3px");
        assert_eq!(arena.computed_value(item, "padding-left").unwrap(), "3px");
    }

    #[test]
    fn unknown_property_is_empty() {
        let arena = Arena::from_markup(MARKUP);
        let item = arena.query_selector(".item").unwrap().unwrap();

        assert_eq!(arena.computed_value(item, "made-up-property").unwrap(), "");
    }

    #[test]
    fn class_toggling_invalidates_cache() {
        let mut arena = Arena::from_markup(MARKUP);
        arena.replace_stylesheet(StylePriority::Learner, ".on { color: red }");
        let item = arena.query_selector(".item").unwrap().unwrap();
        assert_eq!(arena.computed_value(item, "color").unwrap(), "rgb(0, 0, 0)");

        assert!(arena.add_class(item, "on").unwrap());
        assert_eq!(arena.computed_value(item, "color").unwrap(), "rgb(255, 0, 0)");

        assert!(arena.remove_class(item, "on").unwrap());
        assert_eq!(arena.computed_value(item, "color").unwrap(), "rgb(0, 0, 0)");
    }

    #[test]
    fn reserved_class_cannot_be_styled() {
        let mut arena = Arena::from_markup(MARKUP);
        arena.reserve_class("marker");
        arena.replace_stylesheet(StylePriority::Learner, ".marker { color: red } .box { color: blue }");
        let first = arena.query_selector(".box").unwrap().unwrap();

        let before = arena.computed_value(first, "color").unwrap();
        arena.add_class(first, "marker").unwrap();
        let during = arena.computed_value(first, "color").unwrap();
        arena.remove_class(first, "marker").unwrap();

        assert_eq!(before, "rgb(0, 0, 255)");
        assert_eq!(during, before);
        assert!(!arena.has_class(first, "marker"));
    }

    #[test]
    fn missing_stylesheet_file() {
        let mut arena = Arena::from_markup(MARKUP);
        let result = arena.load_stylesheet(StylePriority::Learner, "/no/such/sheet.css");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
