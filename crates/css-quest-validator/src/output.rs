//! The seam between the validation engine and whatever renders challenges.

use std::fmt;

use css_quest_style::arena::Arena;
use css_quest_style::dom::NodeId;

/// Errors reported by a rendered output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The selector does not parse.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// The element handle does not belong to this output.
    #[error("Unknown element {0}")]
    UnknownElement(String),

    /// The renderer could not answer.
    #[error("{0}")]
    Unavailable(String),
}

/// A rendered challenge the engine can query.
///
/// The engine only reads computed values and toggles the marker class; it
/// never edits stylesheets.
pub trait RenderedOutput {
    /// Handle to an element.
    type Element: Copy + Eq + fmt::Debug;

    /// Elements matching a selector list, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, RenderError>;

    /// Every element, in document order.
    fn elements(&self) -> Result<Vec<Self::Element>, RenderError>;

    /// Serialized computed value of a property; empty for unknown properties.
    fn computed_value(&self, element: Self::Element, property: &str) -> Result<String, RenderError>;

    /// Add a class. Returns false if the element already had it.
    fn add_class(&mut self, element: Self::Element, class: &str) -> Result<bool, RenderError>;

    /// Remove a class. Returns false if the element did not have it.
    fn remove_class(&mut self, element: Self::Element, class: &str) -> Result<bool, RenderError>;

    /// Check an element's class list.
    fn has_class(&self, element: Self::Element, class: &str) -> bool;
}

impl From<css_quest_style::Error> for RenderError {
    fn from(error: css_quest_style::Error) -> Self {
        match error {
            css_quest_style::Error::InvalidSelector { selector, message } => {
                RenderError::InvalidSelector { selector, message }
            }
            css_quest_style::Error::UnknownNode(node) => RenderError::UnknownElement(node),
            other => RenderError::Unavailable(other.to_string()),
        }
    }
}

impl RenderedOutput for Arena {
    type Element = NodeId;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, RenderError> {
        Ok(Arena::query_selector_all(self, selector)?)
    }

    fn elements(&self) -> Result<Vec<NodeId>, RenderError> {
        Ok(Arena::elements(self))
    }

    fn computed_value(&self, element: NodeId, property: &str) -> Result<String, RenderError> {
        Ok(Arena::computed_value(self, element, property)?)
    }

    fn add_class(&mut self, element: NodeId, class: &str) -> Result<bool, RenderError> {
        Ok(Arena::add_class(self, element, class)?)
    }

    fn remove_class(&mut self, element: NodeId, class: &str) -> Result<bool, RenderError> {
        Ok(Arena::remove_class(self, element, class)?)
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        Arena::has_class(self, element, class)
    }
}
