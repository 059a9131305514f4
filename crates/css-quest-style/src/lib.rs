//! Browser-free HTML rendering for CSS Quest challenges.
//!
//! This crate renders challenge markup into a document tree and resolves
//! computed styles the way a browser would report them:
//!
//! - **Selectors**: Type, class, ID, attribute, pseudo-class, and combinator selectors
//! - **Cascading**: Importance, origin, specificity and source order
//! - **CSS Parsing**: Per-rule error recovery; unsupported properties are dropped
//! - **Computed values**: Inheritance, shorthand expansion, canonical serialization
//!
//! # Example
//!
//! ```
//! use css_quest_style::prelude::*;
//!
//! let mut arena = Arena::from_markup("<ul><li>one</li><li class='on'>two</li></ul>");
//! arena.replace_stylesheet(StylePriority::Learner, "li:last-child { margin: 4px 8px }");
//!
//! let last = arena.query_selector("li.on").unwrap().unwrap();
//! assert_eq!(arena.computed_value(last, "margin").unwrap(), "4px 8px");
//! assert_eq!(arena.computed_value(last, "margin-left").unwrap(), "8px");
//! ```

pub mod arena;
pub mod dom;
pub mod parser;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod style;
pub mod types;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::arena::Arena;
    pub use crate::dom::{Document, NodeId};
    pub use crate::resolve::StyleEngine;
    pub use crate::rules::{StylePriority, StyleRule, StyleSheet};
    pub use crate::selector::{Combinator, PseudoClass, Selector, SelectorList, SelectorPart, Specificity};
    pub use crate::style::{ComputedStyle, ComputedValue, PropertyId};
    pub use crate::types::{Color, LengthValue, StyleValue};
}
