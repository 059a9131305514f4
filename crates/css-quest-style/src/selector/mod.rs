//! CSS selector types and matching.

mod matcher;
mod specificity;
mod types;

pub use matcher::{ElementState, ElementTree, SelectorMatcher, SiblingInfo};
pub use specificity::{Specificity, SpecificityWithOrder};
pub use types::*;
