//! Single style rule definition.

use std::sync::Arc;

use crate::selector::{Selector, Specificity};
use crate::style::PropertyDeclaration;

/// A style rule mapping a selector to declarations.
///
/// Each rule has:
/// - A selector that determines which elements it applies to
/// - Longhand declarations to apply when the selector matches
/// - Pre-computed specificity for efficient sorting
/// - Source order for tie-breaking
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// The selector for matching elements.
    pub selector: Selector,
    /// The declarations to apply, shared by every selector of a list.
    pub declarations: Arc<[PropertyDeclaration]>,
    /// Pre-computed specificity.
    pub specificity: Specificity,
    /// Source order (for tie-breaking when specificity is equal).
    pub order: u32,
}

impl StyleRule {
    /// Create a new style rule.
    pub fn new(selector: Selector, declarations: Arc<[PropertyDeclaration]>, order: u32) -> Self {
        let specificity = Specificity::of_selector(&selector);
        Self {
            selector,
            declarations,
            specificity,
            order,
        }
    }
}
