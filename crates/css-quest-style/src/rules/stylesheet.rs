//! Stylesheet collection and management.

use std::path::Path;

use crate::rules::StyleRule;
use crate::selector::Selector;
use crate::style::PropertyDeclaration;
use crate::{Error, Result};

/// Priority level for style sources.
///
/// Sources are listed in cascade order: later sources win ties in origin
/// and specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum StylePriority {
    /// Built-in element defaults (lowest priority).
    UserAgent = 0,
    /// The arena's base stylesheet of preset classes.
    Arena = 1,
    /// The learner's stylesheet.
    Learner = 2,
    /// `style` attributes (highest priority).
    Inline = 3,
}

impl StylePriority {
    /// Get a numeric value for ordering calculations.
    pub fn as_order_offset(&self) -> u32 {
        (*self as u32) << 24
    }

    /// Cascade origin rank: user agent, author, then inline.
    ///
    /// The arena and learner sheets are both author origin; between them
    /// specificity decides before source order.
    pub fn origin_rank(&self) -> u8 {
        match self {
            StylePriority::UserAgent => 0,
            StylePriority::Arena | StylePriority::Learner => 1,
            StylePriority::Inline => 2,
        }
    }
}

/// A stylesheet containing multiple rules.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// The rules in this stylesheet.
    pub rules: Vec<StyleRule>,
    /// Priority level.
    pub priority: StylePriority,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new(priority: StylePriority) -> Self {
        Self {
            rules: vec![],
            priority,
        }
    }

    /// Create the built-in user-agent stylesheet.
    pub fn user_agent() -> Self {
        Self::from_css(super::USER_AGENT_CSS, StylePriority::UserAgent)
    }

    /// Load a stylesheet from a CSS file.
    pub fn from_file(path: impl AsRef<Path>, priority: StylePriority) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_css(&content, priority))
    }

    /// Parse a stylesheet from CSS text.
    ///
    /// Malformed rules and declarations are dropped with a warning; the
    /// rest of the sheet still applies.
    pub fn from_css(css: &str, priority: StylePriority) -> Self {
        let rules = match crate::parser::parse_css(css) {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!("Discarding stylesheet: {}", e);
                vec![]
            }
        };
        Self { rules, priority }
    }

    /// Add a rule to the stylesheet.
    ///
    /// The rule's order is automatically set after the current last rule.
    pub fn add_rule(&mut self, selector: Selector, declarations: Vec<PropertyDeclaration>) {
        let order = self.next_order();
        self.rules.push(StyleRule::new(selector, declarations.into(), order));
    }

    /// Add a pre-built rule to the stylesheet.
    pub fn add_style_rule(&mut self, mut rule: StyleRule) {
        rule.order = self.next_order();
        self.rules.push(rule);
    }

    fn next_order(&self) -> u32 {
        self.rules.last().map_or(0, |r| r.order + 1)
    }

    /// Drop every rule whose selector references `class`.
    ///
    /// Returns the number of rules removed.
    pub fn remove_rules_mentioning_class(&mut self, class: &str) -> usize {
        let before = self.rules.len();
        self.rules.retain(|rule| {
            let mentions = rule.selector.mentions_class(class);
            if mentions {
                tracing::warn!("Ignoring rule '{}': it targets the reserved class", rule.selector);
            }
            !mentions
        });
        before - self.rules.len()
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Clear all rules.
    pub fn clear(&mut self) {
        self.rules.clear();
    }
}
