//! Main style resolution engine.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::dom::{Document, NodeId};
use crate::parser::parse_declaration_block;
use crate::resolve::cache::StyleCache;
use crate::resolve::cascade::{CascadeKey, CascadedValues, cascade_properties};
use crate::resolve::inheritance::{ResolveContext, resolve_properties};
use crate::rules::{StylePriority, StyleSheet};
use crate::selector::{SelectorMatcher, Specificity};
use crate::style::{ComputedStyle, PropertyDeclaration, PropertyId};
use crate::{Error, Result};

/// The main style resolution engine.
///
/// The engine manages stylesheets, matches selectors, cascades declarations,
/// and resolves final computed styles. Computed styles are memoized per node
/// behind a lock so lookups only need `&self`.
pub struct StyleEngine {
    /// All registered stylesheets, sorted by priority.
    stylesheets: Vec<StyleSheet>,
    /// Style cache for performance.
    cache: Mutex<StyleCache>,
    /// Font size of the `medium` keyword (and of the root's parent).
    base_font_size: f32,
    /// Class no stylesheet rule may target.
    reserved_class: Option<String>,
}

impl StyleEngine {
    /// Create an engine with no stylesheets at all.
    pub fn new() -> Self {
        Self {
            stylesheets: vec![],
            cache: Mutex::new(StyleCache::new()),
            base_font_size: 16.0,
            reserved_class: None,
        }
    }

    /// Create an engine with the built-in user-agent stylesheet.
    pub fn with_user_agent() -> Self {
        let mut engine = Self::new();
        engine.add_stylesheet(StyleSheet::user_agent());
        engine
    }

    /// Get the base font size.
    pub fn base_font_size(&self) -> f32 {
        self.base_font_size
    }

    /// Set the base font size (the size of `medium`).
    pub fn set_base_font_size(&mut self, size: f32) {
        self.base_font_size = size;
        self.invalidate_all();
    }

    /// Reserve a class: rules whose selector mentions it are dropped from
    /// every current and future stylesheet.
    pub fn reserve_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        for sheet in &mut self.stylesheets {
            sheet.remove_rules_mentioning_class(&class);
        }
        self.reserved_class = Some(class);
        self.invalidate_all();
    }

    /// The reserved class, if any.
    pub fn reserved_class(&self) -> Option<&str> {
        self.reserved_class.as_deref()
    }

    /// Add a stylesheet.
    pub fn add_stylesheet(&mut self, mut stylesheet: StyleSheet) {
        if let Some(class) = &self.reserved_class {
            stylesheet.remove_rules_mentioning_class(class);
        }
        self.stylesheets.push(stylesheet);
        self.stylesheets.sort_by_key(|s| s.priority);
        self.invalidate_all();
    }

    /// Replace every stylesheet of the new sheet's priority with it.
    pub fn replace_stylesheet(&mut self, stylesheet: StyleSheet) {
        let priority = stylesheet.priority;
        self.stylesheets.retain(|s| s.priority != priority);
        self.add_stylesheet(stylesheet);
    }

    /// Remove stylesheets of a specific priority.
    pub fn remove_stylesheets(&mut self, priority: StylePriority) {
        self.stylesheets.retain(|s| s.priority != priority);
        self.invalidate_all();
    }

    /// Clear all stylesheets.
    pub fn clear_stylesheets(&mut self) {
        self.stylesheets.clear();
        self.invalidate_all();
    }

    /// Stylesheets of a given priority, in insertion order.
    pub fn stylesheets(&self, priority: StylePriority) -> impl Iterator<Item = &StyleSheet> {
        self.stylesheets.iter().filter(move |s| s.priority == priority)
    }

    /// Compute the style for an element.
    ///
    /// This performs the full style resolution:
    /// 1. Compute the parent's style (for inheritance)
    /// 2. Find all matching rules and the `style` attribute
    /// 3. Sort declarations by importance, origin, specificity and order
    /// 4. Cascade declarations
    /// 5. Resolve to computed values
    pub fn compute_style(&self, document: &Document, node: NodeId) -> Result<Arc<ComputedStyle>> {
        if !document.is_element(node) {
            return Err(Error::UnknownNode(node.to_string()));
        }

        // Check cache first
        let cached = self.cache.lock().get(node);
        if let Some(cached) = cached {
            return Ok(cached);
        }

        let parent = match document.parent_element(node) {
            Some(parent) => Some(self.compute_style(document, parent)?),
            None => None,
        };
        let root_font_size = match document.document_element() {
            Some(root) if root != node => self.compute_style(document, root)?.font_size(),
            _ => self.base_font_size,
        };
        let blockify = match &parent {
            None => true,
            Some(parent) => matches!(
                parent.get(PropertyId::DISPLAY).as_keyword(),
                Some("flex" | "inline-flex" | "grid" | "inline-grid")
            ),
        };
        let context = ResolveContext {
            root_font_size,
            base_font_size: self.base_font_size,
            blockify,
        };

        let cascaded = self.cascade(document, node);
        let computed = Arc::new(resolve_properties(&cascaded, parent.as_deref(), &context));

        self.cache.lock().insert(node, computed.clone());
        Ok(computed)
    }

    fn cascade(&self, document: &Document, node: NodeId) -> CascadedValues {
        let inline: Vec<PropertyDeclaration> = document
            .element(node)
            .and_then(|e| e.attribute("style"))
            .map(parse_declaration_block)
            .unwrap_or_default();

        // Collect all matching declarations with their cascade keys
        let mut matched: Vec<(CascadeKey, &PropertyDeclaration)> = vec![];
        let mut global_order = 0u32;

        for stylesheet in &self.stylesheets {
            let priority_offset = stylesheet.priority.as_order_offset();

            for rule in &stylesheet.rules {
                if SelectorMatcher::matches(&rule.selector, document, node) {
                    let specificity = rule.specificity.with_order(priority_offset | global_order);
                    for declaration in rule.declarations.iter() {
                        matched.push((
                            CascadeKey::new(stylesheet.priority, specificity, declaration.important),
                            declaration,
                        ));
                    }
                    global_order += 1;
                }
            }
        }

        let inline_order = Specificity::ZERO.with_order(StylePriority::Inline.as_order_offset());
        for declaration in &inline {
            matched.push((
                CascadeKey::new(StylePriority::Inline, inline_order, declaration.important),
                declaration,
            ));
        }

        tracing::debug!(
            "Cascading {} declarations for element {} ({})",
            matched.len(),
            node,
            document.element(node).map_or("", |e| e.name.as_str())
        );

        let mut cascaded = CascadedValues::new();
        cascade_properties(&mut cascaded, matched);
        cascaded
    }

    /// Invalidate all cached styles.
    pub fn invalidate_all(&self) {
        self.cache.lock().invalidate_all();
    }

    /// Get the number of loaded stylesheets.
    pub fn stylesheet_count(&self) -> usize {
        self.stylesheets.len()
    }

    /// Get the total number of rules across all stylesheets.
    pub fn rule_count(&self) -> usize {
        self.stylesheets.iter().map(|s| s.len()).sum()
    }

    /// Get the number of cached styles.
    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::with_user_agent()
    }
}
