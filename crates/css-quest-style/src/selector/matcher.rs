//! Selector matching algorithm.

use super::{Combinator, PseudoClass, Selector, SelectorList, SelectorPart, TypeSelector};

/// Dynamic element state used by interaction pseudo-classes.
///
/// A static render has no pointer or focus, so every flag defaults to false.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementState {
    /// Whether the pointer is over the element.
    pub hovered: bool,
    /// Whether the element is being activated.
    pub active: bool,
    /// Whether the element has keyboard focus.
    pub focused: bool,
}

/// Tree access needed for selector matching.
///
/// Implemented by the document arena; tests can provide lightweight trees.
pub trait ElementTree {
    /// Handle to an element in the tree.
    type Element: Copy;

    /// Parent element, if any (the document node is not an element).
    fn parent_element(&self, element: Self::Element) -> Option<Self::Element>;

    /// Previous sibling that is an element.
    fn prev_sibling_element(&self, element: Self::Element) -> Option<Self::Element>;

    /// Next sibling that is an element.
    fn next_sibling_element(&self, element: Self::Element) -> Option<Self::Element>;

    /// Lowercase local name (e.g., "div").
    fn local_name(&self, element: Self::Element) -> &str;

    /// Value of the `id` attribute.
    fn element_id(&self, element: Self::Element) -> Option<&str>;

    /// Check the element's class list.
    fn has_class(&self, element: Self::Element, class: &str) -> bool;

    /// Value of an attribute (name is lowercase).
    fn attribute(&self, element: Self::Element, name: &str) -> Option<&str>;

    /// True if the element has no element or text children.
    fn is_empty(&self, element: Self::Element) -> bool;

    /// True for the document element.
    fn is_root(&self, element: Self::Element) -> bool {
        self.parent_element(element).is_none()
    }

    /// Interaction state for :hover, :active and :focus.
    fn state(&self, _element: Self::Element) -> ElementState {
        ElementState::default()
    }
}

/// Sibling position information.
#[derive(Debug, Clone, Copy)]
pub struct SiblingInfo {
    /// Zero-based index among siblings.
    pub index: usize,
    /// Total number of siblings (including self).
    pub count: usize,
}

impl SiblingInfo {
    /// Returns true if this is the first sibling.
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Returns true if this is the last sibling.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }

    /// Returns true if this is the only child.
    pub fn is_only(&self) -> bool {
        self.count == 1
    }

    /// Zero-based index counted from the end.
    pub fn index_from_end(&self) -> usize {
        self.count - self.index - 1
    }
}

const FORM_CONTROLS: &[&str] = &[
    "button", "fieldset", "input", "optgroup", "option", "select", "textarea",
];

/// Selector matching engine.
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Check if any selector of a list matches the element.
    pub fn matches_list<T: ElementTree>(list: &SelectorList, tree: &T, element: T::Element) -> bool {
        list.iter().any(|s| Self::matches(s, tree, element))
    }

    /// Check if a complex selector matches the element.
    ///
    /// Walks the selector from right to left, backtracking over ancestors
    /// and preceding siblings as the combinators require.
    pub fn matches<T: ElementTree>(selector: &Selector, tree: &T, element: T::Element) -> bool {
        if selector.pseudo_element.is_some() || selector.parts.is_empty() {
            return false;
        }
        Self::matches_from(selector, selector.parts.len() - 1, tree, element)
    }

    fn matches_from<T: ElementTree>(
        selector: &Selector,
        index: usize,
        tree: &T,
        element: T::Element,
    ) -> bool {
        if !Self::part_matches(&selector.parts[index], tree, element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let next = index - 1;
        match selector.combinators[next] {
            Combinator::Descendant => {
                let mut ancestor = tree.parent_element(element);
                while let Some(candidate) = ancestor {
                    if Self::matches_from(selector, next, tree, candidate) {
                        return true;
                    }
                    ancestor = tree.parent_element(candidate);
                }
                false
            }
            Combinator::Child => tree
                .parent_element(element)
                .is_some_and(|parent| Self::matches_from(selector, next, tree, parent)),
            Combinator::AdjacentSibling => tree
                .prev_sibling_element(element)
                .is_some_and(|prev| Self::matches_from(selector, next, tree, prev)),
            Combinator::GeneralSibling => {
                let mut sibling = tree.prev_sibling_element(element);
                while let Some(candidate) = sibling {
                    if Self::matches_from(selector, next, tree, candidate) {
                        return true;
                    }
                    sibling = tree.prev_sibling_element(candidate);
                }
                false
            }
        }
    }

    /// Check if a compound selector matches the element.
    pub fn part_matches<T: ElementTree>(part: &SelectorPart, tree: &T, element: T::Element) -> bool {
        // Check type selector
        if let Some(TypeSelector::Type(name)) = &part.type_selector
            && !name.eq_ignore_ascii_case(tree.local_name(element))
        {
            return false;
        }

        // Check ID selector
        if let Some(id) = &part.id {
            match tree.element_id(element) {
                Some(actual) if actual == id => {}
                _ => return false,
            }
        }

        // Check class selectors (all must match)
        if !part.classes.iter().all(|class| tree.has_class(element, class)) {
            return false;
        }

        // Check attribute selectors
        if !part
            .attributes
            .iter()
            .all(|attr| attr.matches_value(tree.attribute(element, &attr.name)))
        {
            return false;
        }

        // Check pseudo-class selectors (all must match)
        part.pseudo_classes
            .iter()
            .all(|pseudo| Self::pseudo_matches(pseudo, tree, element))
    }

    fn pseudo_matches<T: ElementTree>(pseudo: &PseudoClass, tree: &T, element: T::Element) -> bool {
        match pseudo {
            PseudoClass::Hover => tree.state(element).hovered,
            PseudoClass::Active => tree.state(element).active,
            PseudoClass::Focus => tree.state(element).focused,
            PseudoClass::Disabled => {
                is_form_control(tree, element) && tree.attribute(element, "disabled").is_some()
            }
            PseudoClass::Enabled => {
                is_form_control(tree, element) && tree.attribute(element, "disabled").is_none()
            }
            PseudoClass::Checked => is_checked(tree, element),
            PseudoClass::Root => tree.is_root(element),

            PseudoClass::FirstChild => sibling_info(tree, element, false).is_first(),
            PseudoClass::LastChild => sibling_info(tree, element, false).is_last(),
            PseudoClass::OnlyChild => sibling_info(tree, element, false).is_only(),
            PseudoClass::NthChild(expr) => expr.matches(sibling_info(tree, element, false).index),
            PseudoClass::NthLastChild(expr) => {
                expr.matches(sibling_info(tree, element, false).index_from_end())
            }
            PseudoClass::FirstOfType => sibling_info(tree, element, true).is_first(),
            PseudoClass::LastOfType => sibling_info(tree, element, true).is_last(),
            PseudoClass::OnlyOfType => sibling_info(tree, element, true).is_only(),
            PseudoClass::NthOfType(expr) => expr.matches(sibling_info(tree, element, true).index),
            PseudoClass::NthLastOfType(expr) => {
                expr.matches(sibling_info(tree, element, true).index_from_end())
            }
            PseudoClass::Empty => tree.is_empty(element),

            PseudoClass::Not(inner) => !Self::part_matches(inner, tree, element),
        }
    }
}

/// Position of an element among its element siblings, optionally only
/// counting siblings with the same local name.
fn sibling_info<T: ElementTree>(tree: &T, element: T::Element, same_type: bool) -> SiblingInfo {
    let name = tree.local_name(element);
    let counts = |candidate: T::Element| !same_type || tree.local_name(candidate) == name;

    let mut index = 0;
    let mut cursor = tree.prev_sibling_element(element);
    while let Some(prev) = cursor {
        if counts(prev) {
            index += 1;
        }
        cursor = tree.prev_sibling_element(prev);
    }

    let mut after = 0;
    let mut cursor = tree.next_sibling_element(element);
    while let Some(next) = cursor {
        if counts(next) {
            after += 1;
        }
        cursor = tree.next_sibling_element(next);
    }

    SiblingInfo {
        index,
        count: index + after + 1,
    }
}

fn is_form_control<T: ElementTree>(tree: &T, element: T::Element) -> bool {
    FORM_CONTROLS.contains(&tree.local_name(element))
}

fn is_checked<T: ElementTree>(tree: &T, element: T::Element) -> bool {
    match tree.local_name(element) {
        "input" => {
            let kind = tree.attribute(element, "type").unwrap_or_default();
            (kind.eq_ignore_ascii_case("checkbox") || kind.eq_ignore_ascii_case("radio"))
                && tree.attribute(element, "checked").is_some()
        }
        "option" => tree.attribute(element, "selected").is_some(),
        _ => false,
    }
}
