//! Selector type definitions.

use std::fmt;

/// A comma-separated group of selectors (e.g., "h1, .title > span").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    /// Iterate over the selectors in the list.
    pub fn iter(&self) -> impl Iterator<Item = &Selector> {
        self.0.iter()
    }

    /// Number of selectors in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if any selector in the list references the given class.
    pub fn mentions_class(&self, class: &str) -> bool {
        self.0.iter().any(|s| s.mentions_class(class))
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

/// A complex CSS selector (e.g., "ul.menu > li:first-child").
///
/// A selector consists of one or more compound parts connected by combinators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    /// Chain of compound selectors, left to right.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
    /// Trailing pseudo-element (e.g., `::before`). Such selectors never
    /// match an element.
    pub pseudo_element: Option<String>,
}

impl Selector {
    /// Create a simple type selector.
    pub fn type_selector(tag: impl Into<String>) -> Self {
        Self::from_part(SelectorPart::type_only(tag))
    }

    /// Create a universal selector (*).
    pub fn universal() -> Self {
        Self::from_part(SelectorPart::universal())
    }

    /// Create a class selector.
    pub fn class(class_name: impl Into<String>) -> Self {
        Self::from_part(SelectorPart::class_only(class_name))
    }

    /// Create an ID selector.
    pub fn id(id: impl Into<String>) -> Self {
        Self::from_part(SelectorPart::id_only(id))
    }

    fn from_part(part: SelectorPart) -> Self {
        Self {
            parts: vec![part],
            combinators: vec![],
            pseudo_element: None,
        }
    }

    /// Add a descendant selector part.
    pub fn descendant(self, part: SelectorPart) -> Self {
        self.combine(Combinator::Descendant, part)
    }

    /// Add a child selector part.
    pub fn child(self, part: SelectorPart) -> Self {
        self.combine(Combinator::Child, part)
    }

    /// Add a part with an explicit combinator.
    pub fn combine(mut self, combinator: Combinator, part: SelectorPart) -> Self {
        if !self.parts.is_empty() {
            self.combinators.push(combinator);
        }
        self.parts.push(part);
        self
    }

    /// Get the rightmost (subject) selector part.
    pub fn subject(&self) -> Option<&SelectorPart> {
        self.parts.last()
    }

    /// Check if any part of the selector references the given class.
    pub fn mentions_class(&self, class: &str) -> bool {
        self.parts.iter().any(|p| p.mentions_class(class))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match &self.combinators[i - 1] {
                    Combinator::Descendant => write!(f, " ")?,
                    Combinator::Child => write!(f, " > ")?,
                    Combinator::AdjacentSibling => write!(f, " + ")?,
                    Combinator::GeneralSibling => write!(f, " ~ ")?,
                }
            }
            write!(f, "{}", part)?;
        }
        if let Some(pseudo) = &self.pseudo_element {
            write!(f, "::{}", pseudo)?;
        }
        Ok(())
    }
}

/// A compound selector (e.g., "li.item[data-x]:first-child").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SelectorPart {
    /// Type selector (element name or universal).
    pub type_selector: Option<TypeSelector>,
    /// ID selector (#id).
    pub id: Option<String>,
    /// Class selectors (.class).
    pub classes: Vec<String>,
    /// Attribute selectors ([attr=value]).
    pub attributes: Vec<AttributeSelector>,
    /// Pseudo-class selectors (:first-child, :not(...), etc.).
    pub pseudo_classes: Vec<PseudoClass>,
}

impl SelectorPart {
    /// Create a new empty selector part.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a type-only selector.
    pub fn type_only(tag: impl Into<String>) -> Self {
        Self {
            type_selector: Some(TypeSelector::Type(tag.into())),
            ..Default::default()
        }
    }

    /// Create a universal selector part.
    pub fn universal() -> Self {
        Self {
            type_selector: Some(TypeSelector::Universal),
            ..Default::default()
        }
    }

    /// Create a class-only selector.
    pub fn class_only(class_name: impl Into<String>) -> Self {
        Self {
            classes: vec![class_name.into()],
            ..Default::default()
        }
    }

    /// Create an ID-only selector.
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Add a type selector.
    pub fn with_type(mut self, tag: impl Into<String>) -> Self {
        self.type_selector = Some(TypeSelector::Type(tag.into()));
        self
    }

    /// Add an ID selector.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class selector.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add an attribute selector.
    pub fn with_attribute(mut self, attribute: AttributeSelector) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Add a pseudo-class selector.
    pub fn with_pseudo(mut self, pseudo: PseudoClass) -> Self {
        self.pseudo_classes.push(pseudo);
        self
    }

    /// Check if the part has no simple selectors at all.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo_classes.is_empty()
    }

    /// Check if this is a universal selector with no other constraints.
    pub fn is_universal_only(&self) -> bool {
        matches!(self.type_selector, Some(TypeSelector::Universal))
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo_classes.is_empty()
    }

    fn mentions_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
            || self
                .attributes
                .iter()
                .any(|a| a.name == "class" && a.matches_value(Some(class)))
            || self.pseudo_classes.iter().any(|p| match p {
                PseudoClass::Not(inner) => inner.mentions_class(class),
                _ => false,
            })
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_selector {
            Some(TypeSelector::Universal) => write!(f, "*")?,
            Some(TypeSelector::Type(t)) => write!(f, "{}", t)?,
            None => {}
        }

        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }

        for class in &self.classes {
            write!(f, ".{}", class)?;
        }

        for attribute in &self.attributes {
            write!(f, "{}", attribute)?;
        }

        for pseudo in &self.pseudo_classes {
            write!(f, ":{}", pseudo)?;
        }

        Ok(())
    }
}

/// Type selector - matches the element's local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSelector {
    /// Universal selector (*) - matches any element.
    Universal,
    /// Named type (e.g., "div", "li"), stored lowercase.
    Type(String),
}

/// Combinator between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space): matches any descendant.
    Descendant,
    /// Child combinator (>): matches direct child only.
    Child,
    /// Adjacent sibling (+): matches immediately following sibling.
    AdjacentSibling,
    /// General sibling (~): matches any following sibling.
    GeneralSibling,
}

/// Attribute selector, e.g. `[type="checkbox" i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    /// Attribute name, stored lowercase.
    pub name: String,
    /// Operator and value; `None` for a presence test.
    pub matcher: Option<(AttributeOperator, String)>,
    /// Whether the value comparison ignores ASCII case (`i` flag).
    pub case_insensitive: bool,
}

impl AttributeSelector {
    /// Presence test (`[name]`).
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher: None,
            case_insensitive: false,
        }
    }

    /// Value test (`[name op value]`).
    pub fn with_value(
        name: impl Into<String>,
        operator: AttributeOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            matcher: Some((operator, value.into())),
            case_insensitive: false,
        }
    }

    /// Check an attribute value against this selector.
    pub fn matches_value(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        let Some((operator, expected)) = &self.matcher else {
            return true;
        };

        let (actual, expected) = if self.case_insensitive {
            (actual.to_ascii_lowercase(), expected.to_ascii_lowercase())
        } else {
            (actual.to_string(), expected.clone())
        };

        match operator {
            AttributeOperator::Equals => actual == expected,
            AttributeOperator::Includes => {
                !expected.is_empty() && actual.split_ascii_whitespace().any(|w| w == expected)
            }
            AttributeOperator::DashMatch => {
                actual == expected || actual.starts_with(&format!("{}-", expected))
            }
            AttributeOperator::Prefix => !expected.is_empty() && actual.starts_with(&expected),
            AttributeOperator::Suffix => !expected.is_empty() && actual.ends_with(&expected),
            AttributeOperator::Substring => !expected.is_empty() && actual.contains(&expected),
        }
    }
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.name)?;
        if let Some((operator, value)) = &self.matcher {
            write!(f, "{}\"{}\"", operator, value)?;
            if self.case_insensitive {
                write!(f, " i")?;
            }
        }
        write!(f, "]")
    }
}

/// Attribute selector operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `=`
    Equals,
    /// `~=` whitespace-separated word.
    Includes,
    /// `|=` exact or followed by `-`.
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl fmt::Display for AttributeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            AttributeOperator::Equals => "=",
            AttributeOperator::Includes => "~=",
            AttributeOperator::DashMatch => "|=",
            AttributeOperator::Prefix => "^=",
            AttributeOperator::Suffix => "$=",
            AttributeOperator::Substring => "*=",
        };
        f.write_str(op)
    }
}

/// Pseudo-class selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    /// :hover - pointer is over the element.
    Hover,
    /// :active - element is being activated.
    Active,
    /// :focus - element has keyboard focus.
    Focus,
    /// :disabled - form control with the `disabled` attribute.
    Disabled,
    /// :enabled - form control without the `disabled` attribute.
    Enabled,
    /// :checked - checkbox, radio or option that is checked/selected.
    Checked,
    /// :root - the document element.
    Root,
    /// :first-child - first among siblings.
    FirstChild,
    /// :last-child - last among siblings.
    LastChild,
    /// :only-child - only child of parent.
    OnlyChild,
    /// :nth-child(An+B).
    NthChild(NthExpr),
    /// :nth-last-child(An+B).
    NthLastChild(NthExpr),
    /// :first-of-type.
    FirstOfType,
    /// :last-of-type.
    LastOfType,
    /// :only-of-type.
    OnlyOfType,
    /// :nth-of-type(An+B).
    NthOfType(NthExpr),
    /// :nth-last-of-type(An+B).
    NthLastOfType(NthExpr),
    /// :empty - has no element or text children.
    Empty,
    /// :not(selector) - negation.
    Not(Box<SelectorPart>),
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoClass::Hover => write!(f, "hover"),
            PseudoClass::Active => write!(f, "active"),
            PseudoClass::Focus => write!(f, "focus"),
            PseudoClass::Disabled => write!(f, "disabled"),
            PseudoClass::Enabled => write!(f, "enabled"),
            PseudoClass::Checked => write!(f, "checked"),
            PseudoClass::Root => write!(f, "root"),
            PseudoClass::FirstChild => write!(f, "first-child"),
            PseudoClass::LastChild => write!(f, "last-child"),
            PseudoClass::OnlyChild => write!(f, "only-child"),
            PseudoClass::NthChild(expr) => write!(f, "nth-child({})", expr),
            PseudoClass::NthLastChild(expr) => write!(f, "nth-last-child({})", expr),
            PseudoClass::FirstOfType => write!(f, "first-of-type"),
            PseudoClass::LastOfType => write!(f, "last-of-type"),
            PseudoClass::OnlyOfType => write!(f, "only-of-type"),
            PseudoClass::NthOfType(expr) => write!(f, "nth-of-type({})", expr),
            PseudoClass::NthLastOfType(expr) => write!(f, "nth-last-of-type({})", expr),
            PseudoClass::Empty => write!(f, "empty"),
            PseudoClass::Not(inner) => write!(f, "not({})", inner),
        }
    }
}

impl PseudoClass {
    /// Parse a non-functional pseudo-class from its CSS name.
    pub fn from_css(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hover" => Some(Self::Hover),
            "active" => Some(Self::Active),
            "focus" => Some(Self::Focus),
            "disabled" => Some(Self::Disabled),
            "enabled" => Some(Self::Enabled),
            "checked" => Some(Self::Checked),
            "root" => Some(Self::Root),
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            "only-child" => Some(Self::OnlyChild),
            "first-of-type" => Some(Self::FirstOfType),
            "last-of-type" => Some(Self::LastOfType),
            "only-of-type" => Some(Self::OnlyOfType),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }
}

/// An `An+B` argument of the `:nth-*` pseudo-classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NthExpr {
    /// Step between matching positions.
    pub a: i32,
    /// First matching position (1-based).
    pub b: i32,
}

impl NthExpr {
    /// `odd`, matching positions 1, 3, 5 and so on.
    pub const ODD: Self = Self { a: 2, b: 1 };
    /// `even`, matching positions 2, 4, 6 and so on.
    pub const EVEN: Self = Self { a: 2, b: 0 };

    /// Build `An+B`.
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Whether the sibling at 0-based `index` is selected, i.e. whether
    /// `index + 1 = A*n + B` for some `n >= 0`.
    pub fn matches(&self, index: usize) -> bool {
        let Some(offset) = index
            .checked_add(1)
            .and_then(|position| i64::try_from(position).ok())
            .and_then(|position| position.checked_sub(i64::from(self.b)))
        else {
            return false;
        };
        match i64::from(self.a) {
            0 => offset == 0,
            a => offset % a == 0 && offset / a >= 0,
        }
    }
}

impl fmt::Display for NthExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.a, self.b) {
            (0, b) => write!(f, "{b}"),
            (a, 0) => write!(f, "{a}n"),
            (a, b) => write!(f, "{a}n{b:+}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        let sel = Selector::type_selector("ul")
            .descendant(SelectorPart::class_only("item").with_pseudo(PseudoClass::FirstChild));
        assert_eq!(sel.to_string(), "ul .item:first-child");

        let sel = Selector::class("table").child(SelectorPart::type_only("plate"));
        assert_eq!(sel.to_string(), ".table > plate");
    }

    #[test]
    fn selector_part_display() {
        let part = SelectorPart::type_only("div")
            .with_class("card")
            .with_class("red")
            .with_attribute(AttributeSelector::with_value(
                "data-kind",
                AttributeOperator::Prefix,
                "fr",
            ))
            .with_pseudo(PseudoClass::Empty);
        assert_eq!(part.to_string(), "div.card.red[data-kind^=\"fr\"]:empty");
    }

    #[test]
    fn mentions_class_looks_through_not() {
        let sel = Selector {
            parts: vec![SelectorPart::type_only("div").with_pseudo(PseudoClass::Not(Box::new(
                SelectorPart::class_only("marker"),
            )))],
            combinators: vec![],
            pseudo_element: None,
        };
        assert!(sel.mentions_class("marker"));
        assert!(!sel.mentions_class("box"));
    }

    #[test]
    fn attribute_operators() {
        let sel = AttributeSelector::with_value("class", AttributeOperator::Includes, "box");
        assert!(sel.matches_value(Some("red box")));
        assert!(!sel.matches_value(Some("boxes")));
        assert!(!sel.matches_value(None));

        let sel = AttributeSelector::with_value("lang", AttributeOperator::DashMatch, "en");
        assert!(sel.matches_value(Some("en-US")));
        assert!(!sel.matches_value(Some("english")));

        let mut sel = AttributeSelector::with_value("type", AttributeOperator::Equals, "TEXT");
        assert!(!sel.matches_value(Some("text")));
        sel.case_insensitive = true;
        assert!(sel.matches_value(Some("text")));
    }

    #[test]
    fn nth_expr_matches() {
        let third = NthExpr::new(0, 3);
        let picked: Vec<usize> = (0..6).filter(|i| third.matches(*i)).collect();
        assert_eq!(picked, [2]);

        let picked: Vec<usize> = (0..6).filter(|i| NthExpr::ODD.matches(*i)).collect();
        assert_eq!(picked, [0, 2, 4]);

        let picked: Vec<usize> = (0..6).filter(|i| NthExpr::EVEN.matches(*i)).collect();
        assert_eq!(picked, [1, 3, 5]);

        // -n+2: the first two
        let picked: Vec<usize> = (0..6).filter(|i| NthExpr::new(-1, 2).matches(*i)).collect();
        assert_eq!(picked, [0, 1]);

        // 3n-1: positions 2, 5
        let picked: Vec<usize> = (0..6).filter(|i| NthExpr::new(3, -1).matches(*i)).collect();
        assert_eq!(picked, [1, 4]);

        // clamped offsets from oversized integers
        let every = NthExpr::new(1, i32::MIN);
        assert!((0..6).all(|i| every.matches(i)));
        assert!(!NthExpr::new(-1, i32::MIN).matches(0));
        assert!(NthExpr::new(i32::MIN, 1).matches(0));
        assert!(!NthExpr::new(0, i32::MIN).matches(usize::MAX));
    }

    #[test]
    fn nth_expr_display() {
        assert_eq!(NthExpr::new(0, 3).to_string(), "3");
        assert_eq!(NthExpr::EVEN.to_string(), "2n");
        assert_eq!(NthExpr::ODD.to_string(), "2n+1");
        assert_eq!(NthExpr::new(-1, 2).to_string(), "-1n+2");
    }
}
