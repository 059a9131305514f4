//! CSS specificity calculation.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use super::{PseudoClass, Selector, SelectorPart, TypeSelector};

/// Selector specificity as `(ids, classes, types)`.
///
/// Ordering is lexicographic, so one ID outweighs any number of classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity (universal selector, inline declarations).
    pub const ZERO: Self = Self(0, 0, 0);

    /// Specificity of a complex selector: the sum over its compound parts,
    /// plus one type-level count for a pseudo-element.
    pub fn of_selector(selector: &Selector) -> Self {
        let parts = selector.parts.iter().map(Self::of_part).sum::<Self>();
        match selector.pseudo_element {
            Some(_) => parts + Self(0, 0, 1),
            None => parts,
        }
    }

    /// Specificity of one compound selector.
    ///
    /// `:not()` counts as its argument; every other pseudo-class counts as a
    /// class.
    pub fn of_part(part: &SelectorPart) -> Self {
        let ids = u32::from(part.id.is_some());
        let types = u32::from(matches!(part.type_selector, Some(TypeSelector::Type(_))));
        let classes = (part.classes.len() + part.attributes.len()) as u32;

        part.pseudo_classes
            .iter()
            .map(|pseudo| match pseudo {
                PseudoClass::Not(inner) => Self::of_part(inner),
                _ => Self(0, 1, 0),
            })
            .fold(Self(ids, classes, types), |total, s| total + s)
    }

    /// Get the ID selector count.
    pub fn ids(&self) -> u32 {
        self.0
    }

    /// Get the class/attribute/pseudo-class count.
    pub fn classes(&self) -> u32 {
        self.1
    }

    /// Get the type selector count.
    pub fn types(&self) -> u32 {
        self.2
    }

    /// Combine with source order for complete ordering.
    pub fn with_order(self, order: u32) -> SpecificityWithOrder {
        SpecificityWithOrder {
            specificity: self,
            order,
        }
    }
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0, self.1 + other.1, self.2 + other.2)
    }
}

impl Sum for Specificity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

/// Specificity combined with source order for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecificityWithOrder {
    /// The CSS specificity value.
    pub specificity: Specificity,
    /// Source order for tie-breaking (higher = later in the cascade).
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{AttributeSelector, PseudoClass, SelectorPart};

    fn single(part: SelectorPart) -> Selector {
        Selector {
            parts: vec![part],
            combinators: vec![],
            pseudo_element: None,
        }
    }

    #[test]
    fn specificity_calculation() {
        // * -> (0,0,0)
        let sel = Selector::universal();
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 0, 0));

        // div -> (0,0,1)
        let sel = Selector::type_selector("div");
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 0, 1));

        // .box -> (0,1,0)
        let sel = Selector::class("box");
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 1, 0));

        // #main -> (1,0,0)
        let sel = Selector::id("main");
        assert_eq!(Specificity::of_selector(&sel), Specificity(1, 0, 0));

        // li.item:first-child -> (0,2,1)
        let sel = single(
            SelectorPart::type_only("li")
                .with_class("item")
                .with_pseudo(PseudoClass::FirstChild),
        );
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 2, 1));

        // #main.card[data-x] -> (1,2,0)
        let sel = single(
            SelectorPart::id_only("main")
                .with_class("card")
                .with_attribute(AttributeSelector::exists("data-x")),
        );
        assert_eq!(Specificity::of_selector(&sel), Specificity(1, 2, 0));
    }

    #[test]
    fn descendant_parts_accumulate() {
        // .table > plate .apple -> (0,2,1)
        let sel = Selector::class("table")
            .child(SelectorPart::type_only("plate"))
            .descendant(SelectorPart::class_only("apple"));
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 2, 1));
    }

    #[test]
    fn specificity_comparison() {
        // ID > class > type
        assert!(Specificity(1, 0, 0) > Specificity(0, 99, 99));
        assert!(Specificity(0, 1, 0) > Specificity(0, 0, 99));
        assert!(Specificity(0, 0, 1) > Specificity(0, 0, 0));

        // Same level, higher count wins
        assert!(Specificity(0, 2, 0) > Specificity(0, 1, 0));
    }

    #[test]
    fn specificity_with_order() {
        let s1 = Specificity(0, 1, 0).with_order(1);
        let s2 = Specificity(0, 1, 0).with_order(2);
        let s3 = Specificity(0, 2, 0).with_order(0);

        // Higher specificity wins regardless of order
        assert!(s3 > s1);
        assert!(s3 > s2);

        // Same specificity, higher order wins
        assert!(s2 > s1);
    }

    #[test]
    fn not_pseudo_class_specificity() {
        // :not(.primary) has specificity of .primary = (0,1,0)
        let sel = single(SelectorPart::new().with_pseudo(PseudoClass::Not(Box::new(
            SelectorPart::class_only("primary"),
        ))));
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 1, 0));
    }
}
