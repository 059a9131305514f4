//! Property cascading logic.

use crate::rules::StylePriority;
use crate::selector::SpecificityWithOrder;
use crate::style::{PropertyDeclaration, PropertyId, SpecifiedValue};
use crate::types::StyleValue;

/// Sort key deciding which declaration wins the cascade.
///
/// Compared lexicographically: importance, origin, specificity, then
/// source order. Greater keys win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CascadeKey {
    /// Whether the declaration is `!important`.
    pub important: bool,
    /// Origin rank of the declaring stylesheet.
    pub origin: u8,
    /// Specificity and global source order.
    pub specificity: SpecificityWithOrder,
}

impl CascadeKey {
    /// Build the key for a declaration from a sheet of the given priority.
    pub fn new(priority: StylePriority, specificity: SpecificityWithOrder, important: bool) -> Self {
        Self {
            important,
            origin: priority.origin_rank(),
            specificity,
        }
    }
}

/// The winning declared value of every longhand, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadedValues {
    values: Vec<Option<StyleValue<SpecifiedValue>>>,
}

impl CascadedValues {
    /// Create an empty set: no property has a declared value.
    pub fn new() -> Self {
        Self {
            values: vec![None; PropertyId::COUNT],
        }
    }

    /// The cascaded value of a property, if one was declared.
    pub fn get(&self, property: PropertyId) -> Option<&StyleValue<SpecifiedValue>> {
        self.values[property.index()].as_ref()
    }

    /// Overwrite a property with a declaration.
    pub fn apply(&mut self, declaration: &PropertyDeclaration) {
        self.values[declaration.property.index()] = Some(declaration.value.clone());
    }

    /// Number of properties with a declared value.
    pub fn declared_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

impl Default for CascadedValues {
    fn default() -> Self {
        Self::new()
    }
}

/// Cascade declarations onto `target`.
///
/// Declarations are sorted by key, lowest first, and applied in that order so
/// later ones override earlier ones. The sort is stable: declarations with
/// equal keys keep their source order.
pub fn cascade_properties<'a>(
    target: &mut CascadedValues,
    mut declarations: Vec<(CascadeKey, &'a PropertyDeclaration)>,
) {
    declarations.sort_by_key(|(key, _)| *key);
    for (_, declaration) in declarations {
        target.apply(declaration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Specificity;
    use crate::types::Color;

    fn color_decl(color: Color, important: bool) -> PropertyDeclaration {
        PropertyDeclaration {
            important,
            ..PropertyDeclaration::new(PropertyId::COLOR, SpecifiedValue::Color(color))
        }
    }

    fn key(priority: StylePriority, specificity: Specificity, order: u32, important: bool) -> CascadeKey {
        CascadeKey::new(
            priority,
            specificity.with_order(priority.as_order_offset() | order),
            important,
        )
    }

    fn winner(declarations: Vec<(CascadeKey, &PropertyDeclaration)>) -> Option<StyleValue<SpecifiedValue>> {
        let mut cascaded = CascadedValues::new();
        cascade_properties(&mut cascaded, declarations);
        cascaded.get(PropertyId::COLOR).cloned()
    }

    #[test]
    fn later_source_order_wins() {
        let red = color_decl(Color::from_rgb8(255, 0, 0), false);
        let blue = color_decl(Color::from_rgb8(0, 0, 255), false);

        let result = winner(vec![
            (key(StylePriority::Learner, Specificity(0, 1, 0), 1, false), &blue),
            (key(StylePriority::Learner, Specificity(0, 1, 0), 0, false), &red),
        ]);
        assert_eq!(result, Some(blue.value.clone()));
    }

    #[test]
    fn specificity_beats_sheet_order() {
        let arena = color_decl(Color::from_rgb8(255, 0, 0), false);
        let learner = color_decl(Color::from_rgb8(0, 0, 255), false);

        let result = winner(vec![
            (key(StylePriority::Arena, Specificity(0, 2, 0), 0, false), &arena),
            (key(StylePriority::Learner, Specificity(0, 1, 0), 0, false), &learner),
        ]);
        assert_eq!(result, Some(arena.value.clone()));
    }

    #[test]
    fn important_beats_inline() {
        let important = color_decl(Color::from_rgb8(255, 0, 0), true);
        let inline = color_decl(Color::from_rgb8(0, 0, 255), false);

        let result = winner(vec![
            (key(StylePriority::Learner, Specificity(0, 0, 1), 0, true), &important),
            (key(StylePriority::Inline, Specificity::ZERO, 0, false), &inline),
        ]);
        assert_eq!(result, Some(important.value.clone()));
    }

    #[test]
    fn author_beats_user_agent() {
        let ua = color_decl(Color::from_rgb8(255, 0, 0), false);
        let author = color_decl(Color::from_rgb8(0, 0, 255), false);

        let result = winner(vec![
            (key(StylePriority::Learner, Specificity(0, 0, 0), 0, false), &author),
            (key(StylePriority::UserAgent, Specificity(1, 0, 0), 5, false), &ua),
        ]);
        assert_eq!(result, Some(author.value.clone()));
    }

    #[test]
    fn undeclared_properties_stay_empty() {
        let cascaded = CascadedValues::new();
        assert!(cascaded.get(PropertyId::DISPLAY).is_none());
        assert_eq!(cascaded.declared_count(), 0);
    }
}
