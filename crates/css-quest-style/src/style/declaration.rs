//! Longhand declarations produced by the parser.

use crate::parser::{ValueToken, collapse_whitespace};
use crate::style::{PropertyId, SpecifiedValue, shorthand};
use crate::types::StyleValue;
use crate::{Error, Result};

/// A single longhand declaration with its cascade-relevant flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    /// The longhand being declared.
    pub property: PropertyId,
    /// Declared value, including CSS-wide keywords.
    pub value: StyleValue<SpecifiedValue>,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

impl PropertyDeclaration {
    /// Create a declaration with an explicit value.
    pub fn new(property: PropertyId, value: SpecifiedValue) -> Self {
        Self {
            property,
            value: StyleValue::Set(value),
            important: false,
        }
    }

    /// Parse one source declaration into longhand declarations.
    ///
    /// Shorthands expand into every longhand they cover; longhands they do
    /// not mention are reset to their initial value.
    pub fn parse(name: &str, tokens: &[ValueToken], raw: &str, important: bool) -> Result<Vec<Self>> {
        let name = name.to_ascii_lowercase();
        let wide = css_wide_keyword(tokens);
        let invalid = || Error::invalid_value(name.as_str(), format!("'{}'", collapse_whitespace(raw)));

        if let Some(property) = PropertyId::lookup(&name) {
            let value = match wide {
                Some(keyword) => keyword,
                None => StyleValue::Set(
                    SpecifiedValue::parse(property.info().kind, tokens, raw).ok_or_else(invalid)?,
                ),
            };
            return Ok(vec![Self {
                property,
                value,
                important,
            }]);
        }

        let Some(longhands) = shorthand::longhands(&name) else {
            return Err(Error::invalid_value(name.as_str(), "Unknown property"));
        };

        if let Some(keyword) = wide {
            return Ok(longhands
                .iter()
                .map(|&property| Self {
                    property,
                    value: keyword.clone(),
                    important,
                })
                .collect());
        }

        let expanded = shorthand::expand(&name, tokens).ok_or_else(invalid)?;
        Ok(expanded
            .into_iter()
            .map(|(property, value)| Self {
                property,
                value: StyleValue::Set(value),
                important,
            })
            .collect())
    }
}

/// Check whether a name is a registered longhand or a supported shorthand.
pub fn is_known_property(name: &str) -> bool {
    PropertyId::lookup(name).is_some() || shorthand::longhands(&name.to_ascii_lowercase()).is_some()
}

fn css_wide_keyword(tokens: &[ValueToken]) -> Option<StyleValue<SpecifiedValue>> {
    match tokens {
        [ValueToken::Ident(keyword)] => match keyword.as_str() {
            "inherit" => Some(StyleValue::Inherit),
            "initial" => Some(StyleValue::Initial),
            "unset" | "revert" | "revert-layer" => Some(StyleValue::Unset),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, LengthValue};

    fn ident(name: &str) -> ValueToken {
        ValueToken::Ident(name.to_string())
    }

    #[test]
    fn longhand_declaration() {
        let decls = PropertyDeclaration::parse("Display", &[ident("flex")], "flex", false).unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].property, PropertyId::DISPLAY);
        assert_eq!(
            decls[0].value,
            StyleValue::Set(SpecifiedValue::Keyword("flex".to_string()))
        );
    }

    #[test]
    fn css_wide_keywords() {
        let decls = PropertyDeclaration::parse("color", &[ident("inherit")], "inherit", true).unwrap();
        assert_eq!(decls[0].value, StyleValue::Inherit);
        assert!(decls[0].important);

        let decls = PropertyDeclaration::parse("margin", &[ident("initial")], "initial", false).unwrap();
        assert_eq!(decls.len(), 4);
        assert!(decls.iter().all(|d| d.value == StyleValue::Initial));
    }

    #[test]
    fn shorthand_declaration() {
        let tokens = [
            ValueToken::Dimension(2.0, "px".to_string()),
            ident("solid"),
            ident("red"),
        ];
        let decls = PropertyDeclaration::parse("border-top", &tokens, "2px solid red", false).unwrap();
        assert_eq!(decls.len(), 3);
        assert_eq!(
            decls[0].value,
            StyleValue::Set(SpecifiedValue::Length(LengthValue::Px(2.0)))
        );
        assert_eq!(
            decls[2].value,
            StyleValue::Set(SpecifiedValue::Color(Color::from_rgb8(255, 0, 0)))
        );
    }

    #[test]
    fn invalid_and_unknown_declarations() {
        assert!(PropertyDeclaration::parse("color", &[ident("nope")], "nope", false).is_err());
        assert!(PropertyDeclaration::parse("colour", &[ident("red")], "red", false).is_err());
        assert!(is_known_property("border"));
        assert!(is_known_property("background-color"));
        assert!(!is_known_property("colour"));
    }
}
