//! CSS syntax parser using the `cssparser` crate.
//!
//! This module contains the core parsing logic for CSS stylesheets. The parser
//! tokenizes CSS input and constructs [`StyleRule`] objects containing selectors
//! and their associated longhand declarations.

use std::sync::Arc;

use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

use super::selector_parser::parse_selector_list;
use super::tokens::{ValueToken, collect_value_tokens};
use crate::rules::StyleRule;
use crate::selector::SelectorList;
use crate::style::{PropertyDeclaration, is_known_property};
use crate::{Error, Result};

/// Parse a CSS stylesheet string into a list of style rules.
///
/// A rule with a selector list yields one [`StyleRule`] per selector; all of
/// them share the declaration block and the rule's source order.
///
/// # Error Recovery
///
/// Parse errors in individual rules do not cause the entire parse to fail.
/// Instead, the parser:
/// 1. Logs the error via `tracing::warn!`
/// 2. Skips to the next rule (after the closing `}`)
/// 3. Continues parsing subsequent rules
///
/// Invalid declarations inside a valid rule are dropped the same way,
/// without affecting their siblings. At-rules are skipped.
///
/// # Example
///
/// ```
/// use css_quest_style::parser::parse_css;
///
/// let rules = parse_css(".box { color: red; } .item, p { color: blue; }").unwrap();
/// assert_eq!(rules.len(), 3);
/// ```
pub fn parse_css(css: &str) -> Result<Vec<StyleRule>> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = vec![];
    let mut order = 0u32;

    loop {
        // Skip whitespace and comments
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let state = parser.state();
        match parser.next() {
            Ok(Token::AtKeyword(name)) => {
                tracing::debug!("Skipping unsupported at-rule @{}", name);
                skip_at_rule(&mut parser);
                continue;
            }
            Ok(Token::CDO) | Ok(Token::CDC) => continue,
            _ => parser.reset(&state),
        }

        match parse_rule(&mut parser) {
            Ok((selectors, declarations)) => {
                let declarations: Arc<[PropertyDeclaration]> = declarations.into();
                for selector in selectors.0 {
                    rules.push(StyleRule::new(selector, Arc::clone(&declarations), order));
                }
                order += 1;
            }
            Err(e) => {
                tracing::warn!("CSS parse error: {}", e);
                // Try to recover by skipping to next rule
                skip_to_next_rule(&mut parser);
            }
        }
    }

    Ok(rules)
}

/// Parse the contents of a declaration block, such as a `style` attribute.
pub fn parse_declaration_block(text: &str) -> Vec<PropertyDeclaration> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parse_declarations(&mut parser)
}

/// Tokenize a standalone property value.
pub fn parse_value_tokens(text: &str) -> Vec<ValueToken> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    collect_value_tokens(&mut parser).unwrap_or_default()
}

/// Parse a single CSS rule: selector { declarations }
fn parse_rule(parser: &mut Parser<'_, '_>) -> Result<(SelectorList, Vec<PropertyDeclaration>)> {
    let location = parser.current_source_location();

    // Capture the prelude up to the block and parse it as a selector list
    let start = parser.position();
    parser
        .parse_until_before(Delimiter::CurlyBracketBlock, |p| {
            while p.next().is_ok() {}
            Ok::<_, CssParseError<'_, ()>>(())
        })
        .map_err(|_| Error::parse("Malformed rule prelude", location.line + 1, location.column))?;
    let prelude = parser.slice_from(start);
    let selectors = parse_selector_list(prelude)?;

    match parser.next() {
        Ok(Token::CurlyBracketBlock) => {}
        _ => {
            return Err(Error::parse(
                format!("Expected '{{' after selector '{}'", prelude.trim()),
                location.line + 1,
                location.column,
            ));
        }
    }

    let declarations = parser
        .parse_nested_block(|block| Ok::<_, CssParseError<'_, ()>>(parse_declarations(block)))
        .map_err(|e: CssParseError<'_, ()>| {
            Error::parse(
                format!("Failed to parse declaration block: {:?}", e.kind),
                e.location.line + 1,
                e.location.column,
            )
        })?;

    Ok((selectors, declarations))
}

/// Parse CSS declarations.
fn parse_declarations(parser: &mut Parser<'_, '_>) -> Vec<PropertyDeclaration> {
    let mut declarations = vec![];

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        // Try to parse property name
        let property_name = match parser.next() {
            Ok(Token::Ident(name)) => name.to_ascii_lowercase(),
            Ok(Token::Semicolon) => continue,
            Ok(_) => {
                skip_declaration(parser);
                continue;
            }
            Err(_) => break,
        };

        // Expect colon
        if parser.expect_colon().is_err() {
            skip_declaration(parser);
            continue;
        }

        // Capture the value up to `!` or `;`
        let start = parser.position();
        let tokens = match parser.parse_until_before(Delimiter::Bang | Delimiter::Semicolon, |p| {
            collect_value_tokens(p)
        }) {
            Ok(tokens) => tokens,
            Err(_) => {
                skip_declaration(parser);
                continue;
            }
        };
        let raw = parser.slice_from(start).to_string();
        let important = parser.try_parse(cssparser::parse_important).is_ok();

        // Anything other than the end of the declaration makes it invalid
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => {}
            Ok(_) => {
                tracing::warn!("Dropping malformed declaration '{}: {}'", property_name, raw.trim());
                skip_declaration(parser);
                continue;
            }
        }

        if !is_known_property(&property_name) {
            tracing::debug!("Unknown CSS property: {}", property_name);
            continue;
        }

        match PropertyDeclaration::parse(&property_name, &tokens, &raw, important) {
            Ok(parsed) => declarations.extend(parsed),
            Err(e) => tracing::warn!("Failed to parse property '{}': {}", property_name, e),
        }
    }

    declarations
}

/// Skip an at-rule: up to its `;` or past its block.
fn skip_at_rule(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Ok(Token::CurlyBracketBlock) | Err(_) => return,
            _ => {}
        }
    }
}

/// Skip to the next rule (error recovery).
fn skip_to_next_rule(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            // The block's contents are skipped with it
            Ok(Token::CurlyBracketBlock) | Err(_) => return,
            _ => {}
        }
    }
}

/// Skip to the end of the current declaration (error recovery).
fn skip_declaration(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => return,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{PropertyId, SpecifiedValue};
    use crate::types::{Color, LengthValue, StyleValue};

    fn value_of(decls: &[PropertyDeclaration], name: &str) -> Option<StyleValue<SpecifiedValue>> {
        let id = PropertyId::lookup(name)?;
        decls.iter().rev().find(|d| d.property == id).map(|d| d.value.clone())
    }

    #[test]
    fn parse_simple_rule() {
        let rules = parse_css(".card { display: flex; }").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector.to_string(), ".card");
        assert_eq!(
            value_of(&rules[0].declarations, "display"),
            Some(StyleValue::Set(SpecifiedValue::Keyword("flex".to_string())))
        );
    }

    #[test]
    fn parse_multiple_rules() {
        let rules = parse_css("div { color: red } .box { color: blue } #main { color: green }").unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].order, 0);
        assert_eq!(rules[2].order, 2);
    }

    #[test]
    fn selector_lists_share_order() {
        let rules = parse_css("h1, h2 { margin: 0 } p { margin: 0 }").unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].order, rules[1].order);
        assert!(Arc::ptr_eq(&rules[0].declarations, &rules[1].declarations));
        assert_eq!(rules[2].order, 1);
    }

    #[test]
    fn parse_descendant_selector() {
        let rules = parse_css(".table plate .apple { color: red; }").unwrap();
        assert_eq!(rules[0].selector.parts.len(), 3);
    }

    #[test]
    fn important_flag() {
        let rules = parse_css(".a { color: red !important; width: 10px ! IMPORTANT; height: 5px }").unwrap();
        let decls = &rules[0].declarations;
        assert!(decls[0].important);
        assert!(decls[1].important);
        assert!(!decls[2].important);
    }

    #[test]
    fn invalid_rule_is_skipped() {
        let rules = parse_css(".a:unknown { color: red } .b { color: blue }").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector.to_string(), ".b");
    }

    #[test]
    fn invalid_declaration_is_dropped() {
        let rules = parse_css(".a { color: nonsense; width: 10px; colour: red; height: 1px 2px; }").unwrap();
        let decls = &rules[0].declarations;
        assert_eq!(decls.len(), 1);
        assert_eq!(
            decls[0].value,
            StyleValue::Set(SpecifiedValue::Length(LengthValue::Px(10.0)))
        );
    }

    #[test]
    fn at_rules_are_skipped() {
        let css = "@import url(x.css); @media (max-width: 10px) { .a { color: red } } .b { color: blue }";
        let rules = parse_css(css).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector.to_string(), ".b");
    }

    #[test]
    fn shorthands_expand() {
        let rules = parse_css(".box { border: 2px solid #2563EB; }").unwrap();
        let decls = &rules[0].declarations;
        assert_eq!(decls.len(), 12);
        assert_eq!(
            value_of(decls, "border-left-color"),
            Some(StyleValue::Set(SpecifiedValue::Color(Color::from_rgb8(37, 99, 235))))
        );
    }

    #[test]
    fn inline_declaration_block() {
        let decls = parse_declaration_block("color: red; background-color: rgb(173, 255, 47)");
        assert_eq!(decls.len(), 2);
        assert_eq!(
            value_of(&decls, "background-color"),
            Some(StyleValue::Set(SpecifiedValue::Color(Color::from_rgb8(173, 255, 47))))
        );
    }

    #[test]
    fn text_values_keep_functions() {
        let rules = parse_css(".grid { grid-template-columns: repeat(3,  1fr); }").unwrap();
        assert_eq!(
            value_of(&rules[0].declarations, "grid-template-columns"),
            Some(StyleValue::Set(SpecifiedValue::Text("repeat(3, 1fr)".to_string())))
        );
    }
}
