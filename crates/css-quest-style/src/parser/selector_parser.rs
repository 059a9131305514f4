//! Selector parsing.
//!
//! Selectors are tokenized with whitespace preserved, since whitespace is
//! itself the descendant combinator.

use cssparser::{ParseError as CssParseError, ParseErrorKind, Parser, ParserInput, Token};

use crate::selector::{
    AttributeOperator, AttributeSelector, Combinator, NthExpr, PseudoClass, Selector,
    SelectorList, SelectorPart, TypeSelector,
};
use crate::{Error, Result};

type SelectorResult<'i, T> = std::result::Result<T, CssParseError<'i, String>>;

/// Legacy pseudo-elements that may be written with a single colon.
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["after", "before", "first-letter", "first-line"];

/// Parse a comma-separated selector list.
///
/// # Example
///
/// ```
/// use css_quest_style::parser::parse_selector_list;
///
/// let list = parse_selector_list(".table > plate, .apple:first-child").unwrap();
/// assert_eq!(list.len(), 2);
/// assert!(parse_selector_list(".table >").is_err());
/// ```
pub fn parse_selector_list(text: &str) -> Result<SelectorList> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    parse_list(&mut parser).map_err(|e| {
        let message = match e.kind {
            ParseErrorKind::Custom(message) => message,
            ParseErrorKind::Basic(basic) => format!("{:?}", basic),
        };
        Error::invalid_selector(text.trim(), message)
    })
}

/// Parse a single complex selector (no commas).
pub fn parse_selector(text: &str) -> Result<Selector> {
    let mut list = parse_selector_list(text)?;
    if list.len() != 1 {
        return Err(Error::invalid_selector(text.trim(), "Expected a single selector"));
    }
    Ok(list.0.remove(0))
}

/// Accumulates compound selectors and combinators for one complex selector.
#[derive(Default)]
struct SelectorBuilder {
    parts: Vec<SelectorPart>,
    combinators: Vec<Combinator>,
    current: SelectorPart,
    pending: Option<Combinator>,
    pseudo_element: Option<String>,
}

impl SelectorBuilder {
    /// Close the current compound, if any.
    fn end_compound(&mut self) {
        if !self.current.is_empty() {
            self.parts.push(std::mem::take(&mut self.current));
        }
    }

    fn whitespace(&mut self) {
        if !self.current.is_empty() {
            self.end_compound();
            self.pending = Some(Combinator::Descendant);
        }
    }

    fn combinator<'i>(&mut self, parser: &Parser<'i, '_>, combinator: Combinator) -> SelectorResult<'i, ()> {
        self.end_compound();
        if self.parts.is_empty() {
            return Err(parser.new_custom_error("Selector cannot start with a combinator".to_string()));
        }
        if matches!(self.pending, Some(c) if c != Combinator::Descendant) {
            return Err(parser.new_custom_error("Consecutive combinators".to_string()));
        }
        if self.pseudo_element.is_some() {
            return Err(parser.new_custom_error("Nothing may follow a pseudo-element".to_string()));
        }
        self.pending = Some(combinator);
        Ok(())
    }

    /// Prepare to add a simple selector to the current compound.
    fn begin_simple<'i>(&mut self, parser: &Parser<'i, '_>) -> SelectorResult<'i, ()> {
        if self.pseudo_element.is_some() {
            return Err(parser.new_custom_error("Nothing may follow a pseudo-element".to_string()));
        }
        if self.current.is_empty()
            && let Some(combinator) = self.pending.take()
        {
            self.combinators.push(combinator);
        }
        Ok(())
    }

    fn finish<'i>(mut self, parser: &Parser<'i, '_>) -> SelectorResult<'i, Selector> {
        self.end_compound();
        if self.parts.is_empty() {
            return Err(parser.new_custom_error("Empty selector".to_string()));
        }
        if matches!(self.pending, Some(c) if c != Combinator::Descendant) {
            return Err(parser.new_custom_error("Selector ends with a combinator".to_string()));
        }
        Ok(Selector {
            parts: self.parts,
            combinators: self.combinators,
            pseudo_element: self.pseudo_element,
        })
    }
}

fn parse_list<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, SelectorList> {
    let mut selectors = vec![];
    let mut builder = SelectorBuilder::default();

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => builder.whitespace(),
            Token::Comma => {
                let finished = std::mem::take(&mut builder).finish(parser)?;
                selectors.push(finished);
            }
            Token::Delim('>') => builder.combinator(parser, Combinator::Child)?,
            Token::Delim('+') => builder.combinator(parser, Combinator::AdjacentSibling)?,
            Token::Delim('~') => builder.combinator(parser, Combinator::GeneralSibling)?,
            token => {
                builder.begin_simple(parser)?;
                if let Some(pseudo_element) = parse_simple(token, parser, &mut builder.current)? {
                    if builder.current.is_empty() {
                        builder.current = SelectorPart::universal();
                    }
                    builder.pseudo_element = Some(pseudo_element);
                }
            }
        }
    }

    selectors.push(builder.finish(parser)?);
    Ok(SelectorList(selectors))
}

/// Apply one simple selector token to a compound.
///
/// Returns the pseudo-element name when the token introduced one.
fn parse_simple<'i>(
    token: Token<'i>,
    parser: &mut Parser<'i, '_>,
    part: &mut SelectorPart,
) -> SelectorResult<'i, Option<String>> {
    match token {
        Token::Ident(name) => {
            if !part.is_empty() {
                return Err(parser.new_custom_error(format!(
                    "Type selector '{}' must come first in a compound selector",
                    name
                )));
            }
            part.type_selector = Some(TypeSelector::Type(name.to_ascii_lowercase()));
        }

        Token::Delim('*') => {
            if !part.is_empty() {
                return Err(parser.new_custom_error(
                    "Universal selector must come first in a compound selector".to_string(),
                ));
            }
            part.type_selector = Some(TypeSelector::Universal);
        }

        Token::Delim('.') => match parser.next_including_whitespace()?.clone() {
            Token::Ident(class) => part.classes.push(class.to_string()),
            _ => return Err(parser.new_custom_error("Expected class name after '.'".to_string())),
        },

        Token::IDHash(id) => {
            if part.id.is_some() {
                return Err(parser.new_custom_error(format!("Duplicate ID selector '#{}'", id)));
            }
            part.id = Some(id.to_string());
        }

        Token::Hash(id) => {
            return Err(parser.new_custom_error(format!("Invalid ID selector '#{}'", id)));
        }

        Token::SquareBracketBlock => {
            let attribute = parser.parse_nested_block(|p| parse_attribute(p))?;
            part.attributes.push(attribute);
        }

        Token::Colon => return parse_pseudo(parser, part),

        other => {
            return Err(parser.new_custom_error(format!("Unexpected token {:?}", other)));
        }
    }

    Ok(None)
}

fn parse_pseudo<'i>(
    parser: &mut Parser<'i, '_>,
    part: &mut SelectorPart,
) -> SelectorResult<'i, Option<String>> {
    match parser.next_including_whitespace()?.clone() {
        Token::Colon => match parser.next_including_whitespace()?.clone() {
            Token::Ident(name) => Ok(Some(name.to_ascii_lowercase())),
            _ => Err(parser.new_custom_error("Expected pseudo-element name after '::'".to_string())),
        },

        Token::Ident(name) => {
            let lower = name.to_ascii_lowercase();
            if LEGACY_PSEUDO_ELEMENTS.contains(&lower.as_str()) {
                return Ok(Some(lower));
            }
            let pseudo = PseudoClass::from_css(&lower)
                .ok_or_else(|| parser.new_custom_error(format!("Unknown pseudo-class ':{}'", name)))?;
            part.pseudo_classes.push(pseudo);
            Ok(None)
        }

        Token::Function(name) => {
            let lower = name.to_ascii_lowercase();
            let pseudo = match lower.as_str() {
                "nth-child" => PseudoClass::NthChild(parser.parse_nested_block(|p| parse_nth_expr(p))?),
                "nth-last-child" => {
                    PseudoClass::NthLastChild(parser.parse_nested_block(|p| parse_nth_expr(p))?)
                }
                "nth-of-type" => {
                    PseudoClass::NthOfType(parser.parse_nested_block(|p| parse_nth_expr(p))?)
                }
                "nth-last-of-type" => {
                    PseudoClass::NthLastOfType(parser.parse_nested_block(|p| parse_nth_expr(p))?)
                }
                "not" => PseudoClass::Not(Box::new(parser.parse_nested_block(|p| parse_negation(p))?)),
                _ => {
                    return Err(parser.new_custom_error(format!("Unknown pseudo-class ':{}()'", name)));
                }
            };
            part.pseudo_classes.push(pseudo);
            Ok(None)
        }

        _ => Err(parser.new_custom_error("Expected pseudo-class name after ':'".to_string())),
    }
}

/// Parse the compound selector argument of `:not()`.
fn parse_negation<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, SelectorPart> {
    let mut part = SelectorPart::default();
    parser.skip_whitespace();

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };
        if matches!(token, Token::WhiteSpace(_)) {
            parser.expect_exhausted()?;
            break;
        }
        if parse_simple(token, parser, &mut part)?.is_some() {
            return Err(parser.new_custom_error("Pseudo-elements are not allowed in :not()".to_string()));
        }
    }

    if part.is_empty() {
        return Err(parser.new_custom_error("Empty :not() argument".to_string()));
    }
    Ok(part)
}

/// Parse An+B for the nth family.
fn parse_nth_expr<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, NthExpr> {
    let (a, b) = cssparser::parse_nth(parser)?;
    parser.expect_exhausted()?;
    Ok(NthExpr::new(a, b))
}

/// Parse the inside of `[...]`.
fn parse_attribute<'i>(parser: &mut Parser<'i, '_>) -> SelectorResult<'i, AttributeSelector> {
    let name = parser.expect_ident()?.to_ascii_lowercase();
    if parser.is_exhausted() {
        return Ok(AttributeSelector::exists(name));
    }

    let operator = match parser.next()?.clone() {
        Token::Delim('=') => AttributeOperator::Equals,
        Token::IncludeMatch => AttributeOperator::Includes,
        Token::DashMatch => AttributeOperator::DashMatch,
        Token::PrefixMatch => AttributeOperator::Prefix,
        Token::SuffixMatch => AttributeOperator::Suffix,
        Token::SubstringMatch => AttributeOperator::Substring,
        other => {
            return Err(parser.new_custom_error(format!("Unexpected {:?} in attribute selector", other)));
        }
    };

    let value = match parser.next()?.clone() {
        Token::Ident(v) | Token::QuotedString(v) => v.to_string(),
        _ => return Err(parser.new_custom_error("Expected attribute value".to_string())),
    };

    let mut attribute = AttributeSelector::with_value(name, operator, value);
    if !parser.is_exhausted() {
        let flag = parser.expect_ident()?.clone();
        if flag.eq_ignore_ascii_case("i") {
            attribute.case_insensitive = true;
        } else if !flag.eq_ignore_ascii_case("s") {
            return Err(parser.new_custom_error(format!("Unknown attribute flag '{}'", flag)));
        }
    }
    parser.expect_exhausted()?;

    Ok(attribute)
}
