//! Owned component values of a declaration.
//!
//! Declaration values are captured as a flat token list so that property
//! parsing and shorthand expansion can work without holding a parser borrow.

use cssparser::{ParseError as CssParseError, Parser, Token};

/// One component value of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueToken {
    /// An identifier, lowercased.
    Ident(String),
    /// A unitless number.
    Number(f32),
    /// A percentage, as the number before `%`.
    Percentage(f32),
    /// A number with a unit (unit lowercased).
    Dimension(f32, String),
    /// A `#hash` token, without the `#`.
    Hash(String),
    /// A quoted string.
    String(String),
    /// A function with its arguments and full source text.
    Function {
        name: String,
        args: Vec<ValueToken>,
        source: String,
    },
    /// `,`
    Comma,
    /// `/`
    Slash,
    /// Anything else, as source text.
    Other(String),
}

impl ValueToken {
    /// The identifier, if this is one.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            ValueToken::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Check for a specific identifier.
    pub fn is_ident(&self, name: &str) -> bool {
        self.as_ident() == Some(name)
    }
}

/// Consume every remaining component value of the parser.
pub(crate) fn collect_value_tokens<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Vec<ValueToken>, CssParseError<'i, ()>> {
    let mut tokens = vec![];

    loop {
        parser.skip_whitespace();
        let start = parser.position();
        let token = match parser.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        let value = match token {
            Token::Ident(name) => ValueToken::Ident(name.to_ascii_lowercase()),
            Token::Number { value, .. } => ValueToken::Number(value),
            Token::Percentage { unit_value, .. } => ValueToken::Percentage(unit_value * 100.0),
            Token::Dimension { value, unit, .. } => {
                ValueToken::Dimension(value, unit.to_ascii_lowercase())
            }
            Token::Hash(hash) | Token::IDHash(hash) => ValueToken::Hash(hash.to_string()),
            Token::QuotedString(s) => ValueToken::String(s.to_string()),
            Token::UnquotedUrl(url) => ValueToken::Function {
                name: "url".to_string(),
                args: vec![ValueToken::String(url.to_string())],
                source: parser.slice_from(start).to_string(),
            },
            Token::Comma => ValueToken::Comma,
            Token::Delim('/') => ValueToken::Slash,
            Token::Function(name) => {
                let name = name.to_ascii_lowercase();
                let args = parser.parse_nested_block(|p| collect_value_tokens(p))?;
                ValueToken::Function {
                    name,
                    args,
                    source: parser.slice_from(start).to_string(),
                }
            }
            _ => ValueToken::Other(parser.slice_from(start).to_string()),
        };
        tokens.push(value);
    }

    Ok(tokens)
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssparser::ParserInput;

    fn tokens(css: &str) -> Vec<ValueToken> {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        collect_value_tokens(&mut parser).unwrap()
    }

    #[test]
    fn collects_component_values() {
        assert_eq!(
            tokens("10PX solid #FFF"),
            vec![
                ValueToken::Dimension(10.0, "px".to_string()),
                ValueToken::Ident("solid".to_string()),
                ValueToken::Hash("FFF".to_string()),
            ]
        );
        assert_eq!(tokens("50%"), vec![ValueToken::Percentage(50.0)]);
    }

    #[test]
    fn functions_keep_source_and_arguments() {
        let result = tokens("rgb(1, 2, 3) url(a.png)");
        match &result[0] {
            ValueToken::Function { name, args, source } => {
                assert_eq!(name, "rgb");
                assert_eq!(args.len(), 5);
                assert_eq!(source, "rgb(1, 2, 3)");
            }
            other => panic!("unexpected token {:?}", other),
        }
        match &result[1] {
            ValueToken::Function { name, source, .. } => {
                assert_eq!(name, "url");
                assert_eq!(source, "url(a.png)");
            }
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn whitespace_collapse() {
        assert_eq!(collapse_whitespace("  1px \n  solid   red "), "1px solid red");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
