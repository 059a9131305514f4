//! Textual equivalence of computed and expected values.

use css_quest_style::parser::parse_value_tokens;
use css_quest_style::style::{SpecifiedValue, parse_color};

/// Units stripped from numeric tokens before comparison.
///
/// No conversion happens: `1rem` and `16px` stay different.
const STRIPPED_UNITS: &[&str] = &["rem", "px", "em"];

/// Decides whether two textual CSS values are equivalent.
///
/// Values are split into tokens, ignoring whitespace; `(`, `)`, `,` and `/`
/// are tokens of their own. A numeric token loses a trailing `px`, `rem` or
/// `em`. The token sequences must then be identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueNormalizer {
    canonicalize_expected_colors: bool,
}

impl ValueNormalizer {
    /// Create a normalizer with the default (exact color) behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also canonicalize an expected value that is a single color, so
    /// `"red"` or `"#f00"` match `rgb(255, 0, 0)`.
    pub fn canonicalize_expected_colors(mut self, enabled: bool) -> Self {
        self.canonicalize_expected_colors = enabled;
        self
    }

    /// Check whether `actual` and `expected` denote the same value.
    pub fn equivalent(&self, actual: &str, expected: &str) -> bool {
        let expected = self.prepare_expected(expected);
        tokens(actual) == tokens(&expected)
    }

    /// Normalized token form of a value, joined by single spaces.
    pub fn normalize(&self, value: &str) -> String {
        tokens(value).join(" ")
    }

    fn prepare_expected(&self, expected: &str) -> String {
        if self.canonicalize_expected_colors
            && let Some(color) = single_color(expected)
        {
            return color;
        }
        expected.to_string()
    }
}

fn single_color(text: &str) -> Option<String> {
    match parse_value_tokens(text).as_slice() {
        [token] => match parse_color(token)? {
            SpecifiedValue::Color(color) => Some(color.to_css_string()),
            _ => None,
        },
        _ => None,
    }
}

fn tokens(value: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut Vec<String>| {
        if !word.is_empty() {
            out.push(strip_unit(word).to_string());
            word.clear();
        }
    };

    for c in value.chars() {
        match c {
            c if c.is_whitespace() => flush(&mut word, &mut out),
            '(' | ')' | ',' | '/' => {
                flush(&mut word, &mut out);
                out.push(c.to_string());
            }
            c => word.push(c),
        }
    }
    flush(&mut word, &mut out);
    out
}

/// Strip a length unit from a numeric token (`10px` → `10`).
fn strip_unit(token: &str) -> &str {
    for unit in STRIPPED_UNITS {
        if token.len() > unit.len() {
            let split = token.len() - unit.len();
            if token.is_char_boundary(split)
                && token[split..].eq_ignore_ascii_case(unit)
                && is_number(&token[..split])
            {
                return &token[..split];
            }
        }
    }
    token
}

fn is_number(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}
