//! Specified values: declaration values parsed against a property grammar.

use std::sync::LazyLock;

use crate::parser::{ValueToken, collapse_whitespace, parse_value_tokens};
use crate::style::{PropertyId, ValueKind};
use crate::types::{Color, LengthValue};

/// A parsed, not yet computed, property value.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecifiedValue {
    /// A length or percentage.
    Length(LengthValue),
    /// An explicit color.
    Color(Color),
    /// `currentcolor`.
    CurrentColor,
    /// A keyword, lowercased.
    Keyword(String),
    /// A unitless number.
    Number(f32),
    /// Text kept as written.
    Text(String),
}

const FONT_SIZE_KEYWORDS: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large",
    "smaller", "larger",
];

const FONT_WEIGHT_KEYWORDS: &[&str] = &["normal", "bold", "bolder", "lighter"];

const BORDER_WIDTH_KEYWORDS: &[&str] = &["thin", "medium", "thick"];

/// Border line styles accepted by `border-*-style` and the border shorthands.
pub const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

impl SpecifiedValue {
    /// Parse a declaration value for a property of the given kind.
    ///
    /// `raw` is the source text of the value; it is only used by
    /// [`ValueKind::Text`] properties.
    pub fn parse(kind: ValueKind, tokens: &[ValueToken], raw: &str) -> Option<Self> {
        match kind {
            ValueKind::Text => {
                let text = collapse_whitespace(raw);
                return (!text.is_empty()).then_some(SpecifiedValue::Text(text));
            }
            ValueKind::Transition => return parse_transition(tokens).map(SpecifiedValue::Text),
            _ => {}
        }
        match tokens {
            [token] => Self::parse_token(kind, token),
            _ => None,
        }
    }

    /// Parse a single component value for a property of the given kind.
    pub fn parse_token(kind: ValueKind, token: &ValueToken) -> Option<Self> {
        match kind {
            ValueKind::Length => parse_length(token, true),
            ValueKind::BorderWidth => match token {
                ValueToken::Ident(name) if BORDER_WIDTH_KEYWORDS.contains(&name.as_str()) => {
                    Some(SpecifiedValue::Keyword(name.clone()))
                }
                ValueToken::Ident(_) | ValueToken::Percentage(_) => None,
                _ => parse_length(token, false),
            },
            ValueKind::Color => parse_color(token),
            ValueKind::Keyword => token.as_ident().map(|k| SpecifiedValue::Keyword(k.to_string())),
            ValueKind::Number => match token {
                ValueToken::Number(n) => Some(SpecifiedValue::Number(*n)),
                ValueToken::Percentage(p) => Some(SpecifiedValue::Number(p / 100.0)),
                ValueToken::Ident(k) => Some(SpecifiedValue::Keyword(k.clone())),
                _ => None,
            },
            ValueKind::FontSize => match token {
                ValueToken::Ident(name) if FONT_SIZE_KEYWORDS.contains(&name.as_str()) => {
                    Some(SpecifiedValue::Keyword(name.clone()))
                }
                ValueToken::Ident(_) => None,
                _ => parse_non_negative_length(token),
            },
            ValueKind::FontWeight => match token {
                ValueToken::Number(n) if (1.0..=1000.0).contains(n) => Some(SpecifiedValue::Number(*n)),
                ValueToken::Ident(name) if FONT_WEIGHT_KEYWORDS.contains(&name.as_str()) => {
                    Some(SpecifiedValue::Keyword(name.clone()))
                }
                _ => None,
            },
            ValueKind::LineHeight => match token {
                ValueToken::Number(n) if *n >= 0.0 => Some(SpecifiedValue::Number(*n)),
                ValueToken::Ident(name) if name == "normal" => Some(SpecifiedValue::Keyword(name.clone())),
                ValueToken::Ident(_) => None,
                _ => parse_non_negative_length(token),
            },
            ValueKind::Transition => parse_transition(std::slice::from_ref(token)).map(SpecifiedValue::Text),
            ValueKind::Text => match token {
                ValueToken::Function { source, .. } | ValueToken::Other(source) => {
                    Some(SpecifiedValue::Text(collapse_whitespace(source)))
                }
                ValueToken::Ident(name) => Some(SpecifiedValue::Text(name.clone())),
                _ => None,
            },
        }
    }
}

static INITIAL_VALUES: LazyLock<Vec<SpecifiedValue>> = LazyLock::new(|| {
    PropertyId::all()
        .map(|property| {
            let info = property.info();
            let tokens = parse_value_tokens(info.initial);
            SpecifiedValue::parse(info.kind, &tokens, info.initial)
                .unwrap_or_else(|| SpecifiedValue::Keyword(info.initial.to_string()))
        })
        .collect()
});

/// The initial value of a longhand, as a specified value.
pub fn initial_value(property: PropertyId) -> &'static SpecifiedValue {
    &INITIAL_VALUES[property.index()]
}

/// Parse a length, percentage, math function or (optionally) keyword.
fn parse_length(token: &ValueToken, allow_keyword: bool) -> Option<SpecifiedValue> {
    match token {
        ValueToken::Dimension(value, unit) => {
            LengthValue::from_dimension(*value, unit).map(SpecifiedValue::Length)
        }
        ValueToken::Number(n) if *n == 0.0 => Some(SpecifiedValue::Length(LengthValue::Zero)),
        ValueToken::Percentage(p) => Some(SpecifiedValue::Length(LengthValue::Percent(*p))),
        ValueToken::Ident(name) if allow_keyword => Some(SpecifiedValue::Keyword(name.clone())),
        ValueToken::Function { name, source, .. }
            if matches!(name.as_str(), "calc" | "min" | "max" | "clamp") =>
        {
            Some(SpecifiedValue::Text(collapse_whitespace(source)))
        }
        _ => None,
    }
}

fn parse_non_negative_length(token: &ValueToken) -> Option<SpecifiedValue> {
    parse_length(token, false)
        .filter(|value| !matches!(value, SpecifiedValue::Length(length) if length.is_negative()))
}

const TIMING_KEYWORDS: &[&str] = &[
    "ease", "linear", "ease-in", "ease-out", "ease-in-out", "step-start", "step-end",
];

/// Parse a `transition` list into its computed form.
///
/// Each item is serialized as `property duration timing-function delay`
/// with the omitted parts filled in and times in seconds, so
/// `opacity 300ms` becomes `opacity 0.3s ease 0s`.
fn parse_transition(tokens: &[ValueToken]) -> Option<String> {
    let items = tokens
        .split(|token| *token == ValueToken::Comma)
        .map(transition_item)
        .collect::<Option<Vec<_>>>()?;
    (!items.is_empty()).then(|| items.join(", "))
}

fn transition_item(tokens: &[ValueToken]) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }
    let mut property = None;
    let mut timing = None;
    let mut times = vec![];

    for token in tokens {
        match token {
            ValueToken::Dimension(value, unit) if times.len() < 2 => {
                let seconds = match unit.as_str() {
                    "s" => *value,
                    "ms" => value / 1000.0,
                    _ => return None,
                };
                if times.is_empty() && seconds < 0.0 {
                    return None;
                }
                times.push(seconds);
            }
            ValueToken::Ident(name) if TIMING_KEYWORDS.contains(&name.as_str()) && timing.is_none() => {
                timing = Some(name.clone());
            }
            ValueToken::Function { name, source, .. }
                if matches!(name.as_str(), "cubic-bezier" | "steps") && timing.is_none() =>
            {
                timing = Some(collapse_whitespace(source));
            }
            ValueToken::Ident(name) if property.is_none() => property = Some(name.clone()),
            _ => return None,
        }
    }

    let time = |seconds: f32| format!("{}s", crate::types::format_number(seconds));
    Some(format!(
        "{} {} {} {}",
        property.as_deref().unwrap_or("all"),
        time(times.first().copied().unwrap_or(0.0)),
        timing.as_deref().unwrap_or("ease"),
        time(times.get(1).copied().unwrap_or(0.0)),
    ))
}

/// Parse a color component value.
///
/// Accepts hex notation, named colors, `transparent`, `currentcolor`,
/// `rgb()`/`rgba()` and `hsl()`/`hsla()` in comma or space syntax.
pub fn parse_color(token: &ValueToken) -> Option<SpecifiedValue> {
    match token {
        ValueToken::Hash(hex) => Color::from_hex(hex).map(SpecifiedValue::Color),
        ValueToken::Ident(name) if name == "currentcolor" => Some(SpecifiedValue::CurrentColor),
        ValueToken::Ident(name) => Color::from_name(name).map(SpecifiedValue::Color),
        ValueToken::Function { name, args, .. } => {
            let components: Vec<&ValueToken> = args
                .iter()
                .filter(|t| !matches!(t, ValueToken::Comma | ValueToken::Slash))
                .collect();
            let color = match name.as_str() {
                "rgb" | "rgba" => rgb_function(&components),
                "hsl" | "hsla" => hsl_function(&components),
                _ => None,
            };
            color.map(SpecifiedValue::Color)
        }
        _ => None,
    }
}

fn rgb_function(components: &[&ValueToken]) -> Option<Color> {
    if !(3..=4).contains(&components.len()) {
        return None;
    }
    let channel = |token: &ValueToken| match token {
        ValueToken::Number(n) => Some((n / 255.0).clamp(0.0, 1.0)),
        ValueToken::Percentage(p) => Some((p / 100.0).clamp(0.0, 1.0)),
        _ => None,
    };
    let alpha = match components.get(3) {
        Some(token) => alpha_value(token)?,
        None => 1.0,
    };
    Some(Color::from_rgba(
        channel(components[0])?,
        channel(components[1])?,
        channel(components[2])?,
        alpha,
    ))
}

fn hsl_function(components: &[&ValueToken]) -> Option<Color> {
    if !(3..=4).contains(&components.len()) {
        return None;
    }
    let hue = match components[0] {
        ValueToken::Number(n) => *n,
        ValueToken::Dimension(value, unit) => match unit.as_str() {
            "deg" => *value,
            "grad" => value * 0.9,
            "rad" => value.to_degrees(),
            "turn" => value * 360.0,
            _ => return None,
        },
        _ => return None,
    };
    let fraction = |token: &ValueToken| match token {
        ValueToken::Percentage(p) | ValueToken::Number(p) => Some(p / 100.0),
        _ => None,
    };
    let alpha = match components.get(3) {
        Some(token) => alpha_value(token)?,
        None => 1.0,
    };
    Some(Color::from_hsla(
        hue,
        fraction(components[1])?,
        fraction(components[2])?,
        alpha,
    ))
}

fn alpha_value(token: &ValueToken) -> Option<f32> {
    match token {
        ValueToken::Number(n) => Some(n.clamp(0.0, 1.0)),
        ValueToken::Percentage(p) => Some((p / 100.0).clamp(0.0, 1.0)),
        _ => None,
    }
}
