//! Shorthand expansion and serialization.

use crate::parser::ValueToken;
use crate::style::specified::{BORDER_STYLES, parse_color};
use crate::style::{ComputedStyle, PropertyId, SpecifiedValue, ValueKind};
use crate::types::LengthValue;

const fn ids<const N: usize>(names: [&str; N]) -> [PropertyId; N] {
    let mut out = [PropertyId::FONT_SIZE; N];
    let mut i = 0;
    while i < N {
        out[i] = PropertyId::named(names[i]);
        i += 1;
    }
    out
}

const MARGIN: [PropertyId; 4] = ids(["margin-top", "margin-right", "margin-bottom", "margin-left"]);
const PADDING: [PropertyId; 4] =
    ids(["padding-top", "padding-right", "padding-bottom", "padding-left"]);
const BORDER_WIDTH: [PropertyId; 4] = ids([
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
]);
const BORDER_STYLE: [PropertyId; 4] = ids([
    "border-top-style",
    "border-right-style",
    "border-bottom-style",
    "border-left-style",
]);
const BORDER_COLOR: [PropertyId; 4] = ids([
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
]);
const BORDER_RADIUS: [PropertyId; 4] = ids([
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-right-radius",
    "border-bottom-left-radius",
]);
const BORDER_TOP: [PropertyId; 3] = ids(["border-top-width", "border-top-style", "border-top-color"]);
const BORDER_RIGHT: [PropertyId; 3] =
    ids(["border-right-width", "border-right-style", "border-right-color"]);
const BORDER_BOTTOM: [PropertyId; 3] =
    ids(["border-bottom-width", "border-bottom-style", "border-bottom-color"]);
const BORDER_LEFT: [PropertyId; 3] =
    ids(["border-left-width", "border-left-style", "border-left-color"]);
const BORDER: [PropertyId; 12] = ids([
    "border-top-width",
    "border-top-style",
    "border-top-color",
    "border-right-width",
    "border-right-style",
    "border-right-color",
    "border-bottom-width",
    "border-bottom-style",
    "border-bottom-color",
    "border-left-width",
    "border-left-style",
    "border-left-color",
]);
const BACKGROUND: [PropertyId; 2] = ids(["background-color", "background-image"]);
const GAP: [PropertyId; 2] = ids(["row-gap", "column-gap"]);
const OVERFLOW: [PropertyId; 2] = ids(["overflow-x", "overflow-y"]);
const FLEX: [PropertyId; 3] = ids(["flex-grow", "flex-shrink", "flex-basis"]);
const FLEX_FLOW: [PropertyId; 2] = ids(["flex-direction", "flex-wrap"]);

const FLEX_DIRECTIONS: &[&str] = &["row", "row-reverse", "column", "column-reverse"];
const FLEX_WRAPS: &[&str] = &["nowrap", "wrap", "wrap-reverse"];

/// The longhands a supported shorthand expands to.
pub fn longhands(name: &str) -> Option<&'static [PropertyId]> {
    let longhands: &'static [PropertyId] = match name {
        "margin" => &MARGIN,
        "padding" => &PADDING,
        "border" => &BORDER,
        "border-top" => &BORDER_TOP,
        "border-right" => &BORDER_RIGHT,
        "border-bottom" => &BORDER_BOTTOM,
        "border-left" => &BORDER_LEFT,
        "border-width" => &BORDER_WIDTH,
        "border-style" => &BORDER_STYLE,
        "border-color" => &BORDER_COLOR,
        "border-radius" => &BORDER_RADIUS,
        "background" => &BACKGROUND,
        "gap" => &GAP,
        "overflow" => &OVERFLOW,
        "flex" => &FLEX,
        "flex-flow" => &FLEX_FLOW,
        _ => return None,
    };
    Some(longhands)
}

/// Expand a shorthand value into longhand values.
///
/// Returns `None` when the value does not match the shorthand grammar.
pub(crate) fn expand(name: &str, tokens: &[ValueToken]) -> Option<Vec<(PropertyId, SpecifiedValue)>> {
    match name {
        "margin" => box_sides(&MARGIN, tokens),
        "padding" => box_sides(&PADDING, tokens),
        "border-width" => box_sides(&BORDER_WIDTH, tokens),
        "border-style" => box_sides(&BORDER_STYLE, tokens),
        "border-color" => box_sides(&BORDER_COLOR, tokens),
        "border-radius" => {
            // Elliptical radii after `/` are not modeled.
            let horizontal: Vec<ValueToken> = tokens
                .iter()
                .take_while(|t| **t != ValueToken::Slash)
                .cloned()
                .collect();
            box_sides(&BORDER_RADIUS, &horizontal)
        }
        "border" => {
            let side = border_side(tokens)?;
            Some(BORDER.iter().copied().zip(side.into_iter().cycle()).collect())
        }
        "border-top" => with_values(&BORDER_TOP, border_side(tokens)?),
        "border-right" => with_values(&BORDER_RIGHT, border_side(tokens)?),
        "border-bottom" => with_values(&BORDER_BOTTOM, border_side(tokens)?),
        "border-left" => with_values(&BORDER_LEFT, border_side(tokens)?),
        "background" => background(tokens),
        "gap" => pair(&GAP, tokens),
        "overflow" => pair(&OVERFLOW, tokens),
        "flex" => flex(tokens),
        "flex-flow" => flex_flow(tokens),
        _ => None,
    }
}

fn with_values<const N: usize>(
    ids: &[PropertyId; N],
    values: [SpecifiedValue; N],
) -> Option<Vec<(PropertyId, SpecifiedValue)>> {
    Some(ids.iter().copied().zip(values).collect())
}

fn parse_for(id: PropertyId, token: &ValueToken) -> Option<SpecifiedValue> {
    let value = SpecifiedValue::parse_token(id.info().kind, token)?;
    if id.info().kind == ValueKind::Keyword
        && id.name().ends_with("-style")
        && !matches!(&value, SpecifiedValue::Keyword(k) if BORDER_STYLES.contains(&k.as_str()))
    {
        return None;
    }
    Some(value)
}

/// `top [right [bottom [left]]]` with the usual fill-in rules.
fn box_sides(ids: &[PropertyId; 4], tokens: &[ValueToken]) -> Option<Vec<(PropertyId, SpecifiedValue)>> {
    if tokens.is_empty() || tokens.len() > 4 {
        return None;
    }
    let values = tokens
        .iter()
        .zip(ids.iter())
        .map(|(token, &id)| parse_for(id, token))
        .collect::<Option<Vec<_>>>()?;

    let top = values[0].clone();
    let right = values.get(1).cloned().unwrap_or_else(|| top.clone());
    let bottom = values.get(2).cloned().unwrap_or_else(|| top.clone());
    let left = values.get(3).cloned().unwrap_or_else(|| right.clone());
    with_values(ids, [top, right, bottom, left])
}

/// `<width> || <style> || <color>`, missing parts reset to initial.
fn border_side(tokens: &[ValueToken]) -> Option<[SpecifiedValue; 3]> {
    if tokens.is_empty() {
        return None;
    }

    let mut width = None;
    let mut style = None;
    let mut color = None;

    for token in tokens {
        if style.is_none()
            && let Some(name) = token.as_ident()
            && BORDER_STYLES.contains(&name)
        {
            style = Some(SpecifiedValue::Keyword(name.to_string()));
        } else if width.is_none()
            && let Some(value) = SpecifiedValue::parse_token(ValueKind::BorderWidth, token)
        {
            width = Some(value);
        } else if color.is_none()
            && let Some(value) = parse_color(token)
        {
            color = Some(value);
        } else {
            return None;
        }
    }

    Some([
        width.unwrap_or_else(|| SpecifiedValue::Keyword("medium".to_string())),
        style.unwrap_or_else(|| SpecifiedValue::Keyword("none".to_string())),
        color.unwrap_or(SpecifiedValue::CurrentColor),
    ])
}

fn background(tokens: &[ValueToken]) -> Option<Vec<(PropertyId, SpecifiedValue)>> {
    if tokens.is_empty() {
        return None;
    }

    let mut color = None;
    let mut image = None;

    for token in tokens {
        match token {
            ValueToken::Ident(name) if name == "none" && image.is_none() => {
                image = Some(SpecifiedValue::Text("none".to_string()));
            }
            ValueToken::Function { name, source, .. }
                if image.is_none() && (name == "url" || name.ends_with("gradient")) =>
            {
                image = Some(SpecifiedValue::Text(source.clone()));
            }
            _ => {
                if let Some(value) = parse_color(token) {
                    if color.is_some() {
                        return None;
                    }
                    color = Some(value);
                }
                // Position, size, repeat and box keywords are accepted but not modeled.
            }
        }
    }

    with_values(
        &BACKGROUND,
        [
            color.unwrap_or(SpecifiedValue::Color(crate::types::Color::TRANSPARENT)),
            image.unwrap_or_else(|| SpecifiedValue::Text("none".to_string())),
        ],
    )
}

fn pair(ids: &[PropertyId; 2], tokens: &[ValueToken]) -> Option<Vec<(PropertyId, SpecifiedValue)>> {
    let (first, second) = match tokens {
        [one] => (parse_for(ids[0], one)?, parse_for(ids[1], one)?),
        [one, two] => (parse_for(ids[0], one)?, parse_for(ids[1], two)?),
        _ => return None,
    };
    with_values(ids, [first, second])
}

fn flex(tokens: &[ValueToken]) -> Option<Vec<(PropertyId, SpecifiedValue)>> {
    let auto = || SpecifiedValue::Keyword("auto".to_string());

    if let [ValueToken::Ident(keyword)] = tokens {
        match keyword.as_str() {
            "none" => {
                return with_values(
                    &FLEX,
                    [SpecifiedValue::Number(0.0), SpecifiedValue::Number(0.0), auto()],
                );
            }
            "auto" => {
                return with_values(
                    &FLEX,
                    [SpecifiedValue::Number(1.0), SpecifiedValue::Number(1.0), auto()],
                );
            }
            _ => {}
        }
    }

    let mut factors = vec![];
    let mut basis = None;
    for token in tokens {
        match token {
            ValueToken::Number(n) if factors.len() < 2 && *n >= 0.0 => factors.push(*n),
            ValueToken::Ident(name) if basis.is_none() && (name == "auto" || name == "content") => {
                basis = Some(SpecifiedValue::Keyword(name.clone()));
            }
            _ if basis.is_none() => {
                basis = Some(SpecifiedValue::parse_token(ValueKind::Length, token)?);
                if matches!(basis, Some(SpecifiedValue::Keyword(_))) {
                    return None;
                }
            }
            _ => return None,
        }
    }

    if factors.is_empty() && basis.is_none() {
        return None;
    }

    let grow = factors.first().copied().unwrap_or(1.0);
    let shrink = factors.get(1).copied().unwrap_or(1.0);
    let basis = basis.unwrap_or(SpecifiedValue::Length(LengthValue::Percent(0.0)));

    with_values(
        &FLEX,
        [SpecifiedValue::Number(grow), SpecifiedValue::Number(shrink), basis],
    )
}

fn flex_flow(tokens: &[ValueToken]) -> Option<Vec<(PropertyId, SpecifiedValue)>> {
    if tokens.is_empty() || tokens.len() > 2 {
        return None;
    }

    let mut direction = None;
    let mut wrap = None;
    for token in tokens {
        let name = token.as_ident()?;
        if direction.is_none() && FLEX_DIRECTIONS.contains(&name) {
            direction = Some(name);
        } else if wrap.is_none() && FLEX_WRAPS.contains(&name) {
            wrap = Some(name);
        } else {
            return None;
        }
    }

    with_values(
        &FLEX_FLOW,
        [
            SpecifiedValue::Keyword(direction.unwrap_or("row").to_string()),
            SpecifiedValue::Keyword(wrap.unwrap_or("nowrap").to_string()),
        ],
    )
}

/// Serialize a shorthand from computed longhands.
///
/// Returns `None` for names that are not supported shorthands. Box
/// shorthands use the shortest equivalent form; `border` is empty when the
/// four sides differ.
pub(crate) fn serialize(name: &str, style: &ComputedStyle) -> Option<String> {
    let text = |id: &PropertyId| style.get(*id).to_string();
    let joined = |ids: &[PropertyId]| ids.iter().map(text).collect::<Vec<_>>().join(" ");

    let value = match name {
        "margin" | "padding" | "border-width" | "border-style" | "border-color" | "border-radius" => {
            let sides: Vec<String> = longhands(name)?.iter().map(text).collect();
            shortest_sides(&sides)
        }
        "border-top" | "border-right" | "border-bottom" | "border-left" | "flex" | "flex-flow" => {
            joined(longhands(name)?)
        }
        "border" => {
            let sides = [
                joined(&BORDER_TOP),
                joined(&BORDER_RIGHT),
                joined(&BORDER_BOTTOM),
                joined(&BORDER_LEFT),
            ];
            if sides.iter().all(|s| *s == sides[0]) {
                sides[0].clone()
            } else {
                String::new()
            }
        }
        "background" => format!(
            "{} {} repeat scroll 0% 0% / auto padding-box border-box",
            text(&BACKGROUND[0]),
            text(&BACKGROUND[1])
        ),
        "gap" | "overflow" => {
            let ids = longhands(name)?;
            let (first, second) = (text(&ids[0]), text(&ids[1]));
            if first == second {
                first
            } else {
                format!("{} {}", first, second)
            }
        }
        _ => return None,
    };
    Some(value)
}

fn shortest_sides(sides: &[String]) -> String {
    let (top, right, bottom, left) = (&sides[0], &sides[1], &sides[2], &sides[3]);
    if left == right {
        if top == bottom {
            if top == right {
                top.clone()
            } else {
                format!("{} {}", top, right)
            }
        } else {
            format!("{} {} {}", top, right, bottom)
        }
    } else {
        format!("{} {} {} {}", top, right, bottom, left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn px(value: f32) -> ValueToken {
        ValueToken::Dimension(value, "px".to_string())
    }

    fn ident(name: &str) -> ValueToken {
        ValueToken::Ident(name.to_string())
    }

    fn values(expanded: Vec<(PropertyId, SpecifiedValue)>) -> Vec<(String, SpecifiedValue)> {
        expanded
            .into_iter()
            .map(|(id, v)| (id.name().to_string(), v))
            .collect()
    }

    #[test]
    fn margin_fill_in() {
        let expanded = values(expand("margin", &[px(10.0), px(20.0)]).unwrap());
        let lengths: Vec<_> = expanded.iter().map(|(_, v)| v.clone()).collect();
        assert_eq!(
            lengths,
            vec![
                SpecifiedValue::Length(LengthValue::Px(10.0)),
                SpecifiedValue::Length(LengthValue::Px(20.0)),
                SpecifiedValue::Length(LengthValue::Px(10.0)),
                SpecifiedValue::Length(LengthValue::Px(20.0)),
            ]
        );
        assert_eq!(expanded[3].0, "margin-left");

        assert!(expand("margin", &[]).is_none());
        assert!(expand("margin", &[px(1.0), px(1.0), px(1.0), px(1.0), px(1.0)]).is_none());
    }

    #[test]
    fn border_any_order() {
        let expanded = expand("border", &[ident("dashed"), ident("red"), px(1.0)]).unwrap();
        assert_eq!(expanded.len(), 12);
        let expanded = values(expanded);
        assert_eq!(expanded[0], ("border-top-width".to_string(), SpecifiedValue::Length(LengthValue::Px(1.0))));
        assert_eq!(expanded[4], ("border-right-style".to_string(), SpecifiedValue::Keyword("dashed".to_string())));
        assert_eq!(
            expanded[11],
            ("border-left-color".to_string(), SpecifiedValue::Color(Color::from_rgb8(255, 0, 0)))
        );
    }

    #[test]
    fn border_defaults_and_errors() {
        let expanded = values(expand("border-top", &[ident("solid")]).unwrap());
        assert_eq!(expanded[0].1, SpecifiedValue::Keyword("medium".to_string()));
        assert_eq!(expanded[2].1, SpecifiedValue::CurrentColor);

        assert!(expand("border", &[ident("solid"), ident("solid")]).is_none());
        assert!(expand("border-style", &[ident("wavy")]).is_none());
    }

    #[test]
    fn flex_forms() {
        let flex_values = |tokens: &[ValueToken]| {
            expand("flex", tokens)
                .map(|v| v.into_iter().map(|(_, value)| value).collect::<Vec<_>>())
        };

        assert_eq!(
            flex_values(&[ValueToken::Number(1.0)]),
            Some(vec![
                SpecifiedValue::Number(1.0),
                SpecifiedValue::Number(1.0),
                SpecifiedValue::Length(LengthValue::Percent(0.0)),
            ])
        );
        assert_eq!(
            flex_values(&[ident("none")]),
            Some(vec![
                SpecifiedValue::Number(0.0),
                SpecifiedValue::Number(0.0),
                SpecifiedValue::Keyword("auto".to_string()),
            ])
        );
        assert_eq!(
            flex_values(&[ValueToken::Number(2.0), px(100.0)]),
            Some(vec![
                SpecifiedValue::Number(2.0),
                SpecifiedValue::Number(1.0),
                SpecifiedValue::Length(LengthValue::Px(100.0)),
            ])
        );
        assert_eq!(flex_values(&[ident("bogus")]), None);
    }

    #[test]
    fn gap_and_overflow_pairs() {
        let expanded = values(expand("gap", &[px(10.0)]).unwrap());
        assert_eq!(expanded[0].1, expanded[1].1);

        let expanded = values(expand("overflow", &[ident("hidden"), ident("auto")]).unwrap());
        assert_eq!(expanded[0], ("overflow-x".to_string(), SpecifiedValue::Keyword("hidden".to_string())));
        assert_eq!(expanded[1], ("overflow-y".to_string(), SpecifiedValue::Keyword("auto".to_string())));
    }

    #[test]
    fn shortest_side_forms() {
        let s = |v: [&str; 4]| shortest_sides(&v.map(String::from));
        assert_eq!(s(["1px", "1px", "1px", "1px"]), "1px");
        assert_eq!(s(["1px", "2px", "1px", "2px"]), "1px 2px");
        assert_eq!(s(["1px", "2px", "3px", "2px"]), "1px 2px 3px");
        assert_eq!(s(["1px", "2px", "3px", "4px"]), "1px 2px 3px 4px");
    }
}
