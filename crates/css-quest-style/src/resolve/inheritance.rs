//! Property inheritance and resolution to computed values.

use crate::resolve::cascade::CascadedValues;
use crate::style::{ComputedStyle, ComputedValue, PropertyId, SpecifiedValue, ValueKind, initial_value};
use crate::types::{Color, LengthValue, StyleValue};

const POSITION: PropertyId = PropertyId::named("position");
const FLOAT: PropertyId = PropertyId::named("float");

const BORDER_SIDES: [(PropertyId, PropertyId); 4] = [
    (PropertyId::named("border-top-style"), PropertyId::named("border-top-width")),
    (PropertyId::named("border-right-style"), PropertyId::named("border-right-width")),
    (PropertyId::named("border-bottom-style"), PropertyId::named("border-bottom-width")),
    (PropertyId::named("border-left-style"), PropertyId::named("border-left-width")),
];

/// Per-element inputs to value computation that do not come from the
/// cascade.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext {
    /// Font size of the document element, for `rem`.
    pub root_font_size: f32,
    /// Size of the `medium` font-size keyword and of the root's parent.
    pub base_font_size: f32,
    /// Whether the element's display must be blockified (root element,
    /// flex or grid items).
    pub blockify: bool,
}

impl ResolveContext {
    /// Context for the document element.
    pub fn root(base_font_size: f32) -> Self {
        Self {
            root_font_size: base_font_size,
            base_font_size,
            blockify: true,
        }
    }
}

/// Resolve cascaded values to a [`ComputedStyle`], handling inheritance.
///
/// - Relative lengths (em, rem) are converted to pixels; box percentages
///   stay percentages
/// - Inherit/Initial/Unset are resolved based on parent values
/// - Initial values are applied where properties are not declared
pub fn resolve_properties(
    cascaded: &CascadedValues,
    parent: Option<&ComputedStyle>,
    context: &ResolveContext,
) -> ComputedStyle {
    let parent_font_size = parent.map_or(context.base_font_size, |p| p.font_size());
    let parent_color = parent.map_or(Color::BLACK, |p| p.color());

    let mut resolver = Resolver {
        cascaded,
        parent,
        context,
        parent_font_size,
        font_size: parent_font_size,
        color: parent_color,
    };

    // Font size first (needed for em units), then color (needed for
    // currentcolor). While computing `color` itself, currentcolor is the
    // parent's color.
    let font_size = resolver.resolve(PropertyId::FONT_SIZE);
    resolver.font_size = font_size.as_px().unwrap_or(parent_font_size);
    let color = resolver.resolve(PropertyId::COLOR);
    if let ComputedValue::Color(c) = &color {
        resolver.color = *c;
    }

    let values = PropertyId::all()
        .map(|property| {
            if property == PropertyId::FONT_SIZE {
                font_size.clone()
            } else if property == PropertyId::COLOR {
                color.clone()
            } else {
                resolver.resolve(property)
            }
        })
        .collect();

    let mut computed = ComputedStyle::from_values(values);
    zero_hidden_borders(&mut computed);
    if context.blockify || is_out_of_flow(&computed) {
        blockify_display(&mut computed);
    }
    computed
}

struct Resolver<'a> {
    cascaded: &'a CascadedValues,
    parent: Option<&'a ComputedStyle>,
    context: &'a ResolveContext,
    parent_font_size: f32,
    font_size: f32,
    color: Color,
}

impl Resolver<'_> {
    fn resolve(&self, property: PropertyId) -> ComputedValue {
        let inherited = || self.parent.map(|p| p.get(property).clone());
        match self.cascaded.get(property) {
            Some(StyleValue::Set(value)) => self.compute(property, value),
            Some(StyleValue::Inherit) => inherited().unwrap_or_else(|| self.compute_initial(property)),
            Some(StyleValue::Initial) => self.compute_initial(property),
            Some(StyleValue::Unset) | None if property.info().inherited => {
                inherited().unwrap_or_else(|| self.compute_initial(property))
            }
            Some(StyleValue::Unset) | None => self.compute_initial(property),
        }
    }

    fn compute_initial(&self, property: PropertyId) -> ComputedValue {
        if property == PropertyId::FONT_SIZE {
            return ComputedValue::Length(self.context.base_font_size);
        }
        self.compute(property, initial_value(property))
    }

    fn compute(&self, property: PropertyId, value: &SpecifiedValue) -> ComputedValue {
        match (property.info().kind, value) {
            (ValueKind::FontSize, value) => self.font_size(value),
            (ValueKind::FontWeight, value) => self.font_weight(value),
            (ValueKind::LineHeight, SpecifiedValue::Number(n)) => ComputedValue::Length(n * self.font_size),
            (ValueKind::LineHeight, SpecifiedValue::Length(LengthValue::Percent(p))) => {
                ComputedValue::Length(p / 100.0 * self.font_size)
            }
            (ValueKind::BorderWidth, SpecifiedValue::Keyword(k)) => {
                ComputedValue::Length(border_width_keyword(k))
            }
            (_, SpecifiedValue::Length(length)) => self.length(length),
            (_, SpecifiedValue::Color(c)) => ComputedValue::Color(*c),
            (_, SpecifiedValue::CurrentColor) => ComputedValue::Color(self.color),
            (_, SpecifiedValue::Keyword(k)) => ComputedValue::Keyword(k.clone()),
            (_, SpecifiedValue::Number(n)) => ComputedValue::Number(*n),
            (_, SpecifiedValue::Text(t)) => ComputedValue::Text(t.clone()),
        }
    }

    fn length(&self, length: &LengthValue) -> ComputedValue {
        match length {
            LengthValue::Percent(p) => ComputedValue::Percent(*p),
            other => ComputedValue::Length(
                other
                    .to_px(self.font_size, self.context.root_font_size)
                    .unwrap_or(0.0),
            ),
        }
    }

    /// Font sizes resolve against the parent's font size.
    fn font_size(&self, value: &SpecifiedValue) -> ComputedValue {
        let parent = self.parent_font_size;
        let px = match value {
            SpecifiedValue::Length(LengthValue::Em(v)) => v * parent,
            SpecifiedValue::Length(LengthValue::Percent(p)) => p / 100.0 * parent,
            SpecifiedValue::Length(length) => length
                .to_px(parent, self.context.root_font_size)
                .unwrap_or(parent),
            SpecifiedValue::Keyword(keyword) => match keyword.as_str() {
                "smaller" => parent / 1.2,
                "larger" => parent * 1.2,
                other => font_size_keyword(other).map_or(parent, |ratio| ratio * self.context.base_font_size),
            },
            SpecifiedValue::Text(t) => return ComputedValue::Text(t.clone()),
            _ => parent,
        };
        ComputedValue::Length(px)
    }

    fn font_weight(&self, value: &SpecifiedValue) -> ComputedValue {
        let parent_weight = match self.parent.map(|p| p.get(PropertyId::FONT_WEIGHT)) {
            Some(ComputedValue::Number(n)) => *n,
            _ => 400.0,
        };
        let weight = match value {
            SpecifiedValue::Number(n) => *n,
            SpecifiedValue::Keyword(keyword) => match keyword.as_str() {
                "bold" => 700.0,
                "bolder" => bolder(parent_weight),
                "lighter" => lighter(parent_weight),
                _ => 400.0,
            },
            _ => 400.0,
        };
        ComputedValue::Number(weight)
    }
}

fn font_size_keyword(keyword: &str) -> Option<f32> {
    let ratio = match keyword {
        "xx-small" => 0.5625,
        "x-small" => 0.625,
        "small" => 0.8125,
        "medium" => 1.0,
        "large" => 1.125,
        "x-large" => 1.5,
        "xx-large" => 2.0,
        "xxx-large" => 3.0,
        _ => return None,
    };
    Some(ratio)
}

fn border_width_keyword(keyword: &str) -> f32 {
    match keyword {
        "thin" => 1.0,
        "thick" => 5.0,
        _ => 3.0,
    }
}

fn bolder(parent: f32) -> f32 {
    if parent < 350.0 {
        400.0
    } else if parent < 550.0 {
        700.0
    } else if parent < 900.0 {
        900.0
    } else {
        parent
    }
}

fn lighter(parent: f32) -> f32 {
    if parent < 100.0 {
        parent
    } else if parent < 550.0 {
        100.0
    } else if parent < 750.0 {
        400.0
    } else {
        700.0
    }
}

/// A side whose border style is `none` or `hidden` has a zero width.
fn zero_hidden_borders(computed: &mut ComputedStyle) {
    for (style, width) in BORDER_SIDES {
        if matches!(computed.get(style).as_keyword(), Some("none" | "hidden")) {
            computed.set(width, ComputedValue::Length(0.0));
        }
    }
}

fn is_out_of_flow(computed: &ComputedStyle) -> bool {
    !matches!(computed.get(FLOAT).as_keyword(), Some("none") | None)
        || matches!(computed.get(POSITION).as_keyword(), Some("absolute" | "fixed"))
}

fn blockify_display(computed: &mut ComputedStyle) {
    let blockified = match computed.get(PropertyId::DISPLAY).as_keyword() {
        Some("inline" | "inline-block" | "run-in") => "block",
        Some("inline-flex") => "flex",
        Some("inline-grid") => "grid",
        Some("inline-table") => "table",
        Some(
            "table-row-group" | "table-header-group" | "table-footer-group" | "table-row"
            | "table-cell" | "table-column" | "table-column-group" | "table-caption",
        ) => "block",
        _ => return,
    };
    computed.set(PropertyId::DISPLAY, ComputedValue::Keyword(blockified.to_string()));
}
