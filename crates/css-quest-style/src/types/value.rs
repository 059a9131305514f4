//! Declared values and lengths.
//!
//! ```
//! use css_quest_style::prelude::*;
//!
//! // 1.5em against a 14px font, 2rem against a 16px root
//! assert_eq!(LengthValue::Em(1.5).to_px(14.0, 16.0), Some(21.0));
//! assert_eq!(LengthValue::Rem(2.0).to_px(14.0, 16.0), Some(32.0));
//! assert_eq!(LengthValue::Percent(50.0).to_px(14.0, 16.0), None);
//! ```

use std::fmt;

/// A declared value, or one of the CSS-wide keywords.
///
/// ```
/// use css_quest_style::prelude::StyleValue;
///
/// // `color: inherit` under a parent color of 42
/// assert_eq!(StyleValue::<i32>::Inherit.resolve(Some(&42), &0), 42);
/// // `color: initial` ignores the parent
/// assert_eq!(StyleValue::<i32>::Initial.resolve(Some(&42), &0), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue<T> {
    Set(T),
    Inherit,
    Initial,
    /// `inherit` for inherited properties, `initial` for the rest. The
    /// resolver decides which before calling [`resolve`](Self::resolve).
    Unset,
}

impl<T: Clone> StyleValue<T> {
    /// Pick the value for an element given its parent's value and the
    /// property's initial value. `Unset` resolves like `Inherit`.
    pub fn resolve(&self, inherited: Option<&T>, initial: &T) -> T {
        match self {
            StyleValue::Set(value) => value.clone(),
            StyleValue::Initial => initial.clone(),
            StyleValue::Inherit | StyleValue::Unset => inherited.unwrap_or(initial).clone(),
        }
    }
}

impl<T> From<T> for StyleValue<T> {
    fn from(value: T) -> Self {
        StyleValue::Set(value)
    }
}

/// A length as declared.
///
/// Absolute units are folded into `Px` at parse time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthValue {
    Px(f32),
    /// Multiple of the element's font size.
    Em(f32),
    /// Multiple of the root element's font size.
    Rem(f32),
    /// Percentage of a reference size only known after layout.
    Percent(f32),
    Zero,
}

impl LengthValue {
    /// Whether the length is below zero.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Px(v) | Self::Em(v) | Self::Rem(v) | Self::Percent(v) => *v < 0.0,
            Self::Zero => false,
        }
    }

    /// Build a length from a number and a unit, if the unit is supported.
    pub fn from_dimension(value: f32, unit: &str) -> Option<Self> {
        let px = match unit.to_ascii_lowercase().as_str() {
            "px" => value,
            "em" => return Some(Self::Em(value)),
            "rem" => return Some(Self::Rem(value)),
            "pt" => value * 4.0 / 3.0,
            "pc" => value * 16.0,
            "in" => value * 96.0,
            "cm" => value * 96.0 / 2.54,
            "mm" => value * 96.0 / 25.4,
            "q" => value * 96.0 / 101.6,
            _ => return None,
        };
        Some(Self::Px(px))
    }

    /// Resolve to pixels against the element's and the root's font size.
    ///
    /// Percentages need a containing block and stay unresolved (`None`).
    pub fn to_px(&self, font_size: f32, root_font_size: f32) -> Option<f32> {
        match self {
            LengthValue::Px(v) => Some(*v),
            LengthValue::Em(v) => Some(v * font_size),
            LengthValue::Rem(v) => Some(v * root_font_size),
            LengthValue::Percent(_) => None,
            LengthValue::Zero => Some(0.0),
        }
    }
}

impl fmt::Display for LengthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthValue::Px(v) => write!(f, "{}px", format_number(*v)),
            LengthValue::Em(v) => write!(f, "{}em", format_number(*v)),
            LengthValue::Rem(v) => write!(f, "{}rem", format_number(*v)),
            LengthValue::Percent(v) => write!(f, "{}%", format_number(*v)),
            LengthValue::Zero => write!(f, "0px"),
        }
    }
}

/// Format a number the way computed styles print it: no trailing zeros,
/// at most three decimals, no negative zero.
pub fn format_number(value: f32) -> String {
    let rounded = (value as f64 * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.3}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}
