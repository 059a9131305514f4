//! Computed style with all values resolved.

use std::fmt;

use crate::style::{PropertyId, shorthand};
use crate::types::{Color, format_number};

/// A resolved property value.
///
/// Relative lengths are resolved to pixels, `currentcolor` to a color and
/// font-weight keywords to numbers. Percentages that need layout stay
/// percentages.
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedValue {
    /// Absolute length in pixels.
    Length(f32),
    /// Percentage of a layout-dependent reference.
    Percent(f32),
    /// A color.
    Color(Color),
    /// A keyword.
    Keyword(String),
    /// A unitless number.
    Number(f32),
    /// Text kept as specified.
    Text(String),
}

impl ComputedValue {
    /// The pixel value, if this is a length.
    pub fn as_px(&self) -> Option<f32> {
        match self {
            ComputedValue::Length(px) => Some(*px),
            _ => None,
        }
    }

    /// The keyword, if this is one.
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            ComputedValue::Keyword(k) => Some(k),
            _ => None,
        }
    }
}

impl fmt::Display for ComputedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputedValue::Length(px) => write!(f, "{}px", format_number(*px)),
            ComputedValue::Percent(p) => write!(f, "{}%", format_number(*p)),
            ComputedValue::Color(c) => write!(f, "{}", c),
            ComputedValue::Keyword(k) => f.write_str(k),
            ComputedValue::Number(n) => f.write_str(&format_number(*n)),
            ComputedValue::Text(t) => f.write_str(t),
        }
    }
}

/// Fully resolved style of one element.
///
/// Holds one computed value per registered longhand.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    values: Vec<ComputedValue>,
}

impl ComputedStyle {
    pub(crate) fn from_values(values: Vec<ComputedValue>) -> Self {
        debug_assert_eq!(values.len(), PropertyId::COUNT);
        Self { values }
    }

    /// Computed value of a longhand.
    pub fn get(&self, property: PropertyId) -> &ComputedValue {
        &self.values[property.index()]
    }

    pub(crate) fn set(&mut self, property: PropertyId, value: ComputedValue) {
        self.values[property.index()] = value;
    }

    /// Computed font size in pixels.
    pub fn font_size(&self) -> f32 {
        self.get(PropertyId::FONT_SIZE).as_px().unwrap_or(16.0)
    }

    /// Computed foreground color.
    pub fn color(&self) -> Color {
        match self.get(PropertyId::COLOR) {
            ComputedValue::Color(c) => *c,
            _ => Color::BLACK,
        }
    }

    /// Serialized value of a property by name, like `getPropertyValue`.
    ///
    /// Longhands and supported shorthands serialize in canonical form;
    /// unknown names yield the empty string.
    pub fn property_value(&self, name: &str) -> String {
        let name = name.trim().to_ascii_lowercase();
        if let Some(property) = PropertyId::lookup(&name) {
            return self.get(property).to_string();
        }
        shorthand::serialize(&name, self).unwrap_or_default()
    }

    /// Iterate over all longhands and their values.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &ComputedValue)> {
        PropertyId::all().zip(self.values.iter())
    }
}
