//! Property registry.
//!
//! Every longhand the cascade knows about is listed once, with its
//! inheritance flag, initial value and value grammar. Properties not in the
//! registry are dropped at parse time and read back as the empty string.

use std::fmt;

/// Value grammar of a longhand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A length, a percentage or a keyword such as `auto`.
    Length,
    /// A border width: a length or `thin`/`medium`/`thick`.
    BorderWidth,
    /// A color or `currentcolor`.
    Color,
    /// A single keyword.
    Keyword,
    /// A number or a keyword such as `auto`.
    Number,
    /// A font size: a length, a percentage or a size keyword.
    FontSize,
    /// A font weight: a number or a weight keyword.
    FontWeight,
    /// A line height: `normal`, a number, a length or a percentage.
    LineHeight,
    /// A `transition` list.
    Transition,
    /// Free-form text kept as written, whitespace collapsed.
    Text,
}

/// Static description of a longhand property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyInfo {
    /// CSS name.
    pub name: &'static str,
    /// Whether the property inherits by default.
    pub inherited: bool,
    /// Initial value as CSS text.
    pub initial: &'static str,
    /// Value grammar.
    pub kind: ValueKind,
}

const fn longhand(
    name: &'static str,
    inherited: bool,
    initial: &'static str,
    kind: ValueKind,
) -> PropertyInfo {
    PropertyInfo {
        name,
        inherited,
        initial,
        kind,
    }
}

use ValueKind::*;

const PROPERTIES: &[PropertyInfo] = &[
    // Font size and color come first: other properties resolve against them.
    longhand("font-size", true, "medium", FontSize),
    longhand("color", true, "black", Color),
    // Display and positioning
    longhand("display", false, "inline", Keyword),
    longhand("position", false, "static", Keyword),
    longhand("top", false, "auto", Length),
    longhand("right", false, "auto", Length),
    longhand("bottom", false, "auto", Length),
    longhand("left", false, "auto", Length),
    longhand("z-index", false, "auto", Number),
    longhand("float", false, "none", Keyword),
    longhand("clear", false, "none", Keyword),
    longhand("box-sizing", false, "content-box", Keyword),
    longhand("visibility", true, "visible", Keyword),
    longhand("opacity", false, "1", Number),
    longhand("overflow-x", false, "visible", Keyword),
    longhand("overflow-y", false, "visible", Keyword),
    longhand("vertical-align", false, "baseline", Length),
    // Sizing
    longhand("width", false, "auto", Length),
    longhand("height", false, "auto", Length),
    longhand("min-width", false, "auto", Length),
    longhand("min-height", false, "auto", Length),
    longhand("max-width", false, "none", Length),
    longhand("max-height", false, "none", Length),
    // Box model
    longhand("margin-top", false, "0px", Length),
    longhand("margin-right", false, "0px", Length),
    longhand("margin-bottom", false, "0px", Length),
    longhand("margin-left", false, "0px", Length),
    longhand("padding-top", false, "0px", Length),
    longhand("padding-right", false, "0px", Length),
    longhand("padding-bottom", false, "0px", Length),
    longhand("padding-left", false, "0px", Length),
    // Borders
    longhand("border-top-width", false, "medium", BorderWidth),
    longhand("border-right-width", false, "medium", BorderWidth),
    longhand("border-bottom-width", false, "medium", BorderWidth),
    longhand("border-left-width", false, "medium", BorderWidth),
    longhand("border-top-style", false, "none", Keyword),
    longhand("border-right-style", false, "none", Keyword),
    longhand("border-bottom-style", false, "none", Keyword),
    longhand("border-left-style", false, "none", Keyword),
    longhand("border-top-color", false, "currentcolor", Color),
    longhand("border-right-color", false, "currentcolor", Color),
    longhand("border-bottom-color", false, "currentcolor", Color),
    longhand("border-left-color", false, "currentcolor", Color),
    longhand("border-top-left-radius", false, "0px", Length),
    longhand("border-top-right-radius", false, "0px", Length),
    longhand("border-bottom-right-radius", false, "0px", Length),
    longhand("border-bottom-left-radius", false, "0px", Length),
    longhand("outline", false, "none", Text),
    // Background and effects
    longhand("background-color", false, "transparent", Color),
    longhand("background-image", false, "none", Text),
    longhand("box-shadow", false, "none", Text),
    longhand("clip-path", false, "none", Text),
    longhand("transform", false, "none", Text),
    longhand("transition", false, "all 0s ease 0s", Transition),
    longhand("animation", false, "none", Text),
    longhand("cursor", true, "auto", Keyword),
    longhand("pointer-events", true, "auto", Keyword),
    longhand("object-fit", false, "fill", Keyword),
    // Text
    longhand("font-family", true, "serif", Text),
    longhand("font-weight", true, "normal", FontWeight),
    longhand("font-style", true, "normal", Keyword),
    longhand("line-height", true, "normal", LineHeight),
    longhand("letter-spacing", true, "normal", Length),
    longhand("text-align", true, "start", Keyword),
    longhand("text-decoration", false, "none", Text),
    longhand("text-transform", true, "none", Keyword),
    longhand("text-shadow", true, "none", Text),
    longhand("white-space", true, "normal", Keyword),
    longhand("list-style-type", true, "disc", Keyword),
    // Flexbox
    longhand("flex-direction", false, "row", Keyword),
    longhand("flex-wrap", false, "nowrap", Keyword),
    longhand("flex-grow", false, "0", Number),
    longhand("flex-shrink", false, "1", Number),
    longhand("flex-basis", false, "auto", Length),
    longhand("order", false, "0", Number),
    longhand("justify-content", false, "normal", Keyword),
    longhand("justify-items", false, "normal", Keyword),
    longhand("align-items", false, "normal", Keyword),
    longhand("align-content", false, "normal", Keyword),
    longhand("align-self", false, "auto", Keyword),
    longhand("row-gap", false, "normal", Length),
    longhand("column-gap", false, "normal", Length),
    // Grid
    longhand("grid-template-columns", false, "none", Text),
    longhand("grid-template-rows", false, "none", Text),
    longhand("grid-template-areas", false, "none", Text),
    longhand("grid-column", false, "auto", Text),
    longhand("grid-row", false, "auto", Text),
    longhand("grid-area", false, "auto", Text),
];

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Handle to a registered longhand property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropertyId(u16);

impl PropertyId {
    pub const FONT_SIZE: Self = Self::named("font-size");
    pub const COLOR: Self = Self::named("color");
    pub const DISPLAY: Self = Self::named("display");
    pub const BACKGROUND_COLOR: Self = Self::named("background-color");
    pub const BACKGROUND_IMAGE: Self = Self::named("background-image");
    pub const FONT_WEIGHT: Self = Self::named("font-weight");
    pub const LINE_HEIGHT: Self = Self::named("line-height");

    /// Number of registered longhands.
    pub const COUNT: usize = PROPERTIES.len();

    /// Resolve a registered name at compile time.
    ///
    /// Panics (at compile time when used in a constant) for unknown names.
    pub const fn named(name: &str) -> Self {
        let mut i = 0;
        while i < PROPERTIES.len() {
            if str_eq(PROPERTIES[i].name, name) {
                return Self(i as u16);
            }
            i += 1;
        }
        panic!("unregistered property name");
    }

    /// Look up a longhand by CSS name (ASCII case-insensitive).
    pub fn lookup(name: &str) -> Option<Self> {
        PROPERTIES
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
            .map(|i| Self(i as u16))
    }

    /// Iterate over every registered longhand in resolution order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..PROPERTIES.len()).map(|i| Self(i as u16))
    }

    /// Static description of the property.
    pub fn info(self) -> &'static PropertyInfo {
        &PROPERTIES[self.index()]
    }

    /// CSS name.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Position in the registry.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
