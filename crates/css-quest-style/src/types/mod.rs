//! Value types shared by the parser, the cascade and computed styles.

mod color;
mod value;

pub use color::Color;
pub use value::{LengthValue, StyleValue, format_number};
