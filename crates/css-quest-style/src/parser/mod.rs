//! CSS parsing module.

mod css_parser;
mod selector_parser;
mod tokens;

pub use css_parser::{parse_css, parse_declaration_block, parse_value_tokens};
pub use selector_parser::{parse_selector, parse_selector_list};
pub use tokens::{ValueToken, collapse_whitespace};
