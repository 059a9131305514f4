//! Style rules and stylesheets.

mod rule;
mod stylesheet;
mod user_agent;

pub use rule::StyleRule;
pub use stylesheet::{StylePriority, StyleSheet};
pub use user_agent::USER_AGENT_CSS;
