//! Challenge validation for CSS Quest.
//!
//! The [`Validator`] decides whether a learner's CSS satisfies a challenge
//! [`Solution`]. It works against any [`RenderedOutput`]: it only queries
//! selectors, reads computed values and briefly tags elements with a
//! reserved marker class. [`css_quest_style::arena::Arena`] is the built-in
//! implementation.
//!
//! Two kinds of solution are supported:
//!
//! - **selector**: the learner's CSS must give exactly the elements matched by
//!   a selector, and no others, the sentinel `background-color`.
//! - **style**: every element matched by a selector must have each listed
//!   property resolve to the expected value.
//!
//! # Example
//!
//! ```
//! use css_quest_validator::prelude::*;
//!
//! let challenge: Challenge = serde_json::from_str(r#"{
//!     "id": "grow",
//!     "title": "Grow the box",
//!     "instruction": "Make the box 200px wide.",
//!     "html": "<div class=\"box\"></div>",
//!     "cssStarter": "",
//!     "solution": {"type": "style", "selector": ".box", "properties": {"width": "200px"}}
//! }"#).unwrap();
//!
//! let mut session = ChallengeSession::new(challenge, &QuestConfig::default()).unwrap();
//! assert!(!session.validate().unwrap().passed);
//!
//! session.set_learner_css(".box { width: 200px; }");
//! assert!(session.validate().unwrap().passed);
//! ```

pub mod arena_css;
pub mod challenge;
pub mod config;
pub mod engine;
pub mod inspector;
pub mod logging;
pub mod matcher;
pub mod normalizer;
pub mod output;
pub mod session;
pub mod solution;

mod error;

pub use engine::{ValidationResult, Validator, validate};
pub use error::{CheckError, EngineError, Error, Result, ValidationError};
pub use output::{RenderError, RenderedOutput};
pub use solution::Solution;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::challenge::{Catalog, Challenge, ChallengeModule};
    pub use crate::config::{ArenaConfig, CatalogConfig, QuestConfig, ValidatorConfig};
    pub use crate::engine::{ValidationResult, Validator, validate};
    pub use crate::error::{EngineError, ValidationError};
    pub use crate::normalizer::ValueNormalizer;
    pub use crate::output::RenderedOutput;
    pub use crate::session::{ChallengeSession, Feedback};
    pub use crate::solution::{SelectorSolution, Solution, StyleSolution};
    pub use css_quest_style::arena::Arena;
}
