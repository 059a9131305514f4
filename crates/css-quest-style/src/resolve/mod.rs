//! Style resolution engine.

mod cache;
mod cascade;
mod engine;
mod inheritance;

pub use cache::StyleCache;
pub use cascade::{CascadeKey, CascadedValues, cascade_properties};
pub use engine::StyleEngine;
pub use inheritance::{ResolveContext, resolve_properties};
