//! Tracing targets and span names.
//!
//! The crate logs through the `tracing` facade and never installs a
//! subscriber. Applications and tests choose one:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_max_level(tracing::Level::DEBUG)
//!     .init();
//! ```

/// Span names used for tracing validation work.
pub mod span_names {
    /// One validation run.
    pub const VALIDATE: &str = "css_quest::validate";
    /// The over-targeting scan while markers are applied.
    pub const MARKER_SCAN: &str = "css_quest::marker_scan";
    /// Catalog loading.
    pub const CATALOG: &str = "css_quest::catalog";
}

/// Target names for log filtering.
pub mod targets {
    /// Validation engine target.
    pub const VALIDATE: &str = "css_quest::validate";
    /// Marker application and revert.
    pub const MARKER: &str = "css_quest::marker";
    /// Challenge catalog target.
    pub const CATALOG: &str = "css_quest::catalog";
    /// Challenge session target.
    pub const SESSION: &str = "css_quest::session";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to measure the duration of a validation step.
#[derive(Debug)]
pub struct OperationSpan {
    _span: tracing::span::EnteredSpan,
}

impl OperationSpan {
    /// Enter a span for the named operation.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "css_quest::perf", "perf", operation = name);
        Self { _span: span.entered() }
    }
}
