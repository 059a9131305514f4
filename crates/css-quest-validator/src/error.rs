//! Error types for validation, catalogs and configuration.

use std::path::PathBuf;

/// Result type alias for catalog, configuration and session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a solution was judged as not satisfied.
///
/// Every variant is a recoverable failure: it is reported as
/// `{passed: false, reason}` and never shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The solution's selector does not parse.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// The solution's selector matched nothing.
    #[error("Selector '{selector}' matched no elements")]
    EmptySelection { selector: String },

    /// A targeted element does not carry the sentinel value.
    #[error(
        "Element {index} matched by '{selector}' does not carry the sentinel {property}: expected '{expected}', got '{actual}'"
    )]
    IncompleteTargeting {
        selector: String,
        index: usize,
        property: String,
        expected: String,
        actual: String,
    },

    /// An element outside the targets carries the sentinel value.
    #[error("Element {index} in document order carries the sentinel but is not matched by '{selector}'")]
    OverTargeting { selector: String, index: usize },

    /// A property of a matched element does not resolve to the expected value.
    #[error(
        "Element {index} matched by '{selector}': expected {property} '{expected}', got '{actual}'"
    )]
    PropertyMismatch {
        selector: String,
        index: usize,
        property: String,
        expected: String,
        actual: String,
    },

    /// The solution kind is not one the engine knows how to check.
    #[error("Unsupported solution kind '{kind}'")]
    UnsupportedSolutionKind { kind: String },
}

/// Hard failures of the validation machinery itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The rendering collaborator could not answer a query.
    #[error("Rendered output unavailable: {0}")]
    Unavailable(String),

    /// The marker class could not be applied.
    #[error("Failed to apply marker class '{class}': {message}")]
    MarkerApply { class: String, message: String },

    /// The marker class could not be reverted.
    #[error("Failed to revert marker class '{class}': {message}")]
    MarkerRevert { class: String, message: String },
}

/// Early exit from a validation run: either a verdict or a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The solution is not satisfied.
    #[error(transparent)]
    Failed(#[from] ValidationError),

    /// The engine could not reach a verdict.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors from loading challenges and configuration or running sessions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed challenge data.
    #[error("Invalid challenge data in '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed configuration.
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Two challenges of one module share an id.
    #[error("Duplicate challenge id '{id}' in module '{module}'")]
    DuplicateChallenge { module: String, id: String },

    /// No module with this key is loaded.
    #[error("Unknown module '{0}'")]
    UnknownModule(String),

    /// No challenge with this id exists in the module.
    #[error("Unknown challenge '{id}' in module '{module}'")]
    UnknownChallenge { module: String, id: String },

    /// The arena could not be set up.
    #[error(transparent)]
    Style(#[from] css_quest_style::Error),

    /// Validation could not run.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a challenge data error.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
