//! Selector matching against a rendered output.

use crate::error::{CheckError, EngineError, ValidationError};
use crate::output::{RenderError, RenderedOutput};

/// Resolves selector text to elements through the output's selector engine.
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Elements matching `selector`, in document order.
    ///
    /// An empty result is not an error here; callers decide whether an empty
    /// selection fails.
    pub fn match_selector<O: RenderedOutput>(
        output: &O,
        selector: &str,
    ) -> Result<Vec<O::Element>, CheckError> {
        let elements = output.query_selector_all(selector).map_err(|err| match err {
            RenderError::InvalidSelector { selector, message } => {
                CheckError::Failed(ValidationError::InvalidSelector { selector, message })
            }
            other => CheckError::Engine(EngineError::from(other)),
        })?;

        tracing::debug!(
            target: crate::logging::targets::VALIDATE,
            selector,
            matched = elements.len(),
            "selector matched"
        );
        Ok(elements)
    }

    /// Like [`match_selector`](Self::match_selector), but an empty selection
    /// fails with [`ValidationError::EmptySelection`].
    pub fn match_non_empty<O: RenderedOutput>(
        output: &O,
        selector: &str,
    ) -> Result<Vec<O::Element>, CheckError> {
        let elements = Self::match_selector(output, selector)?;
        if elements.is_empty() {
            return Err(ValidationError::EmptySelection {
                selector: selector.to_string(),
            }
            .into());
        }
        Ok(elements)
    }
}

impl From<RenderError> for EngineError {
    fn from(error: RenderError) -> Self {
        EngineError::Unavailable(error.to_string())
    }
}
