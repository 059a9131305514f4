//! The validation engine.

use crate::config::ValidatorConfig;
use crate::error::{CheckError, EngineError, ValidationError};
use crate::inspector::{MarkerGuard, StyleInspector};
use crate::logging::{OperationSpan, span_names, targets};
use crate::matcher::SelectorMatcher;
use crate::normalizer::ValueNormalizer;
use crate::output::RenderedOutput;
use crate::solution::{SelectorSolution, Solution, StyleSolution};

/// The verdict of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub passed: bool,
    /// Why the run failed. Diagnostic only.
    pub reason: Option<ValidationError>,
}

impl ValidationResult {
    /// A passing result.
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    /// A failing result.
    pub fn fail(reason: ValidationError) -> Self {
        Self {
            passed: false,
            reason: Some(reason),
        }
    }
}

/// Checks solutions against rendered outputs.
///
/// The validator holds no per-run state. Apart from the marker class, which
/// is removed before [`validate`](Self::validate) returns, the output is
/// never modified.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    normalizer: ValueNormalizer,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl Validator {
    /// Create a validator.
    pub fn new(config: ValidatorConfig) -> Self {
        let normalizer =
            ValueNormalizer::new().canonicalize_expected_colors(config.canonicalize_expected_colors);
        Self { config, normalizer }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Check `solution` against `output`.
    ///
    /// A solution that is not satisfied is `Ok` with `passed == false`.
    /// `Err` means no verdict could be reached.
    pub fn validate<O: RenderedOutput>(
        &self,
        output: &mut O,
        solution: &Solution,
    ) -> Result<ValidationResult, EngineError> {
        let _span = OperationSpan::new(span_names::VALIDATE);

        let outcome = match solution {
            Solution::Selector(solution) => self.check_selector(output, solution),
            Solution::Style(solution) => self.check_style(&*output, solution),
            Solution::Unsupported { kind } => {
                Err(ValidationError::UnsupportedSolutionKind { kind: kind.clone() }.into())
            }
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(target: targets::VALIDATE, kind = solution.kind(), "solution passed");
                Ok(ValidationResult::pass())
            }
            Err(CheckError::Failed(reason)) => {
                tracing::debug!(target: targets::VALIDATE, kind = solution.kind(), %reason, "solution failed");
                Ok(ValidationResult::fail(reason))
            }
            Err(CheckError::Engine(err)) => Err(err),
        }
    }

    fn check_selector<O: RenderedOutput>(
        &self,
        output: &mut O,
        solution: &SelectorSolution,
    ) -> Result<(), CheckError> {
        let selector = solution.selector.as_str();
        let property = self.config.marker_property.as_str();
        let sentinel = self.config.sentinel_value.as_str();

        let targeted = SelectorMatcher::match_non_empty(&*output, selector)?;

        for (index, &target) in targeted.iter().enumerate() {
            let actual = StyleInspector::computed_value(&*output, target, property)?;
            if !self.normalizer.equivalent(&actual, sentinel) {
                return Err(ValidationError::IncompleteTargeting {
                    selector: selector.to_string(),
                    index,
                    property: property.to_string(),
                    expected: sentinel.to_string(),
                    actual,
                }
                .into());
            }
        }

        let guard = MarkerGuard::apply(output, &self.config.marker_class, &targeted)?;
        let stray = {
            let _span = OperationSpan::new(span_names::MARKER_SCAN);
            self.find_unmarked_sentinel(&guard, property, sentinel)
        };
        guard.release()?;

        match stray? {
            Some(index) => Err(ValidationError::OverTargeting {
                selector: selector.to_string(),
                index,
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Document-order index of the first element that carries the sentinel
    /// without being marked.
    fn find_unmarked_sentinel<O: RenderedOutput>(
        &self,
        guard: &MarkerGuard<'_, O>,
        property: &str,
        sentinel: &str,
    ) -> Result<Option<usize>, EngineError> {
        let output = guard.output();
        for (index, element) in output.elements()?.into_iter().enumerate() {
            if guard.is_marked(element) {
                continue;
            }
            let actual = StyleInspector::computed_value(output, element, property)?;
            if self.normalizer.equivalent(&actual, sentinel) {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn check_style<O: RenderedOutput>(
        &self,
        output: &O,
        solution: &StyleSolution,
    ) -> Result<(), CheckError> {
        let selector = solution.selector.as_str();
        let elements = SelectorMatcher::match_non_empty(output, selector)?;

        for (index, &element) in elements.iter().enumerate() {
            for (property, expected) in &solution.properties {
                let actual = StyleInspector::computed_value(output, element, property)?;
                if !self.normalizer.equivalent(&actual, expected) {
                    return Err(ValidationError::PropertyMismatch {
                        selector: selector.to_string(),
                        index,
                        property: property.clone(),
                        expected: expected.clone(),
                        actual,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

/// Check `solution` against `output` with the default configuration.
pub fn validate<O: RenderedOutput>(
    output: &mut O,
    solution: &Solution,
) -> Result<ValidationResult, EngineError> {
    Validator::default().validate(output, solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RenderError;
    use css_quest_style::arena::Arena;
    use css_quest_style::rules::StylePriority;

    fn arena(markup: &str, css: &str) -> Arena {
        let mut arena = Arena::from_markup(markup);
        arena.reserve_class(ValidatorConfig::default().marker_class);
        arena.replace_stylesheet(StylePriority::Learner, css);
        arena
    }

    #[test]
    fn unsupported_kind_fails_closed() {
        let mut arena = arena("<p></p>", "");
        let result = validate(&mut arena, &Solution::Unsupported { kind: "quiz".into() }).unwrap();

        assert_eq!(
            result.reason,
            Some(ValidationError::UnsupportedSolutionKind { kind: "quiz".into() })
        );
    }

    #[test]
    fn style_reports_first_mismatch() {
        let mut arena = arena("<p></p><p class='x'></p>", "p { width: 10px } .x { width: 20px }");
        let solution = Solution::style("p", [("width", "10px"), ("height", "auto")]);
        let result = validate(&mut arena, &solution).unwrap();

        assert_eq!(
            result.reason,
            Some(ValidationError::PropertyMismatch {
                selector: "p".into(),
                index: 1,
                property: "width".into(),
                expected: "10px".into(),
                actual: "20px".into(),
            })
        );
    }

    #[test]
    fn selector_reports_incomplete_targeting() {
        let mut arena = arena(
            "<p></p><p class='x'></p>",
            ".x { background-color: rgb(173, 255, 47) }",
        );
        let result = validate(&mut arena, &Solution::selector("p")).unwrap();

        assert!(matches!(
            result.reason,
            Some(ValidationError::IncompleteTargeting { index: 0, .. })
        ));
    }

    #[test]
    fn configured_sentinel() {
        let config = ValidatorConfig {
            marker_property: "color".into(),
            sentinel_value: "red".into(),
            canonicalize_expected_colors: true,
            ..ValidatorConfig::default()
        };
        let mut arena = arena("<p></p><span></span>", "span { color: red }");

        let result = Validator::new(config).validate(&mut arena, &Solution::selector("span")).unwrap();
        assert!(result.passed, "{:?}", result.reason);
    }

    /// An output whose marker can be applied but never removed.
    struct StickyMarker(Arena);

    impl RenderedOutput for StickyMarker {
        type Element = <Arena as RenderedOutput>::Element;

        fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, RenderError> {
            RenderedOutput::query_selector_all(&self.0, selector)
        }

        fn elements(&self) -> Result<Vec<Self::Element>, RenderError> {
            RenderedOutput::elements(&self.0)
        }

        fn computed_value(&self, element: Self::Element, property: &str) -> Result<String, RenderError> {
            RenderedOutput::computed_value(&self.0, element, property)
        }

        fn add_class(&mut self, element: Self::Element, class: &str) -> Result<bool, RenderError> {
            RenderedOutput::add_class(&mut self.0, element, class)
        }

        fn remove_class(&mut self, _element: Self::Element, _class: &str) -> Result<bool, RenderError> {
            Err(RenderError::Unavailable("detached".into()))
        }

        fn has_class(&self, element: Self::Element, class: &str) -> bool {
            RenderedOutput::has_class(&self.0, element, class)
        }
    }

    #[test]
    fn revert_failure_is_an_engine_error() {
        let mut output = StickyMarker(arena("<p></p>", "p { background-color: rgb(173, 255, 47) }"));
        let err = validate(&mut output, &Solution::selector("p")).unwrap_err();

        assert!(matches!(err, EngineError::MarkerRevert { .. }));
    }
}
