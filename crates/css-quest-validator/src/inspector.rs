//! Computed-value reads and the reversible marker mechanism.

use css_quest_style::parser::collapse_whitespace;

use crate::error::EngineError;
use crate::logging::targets;
use crate::output::RenderedOutput;

/// Reads computed values from a rendered output.
pub struct StyleInspector;

impl StyleInspector {
    /// The computed value of `property`, trimmed with internal whitespace
    /// collapsed. Unknown properties yield an empty string.
    pub fn computed_value<O: RenderedOutput>(
        output: &O,
        element: O::Element,
        property: &str,
    ) -> Result<String, EngineError> {
        let value = output.computed_value(element, property)?;
        Ok(collapse_whitespace(value.trim()))
    }
}

/// Tags elements with a reserved class and removes it again on drop.
///
/// While the guard is alive the output is only reachable through
/// [`output`](Self::output), so nothing else can observe a half-marked
/// document. Call [`release`](Self::release) to see revert failures; a plain
/// drop reverts too and logs them.
pub struct MarkerGuard<'a, O: RenderedOutput> {
    output: &'a mut O,
    class: String,
    marked: Vec<O::Element>,
    released: bool,
}

impl<'a, O: RenderedOutput> MarkerGuard<'a, O> {
    /// Add `class` to every element in `elements`.
    ///
    /// Fails if any element already carries the class: the marker must start
    /// out unused or membership could not be read from it. On failure every
    /// marker added so far is removed before returning.
    pub fn apply(
        output: &'a mut O,
        class: &str,
        elements: &[O::Element],
    ) -> Result<Self, EngineError> {
        let mut guard = Self {
            output,
            class: class.to_string(),
            marked: Vec::with_capacity(elements.len()),
            released: false,
        };

        let existing = guard
            .output
            .elements()?
            .into_iter()
            .filter(|e| guard.output.has_class(*e, class))
            .count();
        if existing > 0 {
            return Err(EngineError::MarkerApply {
                class: class.to_string(),
                message: format!("{existing} element(s) already carry the class"),
            });
        }

        for &element in elements {
            let added = guard
                .output
                .add_class(element, class)
                .map_err(|err| EngineError::MarkerApply {
                    class: class.to_string(),
                    message: err.to_string(),
                })?;
            if added {
                guard.marked.push(element);
            }
        }

        tracing::debug!(target: targets::MARKER, class, marked = guard.marked.len(), "marker applied");
        Ok(guard)
    }

    /// The output with markers applied.
    pub fn output(&self) -> &O {
        self.output
    }

    /// Whether `element` carries the marker.
    pub fn is_marked(&self, element: O::Element) -> bool {
        self.output.has_class(element, &self.class)
    }

    /// Remove every marker, reporting the first failure.
    pub fn release(mut self) -> Result<(), EngineError> {
        self.revert()
    }

    fn revert(&mut self) -> Result<(), EngineError> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let mut first_error = None;
        for element in self.marked.drain(..) {
            if let Err(err) = self.output.remove_class(element, &self.class) {
                first_error.get_or_insert(EngineError::MarkerRevert {
                    class: self.class.clone(),
                    message: err.to_string(),
                });
            }
        }

        tracing::debug!(target: targets::MARKER, class = %self.class, "marker reverted");
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<O: RenderedOutput> Drop for MarkerGuard<'_, O> {
    fn drop(&mut self) {
        if let Err(err) = self.revert() {
            tracing::warn!(target: targets::MARKER, error = %err, "failed to revert marker");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_quest_style::arena::Arena;
    use css_quest_style::rules::StylePriority;

    const MARKER: &str = "css-quest-validation-target";

    fn marked_count(arena: &Arena) -> usize {
        arena.elements().into_iter().filter(|e| arena.has_class(*e, MARKER)).count()
    }

    #[test]
    fn computed_values_are_normalized() {
        let mut arena = Arena::from_markup("<div></div>");
        arena.replace_stylesheet(StylePriority::Learner, "div { margin: 1px   2px }");
        let div = arena.query_selector("div").unwrap().unwrap();

        assert_eq!(StyleInspector::computed_value(&arena, div, "margin").unwrap(), "1px 2px");
        assert_eq!(StyleInspector::computed_value(&arena, div, "not-a-property").unwrap(), "");
    }

    #[test]
    fn guard_marks_and_releases() {
        let mut arena = Arena::from_markup("<p></p><p></p><span></span>");
        let targets = arena.query_selector_all("p").unwrap();

        let guard = MarkerGuard::apply(&mut arena, MARKER, &targets).unwrap();
        assert!(targets.iter().all(|t| guard.is_marked(*t)));
        assert_eq!(marked_count(guard.output()), 2);
        guard.release().unwrap();

        assert_eq!(marked_count(&arena), 0);
    }

    #[test]
    fn drop_reverts_markers() {
        let mut arena = Arena::from_markup("<p class='keep'></p>");
        let targets = arena.query_selector_all("p").unwrap();

        {
            let _guard = MarkerGuard::apply(&mut arena, MARKER, &targets).unwrap();
        }

        assert_eq!(marked_count(&arena), 0);
        assert!(arena.has_class(targets[0], "keep"));
    }

    #[test]
    fn duplicate_targets_are_marked_once() {
        let mut arena = Arena::from_markup("<p></p>");
        let p = arena.query_selector("p").unwrap().unwrap();

        let guard = MarkerGuard::apply(&mut arena, MARKER, &[p, p]).unwrap();
        guard.release().unwrap();

        assert!(!arena.has_class(p, MARKER));
    }

    #[test]
    fn preexisting_marker_is_rejected() {
        let mut arena = Arena::from_markup(&format!("<p class='{MARKER}'></p><span></span>"));
        let span = arena.query_selector("span").unwrap().unwrap();

        let err = MarkerGuard::apply(&mut arena, MARKER, &[span]).err().unwrap();

        assert!(matches!(err, EngineError::MarkerApply { .. }));
        assert!(!arena.has_class(span, MARKER));
    }

    #[test]
    fn marker_does_not_change_computed_values() {
        let mut arena = Arena::from_markup("<p></p>");
        arena.reserve_class(MARKER);
        arena.replace_stylesheet(
            StylePriority::Learner,
            &format!(".{MARKER} {{ color: red }} p {{ color: blue }}"),
        );
        let p = arena.query_selector("p").unwrap().unwrap();

        let guard = MarkerGuard::apply(&mut arena, MARKER, &[p]).unwrap();
        assert_eq!(
            StyleInspector::computed_value(guard.output(), p, "color").unwrap(),
            "rgb(0, 0, 255)"
        );
    }
}
