//! A learner working on one challenge.

use css_quest_style::arena::Arena;
use css_quest_style::rules::StylePriority;

use crate::arena_css::{DEFAULT_ARENA_CSS, arena_markup};
use crate::challenge::Challenge;
use crate::config::QuestConfig;
use crate::engine::{ValidationResult, Validator};
use crate::error::Result;
use crate::logging::targets;

/// Message shown for a passing solution.
pub const SUCCESS_MESSAGE: &str = "Success! Challenge completed!";
/// Message shown for any failure.
pub const KEEP_TRYING_MESSAGE: &str = "Keep trying! Your CSS is not quite right yet.";

/// What the learner is told after a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Success,
    KeepTrying,
}

impl Feedback {
    /// The user-facing message.
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Success => SUCCESS_MESSAGE,
            Feedback::KeepTrying => KEEP_TRYING_MESSAGE,
        }
    }
}

/// Owns the rendered arena for one challenge and the learner's CSS.
pub struct ChallengeSession {
    challenge: Challenge,
    arena: Arena,
    learner_css: String,
    validator: Validator,
}

impl ChallengeSession {
    /// Render `challenge` and apply its starter CSS.
    pub fn new(challenge: Challenge, config: &QuestConfig) -> Result<Self> {
        let mut arena = Arena::from_markup(&arena_markup(&challenge.html_markup));
        arena.set_base_font_size(config.arena.base_font_size);
        arena.reserve_class(config.validator.marker_class.clone());

        match (&config.arena.base_css, &config.arena.base_css_path) {
            (Some(css), _) => arena.replace_stylesheet(StylePriority::Arena, css),
            (None, Some(path)) => arena.load_stylesheet(StylePriority::Arena, path)?,
            (None, None) => arena.replace_stylesheet(StylePriority::Arena, DEFAULT_ARENA_CSS),
        }

        let learner_css = challenge.css_starter.clone();
        arena.replace_stylesheet(StylePriority::Learner, &learner_css);

        tracing::debug!(target: targets::SESSION, challenge = %challenge.id, "session started");
        Ok(Self {
            challenge,
            arena,
            learner_css,
            validator: Validator::new(config.validator.clone()),
        })
    }

    /// The challenge being worked on.
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    /// The rendered arena.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The learner's current CSS.
    pub fn learner_css(&self) -> &str {
        &self.learner_css
    }

    /// Replace the learner's CSS.
    pub fn set_learner_css(&mut self, css: impl Into<String>) {
        self.learner_css = css.into();
        self.arena.replace_stylesheet(StylePriority::Learner, &self.learner_css);
    }

    /// Go back to the starter CSS.
    pub fn reset(&mut self) {
        let starter = self.challenge.css_starter.clone();
        self.set_learner_css(starter);
    }

    /// Check the learner's CSS against the challenge solution.
    pub fn validate(&mut self) -> Result<ValidationResult> {
        let result = self.validator.validate(&mut self.arena, &self.challenge.solution)?;
        tracing::debug!(
            target: targets::SESSION,
            challenge = %self.challenge.id,
            passed = result.passed,
            "checked solution"
        );
        Ok(result)
    }

    /// Check and turn the verdict into learner feedback.
    ///
    /// Engine failures count as not passing.
    pub fn check(&mut self) -> Feedback {
        match self.validate() {
            Ok(result) => Self::feedback(&result),
            Err(err) => {
                tracing::warn!(target: targets::SESSION, error = %err, "validation could not run");
                Feedback::KeepTrying
            }
        }
    }

    /// Feedback for a verdict.
    pub fn feedback(result: &ValidationResult) -> Feedback {
        if result.passed {
            Feedback::Success
        } else {
            Feedback::KeepTrying
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::solution::Solution;

    fn challenge(solution: Solution) -> Challenge {
        Challenge {
            id: "box-1".into(),
            title: "Wide box".into(),
            instruction: "Make the box 200px wide.".into(),
            html_markup: "<div class='box'></div>".into(),
            css_starter: ".box {\n  \n}".into(),
            solution,
        }
    }

    #[test]
    fn starter_css_is_applied() {
        let session = ChallengeSession::new(challenge(Solution::selector(".box")), &QuestConfig::default()).unwrap();
        assert_eq!(session.learner_css(), ".box {\n  \n}");

        let container = session.arena().query_selector_all(".challenge-arena-container > .box").unwrap();
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn feedback_messages() {
        let mut session = ChallengeSession::new(
            challenge(Solution::style(".box", [("width", "200px")])),
            &QuestConfig::default(),
        )
        .unwrap();

        assert_eq!(session.check(), Feedback::KeepTrying);
        assert_eq!(Feedback::KeepTrying.message(), "Keep trying! Your CSS is not quite right yet.");

        session.set_learner_css(".box { width: 200px }");
        assert_eq!(session.check(), Feedback::Success);
        assert_eq!(Feedback::Success.message(), "Success! Challenge completed!");

        session.reset();
        assert_eq!(session.check(), Feedback::KeepTrying);
    }

    #[test]
    fn base_css_can_be_replaced() {
        let mut config = QuestConfig::default();
        config.arena.base_css = Some(".box { width: 33px }".into());
        let session = ChallengeSession::new(challenge(Solution::selector(".box")), &config).unwrap();

        let node = session.arena().query_selector(".box").unwrap().unwrap();
        assert_eq!(session.arena().computed_value(node, "width").unwrap(), "33px");
    }

    #[test]
    fn missing_base_css_file() {
        let mut config = QuestConfig::default();
        config.arena.base_css_path = Some("/nonexistent/arena.css".into());

        let result = ChallengeSession::new(challenge(Solution::selector(".box")), &config);
        assert!(matches!(
            result,
            Err(Error::Style(css_quest_style::Error::Io { .. }))
        ));
    }
}
