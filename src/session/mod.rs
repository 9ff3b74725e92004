//! Questionnaire session state machine
//!
//! [`Session`] is the single owner of everything one run of the questionnaire
//! needs: the question cursor, the collected answers, the current view, and
//! the last submission error.
//!
//! # State Flow
//!
//! ```text
//! Asking(0) -> Asking(1) -> ... -> Asking(last)
//!     |                                 |
//!     |                                 v  (answer)
//!     |                      AwaitingSubmit { submitting: false }
//!     |                         |        ^
//!     |           (begin_submit)|        | (failure + error message)
//!     |                         v        |
//!     |                      AwaitingSubmit { submitting: true }
//!     |                         |
//!     |                         v  (success)
//!     |                      ShowingResult
//!     |                         |
//!     +<------------------------+  (restart, from any state)
//! ```
//!
//! # Submission
//!
//! Submitting is split in two so the UI can run the request off-thread:
//! [`Session::begin_submit`] marks the request in flight and hands out a
//! [`PendingSubmission`]; [`Session::complete_submit`] applies the outcome.
//! While a request is in flight a second submission is rejected. Every
//! restart bumps a generation counter, and outcomes tagged with an older
//! generation are dropped.

mod responses;
mod sequencer;

pub use responses::ResponseMap;
pub use sequencer::Sequencer;

use crate::client::Recommender;
use crate::error::{QuizError, Result};
use crate::questions::{Choice, Question};
use crate::recommendation::RecommendationResult;
use std::fmt;
use tracing::{debug, info, warn};

/// The active view of a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Showing the question at `index`
    Asking { index: usize },
    /// Every question answered; `submitting` is set while a request is in flight
    AwaitingSubmit { submitting: bool },
    /// Recommendation received
    ShowingResult(RecommendationResult),
}

impl SessionState {
    /// Payload-free discriminant, used to key keybindings and help text
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Asking { .. } => ViewKind::Asking,
            Self::AwaitingSubmit { submitting: false } => ViewKind::AwaitingSubmit,
            Self::AwaitingSubmit { submitting: true } => ViewKind::Submitting,
            Self::ShowingResult(_) => ViewKind::ShowingResult,
        }
    }
}

/// Screen the user is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Asking,
    AwaitingSubmit,
    Submitting,
    ShowingResult,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Asking => "Question",
            Self::AwaitingSubmit => "Ready to submit",
            Self::Submitting => "Submitting",
            Self::ShowingResult => "Recommendation",
        };
        write!(f, "{}", name)
    }
}

/// A submission handed out by [`Session::begin_submit`]
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub generation: u64,
    pub responses: ResponseMap,
}

/// One run of the questionnaire
#[derive(Debug, Clone)]
pub struct Session {
    sequencer: Sequencer,
    responses: ResponseMap,
    state: SessionState,
    error: Option<String>,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_sequencer(Sequencer::default())
    }
}

impl Session {
    /// New session over the built-in questions
    pub fn new() -> Self {
        Self::default()
    }

    /// New session over a custom question list
    pub fn with_questions(questions: &'static [Question]) -> Result<Self> {
        Ok(Self::from_sequencer(Sequencer::new(questions)?))
    }

    fn from_sequencer(sequencer: Sequencer) -> Self {
        Self {
            sequencer,
            responses: ResponseMap::new(),
            state: SessionState::Asking { index: 0 },
            error: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    /// Message from the most recent failed submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&RecommendationResult> {
        match &self.state {
            SessionState::ShowingResult(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::AwaitingSubmit { submitting: true })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The question on screen. After the last answer this stays on the last question.
    pub fn current_question(&self) -> &'static Question {
        self.sequencer.current()
    }

    pub fn questions(&self) -> &'static [Question] {
        self.sequencer.questions()
    }

    pub fn question_count(&self) -> usize {
        self.sequencer.len()
    }

    /// Store an answer without moving the cursor. Any label is accepted.
    ///
    /// Refused in the same states as [`Session::answer`].
    pub fn record(&mut self, question_id: &str, label: impl Into<String>) -> Result<()> {
        self.ensure_answerable()?;
        self.store(question_id, label.into());
        Ok(())
    }

    fn store(&mut self, question_id: &str, label: String) {
        debug!("Recording {} = {}", question_id, label);
        if let Some(previous) = self.responses.record(question_id, label) {
            debug!("Overwrote previous answer for {}: {}", question_id, previous);
        }
    }

    fn ensure_answerable(&self) -> Result<()> {
        match self.state {
            SessionState::Asking { .. } | SessionState::AwaitingSubmit { submitting: false } => {
                Ok(())
            }
            SessionState::AwaitingSubmit { submitting: true } => Err(QuizError::submission(
                "answers are locked while a submission is in flight",
            )),
            SessionState::ShowingResult(_) => Err(QuizError::submission(
                "the questionnaire is finished; restart to answer again",
            )),
        }
    }

    /// Answer the current question and move on.
    ///
    /// On the last question the session moves to `AwaitingSubmit`; answering
    /// again there overwrites the last answer. Rejected while a submission is
    /// in flight and on the result view.
    pub fn answer(&mut self, label: impl Into<String>) -> Result<()> {
        self.ensure_answerable()?;

        let question_id = self.sequencer.current().id;
        self.store(question_id, label.into());

        if matches!(self.state, SessionState::Asking { .. }) {
            if self.sequencer.advance() {
                self.state = SessionState::Asking {
                    index: self.sequencer.index(),
                };
            } else {
                info!("All {} questions answered", self.sequencer.len());
                self.state = SessionState::AwaitingSubmit { submitting: false };
            }
        }
        Ok(())
    }

    /// Answer the current question with one of the canonical choices
    pub fn choose(&mut self, choice: Choice) -> Result<()> {
        self.answer(choice.label())
    }

    /// Mark a submission in flight and hand out what to send.
    ///
    /// Clears the previous error immediately.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission> {
        match self.state {
            SessionState::AwaitingSubmit { submitting: false } => {}
            SessionState::AwaitingSubmit { submitting: true } => {
                warn!("Ignoring submit: a request is already in flight");
                return Err(QuizError::submission("a submission is already in flight"));
            }
            SessionState::Asking { index } => {
                return Err(QuizError::submission(format!(
                    "not every question is answered yet ({} of {})",
                    index,
                    self.sequencer.len()
                )));
            }
            SessionState::ShowingResult(_) => {
                return Err(QuizError::submission("a recommendation is already shown"));
            }
        }

        self.error = None;
        self.state = SessionState::AwaitingSubmit { submitting: true };
        Ok(PendingSubmission {
            generation: self.generation,
            responses: self.responses.clone(),
        })
    }

    /// Apply the outcome of a submission started by [`Session::begin_submit`].
    ///
    /// Returns false when the outcome was dropped because it belongs to an
    /// earlier generation or no submission is in flight.
    pub fn complete_submit(
        &mut self,
        generation: u64,
        outcome: Result<RecommendationResult>,
    ) -> bool {
        if generation != self.generation {
            debug!(
                "Discarding submission outcome from generation {} (current {})",
                generation, self.generation
            );
            return false;
        }
        if !self.is_submitting() {
            debug!("Discarding submission outcome: nothing in flight");
            return false;
        }

        match outcome {
            Ok(result) => {
                info!("Showing recommendation: {}", result.display_name());
                self.error = None;
                self.state = SessionState::ShowingResult(result);
            }
            Err(e) => self.record_failure(&e),
        }
        true
    }

    fn record_failure(&mut self, e: &QuizError) {
        warn!("Submission failed: {}", e);
        self.error = Some(e.to_string());
        self.state = SessionState::AwaitingSubmit { submitting: false };
    }

    /// Submit synchronously through `recommender`.
    ///
    /// On failure the error message is stored on the session and the error is
    /// also returned to the caller.
    pub fn submit(&mut self, recommender: &dyn Recommender) -> Result<&RecommendationResult> {
        let pending = self.begin_submit()?;
        match recommender.recommend(&pending.responses) {
            Ok(result) => {
                self.complete_submit(pending.generation, Ok(result));
            }
            Err(e) => {
                self.record_failure(&e);
                return Err(e);
            }
        }
        self.result()
            .ok_or_else(|| QuizError::submission("no recommendation after submit"))
    }

    /// Back to the first question with nothing answered
    pub fn restart(&mut self) {
        info!("Restarting questionnaire");
        self.sequencer.reset();
        self.responses.clear();
        self.state = SessionState::Asking { index: 0 };
        self.error = None;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QUESTIONS;

    fn answer_all(session: &mut Session) {
        for _ in 0..session.question_count() {
            session.choose(Choice::Yes).unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert_eq!(session.state(), &SessionState::Asking { index: 0 });
        assert!(session.responses().is_empty());
        assert!(session.error().is_none());
        assert!(session.result().is_none());
        assert_eq!(session.current_question().id, QUESTIONS[0].id);
    }

    #[test]
    fn test_answer_advances() {
        let mut session = Session::new();
        session.choose(Choice::Neutral).unwrap();
        assert_eq!(session.state(), &SessionState::Asking { index: 1 });
        assert_eq!(session.responses().get("danceability"), Some("どちらともいえない"));
    }

    #[test]
    fn test_last_answer_awaits_submit() {
        let mut session = Session::new();
        answer_all(&mut session);
        assert_eq!(
            session.state(),
            &SessionState::AwaitingSubmit { submitting: false }
        );
        assert_eq!(session.responses().len(), QUESTIONS.len());
        assert_eq!(session.current_question().id, "valence");
    }

    #[test]
    fn test_reanswer_last_question_overwrites() {
        let mut session = Session::new();
        answer_all(&mut session);
        session.choose(Choice::No).unwrap();
        assert_eq!(session.responses().len(), QUESTIONS.len());
        assert_eq!(session.responses().get("valence"), Some("いいえ"));
        assert_eq!(session.state().kind(), ViewKind::AwaitingSubmit);
    }

    #[test]
    fn test_submit_before_complete_rejected() {
        let mut session = Session::new();
        session.choose(Choice::Yes).unwrap();
        assert!(matches!(
            session.begin_submit(),
            Err(QuizError::Submission(_))
        ));
        assert_eq!(session.state(), &SessionState::Asking { index: 1 });
    }

    #[test]
    fn test_second_begin_submit_rejected() {
        let mut session = Session::new();
        answer_all(&mut session);
        let pending = session.begin_submit().unwrap();
        assert_eq!(pending.responses.len(), QUESTIONS.len());
        assert!(session.is_submitting());
        assert!(session.begin_submit().is_err());
        assert!(session.is_submitting());
    }

    #[test]
    fn test_answer_rejected_while_submitting() {
        let mut session = Session::new();
        answer_all(&mut session);
        session.begin_submit().unwrap();
        assert!(session.choose(Choice::No).is_err());
        assert_eq!(session.responses().get("valence"), Some("はい"));
    }

    #[test]
    fn test_begin_submit_clears_previous_error() {
        let mut session = Session::new();
        answer_all(&mut session);
        let pending = session.begin_submit().unwrap();
        session.complete_submit(pending.generation, Err(QuizError::transport("refused")));
        assert!(session.error().is_some());

        session.begin_submit().unwrap();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_stale_outcome_after_restart_dropped() {
        let mut session = Session::new();
        answer_all(&mut session);
        let pending = session.begin_submit().unwrap();
        session.restart();

        let applied = session.complete_submit(
            pending.generation,
            Ok(RecommendationResult {
                name: Some("Late".to_string()),
                ..Default::default()
            }),
        );
        assert!(!applied);
        assert_eq!(session.state(), &SessionState::Asking { index: 0 });
    }

    #[test]
    fn test_outcome_without_flight_dropped() {
        let mut session = Session::new();
        answer_all(&mut session);
        let applied = session.complete_submit(session.generation(), Ok(Default::default()));
        assert!(!applied);
        assert_eq!(session.state().kind(), ViewKind::AwaitingSubmit);
    }

    #[test]
    fn test_answer_on_result_view_rejected() {
        let mut session = Session::new();
        answer_all(&mut session);
        let pending = session.begin_submit().unwrap();
        session.complete_submit(pending.generation, Ok(Default::default()));
        assert!(session.choose(Choice::Yes).is_err());
        assert!(session.result().is_some());
    }

    #[test]
    fn test_record_follows_answer_guards() {
        let mut session = Session::new();
        session.record("energy", "はい").unwrap();
        assert_eq!(session.responses().get("energy"), Some("はい"));
        session.restart();

        answer_all(&mut session);
        let pending = session.begin_submit().unwrap();
        assert!(session.record("valence", "いいえ").is_err());

        session.complete_submit(pending.generation, Ok(Default::default()));
        assert!(matches!(
            session.record("extra", "はい"),
            Err(QuizError::Submission(_))
        ));
        assert_eq!(session.responses().len(), QUESTIONS.len());
        assert!(!session.responses().contains("extra"));
    }

    #[test]
    fn test_custom_question_list() {
        static QS: [Question; 2] = [Question::new("x", "X?"), Question::new("y", "Y?")];
        let mut session = Session::with_questions(&QS).unwrap();
        session.answer("a").unwrap();
        session.answer("b").unwrap();
        assert_eq!(session.state().kind(), ViewKind::AwaitingSubmit);
        assert_eq!(session.responses().get("y"), Some("b"));
    }

    #[test]
    fn test_view_kind_display() {
        assert_eq!(ViewKind::Submitting.to_string(), "Submitting");
    }
}
