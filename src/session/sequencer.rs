//! Forward-only cursor over the question list

use crate::error::{QuizError, Result};
use crate::questions::{QUESTIONS, Question};

/// Tracks which question is active. Strictly one pass: no skipping, no going back.
#[derive(Debug, Clone)]
pub struct Sequencer {
    questions: &'static [Question],
    index: usize,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self {
            questions: &QUESTIONS,
            index: 0,
        }
    }
}

impl Sequencer {
    /// Create a sequencer over a custom question list.
    ///
    /// Fails on an empty list, which keeps `current()` infallible.
    pub fn new(questions: &'static [Question]) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::validation("question list is empty"));
        }
        Ok(Self {
            questions,
            index: 0,
        })
    }

    /// Question at the current index
    pub fn current(&self) -> &'static Question {
        &self.questions[self.index]
    }

    /// Move to the next question. Returns false when already on the last one.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TWO: [Question; 2] = [Question::new("a", "first"), Question::new("b", "second")];

    #[test]
    fn test_empty_list_rejected() {
        static NONE: [Question; 0] = [];
        assert!(matches!(
            Sequencer::new(&NONE),
            Err(QuizError::Validation(_))
        ));
    }

    #[test]
    fn test_advance_stops_at_last() {
        let mut seq = Sequencer::new(&TWO).unwrap();
        assert_eq!(seq.current().id, "a");
        assert!(seq.advance());
        assert_eq!(seq.current().id, "b");
        assert!(seq.is_last());
        assert!(!seq.advance());
        assert!(!seq.advance());
        assert_eq!(seq.index(), 1);
    }

    #[test]
    fn test_reset_returns_to_first() {
        let mut seq = Sequencer::default();
        while seq.advance() {}
        assert_eq!(seq.index(), seq.len() - 1);
        seq.reset();
        assert_eq!(seq.current().id, "danceability");
    }

    #[test]
    fn test_single_question_never_advances() {
        static ONE: [Question; 1] = [Question::new("only", "?")];
        let mut seq = Sequencer::new(&ONE).unwrap();
        assert!(seq.is_last());
        assert!(!seq.advance());
    }
}
