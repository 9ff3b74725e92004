//! Property-Based Tests for quiztui
//!
//! These tests verify:
//! - Any sequence of ten answers fills the response map in question order
//! - Restart returns to a fresh session from any point in a run
//! - Answer labels parse back to the choice they came from

use proptest::prelude::*;

use quiztui::{Choice, QUESTIONS, RecommendationResult, Session, SessionState};

/// Strategy for generating valid Choice variants
fn choice_strategy() -> impl Strategy<Value = Choice> {
    prop_oneof![
        Just(Choice::Yes),
        Just(Choice::RatherYes),
        Just(Choice::Neutral),
        Just(Choice::RatherNo),
        Just(Choice::No),
    ]
}

/// Strategy for a full questionnaire worth of answers
fn answers_strategy() -> impl Strategy<Value = Vec<Choice>> {
    prop::collection::vec(choice_strategy(), QUESTIONS.len())
}

// =============================================================================
// Question flow properties
// =============================================================================

proptest! {
    /// Ten answers always end in AwaitingSubmit with ten entries in order
    #[test]
    fn ten_answers_fill_map_in_order(answers in answers_strategy()) {
        let mut session = Session::new();
        for choice in &answers {
            session.choose(*choice).unwrap();
        }

        prop_assert_eq!(
            session.state(),
            &SessionState::AwaitingSubmit { submitting: false }
        );
        prop_assert_eq!(session.responses().len(), QUESTIONS.len());

        for ((id, label), (question, choice)) in session
            .responses()
            .iter()
            .zip(QUESTIONS.iter().zip(answers.iter()))
        {
            prop_assert_eq!(id, question.id);
            let expected = choice.label();
            prop_assert_eq!(label, expected.as_str());
        }
    }

    /// Restart from any prefix of a run leaves a fresh session
    #[test]
    fn restart_from_any_prefix(answers in answers_strategy(), cut in 0usize..=10, submit in any::<bool>()) {
        let mut session = Session::new();
        for choice in answers.iter().take(cut) {
            session.choose(*choice).unwrap();
        }
        if cut == QUESTIONS.len() && submit {
            let pending = session.begin_submit().unwrap();
            session.complete_submit(pending.generation, Ok(RecommendationResult::default()));
        }

        let before = session.generation();
        session.restart();

        prop_assert_eq!(session.state(), &SessionState::Asking { index: 0 });
        prop_assert!(session.responses().is_empty());
        prop_assert!(session.error().is_none());
        prop_assert!(session.result().is_none());
        prop_assert_eq!(session.generation(), before + 1);
    }

    /// The progress index always matches the number of answers so far
    #[test]
    fn index_tracks_answer_count(answers in answers_strategy(), cut in 0usize..10) {
        let mut session = Session::new();
        for choice in answers.iter().take(cut) {
            session.choose(*choice).unwrap();
        }
        prop_assert_eq!(session.state(), &SessionState::Asking { index: cut });
        prop_assert_eq!(session.responses().len(), cut);
        prop_assert_eq!(session.current_question().id, QUESTIONS[cut].id);
    }
}

// =============================================================================
// Choice label properties
// =============================================================================

proptest! {
    /// Choice: label → parse round-trip is identity
    #[test]
    fn choice_label_roundtrip(choice in choice_strategy()) {
        let parsed: Choice = choice.label().parse().expect("Should parse");
        prop_assert_eq!(choice, parsed);
    }

    /// Choice: weight stays on the unit scale
    #[test]
    fn choice_weight_in_range(choice in choice_strategy()) {
        let weight = choice.weight();
        prop_assert!((-1.0..=1.0).contains(&weight));
    }
}
