//! Commands that run without the terminal UI
//!
//! An answers file is a JSON object mapping question ids to answer labels.
//! Submitting one drives the same [`Session`] the TUI uses, one question at a
//! time in questionnaire order.

use crate::client::Recommender;
use crate::error::{QuizError, Result};
use crate::questions::{Choice, QUESTIONS, Question, find_question};
use crate::recommendation::RecommendationResult;
use crate::session::{ResponseMap, Session};
use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Answers read from a file, split into known and unknown question ids
#[derive(Debug, Clone, Default)]
pub struct AnswerFile {
    /// Answers for known questions, in questionnaire order
    pub responses: ResponseMap,
    /// Keys that match no question, sorted
    pub unknown: Vec<String>,
}

impl AnswerFile {
    /// Load answers from a JSON object of strings
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read answers from {:?}", path.as_ref()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse answers in {:?}", path.as_ref()))
    }

    /// Parse answers from JSON text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let raw: HashMap<String, String> =
            serde_json::from_str(content).context("Answers must be a JSON object of strings")?;
        Ok(Self::from_map(raw))
    }

    fn from_map(mut raw: HashMap<String, String>) -> Self {
        let mut responses = ResponseMap::new();
        for question in QUESTIONS.iter() {
            if let Some(label) = raw.remove(question.id) {
                responses.record(question.id, label);
            }
        }

        let mut unknown: Vec<String> = raw.into_keys().collect();
        unknown.sort();
        Self { responses, unknown }
    }

    /// Ids of questions without an answer
    pub fn missing(&self) -> Vec<&'static str> {
        self.responses.missing(&QUESTIONS)
    }

    /// Answers whose label is not one of the five standard choices
    pub fn nonstandard(&self) -> Vec<(&str, &str)> {
        self.responses
            .iter()
            .filter(|(_, label)| label.parse::<Choice>().is_err())
            .collect()
    }
}

/// Run a session to completion from file answers, ready to submit
pub fn session_from_answers(answers: &AnswerFile) -> Result<Session> {
    let missing = answers.missing();
    if !missing.is_empty() {
        return Err(QuizError::validation(format!(
            "missing answers for: {}",
            missing.join(", ")
        )));
    }
    for key in &answers.unknown {
        warn!("Ignoring answer for unknown question '{}'", key);
    }

    let mut session = Session::new();
    for question in session.questions() {
        let label = answers.responses.get(question.id).ok_or_else(|| {
            QuizError::validation(format!("missing answer for {}", question.id))
        })?;
        session.answer(label)?;
    }
    Ok(session)
}

/// Submit file answers and return the recommendation
pub fn submit_answers(
    answers: &AnswerFile,
    recommender: &dyn Recommender,
) -> Result<RecommendationResult> {
    let mut session = session_from_answers(answers)?;
    info!("Submitting answers to {}", recommender.endpoint());
    let result = session.submit(recommender)?;
    Ok(result.clone())
}

/// Human-readable report of a recommendation
pub fn format_recommendation(result: &RecommendationResult, embed_base_url: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Recommended track: {}\n", result.display_name()));
    if let Some(artist) = result.artist.as_deref() {
        out.push_str(&format!("Artist: {}\n", artist));
    }
    if let Some(album) = result.album.as_deref() {
        out.push_str(&format!("Album: {}\n", album));
    }
    if let Some(url) = result.embed_url(embed_base_url) {
        out.push_str(&format!("Player: {}\n", url));
    }
    out
}

/// Listing of the questions and the answer scale
pub fn format_questions(questions: &[Question]) -> String {
    let mut out = String::new();
    for (i, question) in questions.iter().enumerate() {
        out.push_str(&format!("{:>2}. {:<17} {}\n", i + 1, question.id, question.prompt));
    }
    out.push('\n');
    out.push_str("Choices:\n");
    for (i, choice) in Choice::all().into_iter().enumerate() {
        out.push_str(&format!("  {}. {} ({:+})\n", i + 1, choice.label(), choice.weight()));
    }
    out
}

/// Describe why a key is unknown, for validation reports
pub fn describe_unknown(key: &str) -> String {
    match find_question(key.trim()) {
        Some(question) => format!("'{}' (did you mean '{}'?)", key, question.id),
        None => format!("'{}'", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn full_answers_json() -> String {
        let pairs: Vec<String> = QUESTIONS
            .iter()
            .rev()
            .map(|q| format!("\"{}\": \"はい\"", q.id))
            .collect();
        format!("{{{}}}", pairs.join(", "))
    }

    #[test]
    fn test_parse_orders_by_questionnaire() {
        let answers = AnswerFile::parse(&full_answers_json()).unwrap();
        let keys: Vec<&str> = answers.responses.keys().collect();
        let expected: Vec<&str> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(keys, expected);
        assert!(answers.missing().is_empty());
        assert!(answers.unknown.is_empty());
    }

    #[test]
    fn test_missing_and_unknown_keys() {
        let answers =
            AnswerFile::parse(r#"{"danceability": "はい", "mood": "いいえ"}"#).unwrap();
        assert_eq!(answers.missing().len(), 9);
        assert!(!answers.missing().contains(&"danceability"));
        assert_eq!(answers.unknown, vec!["mood".to_string()]);
    }

    #[test]
    fn test_non_string_values_rejected() {
        assert!(AnswerFile::parse(r#"{"danceability": 1}"#).is_err());
        assert!(AnswerFile::parse("[]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", full_answers_json()).unwrap();
        let answers = AnswerFile::load(file.path()).unwrap();
        assert_eq!(answers.responses.len(), 10);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = AnswerFile::load("/nonexistent/answers.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read answers"));
    }

    #[test]
    fn test_session_from_complete_answers() {
        let answers = AnswerFile::parse(&full_answers_json()).unwrap();
        let session = session_from_answers(&answers).unwrap();
        assert_eq!(
            session.state(),
            &SessionState::AwaitingSubmit { submitting: false }
        );
        assert_eq!(session.responses().len(), 10);
    }

    #[test]
    fn test_session_from_incomplete_answers() {
        let answers = AnswerFile::parse(r#"{"danceability": "はい"}"#).unwrap();
        let err = session_from_answers(&answers).unwrap_err();
        assert!(matches!(err, QuizError::Validation(_)));
        assert!(err.to_string().contains("valence"));
    }

    #[test]
    fn test_nonstandard_labels_reported() {
        let answers =
            AnswerFile::parse(r#"{"danceability": "maybe", "energy": "はい"}"#).unwrap();
        assert_eq!(answers.nonstandard(), vec![("danceability", "maybe")]);
    }

    #[test]
    fn test_format_recommendation() {
        let result = RecommendationResult {
            name: Some("Summer Breeze".to_string()),
            track_id: Some("abc123".to_string()),
            album: Some("Coast".to_string()),
            ..Default::default()
        };
        let text = format_recommendation(&result, "https://open.spotify.com/");
        assert!(text.contains("Recommended track: Summer Breeze"));
        assert!(text.contains("Album: Coast"));
        assert!(!text.contains("Artist:"));
        assert!(text.contains(
            "Player: https://open.spotify.com/embed/track/abc123?autoplay=1&theme=0"
        ));
    }

    #[test]
    fn test_format_questions_lists_everything() {
        let text = format_questions(&QUESTIONS);
        for question in QUESTIONS.iter() {
            assert!(text.contains(question.id));
        }
        assert!(text.contains("(+1)"));
        assert!(text.contains("(-0.5)"));
    }

    #[test]
    fn test_describe_unknown_suggests_trimmed_id() {
        assert!(describe_unknown(" energy").contains("did you mean 'energy'"));
        assert_eq!(describe_unknown("mood"), "'mood'");
    }
}
