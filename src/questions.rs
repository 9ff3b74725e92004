//! Fixed question set and answer choices
//!
//! The ten questions and the five-step answer scale are compiled in. Question
//! identifiers double as the field names sent to the recommendation service,
//! so they must match the audio features it scores against.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A single questionnaire entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Question {
    /// Stable key, used in the response map and on the wire
    pub id: &'static str,
    /// Prompt shown to the user
    pub prompt: &'static str,
}

impl Question {
    pub const fn new(id: &'static str, prompt: &'static str) -> Self {
        Self { id, prompt }
    }
}

/// Number of questions in a full run
pub const QUESTION_COUNT: usize = 10;

/// The questionnaire, in the order it is asked
pub const QUESTIONS: [Question; QUESTION_COUNT] = [
    Question::new("danceability", "夏の日差しで踊りたくなりますか？"),
    Question::new("acousticness", "夏の風を感じる音楽は好きですか？"),
    Question::new("energy", "夏の暑さにエネルギーを感じますか？"),
    Question::new(
        "instrumentalness",
        "夏の夜にインストゥルメンタルな音楽を楽しみますか？",
    ),
    Question::new("liveness", "夏祭りの活気を感じますか？"),
    Question::new("loudness", "夏のビーチで音楽の音量を上げたいですか？"),
    Question::new("speechiness", "夏の思い出を語りたくなりますか？"),
    Question::new("tempo", "夏のテンポで動きたくなりますか？"),
    Question::new("time_signature", "夏のリズムに乗れますか？"),
    Question::new("valence", "夏はあなたを明るい気持ちにさせますか？"),
];

/// Look up a question by identifier
pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// Answer scale shared by every question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum Choice {
    #[strum(serialize = "はい")]
    #[serde(rename = "はい")]
    Yes,
    #[strum(serialize = "どちらかといえばはい")]
    #[serde(rename = "どちらかといえばはい")]
    RatherYes,
    #[strum(serialize = "どちらともいえない")]
    #[serde(rename = "どちらともいえない")]
    Neutral,
    #[strum(serialize = "どちらかといえばいいえ")]
    #[serde(rename = "どちらかといえばいいえ")]
    RatherNo,
    #[strum(serialize = "いいえ")]
    #[serde(rename = "いいえ")]
    No,
}

/// Number of choices offered per question
pub const CHOICE_COUNT: usize = 5;

impl Choice {
    /// All choices in display order
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Choice at a display position, if any
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Label sent to the service
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Preference weight the service assigns to this answer
    pub const fn weight(&self) -> f32 {
        match self {
            Self::Yes => 1.0,
            Self::RatherYes => 0.5,
            Self::Neutral => 0.0,
            Self::RatherNo => -0.5,
            Self::No => -1.0,
        }
    }
}
