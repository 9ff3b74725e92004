//! quiztui Library
//!
//! A ten-question questionnaire that posts its answers to a recommendation
//! service and shows the suggested track. The session state machine, the
//! HTTP client and the terminal UI live here; the binary only wires them up.

pub mod app;
pub mod cli;
pub mod client;
pub mod components;
pub mod config;
pub mod error;
pub mod headless;
pub mod logging;
pub mod questions;
pub mod recommendation;
pub mod session;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use client::{HttpRecommender, Recommender, decode_response};
pub use config::QuizConfig;
pub use error::{QuizError, Result};
pub use questions::{Choice, QUESTIONS, Question};
pub use recommendation::RecommendationResult;
pub use session::{PendingSubmission, ResponseMap, Session, SessionState, ViewKind};
