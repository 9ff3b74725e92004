//! Recommendation payload and its decoding
//!
//! The service returns the whole track row it matched; only the fields shown
//! to the user are kept. Decoding is strict about types: a body that is not a
//! JSON object, or whose fields have the wrong type, is a [`QuizError::Decode`].
//! A body that simply lacks `recommended_track` decodes to an empty result,
//! which renders with the placeholder name.

use crate::error::{QuizError, Result};
use serde::{Deserialize, Serialize};

/// Shown instead of the track name when the service did not provide one
pub const NO_DATA_PLACEHOLDER: &str = "データがありません";

/// Default host for the embedded player
pub const DEFAULT_EMBED_BASE_URL: &str = "https://open.spotify.com";

/// Track suggested by the recommendation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub track_id: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    #[serde(default)]
    recommended_track: Option<RecommendationResult>,
}

impl RecommendationResult {
    /// Decode a success body from the recommendation endpoint
    pub fn from_json(body: &str) -> Result<Self> {
        let response: RecommendResponse =
            serde_json::from_str(body).map_err(|e| QuizError::decode(e.to_string()))?;
        Ok(response.recommended_track.unwrap_or_default())
    }

    /// Track name, or the placeholder when absent or empty
    pub fn display_name(&self) -> &str {
        non_empty(&self.name).unwrap_or(NO_DATA_PLACEHOLDER)
    }

    /// Track identifier, treating an empty string as absent
    pub fn track_id(&self) -> Option<&str> {
        non_empty(&self.track_id)
    }

    /// Player URL for the recommended track; `None` without a track id
    pub fn embed_url(&self, base_url: &str) -> Option<String> {
        self.track_id().map(|id| {
            format!(
                "{}/embed/track/{}?autoplay=1&theme=0",
                base_url.trim_end_matches('/'),
                id
            )
        })
    }

    /// True when the service matched nothing it could name
    pub fn is_empty(&self) -> bool {
        non_empty(&self.name).is_none() && self.track_id().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_name_and_id() {
        let result = RecommendationResult::from_json(
            r#"{"recommended_track": {"name": "Summer Breeze", "track_id": "abc123"}}"#,
        )
        .unwrap();
        assert_eq!(result.display_name(), "Summer Breeze");
        assert_eq!(result.track_id(), Some("abc123"));
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = r#"{"recommended_track": {
            "track_id": "7x", "name": "Sunset", "album": "Orange", "artist": "Orangestar",
            "popularity": 41, "key": 5, "mode": 1, "score": 0.93, "duration_ms": null
        }}"#;
        let result = RecommendationResult::from_json(body).unwrap();
        assert_eq!(result.artist.as_deref(), Some("Orangestar"));
        assert_eq!(result.album.as_deref(), Some("Orange"));
        assert_eq!(result.score, Some(0.93));
    }

    #[test]
    fn test_missing_track_renders_placeholder() {
        let result = RecommendationResult::from_json(r#"{"message": "ok"}"#).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.display_name(), NO_DATA_PLACEHOLDER);
        assert_eq!(result.embed_url(DEFAULT_EMBED_BASE_URL), None);
    }

    #[test]
    fn test_null_track_renders_placeholder() {
        let result = RecommendationResult::from_json(r#"{"recommended_track": null}"#).unwrap();
        assert_eq!(result.display_name(), NO_DATA_PLACEHOLDER);
    }

    #[test]
    fn test_empty_name_renders_placeholder() {
        let result =
            RecommendationResult::from_json(r#"{"recommended_track": {"name": ""}}"#).unwrap();
        assert_eq!(result.display_name(), NO_DATA_PLACEHOLDER);
    }

    #[test]
    fn test_not_json_is_decode_error() {
        let err = RecommendationResult::from_json("<html>oops</html>").unwrap_err();
        assert!(matches!(err, QuizError::Decode(_)));
    }

    #[test]
    fn test_wrong_field_type_is_decode_error() {
        let err = RecommendationResult::from_json(r#"{"recommended_track": {"name": 42}}"#)
            .unwrap_err();
        assert!(matches!(err, QuizError::Decode(_)));
    }

    #[test]
    fn test_non_object_body_is_decode_error() {
        let err = RecommendationResult::from_json(r#"["Summer Breeze"]"#).unwrap_err();
        assert!(matches!(err, QuizError::Decode(_)));
    }

    #[test]
    fn test_embed_url() {
        let result = RecommendationResult {
            name: Some("Summer Breeze".to_string()),
            track_id: Some("abc123".to_string()),
            ..Default::default()
        };
        assert_eq!(
            result.embed_url("https://open.spotify.com/").as_deref(),
            Some("https://open.spotify.com/embed/track/abc123?autoplay=1&theme=0")
        );
    }

    #[test]
    fn test_empty_track_id_has_no_player() {
        let result = RecommendationResult {
            name: Some("Summer Breeze".to_string()),
            track_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(result.embed_url(DEFAULT_EMBED_BASE_URL), None);
    }
}
