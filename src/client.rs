//! Recommendation service client
//!
//! [`Recommender`] is the seam between the session and the network. The HTTP
//! implementation posts the collected answers as a JSON object and decodes the
//! reply strictly; tests substitute their own implementations.

use crate::config::QuizConfig;
use crate::error::{QuizError, Result};
use crate::recommendation::RecommendationResult;
use crate::session::ResponseMap;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

/// Something that turns a completed response map into a recommendation
pub trait Recommender: Send + Sync {
    fn recommend(&self, responses: &ResponseMap) -> Result<RecommendationResult>;

    /// Where requests go, for logs and status lines
    fn endpoint(&self) -> &str;
}

/// Blocking HTTP client for the `/recommend` endpoint
#[derive(Debug, Clone)]
pub struct HttpRecommender {
    client: Client,
    endpoint: String,
}

impl HttpRecommender {
    pub fn new(config: &QuizConfig) -> Result<Self> {
        let mut builder = Client::builder();
        // Without a configured value the transport default applies
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| QuizError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Recommender for HttpRecommender {
    fn recommend(&self, responses: &ResponseMap) -> Result<RecommendationResult> {
        info!(
            "Submitting {} answers to {}",
            responses.len(),
            self.endpoint
        );
        debug!("Request body: {:?}", responses);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(responses)
            .send()
            .map_err(|e| QuizError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| QuizError::transport(format!("Failed to read response body: {}", e)))?;

        decode_response(status, &body)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Map a raw status and body to a recommendation or a typed error
pub fn decode_response(status: u16, body: &str) -> Result<RecommendationResult> {
    if !(200..300).contains(&status) {
        warn!("Recommendation service returned {}: {}", status, body.trim());
        return Err(QuizError::Status {
            status,
            body: body.trim().to_string(),
        });
    }

    let result = RecommendationResult::from_json(body)?;
    if result.is_empty() {
        warn!("Recommendation response carried no track");
    } else {
        info!("Received recommendation: {}", result.display_name());
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success() {
        let result = decode_response(
            200,
            r#"{"recommended_track": {"name": "Summer Breeze", "track_id": "abc123"}}"#,
        )
        .unwrap();
        assert_eq!(result.name.as_deref(), Some("Summer Breeze"));
    }

    #[test]
    fn test_decode_server_error_keeps_body() {
        let err = decode_response(500, "internal error\n").unwrap_err();
        match err {
            QuizError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_client_error() {
        let err = decode_response(422, r#"{"detail": "field required"}"#).unwrap_err();
        assert!(err.to_string().contains("field required"));
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let err = decode_response(200, "not json").unwrap_err();
        assert!(matches!(err, QuizError::Decode(_)));
    }

    #[test]
    fn test_any_2xx_is_success() {
        assert!(decode_response(201, r#"{"recommended_track": {"name": "x"}}"#).is_ok());
        assert!(decode_response(299, "{}").is_ok());
        assert!(decode_response(300, "{}").is_err());
    }

    #[test]
    fn test_http_recommender_uses_configured_endpoint() {
        let config = QuizConfig {
            endpoint: "http://127.0.0.1:1/recommend".to_string(),
            ..QuizConfig::default()
        };
        let client = HttpRecommender::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:1/recommend");
    }
}
