//! Chat-completion client for the OpenAI API.
//!
//! Every assistant feature that needs generated text (chat replies, project
//! plans, weekly-update summaries) funnels through [`OpenAIClient::complete`],
//! which runs a single system + user exchange and hands back the reply text.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IntegrationError;

/// OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model
const DEFAULT_MODEL: &str = "gpt-4";

/// Service name used in errors and logs.
const SERVICE: &str = "completion";

/// OpenAI API request message
#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

/// OpenAI API request
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
}

/// OpenAI API response choice message
#[derive(Debug, Deserialize)]
struct OpenAIChoiceMessage {
    content: Option<String>,
}

/// OpenAI API response choice
#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIChoiceMessage,
}

/// OpenAI API response
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

/// OpenAI API error
#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
    #[serde(rename = "type")]
    #[allow(dead_code)]
    error_type: Option<String>,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

/// Client for the OpenAI chat-completions API.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIClient {
    /// Create a new client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set a custom endpoint URL (used in tests to point at a mock server).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the completion model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Run one completion: a system prompt plus a single user message.
    ///
    /// Returns the text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError`] when the request fails, the API answers
    /// with a non-success status, or the response carries no choice text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, IntegrationError> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        debug!(model = %self.model, user_len = user.len(), "Requesting completion");

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|source| IntegrationError::Request {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| IntegrationError::Request {
                service: SERVICE,
                source,
            })?;

        if !status.is_success() {
            // The API wraps failures in {"error": {...}}; fall back to the
            // raw body when that shape is absent.
            let message = match serde_json::from_str::<OpenAIErrorResponse>(&body) {
                Ok(parsed) => parsed.error.message,
                Err(_) => body,
            };
            return Err(IntegrationError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OpenAIResponse =
            serde_json::from_str(&body).map_err(|e| IntegrationError::Protocol {
                service: SERVICE,
                reason: format!("invalid completion body: {e}"),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| IntegrationError::Protocol {
                service: SERVICE,
                reason: "response contained no choice text".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAIClient {
        OpenAIClient::new("test-key").with_base_url(format!("{}/v1/chat/completions", server.uri()))
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "You are terse."},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "hi there"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server)
            .complete("You are terse.", "hello")
            .await
            .unwrap();
        assert_eq!(reply, "hi there");
    }

    #[tokio::test]
    async fn test_complete_uses_overridden_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_model("gpt-4o-mini");
        client.complete("s", "u").await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_surfaces_api_error_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error"
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("s", "u").await.unwrap_err();
        match err {
            IntegrationError::Api {
                status, message, ..
            } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_rejects_empty_choices() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("s", "u").await.unwrap_err();
        assert!(matches!(err, IntegrationError::Protocol { .. }));
    }
}
