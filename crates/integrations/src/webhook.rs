//! Workflow webhook client.
//!
//! Commands accepted by the API are not executed in-process; they are handed
//! to an automation workflow listening on a single POST endpoint.
//! [`WebhookEvent`] is the envelope every command crosses the wire in.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::IntegrationError;

/// Service name used in errors and logs.
const SERVICE: &str = "webhook";

/// Envelope for commands forwarded to the workflow webhook.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Value,
}

impl WebhookEvent {
    /// Build an envelope for a command of the given kind.
    #[must_use]
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

/// Client for the automation workflow's inbound webhook.
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    /// Create a client posting to `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// POST the event and return the workflow's JSON reply.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError`] when the webhook is unreachable, answers
    /// with a non-success status, or replies with a body that is not JSON.
    pub async fn dispatch(&self, event: &WebhookEvent) -> Result<Value, IntegrationError> {
        debug!(kind = %event.kind, "Dispatching event to workflow webhook");

        let response = self
            .client
            .post(&self.url)
            .json(event)
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
            return Err(IntegrationError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| IntegrationError::Protocol {
            service: SERVICE,
            reason: format!("workflow reply was not JSON: {e}"),
        })
    }
}
