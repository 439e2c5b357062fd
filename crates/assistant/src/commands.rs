//! Command dispatch.
//!
//! `/trigger-command` accepts `{type, payload}` pairs. `send_email` is the
//! one kind the service understands: its payload is validated, the
//! recipient name resolved to a supplier email, and a normalized envelope
//! forwarded. Every other kind passes through to the workflow webhook
//! untouched.

use serde_json::{json, Map, Value};
use tracing::info;

use integrations::{SupabaseClient, WebhookClient, WebhookEvent};

use crate::error::ApiError;
use crate::models::{CommandRequest, CommandResponse};
use crate::suppliers;

/// Command kind that gets validation and supplier resolution.
const SEND_EMAIL: &str = "send_email";

/// Route a command to the workflow webhook.
///
/// # Errors
///
/// Propagates validation, resolution, and webhook failures as [`ApiError`].
pub async fn dispatch(
    db: &SupabaseClient,
    webhook: &WebhookClient,
    command: CommandRequest,
) -> Result<CommandResponse, ApiError> {
    if command.kind == SEND_EMAIL {
        dispatch_email(db, webhook, &command.payload).await
    } else {
        info!(kind = %command.kind, "Forwarding command verbatim");
        let event = WebhookEvent::new(command.kind, Value::Object(command.payload));
        let response = webhook.dispatch(&event).await?;
        Ok(CommandResponse {
            status: "sent",
            recipient_email: None,
            response,
        })
    }
}

/// Validate, resolve, and forward a `send_email` command.
///
/// Validation runs before any network call: a payload missing `recipient`,
/// `subject`, or `message` never reaches the supplier table or the webhook.
async fn dispatch_email(
    db: &SupabaseClient,
    webhook: &WebhookClient,
    payload: &Map<String, Value>,
) -> Result<CommandResponse, ApiError> {
    let recipient = required_field(payload, "recipient")?;
    let subject = required_field(payload, "subject")?;
    let message = required_field(payload, "message")?;

    let email = suppliers::resolve_supplier_email(db, recipient).await?;

    let event = WebhookEvent::new(
        SEND_EMAIL,
        json!({
            "to": email,
            "subject": subject,
            "message": message,
        }),
    );
    let response = webhook.dispatch(&event).await?;

    info!(recipient = %recipient, "Email command dispatched");
    Ok(CommandResponse {
        status: "sent",
        recipient_email: Some(email),
        response,
    })
}

/// Pull a non-empty string field out of a command payload.
fn required_field<'a>(payload: &'a Map<String, Value>, field: &str) -> Result<&'a str, ApiError> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::InvalidPayload(format!("missing required field '{field}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn email_command(payload: Value) -> CommandRequest {
        CommandRequest {
            kind: SEND_EMAIL.to_string(),
            payload: payload.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_required_field_accepts_non_empty_strings() {
        let payload = json!({"recipient": "Acme"}).as_object().cloned().unwrap();
        assert_eq!(required_field(&payload, "recipient").unwrap(), "Acme");
    }

    #[test]
    fn test_required_field_rejects_missing_empty_and_non_string() {
        let payload = json!({"subject": "", "message": 7})
            .as_object()
            .cloned()
            .unwrap();
        for field in ["recipient", "subject", "message"] {
            let err = required_field(&payload, field).unwrap_err();
            assert!(matches!(err, ApiError::InvalidPayload(msg) if msg.contains(field)));
        }
    }

    #[tokio::test]
    async fn test_invalid_email_payload_makes_no_network_calls() {
        let db_server = MockServer::start().await;
        let webhook_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&db_server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&webhook_server)
            .await;

        let db = SupabaseClient::new(db_server.uri(), "k");
        let webhook = WebhookClient::new(webhook_server.uri());

        let command = email_command(json!({"recipient": "Acme", "message": "Need 40 tons"}));
        let err = dispatch(&db, &webhook, command).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayload(msg) if msg.contains("subject")));
    }

    #[tokio::test]
    async fn test_ambiguous_recipient_stops_before_webhook() {
        let db_server = MockServer::start().await;
        let webhook_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/suppliers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"email": "a@one.example"},
                {"email": "a@two.example"}
            ])))
            .expect(1)
            .mount(&db_server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&webhook_server)
            .await;

        let db = SupabaseClient::new(db_server.uri(), "k");
        let webhook = WebhookClient::new(webhook_server.uri());

        let command = email_command(json!({
            "recipient": "Gulf",
            "subject": "Quote",
            "message": "Need pricing"
        }));
        let err = dispatch(&db, &webhook, command).await.unwrap_err();
        assert!(matches!(err, ApiError::AmbiguousSupplier { .. }));
    }

    #[tokio::test]
    async fn test_email_command_forwards_normalized_envelope() {
        let db_server = MockServer::start().await;
        let webhook_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/suppliers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"email": "sales@acme.example"}])),
            )
            .mount(&db_server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "type": "send_email",
                "payload": {
                    "to": "sales@acme.example",
                    "subject": "Quote",
                    "message": "Need 40 tons of rebar"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"queued": true})))
            .expect(1)
            .mount(&webhook_server)
            .await;

        let db = SupabaseClient::new(db_server.uri(), "k");
        let webhook = WebhookClient::new(webhook_server.uri());

        let command = email_command(json!({
            "recipient": "Acme Supplies",
            "subject": "Quote",
            "message": "Need 40 tons of rebar"
        }));
        let response = dispatch(&db, &webhook, command).await.unwrap();
        assert_eq!(response.status, "sent");
        assert_eq!(response.recipient_email.as_deref(), Some("sales@acme.example"));
        assert_eq!(response.response, json!({"queued": true}));
    }

    #[tokio::test]
    async fn test_unknown_kind_passes_through_verbatim() {
        let db_server = MockServer::start().await;
        let webhook_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&db_server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "type": "schedule_inspection",
                "payload": {"site": "Tower A", "when": "tomorrow"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&webhook_server)
            .await;

        let db = SupabaseClient::new(db_server.uri(), "k");
        let webhook = WebhookClient::new(webhook_server.uri());

        let command = CommandRequest {
            kind: "schedule_inspection".to_string(),
            payload: json!({"site": "Tower A", "when": "tomorrow"})
                .as_object()
                .cloned()
                .unwrap_or_default(),
        };
        let response = dispatch(&db, &webhook, command).await.unwrap();
        assert_eq!(response.status, "sent");
        assert!(response.recipient_email.is_none());
    }
}
