//! Request and response payloads for the HTTP API, plus the rows persisted
//! to the table service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ===== API Payloads =====

/// `POST /chat` request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /chat` response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

/// `POST /projects` request.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub user_id: String,
    pub project_name: String,
    pub project_goal: String,
    /// Optional cap on how many phases the generated plan may have.
    #[serde(default)]
    pub num_phases: Option<u32>,
}

/// `POST /projects` response.
#[derive(Debug, Serialize)]
pub struct CreateProjectResponse {
    pub project_id: String,
    pub plan: String,
}

/// Cadence of a project update. Weekly updates get an analyst summary,
/// daily updates are stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Daily,
    Weekly,
}

/// `POST /updates` request.
#[derive(Debug, Deserialize)]
pub struct SubmitUpdateRequest {
    pub project_id: String,
    pub update_text: String,
    #[serde(rename = "type")]
    pub kind: UpdateKind,
}

/// `POST /updates` response.
#[derive(Debug, Serialize)]
pub struct SubmitUpdateResponse {
    pub summary: String,
}

/// `POST /upload` response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// `POST /trigger-command` request. `payload` stays schemaless; what it
/// must contain depends on the command kind.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Map<String, Value>,
}

/// `POST /trigger-command` response. `recipient_email` only appears for
/// commands that resolved one.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_email: Option<String>,
    pub response: Value,
}

// ===== Table Rows =====

/// Row in the `projects` table.
#[derive(Debug, Serialize)]
pub struct ProjectRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub goal: String,
    pub plan: String,
}

/// Row in the `updates` table.
#[derive(Debug, Serialize)]
pub struct UpdateRecord {
    pub project_id: String,
    #[serde(rename = "type")]
    pub kind: UpdateKind,
    pub original: String,
    pub summary: String,
}

/// Row in the `documents` table.
#[derive(Debug, Serialize)]
pub struct DocumentRecord {
    pub project_id: String,
    pub file_name: String,
    pub url: String,
}
