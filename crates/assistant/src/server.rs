//! HTTP server for the assistant API.
//!
//! Handlers stay thin: validate, call out through the injected clients,
//! persist, respond. Anything failure-shaped becomes an
//! [`ApiError`](crate::error::ApiError) and is mapped to a status code in
//! one place.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use integrations::{OpenAIClient, SupabaseClient, WebhookClient};

use crate::commands;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    ChatRequest, ChatResponse, CommandRequest, CommandResponse, CreateProjectRequest,
    CreateProjectResponse, DocumentRecord, ProjectRecord, SubmitUpdateRequest,
    SubmitUpdateResponse, UpdateKind, UpdateRecord, UploadResponse,
};
use crate::prompts;

/// Table holding project rows.
const PROJECT_TABLE: &str = "projects";
/// Table holding update rows.
const UPDATE_TABLE: &str = "updates";
/// Table holding document rows.
const DOCUMENT_TABLE: &str = "documents";

/// Shared application state.
///
/// The clients are injected here, never reached through globals, so tests
/// can point every one of them at a mock server.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub completion: OpenAIClient,
    pub db: SupabaseClient,
    pub webhook: WebhookClient,
}

impl AppState {
    /// Build state from configuration, constructing the real clients.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let completion = OpenAIClient::new(config.openai_api_key.clone())
            .with_model(config.completion_model.clone());
        let db = SupabaseClient::new(config.supabase_url.clone(), config.supabase_key.clone());
        let webhook = WebhookClient::new(config.webhook_url.clone());
        Self {
            config,
            completion,
            db,
            webhook,
        }
    }
}

/// Build the router with all routes and middleware.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/chat", post(chat))
        .route("/projects", post(create_project))
        .route("/updates", post(submit_update))
        .route(
            "/upload",
            post(upload_document).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/trigger-command", post(trigger_command))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Credentials stay allowed, so the origin is mirrored
                // rather than wildcarded.
                .layer(CorsLayer::very_permissive()),
        )
        .with_state(state)
}

// ===== Handlers =====

/// Service banner.
async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Project Assistant API is running." }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "assistant",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Freeform chat against the configured assistant prompt.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = state
        .completion
        .complete(&state.config.prompts.chat, &request.message)
        .await?;
    Ok(Json(ChatResponse { message }))
}

/// Generate a phased plan for a new project and persist it.
async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<CreateProjectResponse>, ApiError> {
    let prompt = prompts::plan_request(
        &state.config.prompts.planner_instruction,
        &request.project_goal,
        request.num_phases,
    );
    let plan = state
        .completion
        .complete(&state.config.prompts.planner, &prompt)
        .await?;

    let project_id = Uuid::new_v4().to_string();
    let record = ProjectRecord {
        id: project_id.clone(),
        user_id: request.user_id,
        name: request.project_name,
        goal: request.project_goal,
        plan: plan.clone(),
    };
    state.db.insert(PROJECT_TABLE, &record).await?;

    info!(project_id = %project_id, name = %record.name, "Project created");
    Ok(Json(CreateProjectResponse { project_id, plan }))
}

/// Store a progress update. Weekly updates get an analyst summary first;
/// daily updates are stored verbatim without touching the completion
/// service.
async fn submit_update(
    State(state): State<AppState>,
    Json(request): Json<SubmitUpdateRequest>,
) -> Result<Json<SubmitUpdateResponse>, ApiError> {
    let summary = match request.kind {
        UpdateKind::Weekly => {
            let prompt = prompts::weekly_summary_request(
                &state.config.prompts.analyst_instruction,
                &request.update_text,
            );
            state
                .completion
                .complete(&state.config.prompts.analyst, &prompt)
                .await?
        }
        UpdateKind::Daily => request.update_text.clone(),
    };

    let record = UpdateRecord {
        project_id: request.project_id,
        kind: request.kind,
        original: request.update_text,
        summary: summary.clone(),
    };
    state.db.insert(UPDATE_TABLE, &record).await?;

    info!(project_id = %record.project_id, kind = ?record.kind, "Update stored");
    Ok(Json(SubmitUpdateResponse { summary }))
}

/// Receive a multipart document, store it, and record its public URL.
///
/// Expects two parts: `file` (the binary) and `project_id` (text). The file
/// is read fully into memory before the storage call.
async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>, Option<String>)> = None;
    let mut project_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidPayload(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("document").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::InvalidPayload(format!("could not read file field: {e}"))
                })?;
                file = Some((file_name, bytes.to_vec(), content_type));
            }
            "project_id" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::InvalidPayload(format!("could not read project_id field: {e}"))
                })?;
                project_id = Some(value);
            }
            _ => {}
        }
    }

    let (file_name, bytes, content_type) =
        file.ok_or_else(|| ApiError::InvalidPayload("missing 'file' field".to_string()))?;
    let project_id = project_id
        .ok_or_else(|| ApiError::InvalidPayload("missing 'project_id' field".to_string()))?;

    let object_path = format!("{project_id}/{file_name}");
    state
        .db
        .upload_object(
            &state.config.storage_bucket,
            &object_path,
            bytes,
            content_type,
        )
        .await?;
    let url = state.db.public_url(&state.config.storage_bucket, &object_path);

    let record = DocumentRecord {
        project_id,
        file_name,
        url: url.clone(),
    };
    state.db.insert(DOCUMENT_TABLE, &record).await?;

    info!(project_id = %record.project_id, file = %record.file_name, "Document stored");
    Ok(Json(UploadResponse { url }))
}

/// Hand a command to the dispatcher.
async fn trigger_command(
    State(state): State<AppState>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let response = commands::dispatch(&state.db, &state.webhook, request).await?;
    Ok(Json(response))
}
