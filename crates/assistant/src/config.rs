//! Service configuration.
//!
//! Everything is read from the environment once at startup. The Supabase
//! coordinates, the OpenAI key, and the workflow webhook URL are required;
//! the rest has defaults, including the prompt strings (see
//! [`crate::prompts`]).

use std::env;

use anyhow::{Context, Result};

use crate::prompts;

// ===== Required variables =====

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_KEY: &str = "SUPABASE_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_WEBHOOK_URL: &str = "WEBHOOK_URL";

// ===== Optional variables =====

pub const ENV_PORT: &str = "ASSISTANT_PORT";
pub const ENV_COMPLETION_MODEL: &str = "ASSISTANT_COMPLETION_MODEL";
pub const ENV_STORAGE_BUCKET: &str = "ASSISTANT_STORAGE_BUCKET";
pub const ENV_MAX_UPLOAD_BYTES: &str = "ASSISTANT_MAX_UPLOAD_BYTES";
pub const ENV_CHAT_PROMPT: &str = "ASSISTANT_CHAT_PROMPT";
pub const ENV_PLANNER_PROMPT: &str = "ASSISTANT_PLANNER_PROMPT";
pub const ENV_PLANNER_INSTRUCTION: &str = "ASSISTANT_PLANNER_INSTRUCTION";
pub const ENV_ANALYST_PROMPT: &str = "ASSISTANT_ANALYST_PROMPT";
pub const ENV_ANALYST_INSTRUCTION: &str = "ASSISTANT_ANALYST_INSTRUCTION";

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the HTTP server.
    pub port: u16,
    /// Supabase project URL.
    pub supabase_url: String,
    /// Supabase service key.
    pub supabase_key: String,
    /// OpenAI API key.
    pub openai_api_key: String,
    /// Model used for completion calls.
    pub completion_model: String,
    /// Workflow webhook URL commands are forwarded to.
    pub webhook_url: String,
    /// Storage bucket uploaded documents land in.
    pub storage_bucket: String,
    /// Upper bound on accepted upload bodies, in bytes.
    pub max_upload_bytes: usize,
    /// Prompt strings used for completion calls.
    pub prompts: PromptConfig,
}

/// Prompt strings, overridable per deployment.
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// System prompt for `/chat`.
    pub chat: String,
    /// System prompt for plan generation.
    pub planner: String,
    /// Instruction the project goal is appended to.
    pub planner_instruction: String,
    /// System prompt for weekly-update analysis.
    pub analyst: String,
    /// Instruction the weekly update text is appended to.
    pub analyst_instruction: String,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails when a required variable is absent or a numeric variable does
    /// not parse.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: parsed_or(ENV_PORT, 8080)?,
            supabase_url: required(ENV_SUPABASE_URL)?,
            supabase_key: required(ENV_SUPABASE_KEY)?,
            openai_api_key: required(ENV_OPENAI_API_KEY)?,
            completion_model: or_default(ENV_COMPLETION_MODEL, "gpt-4"),
            webhook_url: required(ENV_WEBHOOK_URL)?,
            storage_bucket: or_default(ENV_STORAGE_BUCKET, "documents"),
            max_upload_bytes: parsed_or(ENV_MAX_UPLOAD_BYTES, 50 * 1024 * 1024)?,
            prompts: PromptConfig::from_env(),
        })
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            chat: prompts::DEFAULT_CHAT_PROMPT.to_string(),
            planner: prompts::DEFAULT_PLANNER_PROMPT.to_string(),
            planner_instruction: prompts::DEFAULT_PLANNER_INSTRUCTION.to_string(),
            analyst: prompts::DEFAULT_ANALYST_PROMPT.to_string(),
            analyst_instruction: prompts::DEFAULT_ANALYST_INSTRUCTION.to_string(),
        }
    }
}

impl PromptConfig {
    fn from_env() -> Self {
        Self {
            chat: or_default(ENV_CHAT_PROMPT, prompts::DEFAULT_CHAT_PROMPT),
            planner: or_default(ENV_PLANNER_PROMPT, prompts::DEFAULT_PLANNER_PROMPT),
            planner_instruction: or_default(
                ENV_PLANNER_INSTRUCTION,
                prompts::DEFAULT_PLANNER_INSTRUCTION,
            ),
            analyst: or_default(ENV_ANALYST_PROMPT, prompts::DEFAULT_ANALYST_PROMPT),
            analyst_instruction: or_default(
                ENV_ANALYST_INSTRUCTION,
                prompts::DEFAULT_ANALYST_INSTRUCTION,
            ),
        }
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} must be set"))
}

fn or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} must be numeric, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
