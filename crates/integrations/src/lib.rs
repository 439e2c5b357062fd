//! Clients for the external services the assistant delegates to.
//!
//! This crate provides:
//! - Chat-completion client for the OpenAI API
//! - Supabase client for PostgREST tables and object storage
//! - Workflow webhook client for command execution
//! - A shared error type distinguishing transport, API, and protocol
//!   failures
//!
//! All clients take their endpoint at construction time so tests can point
//! them at a mock server.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)] // Allow brand names like OpenAI, PostgREST without backticks

pub mod completion;
pub mod error;
pub mod supabase;
pub mod webhook;

pub use completion::OpenAIClient;
pub use error::IntegrationError;
pub use supabase::SupabaseClient;
pub use webhook::{WebhookClient, WebhookEvent};
