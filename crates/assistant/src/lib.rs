//! AI project assistant service for construction project management.
//!
//! A stateless glue layer in front of three external services:
//! - an OpenAI-style completion API for chat replies, project plans, and
//!   weekly-update summaries
//! - Supabase for persistence and document storage
//! - a workflow webhook that executes side-effectful commands such as
//!   sending email to suppliers
//!
//! The binary lives in `src/bin/server.rs`; everything here is reachable
//! from tests.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)] // Allow brand names like OpenAI, Supabase without backticks

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;
pub mod suppliers;

pub use config::Config;
pub use error::ApiError;
pub use server::{build_router, AppState};
