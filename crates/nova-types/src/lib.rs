//! Shared domain types for Nova.
//!
//! Wire bodies, chat transcripts, LLM request/response shapes, token claims,
//! sessions, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod session;
