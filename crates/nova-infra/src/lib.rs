//! Infrastructure layer for Nova.
//!
//! Contains implementations of the traits defined in `nova-core`: the
//! OpenAI-compatible LLM client, shared-secret and JWKS token verifiers,
//! the in-memory session store, the JSON-file transcript store, and the
//! configuration loader.

pub mod auth;
pub mod config;
pub mod filesystem;
pub mod llm;
pub mod session;
pub mod transcript;
