//! Relay logic and port traits for Nova.
//!
//! This crate defines the traits the infrastructure layer implements
//! (LLM providers, token verifiers, session and transcript stores) and the
//! relay pipeline itself. It depends only on `nova-types` -- never on
//! `nova-infra` or any HTTP/IO crate.

pub mod auth;
pub mod llm;
pub mod prompt;
pub mod relay;
pub mod sanitize;
pub mod session;
pub mod transcript;
