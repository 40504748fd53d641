//! HTTP request handlers.

pub mod bot;
pub mod health;
pub mod session;
