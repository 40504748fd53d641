//! HTTP layer for the Nova relay.
//!
//! Three routes: `POST /bot`, `POST /logout` and `GET /health`, with optional
//! bearer token authentication and cookie-tracked sessions.

pub mod cookie;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
