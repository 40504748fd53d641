//! Observability for Nova: tracing subscriber setup.

pub mod tracing_setup;
