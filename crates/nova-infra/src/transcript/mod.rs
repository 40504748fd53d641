//! Transcript store implementations.

pub mod json_file;
