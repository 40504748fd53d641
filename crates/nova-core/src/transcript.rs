//! Client-side chat history port.
//!
//! The transcript lives with the client, keyed by user identity, exactly as
//! the browser client keeps it in local storage.

use std::future::Future;

use nova_types::chat::Transcript;
use nova_types::error::TranscriptError;

/// Storage key used when no user identity is known.
pub const ANONYMOUS_KEY: &str = "chatMessages";

/// Storage key for a user's transcript.
///
/// Anonymous users share [`ANONYMOUS_KEY`]; an authenticated user gets
/// `chatMessages:<subject>`.
pub fn storage_key(subject: Option<&str>) -> String {
    match subject.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subject) => format!("{ANONYMOUS_KEY}:{subject}"),
        None => ANONYMOUS_KEY.to_string(),
    }
}

/// Persistence for transcripts.
pub trait TranscriptStore: Send + Sync {
    /// Load a transcript. A key with nothing stored yields an empty transcript.
    fn load(&self, key: &str) -> impl Future<Output = Result<Transcript, TranscriptError>> + Send;

    /// Replace the stored transcript for `key`.
    fn save(
        &self,
        key: &str,
        transcript: &Transcript,
    ) -> impl Future<Output = Result<(), TranscriptError>> + Send;

    /// Remove the stored transcript for `key`, if any.
    fn clear(&self, key: &str) -> impl Future<Output = Result<(), TranscriptError>> + Send;
}
