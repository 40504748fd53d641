//! JSON-file transcript store.
//!
//! One file per storage key, holding the transcript as a bare JSON array
//! (the same shape the browser client keeps in local storage). File names
//! are the SHA-256 of the key, so user subjects like `auth0|123` never reach
//! the filesystem verbatim.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use nova_core::transcript::TranscriptStore;
use nova_types::chat::Transcript;
use nova_types::error::TranscriptError;

pub struct JsonTranscriptStore {
    dir: PathBuf,
}

impl JsonTranscriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `{data_dir}/transcripts`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("transcripts"))
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{digest:x}.json"))
    }
}

impl TranscriptStore for JsonTranscriptStore {
    async fn load(&self, key: &str) -> Result<Transcript, TranscriptError> {
        let path = self.path_for(key);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Transcript::new());
            }
            Err(err) => return Err(TranscriptError::StorageError(err.to_string())),
        };

        match serde_json::from_str::<Transcript>(&content) {
            Ok(transcript) => Ok(transcript),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "unreadable transcript, starting empty"
                );
                Ok(Transcript::new())
            }
        }
    }

    async fn save(&self, key: &str, transcript: &Transcript) -> Result<(), TranscriptError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| TranscriptError::StorageError(e.to_string()))?;

        let json = serde_json::to_string(transcript)
            .map_err(|e| TranscriptError::Serialization(e.to_string()))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| TranscriptError::StorageError(e.to_string()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| TranscriptError::StorageError(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), TranscriptError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TranscriptError::StorageError(err.to_string())),
        }
    }
}
