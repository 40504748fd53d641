//! Data directory resolution.

use std::path::PathBuf;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `NOVA_DATA_DIR` environment variable
/// 2. `~/.nova`
/// 3. `.nova` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NOVA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".nova");
    }

    PathBuf::from(".nova")
}
