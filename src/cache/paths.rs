// Cache path utilities.
// Resolves the per-user events file inside the cache directory.

use std::path::{Path, PathBuf};

/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = ".cache";

/// Path to a user's cached events file.
pub fn events_path(cache_dir: &Path, username: &str) -> PathBuf {
    cache_dir.join(format!("{}.json", sanitize_name(username)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
