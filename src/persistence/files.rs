use super::parser::{decode_collection, Decoded};
use super::serializer::encode_collection;
use crate::domain::{TaskCollection, Timestamp};
use crate::error::StoreError;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extension of per-user task files
pub const USER_FILE_EXTENSION: &str = "srs";

/// Path of a user's task file inside the data directory
pub fn user_file(data_dir: &Path, user: &str) -> PathBuf {
    data_dir.join(format!("{}.{}", user, USER_FILE_EXTENSION))
}

/// Load and decode a user's task file
pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<Decoded, StoreError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode_collection(&content)?;
    log::debug!(
        "Loaded {} tasks and {} comments from {}",
        decoded.tasks.len(),
        decoded.comments.len(),
        path.display()
    );
    Ok(decoded)
}

/// Replace a user's task file with the full collection
pub fn save_collection<P: AsRef<Path>>(path: P, collection: &TaskCollection, now: Timestamp) -> Result<(), StoreError> {
    let path = path.as_ref();
    let content = encode_collection(collection, now);

    atomic_write(path, &content).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Saved {} tasks to {}", collection.len(), path.display());
    Ok(())
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    // Create temp file in the same directory
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;

    // Atomically rename temp file to target
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Users with a task file in the data directory, sorted by name
pub fn list_users(data_dir: &Path) -> Result<Vec<String>> {
    let mut users = Vec::new();

    let entries = fs::read_dir(data_dir)
        .with_context(|| format!("Failed to read data directory: {}", data_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(USER_FILE_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            users.push(stem.to_string());
        }
    }

    users.sort();
    Ok(users)
}

/// Check a user name: ASCII letters, digits, `-` and `_` only, not blank
pub fn validate_user_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("User name cannot be blank");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!("Only letters, digits, hyphens and underscores are allowed in user names: {}", name);
    }
    Ok(name.to_string())
}

/// Create an empty task file for a new user
pub fn create_user(data_dir: &Path, name: &str) -> Result<PathBuf> {
    let name = validate_user_name(name)?;
    let path = user_file(data_dir, &name);
    if path.exists() {
        anyhow::bail!("User already exists: {}", name);
    }

    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;
    atomic_write(&path, "").with_context(|| format!("Failed to create file: {}", path.display()))?;

    log::info!("Created user {} at {}", name, path.display());
    Ok(path)
}
