//! Pretty-printed JSON files replaced atomically.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PersistenceError;

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize `value` to `path` through a sibling `.tmp` file and a rename,
/// so readers never observe a half-written document. Parent directories are
/// created as needed.
///
/// # Errors
///
/// Returns [`PersistenceError`] if encoding, writing or renaming fails.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let bytes = serde_json::to_vec_pretty(value).map_err(|e| PersistenceError::Encode {
        path: path.display().to_string(),
        source: e,
    })?;

    let tmp = tmp_path(path);
    std::fs::write(&tmp, bytes).map_err(|e| io_error(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;
    Ok(())
}

/// Read and decode `path`. An absent file is `Ok(None)`.
///
/// # Errors
///
/// Returns [`PersistenceError`] if the file exists but cannot be read or decoded.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(path, e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| PersistenceError::Decode {
            path: path.display().to_string(),
            source: e,
        })
}
