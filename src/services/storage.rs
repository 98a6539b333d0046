use crate::error::ExtractError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// `Acceptable Use Policy` -> `acceptable_use_policy`.
pub fn policy_file_stem(display_name: &str) -> String {
    display_name.replace(' ', "_").to_lowercase()
}

pub fn policy_output_path(out_dir: &Path, display_name: &str) -> PathBuf {
    out_dir.join(format!("{}.json", policy_file_stem(display_name)))
}

/// Write `obj` as indented JSON, creating parent dirs and overwriting any
/// existing file.
pub fn save_json<T: Serialize>(obj: &T, path: &Path) -> Result<PathBuf, ExtractError> {
    let io_err = |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let body = serde_json::to_string_pretty(obj).map_err(ExtractError::Encode)?;
    std::fs::write(path, body).map_err(io_err)?;
    Ok(path.to_path_buf())
}
