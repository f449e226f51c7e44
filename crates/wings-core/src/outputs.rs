use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// A JSON document written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub rows: usize,
    pub hash: String,
}

/// Serialises `rows` as a compact JSON array.
pub fn to_json_bytes<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(rows)?)
}

/// Writes `<dir>/<name>.json` through a temporary sibling so a reader never sees a
/// half-written document. Existing files for other names are left alone.
pub fn write_json_array<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<OutputArtifact> {
    fs::create_dir_all(dir)?;

    let bytes = to_json_bytes(rows)?;
    let path = dir.join(format!("{name}.json"));
    let tmp_path = dir.join(format!("{name}.json.tmp"));
    fs::write(&tmp_path, &bytes)?;
    if let Err(err) = fs::rename(&tmp_path, &path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.into());
    }

    let hash = blake3::hash(&bytes).to_hex().to_string();
    info!(path = %path.display(), rows = rows.len(), %hash, "Wrote output");

    Ok(OutputArtifact {
        path,
        rows: rows.len(),
        hash,
    })
}
