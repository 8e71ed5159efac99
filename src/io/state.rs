use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::grid::cursor::Cursor;
use crate::ops::visibility::Visibility;

/// Persisted grid UI state: hidden rows/columns and the cursor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridUiState {
    #[serde(flatten)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

/// Read UI state from `path`. Missing or malformed files read as None.
pub fn read_ui_state(path: &Path) -> Option<GridUiState> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed ui state");
            None
        }
    }
}

/// Write UI state to `path`
pub fn write_ui_state(path: &Path, state: &GridUiState) -> io::Result<()> {
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(path, content.as_bytes())
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
