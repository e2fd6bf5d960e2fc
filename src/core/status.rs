//! Status file mirroring and output cadence gates

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TrackerError};
use crate::types::StatusSnapshot;

/// Write the status snapshot to `path`, replacing it atomically.
///
/// Creates the parent directory if needed. Readers never see a partially
/// written file: the JSON goes to a sibling temp file which is then renamed.
pub fn save_status(snapshot: &StatusSnapshot, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string(snapshot)?;
    let tmp = temp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Load a status file written by [`save_status`]
pub fn load_status(path: impl AsRef<Path>) -> Result<StatusSnapshot> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|source| TrackerError::Status {
        path: path.to_path_buf(),
        source,
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "status".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

/// Fires at most once per interval of frame time; the first call always fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalGate {
    interval_ms: f64,
    last_ms: Option<f64>,
}

impl IntervalGate {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_ms: None,
        }
    }

    /// `true` when due at `now_ms`; the gate then restarts from `now_ms`
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let due = self
            .last_ms
            .map_or(true, |last| now_ms - last >= self.interval_ms);
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}
