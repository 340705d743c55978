//! Recording session owning the forge cassette recorder.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// File name of the forge cassette inside a session directory.
pub const FORGE_CASSETTE: &str = "forge.cassette.yaml";

/// Manages the recorder used while `REPOVIZ_RECORD` is active.
///
/// Cassettes are written to a timestamped directory under the configured root.
pub struct RecordingSession {
    /// Recorder for forge interactions.
    pub forge: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new session writing under `root/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cassette directory already exists
    /// - The directory cannot be created
    pub fn new(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let recorder =
            CassetteRecorder::new(output_dir.join(FORGE_CASSETTE), format!("{timestamp}-forge"));

        Ok(Self { forge: Arc::new(Mutex::new(recorder)), output_dir })
    }

    /// Stores the resolution target in the cassette header.
    pub fn set_target(&self, target: &str) {
        if let Ok(mut recorder) = self.forge.lock() {
            recorder.set_target(target);
        }
    }

    /// Directory the cassette will be written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish the recorder and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the
    /// cassette cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.forge)
            .map_err(|_| "Recording adapter for forge still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock for forge poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write forge cassette: {e}"))?;
        Ok(self.output_dir)
    }
}
