//! # Transcript Archive
//!
//! Saves a finished conversation to `~/.chatbox/transcripts/<uuid>.json`.
//!
//! Writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.
//! Archiving never fails the session: errors are logged and swallowed by
//! [`archive_on_exit`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::config::chatbox_dir;
use crate::core::state::App;
use crate::core::transcript::Transcript;

#[derive(Serialize, Deserialize, Debug)]
pub struct ArchivedTranscript {
    pub id: String,
    pub role: Option<String>,
    pub saved_at: DateTime<Utc>,
    pub entries: Transcript,
}

/// Returns `~/.chatbox/transcripts/`, creating it if needed.
pub fn transcripts_dir() -> io::Result<PathBuf> {
    let dir = chatbox_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?
        .join("transcripts");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Writes the transcript into `dir`. Returns `Ok(None)` when there is
/// nothing worth keeping (the user never said anything).
pub fn save_transcript(
    dir: &Path,
    role: Option<&str>,
    transcript: &Transcript,
) -> io::Result<Option<PathBuf>> {
    if !transcript.has_user_turns() {
        return Ok(None);
    }

    let archived = ArchivedTranscript {
        id: uuid::Uuid::new_v4().to_string(),
        role: role.map(str::to_string),
        saved_at: Utc::now(),
        entries: transcript.clone(),
    };

    let path = dir.join(format!("{}.json", archived.id));
    atomic_write_json(&path, &archived)?;
    Ok(Some(path))
}

/// Archive the app's transcript on quit. Single entry point for the TUI.
pub fn archive_on_exit(app: &App) {
    let result = transcripts_dir()
        .and_then(|dir| save_transcript(&dir, app.role(), &app.transcript));
    match result {
        Ok(Some(path)) => info!("Transcript archived to {}", path.display()),
        Ok(None) => debug!("Nothing to archive"),
        Err(e) => warn!("Failed to archive transcript: {}", e),
    }
}
