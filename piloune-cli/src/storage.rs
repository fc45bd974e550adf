use anyhow::{Context, Result};
use directories::ProjectDirs;
use piloune_game::{SaveData, SaveStorage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON file persistence with best-effort atomic replace.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

pub fn default_save_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com", "piloune", "Piloune")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok();
    Ok(dir.join("save.json"))
}

impl SaveStorage for FileStorage {
    type Error = FileStorageError;

    fn save(&self, data: &SaveData) -> Result<(), Self::Error> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(data)?)?;
        atomic_rename(&tmp, &self.path)
    }

    fn load(&self) -> Result<Option<SaveData>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(data) => Ok(Some(data)),
            Err(err) => {
                // An undecodable file counts as no snapshot, never a crash.
                log::warn!("unreadable save file, ignoring it: {err}");
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<(), Self::Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// Best-effort atomic replace on the same filesystem.
fn atomic_rename(from: &Path, to: &Path) -> Result<(), FileStorageError> {
    if to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to)?;
    Ok(())
}
