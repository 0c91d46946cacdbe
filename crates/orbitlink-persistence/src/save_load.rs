use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use orbitlink_core::state::PersistedState;

const SAVE_FILE: &str = "save.json";
const TEMP_FILE: &str = "save_temp.json";

/// Where a loaded state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Canonical,
    /// Only the temp file was readable; it has been promoted to canonical.
    RecoveredTemp,
    Fresh,
}

/// Save-side failures. The canonical file is untouched in every case except
/// `Replace`, where the new save is still intact in the temp file.
#[derive(Debug)]
pub enum PersistenceError {
    CreateDir { path: PathBuf, source: io::Error },
    Serialize(serde_json::Error),
    Write { path: PathBuf, source: io::Error },
    Replace { path: PathBuf, source: io::Error },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => {
                write!(f, "failed to create save directory {}: {source}", path.display())
            }
            Self::Serialize(e) => write!(f, "failed to serialize save data: {e}"),
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
            Self::Replace { path, source } => {
                write!(f, "failed to replace {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDir { source, .. }
            | Self::Write { source, .. }
            | Self::Replace { source, .. } => Some(source),
            Self::Serialize(e) => Some(e),
        }
    }
}

/// Save files in one directory.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE)
    }

    pub fn temp_path(&self) -> PathBuf {
        self.dir.join(TEMP_FILE)
    }

    /// Write `state` atomically: temp file, flush to disk, then rename over
    /// the canonical file.
    pub fn save(&self, state: &PersistedState) -> Result<(), PersistenceError> {
        let result = self.write_atomic(state);
        match &result {
            Ok(()) => info!("saved session to {}", self.save_path().display()),
            Err(e) => error!("save failed: {e}"),
        }
        result
    }

    fn write_atomic(&self, state: &PersistedState) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let json = serde_json::to_string_pretty(state).map_err(PersistenceError::Serialize)?;

        let temp = self.temp_path();
        write_synced(&temp, json.as_bytes()).map_err(|source| PersistenceError::Write {
            path: temp.clone(),
            source,
        })?;

        let canonical = self.save_path();
        match fs::remove_file(&canonical) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(PersistenceError::Replace {
                    path: canonical,
                    source,
                })
            }
        }
        fs::rename(&temp, &canonical).map_err(|source| PersistenceError::Replace {
            path: canonical.clone(),
            source,
        })
    }

    /// Load the best available state. Never fails.
    pub fn load(&self) -> PersistedState {
        self.load_with_source().0
    }

    pub fn load_with_source(&self) -> (PersistedState, LoadSource) {
        let canonical = self.save_path();
        if let Some(state) = read_state(&canonical) {
            info!("loaded session from {}", canonical.display());
            return (state, LoadSource::Canonical);
        }

        let temp = self.temp_path();
        if let Some(state) = read_state(&temp) {
            // Finish the rename an interrupted save never got to.
            match fs::rename(&temp, &canonical) {
                Ok(()) => info!("recovered session from {}", temp.display()),
                Err(e) => warn!("recovered session from {} but could not promote it: {e}", temp.display()),
            }
            return (state, LoadSource::RecoveredTemp);
        }

        info!("no usable save in {}; starting fresh", self.dir.display());
        (PersistedState::default(), LoadSource::Fresh)
    }

    /// Remove both save files. Missing files are fine.
    pub fn delete(&self) -> io::Result<()> {
        for path in [self.save_path(), self.temp_path()] {
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// `None` when the file is missing, unreadable or not a valid save.
fn read_state(path: &Path) -> Option<PersistedState> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("could not read {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!("ignoring corrupt save {}: {e}", path.display());
            None
        }
    }
}
