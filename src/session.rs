//! Session handoff storage.
//!
//! A completed analysis is handed to the report view through a key-value
//! session store under a fixed key. Values are JSON strings.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::analysis::{AnalysisData, AnalysisResult};
use crate::error::{ErrorContext, GbpError, Result};

/// Key the analysis handoff is stored under
pub const SESSION_KEY: &str = "gbpAnalysisData";

/// Analysis handed from the analyse step to the report view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHandoff {
    pub overall_score: u8,
    pub analysis_data: AnalysisData,
    pub business_name: String,
    #[serde(default)]
    pub business_phone_number: String,
}

impl SessionHandoff {
    #[must_use]
    pub fn new(result: &AnalysisResult, business_phone_number: impl Into<String>) -> Self {
        Self {
            overall_score: result.overall_score,
            analysis_data: result.analysis_data.clone(),
            business_name: result.analysis_data.business_name.clone(),
            business_phone_number: business_phone_number.into(),
        }
    }
}

/// String key-value store scoped to one user session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

fn storage_error(message: impl Into<String>) -> GbpError {
    GbpError::session(message)
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| storage_error("lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| storage_error("lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| storage_error("lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed session store: one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| GbpError::io(&dir, e))?;
        }
        Ok(Self { dir })
    }

    /// Store under the user's cache directory
    pub fn default_location() -> Result<Self> {
        let dir = dirs::cache_dir()
            .map(|d| d.join("gbp-score").join("session"))
            .ok_or_else(|| storage_error("no cache directory available"))?;
        Self::new(dir)
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Filesystem-safe filename for a key using SHA256 hash.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        self.dir.join(format!("{:x}.json", hasher.finalize()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GbpError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| GbpError::io(path, e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GbpError::io(path, e)),
        }
    }
}

/// Store the handoff under [`SESSION_KEY`], replacing any previous one.
pub fn save_handoff(store: &dyn SessionStore, handoff: &SessionHandoff) -> Result<()> {
    let json = serde_json::to_string(handoff)
        .map_err(|e| GbpError::session(format!("encoding analysis handoff: {e}")))?;
    store.set(SESSION_KEY, &json).context("saving analysis handoff")?;
    tracing::debug!(business = %handoff.business_name, "Saved analysis handoff");
    Ok(())
}

/// Load the stored handoff, if any.
pub fn load_handoff(store: &dyn SessionStore) -> Result<Option<SessionHandoff>> {
    match store.get(SESSION_KEY)? {
        Some(json) => {
            let handoff = serde_json::from_str(&json)
                .map_err(|e| GbpError::session(format!("reading analysis handoff: {e}")))?;
            Ok(Some(handoff))
        }
        None => Ok(None),
    }
}

pub fn clear_handoff(store: &dyn SessionStore) -> Result<()> {
    store.remove(SESSION_KEY)
}
