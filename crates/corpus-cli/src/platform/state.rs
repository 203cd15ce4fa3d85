//! File-backed session persistence for the CLI.
//!
//! The persisted session token lives in `$CORPUS_HOME/session.json` (default
//! `~/.config/corpus/`), written with restricted permissions (0600). The file
//! holds one JSON object keyed like the web client's local storage.

use std::{
    collections::HashMap,
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
    sync::Arc,
};

use corpus_core::session::PersistedToken;
use corpus_state::repository::{Repository, RepositoryError};

/// Session cache filename.
const SESSION_FILE: &str = "session.json";

/// Returns the directory holding CLI state, honoring `$CORPUS_HOME`.
fn corpus_home() -> PathBuf {
    if let Ok(home) = std::env::var("CORPUS_HOME") {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .map(|h| h.join(".config").join("corpus"))
        .expect("Could not determine home directory")
}

/// The token repository backing the CLI session.
#[derive(Debug)]
pub(crate) struct SessionFileStore {
    path: PathBuf,
}

impl SessionFileStore {
    fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<HashMap<String, PersistedToken>, RepositoryError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, entries: &HashMap<String, PersistedToken>) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;

        // The file holds a bearer token, so permissions are restricted.
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl Repository<PersistedToken> for SessionFileStore {
    async fn get(&self, key: String) -> Result<Option<PersistedToken>, RepositoryError> {
        Ok(self.read_all()?.remove(&key))
    }

    async fn list(&self) -> Result<Vec<PersistedToken>, RepositoryError> {
        Ok(self.read_all()?.into_values().collect())
    }

    async fn set(&self, key: String, value: PersistedToken) -> Result<(), RepositoryError> {
        let mut entries = self.read_all()?;
        entries.insert(key, value);
        self.write_all(&entries)
    }

    async fn remove(&self, key: String) -> Result<(), RepositoryError> {
        let mut entries = self.read_all()?;
        entries.remove(&key);
        self.write_all(&entries)
    }
}

/// The session repository registered with the SDK client at startup.
pub(crate) fn session_store() -> Arc<dyn Repository<PersistedToken>> {
    Arc::new(SessionFileStore::at(corpus_home().join(SESSION_FILE)))
}
