use std::ops::{Deref, DerefMut};
use std::path::Path;
use taskboard_core::{AppConfig, TaskboardResult};
use taskboard_persistence::{BoardSession, JsonFileStore, ListStore};

pub type DynStore = Box<dyn ListStore>;

/// Board session for one CLI invocation. Opened from the store file on start,
/// every mutation is already persisted when its handler returns.
pub struct CliContext {
    session: BoardSession<DynStore>,
}

impl CliContext {
    pub async fn load(file_path: &str, config: &AppConfig) -> TaskboardResult<Self> {
        let store = open_store(Path::new(file_path)).await?;
        let session = BoardSession::open(store, config).await?;
        Ok(Self { session })
    }
}

impl Deref for CliContext {
    type Target = BoardSession<DynStore>;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl DerefMut for CliContext {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.session
    }
}

#[cfg(feature = "sqlite")]
fn is_sqlite_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("db" | "sqlite" | "sqlite3")
    )
}

async fn open_store(path: &Path) -> TaskboardResult<DynStore> {
    #[cfg(feature = "sqlite")]
    if is_sqlite_path(path) {
        let store = taskboard_persistence::SqliteStore::open(path).await?;
        return Ok(Box::new(store));
    }

    Ok(Box::new(JsonFileStore::open(path).await?))
}
