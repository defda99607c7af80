use crate::record::RecordTable;
use crate::store::table_file;
use crate::traits::{ListStore, PersistenceMetadata};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{ListId, NewList, TaskList};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const FORMAT_VERSION: u32 = 1;

/// On-disk layout: a versioned envelope around one auto-keyed record table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonEnvelope {
    pub version: u32,
    pub metadata: PersistenceMetadata,
    pub table: RecordTable,
}

impl JsonEnvelope {
    pub fn empty() -> Self {
        Self {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(FORMAT_VERSION, Uuid::new_v4()),
            table: RecordTable::default(),
        }
    }

    pub fn to_json_string(&self) -> TaskboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))
    }
}

/// JSON file-backed list store.
/// Every write rewrites the whole file atomically.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    instance_id: Uuid,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty table when the file does not exist.
    pub async fn open(path: impl AsRef<Path>) -> TaskboardResult<Self> {
        Self::open_with_instance_id(path, Uuid::new_v4()).await
    }

    pub async fn open_with_instance_id(
        path: impl AsRef<Path>,
        instance_id: Uuid,
    ) -> TaskboardResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
            write_lock: Mutex::new(()),
        };

        if store.path.exists() {
            let envelope = store.read_envelope().await.map_err(|e| {
                TaskboardError::StoreUnavailable(format!("{}: {}", store.path.display(), e))
            })?;
            tracing::info!(
                "Opened list store {} ({} records)",
                store.path.display(),
                envelope.table.records.len()
            );
        } else {
            let envelope = JsonEnvelope::empty();
            store.write_envelope(envelope).await.map_err(|e| {
                TaskboardError::StoreUnavailable(format!("{}: {}", store.path.display(), e))
            })?;
            tracing::info!("Created list store {}", store.path.display());
        }

        Ok(store)
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_envelope(&self) -> TaskboardResult<JsonEnvelope> {
        let bytes = table_file::read_file(&self.path).await?;
        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;

        if envelope.version != FORMAT_VERSION {
            return Err(TaskboardError::Serialization(format!(
                "Unsupported format version: {}",
                envelope.version
            )));
        }
        Ok(envelope)
    }

    async fn write_envelope(&self, mut envelope: JsonEnvelope) -> TaskboardResult<()> {
        envelope.metadata = PersistenceMetadata::new(FORMAT_VERSION, self.instance_id);
        let json_bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        table_file::replace_file(&self.path, json_bytes).await
    }

    /// Read-modify-write of the table under the write lock.
    async fn modify<R>(
        &self,
        f: impl FnOnce(&mut RecordTable) -> TaskboardResult<R> + Send,
    ) -> TaskboardResult<R> {
        let _guard = self.write_lock.lock().await;
        let mut envelope = self.read_envelope().await?;
        let result = f(&mut envelope.table)?;
        self.write_envelope(envelope).await?;
        Ok(result)
    }
}

#[async_trait::async_trait]
impl ListStore for JsonFileStore {
    async fn load_all(&self) -> TaskboardResult<Vec<TaskList>> {
        let envelope = self.read_envelope().await?;
        let lists = envelope.table.load_all()?;
        tracing::info!("Loaded {} lists from {}", lists.len(), self.path.display());
        Ok(lists)
    }

    async fn insert(&self, list: &NewList) -> TaskboardResult<ListId> {
        let id = self.modify(|table| table.insert(list)).await?;
        tracing::debug!("Inserted list {} into {}", id, self.path.display());
        Ok(id)
    }

    async fn update(&self, list: &TaskList) -> TaskboardResult<()> {
        self.modify(|table| table.update(list)).await?;
        tracing::debug!("Updated list {} in {}", list.id, self.path.display());
        Ok(())
    }

    async fn remove(&self, id: ListId) -> TaskboardResult<()> {
        let removed = self.modify(|table| Ok(table.remove(id))).await?;
        tracing::debug!(
            "Removed list {} from {} (present: {})",
            id,
            self.path.display(),
            removed
        );
        Ok(())
    }
}
