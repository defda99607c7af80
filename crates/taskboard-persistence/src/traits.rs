use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::TaskboardResult;
use taskboard_domain::{ListId, NewList, TaskList};
use uuid::Uuid;

/// Metadata written alongside the list table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    /// Version of the persistence format
    pub format_version: u32,
    /// ID of the instance that performed the save
    pub instance_id: Uuid,
    /// When this data was saved
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(format_version: u32, instance_id: Uuid) -> Self {
        Self {
            format_version,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Single-table key-value store of list records.
/// Keys are assigned by the store on insert and never reused.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Every record, validated, in ascending key order.
    async fn load_all(&self) -> TaskboardResult<Vec<TaskList>>;

    /// Store a new record and return its assigned key.
    async fn insert(&self, list: &NewList) -> TaskboardResult<ListId>;

    /// Replace the full record stored under `list.id`.
    async fn update(&self, list: &TaskList) -> TaskboardResult<()>;

    /// Delete a record. Removing an absent key is not an error.
    async fn remove(&self, id: ListId) -> TaskboardResult<()>;
}

#[async_trait]
impl<S: ListStore + ?Sized> ListStore for Box<S> {
    async fn load_all(&self) -> TaskboardResult<Vec<TaskList>> {
        (**self).load_all().await
    }

    async fn insert(&self, list: &NewList) -> TaskboardResult<ListId> {
        (**self).insert(list).await
    }

    async fn update(&self, list: &TaskList) -> TaskboardResult<()> {
        (**self).update(list).await
    }

    async fn remove(&self, id: ListId) -> TaskboardResult<()> {
        (**self).remove(id).await
    }
}
