use crate::record::RecordTable;
use crate::traits::ListStore;
use taskboard_core::TaskboardResult;
use taskboard_domain::{ListId, NewList, TaskList};
use tokio::sync::Mutex;

/// In-process list store. Same keying and validation as the file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<RecordTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ListStore for MemoryStore {
    async fn load_all(&self) -> TaskboardResult<Vec<TaskList>> {
        self.table.lock().await.load_all()
    }

    async fn insert(&self, list: &NewList) -> TaskboardResult<ListId> {
        self.table.lock().await.insert(list)
    }

    async fn update(&self, list: &TaskList) -> TaskboardResult<()> {
        self.table.lock().await.update(list)
    }

    async fn remove(&self, id: ListId) -> TaskboardResult<()> {
        self.table.lock().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_crud() {
        let store = MemoryStore::new();
        let id = store.insert(&NewList::new("Work".into())).await.unwrap();

        let mut list = store.load_all().await.unwrap().remove(0);
        assert_eq!(list.id, id);
        list.update_title("Home".into());
        store.update(&list).await.unwrap();
        assert_eq!(store.load_all().await.unwrap()[0].title, "Home");

        store.remove(id).await.unwrap();
        store.remove(id).await.unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
    }
}
