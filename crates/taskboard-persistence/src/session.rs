use crate::traits::ListStore;
use crate::write_through::WriteThrough;
use async_trait::async_trait;
use taskboard_core::{AppConfig, TaskboardError, TaskboardResult};
use taskboard_domain::commands::{
    AddTask, CancelDeleteList, Command, ConfirmDeleteList, CreateList, DeleteTask, EditTask,
    RenameList, RequestDeleteList, TogglePin, ToggleTask,
};
use taskboard_domain::{
    BoardOperations, BoardSettings, BoardState, DeleteOutcome, ListId, ListView, StoreWrite,
    Task, TaskId, TaskList,
};

/// Owns the board state and the store handle for the lifetime of a session.
/// Each mutation updates the state, then writes the one changed record.
pub struct BoardSession<S: ListStore> {
    state: BoardState,
    store: S,
    writer: WriteThrough,
}

impl<S: ListStore> BoardSession<S> {
    /// Seed the board from every stored record.
    pub async fn open(store: S, config: &AppConfig) -> TaskboardResult<Self> {
        let lists = store.load_all().await?;
        if lists.len() > config.max_lists {
            tracing::warn!(
                "Store holds {} lists, more than the limit of {}",
                lists.len(),
                config.max_lists
            );
        }

        // Later records lose a shared title, the same way new lists get theirs
        let mut state = BoardState::new(BoardSettings::from(config));
        let mut repaired = Vec::new();
        for mut list in lists {
            if state.title_taken(&list.title, None) {
                let title = state.unique_title(&list.title);
                tracing::warn!(
                    "Stored list {} shares the title '{}', renaming it to '{}'",
                    list.id,
                    list.title,
                    title
                );
                list.update_title(title);
                repaired.push(StoreWrite::Update(list.clone()));
            }
            state.attach(list);
        }

        let writer = WriteThrough::new(config.write_retry);
        for write in &repaired {
            writer.apply(&store, write).await?;
        }

        tracing::info!("Board session opened with {} lists", state.len());
        Ok(Self {
            state,
            store,
            writer,
        })
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run a command and persist its write. Returns the list the write touched.
    ///
    /// A failed update or remove leaves the in-memory change in place: the
    /// board stays authoritative and the error reports the divergence.
    pub async fn execute(&mut self, command: &dyn Command) -> TaskboardResult<Option<ListId>> {
        tracing::debug!("Executing: {}", command.description());
        let Some(write) = command.execute(&mut self.state)? else {
            return Ok(None);
        };

        let inserted = self.writer.apply(&self.store, &write).await?;
        match (write, inserted) {
            (StoreWrite::Insert(new_list), Some(id)) => {
                self.state.attach(TaskList::from_new(id, new_list));
                Ok(Some(id))
            }
            (StoreWrite::Insert(_), None) => Err(TaskboardError::Internal(
                "Store accepted an insert without assigning a key".into(),
            )),
            (write, _) => Ok(write.list_id()),
        }
    }

    fn task_after(&self, list_id: ListId, task_id: TaskId) -> TaskboardResult<Task> {
        self.state
            .require_list(list_id)?
            .task(task_id)
            .cloned()
            .ok_or_else(|| {
                TaskboardError::NotFound(format!("Task {} in list {}", task_id, list_id))
            })
    }
}

#[async_trait]
impl<S: ListStore> BoardOperations for BoardSession<S> {
    fn lists(&self) -> Vec<TaskList> {
        self.state.lists().to_vec()
    }

    fn get_list(&self, id: ListId) -> TaskboardResult<TaskList> {
        self.state.require_list(id).cloned()
    }

    async fn create_list(&mut self) -> TaskboardResult<Option<TaskList>> {
        match self.execute(&CreateList).await? {
            Some(id) => Ok(Some(self.get_list(id)?)),
            None => Ok(None),
        }
    }

    async fn rename_list(&mut self, id: ListId, title: String) -> TaskboardResult<TaskList> {
        self.execute(&RenameList { list_id: id, title }).await?;
        self.get_list(id)
    }

    async fn request_delete_list(&mut self, id: ListId) -> TaskboardResult<DeleteOutcome> {
        let task_count = self.state.require_list(id)?.tasks.len();
        self.execute(&RequestDeleteList { list_id: id }).await?;
        if self.state.pending_delete() == Some(id) {
            Ok(DeleteOutcome::NeedsConfirmation {
                list_id: id,
                task_count,
            })
        } else {
            Ok(DeleteOutcome::Deleted { list_id: id })
        }
    }

    async fn confirm_delete_list(&mut self) -> TaskboardResult<Option<ListId>> {
        self.execute(&ConfirmDeleteList).await
    }

    fn cancel_delete_list(&mut self) -> Option<ListId> {
        let pending = self.state.pending_delete();
        // Never writes, so the command's result carries nothing
        let _ = CancelDeleteList.execute(&mut self.state);
        pending
    }

    async fn add_task(&mut self, list_id: ListId, title: String) -> TaskboardResult<Option<Task>> {
        if self.execute(&AddTask { list_id, title }).await?.is_none() {
            return Ok(None);
        }
        Ok(self.state.require_list(list_id)?.tasks.last().cloned())
    }

    async fn toggle_task(&mut self, list_id: ListId, task_id: TaskId) -> TaskboardResult<Task> {
        self.execute(&ToggleTask { list_id, task_id }).await?;
        self.task_after(list_id, task_id)
    }

    async fn edit_task(
        &mut self,
        list_id: ListId,
        task_id: TaskId,
        title: String,
    ) -> TaskboardResult<Task> {
        self.execute(&EditTask {
            list_id,
            task_id,
            title,
        })
        .await?;
        self.task_after(list_id, task_id)
    }

    async fn delete_task(&mut self, list_id: ListId, task_id: TaskId) -> TaskboardResult<Task> {
        let task = self.task_after(list_id, task_id)?;
        self.execute(&DeleteTask { list_id, task_id }).await?;
        Ok(task)
    }

    async fn toggle_pin(&mut self, list_id: ListId, task_id: TaskId) -> TaskboardResult<Task> {
        self.execute(&TogglePin { list_id, task_id }).await?;
        self.task_after(list_id, task_id)
    }

    fn list_view(&self, id: ListId, query: &str) -> TaskboardResult<ListView> {
        let list = self.state.require_list(id)?;
        Ok(ListView::build(list, self.state.settings(), query))
    }

    fn board_view(&self, query: &str) -> Vec<ListView> {
        self.state
            .lists()
            .iter()
            .map(|list| ListView::build(list, self.state.settings(), query))
            .collect()
    }
}
