use async_trait::async_trait;
use serde::Serialize;
use taskboard_core::TaskboardResult;

use crate::{ListId, ListView, Task, TaskId, TaskList};

/// Result of the first step of deleting a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted { list_id: ListId },
    NeedsConfirmation { list_id: ListId, task_count: usize },
}

/// Every operation the board supports. Mutations persist the changed list
/// before returning.
#[async_trait]
pub trait BoardOperations {
    // List operations
    fn lists(&self) -> Vec<TaskList>;
    fn get_list(&self, id: ListId) -> TaskboardResult<TaskList>;
    /// `None` when the board is already at its list limit.
    async fn create_list(&mut self) -> TaskboardResult<Option<TaskList>>;
    async fn rename_list(&mut self, id: ListId, title: String) -> TaskboardResult<TaskList>;
    async fn request_delete_list(&mut self, id: ListId) -> TaskboardResult<DeleteOutcome>;
    /// Deletes the list parked by [`BoardOperations::request_delete_list`], if any.
    async fn confirm_delete_list(&mut self) -> TaskboardResult<Option<ListId>>;
    fn cancel_delete_list(&mut self) -> Option<ListId>;

    // Task operations
    /// `None` when the title is blank.
    async fn add_task(&mut self, list_id: ListId, title: String) -> TaskboardResult<Option<Task>>;
    async fn toggle_task(&mut self, list_id: ListId, task_id: TaskId) -> TaskboardResult<Task>;
    async fn edit_task(
        &mut self,
        list_id: ListId,
        task_id: TaskId,
        title: String,
    ) -> TaskboardResult<Task>;
    async fn delete_task(&mut self, list_id: ListId, task_id: TaskId) -> TaskboardResult<Task>;
    async fn toggle_pin(&mut self, list_id: ListId, task_id: TaskId) -> TaskboardResult<Task>;

    // Display
    fn list_view(&self, id: ListId, query: &str) -> TaskboardResult<ListView>;
    fn board_view(&self, query: &str) -> Vec<ListView>;
}
