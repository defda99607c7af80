use serde::Serialize;
use taskboard_core::{AppConfig, TaskboardError, TaskboardResult};

use crate::list::{ListId, TaskList};

/// Board-wide limits and defaults the mutations consult.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSettings {
    pub max_lists: usize,
    pub delete_confirm_threshold: usize,
    pub default_list_title: String,
    pub default_task_date: String,
    pub completed_badge_threshold: usize,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for BoardSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_lists: config.max_lists,
            delete_confirm_threshold: config.delete_confirm_threshold,
            default_list_title: config.default_list_title.clone(),
            default_task_date: config.default_task_date.clone(),
            completed_badge_threshold: config.completed_badge_threshold,
        }
    }
}

/// In-memory mirror of the stored lists, in load order.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    lists: Vec<TaskList>,
    settings: BoardSettings,
    pending_delete: Option<ListId>,
}

impl BoardState {
    pub fn new(settings: BoardSettings) -> Self {
        Self {
            lists: Vec::new(),
            settings,
            pending_delete: None,
        }
    }

    pub fn with_lists(lists: Vec<TaskList>, settings: BoardSettings) -> Self {
        Self {
            lists,
            settings,
            pending_delete: None,
        }
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lists.len() >= self.settings.max_lists
    }

    pub fn list(&self, id: ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == id)
    }

    pub fn require_list(&self, id: ListId) -> TaskboardResult<&TaskList> {
        self.list(id)
            .ok_or_else(|| TaskboardError::NotFound(format!("List {}", id)))
    }

    pub fn list_mut(&mut self, id: ListId) -> TaskboardResult<&mut TaskList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| TaskboardError::NotFound(format!("List {}", id)))
    }

    /// Whether `title` is used by any list other than `except`.
    pub fn title_taken(&self, title: &str, except: Option<ListId>) -> bool {
        self.lists
            .iter()
            .any(|l| l.title == title && Some(l.id) != except)
    }

    /// First free title of the form `base`, `base 1`, `base 2`, ...
    pub fn unique_title(&self, base: &str) -> String {
        let mut title = base.to_string();
        let mut counter = 1;
        while self.title_taken(&title, None) {
            title = format!("{} {}", base, counter);
            counter += 1;
        }
        title
    }

    pub fn next_default_title(&self) -> String {
        self.unique_title(&self.settings.default_list_title)
    }

    pub fn attach(&mut self, list: TaskList) {
        self.lists.push(list);
    }

    pub fn detach(&mut self, id: ListId) -> Option<TaskList> {
        let pos = self.lists.iter().position(|l| l.id == id)?;
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }
        Some(self.lists.remove(pos))
    }

    pub fn needs_delete_confirmation(&self, id: ListId) -> TaskboardResult<bool> {
        let list = self.require_list(id)?;
        Ok(list.tasks.len() > self.settings.delete_confirm_threshold)
    }

    pub fn pending_delete(&self) -> Option<ListId> {
        self.pending_delete
    }

    pub fn set_pending_delete(&mut self, id: ListId) {
        self.pending_delete = Some(id);
    }

    pub fn take_pending_delete(&mut self) -> Option<ListId> {
        self.pending_delete.take()
    }
}
