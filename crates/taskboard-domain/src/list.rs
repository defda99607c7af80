use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskId};

/// Store-assigned list key.
pub type ListId = u64;

/// A list that has not been written to the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewList {
    pub title: String,
    pub tasks: Vec<Task>,
    #[serde(default = "default_next_task_id")]
    pub next_task_id: TaskId,
}

impl NewList {
    pub fn new(title: String) -> Self {
        Self {
            title,
            tasks: Vec::new(),
            next_task_id: default_next_task_id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default = "default_next_task_id")]
    pub next_task_id: TaskId,
}

fn default_next_task_id() -> TaskId {
    1
}

impl TaskList {
    /// Attach the id the store assigned on insert.
    pub fn from_new(id: ListId, list: NewList) -> Self {
        Self {
            id,
            title: list.title,
            tasks: list.tasks,
            next_task_id: list.next_task_id,
        }
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn allocate_task_id(&mut self) -> TaskId {
        let id = self.next_task_id;
        self.next_task_id += 1;
        id
    }

    /// Append a fresh task and return it.
    pub fn push_task(&mut self, title: String, date: String) -> &Task {
        let id = self.allocate_task_id();
        self.tasks.push(Task::new(id, title, date));
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos))
    }

    /// Flip the pin on `id`. Pinning clears every other pin in the list.
    /// Returns the new pin state, or `None` if the task does not exist.
    pub fn toggle_pin(&mut self, id: TaskId) -> Option<bool> {
        let pinned = !self.task(id)?.pinned;
        for task in &mut self.tasks {
            if task.id == id {
                task.set_pinned(pinned);
            } else if pinned {
                task.set_pinned(false);
            }
        }
        Some(pinned)
    }

    pub fn pinned_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.pinned).count()
    }
}
