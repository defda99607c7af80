use serde::{Deserialize, Serialize};

/// Identifier of a task within its list. Assigned once and never reused.
pub type TaskId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub pinned: bool,
}

impl Task {
    pub fn new(id: TaskId, title: String, date: String) -> Self {
        Self {
            id,
            title,
            date,
            completed: false,
            pinned: false,
        }
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    pub fn update_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }
}
