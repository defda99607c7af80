use serde::Serialize;

use crate::search::{Segment, TitleSearcher};
use crate::{BoardSettings, ListId, Task, TaskId, TaskList};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    pub date: String,
    pub completed: bool,
    pub pinned: bool,
    pub segments: Vec<Segment>,
}

impl TaskView {
    fn build(task: &Task, searcher: &TitleSearcher) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            date: task.date.clone(),
            completed: task.completed,
            pinned: task.pinned,
            segments: searcher.highlight(&task.title),
        }
    }
}

/// Display ordering of one list. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub id: ListId,
    pub title: String,
    pub open: Vec<TaskView>,
    pub completed: Vec<TaskView>,
    /// Set once enough tasks are completed.
    pub badge: bool,
}

impl ListView {
    pub fn build(list: &TaskList, settings: &BoardSettings, query: &str) -> Self {
        let searcher = TitleSearcher::new(query);
        let ordered = pinned_first(&list.tasks);

        let (completed, open): (Vec<&Task>, Vec<&Task>) =
            ordered.into_iter().partition(|t| t.completed);

        Self {
            id: list.id,
            title: list.title.clone(),
            badge: completed.len() >= settings.completed_badge_threshold,
            open: open.iter().map(|t| TaskView::build(t, &searcher)).collect(),
            completed: completed
                .iter()
                .map(|t| TaskView::build(t, &searcher))
                .collect(),
        }
    }
}

/// Stable partition: pinned tasks first, each group in stored order.
pub fn pinned_first(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|t| !t.pinned);
    ordered
}
