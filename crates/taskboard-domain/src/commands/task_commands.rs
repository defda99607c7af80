use super::{Command, StoreWrite};
use crate::{BoardState, ListId, TaskId};
use taskboard_core::{TaskboardError, TaskboardResult};

fn task_not_found(list_id: ListId, task_id: TaskId) -> TaskboardError {
    TaskboardError::NotFound(format!("Task {} in list {}", task_id, list_id))
}

/// Append a task with default state to the end of a list
pub struct AddTask {
    pub list_id: ListId,
    pub title: String,
}

impl Command for AddTask {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        let title = self.title.trim();
        let date = board.settings().default_task_date.clone();
        let list = board.list_mut(self.list_id)?;
        if title.is_empty() {
            return Ok(None);
        }
        list.push_task(title.to_string(), date);
        Ok(Some(StoreWrite::Update(list.clone())))
    }

    fn description(&self) -> String {
        format!("Add task '{}' to list {}", self.title.trim(), self.list_id)
    }
}

pub struct ToggleTask {
    pub list_id: ListId,
    pub task_id: TaskId,
}

impl Command for ToggleTask {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        let list = board.list_mut(self.list_id)?;
        list.task_mut(self.task_id)
            .ok_or_else(|| task_not_found(self.list_id, self.task_id))?
            .toggle_completed();
        Ok(Some(StoreWrite::Update(list.clone())))
    }

    fn description(&self) -> String {
        format!(
            "Toggle completion of task {} in list {}",
            self.task_id, self.list_id
        )
    }
}

/// Replace a task's title. Blank or unchanged titles are ignored.
pub struct EditTask {
    pub list_id: ListId,
    pub task_id: TaskId,
    pub title: String,
}

impl Command for EditTask {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        let title = self.title.trim();
        let list = board.list_mut(self.list_id)?;
        let task = list
            .task_mut(self.task_id)
            .ok_or_else(|| task_not_found(self.list_id, self.task_id))?;
        if title.is_empty() || title == task.title {
            return Ok(None);
        }
        task.update_title(title.to_string());
        Ok(Some(StoreWrite::Update(list.clone())))
    }

    fn description(&self) -> String {
        format!("Edit task {} in list {}", self.task_id, self.list_id)
    }
}

pub struct DeleteTask {
    pub list_id: ListId,
    pub task_id: TaskId,
}

impl Command for DeleteTask {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        let list = board.list_mut(self.list_id)?;
        list.remove_task(self.task_id)
            .ok_or_else(|| task_not_found(self.list_id, self.task_id))?;
        Ok(Some(StoreWrite::Update(list.clone())))
    }

    fn description(&self) -> String {
        format!("Delete task {} from list {}", self.task_id, self.list_id)
    }
}

/// Toggle a task's pin; at most one task per list stays pinned.
pub struct TogglePin {
    pub list_id: ListId,
    pub task_id: TaskId,
}

impl Command for TogglePin {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        let list = board.list_mut(self.list_id)?;
        list.toggle_pin(self.task_id)
            .ok_or_else(|| task_not_found(self.list_id, self.task_id))?;
        Ok(Some(StoreWrite::Update(list.clone())))
    }

    fn description(&self) -> String {
        format!("Toggle pin of task {} in list {}", self.task_id, self.list_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSettings, NewList, TaskList};

    fn board_with_list(tasks: &[&str]) -> BoardState {
        let mut list = TaskList::from_new(1, NewList::new("Groceries".to_string()));
        for title in tasks {
            list.push_task(title.to_string(), "Today".to_string());
        }
        let other = TaskList::from_new(2, NewList::new("Work".to_string()));
        BoardState::with_lists(vec![list, other], BoardSettings::default())
    }

    #[test]
    fn test_add_task_appends_with_defaults() {
        let mut board = board_with_list(&["a"]);
        let write = AddTask {
            list_id: 1,
            title: "  Buy milk ".to_string(),
        }
        .execute(&mut board)
        .unwrap();

        let list = board.list(1).unwrap();
        let task = list.tasks.last().unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.date, "Today");
        assert!(!task.completed);
        assert!(!task.pinned);
        assert_eq!(write, Some(StoreWrite::Update(list.clone())));
    }

    #[test]
    fn test_add_blank_task_is_ignored() {
        let mut board = board_with_list(&[]);
        let write = AddTask {
            list_id: 1,
            title: "   ".to_string(),
        }
        .execute(&mut board)
        .unwrap();
        assert_eq!(write, None);
        assert!(board.list(1).unwrap().tasks.is_empty());
    }

    #[test]
    fn test_add_task_uses_configured_date() {
        let mut settings = BoardSettings::default();
        settings.default_task_date = "Someday".to_string();
        let list = TaskList::from_new(1, NewList::new("Groceries".to_string()));
        let mut board = BoardState::with_lists(vec![list], settings);

        AddTask {
            list_id: 1,
            title: "x".to_string(),
        }
        .execute(&mut board)
        .unwrap();
        assert_eq!(board.list(1).unwrap().tasks[0].date, "Someday");
    }

    #[test]
    fn test_toggle_twice_restores_and_touches_nothing_else() {
        let mut board = board_with_list(&["a", "b", "c"]);
        let before = board.lists().to_vec();

        let toggle = ToggleTask {
            list_id: 1,
            task_id: 2,
        };
        toggle.execute(&mut board).unwrap();
        assert!(board.list(1).unwrap().task(2).unwrap().completed);
        assert!(!board.list(1).unwrap().task(1).unwrap().completed);

        toggle.execute(&mut board).unwrap();
        assert_eq!(board.lists(), before.as_slice());
    }

    #[test]
    fn test_edit_task_title() {
        let mut board = board_with_list(&["a", "b"]);
        let write = EditTask {
            list_id: 1,
            task_id: 2,
            title: " bread ".to_string(),
        }
        .execute(&mut board)
        .unwrap();
        assert!(write.is_some());
        assert_eq!(board.list(1).unwrap().task(2).unwrap().title, "bread");
        assert_eq!(board.list(1).unwrap().task(1).unwrap().title, "a");
    }

    #[test]
    fn test_edit_task_noops() {
        let mut board = board_with_list(&["a"]);
        for title in ["a", " a ", "", "  "] {
            let write = EditTask {
                list_id: 1,
                task_id: 1,
                title: title.to_string(),
            }
            .execute(&mut board)
            .unwrap();
            assert_eq!(write, None, "title {:?}", title);
        }
    }

    #[test]
    fn test_edit_allows_duplicate_task_titles() {
        let mut board = board_with_list(&["a", "b"]);
        EditTask {
            list_id: 1,
            task_id: 2,
            title: "a".to_string(),
        }
        .execute(&mut board)
        .unwrap();
        assert_eq!(board.list(1).unwrap().task(2).unwrap().title, "a");
    }

    #[test]
    fn test_delete_task_removes_exactly_one() {
        let mut board = board_with_list(&["a", "b", "c", "d"]);
        DeleteTask {
            list_id: 1,
            task_id: 3,
        }
        .execute(&mut board)
        .unwrap();

        let list = board.list(1).unwrap();
        assert_eq!(list.tasks.len(), 3);
        let ids: Vec<_> = list.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn test_delete_unknown_task() {
        let mut board = board_with_list(&["a"]);
        let err = DeleteTask {
            list_id: 1,
            task_id: 7,
        }
        .execute(&mut board)
        .unwrap_err();
        assert!(matches!(err, TaskboardError::NotFound(_)));
        assert_eq!(board.list(1).unwrap().tasks.len(), 1);
    }

    #[test]
    fn test_pin_clears_other_pins() {
        let mut board = board_with_list(&["a", "b", "c"]);
        for task in &mut board.list_mut(1).unwrap().tasks {
            task.pinned = true;
        }

        TogglePin {
            list_id: 1,
            task_id: 2,
        }
        .execute(&mut board)
        .unwrap();

        let list = board.list(1).unwrap();
        assert!(list.task(2).unwrap().pinned);
        assert!(!list.task(1).unwrap().pinned);
        assert!(!list.task(3).unwrap().pinned);
    }

    #[test]
    fn test_pin_is_scoped_to_list() {
        let mut board = board_with_list(&["a"]);
        board
            .list_mut(2)
            .unwrap()
            .push_task("w".into(), "Today".into());
        TogglePin {
            list_id: 2,
            task_id: 1,
        }
        .execute(&mut board)
        .unwrap();
        TogglePin {
            list_id: 1,
            task_id: 1,
        }
        .execute(&mut board)
        .unwrap();

        assert!(board.list(1).unwrap().task(1).unwrap().pinned);
        assert!(board.list(2).unwrap().task(1).unwrap().pinned);
    }
}
