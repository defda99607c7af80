use super::{Command, StoreWrite};
use crate::{BoardState, ListId, NewList};
use taskboard_core::{TaskboardError, TaskboardResult};

/// Create a list with the next free default title.
/// The list only joins the board once the store has assigned its id.
pub struct CreateList;

impl Command for CreateList {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        if board.is_full() {
            tracing::debug!(
                "Board already holds {} lists, ignoring create",
                board.len()
            );
            return Ok(None);
        }
        let title = board.next_default_title();
        Ok(Some(StoreWrite::Insert(NewList::new(title))))
    }

    fn description(&self) -> String {
        "Create list".to_string()
    }
}

/// Rename a list. Titles are unique across the board.
pub struct RenameList {
    pub list_id: ListId,
    pub title: String,
}

impl Command for RenameList {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        let title = self.title.trim();
        let current = board.require_list(self.list_id)?;
        if title.is_empty() || title == current.title {
            return Ok(None);
        }
        if board.title_taken(title, Some(self.list_id)) {
            return Err(TaskboardError::DuplicateTitle(title.to_string()));
        }

        let list = board.list_mut(self.list_id)?;
        list.update_title(title.to_string());
        Ok(Some(StoreWrite::Update(list.clone())))
    }

    fn description(&self) -> String {
        format!("Rename list {} to '{}'", self.list_id, self.title.trim())
    }
}

/// Delete a list and the tasks embedded in it, without confirmation.
pub struct DeleteList {
    pub list_id: ListId,
}

impl Command for DeleteList {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        board
            .detach(self.list_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("List {}", self.list_id)))?;
        Ok(Some(StoreWrite::Remove(self.list_id)))
    }

    fn description(&self) -> String {
        format!("Delete list {}", self.list_id)
    }
}

/// First step of the delete flow: deletes right away when the list is small
/// enough, otherwise parks it as the pending deletion.
pub struct RequestDeleteList {
    pub list_id: ListId,
}

impl Command for RequestDeleteList {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        if board.needs_delete_confirmation(self.list_id)? {
            board.set_pending_delete(self.list_id);
            return Ok(None);
        }
        DeleteList {
            list_id: self.list_id,
        }
        .execute(board)
    }

    fn description(&self) -> String {
        format!("Request deletion of list {}", self.list_id)
    }
}

/// Delete the pending list, if any.
pub struct ConfirmDeleteList;

impl Command for ConfirmDeleteList {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        match board.take_pending_delete() {
            Some(list_id) => DeleteList { list_id }.execute(board),
            None => Ok(None),
        }
    }

    fn description(&self) -> String {
        "Confirm list deletion".to_string()
    }
}

pub struct CancelDeleteList;

impl Command for CancelDeleteList {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>> {
        board.take_pending_delete();
        Ok(None)
    }

    fn description(&self) -> String {
        "Cancel list deletion".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSettings, TaskList};

    fn insert(board: &mut BoardState, next_id: &mut ListId) -> Option<ListId> {
        match CreateList.execute(board).unwrap() {
            Some(StoreWrite::Insert(new)) => {
                let id = *next_id;
                *next_id += 1;
                board.attach(TaskList::from_new(id, new));
                Some(id)
            }
            None => None,
            Some(other) => panic!("unexpected write {:?}", other),
        }
    }

    #[test]
    fn test_create_list_titles_are_distinct() {
        let mut board = BoardState::default();
        let mut next_id = 1;
        while insert(&mut board, &mut next_id).is_some() {}

        let titles: Vec<_> = board.lists().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "New List",
                "New List 1",
                "New List 2",
                "New List 3",
                "New List 4",
                "New List 5"
            ]
        );
    }

    #[test]
    fn test_create_list_stops_at_ceiling() {
        let mut settings = BoardSettings::default();
        settings.max_lists = 4;
        let mut board = BoardState::new(settings);
        let mut next_id = 1;
        for _ in 0..4 {
            assert!(insert(&mut board, &mut next_id).is_some());
        }
        assert_eq!(CreateList.execute(&mut board).unwrap(), None);
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn test_create_list_fills_gap_in_suffixes() {
        let mut board = BoardState::default();
        let mut next_id = 1;
        insert(&mut board, &mut next_id);
        insert(&mut board, &mut next_id);
        insert(&mut board, &mut next_id);
        DeleteList { list_id: 2 }.execute(&mut board).unwrap();

        insert(&mut board, &mut next_id);
        assert_eq!(board.list(4).unwrap().title, "New List 1");
    }

    #[test]
    fn test_rename_to_duplicate_is_rejected() {
        let mut board = BoardState::default();
        let mut next_id = 1;
        insert(&mut board, &mut next_id);
        insert(&mut board, &mut next_id);
        let before = board.lists().to_vec();

        let err = RenameList {
            list_id: 2,
            title: "New List".to_string(),
        }
        .execute(&mut board)
        .unwrap_err();

        assert!(matches!(err, TaskboardError::DuplicateTitle(t) if t == "New List"));
        assert_eq!(board.lists(), before.as_slice());
    }

    #[test]
    fn test_rename_trims_and_writes_full_record() {
        let mut board = BoardState::default();
        let mut next_id = 1;
        insert(&mut board, &mut next_id);

        let write = RenameList {
            list_id: 1,
            title: "  Groceries ".to_string(),
        }
        .execute(&mut board)
        .unwrap();

        let list = board.list(1).unwrap().clone();
        assert_eq!(list.title, "Groceries");
        assert_eq!(write, Some(StoreWrite::Update(list)));
    }

    #[test]
    fn test_rename_noops() {
        let mut board = BoardState::default();
        let mut next_id = 1;
        insert(&mut board, &mut next_id);

        for title in ["   ", "", "New List", " New List "] {
            let write = RenameList {
                list_id: 1,
                title: title.to_string(),
            }
            .execute(&mut board)
            .unwrap();
            assert_eq!(write, None, "title {:?}", title);
        }
        assert_eq!(board.list(1).unwrap().title, "New List");
    }

    #[test]
    fn test_request_delete_empty_list_deletes_immediately() {
        let mut board = BoardState::default();
        let mut next_id = 1;
        insert(&mut board, &mut next_id);

        let write = RequestDeleteList { list_id: 1 }.execute(&mut board).unwrap();
        assert_eq!(write, Some(StoreWrite::Remove(1)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_request_delete_with_tasks_needs_confirmation() {
        let mut board = BoardState::default();
        let mut next_id = 1;
        insert(&mut board, &mut next_id);
        board
            .list_mut(1)
            .unwrap()
            .push_task("a".into(), "Today".into());

        let write = RequestDeleteList { list_id: 1 }.execute(&mut board).unwrap();
        assert_eq!(write, None);
        assert_eq!(board.pending_delete(), Some(1));
        assert_eq!(board.len(), 1);

        let write = ConfirmDeleteList.execute(&mut board).unwrap();
        assert_eq!(write, Some(StoreWrite::Remove(1)));
        assert!(board.is_empty());
        assert_eq!(board.pending_delete(), None);
    }

    #[test]
    fn test_cancel_delete_keeps_list() {
        let mut board = BoardState::default();
        let mut next_id = 1;
        insert(&mut board, &mut next_id);
        board
            .list_mut(1)
            .unwrap()
            .push_task("a".into(), "Today".into());

        RequestDeleteList { list_id: 1 }.execute(&mut board).unwrap();
        CancelDeleteList.execute(&mut board).unwrap();

        assert_eq!(board.pending_delete(), None);
        assert_eq!(ConfirmDeleteList.execute(&mut board).unwrap(), None);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_delete_threshold_is_configurable() {
        let mut settings = BoardSettings::default();
        settings.delete_confirm_threshold = 1;
        let mut board = BoardState::new(settings);
        let mut next_id = 1;
        insert(&mut board, &mut next_id);
        board
            .list_mut(1)
            .unwrap()
            .push_task("only".into(), "Today".into());

        let write = RequestDeleteList { list_id: 1 }.execute(&mut board).unwrap();
        assert_eq!(write, Some(StoreWrite::Remove(1)));
    }

    #[test]
    fn test_delete_unknown_list() {
        let mut board = BoardState::default();
        assert!(matches!(
            DeleteList { list_id: 5 }.execute(&mut board),
            Err(TaskboardError::NotFound(_))
        ));
    }
}
