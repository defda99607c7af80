use taskboard_core::TaskboardResult;

use crate::{BoardState, ListId, NewList, TaskList};

pub mod list_commands;
pub mod task_commands;

pub use list_commands::*;
pub use task_commands::*;

/// The one store write a mutation needs to persist its change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    /// Add a list; the store assigns its id.
    Insert(NewList),
    /// Replace the full record of an existing list.
    Update(TaskList),
    Remove(ListId),
}

impl StoreWrite {
    pub fn list_id(&self) -> Option<ListId> {
        match self {
            Self::Insert(_) => None,
            Self::Update(list) => Some(list.id),
            Self::Remove(id) => Some(*id),
        }
    }
}

/// Trait for board mutations.
/// Executing a command updates the board in place and returns the write that
/// persists the change, or `None` when the intent turned out to be a no-op.
pub trait Command: Send + Sync {
    fn execute(&self, board: &mut BoardState) -> TaskboardResult<Option<StoreWrite>>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}
