pub mod board;
pub mod commands;
pub mod list;
pub mod operations;
pub mod search;
pub mod task;
pub mod view;

pub use board::{BoardSettings, BoardState};
pub use commands::{Command, StoreWrite};
pub use list::{ListId, NewList, TaskList};
pub use operations::{BoardOperations, DeleteOutcome};
pub use search::{highlight, render, Segment, TitleSearcher};
pub use task::{Task, TaskId};
pub use view::{ListView, TaskView};
