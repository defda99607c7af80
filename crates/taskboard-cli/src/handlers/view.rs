use crate::cli::ViewArgs;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use taskboard_domain::{render, BoardOperations, ListId, ListView, TaskId, TaskView};

/// A list rendered for a terminal: matched title runs wrapped in markers.
#[derive(Serialize)]
struct MarkedList {
    id: ListId,
    title: String,
    badge: bool,
    open: Vec<MarkedTask>,
    completed: Vec<MarkedTask>,
}

#[derive(Serialize)]
struct MarkedTask {
    id: TaskId,
    title: String,
    date: String,
    pinned: bool,
}

impl MarkedTask {
    fn from_view(task: &TaskView, open: &str, close: &str) -> Self {
        Self {
            id: task.id,
            title: render(&task.segments, open, close),
            date: task.date.clone(),
            pinned: task.pinned,
        }
    }
}

impl MarkedList {
    fn from_view(view: &ListView, open: &str, close: &str) -> Self {
        let mark = |tasks: &[TaskView]| -> Vec<MarkedTask> {
            tasks
                .iter()
                .map(|t| MarkedTask::from_view(t, open, close))
                .collect()
        };
        Self {
            id: view.id,
            title: view.title.clone(),
            badge: view.badge,
            open: mark(&view.open),
            completed: mark(&view.completed),
        }
    }
}

pub fn handle_board(ctx: &CliContext, args: ViewArgs) {
    output_views(ctx.board_view(&args.search), args.mark);
}

pub fn output_views(views: Vec<ListView>, mark: Option<Vec<String>>) {
    match mark.as_deref() {
        Some([open, close]) => {
            let marked: Vec<MarkedList> = views
                .iter()
                .map(|v| MarkedList::from_view(v, open, close))
                .collect();
            output::output_list(marked);
        }
        _ => output::output_list(views),
    }
}
