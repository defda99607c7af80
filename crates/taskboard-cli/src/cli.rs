use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_domain::{ListId, TaskId};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Lists of tasks kept in a local store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the list store (or set TASKBOARD_FILE env var)
    #[arg(long, short, value_name = "FILE", env = "TASKBOARD_FILE", global = true)]
    pub file: Option<String>,

    /// Configuration file to use instead of the platform default
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List operations
    List(ListCommand),
    /// Task operations
    Task(TaskCommand),
    /// Show every list in display order
    Board(ViewArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by the display commands.
#[derive(Args)]
pub struct ViewArgs {
    /// Highlight task titles containing this text
    #[arg(long, default_value = "")]
    pub search: String,
    /// Render titles with matches wrapped in these markers
    #[arg(long, num_args = 2, value_names = ["OPEN", "CLOSE"])]
    pub mark: Option<Vec<String>>,
}

// List commands
#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Add a list with the next free default title
    Create,
    /// Show all lists
    Ls,
    /// Get a specific list
    Get {
        #[arg(long)]
        id: ListId,
    },
    /// Rename a list
    Rename {
        #[arg(long)]
        id: ListId,
        #[arg(long)]
        title: String,
    },
    /// Delete a list and its tasks
    Delete {
        #[arg(long)]
        id: ListId,
        /// Delete even when the list still holds tasks
        #[arg(long)]
        confirm: bool,
    },
    /// Show one list in display order
    View {
        #[arg(long)]
        id: ListId,
        #[command(flatten)]
        view: ViewArgs,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to a list
    Add {
        #[arg(long)]
        list: ListId,
        #[arg(long)]
        title: String,
    },
    /// Flip a task between open and completed
    Toggle(TaskRef),
    /// Change a task's title
    Edit {
        #[command(flatten)]
        task: TaskRef,
        #[arg(long)]
        title: String,
    },
    /// Delete a task
    Delete(TaskRef),
    /// Pin a task to the top of its list, or unpin it
    Pin(TaskRef),
}

#[derive(Args)]
pub struct TaskRef {
    #[arg(long)]
    pub list: ListId,
    #[arg(long)]
    pub id: TaskId,
}
