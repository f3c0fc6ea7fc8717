use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("taskdeck v", env!("CARGO_PKG_VERSION"), " - quick-add tasks, many views"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding saved state and config.toml (default: $TASKDECK_DIR or ~/.taskdeck)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, hide = true)]
    pub today: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task; the text may carry a date, !priority, #list and @tags
    Add(AddArgs),
    /// Show a view (default: the current view)
    Show(ShowArgs),
    /// Show one task in full
    Get(GetArgs),
    /// Switch the current view
    View(ViewArgs),
    /// Toggle a task's completion
    Done(DoneArgs),
    /// Move a task to a kanban column
    Status(StatusArgs),
    /// Change a task's fields
    Edit(EditArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Move a task to the position of another task
    Mv(MvArgs),
    /// List the task lists
    Lists,
    /// List the tags
    Tags,
    /// Show or run the focus timer
    Pomodoro(PomodoroArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args, Default)]
pub struct ShowArgs {
    /// View to show: inbox, today, upcoming, kanban, timeline, calendar,
    /// pomodoro, matrix, list-<id> or tag-<id>
    pub view: Option<String>,
    /// Completion filter (all, active, completed)
    #[arg(long)]
    pub filter: Option<String>,
    /// Sort key (due-date, priority, created-at, title)
    #[arg(long)]
    pub sort: Option<String>,
    /// Month shown by the calendar (YYYY-MM)
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Args)]
pub struct GetArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct PomodoroArgs {
    /// Record a finished session (focus, short-break, long-break)
    #[arg(long, conflicts_with = "start")]
    pub complete: Option<String>,
    /// Run a session in the terminal and record it when it finishes
    #[arg(long)]
    pub start: Option<String>,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task text, e.g. "Buy milk tomorrow #shopping !high @quick"
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Due date (YYYY-MM-DD, M/D, M/D/YY or M/D/YYYY)
    #[arg(long)]
    pub due: Option<String>,
    /// Priority (high, medium, low, none)
    #[arg(long)]
    pub priority: Option<String>,
    /// List id
    #[arg(long)]
    pub list: Option<String>,
    /// Tag id (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Longer description
    #[arg(long)]
    pub description: Option<String>,
    /// Take the text literally as the title, without parsing it
    #[arg(long)]
    pub details: bool,
}

#[derive(Args)]
pub struct ViewArgs {
    /// View to switch to
    pub view: String,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Task ID
    pub id: String,
    /// Column (todo, in-progress, done)
    pub status: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(long)]
    pub description: Option<String>,
    /// New due date
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long)]
    pub clear_due: bool,
    /// New priority
    #[arg(long)]
    pub priority: Option<String>,
    /// New list id
    #[arg(long)]
    pub list: Option<String>,
    /// Replace the tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task to move
    pub id: String,
    /// Task whose position it takes
    pub over_id: String,
}
