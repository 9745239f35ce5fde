//! Command-line surface.

use chrono::TimeZone;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use todo_core::{due, Priority, TodoId, UpdateFields, ValidationError, DEFAULT_BASE_URL};

use crate::output::Format;

#[derive(Debug, Parser)]
#[command(name = "todo")]
#[command(about = "Command-line front-end for the hosted todo API")]
pub struct Cli {
    /// Base URL of the API; `/todos` is appended.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and show every task.
    List,
    /// Show one task exactly as the server returns it.
    Get { id: String },
    /// Create a task.
    Create(CreateArgs),
    /// Change fields of a task; unspecified fields keep their current value.
    Update(UpdateArgs),
    /// Change a task's title and description interactively.
    Edit { id: TodoId },
    /// Delete a task after confirmation.
    Delete {
        id: TodoId,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Self {
        match p {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, value_enum, default_value_t = PriorityArg::Low)]
    pub priority: PriorityArg,
    /// Local date-time `YYYY-MM-DDTHH:MM`; defaults to one hour from now.
    #[arg(long, conflicts_with = "no_due")]
    pub due: Option<String>,
    /// Create the task without a due date.
    #[arg(long)]
    pub no_due: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: TodoId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, action = ArgAction::Set)]
    pub completed: Option<bool>,
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Local date-time `YYYY-MM-DDTHH:MM`.
    #[arg(long, conflicts_with = "no_due")]
    pub due: Option<String>,
    /// Remove the due date.
    #[arg(long)]
    pub no_due: bool,
}

impl UpdateArgs {
    pub fn fields<Tz: TimeZone>(&self, tz: &Tz) -> Result<UpdateFields, ValidationError> {
        let due_at = match (&self.due, self.no_due) {
            (_, true) => Some(None),
            (Some(input), false) => Some(due::local_input_to_utc(input, tz)?),
            (None, false) => None,
        };
        Ok(UpdateFields {
            title: self.title.clone(),
            description: self.description.clone(),
            is_completed: self.completed,
            priority: self.priority.map(Priority::from),
            due_at,
        })
    }
}
