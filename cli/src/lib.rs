//! Terminal host for `todo-core`.
//!
//! Performs the I/O the core leaves out: HTTP through ureq, dialogs on the
//! terminal, and printing the rendered view. Each invocation behaves like a
//! page load followed by one user action.

pub mod args;
pub mod output;
pub mod prompt;
pub mod transport;

use std::io::Write;

use chrono::Local;
use thiserror::Error;
use todo_core::{Outcome, Prompter, SyncError, SyncLoop, TodoClient};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Command};
use crate::prompt::AssumeYes;
use crate::transport::UreqTransport;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn user_message(&self) -> String {
        match self {
            CliError::Sync(err) => err.user_message(),
            CliError::Io(_) => self.to_string(),
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn run<W: Write>(cli: &Cli, out: &mut W, prompter: &mut dyn Prompter) -> Result<(), CliError> {
    let client = TodoClient::new(&cli.base_url);
    let mut app = SyncLoop::new(client, UreqTransport::new(), Local);

    let boot = app.list();

    match &cli.command {
        Command::List => boot?,
        Command::Get { id } => {
            let dump = app.lookup_input(id)?;
            writeln!(out, "{dump}")?;
            return Ok(());
        }
        Command::Create(args) => {
            let form = app.form_mut();
            form.title = args.title.clone();
            form.description = args.description.clone();
            form.priority = args.priority.into();
            if args.no_due {
                form.due.clear();
            } else if let Some(due) = &args.due {
                form.due = due.clone();
            }
            let id = app.create()?;
            debug!(id, "create finished");
        }
        Command::Update(args) => {
            let fields = args.fields(&Local).map_err(SyncError::from)?;
            app.update(args.id, fields)?;
        }
        Command::Edit { id } => {
            if app.edit(*id, prompter)? == Outcome::Declined {
                debug!(id = *id, "edit cancelled");
            }
        }
        Command::Delete { id, yes } => {
            if *yes {
                app.delete(*id, &mut AssumeYes)?;
            } else {
                app.delete(*id, prompter)?;
            }
        }
    }

    output::write_view(out, app.view(), cli.format)?;
    Ok(())
}
